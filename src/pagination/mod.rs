mod model;

pub use model::{EllipsisMarker, PageItem};

/// Page counts up to this size are laid out in full.
const FULL_LAYOUT_MAX_PAGES: usize = 7;

/// Pages shown on each side of the current page in the middle regime.
const DELTA: usize = 1;

/// Returns the slice of `items` shown on the 1-based `current_page`.
///
/// Out-of-range pages (including page 0) and a zero page size yield an
/// empty slice; the last page may be shorter than `page_size`.
pub fn paginate<T>(items: &[T], current_page: usize, page_size: usize) -> &[T] {
    if current_page == 0 || page_size == 0 {
        return &[];
    }
    let start = (current_page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// Clamps a requested page into `[1, total_pages]`.
///
/// With no pages at all the result is 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.min(total_pages).max(1)
}

/// Computes the compact pager layout for `current_page` of `total_pages`.
///
/// Page 1 always comes first. Up to seven pages are listed in full. Beyond
/// that, the layout depends on where the current page sits:
/// - near the start (`current <= 3`): `1 2 3 4 … last`
/// - near the end (`current >= last - 2`): `1 … last-3 last-2 last-1 last`
/// - otherwise: `1 … current-1 current current+1 … last`
///
/// The layout never exceeds seven entries, however many pages there are.
///
/// # Examples
///
/// ```
/// use recipe_catalog::pagination::{page_numbers, EllipsisMarker, PageItem};
///
/// assert_eq!(
///     page_numbers(5, 10),
///     vec![
///         PageItem::Page(1),
///         PageItem::Ellipsis(EllipsisMarker::Leading),
///         PageItem::Page(4),
///         PageItem::Page(5),
///         PageItem::Page(6),
///         PageItem::Ellipsis(EllipsisMarker::Trailing),
///         PageItem::Page(10),
///     ]
/// );
/// ```
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<PageItem> {
    let mut pages = vec![PageItem::Page(1)];

    if total_pages <= FULL_LAYOUT_MAX_PAGES {
        pages.extend((2..=total_pages).map(PageItem::Page));
    } else if current_page <= 3 {
        pages.extend((2..=4).map(PageItem::Page));
        pages.push(PageItem::Ellipsis(EllipsisMarker::Leading));
        pages.push(PageItem::Page(total_pages));
    } else if current_page >= total_pages - 2 {
        pages.push(PageItem::Ellipsis(EllipsisMarker::Leading));
        pages.extend((total_pages - 3..=total_pages).map(PageItem::Page));
    } else {
        pages.push(PageItem::Ellipsis(EllipsisMarker::Leading));
        pages.extend((current_page - DELTA..=current_page + DELTA).map(PageItem::Page));
        pages.push(PageItem::Ellipsis(EllipsisMarker::Trailing));
        pages.push(PageItem::Page(total_pages));
    }

    pages
}
