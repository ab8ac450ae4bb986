use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker for an elided range of pages.
///
/// A layout holds at most one of each, so renderers can use the marker key
/// as a stable identity next to the page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EllipsisMarker {
    /// First gap in a layout
    #[serde(rename = "ellipsis-1")]
    Leading,
    /// Second gap, only when both ends are elided
    #[serde(rename = "ellipsis-2")]
    Trailing,
}

impl EllipsisMarker {
    pub fn key(self) -> &'static str {
        match self {
            EllipsisMarker::Leading => "ellipsis-1",
            EllipsisMarker::Trailing => "ellipsis-2",
        }
    }
}

impl fmt::Display for EllipsisMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One entry of a pager layout.
///
/// Serializes to a bare number for pages and to the marker key for gaps,
/// e.g. `[1, "ellipsis-1", 4, 5, 6, "ellipsis-2", 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageItem {
    Page(usize),
    Ellipsis(EllipsisMarker),
}

impl PageItem {
    pub fn page(self) -> Option<usize> {
        match self {
            PageItem::Page(n) => Some(n),
            PageItem::Ellipsis(_) => None,
        }
    }

    pub fn is_ellipsis(self) -> bool {
        matches!(self, PageItem::Ellipsis(_))
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{n}"),
            PageItem::Ellipsis(_) => f.write_str("..."),
        }
    }
}
