use crate::catalog::Catalog;
use crate::config::BrowseConfig;
use crate::debounce::{Clock, Debouncer, SystemClock};
use crate::pagination::{clamp_page, page_numbers, paginate, total_pages, PageItem};
use crate::related::related_recipes;
use crate::search::{filter_recipes, RecipeQuery, TagSelection};
use crate::suggest::suggest;
use crate::tags::rank_tags;
use crate::Recipe;
use std::time::Duration;
use tracing::{debug, warn};

mod model;

pub use model::*;

/// Ranked tags, memoized for one selection.
#[derive(Debug)]
struct RankedTags {
    selection: TagSelection,
    tags: Vec<String>,
}

/// Drives the catalog screens from user input.
///
/// # Examples
///
/// ```
/// use recipe_catalog::{Browser, BrowseConfig, Catalog};
///
/// let catalog = Catalog::from_json_str(r#"[
///     {"id": 1, "name": "Polenta", "tags": ["Comidaregional"], "easy": true},
///     {"id": 2, "name": "Turrón", "tags": ["Navidad", "Chocolate"], "easy": true}
/// ]"#)?;
/// let mut browser = Browser::new(catalog, BrowseConfig::default());
///
/// browser.select_tag("Navidad");
/// let view = browser.view();
/// assert_eq!(view.result_count, 1);
/// assert_eq!(view.recipes[0].name, "Turrón");
/// # Ok::<(), recipe_catalog::CatalogError>(())
/// ```
#[derive(Debug)]
pub struct Browser<C: Clock = SystemClock> {
    catalog: Catalog,
    config: BrowseConfig,
    featured: Vec<String>,
    raw_input: String,
    query: RecipeQuery,
    current_page: usize,
    search_input: Debouncer<String, C>,
    ranked_tags: RankedTags,
    /// Positions of matching recipes in catalog order
    filtered: Vec<usize>,
}

impl Browser<SystemClock> {
    pub fn new(catalog: Catalog, config: BrowseConfig) -> Self {
        Self::with_clock(catalog, config, SystemClock)
    }
}

impl<C: Clock> Browser<C> {
    pub fn with_clock(catalog: Catalog, config: BrowseConfig, clock: C) -> Self {
        Self::restore(catalog, config, clock, InitialQuery::default())
    }

    /// Creates a browser starting from externally supplied state.
    ///
    /// The starting page is clamped to the pages available for the initial
    /// query but not reset to 1.
    pub fn restore(
        catalog: Catalog,
        config: BrowseConfig,
        clock: C,
        initial: InitialQuery,
    ) -> Self {
        let featured = config.featured();
        let search_input = Debouncer::new(config.debounce(), clock);

        let mut browser = Browser {
            catalog,
            config,
            featured,
            raw_input: initial.search.clone(),
            query: RecipeQuery::default(),
            current_page: 1,
            search_input,
            ranked_tags: RankedTags {
                selection: TagSelection::All,
                tags: Vec::new(),
            },
            filtered: Vec::new(),
        };

        let tag = match initial.tag.as_deref() {
            Some(label) => browser.resolve_tag(label),
            None => TagSelection::All,
        };
        browser.query = RecipeQuery::new(initial.search, tag, initial.easy_only);
        browser.refresh_tags();
        browser.refresh_results();
        browser.current_page = clamp_page(initial.page, browser.total_pages());

        debug!(
            results = browser.filtered.len(),
            page = browser.current_page,
            "restored browser state"
        );
        browser
    }

    /// Records typed text and schedules it as the next search term.
    ///
    /// Results do not change until the quiet period elapses and
    /// [`Browser::tick`] is called.
    pub fn input(&mut self, text: &str) {
        self.raw_input = text.to_string();
        self.search_input.feed(text.to_string());
    }

    /// Commits debounced input whose quiet period has elapsed.
    ///
    /// Returns true if the results changed.
    pub fn tick(&mut self) -> bool {
        match self.search_input.poll() {
            Some(term) => self.set_search_term(term),
            None => false,
        }
    }

    /// Commits a search term immediately, e.g. when a suggestion is picked.
    ///
    /// Any pending debounced input is cancelled. Returns true if the results
    /// changed.
    pub fn commit_search(&mut self, text: &str) -> bool {
        self.search_input.cancel();
        self.raw_input = text.to_string();
        self.set_search_term(text.to_string())
    }

    pub fn clear_search(&mut self) -> bool {
        self.commit_search("")
    }

    /// Selects a tag by its label.
    ///
    /// The "all" label, or a tag no recipe uses, clears the tag filter.
    /// Returns true if the results changed.
    pub fn select_tag(&mut self, label: &str) -> bool {
        let tag = self.resolve_tag(label);
        if tag == self.query.tag {
            return false;
        }
        debug!(tag = label, "selected tag");
        self.query.tag = tag;
        self.refresh_tags();
        self.on_query_changed();
        true
    }

    /// Returns true if the results changed.
    pub fn set_easy_only(&mut self, easy_only: bool) -> bool {
        if easy_only == self.query.easy_only {
            return false;
        }
        debug!(easy_only, "toggled easy filter");
        self.query.easy_only = easy_only;
        self.on_query_changed();
        true
    }

    pub fn toggle_easy_only(&mut self) -> bool {
        self.set_easy_only(!self.query.easy_only)
    }

    /// Moves to `page`, clamped to the available pages. Returns the page
    /// actually shown.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.current_page = clamp_page(page, self.total_pages());
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BrowseConfig {
        &self.config
    }

    pub fn query(&self) -> &RecipeQuery {
        &self.query
    }

    /// Text as typed, which may be ahead of the committed search term.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn selected_tag(&self) -> &str {
        self.query.tag.label(&self.config.all_tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.ranked_tags.tags
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.config.page_size)
    }

    pub fn result_count(&self) -> usize {
        self.filtered.len()
    }

    /// All matching recipes, in catalog order.
    pub fn results(&self) -> Vec<&Recipe> {
        self.filtered.iter().map(|&i| &self.catalog.recipes()[i]).collect()
    }

    /// Matching recipes on the current page.
    pub fn page(&self) -> Vec<&Recipe> {
        paginate(&self.filtered, self.current_page, self.config.page_size)
            .iter()
            .map(|&i| &self.catalog.recipes()[i])
            .collect()
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        page_numbers(self.current_page, self.total_pages())
    }

    /// Autocomplete suggestions for the text as typed.
    pub fn suggestions(&self) -> Vec<String> {
        suggest(
            &self.raw_input,
            self.catalog.recipes(),
            self.config.max_suggestions,
        )
    }

    pub fn search_pending(&self) -> bool {
        self.search_input.is_pending()
    }

    /// Time until pending input commits, for hosts that schedule a timer
    /// before calling [`Browser::tick`].
    pub fn search_remaining(&self) -> Option<Duration> {
        self.search_input.remaining()
    }

    pub fn view(&self) -> CatalogView<'_> {
        CatalogView {
            tags: self.tags(),
            selected_tag: self.selected_tag(),
            search_input: &self.raw_input,
            search_term: &self.query.search_term,
            easy_only: self.query.easy_only,
            result_count: self.result_count(),
            recipes: self.page(),
            current_page: self.current_page,
            total_pages: self.total_pages(),
            page_numbers: self.page_numbers(),
        }
    }

    pub fn recipe(&self, id: u64) -> Option<&Recipe> {
        self.catalog.get(id)
    }

    /// Returns a recipe with its related recipes, or `None` for unknown ids.
    pub fn detail(&self, id: u64) -> Option<RecipeDetail<'_>> {
        let recipe = self.catalog.get(id)?;
        let related = related_recipes(
            self.catalog.recipes(),
            Some(recipe),
            self.config.max_related,
        );
        Some(RecipeDetail { recipe, related })
    }

    fn resolve_tag(&self, label: &str) -> TagSelection {
        match TagSelection::from_label(label, &self.config.all_tag) {
            TagSelection::Tag(tag) if !self.catalog.tag_universe().contains(tag.as_str()) => {
                warn!(tag = %tag, "tag not used by any recipe, clearing tag filter");
                TagSelection::All
            }
            selection => selection,
        }
    }

    fn set_search_term(&mut self, term: String) -> bool {
        if term == self.query.search_term {
            return false;
        }
        debug!(term = %term, "committed search term");
        self.query.search_term = term;
        self.on_query_changed();
        true
    }

    fn on_query_changed(&mut self) {
        self.refresh_results();
        self.current_page = 1;
    }

    fn refresh_tags(&mut self) {
        if self.ranked_tags.selection == self.query.tag && !self.ranked_tags.tags.is_empty() {
            return;
        }
        self.ranked_tags = RankedTags {
            selection: self.query.tag.clone(),
            tags: rank_tags(self.catalog.recipes(), &self.featured, &self.query.tag),
        };
        debug!(tags = self.ranked_tags.tags.len(), "ranked tags");
    }

    fn refresh_results(&mut self) {
        self.filtered = filter_recipes(self.catalog.recipes(), &self.query)
            .into_iter()
            .filter_map(|recipe| self.catalog.position(recipe.id))
            .collect();
        debug!(results = self.filtered.len(), "filtered recipes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use crate::pagination::EllipsisMarker;

    fn recipe(id: u64, name: &str, tags: &[&str], easy: bool) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            easy,
            ..Default::default()
        }
    }

    /// Twenty recipes: every third is Navidad, every other is easy.
    fn setup_test_catalog() -> Catalog {
        let recipes = (1..=20)
            .map(|id| {
                let mut tags = vec!["Cocina"];
                if id % 3 == 0 {
                    tags.push("Navidad");
                }
                if id == 7 {
                    tags.push("Zapallo");
                }
                recipe(id, &format!("Receta {id}"), &tags, id % 2 == 0)
            })
            .collect();
        Catalog::from_recipes(recipes).unwrap()
    }

    fn config(page_size: usize) -> BrowseConfig {
        BrowseConfig {
            page_size,
            ..Default::default()
        }
    }

    fn setup(page_size: usize) -> (ManualClock, Browser<ManualClock>) {
        let clock = ManualClock::new();
        let browser = Browser::with_clock(setup_test_catalog(), config(page_size), clock.clone());
        (clock, browser)
    }

    fn ids(recipes: &[&Recipe]) -> Vec<u64> {
        recipes.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_initial_view() {
        let (_clock, browser) = setup(6);
        let view = browser.view();
        assert_eq!(view.result_count, 20);
        assert_eq!(view.total_pages, 4);
        assert_eq!(view.current_page, 1);
        assert_eq!(ids(&view.recipes), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(view.selected_tag, "Todas");
        assert_eq!(view.tags, &["Todas", "Navidad", "Cocina", "Zapallo"]);
    }

    #[test]
    fn test_input_is_debounced() {
        let (clock, mut browser) = setup(6);
        browser.input("Receta 1");
        assert_eq!(browser.raw_input(), "Receta 1");
        assert_eq!(browser.query().search_term, "");
        assert_eq!(browser.result_count(), 20);
        assert!(!browser.tick());

        clock.advance(Duration::from_millis(300));
        assert!(browser.tick());
        assert_eq!(browser.query().search_term, "Receta 1");
        // "Receta 1", "Receta 10" .. "Receta 19"
        assert_eq!(browser.result_count(), 11);
        assert!(!browser.search_pending());
    }

    #[test]
    fn test_rapid_input_commits_once() {
        let (clock, mut browser) = setup(6);
        for text in ["R", "Re", "Rec", "Receta 2"] {
            browser.input(text);
            clock.advance(Duration::from_millis(100));
            assert!(!browser.tick());
        }
        clock.advance(Duration::from_millis(200));
        assert!(browser.tick());
        assert_eq!(browser.query().search_term, "Receta 2");
        assert_eq!(ids(&browser.results()), vec![2, 20]);
    }

    #[test]
    fn test_commit_search_cancels_pending_input() {
        let (clock, mut browser) = setup(6);
        browser.input("Rec");
        assert!(browser.commit_search("Receta 5"));
        assert!(!browser.search_pending());

        clock.advance(Duration::from_secs(1));
        assert!(!browser.tick());
        assert_eq!(browser.query().search_term, "Receta 5");
        assert_eq!(browser.raw_input(), "Receta 5");
        assert_eq!(ids(&browser.results()), vec![5]);
    }

    #[test]
    fn test_query_changes_reset_page() {
        let (_clock, mut browser) = setup(2);
        browser.go_to_page(5);
        assert_eq!(browser.current_page(), 5);
        assert!(browser.set_easy_only(true));
        assert_eq!(browser.current_page(), 1);

        browser.go_to_page(3);
        assert!(browser.select_tag("Navidad"));
        assert_eq!(browser.current_page(), 1);
        assert_eq!(ids(&browser.results()), vec![6, 12, 18]);

        browser.go_to_page(2);
        assert!(browser.commit_search("1"));
        assert_eq!(browser.current_page(), 1);
        assert_eq!(ids(&browser.results()), vec![12, 18]);
    }

    #[test]
    fn test_unchanged_query_keeps_page() {
        let (_clock, mut browser) = setup(2);
        browser.go_to_page(4);
        assert!(!browser.set_easy_only(false));
        assert!(!browser.select_tag("Todas"));
        assert!(!browser.commit_search(""));
        assert_eq!(browser.current_page(), 4);
    }

    #[test]
    fn test_page_is_clamped() {
        let (_clock, mut browser) = setup(6);
        assert_eq!(browser.go_to_page(99), 4);
        assert_eq!(ids(&browser.page()), vec![19, 20]);
        assert_eq!(browser.next_page(), 4);
        assert_eq!(browser.go_to_page(0), 1);
        assert_eq!(browser.previous_page(), 1);
        assert_eq!(browser.next_page(), 2);
    }

    #[test]
    fn test_empty_results() {
        let (_clock, mut browser) = setup(6);
        browser.commit_search("sushi");
        let view = browser.view();
        assert_eq!(view.result_count, 0);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
        assert!(view.recipes.is_empty());
        assert_eq!(view.page_numbers, vec![PageItem::Page(1)]);
    }

    #[test]
    fn test_selected_tag_is_promoted() {
        let (_clock, mut browser) = setup(6);
        browser.select_tag("Zapallo");
        assert_eq!(browser.tags(), &["Todas", "Zapallo", "Navidad", "Cocina"]);
        assert_eq!(browser.selected_tag(), "Zapallo");

        browser.select_tag("Todas");
        assert_eq!(browser.tags(), &["Todas", "Navidad", "Cocina", "Zapallo"]);
    }

    #[test]
    fn test_unknown_tag_clears_filter() {
        let (_clock, mut browser) = setup(6);
        browser.select_tag("Navidad");
        assert!(browser.select_tag("Inexistente"));
        assert_eq!(browser.selected_tag(), "Todas");
        assert_eq!(browser.result_count(), 20);
    }

    #[test]
    fn test_restore_honors_initial_page() {
        let clock = ManualClock::new();
        let initial = InitialQuery {
            search: String::new(),
            tag: Some("Cocina".to_string()),
            easy_only: true,
            page: 3,
        };
        let browser = Browser::restore(setup_test_catalog(), config(2), clock, initial);
        assert_eq!(browser.current_page(), 3);
        assert_eq!(ids(&browser.page()), vec![10, 12]);
        assert_eq!(browser.selected_tag(), "Cocina");
    }

    #[test]
    fn test_restore_clamps_initial_page() {
        let clock = ManualClock::new();
        let initial = InitialQuery {
            search: "Receta 7".to_string(),
            tag: Some("Perdida".to_string()),
            easy_only: false,
            page: 8,
        };
        let browser = Browser::restore(setup_test_catalog(), config(6), clock, initial);
        assert_eq!(browser.current_page(), 1);
        assert_eq!(browser.selected_tag(), "Todas");
        assert_eq!(browser.raw_input(), "Receta 7");
        assert_eq!(ids(&browser.results()), vec![7]);
    }

    #[test]
    fn test_page_numbers_follow_current_page() {
        let (_clock, mut browser) = setup(1);
        browser.go_to_page(10);
        assert_eq!(
            browser.page_numbers(),
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis(EllipsisMarker::Leading),
                PageItem::Page(9),
                PageItem::Page(10),
                PageItem::Page(11),
                PageItem::Ellipsis(EllipsisMarker::Trailing),
                PageItem::Page(20),
            ]
        );
    }

    #[test]
    fn test_pages_cover_results() {
        let (_clock, mut browser) = setup(3);
        browser.set_easy_only(true);
        let mut seen = Vec::new();
        for page in 1..=browser.total_pages() {
            browser.go_to_page(page);
            seen.extend(ids(&browser.page()));
        }
        assert_eq!(seen, ids(&browser.results()));
    }

    #[test]
    fn test_suggestions_use_raw_input() {
        let (_clock, mut browser) = setup(6);
        assert!(browser.suggestions().is_empty());
        browser.input("navi");
        assert_eq!(browser.suggestions(), vec!["Navidad"]);
    }

    #[test]
    fn test_detail_and_related() {
        let (_clock, browser) = setup(6);
        let detail = browser.detail(3).unwrap();
        assert_eq!(detail.recipe.id, 3);
        assert_eq!(ids(&detail.related), vec![1, 2, 4]);

        assert!(browser.detail(999).is_none());
        assert!(browser.recipe(999).is_none());
    }

    #[test]
    fn test_search_remaining() {
        let (clock, mut browser) = setup(6);
        assert_eq!(browser.search_remaining(), None);
        browser.input("x");
        clock.advance(Duration::from_millis(100));
        assert_eq!(browser.search_remaining(), Some(Duration::from_millis(200)));
    }
}
