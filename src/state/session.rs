/// The search session and its incremental-load state machine
///
/// A session covers one query from submission until it is exhausted or
/// replaced by the next submission. The session decides when a scroll
/// position warrants fetching the next page and when the sequence is over;
/// the actual fetching and rendering happen elsewhere.
///
/// Every session carries a numeric id. Background fetches started for a
/// session echo that id back with their result, and results whose id no
/// longer matches the current session are dropped. That replaces the
/// browser original's "remove the scroll listener" trick with explicit,
/// runtime-independent cancellation.

/// Rejection reasons for starting a session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The submitted query was empty after trimming
    #[error("search query is empty")]
    Empty,
}

/// Outcome of applying the first page of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstPage {
    /// The API reported zero total hits; nothing to show, nothing armed
    NoResults,
    /// Results recorded; `armed` tells whether more pages remain
    Loaded { armed: bool },
}

/// Outcome of applying a follow-up page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// More results remain; the loader stays armed
    More,
    /// Everything available has been shown; the loader is disarmed
    Exhausted,
}

/// Scroll positions within one logical pixel of the bottom count as a
/// threshold crossing, so float rounding can't leave the trigger dead
const SCROLL_SLACK: f32 = 1.0;

/// Paging state for one search query
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Monotonically increasing session token; 0 = no search yet
    id: u64,
    /// The trimmed query this session is for
    query: String,
    /// Last page successfully applied (1-based; 0 before the first page)
    page: u32,
    /// How many results have been shown so far
    shown_count: u32,
    /// Total hits the API will serve for this query
    total_available: u32,
    /// Whether the scroll-triggered loader may fire
    armed: bool,
    /// Whether a fetch for this session is currently in flight
    loading: bool,
}

impl SearchSession {
    /// An idle session with no query
    pub fn new() -> Self {
        SearchSession {
            id: 0,
            query: String::new(),
            page: 0,
            shown_count: 0,
            total_available: 0,
            armed: false,
            loading: false,
        }
    }

    /// Start a new session for `query`
    ///
    /// Validates the query, resets every counter, marks the first fetch as
    /// in flight and returns the fresh session id. Any result still in
    /// flight for an earlier session fails the `is_current` check from now
    /// on, so a stale load can never append into the reset gallery.
    pub fn start(&mut self, query: &str) -> Result<u64, QueryError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }

        self.id += 1;
        self.query = trimmed.to_string();
        self.page = 0;
        self.shown_count = 0;
        self.total_available = 0;
        self.armed = false;
        self.loading = true;

        Ok(self.id)
    }

    /// Whether `id` belongs to the session currently on screen
    pub fn is_current(&self, id: u64) -> bool {
        self.id == id && self.id != 0
    }

    /// Record the first page of results
    ///
    /// Arms the scroll loader only when more results remain beyond what
    /// the first page delivered.
    pub fn apply_first_page(&mut self, total_hits: u32, items: usize) -> FirstPage {
        self.loading = false;

        if total_hits == 0 {
            return FirstPage::NoResults;
        }

        self.total_available = total_hits;
        self.shown_count = (items as u32).min(total_hits);
        self.page = 1;
        self.armed = self.shown_count < self.total_available;

        FirstPage::Loaded { armed: self.armed }
    }

    /// Decide whether this scroll position should trigger the next page
    ///
    /// Fires at most once per threshold crossing: while the resulting
    /// fetch is in flight, further calls return `None` no matter how many
    /// scroll events arrive. Returns the 1-based page number to fetch.
    /// The page counter itself only advances in `apply_next_page`, so a
    /// failed fetch leaves the session exactly as it was.
    pub fn request_next_page(&mut self, viewport_bottom: f32, content_height: f32) -> Option<u32> {
        if !self.armed || self.loading {
            return None;
        }
        if viewport_bottom + SCROLL_SLACK < content_height {
            return None;
        }

        self.loading = true;
        Some(self.page + 1)
    }

    /// Commit a successfully fetched follow-up page
    ///
    /// Adds `items` to the shown count (clamped so it can never exceed the
    /// total) and disarms the loader once everything available is shown.
    pub fn apply_next_page(&mut self, items: usize) -> PageOutcome {
        self.loading = false;
        self.page += 1;
        self.shown_count = (self.shown_count + items as u32).min(self.total_available);

        if self.shown_count >= self.total_available {
            self.armed = false;
            PageOutcome::Exhausted
        } else {
            PageOutcome::More
        }
    }

    /// A fetch for this session failed
    ///
    /// Only the in-flight flag is cleared; counters and the armed state
    /// stay what they were before the failed call, so a later retry
    /// starts from a clean slate.
    pub fn fail_load(&mut self) {
        self.loading = false;
    }

    /// The query this session is searching for
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current session id (0 before the first search)
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn shown_count(&self) -> u32 {
        self.shown_count
    }

    pub fn total_available(&self) -> u32 {
        self.total_available
    }

    /// Whether a fetch is currently in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the scroll loader may fire
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether every available result has been shown
    pub fn is_exhausted(&self) -> bool {
        self.total_available > 0 && self.shown_count >= self.total_available
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scroll arguments that are past the bottom threshold
    const AT_BOTTOM: (f32, f32) = (2000.0, 2000.0);

    #[test]
    fn test_empty_query_rejected() {
        let mut session = SearchSession::new();
        assert_eq!(session.start(""), Err(QueryError::Empty));
        assert_eq!(session.start("   "), Err(QueryError::Empty));
        assert!(!session.is_loading());
        assert_eq!(session.id(), 0);
    }

    #[test]
    fn test_query_is_trimmed() {
        let mut session = SearchSession::new();
        session.start("  cats  ").unwrap();
        assert_eq!(session.query(), "cats");
    }

    #[test]
    fn test_three_page_scenario_ends_exhausted() {
        // query="cats": 45 total hits, 15 per page
        let mut session = SearchSession::new();
        session.start("cats").unwrap();

        let first = session.apply_first_page(45, 15);
        assert_eq!(first, FirstPage::Loaded { armed: true });
        assert_eq!(session.shown_count(), 15);
        assert!(session.is_armed());

        // Scroll trigger -> page 2
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), Some(2));
        assert_eq!(session.apply_next_page(15), PageOutcome::More);
        assert_eq!(session.shown_count(), 30);

        // Scroll trigger -> page 3, which exhausts the search
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), Some(3));
        assert_eq!(session.apply_next_page(15), PageOutcome::Exhausted);
        assert_eq!(session.shown_count(), 45);
        assert!(session.is_exhausted());
        assert!(!session.is_armed());

        // Exhausted sessions never request another page
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), None);
    }

    #[test]
    fn test_zero_hits_arms_nothing() {
        let mut session = SearchSession::new();
        session.start("zzzznotfound").unwrap();

        assert_eq!(session.apply_first_page(0, 0), FirstPage::NoResults);
        assert!(!session.is_armed());
        assert!(!session.is_exhausted());
        assert_eq!(session.shown_count(), 0);
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), None);
    }

    #[test]
    fn test_single_page_search_is_not_armed() {
        let mut session = SearchSession::new();
        session.start("rare").unwrap();

        let first = session.apply_first_page(12, 12);
        assert_eq!(first, FirstPage::Loaded { armed: false });
        assert!(session.is_exhausted());
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), None);
    }

    #[test]
    fn test_duplicate_scroll_triggers_ignored_while_loading() {
        let mut session = SearchSession::new();
        session.start("cats").unwrap();
        session.apply_first_page(45, 15);

        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), Some(2));
        // Rapid repeated scroll events while the fetch is in flight
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), None);
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), None);

        session.apply_next_page(15);
        // After the fetch settles, the next crossing fires again
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), Some(3));
    }

    #[test]
    fn test_no_trigger_above_threshold() {
        let mut session = SearchSession::new();
        session.start("cats").unwrap();
        session.apply_first_page(45, 15);

        // Viewport bottom well above the content bottom
        assert_eq!(session.request_next_page(800.0, 2000.0), None);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failed_load_leaves_session_unchanged() {
        let mut session = SearchSession::new();
        session.start("cats").unwrap();
        session.apply_first_page(45, 15);

        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), Some(2));
        session.fail_load();

        // Counters untouched, loader re-armed, and the retry asks for the
        // same page the failed fetch was for
        assert_eq!(session.shown_count(), 15);
        assert!(session.is_armed());
        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), Some(2));
    }

    #[test]
    fn test_new_search_invalidates_old_session() {
        let mut session = SearchSession::new();
        let first_id = session.start("cats").unwrap();
        session.apply_first_page(45, 15);

        let second_id = session.start("dogs").unwrap();
        assert_ne!(first_id, second_id);
        assert!(!session.is_current(first_id));
        assert!(session.is_current(second_id));

        // Counters were reset by the new start
        assert_eq!(session.shown_count(), 0);
        assert_eq!(session.total_available(), 0);
        assert!(!session.is_armed());
        assert!(session.is_loading());
    }

    #[test]
    fn test_shown_count_never_exceeds_total() {
        // API over-delivers on the last page; the counter clamps
        let mut session = SearchSession::new();
        session.start("cats").unwrap();
        session.apply_first_page(20, 15);

        assert_eq!(session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1), Some(2));
        assert_eq!(session.apply_next_page(15), PageOutcome::Exhausted);
        assert_eq!(session.shown_count(), 20);
        assert!(session.shown_count() <= session.total_available());
    }

    #[test]
    fn test_shown_count_is_monotonic() {
        let mut session = SearchSession::new();
        session.start("cats").unwrap();
        session.apply_first_page(100, 40);

        let mut last = session.shown_count();
        for _ in 0..2 {
            session.request_next_page(AT_BOTTOM.0, AT_BOTTOM.1).unwrap();
            session.apply_next_page(40);
            assert!(session.shown_count() >= last);
            last = session.shown_count();
        }
    }

    #[test]
    fn test_id_zero_is_never_current() {
        let session = SearchSession::new();
        assert!(!session.is_current(0));
    }
}
