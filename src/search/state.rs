use super::ResultItem;

/// Query, results and loading flag of one search box.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    results: Vec<ResultItem>,
    loading: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.drop_results_if_blank();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.drop_results_if_blank();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.drop_results_if_blank();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.results.clear();
    }

    /// A blank query never sits next to results. The loading flag is left
    /// alone: a lookup already in flight still lands when it finishes.
    fn drop_results_if_blank(&mut self) {
        if self.query.trim().is_empty() {
            self.results.clear();
        }
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Gate a search on the current query.
    ///
    /// A blank query only clears the results. Anything else clears the
    /// results, raises the loading flag and returns the untrimmed query for
    /// the caller to look up.
    pub fn submit(&mut self) -> Option<String> {
        self.results.clear();

        if self.query.trim().is_empty() {
            return None;
        }

        self.loading = true;
        Some(self.query.clone())
    }

    /// Replace the results wholesale and drop the loading flag.
    pub fn complete(&mut self, results: Vec<ResultItem>) {
        self.results = results;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::produce;

    fn state_with(query: &str) -> SearchState {
        let mut state = SearchState::new();
        state.set_query(query);
        state
    }

    #[test]
    fn test_blank_queries_schedule_nothing() {
        for query in ["", " ", "   ", "\t", "\n \t "] {
            let mut state = state_with(query);
            assert_eq!(state.submit(), None, "query {:?}", query);
            assert!(state.results().is_empty());
            assert!(!state.is_loading());
        }
    }

    #[test]
    fn test_blank_submit_is_idempotent() {
        let mut state = SearchState::new();
        assert_eq!(state.submit(), None);
        assert_eq!(state.submit(), None);
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_blank_submit_clears_previous_results() {
        let mut state = state_with("cats");
        state.submit();
        state.complete(produce("cats"));
        assert_eq!(state.results().len(), 5);

        state.set_query("  ");
        assert_eq!(state.submit(), None);
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_submit_enters_loading_with_untrimmed_query() {
        let mut state = state_with("  cats ");
        assert_eq!(state.submit(), Some("  cats ".to_string()));
        assert!(state.is_loading());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_resubmit_clears_results_before_loading() {
        let mut state = state_with("cats");
        state.submit();
        state.complete(produce("cats"));

        state.set_query("dogs");
        state.submit();
        assert!(state.is_loading());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_complete_returns_to_idle() {
        let mut state = state_with("cats");
        let query = state.submit().unwrap();
        state.complete(produce(&query));

        assert!(!state.is_loading());
        assert_eq!(state.results(), produce("cats").as_slice());
    }

    #[test]
    fn test_clearing_query_drops_results() {
        let mut state = state_with("cats");
        state.submit();
        state.complete(produce("cats"));

        state.clear_query();
        assert_eq!(state.query(), "");
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_backspacing_to_blank_drops_results() {
        let mut state = state_with("ab");
        state.submit();
        state.complete(produce("ab"));

        state.pop_char();
        assert_eq!(state.results().len(), 5);
        state.pop_char();
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_whitespace_query_drops_results() {
        let mut state = state_with("cats");
        state.submit();
        state.complete(produce("cats"));

        state.set_query("   ");
        assert!(state.results().is_empty());

        state.set_query("dogs");
        state.submit();
        state.complete(produce("dogs"));
        state.push_char(' ');
        assert_eq!(state.results().len(), 5);
    }

    #[test]
    fn test_blank_edit_while_loading_keeps_flag() {
        let mut state = state_with("cats");
        state.submit();

        state.clear_query();
        assert!(state.is_loading());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_query_editing() {
        let mut state = SearchState::new();
        for c in "catz".chars() {
            state.push_char(c);
        }
        state.pop_char();
        state.push_char('s');
        assert_eq!(state.query(), "cats");

        state.clear_query();
        assert_eq!(state.query(), "");

        state.pop_char();
        assert_eq!(state.query(), "");
    }
}
