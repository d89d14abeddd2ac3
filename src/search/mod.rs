pub mod simulated;
pub mod state;

use async_trait::async_trait;
use std::time::Duration;

/// How long a simulated lookup takes before its results land.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(1000);

/// Number of placeholder results every lookup produces.
pub const RESULT_COUNT: usize = 5;

pub const PLACEHOLDER_LINK: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub title: String,
    pub description: String,
    pub link: String,
}

/// Completion of a lookup, delivered back to the event loop.
#[derive(Debug, Clone)]
pub struct SearchMessage {
    pub seq: u64,
    pub query: String,
    pub results: Vec<ResultItem>,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Resolve `query` into a result list. Lookups cannot fail.
    async fn lookup(&self, query: String) -> Vec<ResultItem>;
}

/// Synthesize the placeholder results for `query`.
///
/// The query is embedded verbatim, untrimmed, into every title.
pub fn produce(query: &str) -> Vec<ResultItem> {
    (1..=RESULT_COUNT)
        .map(|i| ResultItem {
            title: format!("Result for \"{}\" {}", query, i),
            description: format!("Short description for result {}", i),
            link: PLACEHOLDER_LINK.to_string(),
        })
        .collect()
}
