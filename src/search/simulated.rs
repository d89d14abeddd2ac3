use super::{produce, ResultItem, SearchProvider, SIMULATED_LATENCY};
use async_trait::async_trait;
use std::time::Duration;

/// Stand-in for a network search: waits a fixed delay, then synthesizes results.
pub struct SimulatedProvider {
    latency: Duration,
}

impl SimulatedProvider {
    pub fn new() -> Self {
        Self {
            latency: SIMULATED_LATENCY,
        }
    }

    #[cfg(test)]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for SimulatedProvider {
    async fn lookup(&self, query: String) -> Vec<ResultItem> {
        tokio::time::sleep(self.latency).await;
        produce(&query)
    }
}
