use futures_util::future::join_all;
use tracing::info;

use crate::error::SourceError;
use crate::fetcher::Fetcher;
use crate::source::{FeedItem, FeedSource};

/// Combines a fixed, ordered list of sources into one headline list.
pub struct FeedAggregator {
    sources: Vec<FeedSource>,
    fetcher: Fetcher,
}

impl FeedAggregator {
    /// Fails if any source could not produce labelled items.
    pub fn new(sources: Vec<FeedSource>, fetcher: Fetcher) -> Result<Self, SourceError> {
        for source in &sources {
            source.validate()?;
        }
        Ok(Self { sources, fetcher })
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Run one aggregation cycle.
    ///
    /// All sources are requested at once. The result lists sources in
    /// declaration order regardless of which response arrived first, and a
    /// failed source simply contributes nothing.
    pub async fn aggregate(&self) -> Vec<FeedItem> {
        info!("Aggregating {} sources", self.sources.len());

        let batches = join_all(self.sources.iter().map(|s| self.fetcher.fetch_one(s))).await;

        let empty = batches.iter().filter(|b| b.is_empty()).count();
        let items: Vec<FeedItem> = batches.into_iter().flatten().collect();

        info!(
            items = items.len(),
            empty_sources = empty,
            "Aggregation cycle complete"
        );
        items
    }
}
