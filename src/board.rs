use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::aggregator::FeedAggregator;
use crate::source::FeedItem;

/// The result of one finished aggregation cycle.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub items: Vec<FeedItem>,
    pub refreshed_at: DateTime<Utc>,
}

/// Holds what the start page currently shows.
///
/// `None` means no cycle has finished yet, which the page renders as
/// "loading" rather than "no content".
pub struct FeedBoard {
    aggregator: FeedAggregator,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    refreshing: AtomicBool,
}

/// Clears the refreshing flag when dropped, so a cancelled or panicking
/// cycle never leaves the board stuck.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FeedBoard {
    pub fn new(aggregator: FeedAggregator) -> Self {
        Self {
            aggregator,
            snapshot: RwLock::new(None),
            refreshing: AtomicBool::new(false),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().await.clone()
    }

    /// Replace the current snapshot wholesale.
    pub async fn publish(&self, items: Vec<FeedItem>) {
        let snapshot = Snapshot {
            items,
            refreshed_at: Utc::now(),
        };
        *self.snapshot.write().await = Some(Arc::new(snapshot));
    }

    /// Run one aggregation cycle unless one is already running.
    ///
    /// Returns `false` when the call was skipped.
    pub async fn refresh(&self) -> bool {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("Refresh already in progress, skipping");
            return false;
        }
        let _guard = RefreshGuard(&self.refreshing);

        let items = self.aggregator.aggregate().await;
        self.publish(items).await;

        true
    }
}

pub async fn start_background_refresh(board: Arc<FeedBoard>, interval_minutes: u64) {
    let interval = Duration::from_secs(interval_minutes * 60);

    // Do initial fetch
    info!("Starting initial feed aggregation");
    board.refresh().await;

    // Then schedule periodic refreshes
    loop {
        tokio::time::sleep(interval).await;
        info!("Starting scheduled feed aggregation");
        board.refresh().await;
    }
}
