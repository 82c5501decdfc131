// ── dash. status query ──

use std::future::Future;
use std::sync::Arc;

use homedash_api::{DashDotClient, DashDotInfo};
use tokio::time::Instant;
use tracing::{debug, warn};
use url::Url;

use crate::error::CoreError;
use crate::query::{QueryCache, QueryKey, QueryState};

/// Cache kind for dash. `/info` lookups.
pub const STATUS_QUERY: &str = "dashdot/info";

/// Anything that can produce a dash. status payload for a target instance.
///
/// [`DashDotClient`] is the production source; tests plug in fakes.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_info(&self, base: &Url)
    -> impl Future<Output = Result<DashDotInfo, CoreError>> + Send;
}

impl StatusSource for DashDotClient {
    async fn fetch_info(&self, base: &Url) -> Result<DashDotInfo, CoreError> {
        self.info(base).await.map_err(|err| {
            if err.is_not_found() {
                warn!(proxy = %self.proxy_url(), "proxy has no dash. module route");
            } else if err.is_transient() {
                debug!(instance = %base, error = %err, "dash. unreachable, retrying on next refresh");
            }
            CoreError::from(err)
        })
    }
}

/// Status lookups for dash. tiles, deduplicated through a shared cache.
pub struct StatusQuery<S> {
    source: Arc<S>,
    cache: Arc<QueryCache<DashDotInfo>>,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for StatusQuery<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: StatusSource> StatusQuery<S> {
    pub fn new(source: S, cache: QueryCache<DashDotInfo>) -> Self {
        Self {
            source: Arc::new(source),
            cache: Arc::new(cache),
        }
    }

    pub fn cache(&self) -> &QueryCache<DashDotInfo> {
        &self.cache
    }

    pub fn key(target: &Url) -> QueryKey {
        QueryKey::new(STATUS_QUERY, Some(target.clone()))
    }

    /// Resolve the status for `target`.
    ///
    /// An unconfigured tile (`None`) gets the empty payload immediately,
    /// without touching the cache or the network.
    pub async fn fetch_status(&self, target: Option<&Url>) -> QueryState<DashDotInfo> {
        let Some(target) = target else {
            return QueryState::Ready(Arc::new(DashDotInfo::default()));
        };

        let source = Arc::clone(&self.source);
        let base = target.clone();
        self.cache
            .fetch(Self::key(target), move || async move {
                source.fetch_info(&base).await
            })
            .await
    }

    /// When the cached status for `target` last resolved.
    pub fn resolved_at(&self, target: &Url) -> Option<Instant> {
        self.cache
            .snapshot(&Self::key(target))
            .and_then(|snap| snap.resolved_at)
    }

    /// Mark the cached status stale so the next access refetches. A fetch
    /// already in flight is joined rather than repeated.
    pub fn refetch(&self, target: &Url) -> bool {
        self.cache.refetch(&Self::key(target))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use homedash_api::{StorageInfo, StorageVolume};

    use super::*;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl StatusSource for CountingSource {
        async fn fetch_info(&self, _base: &Url) -> Result<DashDotInfo, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(DashDotInfo {
                storage: StorageInfo {
                    layout: vec![StorageVolume { size: 512 }],
                },
                ..DashDotInfo::default()
            })
        }
    }

    fn query() -> StatusQuery<CountingSource> {
        StatusQuery::new(CountingSource::default(), QueryCache::default())
    }

    #[tokio::test]
    async fn unconfigured_target_short_circuits() {
        let query = query();
        let state = query.fetch_status(None).await;

        assert_eq!(**state.data().unwrap(), DashDotInfo::default());
        assert_eq!(query.source.calls.load(Ordering::SeqCst), 0);
        assert!(query.cache().is_empty());
    }

    #[tokio::test]
    async fn simultaneous_requests_share_one_call() {
        let query = query();
        let target: Url = "http://dash.lan:3001".parse().unwrap();

        let (a, b) = tokio::join!(
            query.fetch_status(Some(&target)),
            query.fetch_status(Some(&target))
        );

        assert_eq!(query.source.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(a.data().unwrap(), b.data().unwrap()));
        assert_eq!(a.data().unwrap().storage.layout.len(), 1);
    }

    #[tokio::test]
    async fn distinct_targets_fetch_separately() {
        let query = query();
        let a: Url = "http://a.lan:3001".parse().unwrap();
        let b: Url = "http://b.lan:3001".parse().unwrap();

        query.fetch_status(Some(&a)).await;
        query.fetch_status(Some(&b)).await;

        assert_eq!(query.source.calls.load(Ordering::SeqCst), 2);
        let cached = query.cache().peek(&StatusQuery::<CountingSource>::key(&a));
        assert!(cached.unwrap().is_ready());
        assert!(query.resolved_at(&a).is_some());

        assert!(query.refetch(&a));
        assert!(query.resolved_at(&a).is_none());
        assert!(query.resolved_at(&b).is_some());
        query.fetch_status(Some(&a)).await;
        assert_eq!(query.source.calls.load(Ordering::SeqCst), 3);
    }
}
