// ── Query cache ──
//
// One `watch` channel per key carries the entry's snapshot. Claiming a
// fetch happens inside `send_if_modified`, which holds the channel's write
// lock, so two callers can never both start a fetch for the same key.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::key::QueryKey;
use super::state::QueryState;
use crate::error::CoreError;

/// Staleness and eviction windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// A `Ready` entry older than this is refetched on the next access.
    pub stale_after: Duration,
    /// Entries not accessed for this long are dropped by [`QueryCache::prune`].
    pub gc_after: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(30),
            gc_after: Duration::from_secs(300),
        }
    }
}

/// Point-in-time view of one cache entry.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub state: QueryState<T>,
    pub resolved_at: Option<Instant>,
    pub in_flight: bool,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            resolved_at: self.resolved_at,
            in_flight: self.in_flight,
        }
    }
}

impl<T> Snapshot<T> {
    fn empty() -> Self {
        Self {
            state: QueryState::Pending,
            resolved_at: None,
            in_flight: false,
        }
    }

    fn needs_fetch(&self, policy: &CachePolicy, now: Instant) -> bool {
        match self.state {
            QueryState::Pending | QueryState::Failed(_) => true,
            QueryState::Ready(_) => self
                .resolved_at
                .is_none_or(|at| now.duration_since(at) >= policy.stale_after),
        }
    }
}

struct CacheEntry<T> {
    tx: watch::Sender<Snapshot<T>>,
    last_access: Mutex<Instant>,
}

impl<T> CacheEntry<T> {
    fn new(now: Instant) -> Self {
        let (tx, _rx) = watch::channel(Snapshot::empty());
        Self {
            tx,
            last_access: Mutex::new(now),
        }
    }

    fn touch(&self, now: Instant) {
        *self
            .last_access
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = now;
    }

    fn last_access(&self) -> Instant {
        *self
            .last_access
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared cache of query results keyed by [`QueryKey`].
pub struct QueryCache<T> {
    entries: DashMap<QueryKey, Arc<CacheEntry<T>>>,
    policy: CachePolicy,
}

impl<T> std::fmt::Debug for QueryCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

impl<T> QueryCache<T> {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: DashMap::new(),
            policy,
        }
    }

    /// Current state for `key` without triggering any I/O.
    pub fn peek(&self, key: &QueryKey) -> Option<QueryState<T>> {
        self.entries
            .get(key)
            .map(|entry| entry.tx.borrow().state.clone())
    }

    /// Full snapshot for `key`, including resolution time and in-flight flag.
    pub fn snapshot(&self, key: &QueryKey) -> Option<Snapshot<T>> {
        self.entries.get(key).map(|entry| entry.tx.borrow().clone())
    }

    /// Mark `key` stale so the next access refetches. An entry with a fetch
    /// in flight is left alone: callers join that fetch instead of starting
    /// another. Returns whether the entry was marked.
    pub fn refetch(&self, key: &QueryKey) -> bool {
        let Some(entry) = self.entries.get(key).map(|e| Arc::clone(e.value())) else {
            return false;
        };
        entry.tx.send_if_modified(|snap| {
            if snap.in_flight || snap.resolved_at.is_none() {
                return false;
            }
            snap.resolved_at = None;
            true
        })
    }

    /// Drop one entry. An in-flight fetch still completes but its result
    /// lands in the detached entry and is discarded.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop entries idle for longer than `gc_after`. In-flight entries are
    /// kept. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let now = Instant::now();
        let gc_after = self.policy.gc_after;
        let mut removed = 0;
        self.entries.retain(|key, entry| {
            let keep =
                entry.tx.borrow().in_flight || now.duration_since(entry.last_access()) < gc_after;
            if !keep {
                debug!(%key, "evicting idle query");
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    /// Resolve `key`, starting `fetcher` only if no fetch is in flight and
    /// the cached value is missing, failed or stale.
    ///
    /// The fetch runs on a detached task: dropping the returned future
    /// neither cancels the fetch nor prevents its result from being cached.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let mut rx = self.join_or_start(key, fetcher);
        match rx.wait_for(|snap| !snap.in_flight).await {
            Ok(snap) => snap.state.clone(),
            Err(_) => QueryState::Failed(Arc::new(CoreError::Internal(
                "query entry closed before resolving".into(),
            ))),
        }
    }

    fn join_or_start<F, Fut>(&self, key: QueryKey, fetcher: F) -> watch::Receiver<Snapshot<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let now = Instant::now();
        let entry = Arc::clone(
            self.entries
                .entry(key.clone())
                .or_insert_with(|| Arc::new(CacheEntry::new(now)))
                .value(),
        );
        entry.touch(now);

        let rx = entry.tx.subscribe();
        let policy = self.policy;
        let claimed = entry.tx.send_if_modified(|snap| {
            if snap.in_flight || !snap.needs_fetch(&policy, now) {
                return false;
            }
            snap.in_flight = true;
            true
        });
        if !claimed {
            return rx;
        }

        debug!(%key, "starting query fetch");
        let fut = fetcher();
        tokio::spawn(async move {
            let state = match fut.await {
                Ok(value) => QueryState::Ready(Arc::new(value)),
                Err(err) => {
                    warn!(%key, error = %err, "query fetch failed");
                    QueryState::Failed(Arc::new(err))
                }
            };
            entry.tx.send_modify(|snap| {
                snap.state = state;
                snap.resolved_at = Some(Instant::now());
                snap.in_flight = false;
            });
        });
        rx
    }
}
