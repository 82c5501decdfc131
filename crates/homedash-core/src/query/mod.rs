//! Key-addressed query cache with request deduplication.
//!
//! A query is identified by a [`QueryKey`]; its current value is a
//! [`QueryState`]. [`QueryCache::fetch`] guarantees at most one in-flight
//! fetch per key and hands every concurrent caller the same `Arc` result.

mod cache;
mod key;
mod state;

pub use cache::{CachePolicy, QueryCache, Snapshot};
pub use key::QueryKey;
pub use state::QueryState;
