use std::sync::Arc;

use crate::error::CoreError;

/// Resolution state of a cached query.
///
/// Loading and failure stay distinct here even though the UI renders both
/// as "no information".
#[derive(Debug)]
pub enum QueryState<T> {
    /// Never resolved yet.
    Pending,
    Ready(Arc<T>),
    Failed(Arc<CoreError>),
}

// Manual impl: cloning only bumps refcounts, so `T` need not be `Clone`.
impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Pending => Self::Pending,
            Self::Ready(data) => Self::Ready(Arc::clone(data)),
            Self::Failed(err) => Self::Failed(Arc::clone(err)),
        }
    }
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
