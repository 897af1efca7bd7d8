use std::time::Duration;
use thiserror::Error;

/// Errors raised by network edits, solves and snapshot handling.
///
/// Structural no-ops (adding a node twice, removing something absent) are not errors; those
/// operations report a `bool` instead. An unreachable sink is not an error either, it simply
/// yields a flow of zero.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("node {0} not found")]
    NodeNotFound(String),

    #[error("arc {from} -> {to} not found")]
    ArcNotFound { from: String, to: String },

    #[error("arc {from} -> {to} already exists")]
    DuplicateArc { from: String, to: String },

    #[error("invalid capacity {0}: capacities must be finite and non-negative")]
    InvalidCapacity(f64),

    #[error("node {0} is listed more than once")]
    DuplicateNode(String),

    #[error("arc references undeclared node {0}")]
    UnknownNode(String),

    #[error("augmenting path has no finite arc")]
    UnboundedPath,

    #[error("max flow did not finish within {limit:?} ({augmentations} augmentations done)")]
    DeadlineExceeded {
        limit: Duration,
        augmentations: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;

impl FlowError {
    pub(crate) fn node_not_found<K: std::fmt::Debug>(key: &K) -> Self {
        FlowError::NodeNotFound(format!("{:?}", key))
    }

    pub(crate) fn arc_not_found<K: std::fmt::Debug>(from: &K, to: &K) -> Self {
        FlowError::ArcNotFound {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
        }
    }
}

/// Accepts finite, non-negative capacities.
pub(crate) fn check_capacity(capacity: f64) -> Result<f64> {
    if capacity.is_finite() && capacity >= 0.0 {
        Ok(capacity)
    } else {
        Err(FlowError::InvalidCapacity(capacity))
    }
}
