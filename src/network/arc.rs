use crate::network::Capacity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed arc as reported by [`Network::arcs`](crate::network::network::Network::arcs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc<K> {
    from: K,
    to: K,
    /// capacity >= 0.0
    capacity: Capacity,
}

impl<K> Arc<K> {
    pub fn new(from: K, to: K, capacity: Capacity) -> Self {
        Self { from, to, capacity }
    }

    pub fn from(&self) -> &K {
        &self.from
    }

    pub fn to(&self) -> &K {
        &self.to
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn into_parts(self) -> (K, K, Capacity) {
        (self.from, self.to, self.capacity)
    }
}

impl<K: fmt::Display> fmt::Display for Arc<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -({})-> {}", self.from, self.capacity, self.to)
    }
}
