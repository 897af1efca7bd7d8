use crate::error::{FlowError, Result};
use crate::network::Capacity;
use std::collections::BTreeMap;
use std::fmt;

/// A node and its outgoing arcs. The adjacency relationship `(a, b)` reads "a flows into b".
///
/// The indegree counter lives here but is owned by whoever holds the node: every method that
/// changes it is crate-private and only called from arc-mutation entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<K> {
    key: K,
    outgoing: BTreeMap<K, Capacity>,
    indegree: usize,
}

impl<K: Ord + Clone + fmt::Debug> Node<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            outgoing: BTreeMap::new(),
            indegree: 0,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn indegree(&self) -> usize {
        self.indegree
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    pub fn has_arc(&self, neighbor: &K) -> bool {
        self.outgoing.contains_key(neighbor)
    }

    /// No arc from another node points here.
    pub fn is_source(&self) -> bool {
        self.indegree == usize::from(self.has_arc(&self.key))
    }

    /// No arc leads to another node.
    pub fn is_sink(&self) -> bool {
        self.outgoing.len() == usize::from(self.has_arc(&self.key))
    }

    pub fn neighbors(&self) -> impl Iterator<Item = &K> {
        self.outgoing.keys()
    }

    pub fn arcs(&self) -> impl Iterator<Item = (&K, Capacity)> {
        self.outgoing.iter().map(|(k, c)| (k, *c))
    }

    pub fn arc_capacity(&self, neighbor: &K) -> Result<Capacity> {
        self.outgoing
            .get(neighbor)
            .copied()
            .ok_or_else(|| FlowError::arc_not_found(&self.key, neighbor))
    }

    /// Inserts or overwrites the arc. Returns `true` when `neighbor` was not adjacent before.
    pub(crate) fn add_arc(&mut self, neighbor: K, capacity: Capacity) -> bool {
        self.outgoing.insert(neighbor, capacity).is_none()
    }

    pub(crate) fn remove_arc(&mut self, neighbor: &K) -> bool {
        self.outgoing.remove(neighbor).is_some()
    }

    /// Adds `delta` to an existing arc and returns the new capacity.
    pub(crate) fn change_capacity(&mut self, neighbor: &K, delta: Capacity) -> Result<Capacity> {
        match self.outgoing.get_mut(neighbor) {
            Some(capacity) => {
                *capacity += delta;
                Ok(*capacity)
            }
            None => Err(FlowError::arc_not_found(&self.key, neighbor)),
        }
    }

    pub(crate) fn change_indegree(&mut self, delta: isize) {
        debug_assert!(
            delta >= 0 || self.indegree >= delta.unsigned_abs(),
            "indegree of {:?} driven below zero",
            self.key
        );
        self.indegree = self.indegree.saturating_add_signed(delta);
    }
}

impl<K: fmt::Display> fmt::Display for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node: {} | In Degree: {}", self.key, self.indegree)?;
        if !self.outgoing.is_empty() {
            let arcs = self
                .outgoing
                .iter()
                .map(|(to, capacity)| format!("{} -({})-> {}", self.key, capacity, to))
                .collect::<Vec<String>>();
            write!(f, "\nAdjacency List: {}", arcs.join(", "))?;
        }
        Ok(())
    }
}
