use crate::flow::residual::{ResidualGraph, VertexId};
use std::collections::VecDeque;
use std::fmt;

/// Predecessor map of a breadth-first search that reached its target.
#[derive(Debug, Clone, PartialEq)]
pub struct Predecessors {
    parents: Vec<Option<VertexId>>,
    source: VertexId,
    sink: VertexId,
}

impl Predecessors {
    pub fn parent(&self, id: VertexId) -> Option<VertexId> {
        if id == self.source {
            return None;
        }
        self.parents.get(id.index()).copied().flatten()
    }

    pub fn is_visited(&self, id: VertexId) -> bool {
        self.parents.get(id.index()).is_some_and(|p| p.is_some())
    }

    /// Arcs of the path, listed from the sink back to the source.
    pub fn path(&self) -> Vec<(VertexId, VertexId)> {
        let mut arcs = Vec::new();
        let mut v = self.sink;
        while let Some(u) = self.parent(v) {
            arcs.push((u, v));
            v = u;
        }
        arcs
    }
}

/// Shortest augmenting path from `source` to `sink` over arcs with positive residual
/// capacity, or `None` when the sink is unreachable.
pub fn augmenting_path<K: Ord + Clone + fmt::Debug>(
    residual: &ResidualGraph<K>,
    source: VertexId,
    sink: VertexId,
) -> Option<Predecessors> {
    let parents = explore(residual, source, Some(sink));
    if parents[sink.index()].is_none() {
        return None;
    }
    Some(Predecessors {
        parents,
        source,
        sink,
    })
}

/// Vertices reachable from `source` through positive residual capacity, indexed by handle.
pub fn reachable<K: Ord + Clone + fmt::Debug>(
    residual: &ResidualGraph<K>,
    source: VertexId,
) -> Vec<bool> {
    explore(residual, source, None)
        .into_iter()
        .map(|p| p.is_some())
        .collect()
}

// The source is its own parent so that "visited" is just `is_some`.
fn explore<K: Ord + Clone + fmt::Debug>(
    residual: &ResidualGraph<K>,
    source: VertexId,
    target: Option<VertexId>,
) -> Vec<Option<VertexId>> {
    let mut parents = vec![None; residual.len()];
    parents[source.index()] = Some(source);
    let mut queue = VecDeque::from([source]);

    while let Some(u) = queue.pop_front() {
        for (v, capacity) in residual.arcs_from(u) {
            if parents[v.index()].is_some() || capacity <= 0.0 {
                continue;
            }
            parents[v.index()] = Some(u);
            if Some(v) == target {
                return parents;
            }
            queue.push_back(v);
        }
    }
    parents
}
