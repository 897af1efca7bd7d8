use crate::error::Result;
use crate::network::Capacity;
use crate::network::network::Network;
use crate::network::node::Node;
use log::trace;
use std::collections::BTreeMap;
use std::fmt;

/// Handle of a vertex in a [`ResidualGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a residual vertex stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vertex<K> {
    /// A node of the solved network.
    Real(K),
    /// Midpoint inserted to carry the arc `from -> to` of an antiparallel pair.
    Detour { from: VertexId, to: VertexId },
    SuperSource,
    SuperSink,
}

impl<K> Vertex<K> {
    pub fn key(&self) -> Option<&K> {
        match self {
            Vertex::Real(key) => Some(key),
            _ => None,
        }
    }
}

/// Working copy of a [`Network`] owned by a single max-flow solve.
///
/// Vertices live in an arena indexed by [`VertexId`]; synthetic vertices are just fresh
/// handles, so they can never collide with a real key. Nothing here borrows from the
/// network it was built from.
#[derive(Debug, Clone)]
pub struct ResidualGraph<K> {
    vertices: Vec<Vertex<K>>,
    adjacency: Vec<Node<VertexId>>,
    lookup: BTreeMap<K, VertexId>,
    arc_count: usize,
}

impl<K: Ord + Clone + fmt::Debug> ResidualGraph<K> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            adjacency: Vec::new(),
            lookup: BTreeMap::new(),
            arc_count: 0,
        }
    }

    /// Copies every node and arc of `network`. Self-loops carry no flow and are left out.
    pub fn from_network(network: &Network<K>) -> Self {
        let mut residual = Self::new();
        for key in network.nodes() {
            residual.add_vertex(Vertex::Real(key.clone()));
        }
        for arc in network.arcs() {
            if arc.from() == arc.to() {
                trace!("ignoring self-loop on {:?}", arc.from());
                continue;
            }
            if let (Some(from), Some(to)) = (residual.real(arc.from()), residual.real(arc.to())) {
                residual.set_arc(from, to, arc.capacity());
            }
        }
        residual
    }

    pub fn add_vertex(&mut self, vertex: Vertex<K>) -> VertexId {
        let id = VertexId(self.vertices.len());
        if let Vertex::Real(key) = &vertex {
            self.lookup.insert(key.clone(), id);
        }
        self.vertices.push(vertex);
        self.adjacency.push(Node::new(id));
        id
    }

    /// Handle of the real vertex for `key`.
    pub fn real(&self, key: &K) -> Option<VertexId> {
        self.lookup.get(key).copied()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex<K> {
        &self.vertices[id.index()]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    pub fn ids(&self) -> impl Iterator<Item = VertexId> + use<K> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn indegree(&self, id: VertexId) -> usize {
        self.adjacency[id.index()].indegree()
    }

    pub fn has_arc(&self, from: VertexId, to: VertexId) -> bool {
        self.adjacency[from.index()].has_arc(&to)
    }

    /// Current residual capacity of `from -> to`.
    pub fn capacity(&self, from: VertexId, to: VertexId) -> Result<Capacity> {
        self.adjacency[from.index()].arc_capacity(&to)
    }

    /// Outgoing residual arcs of `from`, in handle order.
    pub fn arcs_from(&self, from: VertexId) -> impl Iterator<Item = (VertexId, Capacity)> + '_ {
        self.adjacency[from.index()].arcs().map(|(to, c)| (*to, c))
    }

    /// Inserts or overwrites `from -> to`; returns `true` for a new pair.
    pub fn set_arc(&mut self, from: VertexId, to: VertexId, capacity: Capacity) -> bool {
        let is_new = self.adjacency[from.index()].add_arc(to, capacity);
        if is_new {
            self.adjacency[to.index()].change_indegree(1);
            self.arc_count += 1;
        }
        is_new
    }

    pub fn remove_arc(&mut self, from: VertexId, to: VertexId) -> bool {
        let removed = self.adjacency[from.index()].remove_arc(&to);
        if removed {
            self.adjacency[to.index()].change_indegree(-1);
            self.arc_count -= 1;
        }
        removed
    }

    /// Adds `delta` to the residual capacity of an existing arc.
    pub fn change_capacity(
        &mut self,
        from: VertexId,
        to: VertexId,
        delta: Capacity,
    ) -> Result<Capacity> {
        self.adjacency[from.index()].change_capacity(&to, delta)
    }
}

impl<K: Ord + Clone + fmt::Debug> Default for ResidualGraph<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use approx::assert_relative_eq;

    #[test]
    fn test_copy_is_independent() {
        let mut network = Network::new();
        network.add_arc("a", "b", 4.0).unwrap();
        network.add_arc("b", "c", 2.0).unwrap();

        let mut residual = ResidualGraph::from_network(&network);
        let a = residual.real(&"a").unwrap();
        let b = residual.real(&"b").unwrap();
        residual.change_capacity(a, b, -4.0).unwrap();

        assert_relative_eq!(0.0, residual.capacity(a, b).unwrap());
        assert_relative_eq!(4.0, network.arc_capacity(&"a", &"b").unwrap());
        assert_eq!(3, residual.len());
        assert_eq!(2, residual.arc_count());
    }

    #[test]
    fn test_self_loops_are_not_copied() {
        let mut network = Network::new();
        network.add_arc("a", "a", 4.0).unwrap();
        network.add_arc("a", "b", 1.0).unwrap();

        let residual = ResidualGraph::from_network(&network);
        let a = residual.real(&"a").unwrap();
        assert!(!residual.has_arc(a, a));
        assert_eq!(0, residual.indegree(a));
        assert_eq!(1, residual.arc_count());
    }

    #[test]
    fn test_synthetic_vertices_have_no_key() {
        let mut residual = ResidualGraph::<String>::new();
        let real = residual.add_vertex(Vertex::Real("x".to_string()));
        let source = residual.add_vertex(Vertex::SuperSource);
        assert_eq!(Some(&"x".to_string()), residual.vertex(real).key());
        assert_eq!(None, residual.vertex(source).key());
        assert_eq!(Some(real), residual.real(&"x".to_string()));
    }

    #[test]
    fn test_arc_bookkeeping() {
        let mut residual = ResidualGraph::<&str>::new();
        let a = residual.add_vertex(Vertex::Real("a"));
        let b = residual.add_vertex(Vertex::Real("b"));
        assert!(residual.set_arc(a, b, 3.0));
        assert!(!residual.set_arc(a, b, 5.0));
        assert_eq!(1, residual.indegree(b));
        assert!(residual.remove_arc(a, b));
        assert_eq!(0, residual.indegree(b));
        assert!(matches!(
            residual.capacity(a, b),
            Err(FlowError::ArcNotFound { .. })
        ));
    }
}
