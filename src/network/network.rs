use crate::error::{FlowError, Result, check_capacity};
use crate::flow::driver::MaxFlow;
use crate::network::Capacity;
use crate::network::arc::Arc;
use crate::network::node::Node;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A directed capacitated network keyed by `K`.
///
/// `node_count` and `arc_count` mirror the structure: `node_count == nodes.len()` and
/// `arc_count` is the total number of outgoing entries over all nodes. Every arc edit goes
/// through this type so that indegrees stay equal to the number of nodes pointing at them.
#[derive(Debug, Clone, PartialEq)]
pub struct Network<K> {
    nodes: BTreeMap<K, Node<K>>,
    node_count: usize,
    arc_count: usize,
}

impl<K> Default for Network<K> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            node_count: 0,
            arc_count: 0,
        }
    }
}

impl<K: Ord + Clone + fmt::Debug> Network<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    pub fn node(&self, key: &K) -> Option<&Node<K>> {
        self.nodes.get(key)
    }

    pub fn contains_node(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn contains_arc(&self, from: &K, to: &K) -> bool {
        self.nodes.get(from).is_some_and(|n| n.has_arc(to))
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.node_count
    }

    /// Number of arcs.
    pub fn size(&self) -> usize {
        self.arc_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// All arcs ordered by `(from, to)`.
    pub fn arcs(&self) -> Vec<Arc<K>> {
        self.nodes
            .values()
            .flat_map(|n| {
                n.arcs()
                    .map(move |(to, capacity)| Arc::new(n.key().clone(), to.clone(), capacity))
            })
            .collect()
    }

    pub fn arc_capacity(&self, from: &K, to: &K) -> Result<Capacity> {
        self.nodes
            .get(from)
            .ok_or_else(|| FlowError::node_not_found(from))?
            .arc_capacity(to)
    }

    pub fn indegree(&self, key: &K) -> Result<usize> {
        self.nodes
            .get(key)
            .map(|n| n.indegree())
            .ok_or_else(|| FlowError::node_not_found(key))
    }

    /// Nodes nothing else flows into. A self-loop does not count.
    pub fn sources(&self) -> BTreeSet<K> {
        self.nodes
            .values()
            .filter(|n| n.is_source())
            .map(|n| n.key().clone())
            .collect()
    }

    /// Nodes without outgoing arcs to other nodes. A self-loop does not count.
    pub fn sinks(&self) -> BTreeSet<K> {
        self.nodes
            .values()
            .filter(|n| n.is_sink())
            .map(|n| n.key().clone())
            .collect()
    }

    /// Returns `false` if the node already exists.
    pub fn add_node(&mut self, key: K) -> bool {
        if self.nodes.contains_key(&key) {
            return false;
        }
        self.nodes.insert(key.clone(), Node::new(key));
        self.node_count += 1;
        true
    }

    /// Removes the node together with every arc into or out of it.
    pub fn remove_node(&mut self, key: &K) -> bool {
        let Some(node) = self.nodes.remove(key) else {
            return false;
        };

        for other in self.nodes.values_mut() {
            if other.remove_arc(key) {
                self.arc_count -= 1;
            }
        }

        // a self-loop only shows up here, the node is already out of the map
        for neighbor in node.neighbors() {
            if let Some(target) = self.nodes.get_mut(neighbor) {
                target.change_indegree(-1);
            }
            self.arc_count -= 1;
        }

        self.node_count -= 1;
        true
    }

    /// Adds the arc `from -> to`, creating missing endpoints.
    ///
    /// Returns `Ok(true)` for a new ordered pair. If the pair already exists its capacity is
    /// overwritten and `Ok(false)` is returned; use [`insert_arc`](Self::insert_arc) or
    /// [`set_capacity`](Self::set_capacity) to make that distinction explicit.
    pub fn add_arc(&mut self, from: K, to: K, capacity: Capacity) -> Result<bool> {
        let capacity = check_capacity(capacity)?;
        self.ensure_node(&to);
        let is_new = self.ensure_node(&from).add_arc(to.clone(), capacity);
        if is_new {
            self.arc_count += 1;
            if let Some(target) = self.nodes.get_mut(&to) {
                target.change_indegree(1);
            }
        }
        Ok(is_new)
    }

    /// Adds a new arc, refusing to touch an existing one.
    pub fn insert_arc(&mut self, from: K, to: K, capacity: Capacity) -> Result<()> {
        check_capacity(capacity)?;
        if self.contains_arc(&from, &to) {
            return Err(FlowError::DuplicateArc {
                from: format!("{:?}", from),
                to: format!("{:?}", to),
            });
        }
        self.add_arc(from, to, capacity).map(|_| ())
    }

    /// Replaces the capacity of an existing arc and returns the previous one.
    pub fn set_capacity(&mut self, from: &K, to: &K, capacity: Capacity) -> Result<Capacity> {
        let capacity = check_capacity(capacity)?;
        let node = self
            .nodes
            .get_mut(from)
            .ok_or_else(|| FlowError::node_not_found(from))?;
        let previous = node.arc_capacity(to)?;
        node.add_arc(to.clone(), capacity);
        Ok(previous)
    }

    pub fn remove_arc(&mut self, from: &K, to: &K) -> bool {
        let removed = self.nodes.get_mut(from).is_some_and(|n| n.remove_arc(to));
        if removed {
            self.arc_count -= 1;
            if let Some(target) = self.nodes.get_mut(to) {
                target.change_indegree(-1);
            }
        }
        removed
    }

    /// Removes every listed node that exists and returns how many were removed.
    pub fn remove_nodes<'a, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter().filter(|k| self.remove_node(k)).count()
    }

    /// Removes every listed arc that exists and returns how many were removed.
    pub fn remove_arcs<'a, I>(&mut self, arcs: I) -> usize
    where
        I: IntoIterator<Item = (&'a K, &'a K)>,
        K: 'a,
    {
        arcs.into_iter()
            .filter(|(from, to)| self.remove_arc(from, to))
            .count()
    }

    /// Value of a maximum flow from all sources to all sinks.
    ///
    /// Solves on a private working copy; `self` is left exactly as it was.
    pub fn max_flow(&self) -> Result<Capacity> {
        MaxFlow::new(self).solve().map(|outcome| outcome.value())
    }

    fn ensure_node(&mut self, key: &K) -> &mut Node<K> {
        if !self.nodes.contains_key(key) {
            self.node_count += 1;
        }
        self.nodes
            .entry(key.clone())
            .or_insert_with(|| Node::new(key.clone()))
    }
}

impl<K: fmt::Display> fmt::Display for Network<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Network: {} nodes, {} arcs", self.node_count, self.arc_count)?;
        for node in self.nodes.values() {
            write!(f, "\n{}", node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn diamond() -> Network<&'static str> {
        let mut network = Network::new();
        network.add_arc("s", "a", 3.0).unwrap();
        network.add_arc("s", "b", 2.0).unwrap();
        network.add_arc("a", "t", 2.0).unwrap();
        network.add_arc("b", "t", 3.0).unwrap();
        network.add_arc("a", "b", 1.0).unwrap();
        network
    }

    fn assert_consistent(network: &Network<&'static str>) {
        assert_eq!(network.order(), network.nodes().count());
        assert_eq!(network.size(), network.arcs().len());
        for key in network.nodes() {
            let pointing = network
                .arcs()
                .iter()
                .filter(|arc| arc.to() == key)
                .count();
            assert_eq!(pointing, network.indegree(key).unwrap(), "indegree of {}", key);
        }
    }

    #[test]
    fn test_add_node_twice() {
        let mut network = Network::new();
        assert!(network.add_node("a"));
        assert!(!network.add_node("a"));
        assert_eq!(1, network.order());
    }

    #[test]
    fn test_add_arc_creates_endpoints() {
        let mut network = Network::new();
        assert!(network.add_arc("a", "b", 4.0).unwrap());
        assert_eq!(2, network.order());
        assert_eq!(1, network.size());
        assert_eq!(1, network.indegree(&"b").unwrap());
        assert_consistent(&network);
    }

    #[test]
    fn test_add_arc_overwrites_existing_pair() {
        let mut network = Network::new();
        assert!(network.add_arc("a", "b", 4.0).unwrap());
        assert!(!network.add_arc("a", "b", 9.0).unwrap());
        assert_eq!(1, network.size());
        assert_eq!(1, network.indegree(&"b").unwrap());
        assert_relative_eq!(9.0, network.arc_capacity(&"a", &"b").unwrap());
    }

    #[test]
    fn test_invalid_capacity_leaves_network_untouched() {
        let mut network = Network::new();
        assert!(matches!(
            network.add_arc("a", "b", -1.0),
            Err(FlowError::InvalidCapacity(_))
        ));
        assert!(network.is_empty());
        assert_eq!(0, network.size());
    }

    #[test]
    fn test_insert_arc_is_strict() {
        let mut network = Network::new();
        network.insert_arc("a", "b", 4.0).unwrap();
        assert!(matches!(
            network.insert_arc("a", "b", 6.0),
            Err(FlowError::DuplicateArc { .. })
        ));
        assert_relative_eq!(4.0, network.arc_capacity(&"a", &"b").unwrap());
    }

    #[test]
    fn test_set_capacity() {
        let mut network = Network::new();
        network.add_arc("a", "b", 4.0).unwrap();
        assert_relative_eq!(4.0, network.set_capacity(&"a", &"b", 1.5).unwrap());
        assert_relative_eq!(1.5, network.arc_capacity(&"a", &"b").unwrap());
        assert!(matches!(
            network.set_capacity(&"b", &"a", 1.0),
            Err(FlowError::ArcNotFound { .. })
        ));
        assert!(matches!(
            network.set_capacity(&"x", &"a", 1.0),
            Err(FlowError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_remove_arc() {
        let mut network = diamond();
        assert!(network.remove_arc(&"a", &"b"));
        assert!(!network.remove_arc(&"a", &"b"));
        assert_eq!(4, network.size());
        assert_eq!(1, network.indegree(&"b").unwrap());
        assert_consistent(&network);
    }

    #[test]
    fn test_remove_node_drops_touching_arcs() {
        let mut network = diamond();
        let before = network.size();
        let touching = network
            .arcs()
            .iter()
            .filter(|arc| *arc.from() == "a" || *arc.to() == "a")
            .count();

        assert!(network.remove_node(&"a"));
        assert!(!network.remove_node(&"a"));

        assert!(!network.contains_node(&"a"));
        assert!(network.arcs().iter().all(|arc| *arc.to() != "a"));
        assert_eq!(before - touching, network.size());
        assert_eq!(3, network.order());
        assert_consistent(&network);
    }

    #[test]
    fn test_remove_node_with_self_loop() {
        let mut network = Network::new();
        network.add_arc("a", "a", 1.0).unwrap();
        network.add_arc("a", "b", 1.0).unwrap();
        network.add_arc("c", "a", 1.0).unwrap();
        assert_eq!(3, network.size());

        assert!(network.remove_node(&"a"));
        assert_eq!(0, network.size());
        assert_eq!(2, network.order());
        assert_consistent(&network);
    }

    #[test]
    fn test_batch_removal_counts_successes() {
        let mut network = diamond();
        assert_eq!(2, network.remove_arcs([(&"s", &"a"), (&"x", &"y"), (&"b", &"t")]));
        assert_eq!(1, network.remove_nodes([&"a", &"missing"]));
        assert_eq!(3, network.order());
        assert_consistent(&network);
    }

    #[test]
    fn test_sources_and_sinks() {
        let mut network = diamond();
        network.add_node("lonely");
        assert_eq!(BTreeSet::from(["lonely", "s"]), network.sources());
        assert_eq!(BTreeSet::from(["lonely", "t"]), network.sinks());
    }

    #[test]
    fn test_self_loops_keep_roles() {
        let mut network = diamond();
        network.add_arc("s", "s", 5.0).unwrap();
        network.add_arc("t", "t", 5.0).unwrap();
        network.add_arc("looped", "looped", 1.0).unwrap();
        assert_eq!(BTreeSet::from(["looped", "s"]), network.sources());
        assert_eq!(BTreeSet::from(["looped", "t"]), network.sinks());
        assert_eq!(1, network.indegree(&"s").unwrap());
        assert_consistent(&network);
    }

    #[test]
    fn test_arcs_are_ordered() {
        let network = diamond();
        let pairs = network
            .arcs()
            .into_iter()
            .map(|arc| (*arc.from(), *arc.to()))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![("a", "b"), ("a", "t"), ("b", "t"), ("s", "a"), ("s", "b")],
            pairs
        );
    }

    #[test]
    fn test_display() {
        let mut network = Network::new();
        network.add_arc("a", "b", 5.0).unwrap();
        assert_eq!(
            "Network: 2 nodes, 1 arcs\nNode: a | In Degree: 0\nAdjacency List: a -(5)-> b\nNode: b | In Degree: 1",
            network.to_string()
        );
    }
}
