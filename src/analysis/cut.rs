use crate::flow::residual::{ResidualGraph, VertexId};
use crate::flow::search::reachable;
use crate::network::Capacity;
use crate::network::arc::Arc;
use crate::network::network::Network;
use std::collections::BTreeSet;
use std::fmt;

/// Minimum cut read off the final residual graph of a max-flow solve.
#[derive(Debug, Clone, PartialEq)]
pub struct MinCut<K> {
    source_side: BTreeSet<K>,
    arcs: Vec<Arc<K>>,
}

impl<K: Ord + Clone + fmt::Debug> MinCut<K> {
    /// `residual` must admit no augmenting path from `source` any more.
    pub(crate) fn from_residual(
        network: &Network<K>,
        residual: &ResidualGraph<K>,
        source: VertexId,
    ) -> Self {
        let reached = reachable(residual, source);
        let source_side = residual
            .ids()
            .filter(|id| reached[id.index()])
            .filter_map(|id| residual.vertex(id).key().cloned())
            .collect::<BTreeSet<K>>();

        let arcs = network
            .arcs()
            .into_iter()
            .filter(|arc| source_side.contains(arc.from()) && !source_side.contains(arc.to()))
            .collect();

        Self { source_side, arcs }
    }

    /// Network nodes still reachable from the sources after the last augmentation.
    pub fn source_side(&self) -> &BTreeSet<K> {
        &self.source_side
    }

    /// Arcs leaving the source side, with their original capacities.
    pub fn arcs(&self) -> &[Arc<K>] {
        &self.arcs
    }

    pub fn contains(&self, from: &K, to: &K) -> bool {
        self.arcs
            .iter()
            .any(|arc| arc.from() == from && arc.to() == to)
    }

    pub fn capacity(&self) -> Capacity {
        self.arcs.iter().map(|arc| arc.capacity()).sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::network::network::Network;
    use approx::assert_relative_eq;

    #[test]
    fn test_cut_of_bottleneck_chain() {
        let mut network = Network::new();
        network.add_arc("s", "a", 10.0).unwrap();
        network.add_arc("a", "b", 2.0).unwrap();
        network.add_arc("b", "t", 10.0).unwrap();

        let outcome = crate::flow::driver::MaxFlow::new(&network).solve().unwrap();
        let cut = outcome.min_cut();
        assert!(cut.contains(&"a", &"b"));
        assert_eq!(1, cut.arcs().len());
        assert_relative_eq!(2.0, cut.capacity());
        assert_eq!(
            vec![&"a", &"s"],
            cut.source_side().iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_cut_through_rerouted_arc() {
        let mut network = Network::new();
        network.add_arc("s", "a", 10.0).unwrap();
        network.add_arc("a", "b", 1.0).unwrap();
        network.add_arc("b", "a", 4.0).unwrap();
        network.add_arc("s", "b", 10.0).unwrap();
        network.add_arc("a", "t", 3.0).unwrap();
        network.add_arc("b", "t", 1.0).unwrap();

        let outcome = crate::flow::driver::MaxFlow::new(&network).solve().unwrap();
        assert_relative_eq!(4.0, outcome.value());
        assert_relative_eq!(outcome.value(), outcome.min_cut().capacity());
    }

    #[test]
    fn test_empty_network_has_empty_cut() {
        let network = Network::<String>::new();
        let outcome = crate::flow::driver::MaxFlow::new(&network).solve().unwrap();
        assert!(outcome.min_cut().arcs().is_empty());
        assert!(outcome.min_cut().source_side().is_empty());
        assert_relative_eq!(0.0, outcome.min_cut().capacity());
    }
}
