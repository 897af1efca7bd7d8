use crate::error::Result;
use crate::network::network::Network;
use crate::scenario::scenario::Scenario;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random network with integer capacities.
///
/// `n000` is always a source and the last `sinks` nodes never get outgoing arcs. A spanning
/// tree rooted at `n000` keeps every node reachable; extra arcs are sprinkled on top and may
/// form cycles and antiparallel pairs.
pub struct RandomScenario {
    seed: u64,
    nodes: usize,
    sinks: usize,
    extra_arcs: usize,
    max_capacity: u32,
}

impl RandomScenario {
    pub fn new(seed: u64, nodes: usize) -> Self {
        let nodes = nodes.max(2);
        Self {
            seed,
            nodes,
            sinks: (nodes / 8).max(1),
            extra_arcs: nodes * 2,
            max_capacity: 20,
        }
    }

    pub fn with_extra_arcs(mut self, extra_arcs: usize) -> Self {
        self.extra_arcs = extra_arcs;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u32) -> Self {
        self.max_capacity = max_capacity.max(1);
        self
    }

    pub fn node_name(index: usize) -> String {
        format!("n{:03}", index)
    }
}

impl Scenario for RandomScenario {
    fn name(&self) -> &str {
        "random"
    }

    fn build(&self) -> Result<Network<String>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let names = (0..self.nodes).map(Self::node_name).collect::<Vec<String>>();
        let inner = self.nodes - self.sinks;

        let mut network = Network::new();
        for name in &names {
            network.add_node(name.clone());
        }

        for to in 1..self.nodes {
            let from = rng.gen_range(0..to.min(inner));
            let capacity = rng.gen_range(1..=self.max_capacity) as f64;
            network.add_arc(names[from].clone(), names[to].clone(), capacity)?;
        }

        for _ in 0..self.extra_arcs {
            let from = rng.gen_range(0..inner);
            let to = rng.gen_range(1..self.nodes);
            if from == to || network.contains_arc(&names[from], &names[to]) {
                continue;
            }
            let capacity = rng.gen_range(1..=self.max_capacity) as f64;
            network.add_arc(names[from].clone(), names[to].clone(), capacity)?;
        }

        Ok(network)
    }
}
