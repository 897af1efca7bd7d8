use crate::error::Result;
use crate::network::network::Network;
use crate::scenario::scenario::Scenario;

/// A small service topology. Capacities are requests per second a link can carry.
///
/// `payments-service` calls back into `orders-service`, so the network holds one
/// antiparallel pair.
pub struct BasicScenario {
    arcs: Vec<(&'static str, &'static str, f64)>,
}

impl BasicScenario {
    pub fn new() -> Self {
        Self {
            arcs: vec![
                ("api-gateway", "auth-service", 80.0),
                ("api-gateway", "orders-service", 90.0),
                ("auth-service", "redis-cache", 60.0),
                ("orders-service", "payments-service", 70.0),
                ("payments-service", "orders-service", 20.0),
                ("orders-service", "postgres-primary", 100.0),
                ("postgres-primary", "postgres-replica", 50.0),
            ],
        }
    }
}

impl Default for BasicScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for BasicScenario {
    fn name(&self) -> &str {
        "basic"
    }

    fn build(&self) -> Result<Network<String>> {
        let mut network = Network::new();
        for (from, to, capacity) in &self.arcs {
            network.insert_arc(from.to_string(), to.to_string(), *capacity)?;
        }
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::driver::MaxFlow;
    use approx::assert_relative_eq;
    use std::collections::BTreeSet;

    #[test]
    fn test_basic_topology() {
        let network = BasicScenario::new().build().unwrap();
        assert_eq!(7, network.order());
        assert_eq!(7, network.size());
        assert_eq!(
            BTreeSet::from(["api-gateway".to_string()]),
            network.sources()
        );
        assert_eq!(
            BTreeSet::from(["postgres-replica".to_string(), "redis-cache".to_string()]),
            network.sinks()
        );
    }

    #[test]
    fn test_basic_max_flow() {
        let network = BasicScenario::new().build().unwrap();
        let outcome = MaxFlow::new(&network).solve().unwrap();
        assert_relative_eq!(110.0, outcome.value());
        assert!(
            outcome
                .min_cut()
                .contains(&"auth-service".to_string(), &"redis-cache".to_string())
        );
        assert!(
            outcome
                .min_cut()
                .contains(&"postgres-primary".to_string(), &"postgres-replica".to_string())
        );
    }
}
