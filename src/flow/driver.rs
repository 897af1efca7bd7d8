//! Edmonds-Karp style maximum flow.
//!
//! The driver alternates between searching for a shortest augmenting path and pushing the
//! path's bottleneck through it until the super-sink becomes unreachable. Every solve works
//! on its own [`ResidualGraph`]; the network it was given is only read.

use crate::analysis::cut::MinCut;
use crate::error::{FlowError, Result};
use crate::flow::normalize::normalize;
use crate::flow::residual::{ResidualGraph, VertexId};
use crate::flow::search::{Predecessors, augmenting_path};
use crate::network::Capacity;
use crate::network::network::Network;
use log::{debug, info, warn};
use std::fmt;
use std::time::{Duration, Instant};

enum Phase {
    Searching,
    Augmenting(Predecessors),
    Done,
}

/// Result of a completed solve.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowOutcome<K> {
    value: Capacity,
    augmentations: usize,
    min_cut: MinCut<K>,
}

impl<K> FlowOutcome<K> {
    /// Maximum flow value.
    pub fn value(&self) -> Capacity {
        self.value
    }

    /// Number of augmenting paths used.
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn min_cut(&self) -> &MinCut<K> {
        &self.min_cut
    }
}

/// Maximum-flow solver over a borrowed [`Network`].
pub struct MaxFlow<'a, K> {
    network: &'a Network<K>,
    deadline: Option<Duration>,
}

impl<'a, K: Ord + Clone + fmt::Debug> MaxFlow<'a, K> {
    pub fn new(network: &'a Network<K>) -> Self {
        Self {
            network,
            deadline: None,
        }
    }

    /// Gives up with [`FlowError::DeadlineExceeded`] once `limit` has elapsed. Checked before
    /// every path search.
    pub fn with_deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(limit);
        self
    }

    pub fn solve(&self) -> Result<FlowOutcome<K>> {
        let started = Instant::now();
        let (mut residual, terminals) = normalize(self.network);

        let mut total: Capacity = 0.0;
        let mut augmentations = 0;
        let mut phase = Phase::Searching;

        loop {
            phase = match phase {
                Phase::Searching => {
                    if let Some(limit) = self.deadline {
                        if started.elapsed() >= limit {
                            warn!(
                                "max flow gave up after {:?} with {} augmentations",
                                limit, augmentations
                            );
                            return Err(FlowError::DeadlineExceeded {
                                limit,
                                augmentations,
                            });
                        }
                    }
                    match augmenting_path(&residual, terminals.source, terminals.sink) {
                        Some(predecessors) => Phase::Augmenting(predecessors),
                        None => Phase::Done,
                    }
                }
                Phase::Augmenting(predecessors) => {
                    let path = predecessors.path();
                    let amount = bottleneck(&residual, &path)?;
                    augment(&mut residual, &path, amount)?;
                    total += amount;
                    augmentations += 1;
                    debug!(
                        "augmentation {}: {} arcs, bottleneck {}, total {}",
                        augmentations,
                        path.len(),
                        amount,
                        total
                    );
                    Phase::Searching
                }
                Phase::Done => break,
            };
        }

        info!(
            "max flow {} over {} nodes and {} arcs ({} augmentations)",
            total,
            self.network.order(),
            self.network.size(),
            augmentations
        );

        Ok(FlowOutcome {
            value: total,
            augmentations,
            min_cut: MinCut::from_residual(self.network, &residual, terminals.source),
        })
    }
}

fn bottleneck<K: Ord + Clone + fmt::Debug>(
    residual: &ResidualGraph<K>,
    path: &[(VertexId, VertexId)],
) -> Result<Capacity> {
    let amount = path.iter().try_fold(Capacity::INFINITY, |min, (u, v)| {
        residual.capacity(*u, *v).map(|c| min.min(c))
    })?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(FlowError::UnboundedPath)
    }
}

// Pushes `amount` along `path`: forward arcs lose it, their reverse arcs gain it.
fn augment<K: Ord + Clone + fmt::Debug>(
    residual: &mut ResidualGraph<K>,
    path: &[(VertexId, VertexId)],
    amount: Capacity,
) -> Result<()> {
    for &(u, v) in path {
        residual.change_capacity(u, v, -amount)?;
        if residual.has_arc(v, u) {
            residual.change_capacity(v, u, amount)?;
        } else {
            residual.set_arc(v, u, amount);
        }
    }
    Ok(())
}
