//! Rewrites a freshly built [`ResidualGraph`] into the shape the augmenting loop expects.
//!
//! The residual graph keeps a single capacity per ordered pair and stores the reverse
//! residual of `u -> v` on `v -> u`. A network that already has both `a -> b` and `b -> a`
//! would share that slot between a real arc and a residual one, so one arc of every such
//! pair is routed through a detour vertex first. Afterwards every source and sink is hooked
//! to a single super-source and super-sink.

use crate::flow::residual::{ResidualGraph, Vertex, VertexId};
use crate::network::Capacity;
use crate::network::network::Network;
use log::{debug, trace};
use std::collections::BTreeSet;
use std::fmt;

/// Capacity of the arcs leaving the super-source and entering the super-sink.
pub const UNBOUNDED: Capacity = Capacity::INFINITY;

/// Synthetic endpoints the augmenting loop runs between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminals {
    pub source: VertexId,
    pub sink: VertexId,
}

/// Builds the working copy of `network` with antiparallel arcs split and terminals attached.
pub fn normalize<K: Ord + Clone + fmt::Debug>(
    network: &Network<K>,
) -> (ResidualGraph<K>, Terminals) {
    let mut residual = ResidualGraph::from_network(network);
    split_antiparallel(&mut residual);
    let terminals = attach_terminals(&mut residual, &network.sources(), &network.sinks());
    (residual, terminals)
}

/// For every pair with arcs in both directions, moves the arc leaving the later vertex onto
/// a fresh detour vertex carrying the same capacity. Returns the number of detours added.
///
/// Must run before any residual arc exists. Indegree-zero and no-outgoing status of the
/// real vertices is unchanged: the rerouted tail keeps one outgoing arc and the head
/// keeps one incoming arc.
pub fn split_antiparallel<K: Ord + Clone + fmt::Debug>(residual: &mut ResidualGraph<K>) -> usize {
    let pairs = residual
        .ids()
        .flat_map(|a| {
            residual
                .arcs_from(a)
                .filter(move |(b, _)| a < *b)
                .map(move |(b, _)| (a, b))
                .collect::<Vec<_>>()
        })
        .filter(|(a, b)| residual.has_arc(*b, *a))
        .collect::<Vec<(VertexId, VertexId)>>();

    for (a, b) in pairs.iter().copied() {
        let Ok(capacity) = residual.capacity(b, a) else {
            continue;
        };
        let mid = residual.add_vertex(Vertex::Detour { from: b, to: a });
        residual.remove_arc(b, a);
        residual.set_arc(b, mid, capacity);
        residual.set_arc(mid, a, capacity);
        debug!(
            "rerouted antiparallel arc {:?} -> {:?} through {:?}",
            residual.vertex(b),
            residual.vertex(a),
            mid
        );
    }
    pairs.len()
}

/// Adds the super-source and super-sink and connects them with [`UNBOUNDED`] arcs.
///
/// `sources` and `sinks` come from the input network. Isolated nodes appear in both
/// sets and are left unconnected, so every super-source to super-sink path crosses at least
/// one finite arc.
pub fn attach_terminals<K: Ord + Clone + fmt::Debug>(
    residual: &mut ResidualGraph<K>,
    sources: &BTreeSet<K>,
    sinks: &BTreeSet<K>,
) -> Terminals {
    let source = residual.add_vertex(Vertex::SuperSource);
    let sink = residual.add_vertex(Vertex::SuperSink);

    for key in sources {
        if sinks.contains(key) {
            trace!("skipping isolated node {:?}", key);
            continue;
        }
        if let Some(id) = residual.real(key) {
            residual.set_arc(source, id, UNBOUNDED);
        }
    }

    for key in sinks.difference(sources) {
        if let Some(id) = residual.real(key) {
            residual.set_arc(id, sink, UNBOUNDED);
        }
    }

    Terminals { source, sink }
}
