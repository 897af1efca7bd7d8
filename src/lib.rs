//! Maximum flow over directed capacitated networks.
//!
//! A [`Network`] is edited through boolean / `Result` returning operations and solved with
//! [`Network::max_flow`] or, for the augmentation count and the minimum cut, with
//! [`MaxFlow`]. Solving never modifies the network.

pub mod analysis;
pub mod error;
pub mod flow;
pub mod network;
pub mod persist;
pub mod scenario;

pub use analysis::cut::MinCut;
pub use error::{FlowError, Result};
pub use flow::driver::{FlowOutcome, MaxFlow};
pub use network::Capacity;
pub use network::arc::Arc;
pub use network::network::Network;
pub use network::node::Node;
