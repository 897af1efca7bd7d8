pub mod arc;
pub mod network;
pub mod node;

/// Arc capacities and flow values.
pub type Capacity = f64;
