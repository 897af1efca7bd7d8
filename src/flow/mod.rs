pub mod driver;
pub mod normalize;
pub mod residual;
pub mod search;
