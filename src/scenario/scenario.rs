use crate::error::Result;
use crate::network::network::Network;

/// A canned way of producing a network to solve or display.
pub trait Scenario {
    fn name(&self) -> &str;
    fn build(&self) -> Result<Network<String>>;
}
