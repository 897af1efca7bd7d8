pub mod snapshot;

pub use snapshot::{NetworkSnapshot, load_json, save_json};
