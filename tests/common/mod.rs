pub mod agents;
pub mod clients;
pub mod fixtures;

pub use agents::*;
pub use clients::*;
pub use fixtures::*;
