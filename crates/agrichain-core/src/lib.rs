pub mod agents;
pub mod config;
pub mod events;
pub mod reducer;
pub mod state;

pub use agents::*;
pub use config::*;
pub use events::*;
pub use reducer::*;
pub use state::*;
