pub mod actions;
pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use types::SimTime;
