//! Simulation - drives an agent through a changing environment

pub mod driver;
pub mod scenario;

pub use driver::{CycleTrace, SimulationDriver};
pub use scenario::{attach_http_capabilities, prime_agent, seed_environment};
