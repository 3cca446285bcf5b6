// harness/mod.rs - Harness subsystem
//
// Orchestrates the queue components to reproduce the canonical scenarios,
// then holds the process open until externally interrupted.

mod driver;
mod scenario;

pub use driver::{DriverState, HarnessDriver};
pub use scenario::{HarnessConfig, Scenario};
