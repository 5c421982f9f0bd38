/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public dashboard adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod gateway;
pub mod http;
pub mod types;

pub use gateway::TaskGateway;
#[cfg(any(test, feature = "test-util"))]
pub use gateway::InMemoryGateway;

// Re-export commonly used types from http
pub use http::{ClientConfig, Credentials, OpsboardClient, OpsboardError, Result};

// Re-export all types
pub use types::*;
