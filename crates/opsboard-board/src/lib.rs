/*
[INPUT]:  Board core, state, persistence, configuration and TUI modules
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod board;
pub mod config;
pub mod logging;
pub mod notify;
pub mod persistence;
pub mod store;
pub mod tui;

// Re-export main types for convenience
pub use board::{BoardHost, BoardView, DragCoordinator, DragState};
pub use config::BoardConfig;
pub use persistence::{GatewayEvent, StatusDispatcher};
pub use store::{AckOutcome, StatusAck, StatusCommit, TaskStore};
