#![cfg_attr(not(test), deny(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::todo, clippy::unimplemented))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod middleware;
pub mod protocol;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod ws;

// Re-exports for public API
pub use ai::{BotAction, BotConfig, BotEngine};
pub use config::Pacing;
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::RoomStore;
pub use middleware::cors::cors_middleware;
pub use protocol::{snapshot_for, summarize, RoomSnapshot, RoomSummary};
pub use state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
