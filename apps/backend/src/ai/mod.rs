//! Bot decision layer: determinized-sample alpha-beta search.

pub mod config;
pub mod determinize;
pub mod engine;
pub mod minimax;

pub use config::BotConfig;
pub use engine::{BotAction, BotEngine};
