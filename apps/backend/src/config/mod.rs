pub mod pacing;

pub use pacing::Pacing;
