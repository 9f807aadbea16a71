//! Auto-advance pacing and room lifetime knobs.
//!
//! Defaults match the reference client's animation timings; every value can
//! be overridden through the environment, and tests zero the delays.

use std::time::Duration;

use crate::domain::BotDifficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Think delay for an easy bot.
    pub think_easy: Duration,
    /// Think delay for a medium bot.
    pub think_medium: Duration,
    /// Think delay for a hard bot.
    pub think_hard: Duration,
    /// Think delay when auto-playing a disconnected human seat.
    pub think_disconnected: Duration,
    /// Minimum pause after a trick resolves, for the capture animation.
    pub post_trick: Duration,
    /// Pause on hand-over before dealing the next hand.
    pub hand_over: Duration,
    /// Room lifetime from creation; expired rooms are reaped on fetch.
    pub room_ttl: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            think_easy: Duration::from_millis(1600),
            think_medium: Duration::from_millis(1300),
            think_hard: Duration::from_millis(1050),
            think_disconnected: Duration::from_millis(900),
            post_trick: Duration::from_millis(2300),
            hand_over: Duration::from_millis(3600),
            room_ttl: Duration::from_secs(3600),
        }
    }
}

fn env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

impl Pacing {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            think_easy: env_millis("EUCHRE_THINK_EASY_MS", d.think_easy),
            think_medium: env_millis("EUCHRE_THINK_MEDIUM_MS", d.think_medium),
            think_hard: env_millis("EUCHRE_THINK_HARD_MS", d.think_hard),
            think_disconnected: env_millis("EUCHRE_THINK_DISCONNECTED_MS", d.think_disconnected),
            post_trick: env_millis("EUCHRE_POST_TRICK_PAUSE_MS", d.post_trick),
            hand_over: env_millis("EUCHRE_HAND_OVER_PAUSE_MS", d.hand_over),
            room_ttl: env_millis("EUCHRE_ROOM_TTL_MS", d.room_ttl),
        }
    }

    /// All-zero delays for tests that drive the scheduler synchronously.
    pub fn immediate() -> Self {
        Self {
            think_easy: Duration::ZERO,
            think_medium: Duration::ZERO,
            think_hard: Duration::ZERO,
            think_disconnected: Duration::ZERO,
            post_trick: Duration::ZERO,
            hand_over: Duration::ZERO,
            room_ttl: Duration::from_secs(3600),
        }
    }

    pub fn think_for(&self, difficulty: BotDifficulty) -> Duration {
        match difficulty {
            BotDifficulty::Easy => self.think_easy,
            BotDifficulty::Medium => self.think_medium,
            BotDifficulty::Hard => self.think_hard,
        }
    }
}
