//! Domain layer: pure euchre rules, state records, and the phase machine.

pub mod cards_logic;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod rules;
pub mod scoring;
pub mod state;
pub mod transitions;
pub mod tricks;

#[cfg(test)]
mod tests_fixtures;
#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_transitions;

// Re-exports for ergonomics
pub use cards_logic::{
    card_beats, effective_suit, hand_has_effective_suit, is_left_bower, is_right_bower,
    rank_strength, residual_value,
};
pub use cards_types::{Card, Rank, Suit, ALL_RANKS, ALL_SUITS};
pub use rules::{next_active_seat, next_seat, partner_of, team_of, Seat, PLAYERS, TARGET_SCORE};
pub use state::{
    BotDifficulty, CompletedTrick, GameState, HandSummary, Phase, Player, Room, RoomStatus, Score,
    TrickPlay,
};
pub use tricks::{lead_suit, legal_plays, trick_winner_index};
