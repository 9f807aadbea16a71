//! Auto-advance: pacing and execution of automated seats.
//!
//! The room actor owns the timer; this module decides, purely from room
//! state, whether anything automated is pending, how long to wait before
//! it, and how to perform exactly one action. Invoking `execute_step` when
//! nothing is pending does nothing, which makes scheduler passes idempotent
//! and safe to coalesce.

use std::time::Duration;

use rand::Rng;

use crate::ai::{BotConfig, BotEngine};
use crate::config::Pacing;
use crate::domain::state::{Phase, Room, RoomStatus};
use crate::domain::{legal_plays, transitions, Seat};
use crate::errors::domain::DomainError;

/// Safety cap on actions per scheduler pass.
pub const MAX_ITERATIONS: u8 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Automation {
    /// Deal the next hand after the hand-over pause.
    NextHand,
    /// A bot holds the turn.
    Bot(Seat),
    /// A disconnected human holds the turn; deterministic defaults apply.
    Fallback(Seat),
}

fn pending_automation(room: &Room) -> Option<Automation> {
    if room.status != RoomStatus::Playing {
        return None;
    }
    let game = room.game.as_ref()?;
    match game.phase {
        Phase::GameOver => None,
        Phase::HandOver => room.has_bot().then_some(Automation::NextHand),
        _ => {
            let player = room.player_at_seat(game.turn_seat)?;
            if player.is_bot {
                Some(Automation::Bot(game.turn_seat))
            } else if !player.connected {
                Some(Automation::Fallback(game.turn_seat))
            } else {
                None
            }
        }
    }
}

/// A trick just resolved and the table should linger on it before the next
/// card flies out.
fn post_trick_pause_applies(room: &Room) -> bool {
    room.game.as_ref().is_some_and(|game| {
        game.phase == Phase::Playing
            && game.current_trick.is_empty()
            && !game.completed_tricks.is_empty()
    })
}

/// How long to wait before the next automated action, or None when the
/// turn belongs to a connected human (or nothing is pending).
pub fn next_delay(room: &Room, pacing: &Pacing) -> Option<Duration> {
    let automation = pending_automation(room)?;
    let delay = match automation {
        Automation::NextHand => pacing.hand_over,
        Automation::Bot(_) => {
            let think = pacing.think_for(room.bot_difficulty);
            if post_trick_pause_applies(room) {
                think.max(pacing.post_trick)
            } else {
                think
            }
        }
        Automation::Fallback(_) => {
            let think = pacing.think_disconnected;
            if post_trick_pause_applies(room) {
                think.max(pacing.post_trick)
            } else {
                think
            }
        }
    };
    Some(delay)
}

/// Execute exactly one automated action. Returns the info events of the
/// action, or None when nothing was pending.
pub fn execute_step<R: Rng + ?Sized>(
    room: &mut Room,
    rng: &mut R,
) -> Result<Option<Vec<String>>, DomainError> {
    let Some(automation) = pending_automation(room) else {
        return Ok(None);
    };
    let events = match automation {
        Automation::NextHand => transitions::start_next_hand(room, rng)?,
        Automation::Bot(seat) => {
            let engine = BotEngine::new(BotConfig::for_difficulty(room.bot_difficulty));
            let action = engine.decide(room, seat, rng)?;
            apply_bot_action(room, seat, action, rng)?
        }
        Automation::Fallback(seat) => fallback_action(room, seat, rng)?,
    };
    Ok(Some(events))
}

fn apply_bot_action<R: Rng + ?Sized>(
    room: &mut Room,
    seat: Seat,
    action: crate::ai::BotAction,
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    use crate::ai::BotAction;
    match action {
        BotAction::Pass => transitions::pass(room, seat, rng),
        BotAction::OrderUp { alone } => transitions::order_up(room, seat, alone),
        BotAction::ChooseTrump { suit, alone } => transitions::choose_trump(room, seat, suit, alone),
        BotAction::Discard(card) => transitions::dealer_discard(room, seat, &card.id()),
        BotAction::Play(card) => transitions::play_card(room, seat, &card.id()),
    }
}

/// Deterministic defaults for a disconnected seat: pass in bidding,
/// discard the first card, play the first legal card.
fn fallback_action<R: Rng + ?Sized>(
    room: &mut Room,
    seat: Seat,
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    let game = room.game.as_ref().ok_or_else(|| {
        DomainError::phase(
            crate::errors::domain::PhaseKind::WrongPhase,
            "No hand in progress",
        )
    })?;
    match game.phase {
        Phase::BiddingRound1 | Phase::BiddingRound2 => transitions::pass(room, seat, rng),
        Phase::DealerDiscard => {
            let card_id = room
                .player_at_seat(seat)
                .and_then(|p| p.hand.first())
                .map(|c| c.id())
                .ok_or_else(|| {
                    DomainError::phase(
                        crate::errors::domain::PhaseKind::WrongPhase,
                        "Nothing to discard",
                    )
                })?;
            transitions::dealer_discard(room, seat, &card_id)
        }
        Phase::Playing => {
            let trump = game.trump.ok_or_else(|| {
                DomainError::phase(
                    crate::errors::domain::PhaseKind::WrongPhase,
                    "Trump has not been set",
                )
            })?;
            let card_id = room
                .player_at_seat(seat)
                .map(|p| legal_plays(&p.hand, &game.current_trick, trump))
                .and_then(|legal| legal.first().map(|c| c.id()))
                .ok_or_else(|| {
                    DomainError::phase(
                        crate::errors::domain::PhaseKind::WrongPhase,
                        "No legal card to play",
                    )
                })?;
            transitions::play_card(room, seat, &card_id)
        }
        _ => Ok(Vec::new()),
    }
}
