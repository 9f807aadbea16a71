//! The per-hand phase state machine.
//!
//! Every operation validates the acting seat against the current phase and
//! turn, mutates the room in place, and returns the human-readable info
//! events the room actor broadcasts. State is only mutated after all guards
//! pass, so a rejected action leaves the room untouched.

use rand::Rng;

use super::cards_types::{Card, Suit};
use super::dealing;
use super::rules::{next_active_seat, next_seat, partner_of, team_of, Seat, PLAYERS, TARGET_SCORE};
use super::scoring::summarize_hand;
use super::state::{CompletedTrick, GameState, Phase, Room, RoomStatus, TrickPlay};
use super::tricks::{legal_plays, trick_winner_index};
use crate::errors::domain::{ConflictKind, DomainError, PhaseKind, ValidationKind};

fn seat_name(room: &Room, seat: Seat) -> String {
    room.player_at_seat(seat)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("seat {seat}"))
}

fn no_hand() -> DomainError {
    DomainError::phase(PhaseKind::WrongPhase, "No hand is in progress")
}

fn game_ref(room: &Room) -> Result<&GameState, DomainError> {
    room.game.as_ref().ok_or_else(no_hand)
}

fn game_mut(room: &mut Room) -> Result<&mut GameState, DomainError> {
    room.game.as_mut().ok_or_else(no_hand)
}

fn ensure_phase(game: &GameState, expected: Phase, action: &str) -> Result<(), DomainError> {
    if game.phase != expected {
        return Err(DomainError::phase(
            PhaseKind::WrongPhase,
            format!("Cannot {action} now"),
        ));
    }
    Ok(())
}

fn ensure_turn(game: &GameState, seat: Seat) -> Result<(), DomainError> {
    if game.turn_seat != seat {
        return Err(DomainError::phase(PhaseKind::NotYourTurn, "Not your turn"));
    }
    Ok(())
}

fn seated_player_id(room: &Room, seat: Seat) -> Result<String, DomainError> {
    room.player_at_seat(seat)
        .map(|p| p.id.clone())
        .ok_or_else(|| {
            DomainError::validation(ValidationKind::BadSeatIndex, "No player at acting seat")
        })
}

/// Deal a fresh hand into bidding round 1.
fn deal_hand<R: Rng + ?Sized>(
    room: &mut Room,
    dealer_seat: Seat,
    hand_number: u32,
    rng: &mut R,
) -> Vec<String> {
    let deal = dealing::deal(rng);
    for (seat, hand) in deal.hands.into_iter().enumerate() {
        if let Some(player) = room.player_at_seat_mut(seat as Seat) {
            player.hand = hand;
        }
    }
    let upcard = deal.upcard;
    room.game = Some(GameState {
        phase: Phase::BiddingRound1,
        dealer_seat,
        turn_seat: next_seat(dealer_seat),
        upcard: Some(upcard),
        kitty: deal.kitty,
        blocked_suit: None,
        trump: None,
        maker_team: None,
        called_by_player_id: None,
        going_alone_player_id: None,
        sitting_out_seat: None,
        current_trick: Vec::new(),
        completed_tricks: Vec::new(),
        trick_index: 0,
        hand_summary: None,
        hand_number,
    });
    vec![format!(
        "{} deals hand {hand_number}. Up card: {upcard}",
        seat_name(room, dealer_seat)
    )]
}

/// Start the match from a full lobby. Caller enforces the creator check.
pub fn begin_match<R: Rng + ?Sized>(
    room: &mut Room,
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    if room.status != RoomStatus::Waiting {
        return Err(DomainError::phase(
            PhaseKind::WrongPhase,
            "The game has already started",
        ));
    }
    if room.players.len() < PLAYERS as usize {
        return Err(DomainError::conflict(
            ConflictKind::RoomFull,
            "All four seats must be filled to start",
        ));
    }
    room.status = RoomStatus::Playing;
    room.score = Default::default();
    let mut events = vec!["The game begins!".to_string()];
    events.extend(deal_hand(room, 0, 1, rng));
    Ok(events)
}

pub fn pass<R: Rng + ?Sized>(
    room: &mut Room,
    seat: Seat,
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    let game = game_ref(room)?;
    ensure_turn(game, seat)?;
    let phase = game.phase;
    let dealer = game.dealer_seat;
    let hand_number = game.hand_number;
    let upcard_suit = game.upcard.map(|c| c.suit);

    match phase {
        Phase::BiddingRound1 => {
            let game = game_mut(room)?;
            if seat == dealer {
                game.phase = Phase::BiddingRound2;
                game.blocked_suit = upcard_suit;
                game.turn_seat = next_seat(dealer);
                Ok(vec![match upcard_suit {
                    Some(suit) => format!(
                        "{} turns it down. {} may not be called.",
                        seat_name(room, seat),
                        suit.as_str()
                    ),
                    None => format!("{} turns it down.", seat_name(room, seat)),
                }])
            } else {
                game.turn_seat = next_seat(seat);
                Ok(vec![format!("{} passes.", seat_name(room, seat))])
            }
        }
        Phase::BiddingRound2 => {
            if seat == dealer {
                // All four passed: throw the hand in and redeal with the
                // next dealer (screw-the-dealer is off).
                let mut events = vec![format!(
                    "{} passes. Everyone passed; throwing the hand in.",
                    seat_name(room, seat)
                )];
                events.extend(deal_hand(room, next_seat(dealer), hand_number + 1, rng));
                Ok(events)
            } else {
                let game = game_mut(room)?;
                game.turn_seat = next_seat(seat);
                Ok(vec![format!("{} passes.", seat_name(room, seat))])
            }
        }
        _ => Err(DomainError::phase(PhaseKind::WrongPhase, "Cannot pass now")),
    }
}

fn loner_bookkeeping(game: &mut GameState, maker_seat: Seat, maker_id: String, alone: bool) {
    if alone {
        game.going_alone_player_id = Some(maker_id);
        game.sitting_out_seat = Some(partner_of(maker_seat));
    }
}

pub fn order_up(room: &mut Room, seat: Seat, alone: bool) -> Result<Vec<String>, DomainError> {
    let game = game_ref(room)?;
    ensure_phase(game, Phase::BiddingRound1, "order up")?;
    ensure_turn(game, seat)?;
    let upcard = game
        .upcard
        .ok_or_else(|| DomainError::phase(PhaseKind::WrongPhase, "No up card to order"))?;
    let dealer = game.dealer_seat;
    let maker_id = seated_player_id(room, seat)?;
    let maker_name = seat_name(room, seat);
    let dealer_name = seat_name(room, dealer);

    if let Some(dealer_player) = room.player_at_seat_mut(dealer) {
        dealer_player.hand.push(upcard);
    }
    let game = game_mut(room)?;
    game.upcard = None;
    game.trump = Some(upcard.suit);
    game.maker_team = Some(team_of(seat));
    game.called_by_player_id = Some(maker_id.clone());
    loner_bookkeeping(game, seat, maker_id, alone);
    game.phase = Phase::DealerDiscard;
    game.turn_seat = dealer;

    let mut msg = format!(
        "{maker_name} orders {dealer_name} up. Trump is {}.",
        upcard.suit.as_str()
    );
    if alone {
        msg.push_str(&format!(" {maker_name} is going alone!"));
    }
    Ok(vec![msg])
}

pub fn choose_trump(
    room: &mut Room,
    seat: Seat,
    suit: Suit,
    alone: bool,
) -> Result<Vec<String>, DomainError> {
    let game = game_ref(room)?;
    ensure_phase(game, Phase::BiddingRound2, "call trump")?;
    ensure_turn(game, seat)?;
    if game.blocked_suit == Some(suit) {
        return Err(DomainError::phase(
            PhaseKind::BlockedSuit,
            format!("{} was turned down and may not be called", suit.as_str()),
        ));
    }
    let dealer = game.dealer_seat;
    let maker_id = seated_player_id(room, seat)?;
    let maker_name = seat_name(room, seat);

    let game = game_mut(room)?;
    game.trump = Some(suit);
    game.maker_team = Some(team_of(seat));
    game.called_by_player_id = Some(maker_id.clone());
    loner_bookkeeping(game, seat, maker_id, alone);
    game.phase = Phase::Playing;
    game.turn_seat = next_active_seat(dealer, game.sitting_out_seat);

    let mut msg = format!("{maker_name} calls {}.", suit.as_str());
    if alone {
        msg.push_str(&format!(" {maker_name} is going alone!"));
    }
    Ok(vec![msg])
}

pub fn dealer_discard(
    room: &mut Room,
    seat: Seat,
    card_id: &str,
) -> Result<Vec<String>, DomainError> {
    let game = game_ref(room)?;
    ensure_phase(game, Phase::DealerDiscard, "discard")?;
    ensure_turn(game, seat)?;
    let card = Card::from_id(card_id)?;
    let dealer = game.dealer_seat;

    let dealer_player = room.player_at_seat_mut(dealer).ok_or_else(|| {
        DomainError::validation(ValidationKind::BadSeatIndex, "No player at dealer seat")
    })?;
    let index = dealer_player
        .hand
        .iter()
        .position(|&c| c == card)
        .ok_or_else(|| {
            DomainError::validation(ValidationKind::BadCardId, "That card is not in your hand")
        })?;
    dealer_player.hand.remove(index);

    let game = game_mut(room)?;
    game.kitty.push(card);
    game.phase = Phase::Playing;
    game.turn_seat = next_active_seat(dealer, game.sitting_out_seat);

    Ok(vec![format!("{} discards.", seat_name(room, dealer))])
}

pub fn play_card(room: &mut Room, seat: Seat, card_id: &str) -> Result<Vec<String>, DomainError> {
    let game = game_ref(room)?;
    ensure_phase(game, Phase::Playing, "play a card")?;
    ensure_turn(game, seat)?;
    let card = Card::from_id(card_id)?;
    let trump = game
        .trump
        .ok_or_else(|| DomainError::phase(PhaseKind::WrongPhase, "Trump has not been set"))?;

    let player = room.player_at_seat(seat).ok_or_else(|| {
        DomainError::validation(ValidationKind::BadSeatIndex, "No player at acting seat")
    })?;
    if !player.hand.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::BadCardId,
            "That card is not in your hand",
        ));
    }
    if !legal_plays(&player.hand, &game.current_trick, trump).contains(&card) {
        return Err(DomainError::phase(
            PhaseKind::MustFollowSuit,
            "You must follow suit",
        ));
    }
    let player_id = player.id.clone();
    let player_name = player.name.clone();

    if let Some(player) = room.player_at_seat_mut(seat) {
        player.hand.retain(|&c| c != card);
    }

    let game = game_mut(room)?;
    game.current_trick.push(TrickPlay { player_id, card });

    let mut events = vec![format!("{player_name} plays {card}.")];
    if game.current_trick.len() < game.active_seat_count() {
        game.turn_seat = next_active_seat(seat, game.sitting_out_seat);
        return Ok(events);
    }

    // Trick complete: resolve the winner, bank the trick, winner leads.
    let winner_idx = trick_winner_index(&game.current_trick, trump);
    let winner_id = game.current_trick[winner_idx].player_id.clone();
    let cards = std::mem::take(&mut game.current_trick);
    let trick_index = game.trick_index;
    let winner_seat = room.seat_of(&winner_id).ok_or_else(|| {
        DomainError::validation(ValidationKind::BadSeatIndex, "Trick winner is not seated")
    })?;

    let game = game_mut(room)?;
    game.completed_tricks.push(CompletedTrick {
        index: trick_index,
        winner_seat,
        cards,
    });
    game.trick_index += 1;
    game.turn_seat = winner_seat;
    let banked = game.completed_tricks.len();
    events.push(format!("{} takes the trick.", seat_name(room, winner_seat)));

    if banked == 5 {
        events.extend(finalize_hand(room)?);
    }
    Ok(events)
}

/// After the fifth trick: count maker tricks, award points, settle phase.
fn finalize_hand(room: &mut Room) -> Result<Vec<String>, DomainError> {
    let game = game_mut(room)?;
    let maker_team = game
        .maker_team
        .ok_or_else(|| DomainError::phase(PhaseKind::WrongPhase, "No maker recorded"))?;
    let alone = game.going_alone_player_id.is_some();
    let maker_tricks = game
        .completed_tricks
        .iter()
        .filter(|t| team_of(t.winner_seat) == maker_team)
        .count() as u8;

    let summary = summarize_hand(maker_team, maker_tricks, alone);
    game.hand_summary = Some(summary);
    room.score.add(summary.awarded_to, summary.points_awarded);

    let mut events = Vec::new();
    if summary.awarded_to == summary.maker_team {
        events.push(format!(
            "Makers take {} trick(s): {} point(s) to team {}.",
            summary.maker_tricks, summary.points_awarded, summary.awarded_to
        ));
    } else {
        events.push(format!(
            "Euchred! Defenders score {} points.",
            summary.points_awarded
        ));
    }
    events.push(format!(
        "Score: {} - {}.",
        room.score.team0, room.score.team1
    ));

    let team0 = room.score.team0;
    let team1 = room.score.team1;
    let game = game_mut(room)?;
    if team0 >= TARGET_SCORE || team1 >= TARGET_SCORE {
        game.phase = Phase::GameOver;
        let winner = if team0 >= TARGET_SCORE { 0 } else { 1 };
        events.push(format!("Team {winner} wins the match!"));
    } else {
        game.phase = Phase::HandOver;
    }
    Ok(events)
}

/// Rotate the dealer and deal the next hand. Legal only between hands.
pub fn start_next_hand<R: Rng + ?Sized>(
    room: &mut Room,
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    let game = game_ref(room)?;
    ensure_phase(game, Phase::HandOver, "start the next hand")?;
    let dealer = next_seat(game.dealer_seat);
    let hand_number = game.hand_number + 1;
    Ok(deal_hand(room, dealer, hand_number, rng))
}

/// Zero the score and deal hand one of a fresh match.
pub fn restart_match<R: Rng + ?Sized>(
    room: &mut Room,
    rng: &mut R,
) -> Result<Vec<String>, DomainError> {
    let game = game_ref(room)?;
    ensure_phase(game, Phase::GameOver, "restart the match")?;
    let dealer = next_seat(game.dealer_seat);
    room.score = Default::default();
    let mut events = vec!["Starting a new match.".to_string()];
    events.extend(deal_hand(room, dealer, 1, rng));
    Ok(events)
}
