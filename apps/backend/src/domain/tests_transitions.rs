//! State machine tests: bidding, discard, trick play, scoring, redeal.

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use super::rules::TARGET_SCORE;
use super::state::{Phase, RoomStatus};
use super::tests_fixtures::{assert_card_conservation, playing_room, with_round1};
use super::transitions;
use crate::errors::domain::{DomainError, PhaseKind};

fn rng() -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(99)
}

fn play(room: &mut super::state::Room, seat: u8, id: &str) {
    transitions::play_card(room, seat, id).expect("legal play");
    assert_card_conservation(room);
}

#[test]
fn order_up_and_euchre_full_hand() {
    // Dealer seat 3, upcard hearts-9. P1 orders up, P3 discards clubs-9;
    // the makers (team 1) take two tricks and are euchred.
    let mut room = playing_room();
    with_round1(
        &mut room,
        3,
        "hearts-9",
        [
            &["clubs-a", "clubs-k", "spades-a", "spades-k", "diamonds-9"],
            &["hearts-j", "hearts-a", "clubs-q", "spades-q", "diamonds-10"],
            &["hearts-k", "hearts-q", "diamonds-a", "diamonds-k", "clubs-j"],
            &["hearts-10", "clubs-9", "spades-j", "spades-10", "diamonds-q"],
        ],
    );

    transitions::pass(&mut room, 0, &mut rng()).unwrap();
    let events = transitions::order_up(&mut room, 1, false).unwrap();
    assert!(events[0].contains("orders"));

    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::DealerDiscard);
    assert_eq!(game.trump, Some(super::Suit::Hearts));
    assert_eq!(game.maker_team, Some(1));
    assert_eq!(game.turn_seat, 3);
    assert_eq!(room.player_at_seat(3).unwrap().hand.len(), 6);

    transitions::dealer_discard(&mut room, 3, "clubs-9").unwrap();
    assert_card_conservation(&room);
    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.turn_seat, 0, "lead is next active after the dealer");
    assert_eq!(game.kitty.len(), 4, "discard joins the kitty");

    // Trick 1: P0's club ace holds up.
    play(&mut room, 0, "clubs-a");
    play(&mut room, 1, "clubs-q");
    play(&mut room, 2, "clubs-j");
    play(&mut room, 3, "spades-10");
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 0);

    // Trick 2: P2 trumps in.
    play(&mut room, 0, "clubs-k");
    play(&mut room, 1, "spades-q");
    play(&mut room, 2, "hearts-q");
    play(&mut room, 3, "spades-j");
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 2);

    // Trick 3: diamonds all around, P2's ace wins.
    play(&mut room, 2, "diamonds-a");
    play(&mut room, 3, "diamonds-q");
    play(&mut room, 0, "diamonds-9");
    play(&mut room, 1, "diamonds-10");
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 2);

    // Trick 4: the right bower takes it for the makers.
    play(&mut room, 2, "diamonds-k");
    play(&mut room, 3, "hearts-9");
    play(&mut room, 0, "spades-a");
    play(&mut room, 1, "hearts-j");
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 1);

    // Trick 5: hearts ace holds.
    play(&mut room, 1, "hearts-a");
    play(&mut room, 2, "hearts-k");
    play(&mut room, 3, "hearts-10");
    play(&mut room, 0, "spades-k");

    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::HandOver);
    let summary = game.hand_summary.unwrap();
    assert_eq!(summary.maker_team, 1);
    assert_eq!(summary.maker_tricks, 2);
    assert_eq!(summary.defender_tricks, 3);
    assert_eq!(summary.points_awarded, 2);
    assert_eq!(summary.awarded_to, 0);
    assert_eq!(room.score.team0, 2);
    assert_eq!(room.score.team1, 0);
}

#[test]
fn round2_loner_sweep() {
    // All pass round 1 (diamonds-j turned down); P2 calls spades alone and
    // sweeps with three active seats. Partner P0 never plays a card.
    let mut room = playing_room();
    with_round1(
        &mut room,
        3,
        "diamonds-j",
        [
            &["clubs-a", "clubs-k", "clubs-q", "hearts-j", "hearts-9"],
            &["hearts-a", "hearts-k", "diamonds-9", "diamonds-10", "clubs-9"],
            &["spades-j", "clubs-j", "spades-a", "spades-k", "spades-q"],
            &["hearts-q", "hearts-10", "diamonds-q", "diamonds-k", "clubs-10"],
        ],
    );

    let mut r = rng();
    for seat in [0, 1, 2, 3] {
        transitions::pass(&mut room, seat, &mut r).unwrap();
    }
    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::BiddingRound2);
    assert_eq!(game.blocked_suit, Some(super::Suit::Diamonds));

    transitions::pass(&mut room, 0, &mut r).unwrap();
    transitions::pass(&mut room, 1, &mut r).unwrap();

    // The turned-down suit may not be called; the failed call changes nothing.
    let before = room.clone();
    let err = transitions::choose_trump(&mut room, 2, super::Suit::Diamonds, false).unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::BlockedSuit, _)));
    assert_eq!(room, before);

    transitions::choose_trump(&mut room, 2, super::Suit::Spades, true).unwrap();
    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.sitting_out_seat, Some(0));
    assert_eq!(game.turn_seat, 1, "seat 0 is skipped after the dealer");
    assert_eq!(game.active_seat_count(), 3);

    play(&mut room, 1, "hearts-a");
    play(&mut room, 2, "spades-j");
    play(&mut room, 3, "hearts-q");

    play(&mut room, 2, "spades-a");
    play(&mut room, 3, "diamonds-q");
    play(&mut room, 1, "diamonds-9");

    play(&mut room, 2, "spades-k");
    play(&mut room, 3, "diamonds-k");
    play(&mut room, 1, "diamonds-10");

    play(&mut room, 2, "spades-q");
    play(&mut room, 3, "clubs-10");
    play(&mut room, 1, "clubs-9");

    play(&mut room, 2, "clubs-j");
    play(&mut room, 3, "hearts-10");
    play(&mut room, 1, "hearts-k");

    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::HandOver);
    let summary = game.hand_summary.unwrap();
    assert_eq!(summary.maker_tricks, 5);
    assert_eq!(summary.points_awarded, 4);
    assert_eq!(summary.awarded_to, 0);
    assert_eq!(
        room.player_at_seat(0).unwrap().hand.len(),
        5,
        "the sitting-out hand is never played"
    );
}

#[test]
fn four_passes_in_round2_redeal_with_next_dealer() {
    let mut room = playing_room();
    with_round1(
        &mut room,
        3,
        "diamonds-j",
        [
            &["clubs-a", "clubs-k", "clubs-q", "hearts-j", "hearts-9"],
            &["hearts-a", "hearts-k", "diamonds-9", "diamonds-10", "clubs-9"],
            &["spades-j", "clubs-j", "spades-a", "spades-k", "spades-q"],
            &["hearts-q", "hearts-10", "diamonds-q", "diamonds-k", "clubs-10"],
        ],
    );

    let mut r = rng();
    for seat in [0, 1, 2, 3, 0, 1, 2] {
        transitions::pass(&mut room, seat, &mut r).unwrap();
    }
    let events = transitions::pass(&mut room, 3, &mut r).unwrap();
    assert!(events[0].contains("throwing"));

    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::BiddingRound1);
    assert_eq!(game.dealer_seat, 0, "dealer rotates on a thrown-in hand");
    assert_eq!(game.turn_seat, 1);
    assert_eq!(game.hand_number, 2);
    assert_eq!(game.blocked_suit, None);
    assert_card_conservation(&room);
}

#[test]
fn turn_and_phase_guards() {
    let mut room = playing_room();
    with_round1(
        &mut room,
        3,
        "hearts-9",
        [
            &["clubs-a", "clubs-k", "spades-a", "spades-k", "diamonds-9"],
            &["hearts-j", "hearts-a", "clubs-q", "spades-q", "diamonds-10"],
            &["hearts-k", "hearts-q", "diamonds-a", "diamonds-k", "clubs-j"],
            &["hearts-10", "clubs-9", "spades-j", "spades-10", "diamonds-q"],
        ],
    );

    let err = transitions::pass(&mut room, 2, &mut rng()).unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::NotYourTurn, _)));

    let err = transitions::play_card(&mut room, 0, "clubs-a").unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::WrongPhase, _)));

    let err = transitions::choose_trump(&mut room, 0, super::Suit::Spades, false).unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::WrongPhase, _)));
}

#[test]
fn must_follow_suit_is_enforced() {
    let mut room = playing_room();
    with_round1(
        &mut room,
        3,
        "hearts-9",
        [
            &["clubs-a", "clubs-k", "spades-a", "spades-k", "diamonds-9"],
            &["hearts-j", "hearts-a", "clubs-q", "spades-q", "diamonds-10"],
            &["hearts-k", "hearts-q", "diamonds-a", "diamonds-k", "clubs-j"],
            &["hearts-10", "clubs-9", "spades-j", "spades-10", "diamonds-q"],
        ],
    );
    transitions::pass(&mut room, 0, &mut rng()).unwrap();
    transitions::order_up(&mut room, 1, false).unwrap();
    transitions::dealer_discard(&mut room, 3, "clubs-9").unwrap();

    play(&mut room, 0, "clubs-a");
    // P1 holds clubs-q and must follow the club lead.
    let err = transitions::play_card(&mut room, 1, "hearts-a").unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::MustFollowSuit, _)));
    play(&mut room, 1, "clubs-q");
}

#[test]
fn begin_match_requires_full_lobby() {
    let mut room = playing_room();
    room.status = RoomStatus::Waiting;
    room.players.pop();
    assert!(transitions::begin_match(&mut room, &mut rng()).is_err());
}

#[test]
fn begin_match_deals_hand_one() {
    let mut room = playing_room();
    room.status = RoomStatus::Waiting;
    let events = transitions::begin_match(&mut room, &mut rng()).unwrap();
    assert!(events.iter().any(|e| e.contains("deals hand 1")));
    assert_eq!(room.status, RoomStatus::Playing);
    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::BiddingRound1);
    assert_eq!(game.dealer_seat, 0);
    assert_eq!(game.turn_seat, 1);
    assert_card_conservation(&room);
}

#[test]
fn match_ends_at_target_score() {
    let mut room = playing_room();
    room.score.team1 = TARGET_SCORE - 1;
    with_round1(
        &mut room,
        3,
        "diamonds-j",
        [
            &["clubs-a", "clubs-k", "clubs-q", "hearts-j", "hearts-9"],
            &["hearts-a", "hearts-k", "diamonds-9", "diamonds-10", "clubs-9"],
            &["spades-j", "clubs-j", "spades-a", "spades-k", "spades-q"],
            &["hearts-q", "hearts-10", "diamonds-q", "diamonds-k", "clubs-10"],
        ],
    );

    // P1 calls hearts at 9 points; the makers take 3 tricks and the single
    // point ends the match.
    let mut r = rng();
    for seat in [0, 1, 2, 3, 0] {
        transitions::pass(&mut room, seat, &mut r).unwrap();
    }
    transitions::choose_trump(&mut room, 1, super::Suit::Hearts, false).unwrap();

    let game = room.game.as_ref().unwrap();
    assert_eq!(game.turn_seat, 0);

    play(&mut room, 0, "hearts-j"); // right bower
    play(&mut room, 1, "hearts-a");
    play(&mut room, 2, "clubs-j");
    play(&mut room, 3, "hearts-q");
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 0);

    play(&mut room, 0, "hearts-9");
    play(&mut room, 1, "hearts-k");
    play(&mut room, 2, "spades-j");
    play(&mut room, 3, "hearts-10");
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 1);

    play(&mut room, 1, "diamonds-9");
    play(&mut room, 2, "spades-a");
    play(&mut room, 3, "diamonds-q");
    play(&mut room, 0, "clubs-a");
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 3);

    play(&mut room, 3, "diamonds-k");
    play(&mut room, 0, "clubs-k");
    play(&mut room, 1, "diamonds-10");
    play(&mut room, 2, "spades-k");
    assert_eq!(room.game.as_ref().unwrap().turn_seat, 3);

    play(&mut room, 3, "clubs-10");
    play(&mut room, 0, "clubs-q");
    play(&mut room, 1, "clubs-9");
    play(&mut room, 2, "spades-q");

    let game = room.game.as_ref().unwrap();
    let summary = game.hand_summary.unwrap();
    assert_eq!(summary.maker_team, 1);
    assert_eq!(summary.maker_tricks, 3);
    assert_eq!(summary.awarded_to, 1);
    assert_eq!(room.score.team1, TARGET_SCORE);
    assert_eq!(game.phase, Phase::GameOver);

    // Restart zeroes the score and deals a fresh hand.
    transitions::restart_match(&mut room, &mut r).unwrap();
    assert_eq!(room.score.team0, 0);
    assert_eq!(room.score.team1, 0);
    let game = room.game.as_ref().unwrap();
    assert_eq!(game.phase, Phase::BiddingRound1);
    assert_eq!(game.hand_number, 1);
}

#[test]
fn next_hand_rotates_dealer() {
    let mut room = playing_room();
    with_round1(
        &mut room,
        3,
        "hearts-9",
        [
            &["clubs-a", "clubs-k", "spades-a", "spades-k", "diamonds-9"],
            &["hearts-j", "hearts-a", "clubs-q", "spades-q", "diamonds-10"],
            &["hearts-k", "hearts-q", "diamonds-a", "diamonds-k", "clubs-j"],
            &["hearts-10", "clubs-9", "spades-j", "spades-10", "diamonds-q"],
        ],
    );
    room.game.as_mut().unwrap().phase = Phase::HandOver;
    room.game.as_mut().unwrap().hand_summary = Some(super::scoring::summarize_hand(1, 2, false));

    transitions::start_next_hand(&mut room, &mut rng()).unwrap();
    let game = room.game.as_ref().unwrap();
    assert_eq!(game.dealer_seat, 0);
    assert_eq!(game.hand_number, 2);
    assert_eq!(game.phase, Phase::BiddingRound1);
    assert!(game.hand_summary.is_none());
    assert_card_conservation(&room);
}
