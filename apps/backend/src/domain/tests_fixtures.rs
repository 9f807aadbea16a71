//! Shared builders for domain tests.

use super::cards_types::Card;
use super::rules::Seat;
use super::state::{GameState, Phase, Player, Room, RoomStatus};

pub fn c(id: &str) -> Card {
    Card::from_id(id).expect("test card id")
}

pub fn cards(ids: &[&str]) -> Vec<Card> {
    ids.iter().map(|id| c(id)).collect()
}

/// A room with four connected humans P0..P3 and a match in progress.
pub fn playing_room() -> Room {
    let mut room = Room::new("test-room", None, "test-token".to_string());
    for seat in 0..4u8 {
        let mut player = Player::new_human(format!("P{seat}"), seat);
        player.connected = true;
        room.players.push(player);
    }
    room.creator_player_id = Some(room.players[0].id.clone());
    room.status = RoomStatus::Playing;
    room
}

/// Install a hand mid-bid: fixed dealer, upcard, and explicit hands.
pub fn with_round1(room: &mut Room, dealer_seat: Seat, upcard: &str, hands: [&[&str]; 4]) {
    for (seat, ids) in hands.iter().enumerate() {
        room.player_at_seat_mut(seat as Seat)
            .expect("seat populated")
            .hand = cards(ids);
    }
    let dealt: Vec<Card> = hands.iter().flat_map(|ids| cards(ids)).collect();
    let upcard = c(upcard);
    let kitty: Vec<Card> = super::dealing::full_deck()
        .into_iter()
        .filter(|card| *card != upcard && !dealt.contains(card))
        .collect();
    assert_eq!(kitty.len(), 3, "hands + upcard must cover 21 cards");

    room.game = Some(GameState {
        phase: Phase::BiddingRound1,
        dealer_seat,
        turn_seat: super::rules::next_seat(dealer_seat),
        upcard: Some(upcard),
        kitty,
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
        hand_number: 1,
    });
}

/// Full-deck accounting: hands + current trick + banked tricks + kitty +
/// upcard must always cover exactly the 24 dealt cards.
pub fn assert_card_conservation(room: &Room) {
    let game = room.game.as_ref().expect("hand in progress");
    let in_hands: usize = room.players.iter().map(|p| p.hand.len()).sum();
    let in_tricks: usize = game
        .completed_tricks
        .iter()
        .map(|t| t.cards.len())
        .sum::<usize>()
        + game.current_trick.len();
    let total = in_hands + in_tricks + game.kitty.len() + usize::from(game.upcard.is_some());
    assert_eq!(total, super::rules::DECK_SIZE, "cards leaked or duplicated");
}
