//! Determinization of hidden hands.
//!
//! The bot sees its own hand and every card already played. Opponent hands
//! are never represented as unknown cards; they are known sizes plus
//! inferred void suits, and each sample deals the unseen cards into those
//! constraints. Cards left over after filling every seat are the hidden
//! kitty.

use rand::Rng;

use crate::domain::cards_logic::effective_suit;
use crate::domain::cards_types::{Card, Suit};
use crate::domain::dealing::full_deck;
use crate::domain::rules::Seat;
use crate::domain::state::{Room, TrickPlay};

/// Per-seat effective-suit voids learned from the trick history.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidMap {
    voids: [[bool; 4]; 4],
}

impl VoidMap {
    pub fn mark(&mut self, seat: Seat, suit: Suit) {
        self.voids[seat as usize][suit.index()] = true;
    }

    pub fn is_void(&self, seat: Seat, suit: Suit) -> bool {
        self.voids[seat as usize][suit.index()]
    }
}

fn scan_trick(room: &Room, trick: &[TrickPlay], trump: Suit, voids: &mut VoidMap) {
    let Some(first) = trick.first() else {
        return;
    };
    let lead = effective_suit(first.card, trump);
    for play in &trick[1..] {
        if effective_suit(play.card, trump) != lead {
            if let Some(seat) = room.seat_of(&play.player_id) {
                voids.mark(seat, lead);
            }
        }
    }
}

/// A seat that failed to follow an effective lead suit is void in it.
pub fn infer_voids(room: &Room, trump: Suit) -> VoidMap {
    let mut voids = VoidMap::default();
    let Some(game) = room.game.as_ref() else {
        return voids;
    };
    for trick in &game.completed_tricks {
        scan_trick(room, &trick.cards, trump, &mut voids);
    }
    scan_trick(room, &game.current_trick, trump, &mut voids);
    voids
}

/// Every card the observer has not seen: the deck minus their own hand,
/// all played cards, and the public upcard.
pub fn unseen_cards(room: &Room, observer: Seat) -> Vec<Card> {
    let mut seen: Vec<Card> = Vec::new();
    if let Some(me) = room.player_at_seat(observer) {
        seen.extend(me.hand.iter().copied());
    }
    if let Some(game) = room.game.as_ref() {
        if let Some(upcard) = game.upcard {
            seen.push(upcard);
        }
        for trick in &game.completed_tricks {
            seen.extend(trick.cards.iter().map(|p| p.card));
        }
        seen.extend(game.current_trick.iter().map(|p| p.card));
    }
    full_deck()
        .into_iter()
        .filter(|c| !seen.contains(c))
        .collect()
}

/// One determinization: the observer keeps their real hand, the other
/// seats are dealt unseen cards respecting their known hand sizes and void
/// constraints. Seats are filled largest-first; if a seat's constraints
/// cannot be met from the remaining pool, they are relaxed rather than
/// failing the sample.
pub fn sample_hands<R: Rng + ?Sized>(
    room: &Room,
    observer: Seat,
    trump: Suit,
    rng: &mut R,
) -> [Vec<Card>; 4] {
    let voids = infer_voids(room, trump);
    let mut pool = unseen_cards(room, observer);
    // Fisher-Yates so repeated greedy fills differ between samples.
    for i in (1..pool.len()).rev() {
        let j = rng.random_range(0..=i);
        pool.swap(i, j);
    }

    let mut hands: [Vec<Card>; 4] = Default::default();
    hands[observer as usize] = room
        .player_at_seat(observer)
        .map(|p| p.hand.clone())
        .unwrap_or_default();

    let mut order: Vec<Seat> = (0..4u8).filter(|&s| s != observer).collect();
    order.sort_by_key(|&s| {
        std::cmp::Reverse(room.player_at_seat(s).map(|p| p.hand.len()).unwrap_or(0))
    });

    for seat in order {
        let want = room
            .player_at_seat(seat)
            .map(|p| p.hand.len())
            .unwrap_or(0);
        let mut hand = Vec::with_capacity(want);
        while hand.len() < want {
            let pick = pool
                .iter()
                .position(|&c| !voids.is_void(seat, effective_suit(c, trump)));
            match pick {
                Some(i) => hand.push(pool.swap_remove(i)),
                // Constraints are unsatisfiable from what remains; relax.
                None => hand.push(pool.swap_remove(0)),
            }
        }
        hands[seat as usize] = hand;
    }
    hands
}
