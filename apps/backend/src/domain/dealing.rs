//! Deck construction and dealing.

use rand::Rng;

use super::cards_types::{Card, ALL_RANKS, ALL_SUITS};
use super::rules::{DECK_SIZE, HAND_SIZE, PLAYERS};

/// Generate the full 24-card euchre deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in ALL_SUITS {
        for rank in ALL_RANKS {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Fisher-Yates shuffle over the caller's RNG. Production seeds the RNG
/// from OS entropy; tests inject a seeded ChaCha generator.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// One dealt hand: four 5-card hands in seat order, the upcard, and the
/// three-card kitty.
#[derive(Debug, Clone)]
pub struct Deal {
    pub hands: [Vec<Card>; 4],
    pub upcard: Card,
    pub kitty: Vec<Card>,
}

pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Deal {
    let mut deck = full_deck();
    shuffle(&mut deck, rng);

    let mut hands: [Vec<Card>; 4] = Default::default();
    for (seat, hand) in hands.iter_mut().enumerate().take(PLAYERS as usize) {
        let start = seat * HAND_SIZE;
        *hand = deck[start..start + HAND_SIZE].to_vec();
    }
    let upcard = deck[PLAYERS as usize * HAND_SIZE];
    let kitty = deck[PLAYERS as usize * HAND_SIZE + 1..].to_vec();

    Deal {
        hands,
        upcard,
        kitty,
    }
}
