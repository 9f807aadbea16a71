//! Property-based tests for play legality, trick resolution, and dealing.
//!
//! Generators draw distinct cards from the real 24-card deck; the trick
//! winner oracle is written independently of the main logic to catch
//! regressions in either.

use proptest::prelude::*;
use proptest::sample::subsequence;

use super::cards_logic::{effective_suit, is_left_bower, is_right_bower};
use super::cards_types::{Card, Rank, Suit, ALL_SUITS};
use super::dealing::full_deck;
use super::scoring::summarize_hand;
use super::state::TrickPlay;
use super::tricks::{legal_plays, trick_winner_index};

fn any_suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(ALL_SUITS.to_vec())
}

/// `n` distinct cards from the deck, shuffled order not required.
fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    subsequence(full_deck(), n)
}

/// An independent oracle for the winning play index.
fn oracle_winner(plays: &[TrickPlay], trump: Suit) -> usize {
    let lead = effective_suit(plays[0].card, trump);
    let key = |card: Card| -> (u8, u8) {
        // (class, rank) lexicographic: bowers above trump above lead.
        if is_right_bower(card, trump) {
            (4, 0)
        } else if is_left_bower(card, trump) {
            (3, 0)
        } else if card.suit == trump {
            (2, rank_ordinal(card.rank))
        } else if card.suit == lead {
            (1, rank_ordinal(card.rank))
        } else {
            (0, 0)
        }
    };
    plays
        .iter()
        .enumerate()
        .max_by_key(|&(i, p)| (key(p.card), std::cmp::Reverse(i)))
        .map(|(i, _)| i)
        .expect("non-empty trick")
}

fn rank_ordinal(rank: Rank) -> u8 {
    match rank {
        Rank::Nine => 0,
        Rank::Ten => 1,
        Rank::Jack => 2,
        Rank::Queen => 3,
        Rank::King => 4,
        Rank::Ace => 5,
    }
}

fn to_plays(cards: &[Card]) -> Vec<TrickPlay> {
    cards
        .iter()
        .enumerate()
        .map(|(i, &card)| TrickPlay {
            player_id: format!("p{i}"),
            card,
        })
        .collect()
}

proptest! {
    #[test]
    fn legal_plays_follow_the_effective_lead(
        drawn in distinct_cards(8),
        trump in any_suit(),
    ) {
        let (trick_cards, hand) = drawn.split_at(3);
        let trick = to_plays(trick_cards);
        let legal = legal_plays(hand, &trick, trump);

        prop_assert!(!legal.is_empty());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }

        let lead = effective_suit(trick[0].card, trump);
        let holds_lead = hand.iter().any(|&c| effective_suit(c, trump) == lead);
        if holds_lead {
            for card in &legal {
                prop_assert_eq!(effective_suit(*card, trump), lead);
            }
        } else {
            prop_assert_eq!(legal.len(), hand.len());
        }
    }

    #[test]
    fn empty_trick_permits_the_whole_hand(
        hand in distinct_cards(5),
        trump in any_suit(),
    ) {
        prop_assert_eq!(legal_plays(&hand, &[], trump), hand);
    }

    #[test]
    fn trick_winner_matches_oracle(
        cards in distinct_cards(4),
        trump in any_suit(),
    ) {
        let plays = to_plays(&cards);
        prop_assert_eq!(trick_winner_index(&plays, trump), oracle_winner(&plays, trump));
    }

    #[test]
    fn loner_trick_winner_matches_oracle(
        cards in distinct_cards(3),
        trump in any_suit(),
    ) {
        let plays = to_plays(&cards);
        prop_assert_eq!(trick_winner_index(&plays, trump), oracle_winner(&plays, trump));
    }

    #[test]
    fn hand_summary_is_lawful(maker_tricks in 0u8..=5, alone: bool, maker_team in 0u8..=1) {
        let summary = summarize_hand(maker_team, maker_tricks, alone);
        prop_assert_eq!(summary.maker_tricks + summary.defender_tricks, 5);
        prop_assert!([1, 2, 4].contains(&summary.points_awarded));
        if maker_tricks >= 3 {
            prop_assert_eq!(summary.awarded_to, maker_team);
        } else {
            prop_assert_eq!(summary.awarded_to, 1 - maker_team);
        }
        if maker_tricks == 5 && alone {
            prop_assert_eq!(summary.points_awarded, 4);
        }
    }

    #[test]
    fn deal_partitions_deck_for_any_seed(seed in any::<u64>()) {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);
        let deal = super::dealing::deal(&mut rng);

        let mut ids: Vec<String> = deal
            .hands
            .iter()
            .flatten()
            .chain(std::iter::once(&deal.upcard))
            .chain(deal.kitty.iter())
            .map(|c| c.id())
            .collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), 24);
    }
}
