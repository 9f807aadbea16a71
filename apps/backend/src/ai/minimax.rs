//! Perfect-information alpha-beta search over a determinized hand.
//!
//! Once the hidden hands are sampled the position is a two-team
//! perfect-information game: seats on the bot's team maximize, the others
//! minimize. Depth is counted in plies (individual card plays); hands are
//! five cards at most, so cloning per node stays cheap.

use crate::domain::cards_logic::{rank_strength, residual_value};
use crate::domain::cards_types::{Card, Suit};
use crate::domain::rules::{next_active_seat, team_of, Seat};

/// Weight of a banked trick in the evaluation.
const TRICK_WEIGHT: f64 = 100.0;
/// Weight of residual card value still held.
const RESIDUAL_WEIGHT: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct SimState {
    pub hands: [Vec<Card>; 4],
    pub current_trick: Vec<(Seat, Card)>,
    pub turn: Seat,
    pub trump: Suit,
    pub sitting_out: Option<Seat>,
    /// Tricks banked per team.
    pub tricks: [u8; 2],
}

impl SimState {
    pub fn active_count(&self) -> usize {
        if self.sitting_out.is_some() {
            3
        } else {
            4
        }
    }

    pub fn legal(&self) -> Vec<Card> {
        let hand = &self.hands[self.turn as usize];
        match self.current_trick.first() {
            Some(&(_, led)) => {
                let lead = crate::domain::cards_logic::effective_suit(led, self.trump);
                let following: Vec<Card> = hand
                    .iter()
                    .copied()
                    .filter(|&c| crate::domain::cards_logic::effective_suit(c, self.trump) == lead)
                    .collect();
                if following.is_empty() {
                    hand.clone()
                } else {
                    following
                }
            }
            None => hand.clone(),
        }
    }

    pub fn done(&self) -> bool {
        self.hands
            .iter()
            .enumerate()
            .filter(|(s, _)| Some(*s as Seat) != self.sitting_out)
            .all(|(_, h)| h.is_empty())
            && self.current_trick.is_empty()
    }

    /// Apply one card play, resolving the trick when it completes.
    pub fn apply(&self, card: Card) -> SimState {
        let mut next = self.clone();
        next.hands[next.turn as usize].retain(|&c| c != card);
        next.current_trick.push((next.turn, card));

        if next.current_trick.len() >= next.active_count() {
            let lead = crate::domain::cards_logic::effective_suit(
                next.current_trick[0].1,
                next.trump,
            );
            if let Some(&(winner, _)) = next
                .current_trick
                .iter()
                .max_by_key(|&&(_, c)| rank_strength(c, next.trump, lead))
            {
                next.tricks[team_of(winner) as usize] += 1;
                next.current_trick.clear();
                next.turn = winner;
            }
        } else {
            next.turn = next_active_seat(next.turn, next.sitting_out);
        }
        next
    }
}

/// Static evaluation from `bot_team`'s perspective.
pub fn evaluate(state: &SimState, bot_team: u8) -> f64 {
    let opp = 1 - bot_team;
    let trick_diff =
        f64::from(state.tricks[bot_team as usize]) - f64::from(state.tricks[opp as usize]);

    let mut residual = 0.0;
    for (seat, hand) in state.hands.iter().enumerate() {
        if Some(seat as Seat) == state.sitting_out {
            continue;
        }
        let sign = if team_of(seat as Seat) == bot_team {
            1.0
        } else {
            -1.0
        };
        for &card in hand {
            residual += sign * f64::from(residual_value(card, state.trump));
        }
    }
    TRICK_WEIGHT * trick_diff + RESIDUAL_WEIGHT * residual
}

/// Alpha-beta negamax-style search; seats on `bot_team` maximize.
pub fn alphabeta(state: &SimState, depth: u8, mut alpha: f64, mut beta: f64, bot_team: u8) -> f64 {
    if depth == 0 || state.done() {
        return evaluate(state, bot_team);
    }

    let moves = state.legal();
    if moves.is_empty() {
        return evaluate(state, bot_team);
    }

    let maximizing = team_of(state.turn) == bot_team;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for card in moves {
        let child = state.apply(card);
        let score = alphabeta(&child, depth - 1, alpha, beta, bot_team);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Score a single candidate move from the bot's seat.
pub fn score_move(state: &SimState, card: Card, depth: u8, bot_team: u8) -> f64 {
    let child = state.apply(card);
    alphabeta(
        &child,
        depth.saturating_sub(1),
        f64::NEG_INFINITY,
        f64::INFINITY,
        bot_team,
    )
}

/// Search the whole position (bot to move) without fixing the first card.
pub fn score_position(state: &SimState, depth: u8, bot_team: u8) -> f64 {
    alphabeta(state, depth, f64::NEG_INFINITY, f64::INFINITY, bot_team)
}
