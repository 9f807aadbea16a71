//! Per-phase bot decisions.
//!
//! Every decision runs the same machinery: sample the hidden hands
//! `sample_count` times, search each sample with alpha-beta, and act on the
//! aggregate. Bids compare the mean sample score against the difficulty's
//! threshold so the threshold means the same thing at every sample count.

use rand::Rng;

use super::config::{BotConfig, ALONE_MARGIN};
use super::determinize::sample_hands;
use super::minimax::{score_move, score_position, SimState};
use crate::domain::cards_logic::{effective_suit, residual_value};
use crate::domain::cards_types::{Card, Suit, ALL_SUITS};
use crate::domain::rules::{next_active_seat, team_of, Seat};
use crate::domain::state::{GameState, Phase, Room};
use crate::domain::tricks::legal_plays;
use crate::errors::domain::{DomainError, PhaseKind};

/// One action chosen by the engine, matching the current phase.
#[derive(Debug, Clone, PartialEq)]
pub enum BotAction {
    Pass,
    OrderUp { alone: bool },
    ChooseTrump { suit: Suit, alone: bool },
    Discard(Card),
    Play(Card),
}

#[derive(Debug, Clone, Copy)]
pub struct BotEngine {
    pub config: BotConfig,
}

impl BotEngine {
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    /// Choose one action for the seat holding the turn.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        room: &Room,
        seat: Seat,
        rng: &mut R,
    ) -> Result<BotAction, DomainError> {
        let game = room.game.as_ref().ok_or_else(|| {
            DomainError::phase(PhaseKind::WrongPhase, "No hand in progress")
        })?;
        match game.phase {
            Phase::BiddingRound1 => Ok(self.decide_round1(room, game, seat, rng)),
            Phase::BiddingRound2 => Ok(self.decide_round2(room, game, seat, rng)),
            Phase::DealerDiscard => self.decide_discard(room, game, seat),
            Phase::Playing => self.decide_play(room, game, seat, rng),
            _ => Err(DomainError::phase(
                PhaseKind::WrongPhase,
                "Nothing for a bot to decide",
            )),
        }
    }

    fn decide_round1<R: Rng + ?Sized>(
        &self,
        room: &Room,
        game: &GameState,
        seat: Seat,
        rng: &mut R,
    ) -> BotAction {
        let Some(upcard) = game.upcard else {
            return BotAction::Pass;
        };
        let score = self.bid_score(room, game, seat, upcard.suit, Some(upcard), rng);
        if score >= self.config.bid_threshold {
            BotAction::OrderUp {
                alone: score >= self.config.bid_threshold + ALONE_MARGIN,
            }
        } else {
            BotAction::Pass
        }
    }

    fn decide_round2<R: Rng + ?Sized>(
        &self,
        room: &Room,
        game: &GameState,
        seat: Seat,
        rng: &mut R,
    ) -> BotAction {
        let mut best: Option<(f64, Suit)> = None;
        for suit in ALL_SUITS {
            if game.blocked_suit == Some(suit) {
                continue;
            }
            let score = self.bid_score(room, game, seat, suit, None, rng);
            if best.map_or(true, |(b, _)| score > b) {
                best = Some((score, suit));
            }
        }
        match best {
            Some((score, suit)) if score >= self.config.bid_threshold => BotAction::ChooseTrump {
                suit,
                alone: score >= self.config.bid_threshold + ALONE_MARGIN,
            },
            _ => BotAction::Pass,
        }
    }

    /// Mean search score of the position after calling `trump`, over
    /// `sample_count` determinizations. `pickup` carries the round-1 upcard
    /// into the dealer's hand before searching.
    fn bid_score<R: Rng + ?Sized>(
        &self,
        room: &Room,
        game: &GameState,
        seat: Seat,
        trump: Suit,
        pickup: Option<Card>,
        rng: &mut R,
    ) -> f64 {
        let bot_team = team_of(seat);
        let mut total = 0.0;
        for _ in 0..self.config.sample_count {
            let mut hands = sample_hands(room, seat, trump, rng);
            if let Some(upcard) = pickup {
                let dealer_hand = &mut hands[game.dealer_seat as usize];
                dealer_hand.push(upcard);
                discard_weakest(dealer_hand, trump);
            }
            let state = SimState {
                hands,
                current_trick: Vec::new(),
                turn: next_active_seat(game.dealer_seat, None),
                trump,
                sitting_out: None,
                tricks: [0, 0],
            };
            total += score_position(&state, self.config.search_depth, bot_team);
        }
        total / self.config.sample_count as f64
    }

    fn decide_discard(
        &self,
        room: &Room,
        game: &GameState,
        seat: Seat,
    ) -> Result<BotAction, DomainError> {
        let trump = game
            .trump
            .ok_or_else(|| DomainError::phase(PhaseKind::WrongPhase, "Trump not set"))?;
        let hand = room
            .player_at_seat(seat)
            .map(|p| p.hand.as_slice())
            .unwrap_or_default();
        pick_discard(hand, trump)
            .map(BotAction::Discard)
            .ok_or_else(|| DomainError::phase(PhaseKind::WrongPhase, "Nothing to discard"))
    }

    fn decide_play<R: Rng + ?Sized>(
        &self,
        room: &Room,
        game: &GameState,
        seat: Seat,
        rng: &mut R,
    ) -> Result<BotAction, DomainError> {
        let trump = game
            .trump
            .ok_or_else(|| DomainError::phase(PhaseKind::WrongPhase, "Trump not set"))?;
        let hand = room
            .player_at_seat(seat)
            .map(|p| p.hand.clone())
            .unwrap_or_default();
        let legal = legal_plays(&hand, &game.current_trick, trump);
        if legal.is_empty() {
            return Err(DomainError::phase(PhaseKind::WrongPhase, "No legal plays"));
        }
        if legal.len() == 1 {
            return Ok(BotAction::Play(legal[0]));
        }
        // Easy bots blunder on purpose.
        if rng.random::<f64>() < self.config.random_move_rate {
            let i = rng.random_range(0..legal.len());
            return Ok(BotAction::Play(legal[i]));
        }

        let bot_team = team_of(seat);
        let current_trick: Vec<(Seat, Card)> = game
            .current_trick
            .iter()
            .filter_map(|p| room.seat_of(&p.player_id).map(|s| (s, p.card)))
            .collect();
        let mut tricks = [0u8; 2];
        for trick in &game.completed_tricks {
            tricks[team_of(trick.winner_seat) as usize] += 1;
        }

        let mut totals = vec![0.0; legal.len()];
        for _ in 0..self.config.sample_count {
            let state = SimState {
                hands: sample_hands(room, seat, trump, rng),
                current_trick: current_trick.clone(),
                turn: seat,
                trump,
                sitting_out: game.sitting_out_seat,
                tricks,
            };
            for (i, &card) in legal.iter().enumerate() {
                totals[i] += score_move(&state, card, self.config.search_depth, bot_team);
            }
        }

        let best = totals
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        Ok(BotAction::Play(legal[best]))
    }
}

/// The least valuable card, preferring to keep trump: a low off-suit card
/// goes first, trump only when the hand is all trump.
pub fn pick_discard(hand: &[Card], trump: Suit) -> Option<Card> {
    let off_suit = hand
        .iter()
        .copied()
        .filter(|&c| effective_suit(c, trump) != trump)
        .min_by_key(|&c| residual_value(c, trump));
    off_suit.or_else(|| {
        hand.iter()
            .copied()
            .min_by_key(|&c| residual_value(c, trump))
    })
}
