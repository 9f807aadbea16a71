//! Core card-related types: Card, Rank, Suit

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

impl Suit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }

    /// The same-color suit whose Jack becomes the left bower when this
    /// suit is trump (clubs↔spades, diamonds↔hearts).
    pub const fn same_color(self) -> Suit {
        match self {
            Suit::Clubs => Suit::Spades,
            Suit::Spades => Suit::Clubs,
            Suit::Diamonds => Suit::Hearts,
            Suit::Hearts => Suit::Diamonds,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn parse(s: &str) -> Result<Suit, DomainError> {
        match s {
            "clubs" => Ok(Suit::Clubs),
            "diamonds" => Ok(Suit::Diamonds),
            "hearts" => Ok(Suit::Hearts),
            "spades" => Ok(Suit::Spades),
            other => Err(DomainError::validation(
                ValidationKind::BadSuit,
                format!("Unknown suit: {other}"),
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const ALL_RANKS: [Rank; 6] = [
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    pub const fn as_str(self) -> &'static str {
        match self {
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "j",
            Rank::Queen => "q",
            Rank::King => "k",
            Rank::Ace => "a",
        }
    }

    pub fn parse(s: &str) -> Result<Rank, DomainError> {
        match s {
            "9" => Ok(Rank::Nine),
            "10" => Ok(Rank::Ten),
            "j" => Ok(Rank::Jack),
            "q" => Ok(Rank::Queen),
            "k" => Ok(Rank::King),
            "a" => Ok(Rank::Ace),
            other => Err(DomainError::validation(
                ValidationKind::BadCardId,
                format!("Unknown rank: {other}"),
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Canonical card id, e.g. `hearts-9` or `spades-j`. In a 24-card
    /// deck every suit+rank pair occurs once, so the id is unique per deal.
    pub fn id(&self) -> String {
        format!("{}-{}", self.suit.as_str(), self.rank.as_str())
    }

    pub fn from_id(id: &str) -> Result<Card, DomainError> {
        let (suit, rank) = id.split_once('-').ok_or_else(|| {
            DomainError::validation(ValidationKind::BadCardId, format!("Bad card id: {id}"))
        })?;
        Ok(Card::new(Suit::parse(suit)?, Rank::parse(rank)?))
    }
}

// Note: Ord on Card is only for stable sorting: suit order C<D<H<S then rank
// order. Do not use for trick resolution; that needs trump+lead context.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.suit.as_str(), self.rank.as_str())
    }
}
