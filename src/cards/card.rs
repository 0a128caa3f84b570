//! Card representation for the equity engine.
//!
//! This module provides the fundamental card types:
//! - `Rank` / `Suit`: symbolic card components with a fixed ordering
//! - `Card`: a single playing card
//! - `HoleCards`: a player's two private cards
//! - `Board`: community cards (0-5 cards)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank characters for parsing and display.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for parsing and display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Rank of a card, from Two up to Ace.
///
/// Ranks order by their numeric value (`Two` = 2 up to `Ace` = 14).
/// The Ace additionally plays as 1 when forming the low end of a
/// five-high straight; that special case lives entirely inside straight
/// detection and does not affect this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace, the highest rank.
    Ace,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value used for hand ordering (2-14, Ace high).
    #[inline]
    pub fn value(self) -> u8 {
        self as u8 + 2
    }

    /// Zero-based index (0 = Two, 12 = Ace).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Rank character for display ('2'-'9', 'T', 'J', 'Q', 'K', 'A').
    pub fn to_char(self) -> char {
        RANK_CHARS[self.index() as usize]
    }

    /// Parse a rank from its character representation.
    pub fn from_char(c: char) -> Option<Self> {
        let idx = RANK_CHARS
            .iter()
            .position(|&r| r == c.to_ascii_uppercase())?;
        Some(Rank::ALL[idx])
    }
}

/// Display color of a suit.
///
/// Carries no gameplay weight; it exists for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitColor {
    /// Clubs and spades.
    Black,
    /// Diamonds and hearts.
    Red,
}

/// Suit of a card.
///
/// Suits have no ordering weight in hand comparison; they only matter
/// for flush and flush-draw detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
}

impl Suit {
    /// All suits in enumeration order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Zero-based index (0 = clubs, 3 = spades).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Suit character for display ('c', 'd', 'h', 's').
    pub fn to_char(self) -> char {
        SUIT_CHARS[self.index() as usize]
    }

    /// Parse a suit from its character representation.
    pub fn from_char(c: char) -> Option<Self> {
        let idx = SUIT_CHARS
            .iter()
            .position(|&s| s == c.to_ascii_lowercase())?;
        Some(Suit::ALL[idx])
    }

    /// Display color of this suit.
    pub fn color(self) -> SuitColor {
        match self {
            Suit::Diamonds | Suit::Hearts => SuitColor::Red,
            Suit::Clubs | Suit::Spades => SuitColor::Black,
        }
    }
}

/// A single playing card.
///
/// Equality is structural: two cards are the same iff they share rank
/// and suit. Cards are cheap `Copy` values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a new card.
    #[inline]
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Create a card from its ID (0-51: rank index * 4 + suit index).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self {
            rank: Rank::ALL[(id / 4) as usize],
            suit: Suit::ALL[(id % 4) as usize],
        }
    }

    /// Parse a card from a string like "As", "Kh", "2c".
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let rank = Rank::from_char(chars.next()?)?;
        let suit = Suit::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { rank, suit })
    }

    /// Get the card's ID (0-51), usable as a bitmask position.
    #[inline]
    pub fn id(&self) -> u8 {
        self.rank.index() * 4 + self.suit.index()
    }

    /// Get the card's rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Get the card's suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards {
    /// First card (higher rank by convention).
    pub card1: Card,
    /// Second card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards, ordering by rank (higher first).
    pub fn new(card1: Card, card2: Card) -> Self {
        if card1.rank() >= card2.rank() {
            Self { card1, card2 }
        } else {
            Self {
                card1: card2,
                card2: card1,
            }
        }
    }

    /// Parse hole cards from a string like "AhKs" or "Ah Ks".
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.replace(' ', "");
        if s.len() != 4 {
            return None;
        }
        let c1 = Card::from_str(&s[0..2])?;
        let c2 = Card::from_str(&s[2..4])?;
        Some(Self::new(c1, c2))
    }

    /// Check if both cards share a suit.
    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    /// Check if both cards share a rank.
    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    /// Get both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    /// Check if a card matches either hole card.
    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Community cards on the board.
///
/// A well-formed board carries 0-5 cards. `from_cards` accepts any
/// length so malformed input reaches the engine entry points, which
/// reject oversize boards with a typed error instead of truncating.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(5),
        }
    }

    /// Create a board from cards.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a board from a string like "AhKsQd".
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.replace(' ', "");
        if s.is_empty() {
            return Some(Self::new());
        }
        if s.len() % 2 != 0 || s.len() > 10 {
            return None;
        }

        let mut cards = Vec::with_capacity(5);
        for i in (0..s.len()).step_by(2) {
            cards.push(Card::from_str(&s[i..i + 2])?);
        }
        Some(Self::from_cards(cards))
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Add a card to the board.
    pub fn add(&mut self, card: Card) {
        debug_assert!(self.cards.len() < 5);
        self.cards.push(card);
    }

    /// Check if the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.iter().any(|&c| c == card)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}
