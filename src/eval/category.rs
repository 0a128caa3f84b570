//! Hand categories.

use serde::{Deserialize, Serialize};

/// The ten standard hand categories, ordered from worst to best.
///
/// The derived `Ord` drives the first stage of hand comparison; hands
/// of equal category compare by their tiebreaker vectors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HandCategory {
    /// No made hand; the five highest cards play.
    HighCard,
    /// One rank appears twice.
    Pair,
    /// Two distinct ranks each appear twice.
    TwoPair,
    /// One rank appears three times.
    ThreeOfAKind,
    /// Five consecutive rank values (Ace plays high or low).
    Straight,
    /// Five cards of one suit.
    Flush,
    /// Three of one rank plus two of another.
    FullHouse,
    /// One rank appears four times.
    FourOfAKind,
    /// A straight entirely in one suit.
    StraightFlush,
    /// An ace-high straight flush.
    RoyalFlush,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}
