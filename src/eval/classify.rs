//! Hand classification and comparison.
//!
//! `classify` maps any 2-7 card set to its best category plus a
//! tiebreaker vector; the derived ordering on `EvaluatedHand` (category
//! first, then tiebreakers lexicographically) is the total order used
//! everywhere hands are compared.

use serde::{Deserialize, Serialize};

use super::category::HandCategory;
use crate::cards::{Board, Card, HoleCards};

/// A classified hand.
///
/// The tiebreaker vector is category-specific: pair rank then kickers
/// for a pair, the straight's high card for a straight, and so on. All
/// entries are numeric rank values (2-14); the wheel straight's high
/// card is 5. Comparison is category first, then element-wise
/// left-to-right over the tiebreakers, which the derived `Ord` gives
/// directly from field order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluatedHand {
    /// The hand's category.
    pub category: HandCategory,
    /// Category-specific tiebreaker values, most significant first.
    pub tiebreakers: Vec<u8>,
}

/// Classifier for poker hands.
#[derive(Debug, Clone, Default)]
pub struct HandEvaluator;

impl HandEvaluator {
    /// Create a new hand evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Classify a set of 2-7 cards into its best category.
    ///
    /// Categories are checked in descending precedence, so the result
    /// is always the strongest category the card set can form. With
    /// fewer than 5 cards only the rank-multiplicity categories are
    /// reachable; straights, flushes, and full houses need 5 cards.
    ///
    /// Input order is irrelevant; duplicates are the caller's error and
    /// are rejected at the engine boundary before this runs.
    pub fn classify(&self, cards: &[Card]) -> EvaluatedHand {
        debug_assert!(cards.len() >= 2, "need at least 2 cards to classify");

        let mut value_counts = [0u8; 15];
        let mut suit_counts = [0u8; 4];
        for card in cards {
            value_counts[card.rank().value() as usize] += 1;
            suit_counts[card.suit().index() as usize] += 1;
        }

        let flush_suit = suit_counts.iter().position(|&c| c >= 5);

        // Straight flush: straight detection restricted to the flush
        // suit, so a disjoint flush and straight never promote.
        if let Some(suit) = flush_suit {
            let mut suited = [false; 15];
            for card in cards {
                if card.suit().index() as usize == suit {
                    suited[card.rank().value() as usize] = true;
                }
            }
            if let Some(high) = straight_high(&suited) {
                let category = if high == 14 {
                    HandCategory::RoyalFlush
                } else {
                    HandCategory::StraightFlush
                };
                return EvaluatedHand {
                    category,
                    tiebreakers: vec![high],
                };
            }
        }

        // Bucket rank values by multiplicity, highest value first.
        let mut quads = Vec::new();
        let mut trips = Vec::new();
        let mut pairs = Vec::new();
        let mut singles = Vec::new();
        for value in (2..=14u8).rev() {
            match value_counts[value as usize] {
                4 => quads.push(value),
                3 => trips.push(value),
                2 => pairs.push(value),
                1 => singles.push(value),
                _ => {}
            }
        }

        if let Some(&quad) = quads.first() {
            let kicker = (2..=14u8)
                .rev()
                .find(|&v| v != quad && value_counts[v as usize] > 0);
            let mut tiebreakers = vec![quad];
            tiebreakers.extend(kicker);
            return EvaluatedHand {
                category: HandCategory::FourOfAKind,
                tiebreakers,
            };
        }

        if let Some(&top_trips) = trips.first() {
            // A second trips counts as the pair half (7-card sets).
            let pair = trips.iter().skip(1).chain(pairs.iter()).copied().max();
            if let Some(pair) = pair {
                return EvaluatedHand {
                    category: HandCategory::FullHouse,
                    tiebreakers: vec![top_trips, pair],
                };
            }
        }

        if let Some(suit) = flush_suit {
            let mut flush_values: Vec<u8> = cards
                .iter()
                .filter(|c| c.suit().index() as usize == suit)
                .map(|c| c.rank().value())
                .collect();
            flush_values.sort_unstable_by(|a, b| b.cmp(a));
            flush_values.truncate(5);
            return EvaluatedHand {
                category: HandCategory::Flush,
                tiebreakers: flush_values,
            };
        }

        let mut present = [false; 15];
        for value in 2..=14usize {
            present[value] = value_counts[value] > 0;
        }
        if let Some(high) = straight_high(&present) {
            return EvaluatedHand {
                category: HandCategory::Straight,
                tiebreakers: vec![high],
            };
        }

        if let Some(&t) = trips.first() {
            let mut tiebreakers = vec![t];
            tiebreakers.extend(singles.iter().take(2));
            return EvaluatedHand {
                category: HandCategory::ThreeOfAKind,
                tiebreakers,
            };
        }

        if pairs.len() >= 2 {
            let kicker = pairs.get(2).copied().max(singles.first().copied());
            let mut tiebreakers = vec![pairs[0], pairs[1]];
            tiebreakers.extend(kicker);
            return EvaluatedHand {
                category: HandCategory::TwoPair,
                tiebreakers,
            };
        }

        if let Some(&p) = pairs.first() {
            let mut tiebreakers = vec![p];
            tiebreakers.extend(singles.iter().take(3));
            return EvaluatedHand {
                category: HandCategory::Pair,
                tiebreakers,
            };
        }

        EvaluatedHand {
            category: HandCategory::HighCard,
            tiebreakers: singles.iter().take(5).copied().collect(),
        }
    }

    /// Classify hole cards together with a board.
    pub fn classify_hand(&self, hole: HoleCards, board: &Board) -> EvaluatedHand {
        let mut cards = Vec::with_capacity(7);
        cards.extend_from_slice(&hole.cards());
        cards.extend_from_slice(board.cards());
        self.classify(&cards)
    }
}

/// Find the highest straight among present rank values.
///
/// `present` is indexed by numeric value 2-14; the Ace (14) also plays
/// as 1 so the wheel (A-2-3-4-5) is found with a high card of 5.
pub(crate) fn straight_high(present: &[bool; 15]) -> Option<u8> {
    let value_present = |v: u8| {
        if v == 1 {
            present[14]
        } else {
            present[v as usize]
        }
    };
    (5..=14u8).rev().find(|&high| (0..5u8).all(|i| value_present(high - i)))
}
