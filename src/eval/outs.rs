//! Outs counting and improvement odds.
//!
//! Given hole cards and a partial board, this module counts the unseen
//! cards that would lift the current hand into a strictly better
//! category, then converts that count into turn/river/combined hit
//! probabilities. The enumeration is category-driven: each starting
//! category has a fixed set of upgrade routes (see `estimate_odds`),
//! not an exhaustive search over every winning runout.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::category::HandCategory;
use super::classify::{straight_high, HandEvaluator};
use crate::cards::{Board, Card, Deck, HoleCards, Suit};

/// Outs and improvement odds for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsReport {
    /// Unseen cards that upgrade the hand's category.
    pub outs: u32,
    /// Probability of hitting an out on the turn.
    pub turn_odds: f64,
    /// Probability of hitting an out on the river.
    pub river_odds: f64,
    /// Probability of hitting on the turn or the river.
    pub combined_odds: f64,
}

impl OddsReport {
    fn none() -> Self {
        Self {
            outs: 0,
            turn_odds: 0.0,
            river_odds: 0.0,
            combined_odds: 0.0,
        }
    }
}

/// Estimate outs and improvement odds for hole cards on a 0-4 card board.
///
/// Upgrade routes per current category:
/// - **HighCard**: pairing a hole card, completing a four-flush, or
///   completing an open-ended/gutshot straight draw
/// - **Pair**: making trips, plus the flush/straight draws above
/// - **TwoPair**: filling either pair into a full house
/// - **ThreeOfAKind**: quads, or pairing any side card into a full house
/// - **Straight**: completing a four-flush over the straight
/// - **Flush**: completing a straight flush within the suit
/// - **FullHouse**: making quads
///
/// A card that completes several routes at once counts once. With a
/// complete 5-card board there is nothing left to come and every field
/// is zero.
pub fn estimate_odds(hole: HoleCards, board: &Board) -> OddsReport {
    if board.len() >= 5 {
        return OddsReport::none();
    }

    let mut visible = Vec::with_capacity(6);
    visible.extend_from_slice(&hole.cards());
    visible.extend_from_slice(board.cards());

    let hand = HandEvaluator::new().classify(&visible);
    let deck = Deck::without(&visible);
    let unseen = deck.remaining_cards();

    let mut outs: FxHashSet<Card> = FxHashSet::default();
    match hand.category {
        HandCategory::HighCard => {
            pairing_outs(&hole, unseen, &mut outs);
            flush_draw_outs(&visible, unseen, &mut outs);
            straight_draw_outs(&visible, unseen, &mut outs);
        }
        HandCategory::Pair => {
            value_outs(hand.tiebreakers[0], unseen, &mut outs);
            flush_draw_outs(&visible, unseen, &mut outs);
            straight_draw_outs(&visible, unseen, &mut outs);
        }
        HandCategory::TwoPair => {
            value_outs(hand.tiebreakers[0], unseen, &mut outs);
            value_outs(hand.tiebreakers[1], unseen, &mut outs);
        }
        HandCategory::ThreeOfAKind => {
            let trips_value = hand.tiebreakers[0];
            value_outs(trips_value, unseen, &mut outs);
            // Pairing any side card fills up.
            for &card in unseen {
                let value = card.rank().value();
                if value != trips_value && visible.iter().any(|v| v.rank() == card.rank()) {
                    outs.insert(card);
                }
            }
        }
        HandCategory::Straight => {
            flush_draw_outs(&visible, unseen, &mut outs);
        }
        HandCategory::Flush => {
            straight_flush_outs(&visible, unseen, &mut outs);
        }
        HandCategory::FullHouse => {
            value_outs(hand.tiebreakers[0], unseen, &mut outs);
        }
        // Quads and straight flushes have no higher category to draw to.
        _ => {}
    }

    let outs = outs.len() as u32;
    let remaining = (52 - visible.len()) as f64;

    let turn_odds = if board.len() <= 3 {
        outs as f64 / remaining
    } else {
        0.0
    };
    let river_odds = if board.len() == 4 {
        outs as f64 / remaining
    } else {
        outs as f64 / (remaining - 1.0)
    };
    let combined_odds = turn_odds + river_odds - turn_odds * river_odds;

    OddsReport {
        outs,
        turn_odds,
        river_odds,
        combined_odds,
    }
}

/// Unseen cards matching either hole-card rank.
fn pairing_outs(hole: &HoleCards, unseen: &[Card], outs: &mut FxHashSet<Card>) {
    for &card in unseen {
        if card.rank() == hole.card1.rank() || card.rank() == hole.card2.rank() {
            outs.insert(card);
        }
    }
}

/// Unseen cards of a specific rank value.
fn value_outs(value: u8, unseen: &[Card], outs: &mut FxHashSet<Card>) {
    for &card in unseen {
        if card.rank().value() == value {
            outs.insert(card);
        }
    }
}

/// If exactly four visible cards share a suit, every unseen card of
/// that suit completes the flush.
fn flush_draw_outs(visible: &[Card], unseen: &[Card], outs: &mut FxHashSet<Card>) {
    for suit in Suit::ALL {
        let count = visible.iter().filter(|c| c.suit() == suit).count();
        if count == 4 {
            for &card in unseen {
                if card.suit() == suit {
                    outs.insert(card);
                }
            }
        }
    }
}

/// Unseen cards whose rank turns the visible ranks into a five-card run
/// (open-ended and gutshot draws, wheel included).
fn straight_draw_outs(visible: &[Card], unseen: &[Card], outs: &mut FxHashSet<Card>) {
    let mut present = [false; 15];
    for card in visible {
        present[card.rank().value() as usize] = true;
    }

    for value in 2..=14u8 {
        if present[value as usize] {
            continue;
        }
        present[value as usize] = true;
        let completes = straight_high(&present).is_some();
        present[value as usize] = false;

        if completes {
            value_outs(value, unseen, outs);
        }
    }
}

/// Unseen cards of the flush suit whose rank completes a straight
/// within that suit.
fn straight_flush_outs(visible: &[Card], unseen: &[Card], outs: &mut FxHashSet<Card>) {
    for suit in Suit::ALL {
        let count = visible.iter().filter(|c| c.suit() == suit).count();
        if count < 5 {
            continue;
        }

        let mut suited = [false; 15];
        for card in visible.iter().filter(|c| c.suit() == suit) {
            suited[card.rank().value() as usize] = true;
        }

        for &card in unseen {
            if card.suit() != suit {
                continue;
            }
            let value = card.rank().value() as usize;
            suited[value] = true;
            if straight_high(&suited).is_some() {
                outs.insert(card);
            }
            suited[value] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odds(hole: &str, board: &str) -> OddsReport {
        estimate_odds(
            HoleCards::from_str(hole).unwrap(),
            &Board::from_str(board).unwrap(),
        )
    }

    #[test]
    fn test_high_card_counts_pairs_and_flush_draw() {
        // No made hand, four hearts: 6 pairing cards + 9 hearts.
        let report = odds("Ah9h", "Kh7h2d");
        assert_eq!(report.outs, 15);
        assert!((report.turn_odds - 15.0 / 47.0).abs() < 1e-9);
        assert!((report.river_odds - 15.0 / 46.0).abs() < 1e-9);
        let expected =
            report.turn_odds + report.river_odds - report.turn_odds * report.river_odds;
        assert!((report.combined_odds - expected).abs() < 1e-9);
    }

    #[test]
    fn test_open_ended_straight_draw() {
        // 6-7-8-9 visible: any five or ten completes, plus 6 pairing cards.
        let report = odds("9s8d", "7c6h2s");
        // Pairing: three nines + three eights; straight: four fives + four tens.
        assert_eq!(report.outs, 14);
    }

    #[test]
    fn test_gutshot_straight_draw() {
        // 5-6-8-9 visible: only a seven fills the run.
        let report = odds("9s8d", "6c5hKs");
        // Pairing nines and eights (6) + four sevens.
        assert_eq!(report.outs, 10);
    }

    #[test]
    fn test_pair_counts_trips_and_draws() {
        let report = odds("AsAd", "7c8d2h");
        // Two aces left, no four-flush, no one-card straight.
        assert_eq!(report.outs, 2);
    }

    #[test]
    fn test_pair_keeps_flush_draw_outs() {
        let report = odds("AsAd", "7s8s2s");
        // Two aces plus the nine remaining spades.
        assert_eq!(report.outs, 11);
    }

    #[test]
    fn test_two_pair_draws_to_full_house() {
        let report = odds("AsAd", "KcKd2h");
        assert_eq!(report.outs, 4);
    }

    #[test]
    fn test_trips_draw_to_quads_and_full_house() {
        let report = odds("AsAd", "Ac7d2h");
        // The case ace, three sevens, three deuces.
        assert_eq!(report.outs, 7);
    }

    #[test]
    fn test_straight_draws_to_flush() {
        let report = odds("9s8s", "7s6s5d");
        // Straight already made; nine spades complete the flush.
        assert_eq!(report.outs, 9);
    }

    #[test]
    fn test_flush_draws_to_straight_flush() {
        let report = odds("9h8h", "5h6h2h");
        // Only the seven of hearts makes 5-6-7-8-9 suited.
        assert_eq!(report.outs, 1);
    }

    #[test]
    fn test_full_house_draws_to_quads() {
        let report = odds("AsAd", "AcKdKh");
        assert_eq!(report.outs, 1);
    }

    #[test]
    fn test_quads_have_no_outs() {
        let report = odds("AsAd", "AcAhKh");
        assert_eq!(report.outs, 0);
        assert_eq!(report.turn_odds, 0.0);
    }

    #[test]
    fn test_complete_board_yields_zero() {
        let report = odds("AsAd", "Kc7d2h9s3c");
        assert_eq!(report.outs, 0);
        assert_eq!(report.turn_odds, 0.0);
        assert_eq!(report.river_odds, 0.0);
        assert_eq!(report.combined_odds, 0.0);
    }

    #[test]
    fn test_four_card_board_only_has_river_odds() {
        let report = odds("AsAd", "7c8d2hJc");
        assert_eq!(report.outs, 2);
        assert_eq!(report.turn_odds, 0.0);
        assert!((report.river_odds - 2.0 / 46.0).abs() < 1e-9);
        assert!((report.combined_odds - report.river_odds).abs() < 1e-9);
    }

    #[test]
    fn test_preflop_trips_outs() {
        let report = odds("AsAd", "");
        // Pocket pair before the flop: two aces to make trips.
        assert_eq!(report.outs, 2);
        assert!((report.turn_odds - 2.0 / 50.0).abs() < 1e-9);
        assert!((report.river_odds - 2.0 / 49.0).abs() < 1e-9);
    }
}
