//! # Hold'em Equity
//!
//! A hand evaluation and equity simulation engine for Texas Hold'em:
//! the calculation core of a poker session tracker, with the UI and
//! persistence layers left to the surrounding application.
//!
//! ## Features
//!
//! - **Hand Classification**: Ten standard categories with exact
//!   tie-break ordering, including the ace-low wheel straight
//! - **Outs Estimation**: Category-driven counting of upgrade cards
//!   with turn/river/combined hit probabilities
//! - **Equity Simulation**: Parallel Monte Carlo win/tie estimation
//!   for 2-9 players, unknown hands dealt randomly per iteration
//! - **Deterministic Replays**: Explicitly seeded RNG streams, so a
//!   fixed seed reproduces a run exactly
//! - **Cancellation**: In-flight simulations can be abandoned from
//!   another thread without blocking the caller
//!
//! ## Quick Start
//!
//! ```
//! use holdem_equity::{classify_and_estimate, simulate_equity, Board, HoleCards};
//!
//! // Outs and odds for a single hand on the flop
//! let hole = HoleCards::from_str("Ah9h").unwrap();
//! let board = Board::from_str("Kh7h2d").unwrap();
//! let report = classify_and_estimate(hole, &board).unwrap();
//! println!("{:?}: {} outs", report.category, report.outs);
//!
//! // Win/tie probabilities for a multi-way pot
//! let players = vec![HoleCards::from_str("AsAd"), None, None];
//! let equity = simulate_equity(&players, &Board::new(), 5_000).unwrap();
//! assert!(equity[0].win_probability > equity[1].win_probability);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     Library boundary                   │
//! │   classify_and_estimate()         simulate_equity()    │
//! └────────────┬───────────────────────────┬───────────────┘
//!              │                           │
//!              ▼                           ▼
//!       ┌─────────────┐            ┌───────────────┐
//!       │    eval     │◀───────────│      sim      │
//!       │ classify /  │  compares  │  Monte Carlo  │
//!       │    outs     │   hands    │   simulator   │
//!       └──────┬──────┘            └───────┬───────┘
//!              │                           │
//!              └──────────┬────────────────┘
//!                         ▼
//!                  ┌─────────────┐
//!                  │    cards    │
//!                  │ card / deck │
//!                  └─────────────┘
//! ```
//!
//! Every call is pure given its inputs and a seed: the engine holds no
//! state between invocations.

#![warn(missing_docs)]

/// Card and deck model.
pub mod cards;

/// Error types.
pub mod error;

/// Hand classification and outs estimation.
pub mod eval;

/// Monte Carlo equity simulation.
pub mod sim;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

// Re-export commonly used types at crate root for convenience
pub use cards::{Board, Card, Deck, HoleCards, Rank, Suit, SuitColor};
pub use error::EngineError;
pub use eval::{estimate_odds, EvaluatedHand, HandCategory, HandEvaluator, OddsReport};
pub use sim::{EquitySimulator, PlayerEquity, SimConfig, SimJob, SimReport};

/// Classification plus improvement odds for a single hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandReport {
    /// The hand's current category.
    pub category: HandCategory,
    /// Category-specific tiebreaker values, most significant first.
    pub tiebreakers: Vec<u8>,
    /// Unseen cards that upgrade the category.
    pub outs: u32,
    /// Probability of hitting an out on the turn.
    pub turn_odds: f64,
    /// Probability of hitting an out on the river.
    pub river_odds: f64,
    /// Probability of hitting on the turn or the river.
    pub combined_odds: f64,
}

/// Classify a card set after validating it.
///
/// Unlike [`HandEvaluator::classify`], this checks the input: at least
/// two cards, no duplicates.
pub fn classify(cards: &[Card]) -> Result<EvaluatedHand, EngineError> {
    if cards.len() < 2 {
        return Err(EngineError::EmptyHand(cards.len()));
    }
    let mut seen: FxHashSet<Card> = FxHashSet::default();
    for &card in cards {
        if !seen.insert(card) {
            return Err(EngineError::InvalidCardSet(card));
        }
    }
    Ok(HandEvaluator::new().classify(cards))
}

/// Classify a hand and estimate its improvement odds.
///
/// This is the single-hand "outs & odds" view: the current category
/// and tiebreakers for `hole` + `board`, the number of outs, and the
/// turn/river/combined hit probabilities.
///
/// # Errors
/// - [`EngineError::InvalidCardSet`] if a card repeats across hole and
///   board
/// - [`EngineError::ExhaustedDeck`] if the board has more than 5 cards
pub fn classify_and_estimate(
    hole: HoleCards,
    board: &Board,
) -> Result<HandReport, EngineError> {
    if board.len() > 5 {
        return Err(EngineError::ExhaustedDeck {
            requested: board.len(),
            available: 5,
        });
    }

    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(&hole.cards());
    cards.extend_from_slice(board.cards());
    let hand = classify(&cards)?;
    let odds = estimate_odds(hole, board);

    Ok(HandReport {
        category: hand.category,
        tiebreakers: hand.tiebreakers,
        outs: odds.outs,
        turn_odds: odds.turn_odds,
        river_odds: odds.river_odds,
        combined_odds: odds.combined_odds,
    })
}

/// Estimate win/tie probabilities for a multi-player showdown.
///
/// This is the multi-player "winning odds" view, running with default
/// settings at the given iteration count. Use [`EquitySimulator`]
/// directly for seeding, thread caps, or cancellation.
///
/// # Arguments
/// * `players` - One slot per player (at least 2): known hole cards,
///   or `None` for a hand dealt randomly each iteration
/// * `board` - Known community cards (0-5)
/// * `iterations` - Number of deals to simulate
///
/// # Returns
/// One [`PlayerEquity`] per slot, in input order.
pub fn simulate_equity(
    players: &[Option<HoleCards>],
    board: &Board,
    iterations: u64,
) -> Result<Vec<PlayerEquity>, EngineError> {
    let config = SimConfig::default().with_iterations(iterations);
    let report = EquitySimulator::new(config).simulate(players, board)?;
    Ok(report.players)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_validates_input() {
        let one = vec![Card::from_str("As").unwrap()];
        assert_eq!(classify(&one).unwrap_err(), EngineError::EmptyHand(1));

        let dupes = vec![Card::from_str("As").unwrap(), Card::from_str("As").unwrap()];
        assert!(matches!(
            classify(&dupes).unwrap_err(),
            EngineError::InvalidCardSet(_)
        ));
    }

    #[test]
    fn test_classify_and_estimate() {
        let hole = HoleCards::from_str("Ah9h").unwrap();
        let board = Board::from_str("Kh7h2d").unwrap();
        let report = classify_and_estimate(hole, &board).unwrap();
        assert_eq!(report.category, HandCategory::HighCard);
        assert_eq!(report.outs, 15);
        assert!(report.combined_odds > report.turn_odds);
    }

    #[test]
    fn test_classify_and_estimate_rejects_duplicates() {
        let hole = HoleCards::from_str("AhKh").unwrap();
        let board = Board::from_str("Ah7h2d").unwrap();
        assert!(matches!(
            classify_and_estimate(hole, &board).unwrap_err(),
            EngineError::InvalidCardSet(_)
        ));
    }

    #[test]
    fn test_simulate_equity_boundary() {
        let players = vec![HoleCards::from_str("AsAh"), HoleCards::from_str("2c7d")];
        let equity = simulate_equity(&players, &Board::new(), 2_000).unwrap();
        assert_eq!(equity.len(), 2);
        assert!(equity[0].win_probability > equity[1].win_probability);
    }

    #[test]
    fn test_reports_serialize() {
        let hole = HoleCards::from_str("AsAd").unwrap();
        let report = classify_and_estimate(hole, &Board::new()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: HandReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
