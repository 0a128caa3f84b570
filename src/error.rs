//! Error types for the equity engine.
//!
//! All variants are caller input errors: they are detected synchronously
//! before any dealing or evaluation starts, and none of them is retried
//! internally. No partial results are produced on error.

use crate::cards::Card;

/// Errors reported by the engine's entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The same physical card was assigned twice across hole cards and board.
    InvalidCardSet(Card),
    /// The simulator needs at least two player slots.
    InsufficientPlayers(usize),
    /// The scenario asks for more cards than the deck can supply.
    ExhaustedDeck {
        /// Cards the scenario would need to deal.
        requested: usize,
        /// Cards actually available.
        available: usize,
    },
    /// Classification needs at least two cards.
    EmptyHand(usize),
    /// A configuration value is out of range.
    InvalidConfig(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidCardSet(card) => {
                write!(f, "Card {} is assigned more than once", card)
            }
            EngineError::InsufficientPlayers(count) => {
                write!(f, "Need at least 2 players, got {}", count)
            }
            EngineError::ExhaustedDeck {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Scenario needs {} cards but only {} are available",
                    requested, available
                )
            }
            EngineError::EmptyHand(count) => {
                write!(f, "Need at least 2 cards to classify, got {}", count)
            }
            EngineError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    #[test]
    fn test_display_messages() {
        let card = Card::from_str("As").unwrap();
        let err = EngineError::InvalidCardSet(card);
        assert!(err.to_string().contains("As"));

        let err = EngineError::InsufficientPlayers(1);
        assert!(err.to_string().contains("1"));

        let err = EngineError::ExhaustedDeck {
            requested: 53,
            available: 52,
        };
        assert!(err.to_string().contains("53"));
        assert!(err.to_string().contains("52"));
    }
}
