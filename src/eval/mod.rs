//! Hand evaluation: classification, comparison, and outs estimation.
//!
//! The classifier assigns any 2-7 card set its best category and a
//! tiebreaker vector; the two together form a total order over hands.
//! The outs estimator builds on the classifier to count upgrade cards
//! and convert them into turn/river hit probabilities.

pub mod category;
pub mod classify;
pub mod outs;

pub use category::HandCategory;
pub use classify::{EvaluatedHand, HandEvaluator};
pub use outs::{estimate_odds, OddsReport};
