//! Multi-player equity simulation.
//!
//! The simulator estimates each player's showdown win/tie probability
//! by repeatedly dealing out the unknown cards and comparing the
//! resulting hands. Iterations are embarrassingly parallel; the module
//! fans them out over worker chunks with independent RNG streams and
//! merges per-chunk tallies at the end.

pub mod config;
pub mod simulator;

pub use config::SimConfig;
pub use simulator::{EquitySimulator, PlayerEquity, SimJob, SimReport};
