//! Monte Carlo equity simulation.
//!
//! Each iteration deals a fresh completion of the scenario (board
//! first, then hole cards for the unknown slots, in player order),
//! classifies every player's seven cards, and credits the winner set.
//! Iterations are independent, so the work is partitioned into chunks
//! processed in parallel; every chunk owns a distinctly seeded RNG and
//! a local tally, and the tallies merge additively at the end.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use crate::cards::{Board, Card, Deck, HoleCards};
use crate::error::EngineError;
use crate::eval::{EvaluatedHand, HandEvaluator};

/// Iterations per worker chunk. Small enough to keep cancellation
/// responsive, large enough to amortize RNG setup.
const CHUNK_SIZE: u64 = 256;

/// Seed stride between chunks (the splitmix64 increment), so chunk
/// RNG streams start far apart.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Estimated showdown equity for one player slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerEquity {
    /// Fraction of simulated deals this player won outright.
    pub win_probability: f64,
    /// Fraction of simulated deals this player tied for best hand.
    pub tie_probability: f64,
}

/// Result of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    /// Per-player equity, in input slot order.
    pub players: Vec<PlayerEquity>,
    /// Iterations actually completed (less than requested only when
    /// the run was cancelled).
    pub iterations_run: u64,
    /// Wall-clock time spent simulating.
    pub elapsed_seconds: f64,
    /// Whether the run was cancelled before finishing.
    pub cancelled: bool,
}

/// Win/tie counters accumulated by one worker chunk.
struct ChunkTally {
    iterations: u64,
    wins: Vec<u64>,
    ties: Vec<u64>,
}

impl ChunkTally {
    fn empty(num_players: usize) -> Self {
        Self {
            iterations: 0,
            wins: vec![0; num_players],
            ties: vec![0; num_players],
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.iterations += other.iterations;
        for (w, o) in self.wins.iter_mut().zip(other.wins.iter()) {
            *w += o;
        }
        for (t, o) in self.ties.iter_mut().zip(other.ties.iter()) {
            *t += o;
        }
        self
    }
}

/// The Monte Carlo equity simulator.
///
/// # Example
/// ```
/// use holdem_equity::{Board, EquitySimulator, HoleCards, SimConfig};
///
/// let players = vec![
///     HoleCards::from_str("AsAh"),
///     None, // unknown hand, dealt randomly each iteration
/// ];
/// let board = Board::new();
/// let config = SimConfig::default().with_iterations(2_000).with_seed(42);
/// let report = EquitySimulator::new(config).simulate(&players, &board).unwrap();
/// assert!(report.players[0].win_probability > 0.7);
/// ```
pub struct EquitySimulator {
    config: SimConfig,
}

impl EquitySimulator {
    /// Create a simulator with the given configuration.
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Get the simulator's configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run a full simulation.
    ///
    /// # Arguments
    /// * `players` - One slot per player: known hole cards, or `None`
    ///   for a hand dealt randomly each iteration
    /// * `board` - Known community cards (0-5)
    ///
    /// # Returns
    /// Per-player win/tie probabilities in input order, or a typed
    /// error if the scenario is malformed. Validation runs before any
    /// dealing; no partial results are produced on error.
    pub fn simulate(
        &self,
        players: &[Option<HoleCards>],
        board: &Board,
    ) -> Result<SimReport, EngineError> {
        let cancel = AtomicBool::new(false);
        self.simulate_with_cancel(players, board, &cancel)
    }

    /// Run a simulation that can be abandoned mid-flight.
    ///
    /// Workers observe `cancel` between chunks; a cancelled run returns
    /// the tally of whatever chunks completed, with `cancelled` set and
    /// probabilities computed over the iterations actually run. This
    /// lets a caller re-triggering on input changes drop a stale run
    /// without blocking on it.
    pub fn simulate_with_cancel(
        &self,
        players: &[Option<HoleCards>],
        board: &Board,
        cancel: &AtomicBool,
    ) -> Result<SimReport, EngineError> {
        self.config.validate()?;
        let dead = validate_scenario(players, board)?;
        let start = Instant::now();

        let base_seed = match self.config.seed {
            Some(seed) => seed,
            None => rand::random(),
        };

        let tally = match self.config.num_threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
                pool.install(|| self.run_chunks(players, board, &dead, base_seed, cancel))?
            }
            None => self.run_chunks(players, board, &dead, base_seed, cancel)?,
        };

        let iterations_run = tally.iterations;
        let divisor = iterations_run.max(1) as f64;
        let equities = tally
            .wins
            .iter()
            .zip(tally.ties.iter())
            .map(|(&wins, &ties)| PlayerEquity {
                win_probability: wins as f64 / divisor,
                tie_probability: ties as f64 / divisor,
            })
            .collect();

        Ok(SimReport {
            players: equities,
            iterations_run,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            cancelled: iterations_run < self.config.iterations,
        })
    }

    /// Fan the iteration count out over parallel chunks and merge the
    /// chunk tallies.
    fn run_chunks(
        &self,
        players: &[Option<HoleCards>],
        board: &Board,
        dead: &[Card],
        base_seed: u64,
        cancel: &AtomicBool,
    ) -> Result<ChunkTally, EngineError> {
        let num_players = players.len();
        let iterations = self.config.iterations;
        let num_chunks = iterations.div_ceil(CHUNK_SIZE);

        (0..num_chunks)
            .into_par_iter()
            .map(|chunk| {
                if cancel.load(Ordering::Relaxed) {
                    return Ok(ChunkTally::empty(num_players));
                }
                let count = CHUNK_SIZE.min(iterations - chunk * CHUNK_SIZE);
                // Chunk seeds depend only on the chunk index, keeping a
                // seeded run reproducible under any thread schedule.
                let seed = base_seed.wrapping_add(chunk.wrapping_mul(SEED_STRIDE));
                let mut rng = StdRng::seed_from_u64(seed);
                run_deals(players, board, dead, count, &mut rng)
            })
            .try_reduce(|| ChunkTally::empty(num_players), |a, b| Ok(a.merge(b)))
    }
}

/// Simulate `count` deals with one RNG, tallying wins and ties.
fn run_deals(
    players: &[Option<HoleCards>],
    board: &Board,
    dead: &[Card],
    count: u64,
    rng: &mut StdRng,
) -> Result<ChunkTally, EngineError> {
    let num_players = players.len();
    let evaluator = HandEvaluator::new();
    let mut tally = ChunkTally::empty(num_players);
    let mut hands: Vec<EvaluatedHand> = Vec::with_capacity(num_players);
    let mut cards = Vec::with_capacity(7);

    for _ in 0..count {
        let mut deck = Deck::without(dead);
        deck.shuffle(rng);

        let mut full_board = board.cards().to_vec();
        while full_board.len() < 5 {
            full_board.push(next_card(&mut deck)?);
        }

        hands.clear();
        for slot in players {
            let hole = match slot {
                Some(hole) => *hole,
                None => {
                    let c1 = next_card(&mut deck)?;
                    let c2 = next_card(&mut deck)?;
                    HoleCards::new(c1, c2)
                }
            };
            cards.clear();
            cards.extend_from_slice(&hole.cards());
            cards.extend_from_slice(&full_board);
            hands.push(evaluator.classify(&cards));
        }

        let mut best = 0;
        for i in 1..num_players {
            if hands[i] > hands[best] {
                best = i;
            }
        }
        let winners: Vec<usize> = (0..num_players).filter(|&i| hands[i] == hands[best]).collect();
        if winners.len() == 1 {
            tally.wins[winners[0]] += 1;
        } else {
            for i in winners {
                tally.ties[i] += 1;
            }
        }
        tally.iterations += 1;
    }

    Ok(tally)
}

fn next_card(deck: &mut Deck) -> Result<Card, EngineError> {
    deck.deal().ok_or(EngineError::ExhaustedDeck {
        requested: 1,
        available: 0,
    })
}

/// Check the scenario and collect the dead cards.
///
/// Validation order: player count, duplicate cards, deck demand. The
/// first duplicate encountered is the one reported.
fn validate_scenario(
    players: &[Option<HoleCards>],
    board: &Board,
) -> Result<Vec<Card>, EngineError> {
    if players.len() < 2 {
        return Err(EngineError::InsufficientPlayers(players.len()));
    }

    let mut seen: FxHashSet<Card> = FxHashSet::default();
    let mut dead = Vec::with_capacity(2 * players.len() + board.len());
    let known = players.iter().flatten().flat_map(|hole| hole.cards());
    for card in known.chain(board.cards().iter().copied()) {
        if !seen.insert(card) {
            return Err(EngineError::InvalidCardSet(card));
        }
        dead.push(card);
    }

    if board.len() > 5 {
        return Err(EngineError::ExhaustedDeck {
            requested: board.len(),
            available: 5,
        });
    }

    let unknown = players.iter().filter(|slot| slot.is_none()).count();
    let needed = (5 - board.len()) + 2 * unknown;
    let available = 52 - dead.len();
    if needed > available {
        return Err(EngineError::ExhaustedDeck {
            requested: needed,
            available,
        });
    }

    Ok(dead)
}

/// A simulation running on a background thread.
///
/// `spawn` fires the run, `cancel` abandons it, and `join` delivers
/// the report; the caller's control flow never blocks in between.
///
/// # Example
/// ```no_run
/// use holdem_equity::{Board, HoleCards, SimConfig, SimJob};
///
/// let players = vec![HoleCards::from_str("AsAh"), None];
/// let job = SimJob::spawn(players, Board::new(), SimConfig::default());
/// // ... do other work, or job.cancel() if the inputs changed ...
/// let report = job.join().unwrap();
/// ```
pub struct SimJob {
    handle: thread::JoinHandle<Result<SimReport, EngineError>>,
    cancel: Arc<AtomicBool>,
}

impl SimJob {
    /// Start a simulation on a background thread.
    pub fn spawn(players: Vec<Option<HoleCards>>, board: Board, config: SimConfig) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let handle = thread::spawn(move || {
            EquitySimulator::new(config).simulate_with_cancel(&players, &board, &flag)
        });
        Self { handle, cancel }
    }

    /// Ask the running simulation to stop after its current chunks.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Check whether the background thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the simulation and take its result.
    pub fn join(self) -> Result<SimReport, EngineError> {
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(specs: &[&str]) -> Vec<Option<HoleCards>> {
        specs
            .iter()
            .map(|s| {
                if s.is_empty() {
                    None
                } else {
                    Some(HoleCards::from_str(s).unwrap())
                }
            })
            .collect()
    }

    fn simulate(
        specs: &[&str],
        board: &str,
        iterations: u64,
        seed: u64,
    ) -> Result<SimReport, EngineError> {
        let config = SimConfig::default()
            .with_iterations(iterations)
            .with_seed(seed);
        EquitySimulator::new(config).simulate(&players(specs), &Board::from_str(board).unwrap())
    }

    #[test]
    fn test_rejects_single_player() {
        let result = simulate(&["AsAh"], "", 100, 1);
        assert_eq!(result.unwrap_err(), EngineError::InsufficientPlayers(1));
    }

    #[test]
    fn test_rejects_duplicate_across_players() {
        let result = simulate(&["AsAh", "AsKd"], "", 100, 1);
        assert_eq!(
            result.unwrap_err(),
            EngineError::InvalidCardSet(Card::from_str("As").unwrap())
        );
    }

    #[test]
    fn test_rejects_duplicate_between_hand_and_board() {
        let result = simulate(&["AsAh", "KdKc"], "As7h2c", 100, 1);
        assert_eq!(
            result.unwrap_err(),
            EngineError::InvalidCardSet(Card::from_str("As").unwrap())
        );
    }

    #[test]
    fn test_rejects_oversized_board() {
        let board = Board::from_cards((0..6u8).map(Card::from_id).collect());
        let config = SimConfig::default().with_iterations(100).with_seed(1);
        let result = EquitySimulator::new(config).simulate(&players(&["AsAh", "KdKc"]), &board);
        assert!(matches!(
            result.unwrap_err(),
            EngineError::ExhaustedDeck { .. }
        ));
    }

    #[test]
    fn test_rejects_impossible_deal() {
        // 24 unknown hands plus a full board completion need 53 cards.
        let slots: Vec<Option<HoleCards>> = vec![None; 24];
        let config = SimConfig::default().with_iterations(100).with_seed(1);
        let result = EquitySimulator::new(config).simulate(&slots, &Board::new());
        assert!(matches!(
            result.unwrap_err(),
            EngineError::ExhaustedDeck { .. }
        ));
    }

    #[test]
    fn test_pocket_aces_crush_junk() {
        // Known benchmark: AA vs 72o preflop is roughly 87% to win.
        let report = simulate(&["AsAh", "2c7d"], "", 20_000, 42).unwrap();
        let aces = report.players[0];
        let junk = report.players[1];
        assert!(
            aces.win_probability > 0.80,
            "aces win {} should be > 0.80",
            aces.win_probability
        );
        assert!(aces.win_probability + junk.win_probability <= 1.0 + 1e-9);
        assert_eq!(report.iterations_run, 20_000);
        assert!(!report.cancelled);
    }

    #[test]
    fn test_mirrored_hands_split_evenly() {
        let report = simulate(&["AcKc", "AdKd"], "", 20_000, 7).unwrap();
        let p1 = report.players[0];
        let p2 = report.players[1];
        assert!(
            (p1.win_probability - p2.win_probability).abs() < 0.03,
            "mirrored hands should split: {} vs {}",
            p1.win_probability,
            p2.win_probability
        );
        assert!(p1.tie_probability > 0.0);
        // Each player's win rate sits near half of the non-tied deals.
        let expected = (1.0 - p1.tie_probability) / 2.0;
        assert!((p1.win_probability - expected).abs() < 0.03);
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let a = simulate(&["AsAh", "KdKc"], "7h8h9h", 5_000, 123).unwrap();
        let b = simulate(&["AsAh", "KdKc"], "7h8h9h", 5_000, 123).unwrap();
        assert_eq!(a.players, b.players);
        assert_eq!(a.iterations_run, b.iterations_run);
    }

    #[test]
    fn test_estimates_converge_with_more_iterations() {
        let spread = |iterations: u64| {
            let estimates: Vec<f64> = (1..=4)
                .map(|seed| {
                    simulate(&["AsAh", "KdKc"], "", iterations, seed)
                        .unwrap()
                        .players[0]
                        .win_probability
                })
                .collect();
            let max = estimates.iter().cloned().fold(f64::MIN, f64::max);
            let min = estimates.iter().cloned().fold(f64::MAX, f64::min);
            max - min
        };

        let coarse = spread(50);
        let fine = spread(20_000);
        assert!(
            fine < coarse,
            "spread should shrink: {} at 50 iters vs {} at 20k",
            coarse,
            fine
        );
        assert!(fine < 0.03, "spread at 20k iterations was {}", fine);
    }

    #[test]
    fn test_unknown_hands_share_equity() {
        let report = simulate(&["", "", ""], "", 3_000, 9).unwrap();
        for equity in &report.players {
            assert!(
                equity.win_probability > 0.25 && equity.win_probability < 0.42,
                "three random hands should each win about a third: {}",
                equity.win_probability
            );
        }
    }

    #[test]
    fn test_single_known_hand_is_not_special() {
        let report = simulate(&["AsAh", ""], "", 5_000, 11).unwrap();
        assert!(report.players[0].win_probability > 0.7);
        assert!(report.players[1].win_probability < 0.3);
    }

    #[test]
    fn test_cancelled_before_start_runs_nothing() {
        let cancel = AtomicBool::new(true);
        let config = SimConfig::default().with_iterations(10_000).with_seed(1);
        let report = EquitySimulator::new(config)
            .simulate_with_cancel(&players(&["AsAh", "KdKc"]), &Board::new(), &cancel)
            .unwrap();
        assert!(report.cancelled);
        assert_eq!(report.iterations_run, 0);
        assert_eq!(report.players[0].win_probability, 0.0);
        assert_eq!(report.players[0].tie_probability, 0.0);
    }

    #[test]
    fn test_thread_cap_matches_default_pool() {
        let base = SimConfig::default().with_iterations(2_000).with_seed(5);
        let capped = base.clone().with_threads(2);
        let a = EquitySimulator::new(base)
            .simulate(&players(&["AsAh", "KdKc"]), &Board::new())
            .unwrap();
        let b = EquitySimulator::new(capped)
            .simulate(&players(&["AsAh", "KdKc"]), &Board::new())
            .unwrap();
        assert_eq!(a.players, b.players);
    }

    #[test]
    fn test_background_job() {
        let config = SimConfig::default().with_iterations(1_000).with_seed(3);
        let job = SimJob::spawn(players(&["AsAh", "KdKc"]), Board::new(), config);
        let report = job.join().unwrap();
        assert_eq!(report.players.len(), 2);
        assert_eq!(report.iterations_run, 1_000);
    }

    #[test]
    fn test_job_cancellation() {
        let config = SimConfig::default().with_iterations(10_000_000).with_seed(3);
        let job = SimJob::spawn(players(&["AsAh", "KdKc"]), Board::new(), config);
        job.cancel();
        let report = job.join().unwrap();
        assert!(report.iterations_run <= 10_000_000);
    }
}
