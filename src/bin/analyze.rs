//! Hand analysis binary.
//!
//! Classifies a hand, reports outs and improvement odds, and runs a
//! Monte Carlo equity simulation for the table.
//!
//! Usage:
//!   cargo run --release --bin analyze -- [OPTIONS]
//!
//! Options:
//!   --hand <CARDS>       Add a player with known hole cards (repeatable), e.g. AhAs
//!   --random             Add a player with unknown hole cards (repeatable)
//!   --board <CARDS>      Community cards, e.g. 7h8h9h
//!   --iterations <N>     Simulation iterations (default: 5000)
//!   --threads <N>        Worker threads (default: auto)
//!   --seed <N>           Random seed (optional)
//!   --scenario <FILE>    Load the scenario from a JSON file instead
//!
//! Scenario file format:
//!   { "players": ["AhAs", "??", "KdKc"], "board": "7h8h9h",
//!     "iterations": 20000, "seed": 42 }

use std::env;
use std::fs;
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use holdem_equity::{
    classify_and_estimate, Board, EquitySimulator, HoleCards, SimConfig,
};

/// A table scenario loaded from flags or a JSON file.
#[derive(Debug, Deserialize)]
struct Scenario {
    /// Hole cards per player; "" or "??" marks an unknown hand.
    players: Vec<String>,
    #[serde(default)]
    board: String,
    #[serde(default)]
    iterations: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    threads: Option<usize>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut players: Vec<String> = Vec::new();
    let mut board_str = String::new();
    let mut iterations: u64 = 5_000;
    let mut threads: Option<usize> = None;
    let mut seed: Option<u64> = None;
    let mut scenario_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--hand" | "-h" => {
                i += 1;
                if i < args.len() {
                    players.push(args[i].clone());
                }
            }
            "--random" | "-r" => {
                players.push(String::new());
            }
            "--board" | "-b" => {
                i += 1;
                if i < args.len() {
                    board_str = args[i].clone();
                }
            }
            "--iterations" | "-i" => {
                i += 1;
                if i < args.len() {
                    iterations = args[i].parse().unwrap_or(5_000);
                }
            }
            "--threads" | "-t" => {
                i += 1;
                if i < args.len() {
                    threads = args[i].parse().ok();
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--scenario" => {
                i += 1;
                if i < args.len() {
                    scenario_file = Some(args[i].clone());
                }
            }
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    if let Some(path) = scenario_file {
        let scenario = load_scenario(&path);
        players = scenario.players;
        board_str = scenario.board;
        if let Some(n) = scenario.iterations {
            iterations = n;
        }
        if scenario.seed.is_some() {
            seed = scenario.seed;
        }
        if scenario.threads.is_some() {
            threads = scenario.threads;
        }
    }

    if players.is_empty() {
        eprintln!("No players given. Use --hand / --random or --scenario <FILE>.");
        process::exit(1);
    }

    let board = match Board::from_str(&board_str) {
        Some(board) => board,
        None => {
            eprintln!("Error parsing board '{}'", board_str);
            process::exit(1);
        }
    };

    let slots: Vec<Option<HoleCards>> = players
        .iter()
        .map(|s| parse_slot(s))
        .collect();

    println!("=== Hold'em Hand Analyzer ===\n");
    println!(
        "Board: {}",
        if board.is_empty() {
            "(preflop)".to_string()
        } else {
            board.to_string()
        }
    );
    for (idx, slot) in slots.iter().enumerate() {
        match slot {
            Some(hole) => println!("Player {}: {}", idx + 1, hole),
            None => println!("Player {}: (random)", idx + 1),
        }
    }
    println!();

    // Outs & odds view for each known hand.
    for (idx, hole) in slots.iter().enumerate() {
        let Some(hole) = hole else { continue };
        match classify_and_estimate(*hole, &board) {
            Ok(report) => {
                println!(
                    "Player {} holds: {} {:?}",
                    idx + 1,
                    report.category.name(),
                    report.tiebreakers
                );
                if board.len() < 5 {
                    println!(
                        "  Outs: {}  turn {:.1}%  river {:.1}%  combined {:.1}%",
                        report.outs,
                        report.turn_odds * 100.0,
                        report.river_odds * 100.0,
                        report.combined_odds * 100.0
                    );
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
    println!();

    if slots.len() < 2 {
        return;
    }

    // Equity view: run in batches so the bar moves.
    println!("Simulating {} deals...", iterations);
    let start = Instant::now();

    let pb = ProgressBar::new(iterations);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("##-"),
    );

    let batch_size = (iterations / 50).max(1_000).min(iterations);
    let mut done: u64 = 0;
    let mut win_sums = vec![0.0f64; slots.len()];
    let mut tie_sums = vec![0.0f64; slots.len()];

    while done < iterations {
        let batch = batch_size.min(iterations - done);
        let mut config = SimConfig::default().with_iterations(batch);
        if let Some(base) = seed {
            config = config.with_seed(base.wrapping_add(done));
        }
        if let Some(n) = threads {
            config = config.with_threads(n);
        }

        let report = match EquitySimulator::new(config).simulate(&slots, &board) {
            Ok(report) => report,
            Err(e) => {
                pb.finish_and_clear();
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };

        for (idx, equity) in report.players.iter().enumerate() {
            win_sums[idx] += equity.win_probability * batch as f64;
            tie_sums[idx] += equity.tie_probability * batch as f64;
        }
        done += batch;
        pb.set_position(done);
    }
    pb.finish_and_clear();

    let elapsed = start.elapsed().as_secs_f64();

    println!("\nResults:");
    for (idx, slot) in slots.iter().enumerate() {
        let label = match slot {
            Some(hole) => hole.to_string(),
            None => "random".to_string(),
        };
        println!(
            "  Player {} ({:>6}): win {:>6.2}%  tie {:>5.2}%",
            idx + 1,
            label,
            win_sums[idx] / done as f64 * 100.0,
            tie_sums[idx] / done as f64 * 100.0
        );
    }
    println!(
        "\nSimulated {} deals in {:.2}s ({:.0} deals/sec)",
        done,
        elapsed,
        done as f64 / elapsed.max(1e-9)
    );
}

/// Parse one player slot; empty or "??" means an unknown hand.
fn parse_slot(s: &str) -> Option<HoleCards> {
    if s.is_empty() || s == "??" || s.eq_ignore_ascii_case("random") {
        return None;
    }
    match HoleCards::from_str(s) {
        Some(hole) => Some(hole),
        None => {
            eprintln!("Error parsing hand '{}'", s);
            process::exit(1);
        }
    }
}

fn load_scenario(path: &str) -> Scenario {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading scenario file '{}': {}", path, e);
            process::exit(1);
        }
    };
    match serde_json::from_str(&contents) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error parsing scenario file '{}': {}", path, e);
            process::exit(1);
        }
    }
}
