//! Benchmarks for the equity engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holdem_equity::{Board, Card, EquitySimulator, HandEvaluator, HoleCards, SimConfig};

fn cards_from_str(s: &str) -> Vec<Card> {
    s.split_whitespace()
        .map(|c| Card::from_str(c).unwrap())
        .collect()
}

fn classify_seven_benchmark(c: &mut Criterion) {
    let evaluator = HandEvaluator::new();
    let cards = cards_from_str("As Ks 9s 7s 2s Ah 3d");

    c.bench_function("classify_seven_cards", |b| {
        b.iter(|| evaluator.classify(black_box(&cards)))
    });
}

fn equity_1000_iterations_benchmark(c: &mut Criterion) {
    let players = vec![
        HoleCards::from_str("AsAh"),
        HoleCards::from_str("KdKc"),
        None,
    ];
    let board = Board::new();

    c.bench_function("equity_1000_iterations", |b| {
        b.iter(|| {
            let config = SimConfig::default().with_iterations(1_000).with_seed(42);
            EquitySimulator::new(config)
                .simulate(black_box(&players), black_box(&board))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    classify_seven_benchmark,
    equity_1000_iterations_benchmark
);
criterion_main!(benches);
