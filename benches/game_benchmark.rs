//! Performance benchmarks for the mana simulation
//!
//! Measures full simulated games and small trial batches on
//! `test_decks/simic_ramp.json`. Build without default features to drop the
//! logging macros from the hot loop:
//!
//! ```text
//! cargo bench --no-default-features
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mtg_mana_sim::{
    game::{calculate_mana_availability, GameSimulation, KeyCards},
    loader::{DeckList, DeckLoader},
    trials::{run_trials, TrialOptions},
};
use std::path::PathBuf;

fn load_deck() -> DeckList {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_decks/simic_ramp.json");
    DeckLoader::load_from_file(&path).expect("benchmark deck should load")
}

fn bench_single_game(c: &mut Criterion) {
    let deck = load_deck();
    let library = deck.library();
    let key_cards: KeyCards = deck.resolve_key_cards(false).expect("key cards");
    let config = deck.simulation_config();

    let mut group = c.benchmark_group("single_game");
    for turns in [5u32, 10] {
        group.bench_with_input(BenchmarkId::new("turns", turns), &turns, |b, &turns| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                let mut game = GameSimulation::new(library.clone(), key_cards.clone(), seed).with_config(config.clone());
                let snapshots = game.run_turns(turns);
                black_box(calculate_mana_availability(&game.zones().battlefield).total);
                black_box(snapshots)
            });
        });
    }
    group.finish();
}

fn bench_trial_batch(c: &mut Criterion) {
    let deck = load_deck();
    let library = deck.library();
    let key_cards = deck.resolve_key_cards(false).expect("key cards");
    let config = deck.simulation_config();
    let options = TrialOptions {
        trials: 256,
        turns: 8,
        target_mana: 5,
        seed: Some(42),
    };

    c.bench_function("trial_batch_256", |b| {
        b.iter(|| black_box(run_trials(&library, &key_cards, &config, &options).expect("valid options")))
    });
}

criterion_group!(benches, bench_single_game, bench_trial_batch);
criterion_main!(benches);
