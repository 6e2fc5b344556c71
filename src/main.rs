//! MTG Mana Sim - Main Binary
//!
//! Estimates how fast a deck's mana base develops by simulating many games

use anyhow::Context;
use clap::{Parser, Subcommand};
use mtg_mana_sim::{
    game::{ActionLog, GameMode, GameSimulation, VerbosityLevel},
    loader::{DeckList, DeckLoader},
    trials::{run_trials, TrialOptions},
};
use std::path::{Path, PathBuf};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "manasim")]
#[command(about = "MTG Mana Sim - turn-by-turn mana base simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run many games and report per-turn averages
    Run {
        /// Deck file (.json)
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Number of games to simulate
        #[arg(long, default_value = "1000")]
        trials: usize,

        /// Turns per game
        #[arg(long, default_value = "10")]
        turns: u32,

        /// Mana count to report the probability of reaching
        #[arg(long, default_value = "5")]
        target_mana: usize,

        /// Master random seed for reproducible batches
        #[arg(long)]
        seed: Option<u64>,

        /// Multiplayer (commander) rules for crowd lands
        #[arg(long)]
        commander: bool,

        /// Don't cast ramp spells
        #[arg(long)]
        no_ramp: bool,

        /// Never cast this ramp spell (repeatable)
        #[arg(long, value_name = "NAME")]
        disable_ramp: Vec<String>,

        /// Fail if a key card isn't in the deck
        #[arg(long)]
        strict: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play one game and print every action
    Game {
        /// Deck file (.json)
        #[arg(value_name = "DECK")]
        deck: PathBuf,

        /// Turns to play
        #[arg(long, default_value = "8")]
        turns: u32,

        /// Random seed for the shuffle
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Multiplayer (commander) rules for crowd lands
        #[arg(long)]
        commander: bool,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            deck,
            trials,
            turns,
            target_mana,
            seed,
            commander,
            no_ramp,
            disable_ramp,
            strict,
            json,
        } => {
            let deck_list = load_deck(&deck)?;
            let key_cards = deck_list.resolve_key_cards(strict)?;
            let mut config = deck_list.simulation_config();
            if commander {
                config.mode = GameMode::Commander;
            }
            if no_ramp {
                config.include_ramp_spells = false;
            }
            config.disabled_ramp_spells.extend(disable_ramp);

            let options = TrialOptions {
                trials,
                turns,
                target_mana,
                seed,
            };
            let summary = run_trials(&deck_list.library(), &key_cards, &config, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!("=== {} ({} cards, {} lands) ===", deck_list.name, deck_list.total_cards(), deck_list.land_count());
            println!("{} trials, seed {}\n", summary.trials, summary.seed);
            println!("{:>4} {:>7} {:>7} {:>8} {:>7} {:>7}", "turn", "lands", "mana", "P(>=M)", "life", "damage");
            for stats in &summary.turns {
                println!(
                    "{:>4} {:>7.2} {:>7.2} {:>7.1}% {:>7.2} {:>7.2}",
                    stats.turn,
                    stats.avg_lands,
                    stats.avg_mana,
                    stats.target_probability * 100.0,
                    stats.avg_life_lost,
                    stats.avg_damage
                );
            }
            match summary.turn_reaching(0.5) {
                Some(turn) => println!("\n{} mana reached in half the games by turn {}", target_mana, turn),
                None => println!("\n{} mana not reached in half the games within {} turns", target_mana, turns),
            }
        }

        Commands::Game {
            deck,
            turns,
            seed,
            commander,
            verbosity,
        } => {
            let deck_list = load_deck(&deck)?;
            let key_cards = deck_list.resolve_key_cards(false)?;
            let mut config = deck_list.simulation_config();
            if commander {
                config.mode = GameMode::Commander;
            }

            let mut game = GameSimulation::new(deck_list.library(), key_cards, seed)
                .with_config(config)
                .with_log(ActionLog::with_verbosity(verbosity.into()));
            game.run_turns(turns);
        }
    }

    Ok(())
}

fn load_deck(path: &Path) -> anyhow::Result<DeckList> {
    DeckLoader::load_from_file(path).with_context(|| format!("failed to load deck {}", path.display()))
}
