//! twenty CLI - Command-line front end for the twenty questions game
//!
//! Plays interactive rounds on stdin/stdout, prints the current decision
//! tree, or teaches the dataset a fact without playing.

mod config;
mod console;
mod session;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use twenty_engine::order::Shuffled;
use twenty_engine::{knowledge, CsvStore, DatasetStore};
use twenty_tree::build_tree;

use crate::config::Settings;
use crate::console::Console;
use crate::session::Game;

#[derive(Parser)]
#[command(name = "twenty")]
#[command(version)]
#[command(about = "A 20 Questions game that learns from the rounds it loses")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "twenty.toml")]
    config: PathBuf,

    /// Dataset table (overrides the config file)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Seed for guess order (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactive rounds (default)
    Play,

    /// Print the decision tree built from the dataset
    Tree,

    /// Record that an object has the given characteristics
    Teach {
        /// Object name
        object: String,

        /// Characteristics the object has
        #[arg(required = true)]
        characteristics: Vec<String>,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut settings = Settings::from_file_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(data) = cli.data {
        settings.data_path = data;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    debug!(?settings, "Resolved settings");

    let store = CsvStore::new(&settings.data_path);

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(&store, &settings),
        Commands::Tree => print_tree(&store),
        Commands::Teach {
            object,
            characteristics,
        } => teach(&store, &object, &characteristics),
    }
}

fn play(store: &CsvStore, settings: &Settings) -> Result<()> {
    let mut order = match settings.seed {
        Some(seed) => Shuffled::seeded(seed),
        None => Shuffled::from_entropy(),
    };
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let mut game = Game::new(store, settings.max_hints);
    game.run(&mut console, &mut order)
        .with_context(|| format!("playing with {}", store.path().display()))?;
    Ok(())
}

fn print_tree(store: &CsvStore) -> Result<()> {
    let dataset = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;
    let tree = build_tree(&dataset);

    println!(
        "{} objects, {} attributes, {} nodes",
        dataset.len(),
        dataset.attributes().len(),
        tree.len()
    );
    print!("{tree}");
    Ok(())
}

fn teach(store: &CsvStore, object: &str, characteristics: &[String]) -> Result<()> {
    let characteristics: Vec<&str> = characteristics
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    knowledge::update(store, object.trim(), &characteristics[..])
        .with_context(|| format!("updating {}", store.path().display()))?;

    println!(
        "I'll remember that {} has: {}",
        object.trim(),
        characteristics.join(", ")
    );
    Ok(())
}
