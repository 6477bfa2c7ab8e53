mod board;
mod provider;
mod quiz;
mod speech;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use recite_core::{Deck, clamp_overdue, run_refresh, run_review};
use recite_store::{Config, DeckStore};

use crate::board::{print_mastered, print_review_summary, print_status};
use crate::provider::ChainProvider;
use crate::quiz::TerminalQuiz;
use crate::speech::Speech;

#[derive(Parser)]
#[command(name = "recite", about = "Spaced-recall vocabulary trainer")]
struct Cli {
    /// Override the data directory (default ~/.recite)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run today's review pass
    Review,

    /// Show the learning board
    Status,

    /// Import `term,translation` lines from a file
    Import {
        /// Input file path
        file: PathBuf,
    },

    /// List mastered words
    Mastered,

    /// Refresh a batch of mastered words
    Refresh,
}

fn open_store(cli: &Cli) -> Result<DeckStore> {
    let base_dir = cli.data_dir.clone().or_else(|| {
        std::env::var("RECITE_DATA_DIR")
            .ok()
            .map(PathBuf::from)
    });
    DeckStore::open(base_dir.as_deref()).context("failed to open deck store")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Review) => cmd_review(&cli),
        Some(Commands::Status) => cmd_status(&cli),
        Some(Commands::Import { file }) => cmd_import(&cli, file),
        Some(Commands::Mastered) => cmd_mastered(&cli),
        Some(Commands::Refresh) => cmd_refresh(&cli),
        None => run_menu(&cli),
    }
}

// ---------------------------------------------------------------------------
// Shared load ritual
// ---------------------------------------------------------------------------

/// Load the deck and normalize overdue dates to today. The derived
/// round counter is the minimum active round, never persisted.
fn load_deck(store: &DeckStore, today: NaiveDate) -> Result<(Deck, u32)> {
    let mut deck = store.load().context("failed to load deck")?;
    clamp_overdue(&mut deck.active, today);
    let current_round = deck.min_active_round();
    Ok((deck, current_round))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_review(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let config = Config::load(&store.config_path());
    let today = Local::now().date_naive();
    let (mut deck, current_round) = load_deck(&store, today)?;

    if deck.active.is_empty() {
        println!("no words in learning. import some with `recite import <file>`.");
        return Ok(());
    }

    let mut provider = ChainProvider::new(&config.provider, &store.examples_path());
    let due = recite_core::due_today(&deck.active, today, current_round);
    if due.is_empty() {
        println!("nothing due today. come back tomorrow!");
        return Ok(());
    }

    let mut quiz = TerminalQuiz::new(due.len(), Speech::new(config.tts_enabled));
    let report = run_review(
        &mut deck,
        today,
        current_round,
        &mut provider,
        &mut quiz,
        &mut |d: &Deck| store.save(d),
    )?;

    print_review_summary(&report, &deck);
    Ok(())
}

fn cmd_status(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let today = Local::now().date_naive();
    let (deck, _) = load_deck(&store, today)?;
    print_status(&deck, today);
    Ok(())
}

fn cmd_import(cli: &Cli, file: &std::path::Path) -> Result<()> {
    let store = open_store(cli)?;
    let today = Local::now().date_naive();
    let (mut deck, _) = load_deck(&store, today)?;

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let pairs: Vec<(String, String)> = content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (term, translation) = line.split_once(',')?;
            let (term, translation) = (term.trim(), translation.trim());
            if term.is_empty() || translation.is_empty() {
                return None;
            }
            Some((term.to_string(), translation.to_string()))
        })
        .collect();

    let total = pairs.len();
    let added = deck.add_items(pairs, today);
    store.save(&deck).context("failed to save deck")?;

    if added < total {
        println!("imported {added} new word(s), {} duplicate(s) skipped", total - added);
    } else {
        println!("imported {added} new word(s)");
    }
    Ok(())
}

fn cmd_mastered(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let today = Local::now().date_naive();
    let (deck, _) = load_deck(&store, today)?;
    print_mastered(&deck);
    Ok(())
}

fn cmd_refresh(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let config = Config::load(&store.config_path());
    let today = Local::now().date_naive();
    let (mut deck, _) = load_deck(&store, today)?;

    if deck.mastered.is_empty() {
        println!("no mastered words to refresh yet.");
        return Ok(());
    }

    let mut provider = ChainProvider::new(&config.provider, &store.examples_path());
    let batch = config.refresh_batch.min(deck.mastered.len());
    let mut quiz = TerminalQuiz::new(batch, Speech::new(config.tts_enabled));
    let report = run_refresh(
        &mut deck,
        config.refresh_batch,
        &mut provider,
        &mut quiz,
        &mut |d: &Deck| store.save(d),
    )?;

    println!();
    println!("refreshed: {} ({} recalled)", report.refreshed, report.passed);
    Ok(())
}

// ---------------------------------------------------------------------------
// Interactive menu
// ---------------------------------------------------------------------------

/// Read one line from stdin, locking only for the read so the quiz can
/// take its own reads from the same thread. `None` on EOF or error.
fn read_menu_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

/// A failed menu action is reported and the menu keeps running; only
/// quitting or EOF leaves the loop.
fn report(action: &str, result: Result<()>) {
    if let Err(e) = result {
        println!("{action} failed: {e:#}");
    }
}

fn run_menu(cli: &Cli) -> Result<()> {
    loop {
        println!();
        println!("=== recite ===");
        println!("1. review");
        println!("2. status");
        println!("3. import");
        println!("4. mastered");
        println!("5. refresh");
        println!("6. quit");
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = read_menu_line() else {
            break;
        };
        match line.trim() {
            "1" => report("review", cmd_review(cli)),
            "2" => report("status", cmd_status(cli)),
            "3" => {
                print!("file to import: ");
                io::stdout().flush()?;
                let Some(path) = read_menu_line() else {
                    break;
                };
                let path = path.trim();
                if path.is_empty() {
                    println!("no file given");
                } else {
                    report("import", cmd_import(cli, std::path::Path::new(path)));
                }
            }
            "4" => report("mastered", cmd_mastered(cli)),
            "5" => report("refresh", cmd_refresh(cli)),
            "6" | "q" => break,
            other => println!("unknown choice: {other}"),
        }
    }
    Ok(())
}
