//! Opening Trainer CLI
//!
//! # Commands
//!
//! - `opening-trainer train` - drill a repertoire in the terminal
//! - `opening-trainer catalog` - list the trainings of the catalog
//! - `opening-trainer achievements list|delete|clear` - manage achievements
//!
//! # Usage
//!
//! ```bash
//! # Default training of the White catalog
//! opening-trainer train
//!
//! # A PGN file, playing Black, deterministic replies
//! opening-trainer train --pgn lines/caro-kann.pgn --black --seed 7
//!
//! # Achievements, fastest first
//! opening-trainer achievements list --sort time --order asc
//! ```
//!
//! Logging goes to stderr; `RUST_LOG` overrides the default filter.

use anyhow::{bail, Context, Result};
use chess_rules::{ShakmatyRules, Side};
use clap::{Args, Parser, Subcommand};
use opening_trainer::achievements::{
    sort_records, AchievementRecorder, AchievementStore, JsonFileStore, SortColumn, SortDirection,
};
use opening_trainer::core::TrainerSettings;
use opening_trainer::repertoire::{Repertoire, TrainingCatalog};
use opening_trainer::training::{
    Collaborators, HintOutcome, MoveAttempt, RandomPicker, SessionController, SessionOptions,
};
use opening_trainer::ui::{parse_command, BoardSurface, Command, MessageKind, TerminalSurface};
use std::io::Stdout;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

type TerminalSession = SessionController<ShakmatyRules, TerminalSurface<Stdout>>;

/// Chess opening trainer
#[derive(Parser)]
#[command(name = "opening-trainer")]
#[command(about = "Drill memorized chess opening lines")]
#[command(version)]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Achievements file (defaults to the user data directory)
    #[arg(long, global = true)]
    achievements: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drill a repertoire
    Train(TrainArgs),

    /// List the trainings of the catalog
    Catalog(CatalogArgs),

    /// Manage recorded achievements
    Achievements {
        #[command(subcommand)]
        action: AchievementsAction,
    },
}

#[derive(Args)]
struct TrainArgs {
    /// PGN file to train instead of a catalog entry
    #[arg(long)]
    pgn: Option<PathBuf>,

    /// Catalog training to load, by name
    #[arg(long)]
    training: Option<String>,

    #[command(flatten)]
    catalog: CatalogArgs,

    /// Computer reply delay in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for the computer's reply choice
    #[arg(long)]
    seed: Option<u64>,

    /// Save the side and delay as new defaults
    #[arg(long)]
    remember: bool,
}

#[derive(Args)]
struct CatalogArgs {
    /// Play Black
    #[arg(long)]
    black: bool,

    /// Catalog file (defaults to the configured catalog for the side)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum AchievementsAction {
    /// Show all achievements
    List {
        /// date, name or time
        #[arg(long, default_value = "date")]
        sort: SortColumn,

        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: SortDirection,
    },

    /// Delete the achievement with the given index (as shown by `list`)
    Delete { index: usize },

    /// Delete every achievement
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = TrainerSettings::load();
    if let Some(path) = cli.achievements {
        settings.achievements_file = Some(path);
    }
    let store = match &settings.achievements_file {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location(),
    };

    match cli.command {
        Commands::Train(args) => train(args, settings, store),
        Commands::Catalog(args) => list_catalog(args, settings),
        Commands::Achievements { action } => manage_achievements(action, store),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "opening_trainer=debug,chess_rules=debug"
    } else {
        "opening_trainer=info,chess_rules=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn apply_side(settings: &mut TrainerSettings, args: &CatalogArgs) {
    if args.black {
        settings.learner_side = Side::Black;
    }
}

fn open_catalog(settings: &TrainerSettings, args: &CatalogArgs) -> Result<TrainingCatalog> {
    let path = args
        .catalog
        .clone()
        .unwrap_or_else(|| settings.catalog_for_side().to_path_buf());
    TrainingCatalog::load(&path).with_context(|| format!("Failed to load catalog {:?}", path))
}

fn list_catalog(args: CatalogArgs, mut settings: TrainerSettings) -> Result<()> {
    apply_side(&mut settings, &args);
    let catalog = open_catalog(&settings, &args)?;
    for category in catalog.categories() {
        println!("{}", category.label);
        for option in &category.options {
            println!("  {:<32} {}", option.name, option.file.display());
        }
    }
    Ok(())
}

fn train(args: TrainArgs, mut settings: TrainerSettings, store: JsonFileStore) -> Result<()> {
    apply_side(&mut settings, &args.catalog);
    if let Some(delay) = args.delay_ms {
        settings.reply_delay_ms = delay;
    }
    if args.remember {
        settings.save();
    }

    let catalog = match &args.pgn {
        Some(_) => None,
        None => Some(open_catalog(&settings, &args.catalog)?),
    };
    let repertoire = match (&args.pgn, &catalog) {
        (Some(path), _) => Repertoire::from_file(path)
            .with_context(|| format!("Failed to load repertoire {:?}", path))?,
        (None, Some(catalog)) => {
            let option = match &args.training {
                Some(name) => catalog
                    .find(name)
                    .with_context(|| format!("No training named '{}' in the catalog", name))?,
                None => catalog
                    .default_entry()
                    .context("The catalog has no trainings")?,
            };
            option
                .load()
                .with_context(|| format!("Failed to load training '{}'", option.name))?
        }
        (None, None) => bail!("Nothing to train"),
    };

    let picker = match args.seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::new(),
    };
    let collaborators =
        Collaborators::new(AchievementRecorder::new(Box::new(store))).with_picker(picker);
    let options = SessionOptions::from_settings(&settings);
    let surface = TerminalSurface::stdout(options.learner);

    println!("Training '{}'. Type 'help' for commands.", repertoire.name());
    let session = SessionController::new(
        repertoire,
        ShakmatyRules::new(),
        surface,
        collaborators,
        options,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start the runtime")?;
    runtime.block_on(run_session(session, catalog))
}

/// Sleep until `deadline`, or forever without one
async fn reply_due(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

async fn run_session(mut session: TerminalSession, catalog: Option<TrainingCatalog>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = session.next_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                if !handle_line(&mut session, catalog.as_ref(), &line) {
                    break;
                }
            }
            _ = reply_due(deadline) => {
                if let Err(e) = session.poll() {
                    error!("[SESSION] Computer reply failed: {}", e);
                    session.surface_mut().show_message(&e.to_string(), MessageKind::Error);
                }
            }
        }
    }
    info!("[SESSION] Leaving after {} attempt(s)", session.stats().attempts);
    Ok(())
}

/// Run one input line; `false` to quit
fn handle_line(session: &mut TerminalSession, catalog: Option<&TrainingCatalog>, line: &str) -> bool {
    let command = match parse_command(line) {
        Ok(Some(command)) => command,
        Ok(None) => return true,
        Err(e) => {
            session.surface_mut().show_message(&e.to_string(), MessageKind::Error);
            return true;
        }
    };

    match command {
        Command::Move(from, to) => {
            if let MoveAttempt::Rejected(reason) = session.on_move_attempt(from, to) {
                session
                    .surface_mut()
                    .show_message(&format!("Move rejected: {:?}", reason), MessageKind::Error);
            }
        }
        Command::Select(square) => {
            session.on_square_select(square);
        }
        Command::Hint => match session.request_hint() {
            HintOutcome::Unavailable => session
                .surface_mut()
                .show_message("No hint available.", MessageKind::Info),
            HintOutcome::AlreadyRevealed => session
                .surface_mut()
                .show_message("The full hint is already shown.", MessageKind::Info),
            HintOutcome::PieceRevealed(_) | HintOutcome::SquareRevealed(_) => {}
        },
        Command::Show => match session.reveal_remainder() {
            Ok(true) => {}
            Ok(false) => session
                .surface_mut()
                .show_message("Nothing left to show.", MessageKind::Info),
            Err(e) => {
                error!("[SESSION] Failed to reveal the line: {}", e);
                session.surface_mut().show_message(&e.to_string(), MessageKind::Error);
            }
        },
        Command::Board => {
            let timer = session.timer_display();
            let surface = session.surface_mut();
            surface.render();
            surface.show_timer(&timer);
        }
        Command::Reset => session.reset(),
        Command::Stats => {
            let view = session.stats().view();
            session.surface_mut().show_stats(&view);
        }
        Command::Load(name) => match catalog.and_then(|c| c.find(&name)) {
            Some(option) => match option.load() {
                Ok(repertoire) => session.load_repertoire(repertoire),
                Err(e) => {
                    warn!("[CATALOG] Failed to load '{}': {}", option.name, e);
                    session.surface_mut().show_message(&e.to_string(), MessageKind::Error);
                }
            },
            None => session
                .surface_mut()
                .show_message(&format!("No training named '{}'.", name), MessageKind::Error),
        },
        Command::Help => println!("{}", opening_trainer::ui::command::HELP),
        Command::Quit => return false,
    }
    true
}

fn manage_achievements(action: AchievementsAction, mut store: JsonFileStore) -> Result<()> {
    match action {
        AchievementsAction::List { sort, order } => {
            let stored = store.list().context("Failed to read achievements")?;
            if stored.is_empty() {
                println!("No achievements yet.");
                return Ok(());
            }
            let mut sorted = stored.clone();
            sort_records(&mut sorted, sort, order);
            println!("{:>3}  {:<20} {:<32} {}", "#", "Date", "Opening", "Time");
            for record in &sorted {
                let index = stored.iter().position(|r| r.same_key(record)).unwrap_or(0);
                println!(
                    "{:>3}  {:<20} {:<32} {}",
                    index,
                    record.display_date(),
                    record.name,
                    record.time
                );
            }
        }
        AchievementsAction::Delete { index } => {
            let removed = store.delete(index).context("Failed to delete achievement")?;
            println!("Deleted '{}' ({}).", removed.name, removed.display_date());
        }
        AchievementsAction::Clear => {
            store.clear().context("Failed to clear achievements")?;
            println!("All achievements deleted.");
        }
    }
    Ok(())
}
