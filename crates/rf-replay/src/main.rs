//! ReelForge Fixture Replay
//!
//! Usage:
//!   rf-replay run                 - Print canonical outcomes, one JSON per line
//!   rf-replay run --pretty        - Same, pretty-printed
//!   rf-replay snapshot            - Print the recovery snapshot after the pack
//!   rf-replay snapshot --grid     - Also print the recovered final grid
//!
//! Logs go to stderr (`RUST_LOG` or `--verbose`), outcomes to stdout.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use rf_ingest::{
    AdapterConfig, AdapterRegistry, FixturePack, ReplayError, ReplayMode, ReplayRunner,
};
use rf_outcome::{CanonicalOutcome, Grid, RoundContext, SymbolId};
use rf_state::{PersistentStoreManager, recover};

#[derive(Parser)]
#[command(
    name = "rf-replay",
    about = "Replay recorded backend payloads through the outcome pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize every fixture and print the canonical outcomes
    Run {
        #[command(flatten)]
        pack: PackArgs,

        /// Pretty-print each outcome
        #[arg(short, long)]
        pretty: bool,
    },
    /// Feed every outcome to the feature stores and print the recovery snapshot
    Snapshot {
        #[command(flatten)]
        pack: PackArgs,

        /// Symbol painted over sticky positions (default: config metadata.sticky_symbol)
        #[arg(long)]
        sticky_symbol: Option<SymbolId>,

        /// Recover a fresh store manager from the snapshot and print the final grid
        #[arg(long)]
        grid: bool,

        /// Pretty-print the snapshot
        #[arg(short, long)]
        pretty: bool,
    },
}

#[derive(Args)]
struct PackArgs {
    /// Fixture pack (JSON array of raw payloads)
    #[arg(short, long, default_value = "fixtures/reference_pack.json")]
    fixtures: PathBuf,

    /// Adapter config (TOML)
    #[arg(short, long, default_value = "fixtures/sticky_cascade.toml")]
    config: PathBuf,

    /// Game id for fixtures without a context override (default: first game id in config)
    #[arg(short, long)]
    game_id: Option<String>,

    /// Currency override for fixtures without a context override
    #[arg(long)]
    currency: Option<String>,

    /// Wrap to the first fixture instead of stopping after the last
    #[arg(long)]
    cycle: bool,

    /// Number of outcomes to serve (default: one pass over the pack)
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { pack, pretty } => run(&pack, pretty),
        Commands::Snapshot {
            pack,
            sticky_symbol,
            grid,
            pretty,
        } => snapshot(&pack, sticky_symbol, grid, pretty),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════════════

struct Session {
    config: AdapterConfig,
    runner: ReplayRunner,
    count: usize,
}

fn open_session(args: &PackArgs) -> Result<Session> {
    let toml = fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read adapter config {}", args.config.display()))?;
    let config = AdapterConfig::from_toml(&toml)
        .with_context(|| format!("Invalid adapter config {}", args.config.display()))?;

    let game_id = match &args.game_id {
        Some(id) => id.clone(),
        None => config
            .game_ids
            .first()
            .cloned()
            .context("Adapter config lists no game ids")?,
    };
    let mut context = RoundContext::new(game_id);
    if let Some(currency) = &args.currency {
        context = context.with_currency(currency.as_str());
    }

    let mut registry = AdapterRegistry::new();
    registry.register_config(config.clone())?;

    let pack = FixturePack::from_path(&args.fixtures)?;
    let count = args.count.unwrap_or(pack.len());

    let mode = if args.cycle {
        ReplayMode::Cycle
    } else {
        ReplayMode::Once
    };
    let mut runner = ReplayRunner::new(registry, context).with_mode(mode);
    runner
        .load(pack)
        .with_context(|| format!("Cannot replay {}", args.fixtures.display()))?;

    Ok(Session {
        config,
        runner,
        count,
    })
}

/// Serve up to `count` outcomes. Fixtures that fail to normalize are logged
/// and skipped; the run fails afterwards if any did.
fn serve(
    session: &mut Session,
    mut on_outcome: impl FnMut(CanonicalOutcome) -> Result<()>,
) -> Result<()> {
    let mut failed = 0usize;

    for _ in 0..session.count {
        let position = session.runner.position();
        match session.runner.next() {
            Ok(outcome) => on_outcome(outcome)?,
            Err(ReplayError::Exhausted { served }) => {
                log::info!("Fixture pack exhausted after {} outcome(s)", served);
                break;
            }
            Err(ReplayError::Ingest(e)) => {
                log::warn!("Fixture #{} rejected [{}]: {}", position, e.code().as_str(), e);
                failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if failed > 0 {
        bail!("{} fixture(s) failed to normalize", failed);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

fn run(args: &PackArgs, pretty: bool) -> Result<()> {
    let mut session = open_session(args)?;

    serve(&mut session, |outcome| {
        let json = if pretty {
            outcome.to_json_pretty()?
        } else {
            outcome.to_json()?
        };
        println!("{}", json);
        Ok(())
    })
}

fn snapshot(
    args: &PackArgs,
    sticky_symbol: Option<SymbolId>,
    grid: bool,
    pretty: bool,
) -> Result<()> {
    let mut session = open_session(args)?;
    let sticky_symbol = sticky_symbol.or_else(|| configured_sticky_symbol(&session.config));

    let mut live = PersistentStoreManager::with_builtins();
    let mut last_grid: Option<Grid> = None;

    serve(&mut session, |outcome| {
        live.reset_all();
        live.apply_outcome(&outcome);
        last_grid = outcome.final_grid().cloned();
        Ok(())
    })?;

    let snapshot = live.serialize_all();
    let json = snapshot.to_json_string()?;
    if pretty {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", json);
    }

    if grid {
        let symbol = sticky_symbol
            .context("No sticky symbol: pass --sticky-symbol or set metadata.sticky_symbol")?;
        let last_grid = last_grid.context("No outcome was served, nothing to recover")?;

        let mut fresh = PersistentStoreManager::with_builtins();
        let recovered = recover(&mut fresh, &json, &last_grid, symbol)?;
        for row in &recovered {
            let cells: Vec<String> = row.iter().map(|s| format!("{:>3}", s)).collect();
            println!("{}", cells.join(""));
        }
    }
    Ok(())
}

fn configured_sticky_symbol(config: &AdapterConfig) -> Option<SymbolId> {
    config
        .metadata
        .get("sticky_symbol")
        .and_then(|v| v.as_u64())
        .and_then(|v| SymbolId::try_from(v).ok())
}
