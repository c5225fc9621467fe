use anyhow::Context;
use clap::Parser;
use meal_subscriptions::console::DEFAULT_ATTEMPTS;
use meal_subscriptions::{
    Console, ConsoleConfig, DuplicatePolicy, ManagerConfig, Seed, SubscriptionManager,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Food company meal subscription desk.
#[derive(Debug, Parser)]
#[command(name = "meal-subscriptions", version, about)]
struct Cli {
    /// Seed file with subscribers and meals (roster text, or .json)
    #[arg(short, long, default_value = "input_data.txt")]
    seed: PathBuf,

    /// File apology letters are written to when the session ends
    #[arg(short, long, default_value = "letters.txt")]
    letters: PathBuf,

    /// Max distinct meal types per subscriber (0 = unlimited)
    #[arg(long, default_value_t = 3)]
    max_meals: usize,

    /// Refuse to top up an existing subscription instead of merging
    #[arg(long)]
    reject_duplicates: bool,

    /// Tries per prompt before an operation is abandoned
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS as u64, value_parser = clap::value_parser!(u64).range(1..))]
    attempts: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "meal_subscriptions=debug"
    } else {
        "meal_subscriptions=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    tracing::debug!(?cli, "Starting subscription desk");

    let seed = Seed::load(&cli.seed)
        .with_context(|| format!("failed to load seed file {}", cli.seed.display()))?;

    let config = ManagerConfig {
        max_meals_per_subscriber: (cli.max_meals > 0).then_some(cli.max_meals),
        duplicate_policy: if cli.reject_duplicates {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::Merge
        },
    };
    let manager = SubscriptionManager::from_seed(seed, config).context("invalid seed data")?;

    let console_config = ConsoleConfig {
        attempts: cli.attempts as usize,
        letters_path: Some(cli.letters),
    };
    let stdin = io::stdin();
    let mut console = Console::new(manager, stdin.lock(), io::stdout(), console_config);
    console.run().context("console session failed")?;

    Ok(())
}
