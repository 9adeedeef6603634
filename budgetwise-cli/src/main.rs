use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod plans_cmd;
mod receipts_cmd;
mod state;

use budgetwise_core::SubscriptionTier;
use config::{Config, InitOutcome, config_path, init_config_at, load_config};
use plans_cmd::{PlansCommand, TrialCommand};
use receipts_cmd::ReceiptCommand;

#[derive(Parser, Debug)]
#[command(
    name = "budgetwise",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUDGETWISE_BUILD_INFO"), ")"),
    about = "BudgetWise receipts, plans and trials"
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse, import, summarize and export receipts
    Receipt {
        #[command(subcommand)]
        command: ReceiptCommand,
    },

    /// Subscription plans and feature access
    Plans {
        #[command(subcommand)]
        command: PlansCommand,
    },

    /// Free-trial status
    Trial {
        #[command(subcommand)]
        command: TrialCommand,
    },

    /// Manage ~/.budgetwise/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config
    Init {
        /// Starting plan tier (id or display name)
        #[arg(long)]
        tier: Option<SubscriptionTier>,

        /// Replace an existing config
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config()?;

    init_logging(cli.verbose, &cfg);

    match cli.command {
        Command::Receipt { command } => receipts_cmd::run(command, &cfg)?,
        Command::Plans { command } => plans_cmd::run_plans(command, &cfg)?,
        Command::Trial { command } => plans_cmd::run_trial(command, &cfg)?,
        Command::Config { command } => match command {
            ConfigCommand::Init { tier, force } => {
                let p = config_path()?;
                match init_config_at(&p, tier, force)? {
                    InitOutcome::Created => println!("Wrote {}", p.display()),
                    InitOutcome::Overwritten => println!("Replaced {}", p.display()),
                    InitOutcome::Kept => {
                        println!("Config already exists: {} (use --force to replace)", p.display())
                    }
                }
            }
            ConfigCommand::Show => {
                println!("# {}", config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

// Priority: RUST_LOG > --verbose > config logging.level
fn init_logging(verbose: bool, cfg: &Config) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&cfg.logging.level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();
}
