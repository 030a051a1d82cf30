use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use brainbattle::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "brainbattle")]
#[command(about = "Brain Battle Academy - rewards and streaks for quiz sessions")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.brainbattle/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the progress database (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a completed game session and apply any rewards it earns
    Submit {
        /// Child the session belongs to
        #[arg(long)]
        user: String,

        /// Subject: maths, english, vr, or nvr
        #[arg(long)]
        subject: String,

        /// Which game produced the session
        #[arg(long)]
        game: String,

        /// Total questions asked
        #[arg(long)]
        total: u32,

        /// Questions answered correctly
        #[arg(long)]
        correct: u32,

        /// End time (RFC 3339); defaults to now
        #[arg(long)]
        ended: Option<String>,

        /// Session length in seconds
        #[arg(long, default_value_t = 0)]
        duration_secs: u64,

        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's progress summary
    Progress {
        #[arg(long)]
        user: String,
    },

    /// List a user's rewards and total earnings
    Rewards {
        #[arg(long)]
        user: String,

        /// Only the week containing this date (YYYY-MM-DD)
        #[arg(long)]
        week: Option<String>,
    },

    /// Show a user's daily play streak
    Streak {
        #[arg(long)]
        user: String,
    },

    /// Initialize a new config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    match cli.command {
        Commands::Submit {
            user,
            subject,
            game,
            total,
            correct,
            ended,
            duration_secs,
            json,
        } => {
            cli::submit::submit_command(
                &config,
                cli::submit::SubmitArgs {
                    user,
                    subject,
                    game,
                    total,
                    correct,
                    ended,
                    duration_secs,
                    json,
                },
            )?;
        }
        Commands::Progress { user } => {
            cli::progress::progress_command(&config, &user)?;
        }
        Commands::Rewards { user, week } => {
            cli::rewards::rewards_command(&config, &user, week)?;
        }
        Commands::Streak { user } => {
            cli::streak::streak_command(&config, &user)?;
        }
        Commands::Init { force } => {
            cli::init::init_command(cli.config.as_deref(), force)?;
        }
    }

    Ok(())
}
