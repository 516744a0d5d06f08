//! ScamShield - scam risk scoring for suspicious messages
//!
//! Scores pasted texts, emails, and call transcripts against a pattern
//! catalog, stores scrubbed reports, and serves the assessment API.

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use scamshield::Channel;

mod cli;

/// ScamShield - scam risk scoring engine
#[derive(Parser)]
#[command(name = "scamshield")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a message and print the risk breakdown
    Assess {
        /// Message text to assess
        text: Option<String>,

        /// Read the message from a file instead
        #[arg(short, long)]
        file: Option<std::path::PathBuf>,

        /// Caller phone number, if the message came from a call or text
        #[arg(long)]
        caller: Option<String>,

        /// Submission channel (sms, email, call, social, screenshot)
        #[arg(long, default_value = "unknown")]
        channel: Channel,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,

        /// Store the scrubbed report in the database
        #[arg(long)]
        save: bool,
    },

    /// Run the cheap three-bucket pre-filter
    QuickCheck {
        /// Message text to check
        text: String,
    },

    /// Redact PII from text without scoring it
    Scrub {
        /// Text to scrub
        text: String,
    },

    /// Inspect the pattern catalog
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },

    /// View recent stored reports
    Reports {
        /// Number of recent reports to show
        #[arg(short, long, default_value = "20")]
        tail: usize,
    },

    /// Show report statistics and category trends
    Stats {
        /// Trend window in days
        #[arg(short, long, default_value = "30")]
        days: u32,
    },

    /// Delete reports older than the retention window
    Cleanup,

    /// Start the assessment API server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum CategoriesAction {
    /// List all categories
    List,
    /// Show one category's patterns
    Show { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Setup logging
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli::resolve_config(args.config)?;

    match args.command {
        Commands::Assess {
            text,
            file,
            caller,
            channel,
            json,
            save,
        } => {
            cli::assess::run(
                &config,
                cli::assess::AssessArgs {
                    text,
                    file,
                    caller,
                    channel,
                    json,
                    save,
                },
            )
            .await?;
        }
        Commands::QuickCheck { text } => {
            cli::assess::quick(&config, &text).await?;
        }
        Commands::Scrub { text } => {
            cli::scrub::run(&text).await?;
        }
        Commands::Categories { action } => match action {
            CategoriesAction::List => cli::catalog::list(&config).await?,
            CategoriesAction::Show { name } => cli::catalog::show(&config, &name).await?,
        },
        Commands::Reports { tail } => {
            cli::reports::tail(&config, tail).await?;
        }
        Commands::Stats { days } => {
            cli::reports::stats(&config, days).await?;
        }
        Commands::Cleanup => {
            cli::reports::cleanup(&config).await?;
        }
        Commands::Serve { port } => {
            cli::serve::run(&config, port).await?;
        }
    }

    Ok(())
}
