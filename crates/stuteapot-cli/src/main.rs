//! stuteapot CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::{ScoreFormat, SummaryFormat};

#[derive(Parser)]
#[command(
    name = "stuteapot",
    version,
    about = "Learning-style questionnaire scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one set of questionnaire answers
    Score {
        /// JSON file mapping field names to answers
        #[arg(long)]
        responses: PathBuf,

        /// Instrument TOML file (overrides the config)
        #[arg(long)]
        instrument: Option<PathBuf>,

        /// Reject answers outside the Likert range
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = ScoreFormat::Text)]
        format: ScoreFormat,

        /// Append the scored submission to the configured store
        #[arg(long)]
        save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that a submission answers every required item
    Check {
        /// JSON file mapping field names to answers
        #[arg(long)]
        responses: PathBuf,
    },

    /// Validate instrument TOML files
    Validate {
        /// Path to instrument file or directory
        #[arg(long)]
        instrument: PathBuf,
    },

    /// Summarize all stored submissions
    Summary {
        /// Output format
        #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
        format: SummaryFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config, instrument, and sample responses
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stuteapot=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            responses,
            instrument,
            strict,
            format,
            save,
            config,
        } => commands::score::execute(responses, instrument, strict, format, save, config).await,
        Commands::Check { responses } => commands::check::execute(responses),
        Commands::Validate { instrument } => commands::validate::execute(instrument),
        Commands::Summary { format, config } => commands::summary::execute(format, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
