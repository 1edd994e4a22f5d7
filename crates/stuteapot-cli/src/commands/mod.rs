pub mod check;
pub mod init;
pub mod score;
pub mod summary;
pub mod validate;

use clap::ValueEnum;

/// Output format for `score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScoreFormat {
    Text,
    Json,
    #[value(alias = "md")]
    Markdown,
}

/// Output format for `summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    Text,
    Json,
}
