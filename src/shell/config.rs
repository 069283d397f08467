use clap::{Args, Parser, Subcommand};

use crate::shared::infrastructure::tabular::{
    DEFAULT_EXPECTED_COLUMNS, DEFAULT_SIMILARITY_THRESHOLD, UploadSettings,
};

/// Climate finance tracker API.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending database migrations and exit
    Migrate(DatabaseOptions),
    /// Seed reference data and serve the HTTP API
    Serve(ServeOptions),
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseOptions {
    /// SQLite connection string.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://cfcgs_tracker.db")]
    pub database_url: String,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub database_max_connections: u32,
}

#[derive(Debug, Clone, Args)]
pub struct ServeOptions {
    #[command(flatten)]
    pub database: DatabaseOptions,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Comma separated columns every funds sheet must carry.
    #[arg(long, env = "EXPECTED_COLUMNS", default_value = DEFAULT_EXPECTED_COLUMNS)]
    pub expected_columns: String,

    /// Minimum header similarity (0-100) for a funds column to match.
    #[arg(
        long,
        env = "SIMILARITY_THRESHOLD",
        default_value_t = DEFAULT_SIMILARITY_THRESHOLD,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub similarity_threshold: u8,

    /// Largest accepted upload, in MiB.
    #[arg(long, env = "MAX_UPLOAD_MB", default_value_t = 100)]
    pub max_upload_mb: usize,
}

impl ServeOptions {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            expected_columns: comma_split(&self.expected_columns),
            similarity_threshold: self.similarity_threshold,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Splits on commas, trimming items and dropping empty ones.
pub fn comma_split(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
