use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default glob pattern for archive files, matching the export tool's
/// `<run>_data_<chunk>.json` naming.
pub const DEFAULT_FILE_PATTERN: &str = "*_data_*.json";

/// Central configuration loaded from environment variables.
///
/// CLI flags override these; the .env file is loaded automatically at
/// startup via dotenvy.
pub struct Config {
    /// Directory holding the raw archive files (FILAMENT_DATA_DIR).
    pub data_dir: Option<PathBuf>,
    /// Glob-style pattern for archive file names (FILAMENT_FILE_PATTERN).
    pub file_pattern: String,
    /// Directory for buckets and edge lists (FILAMENT_OUTPUT_DIR).
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables. Only the data
    /// directory has no default — everything else falls back.
    pub fn load() -> Result<Self> {
        Ok(Self {
            data_dir: env::var("FILAMENT_DATA_DIR").ok().map(PathBuf::from),
            file_pattern: env::var("FILAMENT_FILE_PATTERN")
                .unwrap_or_else(|_| DEFAULT_FILE_PATTERN.to_string()),
            output_dir: env::var("FILAMENT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./output")),
        })
    }

    /// Resolve the data directory: the CLI flag wins, then the env var.
    pub fn require_data_dir(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| self.data_dir.clone()).ok_or_else(|| {
            anyhow::anyhow!(
                "No data directory given. Pass --data-dir or set FILAMENT_DATA_DIR\n\
                 in your environment or .env file."
            )
        })
    }
}
