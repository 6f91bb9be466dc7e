//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use aoc2020_input::{AocClient, InputCache, InputProvider, SessionToken};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Resolved runtime configuration
pub struct Config {
    pub year: u16,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Variant filter (None = all variants)
    pub variant_filter: Option<String>,
    /// Tags every selected solver must carry
    pub tags: Vec<String>,
    /// Input file overriding the provider
    pub input_file: Option<PathBuf>,
    /// Cache directory path, `~` expanded
    pub cache_dir: PathBuf,
    pub session_file: Option<PathBuf>,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".into())),
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            year: args.year,
            day_filter: args.day,
            part_filter: args.part,
            variant_filter: args.variant,
            tags: args.tags,
            input_file: args.input,
            cache_dir: expand_tilde(&args.cache_dir),
            session_file: args.session_file.as_deref().map(expand_tilde),
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }

    /// Provider over the cache directory, with the session if one is found
    ///
    /// A missing session is not an error yet: every input may already be cached.
    pub fn input_provider(&self) -> Result<InputProvider, CliError> {
        let provider =
            InputProvider::new(InputCache::new(&self.cache_dir)).with_client(AocClient::new()?);
        Ok(match SessionToken::discover(self.session_file.as_deref())? {
            Some(session) => provider.with_session(session),
            None => provider,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Prompt user for session token without echoing it
pub fn prompt_session(reason: &str) -> Result<SessionToken, CliError> {
    println!("{}", reason);
    let entered = Zeroizing::new(
        rpassword::prompt_password("Enter AOC session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {}", e)))?,
    );
    SessionToken::new(entered.as_str())
        .map_err(|_| CliError::Config("Session token is required.".to_string()))
}
