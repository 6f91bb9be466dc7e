//! Error types for the input provider

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or caching puzzle inputs
#[derive(Error, Debug)]
pub enum InputError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid HTTP status code received
    ///
    /// Redirects land here too: the site redirects to the login page when the
    /// session is not accepted.
    #[error("Invalid HTTP status: {status}")]
    InvalidStatus {
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// Failed to decode response as UTF-8
    #[error("Failed to decode response as UTF-8")]
    Encoding,

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),

    /// The session file could not be read
    #[error("Failed to read session file {}: {source}", path.display())]
    SessionFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The session file or value was empty after trimming
    #[error("Session token is empty")]
    EmptySession,

    /// Input is not cached and there is no session to fetch it with
    #[error("No session token available to fetch input for {year} day {day}")]
    MissingSession { year: u16, day: u8 },

    /// A cached input exists but could not be read
    #[error("Failed to read cached input {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an input to the cache failed
    #[error("Failed to write cached input {}: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
