//! Session cookie handling

use crate::error::InputError;
use std::fmt;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable checked first by [`SessionToken::discover`]
pub const SESSION_ENV_VAR: &str = "AOC_SESSION";

/// File name looked up in the working directory and next to the executable
pub const SESSION_FILE_NAME: &str = "COOKIE.txt";

/// The value of the `session` cookie, wiped from memory on drop
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Wrap a session value, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `InputError::EmptySession` when nothing is left after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, InputError> {
        let value = Zeroizing::new(value.into());
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptySession);
        }
        Ok(Self(Zeroizing::new(trimmed.to_string())))
    }

    /// Read a session value from a file
    ///
    /// Surrounding whitespace, usually a trailing newline, is trimmed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let contents =
            Zeroizing::new(
                std::fs::read_to_string(path).map_err(|source| InputError::SessionFile {
                    path: path.to_path_buf(),
                    source,
                })?,
            );
        Self::new(contents.as_str())
    }

    /// Find a session token in the usual places
    ///
    /// Checked in order: the `AOC_SESSION` environment variable, `explicit_file`,
    /// `COOKIE.txt` in the current directory, `COOKIE.txt` next to the executable.
    ///
    /// # Returns
    /// * `Ok(Some(token))` - A token was found
    /// * `Ok(None)` - No token anywhere and no explicit file was given
    /// * `Err(InputError)` - The explicit file is unreadable or a found token is empty
    pub fn discover(explicit_file: Option<&Path>) -> Result<Option<Self>, InputError> {
        let env_value = std::env::var(SESSION_ENV_VAR).ok().map(Zeroizing::new);

        let mut fallbacks = vec![PathBuf::from(SESSION_FILE_NAME)];
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            fallbacks.push(dir.join(SESSION_FILE_NAME));
        }

        Self::resolve(env_value.as_deref().map(String::as_str), explicit_file, &fallbacks)
    }

    fn resolve(
        env_value: Option<&str>,
        explicit_file: Option<&Path>,
        fallbacks: &[PathBuf],
    ) -> Result<Option<Self>, InputError> {
        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("using session from {}", SESSION_ENV_VAR);
            return Self::new(value).map(Some);
        }

        if let Some(path) = explicit_file {
            tracing::debug!(path = %path.display(), "using session file");
            return Self::from_file(path).map(Some);
        }

        for path in fallbacks {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "using session file");
                return Self::from_file(path).map(Some);
            }
        }

        Ok(None)
    }

    /// The raw cookie value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}
