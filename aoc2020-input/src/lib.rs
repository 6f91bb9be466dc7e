//! Puzzle input provider
//!
//! Downloads Advent of Code puzzle inputs with the user's session cookie and
//! keeps a copy on disk, so each input is fetched once per cache directory.
//!
//! - [`AocClient`]: blocking HTTP client (rustls, redirects disabled)
//! - [`SessionToken`]: the session cookie, zeroized on drop and redacted in `Debug`
//! - [`InputCache`]: `{root}/{year}/day{day:02}.txt`
//! - [`InputProvider`]: cache first, then fetch and store
//!
//! # Example
//!
//! ```no_run
//! use aoc2020_input::{AocClient, InputCache, InputProvider, SessionToken};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut provider = InputProvider::new(InputCache::new("/tmp/aoc2020"))
//!     .with_client(AocClient::new()?);
//! if let Some(session) = SessionToken::discover(None)? {
//!     provider.set_session(session);
//! }
//!
//! let input = provider.get(2020, 1)?;
//! println!("{} lines", input.lines().count());
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod error;
mod provider;
mod session;

pub use cache::InputCache;
pub use client::{AocClient, AocClientBuilder};
pub use error::InputError;
pub use provider::InputProvider;
pub use session::{SESSION_ENV_VAR, SESSION_FILE_NAME, SessionToken};
