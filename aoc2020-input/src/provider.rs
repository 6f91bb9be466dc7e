//! Cache-or-fetch access to puzzle inputs

use crate::cache::InputCache;
use crate::client::AocClient;
use crate::error::InputError;
use crate::session::SessionToken;

/// Returns puzzle inputs from the cache, downloading and caching them on a miss
///
/// # Example
///
/// ```no_run
/// use aoc2020_input::{AocClient, InputCache, InputProvider, SessionToken};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = InputProvider::new(InputCache::new("inputs"))
///     .with_client(AocClient::new()?)
///     .with_session(SessionToken::from_file("COOKIE.txt")?);
///
/// let input = provider.get(2020, 1)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InputProvider {
    cache: InputCache,
    client: Option<AocClient>,
    session: Option<SessionToken>,
}

impl InputProvider {
    /// A provider that only reads the cache until a client and session are added
    pub fn new(cache: InputCache) -> Self {
        Self {
            cache,
            client: None,
            session: None,
        }
    }

    pub fn with_client(mut self, client: AocClient) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_session(mut self, session: SessionToken) -> Self {
        self.session = Some(session);
        self
    }

    pub fn set_session(&mut self, session: SessionToken) {
        self.session = Some(session);
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn cache(&self) -> &InputCache {
        &self.cache
    }

    pub fn is_cached(&self, year: u16, day: u8) -> bool {
        self.cache.contains(year, day)
    }

    /// Puzzle input as text
    ///
    /// A failed cache write after a successful download is logged and ignored.
    ///
    /// # Errors
    ///
    /// * `InputError::MissingSession` - Not cached, and no client or session to fetch with
    /// * `InputError::CacheRead` - The cached file could not be read
    /// * Any error from [`AocClient::get_input`]
    pub fn get(&self, year: u16, day: u8) -> Result<String, InputError> {
        if let Some(input) = self.cache.get(year, day)? {
            tracing::debug!(year, day, "input cache hit");
            return Ok(input);
        }

        let (Some(client), Some(session)) = (&self.client, &self.session) else {
            return Err(InputError::MissingSession { year, day });
        };

        let input = client.get_input(year, day, session)?;
        match self.cache.put(year, day, &input) {
            Ok(path) => tracing::debug!(year, day, path = %path.display(), "cached input"),
            Err(e) => tracing::warn!(year, day, error = %e, "failed to cache input"),
        }
        Ok(input)
    }

    /// Puzzle input as raw bytes
    pub fn get_bytes(&self, year: u16, day: u8) -> Result<Vec<u8>, InputError> {
        self.get(year, day).map(String::into_bytes)
    }
}
