//! AOC HTTP client implementation

use crate::error::InputError;
use crate::session::SessionToken;
use reqwest::header::HeaderValue;
use zeroize::Zeroizing;

const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

/// Blocking client for downloading puzzle inputs
///
/// # Example
///
/// ```no_run
/// use aoc2020_input::{AocClient, SessionToken};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let session = SessionToken::new("your_session_cookie")?;
///
/// let input = client.get_input(2020, 1, &session)?;
/// println!("Input: {}", input);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
}

impl AocClient {
    /// Create a new AOC client with rustls-tls configuration and no redirect policy
    ///
    /// # Errors
    ///
    /// Returns `InputError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, InputError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the AOC client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc2020_input::AocClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Build the `Cookie` header, flagged sensitive so it is redacted from debug output
    fn create_cookie_header(session: &SessionToken) -> Result<HeaderValue, InputError> {
        let cookie_string = Zeroizing::new(format!("session={}", session.expose()));
        let mut header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| InputError::ClientInit("Invalid session cookie format".to_string()))?;
        header_value.set_sensitive(true);

        Ok(header_value)
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// Sends `GET {base}/{year}/day/{day}/input` with the session cookie.
    ///
    /// # Errors
    ///
    /// * `InputError::Request` - Network error
    /// * `InputError::InvalidStatus` - Any non-2xx status, including the redirect
    ///   sent when the session is not accepted and 404 for unreleased puzzles
    /// * `InputError::Encoding` - Response is not valid UTF-8
    pub fn get_input(
        &self,
        year: u16,
        day: u8,
        session: &SessionToken,
    ) -> Result<String, InputError> {
        let cookie_header = Self::create_cookie_header(session)?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| InputError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(&[&year.to_string(), "day", &day.to_string(), "input"]);

        tracing::info!(year, day, "fetching puzzle input");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::COOKIE, cookie_header)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(year, day, %status, "input request rejected");
            return Err(InputError::InvalidStatus { status });
        }

        let bytes = response.bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| InputError::Encoding)
    }
}

/// Builder for [`AocClient`]
///
/// The redirect policy is always forced to `Policy::none()`, so a rejected
/// session shows up as a 3xx status instead of the login page's HTML.
///
/// # Example
///
/// ```no_run
/// use aoc2020_input::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, InputError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, ...)
    ///
    /// The redirect policy of `builder` is overridden.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    pub fn build(self) -> Result<AocClient, InputError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| InputError::ClientInit(e.to_string()))?,
        };

        let builder = self.client_builder.unwrap_or_else(|| {
            reqwest::blocking::Client::builder()
                .use_rustls_tls()
                .user_agent(concat!(
                    env!("CARGO_PKG_NAME"),
                    "/",
                    env!("CARGO_PKG_VERSION")
                ))
        });

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| InputError::ClientInit(e.to_string()))?;

        Ok(AocClient { client, base_url })
    }
}

impl Default for AocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
