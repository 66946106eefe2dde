//! Error types for NetSuite API calls.
//!
//! Only failures that prevent an HTTP exchange from completing are errors.
//! A response that arrived with a non-2xx status is data: it is returned as a
//! [`Response`](crate::Response) and can be inspected through
//! [`Response::outcome`](crate::Response::outcome).

/// The main error type for NetSuite API calls.
///
/// # Examples
///
/// ```no_run
/// use netsuite_rest::{Client, Config, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new(Config::from_env()?)?;
///
/// match client.get("/customer/123").await {
///     Ok(response) if response.is_success() => println!("{}", response.body),
///     Ok(response) => eprintln!("NetSuite rejected the call: {}", response.body),
///     Err(Error::Timeout) => eprintln!("gave up waiting"),
///     Err(e) => eprintln!("transport failure: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection refused, DNS lookup failed,
    /// connection reset, etc.). No response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request timed out.
    ///
    /// Only possible when a timeout was supplied through
    /// [`RequestOptions::timeout`](crate::request::RequestOptions::timeout).
    #[error("Request timed out")]
    Timeout,

    /// Invalid configuration was provided.
    ///
    /// Covers invalid header names or values, missing environment variables,
    /// and failures building the underlying HTTP client.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// The target URL could not be parsed.
    ///
    /// A malformed account id or origin override shows up here.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The signing key was rejected by the MAC implementation.
    #[error("Failed to sign request: {0}")]
    Signing(String),
}

impl Error {
    /// Maps a transport error, separating timeouts from other network failures.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(err)
        }
    }

    /// Returns `true` if no response at all was received.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsuite_rest::Error;
    ///
    /// assert!(Error::Timeout.is_transport());
    /// assert!(!Error::ConfigurationError("bad header".to_string()).is_transport());
    /// ```
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout)
    }
}

/// A specialized `Result` type for NetSuite API calls.
pub type Result<T> = std::result::Result<T, Error>;
