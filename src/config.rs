//! Account credentials for token-based authentication.

use crate::{Error, Result};
use std::fmt;

/// Environment variable holding the account id.
pub const ENV_ACCOUNT_ID: &str = "NETSUITE_ACCOUNT_ID";
/// Environment variable holding the integration's consumer key.
pub const ENV_CONSUMER_KEY: &str = "NETSUITE_CONSUMER_KEY";
/// Environment variable holding the integration's consumer secret.
pub const ENV_CONSUMER_SECRET: &str = "NETSUITE_CONSUMER_SECRET";
/// Environment variable holding the access token id.
pub const ENV_TOKEN: &str = "NETSUITE_TOKEN";
/// Environment variable holding the access token secret.
pub const ENV_TOKEN_SECRET: &str = "NETSUITE_TOKEN_SECRET";

/// The five credential fields every signed request is built from.
///
/// Values are stored verbatim; nothing is validated. A malformed account id
/// surfaces later as [`Error::InvalidUrl`] or as a rejected signature.
///
/// # Examples
///
/// ```
/// use netsuite_rest::Config;
///
/// let config = Config::new("1234567_SB1", "ck", "cs", "tk", "ts");
/// assert_eq!(config.account_path(), "1234567-sb1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Account id, also sent as the OAuth `realm`.
    pub account_id: String,
    /// Consumer key of the integration record.
    pub consumer_key: String,
    /// Consumer secret of the integration record.
    pub consumer_secret: String,
    /// Access token id.
    pub token: String,
    /// Access token secret.
    pub token_secret: String,
}

impl Config {
    /// Creates a config from the five credential values.
    pub fn new(
        account_id: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }

    /// Reads the credentials from the `NETSUITE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] naming the first variable that is
    /// unset or not valid unicode.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key).ok_or_else(|| {
                Error::ConfigurationError(format!("Missing environment variable {}", key))
            })
        };

        Ok(Self {
            account_id: read(ENV_ACCOUNT_ID)?,
            consumer_key: read(ENV_CONSUMER_KEY)?,
            consumer_secret: read(ENV_CONSUMER_SECRET)?,
            token: read(ENV_TOKEN)?,
            token_secret: read(ENV_TOKEN_SECRET)?,
        })
    }

    /// Returns the host label used in every API origin.
    ///
    /// The account id is lower-cased and only its first underscore becomes a
    /// hyphen, so sandbox ids like `1234567_SB1` map to `1234567-sb1`.
    pub fn account_path(&self) -> String {
        self.account_id.to_lowercase().replacen('_', "-", 1)
    }

    /// Default origin of the record and SuiteQL APIs.
    pub fn suitetalk_origin(&self) -> String {
        format!("https://{}.suitetalk.api.netsuite.com", self.account_path())
    }

    /// Default origin of the RESTlet API.
    pub fn restlet_origin(&self) -> String {
        format!("https://{}.restlets.api.netsuite.com", self.account_path())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("account_id", &self.account_id)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
