//! OAuth 1.0a request signing (NetSuite token-based authentication).
//!
//! Every call gets a fresh nonce and timestamp, so a header is bound to a
//! single method + URL pair and is never reused.

use crate::{Config, Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::{distributions::Alphanumeric, Rng};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// Hash callback: takes the signature base string and the signing key and
/// returns the encoded digest.
pub type HashFn = fn(base_string: &str, key: &str) -> Result<String>;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";

const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// RFC 3986 unreserved characters are the only ones left unescaped.
const OAUTH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// HMAC-SHA256 of `base_string` under `key`, base64 encoded.
pub fn hmac_sha256_base64(base_string: &str, key: &str) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).map_err(|e| Error::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Produces `Authorization` header values for one set of credentials.
///
/// # Examples
///
/// ```
/// use netsuite_rest::{oauth::Signer, Config};
/// use http::Method;
/// use url::Url;
///
/// let config = Config::new("1234567_SB1", "ck", "cs", "tk", "ts");
/// let url = Url::parse("https://1234567-sb1.suitetalk.api.netsuite.com/services/rest/record/v1/customer/1").unwrap();
///
/// let header = Signer::new(&config).authorization_header(&Method::GET, &url).unwrap();
/// assert!(header.starts_with("OAuth realm=\"1234567_SB1\", "));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Signer<'a> {
    config: &'a Config,
    hash: HashFn,
}

impl<'a> Signer<'a> {
    /// Creates a signer using HMAC-SHA256.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            hash: hmac_sha256_base64,
        }
    }

    /// Computes a signed header for `method` and `url` with a fresh nonce and
    /// timestamp.
    pub fn authorization_header(&self, method: &Method, url: &Url) -> Result<String> {
        self.sign_with(method, url, &generate_nonce(), unix_timestamp())
    }

    /// Computes a signed header with a caller-chosen nonce and timestamp.
    pub(crate) fn sign_with(
        &self,
        method: &Method,
        url: &Url,
        nonce: &str,
        timestamp: u64,
    ) -> Result<String> {
        let timestamp = timestamp.to_string();
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.config.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.config.token.as_str()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let base_string = signature_base_string(method, url, &oauth_params);
        let key = format!(
            "{}&{}",
            encode(&self.config.consumer_secret),
            encode(&self.config.token_secret)
        );
        let signature = (self.hash)(&base_string, &key)?;

        oauth_params.push(("oauth_signature", signature.as_str()));
        oauth_params.sort();

        let params = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "OAuth realm=\"{}\", {}",
            encode(&self.config.account_id),
            params
        ))
    }
}

/// Builds `METHOD&enc(base_url)&enc(normalized_params)`.
///
/// URL query parameters take part in the signature; the realm does not.
fn signature_base_string(method: &Method, url: &Url, oauth_params: &[(&str, &str)]) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    params.sort();

    let normalized = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        encode(&base_url(url)),
        encode(&normalized)
    )
}

/// Scheme, authority and path, without query or fragment.
fn base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE).to_string()
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
