//! Per-call request descriptors.
//!
//! Each operation on [`Client`](crate::Client) takes one of these values. They
//! live for a single call and carry everything that varies per request: the
//! path or script, method, JSON body and transport options.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Characters left unescaped in SuiteQL URL parameters.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Default RESTlet deployment id.
pub const DEFAULT_DEPLOY_ID: &str = "1";

fn to_json<T: Serialize>(body: &T) -> crate::Result<Value> {
    serde_json::to_value(body).map_err(|e| crate::Error::SerializationFailed(e.to_string()))
}

/// Transport options applied after the client's own settings.
///
/// Headers set here replace headers the client would send, including
/// `Authorization` and `Prefer`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers for this request.
    pub headers: HeaderMap,

    /// Timeout for this request. The client imposes none by default.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A call against the record API.
///
/// # Examples
///
/// ```
/// use netsuite_rest::request::RecordRequest;
/// use http::Method;
/// use serde_json::json;
///
/// let request = RecordRequest::new("/customer")
///     .with_method(Method::POST)
///     .with_json(json!({ "companyName": "Acme" }));
/// assert_eq!(request.path, "/customer");
/// ```
#[derive(Debug, Clone)]
pub struct RecordRequest {
    /// Path appended to `/services/rest/record/v1`, starting with `/`.
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
    pub options: RequestOptions,
}

impl RecordRequest {
    /// Creates a `GET` request for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::GET,
            body: None,
            options: RequestOptions::default(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`](crate::Error::SerializationFailed)
    /// if `body` cannot be represented as JSON.
    pub fn with_body<T: Serialize>(mut self, body: &T) -> crate::Result<Self> {
        self.body = Some(to_json(body)?);
        Ok(self)
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// A call against a deployed RESTlet script.
#[derive(Debug, Clone)]
pub struct RestletRequest {
    pub script_id: String,
    /// Deployment id, `"1"` unless set.
    pub deploy_id: String,
    pub method: Method,
    pub body: Option<Value>,
    pub options: RequestOptions,
}

impl RestletRequest {
    /// Creates a `GET` request for the first deployment of `script_id`.
    pub fn new(script_id: impl Into<String>) -> Self {
        Self {
            script_id: script_id.into(),
            deploy_id: DEFAULT_DEPLOY_ID.to_string(),
            method: Method::GET,
            body: None,
            options: RequestOptions::default(),
        }
    }

    pub fn with_deploy_id(mut self, deploy_id: impl Into<String>) -> Self {
        self.deploy_id = deploy_id.into();
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`](crate::Error::SerializationFailed)
    /// if `body` cannot be represented as JSON.
    pub fn with_body<T: Serialize>(mut self, body: &T) -> crate::Result<Self> {
        self.body = Some(to_json(body)?);
        Ok(self)
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// Options for a SuiteQL call.
///
/// Note the two kinds of "query" in a SuiteQL call: the SQL text passed to
/// [`Client::suiteql`](crate::Client::suiteql) becomes the `q` field of the
/// body, while [`SuiteqlOptions::query`] holds URL query-string parameters
/// such as `limit` and `offset`.
///
/// # Examples
///
/// ```
/// use netsuite_rest::request::SuiteqlOptions;
///
/// let options = SuiteqlOptions::new()
///     .with_query_param("limit", "10")
///     .with_query_param("offset", "0");
/// assert_eq!(options.query.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SuiteqlOptions {
    /// URL query-string parameters, sent in insertion order.
    pub query: Vec<(String, String)>,
    pub transport: RequestOptions,
}

impl SuiteqlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL query-string parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds multiple URL query-string parameters.
    pub fn with_query_params(
        mut self,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.query.extend(params);
        self
    }

    pub fn with_options(mut self, transport: RequestOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Encoded query string without the leading `?`, or `None` when empty.
    pub(crate) fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }

        let encoded = self
            .query
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_ENCODE),
                    utf8_percent_encode(v, QUERY_ENCODE)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        Some(encoded)
    }
}
