//! Response wrapper for received HTTP responses.
//!
//! Every response that arrives, whatever its status, becomes a [`Response`].
//! The decoded JSON body is the primary payload; the status, headers, raw body
//! and latency are kept alongside for callers that need them.

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// A received HTTP response.
///
/// NetSuite reports failures as JSON error documents with a non-2xx status.
/// Those are returned here too, so check [`Response::is_success`] or match on
/// [`Response::outcome`] before trusting the body's shape.
///
/// # Examples
///
/// ```no_run
/// use netsuite_rest::{Client, Config, Outcome};
///
/// # async fn example() -> Result<(), netsuite_rest::Error> {
/// let client = Client::new(Config::from_env()?)?;
/// let response = client.get("/customer/123").await?;
///
/// match response.outcome() {
///     Outcome::Success(body) => println!("customer: {}", body),
///     Outcome::ApplicationError { status, body } => {
///         eprintln!("NetSuite said {}: {}", status, body["o:errorDetails"]);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The decoded body.
    ///
    /// `Value::Null` for an empty body, `Value::String` holding the raw text
    /// when the body is not JSON.
    pub body: Value,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the body was read.
    pub latency: Duration,
}

/// Tagged view of a [`Response`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx status.
    Success(Value),
    /// Non-2xx status with whatever body the server sent.
    ApplicationError { status: StatusCode, body: Value },
}

impl Response {
    pub fn new(
        body: Value,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
    ) -> Self {
        Self {
            body,
            raw_body,
            status,
            headers,
            latency,
        }
    }

    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Splits the response into success and application error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use netsuite_rest::{Outcome, Response};
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// use serde_json::json;
    ///
    /// let response = Response::new(
    ///     json!({ "title": "Not Found" }),
    ///     r#"{"title":"Not Found"}"#.to_string(),
    ///     StatusCode::NOT_FOUND,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(80),
    /// );
    ///
    /// assert_eq!(
    ///     response.outcome(),
    ///     Outcome::ApplicationError {
    ///         status: StatusCode::NOT_FOUND,
    ///         body: json!({ "title": "Not Found" }),
    ///     }
    /// );
    /// ```
    pub fn outcome(self) -> Outcome {
        if self.status.is_success() {
            Outcome::Success(self.body)
        } else {
            Outcome::ApplicationError {
                status: self.status,
                body: self.body,
            }
        }
    }

    /// Consumes the response, returning the decoded body.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Deserializes the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.body)
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Id of a record created or updated through the record API.
    ///
    /// NetSuite answers writes with `204 No Content` and a `Location` header
    /// ending in the record id.
    pub fn record_id(&self) -> Option<&str> {
        self.header("location")?
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
    }
}

impl AsRef<Value> for Response {
    fn as_ref(&self) -> &Value {
        &self.body
    }
}

impl std::ops::Deref for Response {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}

/// Decodes a raw body. Returns `None` when the body is not JSON.
pub(crate) fn decode_body(raw_body: &str) -> Option<Value> {
    if raw_body.trim().is_empty() {
        return Some(Value::Null);
    }
    serde_json::from_str(raw_body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde_json::json;

    fn response(status: StatusCode, body: Value) -> Response {
        Response::new(
            body.clone(),
            body.to_string(),
            status,
            HeaderMap::new(),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_outcome_success() {
        let response = response(StatusCode::OK, json!({ "id": "1" }));
        assert!(response.is_success());
        assert_eq!(response.outcome(), Outcome::Success(json!({ "id": "1" })));
    }

    #[test]
    fn test_outcome_application_error() {
        let body = json!({ "o:errorDetails": [{ "detail": "boom" }] });
        let response = response(StatusCode::INTERNAL_SERVER_ERROR, body.clone());
        assert!(!response.is_success());
        assert_eq!(
            response.outcome(),
            Outcome::ApplicationError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body,
            }
        );
    }

    #[test]
    fn test_json_and_deref() {
        #[derive(serde::Deserialize)]
        struct Customer {
            id: String,
        }

        let response = response(StatusCode::OK, json!({ "id": "42" }));
        assert_eq!(response["id"], "42");
        assert_eq!(response.json::<Customer>().unwrap().id, "42");
    }

    #[test]
    fn test_record_id_from_location() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "location",
            HeaderValue::from_static(
                "https://123.suitetalk.api.netsuite.com/services/rest/record/v1/customer/647",
            ),
        );
        let response = Response::new(
            Value::Null,
            String::new(),
            StatusCode::NO_CONTENT,
            headers,
            Duration::ZERO,
        );
        assert_eq!(response.record_id(), Some("647"));

        let response = response_without_location();
        assert_eq!(response.record_id(), None);
    }

    fn response_without_location() -> Response {
        response(StatusCode::NO_CONTENT, Value::Null)
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Some(Value::Null));
        assert_eq!(decode_body("  \n"), Some(Value::Null));
        assert_eq!(decode_body(r#"{"a":1}"#), Some(json!({ "a": 1 })));
        assert_eq!(decode_body("<html>oops</html>"), None);
    }
}
