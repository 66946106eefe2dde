//! Signed HTTP client for the NetSuite REST APIs.
//!
//! The [`Client`] type is the main entry point. Use [`ClientBuilder`] to
//! inject a diagnostics sink or point the client at different origins.

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, TracingDiagnostics},
    oauth::Signer,
    request::{RecordRequest, RequestOptions, RestletRequest, SuiteqlOptions},
    response::decode_body,
    Config, Error, Response, Result, USER_AGENT,
};
use http::{header, HeaderMap, HeaderValue, Method};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

const RECORD_PATH: &str = "/services/rest/record/v1";
const SUITEQL_PATH: &str = "/services/rest/query/v1/suiteql";
const RESTLET_PATH: &str = "/app/site/hosting/restlet.nl";

/// A client for the record, SuiteQL and RESTlet APIs of one NetSuite account.
///
/// Every call signs its own `Authorization` header, sends exactly one HTTP
/// request, and returns the decoded body of whatever response came back.
/// Only transport failures (no response at all) are returned as `Err`.
///
/// The client is cheap to clone and safe to share between tasks; the
/// credentials are never mutated after construction.
///
/// # Examples
///
/// ```no_run
/// use netsuite_rest::{request::{RestletRequest, SuiteqlOptions}, Client, Config};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), netsuite_rest::Error> {
/// let client = Client::new(Config::new("1234567_SB1", "ck", "cs", "tk", "ts"))?;
///
/// // Record API
/// let customer = client.get("/customer/123").await?;
/// println!("{}", customer.body["companyName"]);
///
/// // SuiteQL
/// let rows = client
///     .suiteql(
///         "SELECT id, companyname FROM customer",
///         SuiteqlOptions::new().with_query_param("limit", "10"),
///     )
///     .await?;
/// println!("{} rows", rows.body["count"]);
///
/// // RESTlet
/// let result = client
///     .restlet(RestletRequest::new("55").with_json(json!({ "action": "ping" })))
///     .await?;
/// println!("{}", result.body);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    config: Config,
    suitetalk_origin: String,
    restlet_origin: String,
    diagnostics: Box<dyn Diagnostics>,
}

impl Client {
    /// Creates a client for `config` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        ClientBuilder::new().config(config).build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The credentials this client signs with.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Calls the record API.
    ///
    /// The URL is `https://{account}.suitetalk.api.netsuite.com/services/rest/record/v1{path}`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use netsuite_rest::{request::RecordRequest, Client, Config};
    /// use http::Method;
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), netsuite_rest::Error> {
    /// let client = Client::new(Config::from_env()?)?;
    ///
    /// let request = RecordRequest::new("/customer/123")
    ///     .with_method(Method::PATCH)
    ///     .with_json(json!({ "comments": "updated" }));
    /// let response = client.request(request).await?;
    /// assert!(response.is_success());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(&self, request: RecordRequest) -> Result<Response> {
        let url = self.record_url(&request.path)?;
        self.execute(
            request.method,
            url,
            request.body.as_ref(),
            HeaderMap::new(),
            request.options,
        )
        .await
    }

    /// Calls a deployed RESTlet script.
    ///
    /// The URL is
    /// `https://{account}.restlets.api.netsuite.com/app/site/hosting/restlet.nl?deploy={deploy_id}&script={script_id}`.
    pub async fn restlet(&self, request: RestletRequest) -> Result<Response> {
        let url = self.restlet_url(&request.deploy_id, &request.script_id)?;
        self.execute(
            request.method,
            url,
            request.body.as_ref(),
            HeaderMap::new(),
            request.options,
        )
        .await
    }

    /// Runs a SuiteQL query.
    ///
    /// `query` is the SQL text, sent as `{"q": query}` in a `POST` body.
    /// `options.query` holds URL parameters such as `limit` and `offset`.
    /// The request carries `Prefer: transient`.
    pub async fn suiteql(
        &self,
        query: impl Into<String>,
        options: SuiteqlOptions,
    ) -> Result<Response> {
        let url = self.suiteql_url(&options)?;
        let body = json!({ "q": query.into() });

        let mut headers = HeaderMap::new();
        headers.insert("prefer", HeaderValue::from_static("transient"));

        self.execute(Method::POST, url, Some(&body), headers, options.transport)
            .await
    }

    /// Makes a record API `GET` request.
    pub async fn get(&self, path: impl Into<String>) -> Result<Response> {
        self.request(RecordRequest::new(path)).await
    }

    /// Makes a record API `POST` request with a JSON body.
    pub async fn post<Req: Serialize>(&self, path: impl Into<String>, body: &Req) -> Result<Response> {
        let request = RecordRequest::new(path)
            .with_method(Method::POST)
            .with_body(body)?;
        self.request(request).await
    }

    /// Makes a record API `PUT` request with a JSON body.
    pub async fn put<Req: Serialize>(&self, path: impl Into<String>, body: &Req) -> Result<Response> {
        let request = RecordRequest::new(path)
            .with_method(Method::PUT)
            .with_body(body)?;
        self.request(request).await
    }

    /// Makes a record API `PATCH` request with a JSON body.
    pub async fn patch<Req: Serialize>(
        &self,
        path: impl Into<String>,
        body: &Req,
    ) -> Result<Response> {
        let request = RecordRequest::new(path)
            .with_method(Method::PATCH)
            .with_body(body)?;
        self.request(request).await
    }

    /// Makes a record API `DELETE` request.
    pub async fn delete(&self, path: impl Into<String>) -> Result<Response> {
        self.request(RecordRequest::new(path).with_method(Method::DELETE))
            .await
    }

    fn record_url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}{}{}",
            self.inner.suitetalk_origin, RECORD_PATH, path
        ))?)
    }

    fn restlet_url(&self, deploy_id: &str, script_id: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}{}?deploy={}&script={}",
            self.inner.restlet_origin, RESTLET_PATH, deploy_id, script_id
        ))?)
    }

    fn suiteql_url(&self, options: &SuiteqlOptions) -> Result<Url> {
        let url = match options.query_string() {
            Some(query) => format!("{}{}?{}", self.inner.suitetalk_origin, SUITEQL_PATH, query),
            None => format!("{}{}", self.inner.suitetalk_origin, SUITEQL_PATH),
        };
        Ok(Url::parse(&url)?)
    }

    /// Signs `method` + `url`. Called once per request, never cached.
    fn authorization_header(&self, url: &Url, method: &Method) -> Result<HeaderValue> {
        let value = Signer::new(&self.inner.config).authorization_header(method, url)?;
        HeaderValue::try_from(value).map_err(|e| {
            Error::ConfigurationError(format!("Invalid authorization header: {}", e))
        })
    }

    /// Sends one request and turns whatever comes back into a `Response`.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        extra_headers: HeaderMap,
        options: RequestOptions,
    ) -> Result<Response> {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, self.authorization_header(&url, &method)?);
        headers.extend(extra_headers);
        headers.extend(options.headers);

        tracing::debug!(
            method = %method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self
            .inner
            .http_client
            .request(method.clone(), url.clone())
            .headers(headers);

        if let Some(body) = body {
            request = request.json(body);
        }

        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let start_time = Instant::now();
        let response = request.send().await.map_err(Error::from_transport)?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let raw_body = response.text().await.map_err(Error::from_transport)?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        let decoded = decode_body(&raw_body);

        let kind = if !status.is_success() {
            Some(DiagnosticKind::ErrorStatus)
        } else if decoded.is_none() {
            Some(DiagnosticKind::UndecodableBody)
        } else {
            None
        };

        if let Some(kind) = kind {
            self.inner.diagnostics.record(&Diagnostic {
                kind,
                method,
                url: url.to_string(),
                status,
                body: raw_body.clone(),
            });
        }

        let body = decoded.unwrap_or_else(|| Value::String(raw_body.clone()));

        Ok(Response::new(body, raw_body, status, response_headers, latency))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .field("suitetalk_origin", &self.inner.suitetalk_origin)
            .field("restlet_origin", &self.inner.restlet_origin)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use netsuite_rest::{diagnostics::TracingDiagnostics, ClientBuilder, Config};
///
/// # fn example() -> Result<(), netsuite_rest::Error> {
/// let client = ClientBuilder::new()
///     .config(Config::from_env()?)
///     .suitetalk_origin("http://localhost:8080")?
///     .restlet_origin("http://localhost:8081")?
///     .diagnostics(Box::new(TracingDiagnostics))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: Option<Config>,
    suitetalk_origin: Option<String>,
    restlet_origin: Option<String>,
    diagnostics: Option<Box<dyn Diagnostics>>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            config: None,
            suitetalk_origin: None,
            restlet_origin: None,
            diagnostics: None,
            http_client: None,
        }
    }

    /// Sets the account credentials.
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the origin of the record and SuiteQL APIs.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn suitetalk_origin(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.suitetalk_origin = Some(parse_origin(url.as_ref())?);
        Ok(self)
    }

    /// Overrides the origin of the RESTlet API.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn restlet_origin(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.restlet_origin = Some(parse_origin(url.as_ref())?);
        Ok(self)
    }

    /// Sets the sink for error-path diagnostics.
    ///
    /// Defaults to [`TracingDiagnostics`].
    pub fn diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Uses a preconfigured `reqwest::Client` for transport.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no config was provided or if the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<Client> {
        let config = self
            .config
            .ok_or_else(|| Error::ConfigurationError("Config is required".to_string()))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| {
                    Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
                })?,
        };

        let suitetalk_origin = self
            .suitetalk_origin
            .unwrap_or_else(|| config.suitetalk_origin());
        let restlet_origin = self
            .restlet_origin
            .unwrap_or_else(|| config.restlet_origin());
        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Box::new(TracingDiagnostics));

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                config,
                suitetalk_origin,
                restlet_origin,
                diagnostics,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates an origin and drops any trailing slash.
fn parse_origin(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(Config::new("ACME_SB1_X", "ck", "cs", "tk", "ts")).unwrap()
    }

    #[test]
    fn test_record_url() {
        assert_eq!(
            client().record_url("/customer/123").unwrap().as_str(),
            "https://acme-sb1_x.suitetalk.api.netsuite.com/services/rest/record/v1/customer/123"
        );
    }

    #[test]
    fn test_restlet_url() {
        assert_eq!(
            client().restlet_url("1", "55").unwrap().as_str(),
            "https://acme-sb1_x.restlets.api.netsuite.com/app/site/hosting/restlet.nl?deploy=1&script=55"
        );
    }

    #[test]
    fn test_suiteql_url() {
        let client = client();
        assert_eq!(
            client.suiteql_url(&SuiteqlOptions::new()).unwrap().as_str(),
            "https://acme-sb1_x.suitetalk.api.netsuite.com/services/rest/query/v1/suiteql"
        );

        let options = SuiteqlOptions::new()
            .with_query_param("limit", "10")
            .with_query_param("offset", "20");
        assert_eq!(
            client.suiteql_url(&options).unwrap().as_str(),
            "https://acme-sb1_x.suitetalk.api.netsuite.com/services/rest/query/v1/suiteql?limit=10&offset=20"
        );
    }

    #[test]
    fn test_origin_override_trims_trailing_slash() {
        let client = Client::builder()
            .config(Config::new("acct", "ck", "cs", "tk", "ts"))
            .suitetalk_origin("http://127.0.0.1:9000/")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            client.record_url("/customer").unwrap().as_str(),
            "http://127.0.0.1:9000/services/rest/record/v1/customer"
        );
    }

    #[test]
    fn test_build_without_config_fails() {
        let result = Client::builder().build();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_invalid_origin() {
        let result = Client::builder().restlet_origin("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_authorization_header_is_fresh() {
        let client = client();
        let url = client.record_url("/customer/1").unwrap();
        let first = client.authorization_header(&url, &Method::GET).unwrap();
        let second = client.authorization_header(&url, &Method::GET).unwrap();
        assert_ne!(first, second);
        assert!(first.to_str().unwrap().starts_with("OAuth realm=\"ACME_SB1_X\""));
    }
}
