//! Error-path diagnostics.
//!
//! When NetSuite answers with an error status, or with a body that is not
//! JSON, the client hands a [`Diagnostic`] to the configured [`Diagnostics`]
//! sink before returning the body to the caller. The default sink forwards to
//! `tracing`; tests and applications can inject their own.

use http::{Method, StatusCode};

/// What went wrong with a received response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The server answered with a non-2xx status.
    ErrorStatus,
    /// The body could not be decoded as JSON and is returned as a string.
    UndecodableBody,
}

/// A single error-path event.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
    /// The raw response body as received.
    pub body: String,
}

/// Receives error-path diagnostics from the client.
///
/// # Examples
///
/// ```
/// use netsuite_rest::diagnostics::{Diagnostic, Diagnostics};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Collect(Mutex<Vec<Diagnostic>>);
///
/// impl Diagnostics for Collect {
///     fn record(&self, diagnostic: &Diagnostic) {
///         self.0.lock().unwrap().push(diagnostic.clone());
///     }
/// }
/// ```
pub trait Diagnostics: Send + Sync {
    fn record(&self, diagnostic: &Diagnostic);
}

/// Default sink: logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, diagnostic: &Diagnostic) {
        let status = diagnostic.status.as_u16();
        match diagnostic.kind {
            DiagnosticKind::ErrorStatus if diagnostic.status.is_client_error() => {
                tracing::error!(
                    status = status,
                    method = %diagnostic.method,
                    url = %diagnostic.url,
                    response = %diagnostic.body,
                    "Client error (4xx)"
                );
            }
            DiagnosticKind::ErrorStatus => {
                tracing::warn!(
                    status = status,
                    method = %diagnostic.method,
                    url = %diagnostic.url,
                    response = %diagnostic.body,
                    "Server error"
                );
            }
            DiagnosticKind::UndecodableBody => {
                tracing::warn!(
                    status = status,
                    method = %diagnostic.method,
                    url = %diagnostic.url,
                    raw_response = %diagnostic.body,
                    "Response body is not JSON"
                );
            }
        }
    }
}
