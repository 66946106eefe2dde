//! # netsuite-rest - signed requests against the NetSuite REST APIs
//!
//! A small async client for NetSuite's record API, SuiteQL query API and
//! RESTlet scripts. Every request is signed with OAuth 1.0a token-based
//! authentication (HMAC-SHA256), sent once, and its JSON body handed back.
//!
//! ## Quick Start
//!
//! ```no_run
//! use netsuite_rest::{request::SuiteqlOptions, Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netsuite_rest::Error> {
//!     let client = Client::new(Config::new(
//!         "1234567_SB1",
//!         "consumer-key",
//!         "consumer-secret",
//!         "token-id",
//!         "token-secret",
//!     ))?;
//!
//!     let customer = client.get("/customer/123").await?;
//!     println!("Customer: {}", customer.body["companyName"]);
//!
//!     let rows = client
//!         .suiteql("SELECT id FROM customer", SuiteqlOptions::new())
//!         .await?;
//!     println!("Rows: {}", rows.body["items"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! A response is never an error. NetSuite error documents (4xx/5xx with a JSON
//! body) come back as a normal [`Response`] after being reported to the
//! configured [`Diagnostics`](diagnostics::Diagnostics) sink. `Err` means the
//! exchange itself failed: no connection, DNS failure, or a timeout set
//! through [`RequestOptions`](request::RequestOptions).
//!
//! ```no_run
//! use netsuite_rest::{Client, Config, Outcome};
//!
//! # async fn example() -> Result<(), netsuite_rest::Error> {
//! # let client = Client::new(Config::from_env()?)?;
//! match client.delete("/customer/123").await?.outcome() {
//!     Outcome::Success(_) => println!("deleted"),
//!     Outcome::ApplicationError { status, body } => {
//!         eprintln!("HTTP {}: {}", status, body);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod diagnostics;
mod error;
pub mod oauth;
pub mod request;
mod response;

pub use client::{Client, ClientBuilder};
pub use config::Config;
pub use error::{Error, Result};
pub use response::{Outcome, Response};

/// User-Agent sent by clients built without a custom `reqwest::Client`.
pub const USER_AGENT: &str = concat!("netsuite-rest/", env!("CARGO_PKG_VERSION"));
