//! Runs a SuiteQL query and prints the rows.
//!
//! Credentials are read from the `NETSUITE_*` environment variables.
//!
//! Run with: `cargo run --example suiteql -- "SELECT id, companyname FROM customer"`

use netsuite_rest::{request::SuiteqlOptions, Client, Config, Error, Outcome};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("netsuite_rest=debug,suiteql=info")
        .init();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "SELECT id, companyname FROM customer".to_string());

    let client = Client::new(Config::from_env()?)?;

    let options = SuiteqlOptions::new()
        .with_query_param("limit", "5")
        .with_query_param("offset", "0");
    let response = client.suiteql(query, options).await?;

    println!("Request latency: {:?}", response.latency);
    match response.outcome() {
        Outcome::Success(body) => {
            println!("Has more: {}", body["hasMore"]);
            if let Some(items) = body["items"].as_array() {
                for item in items {
                    println!("{}", item);
                }
            }
        }
        Outcome::ApplicationError { status, body } => {
            println!("NetSuite returned {}: {}", status, body);
        }
    }

    Ok(())
}
