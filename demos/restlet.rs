//! Calls a RESTlet and prints whatever it returns.
//!
//! Run with: `cargo run --example restlet -- <script id> [deploy id]`

use netsuite_rest::{request::RestletRequest, Client, Config, Error};
use http::Method;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("netsuite_rest=debug,restlet=info")
        .init();

    let mut args = std::env::args().skip(1);
    let script_id = args.next().unwrap_or_else(|| "1".to_string());

    let mut request = RestletRequest::new(script_id)
        .with_method(Method::POST)
        .with_json(json!({ "ping": true }));
    if let Some(deploy_id) = args.next() {
        request = request.with_deploy_id(deploy_id);
    }

    let client = Client::new(Config::from_env()?)?;
    let response = client.restlet(request).await?;

    println!("Status: {}", response.status);
    println!("Body: {}", response.body);

    Ok(())
}
