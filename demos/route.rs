//! Example showing how to fetch a couple of routes with zenith-omen
//!
//! This example shows:
//! - Creating a client with the default configuration
//! - Fetching a gif from the `hug` route
//! - Fetching text from the `truth` route
//! - Picking a route by name at runtime

use zenith_omen::{CallParameters, Client, OutputContent, Route};

/// Type alias for simplifying error handling
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    // This is just for seeing the logs
    simple_logger::init_with_level(log::Level::Info)?;

    // JSON output, API v1
    let client = Client::new();

    let hug = client.hug(OutputContent::GIF.into()).await?;
    match hug.url() {
        Some(url) => println!("hug: {url}"),
        None => println!("no hug today: {}", hug.error_messages()),
    }

    let truth = client.truth(CallParameters::new()).await?;
    for text in truth.text_content().unwrap_or_default() {
        println!("truth: {text}");
    }

    // any route name works, e.g. `cargo run --example route -- slap`
    let name = std::env::args().nth(1).unwrap_or_else(|| "waifu".to_string());
    let route: Route = name.parse()?;
    let reply = client.fetch(route, CallParameters::new()).await?;
    for url in reply.all_urls() {
        println!("{route}: {url}");
    }

    Ok(())
}
