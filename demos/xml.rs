//! Example showing the XML output format
//!
//! This example shows:
//! - Building a client from `ZENITH_OMEN_*` environment variables
//! - Forcing XML output
//! - Looking at the raw parsed XML tree next to the shaped reply

use zenith_omen::{Client, ClientBuilder, OutputContent, OutputFormat};

/// Type alias for simplifying error handling
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    simple_logger::init_with_level(log::Level::Debug)?;

    let client: Client = ClientBuilder::from_env()
        .output_format(OutputFormat::XML)
        .build();

    let neko = client.neko(OutputContent::PICTURE.into()).await?;

    println!("url:    {:?}", neko.url());
    println!("status: {:?}", neko.status());
    println!("raw:    {:#}", neko.raw_response());

    Ok(())
}
