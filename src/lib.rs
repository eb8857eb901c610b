#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! # zenith-omen
//!
//! zenith-omen is a convenient wrapper library around the Zenith Omen
//! reaction API.
//!
//! Every safe-for-work route has its own method on [`Client`]:
//! `bite`, `dare`, `headpat`, `highfive`, `hug`, `husbando`, `neko`, `poke`,
//! `run`, `slap`, `smile`, `truth` and `waifu`.
//!
//! Replies can be requested as JSON or XML. Either way they come back as the
//! same [`NormalizedResponse`].
//!
//! ## Example: Printing a hug gif.
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use zenith_omen::{CallParameters, Client, OutputContent};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new();
//!     let hug = client.hug(OutputContent::GIF.into()).await?;
//!
//!     if let Some(url) = hug.url() {
//!         println!("hug: {url}");
//!     }
//!
//!     // without a content filter
//!     let neko = client.neko(CallParameters::new()).await?;
//!     println!("neko status: {:?}", neko.status());
//!     Ok(())
//! }
//! ```
//!
//! [`NormalizedResponse`]: crate::NormalizedResponse

/// Client module contains [`Client`] for requesting the action routes.
pub mod client;

/// Decoding of JSON and XML response bodies.
pub mod codec;

/// Construction-time settings of a [`Client`].
pub mod config;

/// Contains [`Error`]s that can be thrown by the libary.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// The HTTP layer under [`Client`].
pub mod transport;

pub(crate) mod models;

pub(crate) mod result;

pub use client::{Client, ClientBuilder};
pub use config::{ApiVersion, ClientConfig, OutputFormat};
pub use error::{Error, ParseError};
pub use models::params::{CallParameters, OutputContent};
pub use models::response::NormalizedResponse;
pub use models::route::{Route, UnknownRoute};
pub use models::*;
