use reqwest::StatusCode;
use thiserror::Error;

/// Everything a request to the API can fail with.
///
/// Nothing is recovered locally: each failure reaches the caller as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection, request building or body streaming failed.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Http {
        /// Status code returned by the API.
        status: StatusCode,
    },

    /// The body did not match the configured output format.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns the HTTP status carried by an [`Error::Http`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status } => Some(*status),
            Error::Reqwest(e) => e.status(),
            Error::Parse(_) => None,
        }
    }
}

/// Failures while decoding a response body.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Body is not valid JSON.
    #[error("invalid json body: {0}")]
    Json(#[from] serde_json::Error),

    /// Body is not well-formed XML.
    #[error("invalid xml body: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML parsed, but the document structure is broken.
    #[error("malformed xml document: {0}")]
    Malformed(String),

    /// Body parsed, but the payload does not have the shape of a response.
    #[error("unexpected payload shape: {0}")]
    Payload(serde_json::Error),
}
