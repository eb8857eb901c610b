use std::sync::Arc;

use crate::{error::Error, result::Result};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT},
    Client as ReqwestClient, Response, StatusCode,
};

/// Where the API lives unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://zenith-omen.vercel.app/api/";

const CLIENT_AGENT: &str = concat!("ZenithOmenClient/", env!("CARGO_PKG_VERSION"));

/// Characters `encodeURIComponent` leaves alone, minus `'`, which reqwest
/// would encode again when parsing the URL.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// A GET request against the API, before it is bound to a base URL.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    /// Version path segment, e.g. `v1`.
    pub version: String,
    /// Endpoint path, e.g. `sfw/hug`.
    pub endpoint: String,
    /// Query parameters, sent in order.
    pub query: Vec<(String, String)>,
    /// Extra request headers.
    pub headers: HeaderMap,
}

impl ApiRequest {
    /// Creates a request without query parameters or headers.
    pub fn new(version: impl Into<String>, endpoint: impl Into<String>) -> Self {
        ApiRequest {
            version: version.into(),
            endpoint: endpoint.into(),
            ..ApiRequest::default()
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a header, replacing an earlier value of the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns the full URL of this request under `base_url`.
    ///
    /// `base_url` is used as given, so it should end with a `/`. Query keys
    /// and values are percent-encoded.
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{base_url}{}/{}", self.version, self.endpoint);
        for (i, (key, value)) in self.query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.extend(utf8_percent_encode(key, QUERY_COMPONENT));
            url.push('=');
            url.extend(utf8_percent_encode(value, QUERY_COMPONENT));
        }
        url
    }
}

/// A successful response whose body has not been read yet.
#[derive(Debug)]
pub struct RawResponse {
    inner: Response,
}

impl RawResponse {
    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Reads the whole body as text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reqwest`] if the body cannot be read.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Gives back the underlying reqwest response.
    pub fn into_inner(self) -> Response {
        self.inner
    }

    /// Accepts 2xx responses and turns every other status into [`Error::Http`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] for non-2xx statuses.
    pub fn from_response(response: Response) -> Result<Self> {
        match response.status() {
            status if status.is_success() => Ok(RawResponse { inner: response }),
            status => Err(Error::Http { status }),
        }
    }
}

/// Something that can issue API requests.
///
/// [`HttpTransport`] is the real one; tests substitute their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a single GET for `request`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Http`] on non-2xx statuses and [`Error::Reqwest`]
    /// when the request cannot be sent.
    async fn get(&self, request: &ApiRequest) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, request: &ApiRequest) -> Result<RawResponse> {
        (**self).get(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn get(&self, request: &ApiRequest) -> Result<RawResponse> {
        (**self).get(request).await
    }
}

/// Sends requests over HTTP with reqwest.
///
/// One request per call: no retries, no timeout beyond what the wrapped
/// reqwest client was built with.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: ReqwestClient,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a transport for another base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(ReqwestClient::new(), base_url)
    }

    /// Creates a transport around an existing reqwest client.
    pub fn with_client(http: ReqwestClient, base_url: impl Into<String>) -> Self {
        HttpTransport {
            http,
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &ApiRequest) -> Result<RawResponse> {
        let url = request.url(&self.base_url);
        let response = {
            let builder = self
                .http
                .get(&url)
                .header(USER_AGENT, CLIENT_AGENT)
                .headers(request.headers.clone());
            log::info!("request for {} dispatched", url);
            builder.send().await?
        };

        log::debug!("response status: {}", response.status());

        RawResponse::from_response(response)
    }
}
