use crate::{
    codec::ResponseCodec,
    config::{ApiVersion, ClientConfig, OutputFormat, BASE_URL_ENV},
    models::{params::CallParameters, response::NormalizedResponse, route::Route},
    result::Result,
    transport::{ApiRequest, HttpTransport, Transport, DEFAULT_BASE_URL},
};
use reqwest::Client as ReqwestClient;

/// Sends requests to the action routes and shapes the replies.
///
/// The client only holds its transport and a [`ClientConfig`]; calls share
/// no state, so one client can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl Client {
    /// Creates a client for the public API with the default configuration
    /// (JSON, `v1`).
    pub fn new() -> Client {
        Client::with_config(ClientConfig::default())
    }

    /// Creates a client for the public API.
    pub fn with_config(config: ClientConfig) -> Client {
        Client {
            transport: HttpTransport::new(),
            config,
        }
    }

    /// Starts building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! route_methods {
    ($($method:ident => $route:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Fetches the `", stringify!($method), "` route.")]
            ///
            /// # Errors
            ///
            /// See [`Client::fetch`].
            pub async fn $method(&self, params: CallParameters) -> Result<NormalizedResponse> {
                self.fetch(Route::$route, params).await
            }
        )+
    };
}

impl<T: Transport> Client<T> {
    /// Creates a client on top of any [`Transport`].
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Client { transport, config }
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport requests go through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the request for `route` without sending it.
    pub fn request(&self, route: Route, params: &CallParameters) -> ApiRequest {
        ApiRequest::new(self.config.api_version.as_str(), route.path())
            .query("outputFormat", self.config.output_format.as_str())
            .query("outputContent", params.content_param())
    }

    /// Fetches `route` and shapes the reply.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] if the API answers with a non-2xx status.
    /// - [`Error::Reqwest`] if the request or body read fails.
    /// - [`Error::Parse`] if the body does not match the configured format or
    ///   does not look like a response.
    ///
    /// [`Error::Http`]: crate::error::Error::Http
    /// [`Error::Reqwest`]: crate::error::Error::Reqwest
    /// [`Error::Parse`]: crate::error::Error::Parse
    pub async fn fetch(&self, route: Route, params: CallParameters) -> Result<NormalizedResponse> {
        let request = self.request(route, &params);
        let body = self.transport.get(&request).await?.text().await?;

        let codec = ResponseCodec::for_format(&self.config.output_format);
        log::debug!("decoding {} reply from {} as {:?}", body.len(), route, codec);

        let decoded = codec.decode(&body)?;
        let response = NormalizedResponse::from_payload(decoded.payload, decoded.raw)?;
        Ok(response)
    }

    route_methods! {
        bite => Bite,
        dare => Dare,
        headpat => Headpat,
        highfive => Highfive,
        hug => Hug,
        husbando => Husbando,
        neko => Neko,
        poke => Poke,
        run => Run,
        slap => Slap,
        smile => Smile,
        truth => Truth,
        waifu => Waifu,
    }
}

/// Assembles a [`Client`] backed by [`HttpTransport`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    http: Option<ReqwestClient>,
    config: ClientConfig,
}

impl ClientBuilder {
    /// Starts from [`ClientConfig::from_env`] and the base URL in
    /// [`BASE_URL_ENV`], when set.
    pub fn from_env() -> Self {
        ClientBuilder {
            base_url: std::env::var(BASE_URL_ENV).ok(),
            http: None,
            config: ClientConfig::from_env(),
        }
    }

    /// Sends requests to `base_url` instead of [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Uses a preconfigured reqwest client, e.g. one with a timeout.
    #[must_use]
    pub fn http_client(mut self, http: ReqwestClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn output_format(mut self, format: impl Into<OutputFormat>) -> Self {
        self.config.output_format = format.into();
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<ApiVersion>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Finishes the client.
    pub fn build(self) -> Client {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let transport = HttpTransport::with_client(self.http.unwrap_or_default(), base_url);
        Client::with_transport(transport, self.config)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::{
        error::{Error, ParseError},
        models::params::OutputContent,
        transport::RawResponse,
    };

    /// Replies with a fixed body and records every request.
    struct StubTransport {
        status: u16,
        body: String,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl StubTransport {
        fn new(status: u16, body: &str) -> Self {
            StubTransport {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<ApiRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn get(&self, request: &ApiRequest) -> Result<RawResponse> {
            self.seen.lock().unwrap().push(request.clone());
            let response = http::Response::builder()
                .status(self.status)
                .body(self.body.clone())
                .unwrap();
            RawResponse::from_response(response.into())
        }
    }

    const JSON_BODY: &str = r#"{"url":"https://x/1.gif","status":200,"errorMessages":""}"#;
    const XML_BODY: &str =
        "<response><url>https://x/1.gif</url><status>200</status></response>";

    #[test]
    fn request_carries_format_and_empty_content() {
        let client = Client::with_transport(StubTransport::new(200, "{}"), ClientConfig::default());
        let request = client.request(Route::Neko, &CallParameters::new());
        assert_eq!(request.version, "v1");
        assert_eq!(request.endpoint, "sfw/neko");
        assert_eq!(
            request.query,
            vec![
                ("outputFormat".to_string(), "json".to_string()),
                ("outputContent".to_string(), String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn json_reply_is_normalized() {
        let client = Client::with_transport(StubTransport::new(200, JSON_BODY), ClientConfig::default());
        let res = client.hug(CallParameters::new()).await.unwrap();
        assert_eq!(res.url(), Some("https://x/1.gif"));
        assert_eq!(res.status(), Some(200));
        assert_eq!(res.error_messages(), "");
        assert_eq!(res.raw_response()["status"], 200);
    }

    #[tokio::test]
    async fn xml_reply_is_normalized() {
        let config = ClientConfig::default().output_format(OutputFormat::XML);
        let client = Client::with_transport(StubTransport::new(200, XML_BODY), config);
        let res = client.waifu(OutputContent::PICTURE.into()).await.unwrap();
        assert_eq!(res.url(), Some("https://x/1.gif"));
        assert_eq!(res.status(), Some(200));
        assert_eq!(res.raw_response()["response"]["url"], "https://x/1.gif");

        let seen = client.transport().seen();
        assert_eq!(seen[0].query[0].1, "xml");
        assert_eq!(seen[0].query[1].1, "picture");
    }

    #[tokio::test]
    async fn uppercase_json_format_still_parses_json() {
        let config = ClientConfig::default().output_format("JSON");
        let client = Client::with_transport(StubTransport::new(200, JSON_BODY), config);
        let res = client.slap(CallParameters::new()).await.unwrap();
        assert_eq!(res.url(), Some("https://x/1.gif"));
        assert_eq!(client.transport().seen()[0].query[0].1, "JSON");
    }

    #[tokio::test]
    async fn every_route_hits_its_path() {
        let client = Client::with_transport(StubTransport::new(200, JSON_BODY), ClientConfig::default());
        let p = CallParameters::new;
        client.bite(p()).await.unwrap();
        client.dare(p()).await.unwrap();
        client.headpat(p()).await.unwrap();
        client.highfive(p()).await.unwrap();
        client.hug(p()).await.unwrap();
        client.husbando(p()).await.unwrap();
        client.neko(p()).await.unwrap();
        client.poke(p()).await.unwrap();
        client.run(p()).await.unwrap();
        client.slap(p()).await.unwrap();
        client.smile(p()).await.unwrap();
        client.truth(p()).await.unwrap();
        client.waifu(p()).await.unwrap();

        let endpoints: Vec<String> = client
            .transport()
            .seen()
            .into_iter()
            .map(|r| r.endpoint)
            .collect();
        let expected: Vec<String> = Route::ALL.iter().map(|r| r.path().to_string()).collect();
        assert_eq!(endpoints, expected);
    }

    #[tokio::test]
    async fn http_failure_is_propagated() {
        let client = Client::with_transport(StubTransport::new(404, ""), ClientConfig::default());
        let err = client.poke(CallParameters::new()).await.unwrap_err();
        assert!(matches!(err, Error::Http { status } if status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn bad_json_is_a_parse_error() {
        let client = Client::with_transport(StubTransport::new(200, "<html>"), ClientConfig::default());
        let err = client.run(CallParameters::new()).await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }

    #[tokio::test]
    async fn bad_xml_is_a_parse_error() {
        let config = ClientConfig::default().output_format(OutputFormat::XML);
        let client = Client::with_transport(StubTransport::new(200, "<response><url>"), config);
        let err = client.smile(CallParameters::new()).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn xml_without_response_root_is_a_parse_error() {
        let config = ClientConfig::default().output_format(OutputFormat::XML);
        let client = Client::with_transport(StubTransport::new(200, "<reply/>"), config);
        let err = client.truth(CallParameters::new()).await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Payload(_))));
    }

    #[tokio::test]
    async fn empty_xml_response_has_no_fields() {
        for body in ["<response/>", "<response></response>"] {
            let config = ClientConfig::default().output_format(OutputFormat::XML);
            let client = Client::with_transport(StubTransport::new(200, body), config);
            let res = client.husbando(CallParameters::new()).await.unwrap();
            assert_eq!(res.url(), None, "{body}");
            assert_eq!(res.status(), None);
            assert_eq!(res.error_messages(), "");
            assert_eq!(res.raw_response()["response"], "");
        }
    }

    #[tokio::test]
    async fn non_numeric_status_is_absent() {
        let body = r#"{"url":"https://x/1.gif","status":"ok","textCount":1.5}"#;
        let client = Client::with_transport(StubTransport::new(200, body), ClientConfig::default());
        let res = client.bite(CallParameters::new()).await.unwrap();
        assert_eq!(res.url(), Some("https://x/1.gif"));
        assert_eq!(res.status(), None);
        assert_eq!(res.text_count(), None);
        assert_eq!(res.raw_response()["status"], "ok");
    }

    #[tokio::test]
    async fn shared_transport_behind_arc() {
        let stub = Arc::new(StubTransport::new(200, JSON_BODY));
        let shared: Arc<dyn Transport> = stub.clone();
        let client: Client<Arc<dyn Transport>> =
            Client::with_transport(shared, ClientConfig::default());
        let res = client.smile(CallParameters::new()).await.unwrap();
        assert_eq!(res.url(), Some("https://x/1.gif"));
        assert_eq!(stub.seen()[0].endpoint, "sfw/smile");
    }

    #[tokio::test]
    async fn boxed_transport() {
        let boxed: Box<dyn Transport> = Box::new(StubTransport::new(404, ""));
        let client = Client::with_transport(boxed, ClientConfig::default());
        let err = client.neko(CallParameters::new()).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn builder_defaults_match_new() {
        let built = Client::builder().build();
        let plain = Client::new();
        assert_eq!(built.config(), plain.config());
        assert_eq!(built.transport().base_url(), DEFAULT_BASE_URL);

        let custom = Client::builder()
            .base_url("http://localhost:8080/api/")
            .output_format("xml")
            .api_version("v1")
            .build();
        assert_eq!(custom.transport().base_url(), "http://localhost:8080/api/");
        assert_eq!(custom.config().output_format, OutputFormat::XML);
    }
}
