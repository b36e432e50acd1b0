#![doc = include_str!("../README.md")]

use bytes::Bytes;
use http::{
    header::{HeaderName, USER_AGENT},
    HeaderMap, HeaderValue, Request,
};
use http_body::Body as HttpBody;
use http_body_util::{BodyExt, Limited};
use hyper::Response as HyperResponse;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client as HyperClient},
    rt::TokioExecutor,
};
use std::{error::Error as StdError, fmt, time::Duration};
use tower::{
    timeout::TimeoutLayer, util::BoxCloneSyncService, BoxError, Service, ServiceBuilder, ServiceExt,
};
use tower_http::{decompression::DecompressionLayer, map_response_body::MapResponseBodyLayer};

pub use self::{body::Body, response::Response};

mod body;
mod response;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, BoxError>;
type Result<T, E = Error> = std::result::Result<T, E>;

const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Transport error
///
/// Covers everything that can go wrong between handing a request to the client and reading the response body,
/// including running into the timeout or exceeding the body limit. HTTP error statuses are not errors at this level.
pub struct Error(BoxError);

impl Error {
    fn new<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self(err.into())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

pub struct ClientBuilder {
    body_limit: usize,
    headers: HeaderMap,
    timeout: Duration,
}

impl ClientBuilder {
    /// Maximum size of a response body in bytes
    ///
    /// Counted after decompression. Defaults to 1MiB.
    #[must_use]
    pub fn body_limit(self, body_limit: usize) -> Self {
        Self { body_limit, ..self }
    }

    /// Add a header to every request sent through the client
    pub fn header<K, V>(mut self, name: K, value: V) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<BoxError>,
        V: TryInto<HeaderValue>,
        V::Error: Into<BoxError>,
    {
        let name = name.try_into().map_err(Error::new)?;
        let value = value.try_into().map_err(Error::new)?;
        self.headers.insert(name, value);

        Ok(self)
    }

    pub fn user_agent<V>(self, value: V) -> Result<Self>
    where
        V: TryInto<HeaderValue>,
        V::Error: Into<BoxError>,
    {
        self.header(USER_AGENT, value)
    }

    /// Upper bound for receiving the response head. Defaults to 30s.
    ///
    /// Running into it fails the request with an [`Error`], no response is synthesised.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Build a client talking to the network through a pooled `hyper` client
    ///
    /// Plain HTTP is allowed next to HTTPS so local backends work.
    pub fn build(self) -> Result<Client> {
        let mut connector = HttpConnector::new();
        connector.enforce_http(false);

        let connector = HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(Error::new)?
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .wrap_connector(connector);

        let hyper_client = HyperClient::builder(TokioExecutor::new())
            .build(connector)
            .map_response(|response| response.map(|body| BoxBody::new(body.map_err(BoxError::from))));

        Ok(self.service(hyper_client))
    }

    /// Build a client on top of an arbitrary `tower` service
    ///
    /// Limits, decompression and the timeout are layered on top of `service`.
    #[must_use]
    pub fn service<S, B>(self, service: S) -> Client
    where
        S: Service<Request<Body>, Response = HyperResponse<B>> + Clone + Send + Sync + 'static,
        S::Error: Into<BoxError>,
        S::Future: Send + 'static,
        B: HttpBody<Data = Bytes> + Default + Send + Sync + 'static,
        B::Error: Into<BoxError> + Send + Sync,
    {
        let body_limit = self.body_limit;
        let service = ServiceBuilder::new()
            .layer(MapResponseBodyLayer::new(move |body| {
                BoxBody::new(Limited::new(body, body_limit))
            }))
            .layer(DecompressionLayer::new())
            .layer(TimeoutLayer::new(self.timeout))
            .service(service);

        Client {
            headers: self.headers,
            inner: BoxCloneSyncService::new(service),
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        Self {
            body_limit: DEFAULT_BODY_LIMIT,
            headers,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client
///
/// Cheap to clone, clones share the connection pool.
#[derive(Clone)]
pub struct Client {
    headers: HeaderMap,
    inner: BoxCloneSyncService<Request<Body>, HyperResponse<BoxBody>, BoxError>,
}

impl Client {
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Send a request
    ///
    /// Client-wide headers are only filled in where the request doesn't set them itself.
    pub async fn execute(&self, mut req: Request<Body>) -> Result<Response> {
        for (name, value) in &self.headers {
            if !req.headers().contains_key(name) {
                req.headers_mut().insert(name, value.clone());
            }
        }

        let response = self.inner.clone().oneshot(req).await.map_err(Error::new)?;

        Ok(Response::new(response))
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
