#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

use self::auth::Auth;
use http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method, Request,
};
use serde::Serialize;
use smol_str::SmolStr;
use snapfeed_http_client::{Body, Client as HttpClient, Response};
use std::fmt;
use url::Url;

pub use self::{
    auth::{Session, SignUp, User},
    error::{Error, Result},
    rest::{Insert, Order, Rpc, Select, Table},
};

pub mod auth;
mod error;
pub mod rest;

/// Header carrying the project API key on every request
const API_KEY_HEADER: &str = "apikey";

/// Handle to a Supabase project
///
/// Clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http_client: HttpClient,
    base_url: Url,
    api_key: SmolStr,
    access_token: Option<SmolStr>,
}

impl Client {
    /// Create a client for the project at `url`, authenticated with the project API key
    ///
    /// # Errors
    ///
    /// - `url` isn't a valid absolute URL
    pub fn new(http_client: HttpClient, url: &str, api_key: &str) -> Result<Self> {
        let mut base_url = Url::parse(url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
            api_key: api_key.into(),
            access_token: None,
        })
    }

    /// Derive a client that acts on behalf of the user owning `access_token`
    ///
    /// Table and RPC calls made through the returned client are subject to the row-level security policies of that user.
    #[must_use]
    pub fn with_access_token<T>(&self, access_token: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self {
            access_token: Some(access_token.into()),
            ..self.clone()
        }
    }

    /// Access token this client acts with, if any
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// GoTrue endpoints
    #[must_use]
    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    /// Start a query against a table
    #[must_use]
    pub fn from(&self, table: &str) -> Table<'_> {
        Table::new(self, table)
    }

    /// Prepare a call to a Postgres function exposed via PostgREST
    ///
    /// # Errors
    ///
    /// - Serialising the parameters failed
    pub fn rpc<P>(&self, function: &str, params: &P) -> Result<Rpc<'_>>
    where
        P: Serialize + ?Sized,
    {
        Rpc::new(self, function, params)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, url: &Url) -> http::request::Builder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.request_as(method, url, bearer)
    }

    fn request_as(&self, method: Method, url: &Url, bearer: &str) -> http::request::Builder {
        Request::builder()
            .method(method)
            .uri(url.as_str())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
    }

    fn json_body<T>(builder: http::request::Builder, body: &T) -> Result<Request<Body>>
    where
        T: Serialize + ?Sized,
    {
        let body = sonic_rs::to_vec(body)?;
        let request = builder
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(Body::data(body))?;

        Ok(request)
    }

    async fn send(&self, request: Request<Body>) -> Result<Response> {
        let method = request.method().clone();
        let path = request.uri().path().to_owned();

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let error = Error::from_response(status, &body);
        debug!(%method, %path, %status, error = %error, "request rejected by backend");

        Err(error)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("scoped", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}
