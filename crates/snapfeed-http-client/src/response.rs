use crate::{BoxBody, Error, Result};
use bytes::Bytes;
use http::StatusCode;
use http_body_util::BodyExt;
use hyper::Response as HyperResponse;
use serde::de::DeserializeOwned;

/// Response whose body hasn't been read yet
#[derive(Debug)]
pub struct Response {
    inner: HyperResponse<BoxBody>,
}

impl Response {
    pub(crate) fn new(inner: HyperResponse<BoxBody>) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Read the whole body
    ///
    /// Fails if the body exceeds the client's body limit.
    pub async fn bytes(self) -> Result<Bytes> {
        let collected = self.inner.into_body().collect().await.map_err(Error::new)?;
        Ok(collected.to_bytes())
    }

    /// Read the body and deserialise it from JSON
    pub async fn json<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.bytes().await?;
        sonic_rs::from_slice(&bytes).map_err(Error::new)
    }
}
