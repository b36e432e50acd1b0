//! PostgREST endpoints

use crate::{Client, Result};
use http::{HeaderValue, Method};
use serde::{de::DeserializeOwned, Serialize};
use smol_str::SmolStr;
use snapfeed_http_client::Body;
use std::fmt::Display;

const PREFER_HEADER: &str = "prefer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

pub struct Table<'a> {
    client: &'a Client,
    name: SmolStr,
}

impl<'a> Table<'a> {
    pub(crate) fn new(client: &'a Client, name: &str) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    /// Select the given columns
    ///
    /// Embedded resources use the PostgREST syntax, e.g. `*, post_images(*)`.
    #[must_use]
    pub fn select(self, columns: &str) -> Select<'a> {
        Select {
            client: self.client,
            table: self.name,
            params: vec![("select".into(), columns.into())],
        }
    }

    /// Insert one row (object) or multiple rows (array)
    ///
    /// # Errors
    ///
    /// - Serialising the rows failed
    pub fn insert<T>(self, rows: &T) -> Result<Insert<'a>>
    where
        T: Serialize + ?Sized,
    {
        Ok(Insert {
            client: self.client,
            table: self.name,
            body: sonic_rs::to_vec(rows)?,
        })
    }
}

pub struct Select<'a> {
    client: &'a Client,
    table: SmolStr,
    params: Vec<(String, String)>,
}

impl Select<'_> {
    /// Only return rows where `column` equals `value`
    #[must_use]
    pub fn eq<V>(mut self, column: &str, value: V) -> Self
    where
        V: Display,
    {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    #[must_use]
    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.params
            .push(("order".into(), format!("{column}.{}", order.as_str())));
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".into(), limit.to_string()));
        self
    }

    #[instrument(skip_all, fields(table = %self.table))]
    pub async fn execute<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut url = self.client.endpoint(&format!("rest/v1/{}", self.table))?;
        url.query_pairs_mut().extend_pairs(&self.params);

        let request = self
            .client
            .request(Method::GET, &url)
            .body(Body::empty())?;

        Ok(self.client.send(request).await?.json().await?)
    }
}

pub struct Insert<'a> {
    client: &'a Client,
    table: SmolStr,
    body: Vec<u8>,
}

impl Insert<'_> {
    /// Execute the insert and return the inserted rows
    #[instrument(skip_all, fields(table = %self.table))]
    pub async fn execute<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.client.endpoint(&format!("rest/v1/{}", self.table))?;
        let request = self
            .client
            .request(Method::POST, &url)
            .header(http::header::CONTENT_TYPE, "application/json")
            .header(PREFER_HEADER, HeaderValue::from_static("return=representation"))
            .body(Body::data(self.body))?;

        Ok(self.client.send(request).await?.json().await?)
    }
}

pub struct Rpc<'a> {
    client: &'a Client,
    function: SmolStr,
    body: Vec<u8>,
}

impl<'a> Rpc<'a> {
    pub(crate) fn new<P>(client: &'a Client, function: &str, params: &P) -> Result<Self>
    where
        P: Serialize + ?Sized,
    {
        Ok(Self {
            client,
            function: function.into(),
            body: sonic_rs::to_vec(params)?,
        })
    }

    #[instrument(skip_all, fields(function = %self.function))]
    pub async fn execute<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self
            .client
            .endpoint(&format!("rest/v1/rpc/{}", self.function))?;
        let request = self
            .client
            .request(Method::POST, &url)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::data(self.body))?;

        Ok(self.client.send(request).await?.json().await?)
    }
}
