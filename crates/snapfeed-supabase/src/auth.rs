//! GoTrue endpoints

use crate::{Client, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Identity managed by GoTrue
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Authenticated session
#[derive(Clone, Debug, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: User,
}

/// Result of a sign-up
///
/// GoTrue only hands out a session right away if email confirmations are disabled for the project.
/// Otherwise the bare user is returned and the session has to be obtained after the address is confirmed.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SignUp {
    Session(Session),
    User(User),
}

impl SignUp {
    /// The newly created user
    #[must_use]
    pub fn user(&self) -> &User {
        match self {
            Self::Session(session) => &session.user,
            Self::User(user) => user,
        }
    }

    #[must_use]
    pub fn into_user(self) -> User {
        match self {
            Self::Session(session) => session.user,
            Self::User(user) => user,
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshToken<'a> {
    refresh_token: &'a str,
}

/// Handle to the GoTrue endpoints of a project
pub struct Auth<'a> {
    client: &'a Client,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Register a new user with an email address and password
    #[instrument(skip_all)]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUp> {
        let url = self.client.endpoint("auth/v1/signup")?;
        let request = Client::json_body(
            self.client.request(Method::POST, &url),
            &Credentials { email, password },
        )?;

        Ok(self.client.send(request).await?.json().await?)
    }

    /// Exchange an email address and password for a session
    #[instrument(skip_all)]
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let mut url = self.client.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let request = Client::json_body(
            self.client.request(Method::POST, &url),
            &Credentials { email, password },
        )?;

        Ok(self.client.send(request).await?.json().await?)
    }

    /// Exchange a refresh token for a new session
    #[instrument(skip_all)]
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let mut url = self.client.endpoint("auth/v1/token")?;
        url.query_pairs_mut()
            .append_pair("grant_type", "refresh_token");

        let request = Client::json_body(
            self.client.request(Method::POST, &url),
            &RefreshToken { refresh_token },
        )?;

        Ok(self.client.send(request).await?.json().await?)
    }

    /// Resolve the user an access token was issued to
    ///
    /// Fails if the token is malformed, expired or was revoked.
    #[instrument(skip_all)]
    pub async fn get_user(&self, access_token: &str) -> Result<User> {
        let url = self.client.endpoint("auth/v1/user")?;
        let request = self
            .client
            .request_as(Method::GET, &url, access_token)
            .body(snapfeed_http_client::Body::empty())?;

        Ok(self.client.send(request).await?.json().await?)
    }

    /// Revoke the session an access token belongs to
    #[instrument(skip_all)]
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = self.client.endpoint("auth/v1/logout")?;
        let request = self
            .client
            .request_as(Method::POST, &url, access_token)
            .body(snapfeed_http_client::Body::empty())?;

        self.client.send(request).await?;

        Ok(())
    }
}
