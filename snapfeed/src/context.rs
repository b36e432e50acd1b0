//! Per-request view of the caller
//!
//! A [`RequestContext`] is built exactly once for every inbound request (see the extractor in [`crate::http`]).
//! Resolvers that write rows owned by the caller derive an [`AuthenticatedScope`] from it.

use smol_str::SmolStr;
use snapfeed_error::{snapfeed_error, ErrorType, Result};
use snapfeed_supabase::{Client as SupabaseClient, User};

/// Outcome of resolving the bearer token of a request
#[derive(Clone, Debug)]
pub enum Credential {
    /// The request didn't carry a bearer token
    Missing,

    /// A token was supplied but couldn't be verified
    ///
    /// This covers expired, malformed and revoked tokens as well as an unreachable backend.
    Invalid,

    /// The backend vouched for the token
    Verified { user: User, token: SmolStr },
}

/// Immutable context attached to every GraphQL request
///
/// The user and the token are either both present or both absent.
/// Tokens that failed verification are discarded, the request then proceeds anonymously.
#[derive(Clone, Debug)]
pub struct RequestContext {
    client: SupabaseClient,
    user: Option<User>,
    token: Option<SmolStr>,
}

impl RequestContext {
    #[must_use]
    pub fn new(client: SupabaseClient, credential: Credential) -> Self {
        let (user, token) = match credential {
            Credential::Verified { user, token } => (Some(user), Some(token)),
            Credential::Missing | Credential::Invalid => (None, None),
        };

        Self {
            client,
            user,
            token,
        }
    }

    #[must_use]
    pub fn anonymous(client: SupabaseClient) -> Self {
        Self::new(client, Credential::Missing)
    }

    /// Backend client acting with the project API key
    #[must_use]
    pub fn client(&self) -> &SupabaseClient {
        &self.client
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Acquire a scope acting on behalf of the caller
    ///
    /// Fails with an [`ErrorType::Unauthorized`] error if the request is anonymous.
    /// No backend call is made in either case.
    pub fn authenticated_scope(&self) -> Result<AuthenticatedScope<'_>> {
        let (Some(user), Some(token)) = (self.user.as_ref(), self.token.as_deref()) else {
            return Err(snapfeed_error!(
                type = ErrorType::Unauthorized(None),
                "request has no verified credential"
            ));
        };

        debug!(user_id = %user.id, "acquired authenticated scope");

        Ok(AuthenticatedScope {
            client: self.client.with_access_token(token),
            user,
            token,
        })
    }
}

/// Backend access on behalf of a verified user
///
/// Every call made through [`AuthenticatedScope::client`] carries the user's access token,
/// so the backend evaluates its row-level security policies as that user.
/// The scope lives no longer than the request context it was derived from and is released when dropped.
pub struct AuthenticatedScope<'a> {
    client: SupabaseClient,
    user: &'a User,
    token: &'a str,
}

impl AuthenticatedScope<'_> {
    #[must_use]
    pub fn client(&self) -> &SupabaseClient {
        &self.client
    }

    #[must_use]
    pub fn user(&self) -> &User {
        self.user
    }

    #[must_use]
    pub fn token(&self) -> &str {
        self.token
    }
}

impl Drop for AuthenticatedScope<'_> {
    fn drop(&mut self) {
        debug!(user_id = %self.user.id, "released authenticated scope");
    }
}
