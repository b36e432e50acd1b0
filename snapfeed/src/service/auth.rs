use super::backend_error;
use crate::context::{AuthenticatedScope, Credential};
use snapfeed_error::{ErrorType, Result};
use snapfeed_supabase::{Client as SupabaseClient, Session, User};
use typed_builder::TypedBuilder;

#[derive(Clone, TypedBuilder)]
pub struct AuthService {
    client: SupabaseClient,
}

impl AuthService {
    /// Register a new account
    ///
    /// Rejections such as an already registered address or a weak password are returned as [`ErrorType::BadRequest`].
    #[instrument(skip_all)]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
        let sign_up = self
            .client
            .auth()
            .sign_up(email, password)
            .await
            .map_err(|err| backend_error(err, ErrorType::BadRequest))?;

        Ok(sign_up.into_user())
    }

    #[instrument(skip_all)]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.client
            .auth()
            .sign_in_with_password(email, password)
            .await
            .map_err(|err| backend_error(err, ErrorType::Unauthorized))
    }

    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        self.client
            .auth()
            .refresh_session(refresh_token)
            .await
            .map_err(|err| backend_error(err, ErrorType::Unauthorized))
    }

    /// Revoke the session the scope was acquired with
    #[instrument(skip_all, fields(user_id = %scope.user().id))]
    pub async fn sign_out(&self, scope: &AuthenticatedScope<'_>) -> Result<()> {
        scope
            .client()
            .auth()
            .sign_out(scope.token())
            .await
            .map_err(|err| backend_error(err, ErrorType::Unauthorized))
    }

    /// Resolve the bearer token of a request
    ///
    /// Never fails. Tokens the backend rejects and backend outages both end up as [`Credential::Invalid`].
    #[instrument(skip_all)]
    pub async fn resolve(&self, token: Option<&str>) -> Credential {
        let Some(token) = token else {
            return Credential::Missing;
        };

        match self.client.auth().get_user(token).await {
            Ok(user) => Credential::Verified {
                user,
                token: token.into(),
            },
            Err(error) if error.is_client_error() => {
                debug!(%error, "bearer token rejected");
                Credential::Invalid
            }
            Err(error) => {
                warn!(?error, "failed to verify bearer token");
                Credential::Invalid
            }
        }
    }
}
