use crate::http::graphql::{
    types::{Session, User},
    ContextExt,
};
use async_graphql::{Context, ErrorExtensions, Object, Result};

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    pub async fn sign_up(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(email))] email: String,
        #[graphql(secret)] password: String,
    ) -> Result<User> {
        let user = ctx
            .state()
            .service
            .auth
            .sign_up(&email, &password)
            .await
            .map_err(|err| err.extend())?;

        Ok(user.into())
    }

    pub async fn sign_in(
        &self,
        ctx: &Context<'_>,
        email: String,
        #[graphql(secret)] password: String,
    ) -> Result<Session> {
        let session = ctx
            .state()
            .service
            .auth
            .sign_in(&email, &password)
            .await
            .map_err(|err| err.extend())?;

        Ok(session.into())
    }

    pub async fn refresh_session(
        &self,
        ctx: &Context<'_>,
        #[graphql(secret)] refresh_token: String,
    ) -> Result<Session> {
        let session = ctx
            .state()
            .service
            .auth
            .refresh(&refresh_token)
            .await
            .map_err(|err| err.extend())?;

        Ok(session.into())
    }

    /// Revoke the session of the current access token
    pub async fn sign_out(&self, ctx: &Context<'_>) -> Result<bool> {
        let scope = ctx.authenticated_scope()?;
        ctx.state()
            .service
            .auth
            .sign_out(&scope)
            .await
            .map_err(|err| err.extend())?;

        Ok(true)
    }
}
