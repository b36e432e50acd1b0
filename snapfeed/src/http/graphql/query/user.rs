use crate::http::graphql::{types::User, ContextExt};
use async_graphql::{Context, Object};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The user the request is authenticated as
    pub async fn viewer(&self, ctx: &Context<'_>) -> Option<User> {
        ctx.request_context().user().cloned().map(Into::into)
    }
}
