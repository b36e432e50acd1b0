use crate::http::graphql::{types::Post, ContextExt};
use async_graphql::{Context, ErrorExtensions, Object, Result};

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// All posts, newest first
    pub async fn list_posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let posts = ctx
            .state()
            .service
            .post
            .list()
            .await
            .map_err(|err| err.extend())?;

        Ok(posts.into_iter().map(Into::into).collect())
    }
}
