use crate::{
    http::graphql::{types::Post, ContextExt},
    service::post::CreatePost,
};
use async_graphql::{Context, ErrorExtensions, Object, Result};

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    pub async fn create_post(
        &self,
        ctx: &Context<'_>,
        content: String,
        image_urls: Vec<String>,
    ) -> Result<Post> {
        let scope = ctx.authenticated_scope()?;

        let create_post = CreatePost::builder()
            .content(content)
            .image_urls(image_urls)
            .build();

        let post = ctx
            .state()
            .service
            .post
            .create(&scope, create_post)
            .await
            .map_err(|err| err.extend())?;

        Ok(post.into())
    }
}
