use super::{PostImage, Profile};
use crate::model::PostDetails;
use async_graphql::SimpleObject;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, SimpleObject)]
pub struct Post {
    pub id: i64,
    pub created_at: OffsetDateTime,
    pub user_id: Uuid,
    pub content: String,
    pub images: Vec<PostImage>,
    /// Profile of the author, absent if the author never created one
    pub author: Option<Profile>,
}

impl From<PostDetails> for Post {
    fn from(value: PostDetails) -> Self {
        Self {
            id: value.post.id,
            created_at: value.post.created_at,
            user_id: value.post.user_id,
            content: value.post.content,
            images: value.images.into_iter().map(Into::into).collect(),
            author: value.author.map(Into::into),
        }
    }
}
