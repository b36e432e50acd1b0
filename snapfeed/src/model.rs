//! Row shapes of the backend tables and functions

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PostRow {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Serialize)]
pub struct NewPost<'a> {
    pub user_id: Uuid,
    pub content: &'a str,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PostImageRow {
    pub image_url: String,
    pub order: i32,
}

#[derive(Serialize)]
pub struct NewPostImage<'a> {
    pub post_id: i64,
    pub image_url: &'a str,
    pub order: i32,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ProfileRow {
    pub id: Uuid,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Row returned by the `get_posts_with_details` function
///
/// Posts without images come back with `images` set to `null`, posts whose author has no profile with `author` set to `null`.
#[derive(Clone, Debug, Deserialize)]
pub struct PostDetailsRow {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub images: Option<Vec<PostImageRow>>,
    #[serde(default)]
    pub author: Option<ProfileRow>,
}

/// A post together with its images and the profile of its author
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostDetails {
    pub post: PostRow,
    /// Sorted by `order`, ascending
    pub images: Vec<PostImageRow>,
    pub author: Option<ProfileRow>,
}

impl From<PostDetailsRow> for PostDetails {
    fn from(value: PostDetailsRow) -> Self {
        let mut images = value.images.unwrap_or_default();
        images.sort_by_key(|image| image.order);

        Self {
            post: PostRow {
                id: value.id,
                created_at: value.created_at,
                user_id: value.user_id,
                content: value.content,
            },
            images,
            author: value.author,
        }
    }
}
