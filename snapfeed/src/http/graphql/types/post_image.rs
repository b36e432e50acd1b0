use crate::model::PostImageRow;
use async_graphql::SimpleObject;

#[derive(Clone, Debug, PartialEq, Eq, SimpleObject)]
pub struct PostImage {
    pub image_url: String,
    /// Zero-based position of the image within its post
    pub order: i32,
}

impl From<PostImageRow> for PostImage {
    fn from(value: PostImageRow) -> Self {
        Self {
            image_url: value.image_url,
            order: value.order,
        }
    }
}
