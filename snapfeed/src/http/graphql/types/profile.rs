use crate::model::ProfileRow;
use async_graphql::SimpleObject;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, SimpleObject)]
pub struct Profile {
    pub id: Uuid,
    pub handle: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Option<OffsetDateTime>,
}

impl From<ProfileRow> for Profile {
    fn from(value: ProfileRow) -> Self {
        Self {
            id: value.id,
            handle: value.handle,
            username: value.username,
            avatar_url: value.avatar_url,
            updated_at: value.updated_at,
        }
    }
}
