use async_graphql::SimpleObject;
use snapfeed_supabase::User as SupabaseUser;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, SimpleObject)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<SupabaseUser> for User {
    fn from(value: SupabaseUser) -> Self {
        Self {
            id: value.id,
            email: value.email,
            created_at: value.created_at,
        }
    }
}
