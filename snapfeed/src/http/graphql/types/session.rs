use super::User;
use async_graphql::SimpleObject;
use snapfeed_supabase::Session as SupabaseSession;

#[derive(Clone, Debug, SimpleObject)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl From<SupabaseSession> for Session {
    fn from(value: SupabaseSession) -> Self {
        Self {
            access_token: value.access_token,
            refresh_token: value.refresh_token,
            user: value.user.into(),
        }
    }
}
