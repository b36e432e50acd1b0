use crate::service::{auth::AuthService, post::PostService};
use snapfeed_supabase::Client as SupabaseClient;
use typed_builder::TypedBuilder;

/// Service collection
#[derive(Clone, TypedBuilder)]
pub struct Service {
    pub auth: AuthService,
    pub post: PostService,
}

/// Application state
///
/// Called it "Zustand" to avoid a name collission with `axum::extract::State`.
/// "Zustand" is just the german word for state.
#[derive(Clone)]
pub struct Zustand {
    /// Project-wide backend client, authenticated with the project API key
    pub supabase: SupabaseClient,
    pub service: Service,
}
