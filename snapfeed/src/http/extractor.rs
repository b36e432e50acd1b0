use crate::{context::RequestContext, state::Zustand};
use axum::extract::FromRequestParts;
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use http::request::Parts;
use std::convert::Infallible;

/// Build the [`RequestContext`] of a request
///
/// Only `Authorization: Bearer <token>` headers are considered. Everything else, including tokens the backend rejects,
/// results in an anonymous context. This extractor never rejects a request.
impl FromRequestParts<Zustand> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Zustand,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts.headers.typed_get::<Authorization<Bearer>>();
        let token = authorization
            .as_ref()
            .map(|Authorization(bearer)| bearer.token());

        let credential = state.service.auth.resolve(token).await;

        Ok(RequestContext::new(state.supabase.clone(), credential))
    }
}
