use self::{mutation::RootMutation, query::RootQuery};
use crate::{
    context::{AuthenticatedScope, RequestContext},
    state::Zustand,
};
use async_graphql::{
    extensions::Tracing, http::GraphiQLSource, Context, EmptySubscription, ErrorExtensions,
    Result, Schema,
};
use async_graphql_axum::{GraphQLBatchRequest, GraphQLResponse};
use axum::{
    debug_handler,
    response::Html,
    routing::{any, get},
    Extension, Router,
};

mod mutation;
mod query;
mod types;

pub type GraphQLSchema = Schema<RootQuery, RootMutation, EmptySubscription>;

pub trait ContextExt {
    fn state(&self) -> &Zustand;
    fn request_context(&self) -> &RequestContext;
    fn authenticated_scope(&self) -> Result<AuthenticatedScope<'_>>;
}

impl ContextExt for &Context<'_> {
    fn state(&self) -> &Zustand {
        self.data().expect("[Bug] State missing in GraphQL context")
    }

    fn request_context(&self) -> &RequestContext {
        self.data()
            .expect("[Bug] Request context missing in GraphQL context")
    }

    fn authenticated_scope(&self) -> Result<AuthenticatedScope<'_>> {
        self.request_context()
            .authenticated_scope()
            .map_err(|err| err.extend())
    }
}

#[debug_handler(state = Zustand)]
async fn graphql_route(
    Extension(schema): Extension<GraphQLSchema>,
    request_context: RequestContext,
    req: GraphQLBatchRequest,
) -> GraphQLResponse {
    let req = req.into_inner().data(request_context);
    schema.execute_batch(req).await.into()
}

#[allow(clippy::unused_async)]
async fn graphiql_route() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Build the GraphQL schema
///
/// Requests executed against the schema need a [`RequestContext`] attached as request data.
#[must_use]
pub fn schema(state: Zustand) -> GraphQLSchema {
    Schema::build(
        RootQuery::default(),
        RootMutation::default(),
        EmptySubscription,
    )
    .data(state)
    .extension(Tracing)
    .finish()
}

pub fn routes(state: Zustand, graphiql: bool) -> Router<Zustand> {
    let mut router = Router::new().route("/graphql", any(graphql_route));
    if graphiql {
        router = router.route("/graphiql", get(graphiql_route));
    }

    router.layer(Extension(schema(state)))
}
