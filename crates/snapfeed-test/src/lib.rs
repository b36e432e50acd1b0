use bytes::Bytes;
use http::{header::CONTENT_TYPE, HeaderMap, Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use snapfeed_http_client::{Body, Client, ClientBuilder};
use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
};
use tower::service_fn;

type Handler = Arc<dyn Fn(&RecordedRequest) -> Response<Full<Bytes>> + Send + Sync>;

pub fn json_response<B>(status: StatusCode, body: B) -> Response<Full<Bytes>>
where
    Bytes: From<B>,
{
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(body.into()))
        .unwrap()
}

/// Request as observed by the [`MockBackend`]
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    #[must_use]
    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }
}

struct Route {
    method: Method,
    path: String,
    handler: Handler,
}

#[derive(Default)]
pub struct MockBackendBuilder {
    routes: Vec<Route>,
}

impl MockBackendBuilder {
    /// Answer requests to `path` with a static JSON body
    #[must_use]
    pub fn route<B>(self, method: Method, path: &str, status: StatusCode, body: B) -> Self
    where
        B: Into<Bytes>,
    {
        let body: Bytes = body.into();
        self.route_fn(method, path, move |_req| json_response(status, body.clone()))
    }

    /// Answer requests to `path` with a response computed from the request
    #[must_use]
    pub fn route_fn<F>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Response<Full<Bytes>> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            path: path.into(),
            handler: Arc::new(handler),
        });
        self
    }

    #[must_use]
    pub fn build(self) -> MockBackend {
        MockBackend {
            routes: Arc::new(self.routes),
            requests: Arc::default(),
        }
    }
}

/// In-process stand-in for the Supabase REST surface
///
/// Routes are matched on method and path. Unmatched requests get a `404` with a PostgREST-style error body.
/// Every request is recorded so tests can assert on what was (or wasn't) sent.
#[derive(Clone)]
pub struct MockBackend {
    routes: Arc<Vec<Route>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    #[must_use]
    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    fn handle(&self, request: RecordedRequest) -> Response<Full<Bytes>> {
        let response = self
            .routes
            .iter()
            .find(|route| route.method == request.method && route.path == request.path)
            .map_or_else(
                || {
                    let message = format!(
                        r#"{{"message":"no route for {} {}"}}"#,
                        request.method, request.path
                    );
                    json_response(StatusCode::NOT_FOUND, message)
                },
                |route| (route.handler)(&request),
            );

        self.requests.lock().unwrap().push(request);
        response
    }

    /// HTTP client whose requests are served by this backend
    #[must_use]
    pub fn http_client(&self) -> Client {
        self.http_client_with(Client::builder())
    }

    /// Like [`MockBackend::http_client`] but with the limits and headers of `builder`
    #[must_use]
    pub fn http_client_with(&self, builder: ClientBuilder) -> Client {
        let backend = self.clone();
        let service = service_fn(move |req: Request<Body>| {
            let backend = backend.clone();

            async move {
                let (parts, body) = req.into_parts();
                let body = body
                    .collect()
                    .await
                    .unwrap_or_else(|never| match never {})
                    .to_bytes();

                let recorded = RecordedRequest {
                    method: parts.method,
                    path: parts.uri.path().to_owned(),
                    query: parts.uri.query().map(ToOwned::to_owned),
                    headers: parts.headers,
                    body,
                };

                Ok::<_, Infallible>(backend.handle(recorded))
            }
        });

        builder.service(service)
    }

    /// All requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for a specific method and path
    #[must_use]
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == *method && request.path == path)
            .collect()
    }
}
