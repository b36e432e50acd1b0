use http::StatusCode;
use serde::Deserialize;
use smol_str::SmolStr;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The backend answered with a non-success status code
    #[error("{message}")]
    Api {
        status: StatusCode,
        code: Option<SmolStr>,
        message: String,
    },

    #[error(transparent)]
    Http(#[from] http::Error),

    #[error(transparent)]
    HttpClient(#[from] snapfeed_http_client::Error),

    #[error(transparent)]
    Json(#[from] sonic_rs::Error),

    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}

/// Union of the error bodies GoTrue and PostgREST respond with
#[derive(Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<SmolStr>,
}

impl Error {
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let body: ErrorBody = sonic_rs::from_slice(body).unwrap_or_default();
        let message = body
            .msg
            .or(body.error_description)
            .or(body.message)
            .or(body.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown backend error")
                    .to_owned()
            });

        Self::Api {
            status,
            code: body.error_code,
            message,
        }
    }

    /// Status code the backend responded with, if the request made it that far
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the request itself (4xx)
    ///
    /// These are errors caused by the caller's input, such as invalid credentials or a duplicate email address.
    /// `408` and `429` say nothing about the input and don't count.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|status| {
            status.is_client_error()
                && status != StatusCode::REQUEST_TIMEOUT
                && status != StatusCode::TOO_MANY_REQUESTS
        })
    }
}
