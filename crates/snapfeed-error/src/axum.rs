use crate::{Error, ErrorType};
use axum::response::{IntoResponse, Response};
use http::StatusCode;

impl ErrorType {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(..) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized(..) => StatusCode::UNAUTHORIZED,
            Self::Other(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.ty.status_code();
        if status.is_server_error() {
            error!(error = ?self.inner, "request failed");
        } else {
            debug!(error = ?self.inner, %status);
        }

        (status, self.public_message()).into_response()
    }
}

#[cfg(test)]
mod test {
    use crate::{snapfeed_error, ErrorType};
    use axum::response::IntoResponse;
    use http::StatusCode;

    #[test]
    fn status_follows_error_type() {
        let response =
            snapfeed_error!(type = ErrorType::Unauthorized(None), "no token").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = snapfeed_error!("backend down").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
