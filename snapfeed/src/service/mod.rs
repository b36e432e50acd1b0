use snapfeed_error::{Error, ErrorType};

pub mod auth;
pub mod post;

/// Convert a backend error into an application error
///
/// Rejections caused by the caller's input (4xx) carry the backend's message and get the error type built by `ty`.
/// Anything else is an internal error whose details stay in the logs.
fn backend_error<F>(err: snapfeed_supabase::Error, ty: F) -> Error
where
    F: FnOnce(Option<String>) -> ErrorType,
{
    if err.is_client_error() {
        let message = err.to_string();
        Error::new(ty(Some(message)), err)
    } else {
        Error::from(err)
    }
}
