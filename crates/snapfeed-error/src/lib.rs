#[macro_use]
extern crate tracing;

use std::fmt::{self, Debug, Display};

pub use self::ext::ResultExt;

mod axum;
mod ext;
mod graphql;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[macro_export]
macro_rules! bail {
    ($(type = $type:expr,)? $msg:expr) => {
        return Err($crate::snapfeed_error!($(type = $type,)? $msg));
    };
}

#[macro_export]
macro_rules! snapfeed_error {
    (type = $type:expr, $msg:expr) => {
        $crate::Error::msg($msg).with_error_type($type)
    };
    ($msg:expr) => {
        $crate::snapfeed_error!(type = $crate::ErrorType::Other(None), $msg)
    };
}

/// Kind of an error
///
/// Decides how the error is presented to the client. The optional strings are user-facing messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorType {
    BadRequest(Option<String>),
    NotFound,
    Unauthorized(Option<String>),
    Other(Option<String>),
}

#[derive(Debug)]
pub struct Error {
    ty: ErrorType,
    inner: eyre::Report,
}

impl Error {
    #[inline]
    pub fn new<E>(ty: ErrorType, err: E) -> Self
    where
        E: Into<eyre::Report>,
    {
        Self {
            ty,
            inner: err.into(),
        }
    }

    #[inline]
    pub fn msg<M>(msg: M) -> Self
    where
        M: Debug + Display + Send + Sync + 'static,
    {
        eyre::Report::msg(msg).into()
    }

    #[must_use]
    pub fn error_type(&self) -> &ErrorType {
        &self.ty
    }

    #[must_use]
    pub fn with_error_type(self, ty: ErrorType) -> Self {
        Self { ty, ..self }
    }

    /// Message that is safe to show to the client
    ///
    /// Errors of type [`ErrorType::Other`] without an explicit message never leak their cause.
    #[must_use]
    pub fn public_message(&self) -> String {
        match &self.ty {
            ErrorType::BadRequest(Some(msg))
            | ErrorType::Unauthorized(Some(msg))
            | ErrorType::Other(Some(msg)) => msg.clone(),
            ErrorType::BadRequest(None) => self.inner.to_string(),
            ErrorType::NotFound => "Not found".into(),
            ErrorType::Unauthorized(None) => "Authentication required".into(),
            ErrorType::Other(None) => "Internal server error".into(),
        }
    }
}

impl<T> From<T> for Error
where
    T: Into<eyre::Report>,
{
    fn from(value: T) -> Self {
        Self {
            ty: ErrorType::Other(None),
            inner: value.into(),
        }
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <eyre::Report as fmt::Display>::fmt(&self.inner, f)
    }
}
