use crate::{Error, ErrorType};
use async_graphql::ErrorExtensions;

impl ErrorType {
    /// Value of the `code` extension attached to GraphQL errors
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(..) => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized(..) => "UNAUTHENTICATED",
            Self::Other(..) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        if let ErrorType::Other(..) = self.ty {
            error!(error = ?self.inner, "request failed");
        } else {
            debug!(error = ?self.inner);
        }

        async_graphql::Error::new(self.public_message())
            .extend_with(|_err, ext| ext.set("code", self.ty.code()))
    }
}
