use bytes::Bytes;
use http_body::{Frame, SizeHint};
use std::{
    convert::Infallible,
    pin::Pin,
    task::{self, Poll},
};

/// Request body
///
/// Backend requests are small JSON documents, they are always sent as a single frame.
#[derive(Clone, Debug, Default)]
pub struct Body {
    chunk: Option<Bytes>,
}

impl Body {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn data<D>(data: D) -> Self
    where
        D: Into<Bytes>,
    {
        let chunk: Bytes = data.into();
        Self {
            chunk: (!chunk.is_empty()).then_some(chunk),
        }
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Self::data(value)
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Self::data(value)
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::data(value)
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Self::data(value)
    }
}

impl http_body::Body for Body {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut task::Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.get_mut().chunk.take().map(|chunk| Ok(Frame::data(chunk))))
    }

    fn is_end_stream(&self) -> bool {
        self.chunk.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        let len = self.chunk.as_ref().map_or(0, Bytes::len);
        SizeHint::with_exact(len as u64)
    }
}
