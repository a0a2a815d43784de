//! Closable wrapper around the uploaded byte stream.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// The request's input stream.
///
/// Closing drops the underlying reader. Closing again is a no-op, and reading
/// from a closed stream yields end-of-file.
pub struct Upload<R> {
    inner: Option<R>,
}

impl<R> Upload<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: Some(reader),
        }
    }

    /// Release the underlying reader.
    pub fn close(&mut self) {
        self.inner.take();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for Upload<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut().inner.as_mut() {
            Some(reader) => Pin::new(reader).poll_read(cx, buf),
            None => Poll::Ready(Ok(())),
        }
    }
}
