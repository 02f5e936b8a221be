use std::fmt::{self, Debug, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tonic::Status;

use crate::pipeline::ResponseStream;
use crate::pipeline::call::{CallGuard, CallOutcome};

/// Server-streaming response that reports its outcome when it ends.
///
/// The first error or the end of the stream finishes the call. If the
/// transport drops the stream first, the guard reports a cancellation.
pub struct ObservedStream<T> {
    inner: ResponseStream<T>,
    guard: Option<CallGuard>,
}

impl<T> ObservedStream<T> {
    pub(crate) const fn new(inner: ResponseStream<T>, guard: CallGuard) -> Self {
        Self {
            inner,
            guard: Some(guard),
        }
    }

    fn finish(&mut self, outcome: CallOutcome) {
        if let Some(guard) = self.guard.take() {
            guard.finish(outcome);
        }
    }
}

impl<T> Stream for ObservedStream<T> {
    type Item = Result<T, Status>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let item = match this.inner.poll_next_unpin(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(item) => item,
        };
        match &item {
            Some(Ok(_)) => {}
            Some(Err(status)) => this.finish(CallOutcome::from_status(status)),
            None => this.finish(CallOutcome::Completed),
        }
        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> Debug for ObservedStream<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservedStream")
            .field("finished", &self.guard.is_none())
            .finish_non_exhaustive()
    }
}
