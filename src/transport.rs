//! Stdio plumbing that lets pending tool calls finish after the client hangs up.
//!
//! The rmcp service loop stops as soon as its input reaches end-of-file, which
//! drops any response still being computed. `DrainingReader` holds the EOF back
//! until every tracked call has completed and its response had time to be
//! written.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll, ready};
use std::time::Duration;

use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::Notify;

/// Time allowed for requests already read to reach their handler, and for
/// finished responses to reach the output.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_millis(50);

/// Counts tool calls that are currently executing.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    inner: Arc<InFlightInner>,
}

#[derive(Debug, Default)]
struct InFlightInner {
    count: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a call as started. The call is finished when the guard drops.
    pub fn enter(&self) -> InFlightGuard {
        self.inner.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            inner: self.inner.clone(),
        }
    }

    /// Number of calls currently executing.
    pub fn count(&self) -> usize {
        self.inner.count.load(Ordering::SeqCst)
    }

    /// Wait until no call is executing.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.count() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Keeps a call counted in its `InFlight` tracker while alive.
#[derive(Debug)]
pub struct InFlightGuard {
    inner: Arc<InFlightInner>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.inner.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}

/// Reader that reports end-of-file only once in-flight calls have drained.
pub struct DrainingReader<R> {
    inner: R,
    in_flight: InFlight,
    grace: Duration,
    drain: Option<Pin<Box<dyn Future<Output = ()> + Send>>>,
    eof: bool,
}

impl<R> DrainingReader<R> {
    pub fn new(inner: R, in_flight: InFlight) -> Self {
        Self::with_grace(inner, in_flight, DEFAULT_DRAIN_GRACE)
    }

    pub fn with_grace(inner: R, in_flight: InFlight, grace: Duration) -> Self {
        Self {
            inner,
            in_flight,
            grace,
            drain: None,
            eof: false,
        }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for DrainingReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();

        if this.eof {
            return Poll::Ready(Ok(()));
        }

        if this.drain.is_none() {
            if buf.remaining() == 0 {
                return Pin::new(&mut this.inner).poll_read(cx, buf);
            }

            let before = buf.filled().len();
            ready!(Pin::new(&mut this.inner).poll_read(cx, buf))?;
            if buf.filled().len() > before {
                return Poll::Ready(Ok(()));
            }

            tracing::debug!(
                pending = this.in_flight.count(),
                "Input closed, waiting for pending tool calls"
            );
            let in_flight = this.in_flight.clone();
            let grace = this.grace;
            this.drain = Some(Box::pin(async move {
                tokio::time::sleep(grace).await;
                in_flight.wait_idle().await;
                tokio::time::sleep(grace).await;
            }));
        }

        if let Some(drain) = this.drain.as_mut() {
            ready!(drain.as_mut().poll(cx));
        }
        this.drain = None;
        this.eof = true;
        Poll::Ready(Ok(()))
    }
}
