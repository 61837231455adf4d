use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Asks the render side to produce a frame. Returns immediately.
pub trait FrameScheduler: Send + Sync {
    fn schedule_frame(&self);
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameSyncError {
    #[error("frame was not rendered within {0:?}")]
    Timeout(Duration),
    #[error("renderer has shut down")]
    Closed,
}

#[derive(Debug, Default)]
struct State {
    done: bool,
    closed: bool,
    waker: Option<Waker>,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    cond: Condvar,
}

impl Shared {
    fn signal(&self, update: impl FnOnce(&mut State)) {
        let waker = {
            let mut state = self.state.lock();
            update(&mut state);
            state.waker.take()
        };
        self.cond.notify_all();
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Simulation-side half of the frame barrier.
///
/// Turns the asynchronous "schedule a frame" call into a request the caller can
/// wait on, so a fixed-tick simulation never runs ahead of frame production.
/// The barrier guards a single completion flag with its own lock, separate from
/// the scene lock.
pub struct FrameSync {
    shared: Arc<Shared>,
    scheduler: Arc<dyn FrameScheduler>,
}

impl FrameSync {
    pub fn new(scheduler: Arc<dyn FrameScheduler>) -> Self {
        Self { shared: Arc::new(Shared::default()), scheduler }
    }

    /// Render-side half; hand it to whatever runs on the render thread.
    pub fn completer(&self) -> FrameCompleter {
        FrameCompleter { shared: Arc::clone(&self.shared) }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Clears the completion flag and schedules a frame.
    ///
    /// The returned ticket resolves once the render side reports the frame done.
    pub fn schedule(&self) -> FrameTicket {
        let closed = {
            let mut state = self.shared.state.lock();
            state.done = false;
            state.closed
        };
        if !closed {
            self.scheduler.schedule_frame();
        }
        FrameTicket { shared: Arc::clone(&self.shared) }
    }

    /// Schedules a frame and blocks until it has been rendered.
    ///
    /// There is no timeout: a stalled render thread blocks the caller until the
    /// barrier is closed. Use [`request_draw_timeout`](Self::request_draw_timeout)
    /// when a recovery path is needed.
    pub fn request_draw(&self) {
        self.schedule().wait();
    }

    pub fn request_draw_timeout(&self, timeout: Duration) -> Result<(), FrameSyncError> {
        self.schedule().wait_timeout(timeout)
    }
}

/// Pending frame request.
///
/// Either block on it with [`wait`](Self::wait) or `.await` it.
#[must_use = "a frame ticket does nothing unless waited on"]
pub struct FrameTicket {
    shared: Arc<Shared>,
}

impl FrameTicket {
    /// Blocks until the frame is done or the barrier is closed.
    pub fn wait(self) {
        let mut state = self.shared.state.lock();
        // Re-check after every wakeup; spurious wakeups just loop.
        while !state.done && !state.closed {
            self.shared.cond.wait(&mut state);
        }
    }

    /// Like [`wait`](Self::wait), giving up after `timeout`.
    ///
    /// A timeout too large to express as a deadline waits without one.
    pub fn wait_timeout(self, timeout: Duration) -> Result<(), FrameSyncError> {
        let mut state = self.shared.state.lock();
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            while !state.done && !state.closed {
                self.shared.cond.wait(&mut state);
            }
            return if state.done { Ok(()) } else { Err(FrameSyncError::Closed) };
        };
        loop {
            if state.done {
                return Ok(());
            }
            if state.closed {
                return Err(FrameSyncError::Closed);
            }
            if self.shared.cond.wait_until(&mut state, deadline).timed_out() {
                return match (state.done, state.closed) {
                    (true, _) => Ok(()),
                    (false, true) => Err(FrameSyncError::Closed),
                    (false, false) => Err(FrameSyncError::Timeout(timeout)),
                };
            }
        }
    }
}

impl Future for FrameTicket {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.shared.state.lock();
        if state.done || state.closed {
            Poll::Ready(())
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// Render-side half of the frame barrier.
#[derive(Clone)]
pub struct FrameCompleter {
    shared: Arc<Shared>,
}

impl FrameCompleter {
    /// Marks the requested frame as rendered and wakes the waiter.
    pub fn complete(&self) {
        self.shared.signal(|state| state.done = true);
    }

    /// Releases current and future waiters permanently.
    pub fn close(&self) {
        self.shared.signal(|state| state.closed = true);
    }
}
