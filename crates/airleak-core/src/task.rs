//! Background work: [`Context`], [`Progress`], [`Scheduler`], [`Task`].
//!
//! The main execution context submits a closure through a [`Scheduler`] and
//! keeps the returned [`Task`]. Completion is observed on the main context by
//! polling [`Task::try_take`] once per frame, or by blocking in
//! [`Task::wait`]. Panics inside the closure are caught at the worker
//! boundary and surface as a [`WorkerFault`].

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Single writer (the main context), single reader (the worker). Stale reads
/// only delay cancellation by one poll.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// A counter written by the worker and polled by the main context for
/// display only.
#[derive(Clone, Debug, Default)]
pub struct Progress {
    count: Arc<AtomicU64>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn incr(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// WorkerFault
// ---------------------------------------------------------------------------

/// An unexpected failure inside a background task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFault {
    pub message: String,
}

impl WorkerFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

impl fmt::Display for WorkerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "background task failed: {}", self.message)
    }
}

impl std::error::Error for WorkerFault {}

/// Outcome of a background task as seen by the main context.
pub type TaskResult<T> = Result<T, WorkerFault>;

/// Run `work`, turning a panic into a [`WorkerFault`].
pub fn run_guarded<T, F>(work: F) -> TaskResult<T>
where
    F: FnOnce() -> T,
{
    catch_unwind(AssertUnwindSafe(work)).map_err(WorkerFault::from_panic)
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// Handle to one submitted piece of background work.
pub struct Task<T> {
    rx: Receiver<TaskResult<T>>,
    handle: Option<JoinHandle<()>>,
}

impl<T> Task<T> {
    fn new(rx: Receiver<TaskResult<T>>, handle: Option<JoinHandle<()>>) -> Self {
        Self { rx, handle }
    }

    /// A task that has already finished with `result`.
    pub fn ready(result: TaskResult<T>) -> Self {
        let (tx, rx) = mpsc::channel();
        // The receiver is alive, so this cannot fail.
        let _ = tx.send(result);
        Self::new(rx, None)
    }

    /// Non-blocking poll. Returns the result once the work has finished; the
    /// result is handed out only once.
    pub fn try_take(&mut self) -> Option<TaskResult<T>> {
        match self.rx.try_recv() {
            Ok(result) => {
                self.reap();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.reap();
                Some(Err(WorkerFault::new("worker exited without a result")))
            }
        }
    }

    /// Block until the work has finished and its thread has been joined.
    pub fn wait(mut self) -> TaskResult<T> {
        let result = self
            .rx
            .recv()
            .unwrap_or_else(|_| Err(WorkerFault::new("worker exited without a result")));
        self.reap();
        result
    }

    fn reap(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("worker thread panicked outside the task guard");
            }
        }
    }
}

impl<T> fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("threaded", &self.handle.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Runs work off the main execution context.
pub trait Scheduler {
    /// Submit `work`. `name` labels the worker for diagnostics.
    fn submit<T, F>(&self, name: &str, work: F) -> Task<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static;
}

/// Spawns one named OS thread per task.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn submit<T, F>(&self, name: &str, work: F) -> Task<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name(format!("airleak-{name}"))
            .spawn(move || {
                // The main context may have dropped the task; nothing to do then.
                let _ = tx.send(run_guarded(work));
            });
        match spawned {
            Ok(handle) => Task::new(rx, Some(handle)),
            Err(e) => {
                log::warn!("could not spawn worker {name}: {e}");
                Task::ready(Err(WorkerFault::new(format!("spawn failed: {e}"))))
            }
        }
    }
}

/// Runs the work synchronously inside `submit`. The returned task is already
/// finished. Useful for deterministic hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn submit<T, F>(&self, _name: &str, work: F) -> Task<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        Task::ready(run_guarded(work))
    }
}
