//! Execution methods: how a unit of logger work gets run
//!
//! A logger hands every piece of work (a log call past the level gate, a
//! level change, a filter edit) to exactly one [`ExecutionMethod`]. The
//! synchronous variant runs it inline under a re-entrant lock; the
//! asynchronous variant queues it on a single serial worker thread.

use super::error::{panic_message, LoggerError, Result};
use crossbeam_channel::{bounded, unbounded, Sender};
use parking_lot::ReentrantMutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

/// Default shutdown timeout for the serial worker (5 seconds)
///
/// Used when a worker is dropped without an explicit `shutdown()` call.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Thread name used by [`ExecutionMethod::asynchronous`]
pub const DEFAULT_WORKER_NAME: &str = "logger-worker";

type Job = Box<dyn FnOnce() + Send + 'static>;

pub enum ExecutionMethod {
    /// Run work inline on the calling thread while holding the lock.
    ///
    /// The lock is re-entrant: a filter or writer that logs through the same
    /// logger on the same thread does not deadlock.
    Synchronous(Arc<ReentrantMutex<()>>),
    /// Queue work on a dedicated serial worker, FIFO across all callers.
    Asynchronous(SerialWorker),
}

impl ExecutionMethod {
    /// Synchronous execution with a fresh lock
    #[must_use]
    pub fn synchronous() -> Self {
        ExecutionMethod::Synchronous(Arc::new(ReentrantMutex::new(())))
    }

    /// Synchronous execution under a lock shared with other loggers
    #[must_use]
    pub fn synchronous_with(mutex: Arc<ReentrantMutex<()>>) -> Self {
        ExecutionMethod::Synchronous(mutex)
    }

    /// Asynchronous execution on a new worker named [`DEFAULT_WORKER_NAME`]
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn the worker thread, like
    /// `std::thread::spawn`. Use [`ExecutionMethod::asynchronous_named`] to
    /// handle that case.
    #[must_use]
    pub fn asynchronous() -> Self {
        ExecutionMethod::Asynchronous(
            SerialWorker::spawn(DEFAULT_WORKER_NAME).expect("failed to spawn logger worker thread"),
        )
    }

    /// Asynchronous execution on a new worker thread with the given name
    pub fn asynchronous_named(name: impl Into<String>) -> Result<Self> {
        SerialWorker::spawn(name).map(ExecutionMethod::Asynchronous)
    }

    #[inline]
    pub fn is_synchronous(&self) -> bool {
        matches!(self, ExecutionMethod::Synchronous(_))
    }

    /// Run `work` under this method's concurrency discipline.
    ///
    /// Synchronous: blocks until `work` has run; the lock is released on
    /// every exit path, unwinding included. Asynchronous: returns at once.
    pub fn perform<F>(&self, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            ExecutionMethod::Synchronous(mutex) => {
                let _guard = mutex.lock();
                work();
            }
            ExecutionMethod::Asynchronous(worker) => worker.submit(Box::new(work)),
        }
    }

    /// Run `work` like [`perform`](Self::perform) and wait for its result.
    ///
    /// Under asynchronous execution the work is ordered after everything
    /// queued before it, so this doubles as a barrier.
    pub fn perform_and_wait<F, R>(&self, work: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        match self {
            ExecutionMethod::Synchronous(mutex) => {
                let _guard = mutex.lock();
                panic::catch_unwind(AssertUnwindSafe(work)).map_err(LoggerError::from_panic)
            }
            ExecutionMethod::Asynchronous(worker) => worker.submit_and_wait(work),
        }
    }

    /// Stop the serial worker after it drains its queue.
    ///
    /// Returns `true` when every queued job ran within `timeout`. Always
    /// `true` for synchronous execution.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        match self {
            ExecutionMethod::Synchronous(_) => true,
            ExecutionMethod::Asynchronous(worker) => worker.shutdown(timeout),
        }
    }
}

impl Default for ExecutionMethod {
    fn default() -> Self {
        Self::synchronous()
    }
}

impl std::fmt::Debug for ExecutionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMethod::Synchronous(_) => f.write_str("Synchronous"),
            ExecutionMethod::Asynchronous(worker) => {
                f.debug_tuple("Asynchronous").field(&worker.name()).finish()
            }
        }
    }
}

/// A single dedicated thread draining a FIFO queue of work.
pub struct SerialWorker {
    name: String,
    sender: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
    thread_id: ThreadId,
}

impl SerialWorker {
    pub fn spawn(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LoggerError::config("SerialWorker", "worker name must not be empty"));
        }

        let (sender, receiver) = unbounded::<Job>();
        let worker_name = name.clone();

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                // Runs until every sender is gone and the queue is drained
                while let Ok(job) = receiver.recv() {
                    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                        eprintln!(
                            "[LOGGER CRITICAL] Work on '{}' panicked: {}. \
                             Queued work continues.",
                            worker_name,
                            panic_message(payload.as_ref())
                        );
                    }
                }
            })
            .map_err(|source| LoggerError::WorkerSpawn {
                name: name.clone(),
                source,
            })?;

        let thread_id = handle.thread().id();

        Ok(Self {
            name,
            sender: Some(sender),
            handle: Some(handle),
            thread_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the calling thread is this worker
    #[inline]
    pub fn is_current_thread(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Queue a job; silently discarded once the worker is shut down
    fn submit(&self, job: Job) {
        if let Some(ref sender) = self.sender {
            // Disconnected only if the worker thread died; nothing to report to
            let _ = sender.send(job);
        }
    }

    fn submit_and_wait<F, R>(&self, work: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        // Waiting on our own queue from inside a job would never return
        if self.is_current_thread() {
            return panic::catch_unwind(AssertUnwindSafe(work)).map_err(LoggerError::from_panic);
        }

        let (result_tx, result_rx) = bounded(1);
        self.submit(Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(work));
            let _ = result_tx.send(outcome);
        }));

        match result_rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(LoggerError::from_panic(payload)),
            Err(_) => Err(LoggerError::WorkerStopped),
        }
    }

    /// Close the queue, let the worker drain it, and join.
    ///
    /// Returns `false` if the worker did not finish within `timeout` or
    /// died abnormally.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        // Closing the channel lets the worker finish pending jobs and exit
        drop(self.sender.take());

        let Some(ref handle) = self.handle else {
            return true;
        };

        // Joining ourselves would deadlock; the thread exits once the queue drains
        if self.is_current_thread() {
            return true;
        }

        let start = Instant::now();
        while !handle.is_finished() {
            if start.elapsed() >= timeout {
                // The handle stays so a later shutdown can still wait for the worker
                eprintln!(
                    "[LOGGER WARNING] Serial worker '{}' did not finish within {:?}. \
                     Queued work may be lost.",
                    self.name, timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(1));
        }

        let Some(handle) = self.handle.take() else {
            return true;
        };
        if let Err(e) = handle.join() {
            eprintln!(
                "[LOGGER ERROR] Serial worker '{}' panicked during shutdown: {:?}",
                self.name, e
            );
            return false;
        }
        true
    }
}

impl Drop for SerialWorker {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}
