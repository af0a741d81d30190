//! Execution of asynchronous event callbacks.
//!
//! By default every asynchronous firing gets a fresh, detached OS thread
//! that runs the callback once and exits ([`AsyncPolicy::ThreadPerEvent`]).
//! Nothing bounds how many of those threads run at the same time, and a
//! launched callback cannot be cancelled. [`AsyncPolicy::Pooled`] instead
//! queues firings onto a fixed-size rayon pool, which caps concurrency at
//! the pool size; queued firings wait for a free worker.
//!
//! [`AsyncExecutor::in_flight`] reports how many callbacks are currently
//! queued or running under either policy.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use rayon::{ThreadPool as RayonThreadPool, ThreadPoolBuilder};

use crate::error::{CoreError, EventError};

/// How asynchronous callbacks are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsyncPolicy {
    /// One new thread per firing, with no upper bound.
    #[default]
    ThreadPerEvent,
    /// A fixed number of pooled worker threads.
    Pooled {
        /// Number of worker threads in the pool.
        threads: usize,
    },
}

/// Configuration for an [`AsyncExecutor`].
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Scheduling policy.
    pub policy: AsyncPolicy,
    /// Name prefix for worker threads.
    pub thread_name: String,
    /// Stack size for worker threads in bytes.
    pub stack_size: Option<usize>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            policy: AsyncPolicy::default(),
            thread_name: "tinygui-async".to_string(),
            stack_size: None,
        }
    }
}

impl ExecutorConfig {
    /// Create a configuration that uses a pool of `threads` workers.
    pub fn pooled(threads: usize) -> Self {
        Self {
            policy: AsyncPolicy::Pooled { threads },
            ..Default::default()
        }
    }
}

#[derive(Default)]
struct InFlight {
    count: Mutex<usize>,
    idle: Condvar,
}

impl InFlight {
    fn enter(&self) {
        *self.count.lock() += 1;
    }

    fn leave(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.idle.notify_all();
        }
    }
}

/// Decrements the in-flight count when a job finishes, even by unwinding.
struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.leave();
    }
}

/// Runs asynchronous event callbacks according to an [`AsyncPolicy`].
///
/// Cloning is cheap; clones share the pool and the counters.
#[derive(Clone)]
pub struct AsyncExecutor {
    config: Arc<ExecutorConfig>,
    pool: Option<Arc<RayonThreadPool>>,
    in_flight: Arc<InFlight>,
    spawned: Arc<AtomicU64>,
}

impl AsyncExecutor {
    /// Create an executor from a configuration.
    ///
    /// Fails only when a pooled policy cannot build its pool.
    pub fn new(config: ExecutorConfig) -> Result<Self, CoreError> {
        let pool = match config.policy {
            AsyncPolicy::ThreadPerEvent => None,
            AsyncPolicy::Pooled { threads } => {
                let name = config.thread_name.clone();
                let mut builder = ThreadPoolBuilder::new()
                    .num_threads(threads.max(1))
                    .thread_name(move |index| format!("{name}-{index}"));
                if let Some(stack_size) = config.stack_size {
                    builder = builder.stack_size(stack_size);
                }
                let pool = builder
                    .build()
                    .map_err(|e| CoreError::PoolCreation(e.to_string()))?;
                Some(Arc::new(pool))
            }
        };

        tracing::debug!(target: "tinygui_core::executor", policy = ?config.policy, "async executor created");

        Ok(Self {
            config: Arc::new(config),
            pool,
            in_flight: Arc::new(InFlight::default()),
            spawned: Arc::new(AtomicU64::new(0)),
        })
    }

    /// An executor that spawns one thread per firing.
    pub fn thread_per_event() -> Self {
        Self {
            config: Arc::new(ExecutorConfig::default()),
            pool: None,
            in_flight: Arc::new(InFlight::default()),
            spawned: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The policy this executor was built with.
    pub fn policy(&self) -> AsyncPolicy {
        self.config.policy
    }

    /// Number of callbacks queued or running right now.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.count.lock()
    }

    /// Total number of callbacks handed to this executor.
    pub fn total_spawned(&self) -> u64 {
        self.spawned.load(Ordering::Relaxed)
    }

    /// Block until no callback is in flight or `timeout` elapses.
    ///
    /// Returns `true` if the executor went idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut count = self.in_flight.count.lock();
        while *count > 0 {
            if self.in_flight.idle.wait_until(&mut count, deadline).timed_out() {
                return *count == 0;
            }
        }
        true
    }

    /// Run `job` off the calling thread.
    pub fn spawn<F>(&self, job: F) -> Result<(), EventError>
    where
        F: FnOnce() + Send + 'static,
    {
        let sequence = self.spawned.fetch_add(1, Ordering::Relaxed);
        self.in_flight.enter();
        let guard = InFlightGuard(self.in_flight.clone());

        match &self.pool {
            Some(pool) => {
                pool.spawn(move || {
                    let _guard = guard;
                    job();
                });
                Ok(())
            }
            None => {
                let mut builder =
                    thread::Builder::new().name(format!("{}-{}", self.config.thread_name, sequence));
                if let Some(stack_size) = self.config.stack_size {
                    builder = builder.stack_size(stack_size);
                }
                // The guard moves into the closure; if spawning fails the
                // closure is dropped and the guard releases the count.
                builder
                    .spawn(move || {
                        let _guard = guard;
                        job();
                    })
                    .map(drop)
                    .map_err(|e| {
                        tracing::error!(target: "tinygui_core::executor", error = %e, "failed to spawn async worker");
                        EventError::SpawnFailed(e.to_string())
                    })
            }
        }
    }
}

impl Default for AsyncExecutor {
    fn default() -> Self {
        Self::thread_per_event()
    }
}

impl std::fmt::Debug for AsyncExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncExecutor")
            .field("policy", &self.config.policy)
            .field("in_flight", &self.in_flight())
            .field("total_spawned", &self.total_spawned())
            .finish()
    }
}

static_assertions::assert_impl_all!(AsyncExecutor: Send, Sync);
