//! Core limiter implementation

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::trace;

/// Returned when a task is submitted to a closed limiter
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("concurrency limiter is closed")]
pub struct LimiterClosed;

/// FIFO admission gate with a fixed number of slots
///
/// Waiting tasks are admitted in the order they first asked for a slot
/// (`tokio::sync::Semaphore` is fair). Completion order is unconstrained.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    semaphore: Semaphore,
    capacity: usize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ConcurrencyLimiter {
    /// Create a limiter; a capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Semaphore::new(capacity),
            capacity,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Run `task` once a slot is free
    ///
    /// The task is not polled before admission. Its output is returned as is,
    /// so a failing task only affects its own caller.
    pub async fn run<F, T>(&self, task: F) -> Result<T, LimiterClosed>
    where
        F: Future<Output = T>,
    {
        let _permit = self.semaphore.acquire().await.map_err(|_| LimiterClosed)?;
        let _slot = SlotGuard::enter(self);
        Ok(task.await)
    }

    /// Stop admitting tasks; queued and future submissions get `LimiterClosed`
    ///
    /// Tasks already running are not interrupted.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tasks currently executing
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Highest number of tasks that ever executed at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Acquire)
    }

    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Keeps the in-flight counter right even if the task is dropped mid-way
struct SlotGuard<'a> {
    limiter: &'a ConcurrencyLimiter,
}

impl<'a> SlotGuard<'a> {
    fn enter(limiter: &'a ConcurrencyLimiter) -> Self {
        let now = limiter.in_flight.fetch_add(1, Ordering::AcqRel) + 1;
        limiter.peak_in_flight.fetch_max(now, Ordering::AcqRel);
        trace!(in_flight = now, capacity = limiter.capacity, "Limiter slot acquired");
        Self { limiter }
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        let now = self.limiter.in_flight.fetch_sub(1, Ordering::AcqRel) - 1;
        trace!(in_flight = now, "Limiter slot released");
    }
}
