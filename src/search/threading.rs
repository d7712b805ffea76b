//! Threading primitives for root-parallel search.
//!
//! `WorkerPool` runs a batch of independent tasks on a fixed number of scoped
//! threads pulling from a shared queue, so a batch larger than the pool just
//! waits its turn. `SearchControl` is the cancellation token every worker
//! polls: an external stop flag plus an optional wall-clock deadline.

use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    mpsc, Arc, Mutex,
};
use std::thread;
use std::time::{Duration, Instant};

/// Threading configuration owned by the engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub requested_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            requested_threads: thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl ThreadingConfig {
    #[inline]
    pub fn normalized_threads(self) -> usize {
        self.requested_threads.max(1)
    }
}

/// Fixed-size pool of scoped worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    threads: usize,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    pub fn from_config(config: ThreadingConfig) -> Self {
        Self::new(config.normalized_threads())
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run `task_fn` over every task and return the results in task order.
    ///
    /// At most `threads` tasks run at once. Borrowed data may be shared with
    /// the tasks because all workers are joined before this returns; a
    /// panicking task propagates its panic to the caller.
    pub fn run<T, R, F>(&self, tasks: Vec<T>, task_fn: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
    {
        let task_count = tasks.len();
        if task_count == 0 {
            return Vec::new();
        }
        if self.threads == 1 || task_count == 1 {
            return tasks.into_iter().map(task_fn).collect();
        }

        let queue: Mutex<VecDeque<(usize, T)>> = Mutex::new(tasks.into_iter().enumerate().collect());
        let (sender, receiver) = mpsc::channel::<(usize, R)>();
        let workers = self.threads.min(task_count);

        thread::scope(|scope| {
            for _ in 0..workers {
                let sender = sender.clone();
                let queue = &queue;
                let task_fn = &task_fn;
                scope.spawn(move || loop {
                    let next = match queue.lock() {
                        Ok(mut guard) => guard.pop_front(),
                        Err(poisoned) => poisoned.into_inner().pop_front(),
                    };
                    let Some((index, task)) = next else {
                        break;
                    };
                    if sender.send((index, task_fn(task))).is_err() {
                        break;
                    }
                });
            }
        });
        drop(sender);

        let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(task_count).collect();
        for (index, result) in receiver {
            slots[index] = Some(result);
        }
        slots.into_iter().flatten().collect()
    }
}

/// Shared cancellation + accounting state for one top-level search.
#[derive(Debug)]
pub struct SearchControl {
    stop: Arc<AtomicBool>,
    deadline: Option<Instant>,
    started_at: Instant,
    nodes_visited: AtomicU64,
}

impl SearchControl {
    /// `budget` of `None` means no deadline; `stop` may be shared with a
    /// caller that wants to cancel from another thread.
    pub fn new(stop: Arc<AtomicBool>, budget: Option<Duration>) -> Self {
        let started_at = Instant::now();
        Self {
            stop,
            deadline: budget.map(|b| started_at + b),
            started_at,
            nodes_visited: AtomicU64::new(0),
        }
    }

    /// Control that never fires on its own.
    pub fn unbounded() -> Self {
        Self::new(Arc::new(AtomicBool::new(false)), None)
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// True once stopped or past the deadline; passing the deadline latches
    /// the stop flag so other workers see it without reading the clock.
    #[inline]
    pub fn should_stop(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.request_stop();
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn add_nodes(&self, n: u64) {
        self.nodes_visited.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
