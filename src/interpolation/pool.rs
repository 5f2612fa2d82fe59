//! Fixed-size worker pool for per-feature tasks.
//!
//! Tasks are fed through a `crossbeam-channel` queue. The queue is closed by
//! dropping the sender once every task is enqueued, so each worker exits when
//! `recv` fails. Workers run inside [`std::thread::scope`] and borrow the
//! caller's data directly.
//!
//! Results are appended to a shared buffer under a mutex, once per task.
//! If any worker panics the whole run fails and no results are returned.
//! If the OS refuses a thread the run continues on the workers already
//! started, or on the calling thread when none could be started.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::thread;

use crossbeam_channel::{Receiver, unbounded};
use thiserror::Error;

/// Worker pool errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Worker {worker} panicked: {message}")]
    WorkerPanicked { worker: usize, message: String },

    #[error("Only {completed} of {expected} tasks completed")]
    Incomplete { completed: usize, expected: usize },
}

/// Fixed-size pool of scoped worker threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerPool {
    workers: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(0)
    }
}

impl WorkerPool {
    /// Create a pool with `workers` threads; 0 means host parallelism.
    pub fn new(workers: usize) -> Self {
        let workers = if workers == 0 {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        } else {
            workers
        };
        Self { workers }
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `job` once per task and return every result in task order.
    ///
    /// Either all tasks complete or an error is returned.
    pub fn run<T, R, F>(&self, tasks: Vec<T>, job: F) -> Result<Vec<R>, PoolError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
    {
        let expected = tasks.len();
        if expected == 0 {
            return Ok(Vec::new());
        }

        let (tx, rx) = unbounded();
        for task in tasks.into_iter().enumerate() {
            tx.send(task).map_err(|_| PoolError::Incomplete {
                completed: 0,
                expected,
            })?;
        }
        drop(tx);

        let workers = self.workers.min(expected);
        let results: Mutex<Vec<(usize, R)>> = Mutex::new(Vec::with_capacity(expected));

        log::debug!("Running {} tasks on {} workers", expected, workers);

        let failure = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            for worker in 0..workers {
                let worker_rx = rx.clone();
                let job = &job;
                let results = &results;
                let spawned = thread::Builder::new()
                    .name(format!("fill-worker-{}", worker))
                    .spawn_scoped(scope, move || drain_queue(&worker_rx, job, results));
                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(e) => {
                        log::warn!("Failed to spawn worker {}: {}", worker, e);
                        break;
                    }
                }
            }

            if handles.is_empty() {
                log::warn!("No worker threads available, running tasks inline");
                drain_queue(&rx, &job, &results);
            }

            let mut failure = None;
            for (worker, handle) in handles {
                if let Err(payload) = handle.join() {
                    let message = panic_message(payload.as_ref());
                    log::error!("Worker {} panicked: {}", worker, message);
                    failure.get_or_insert(PoolError::WorkerPanicked { worker, message });
                }
            }
            failure
        });

        if let Some(e) = failure {
            return Err(e);
        }

        let mut results = results
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if results.len() != expected {
            return Err(PoolError::Incomplete {
                completed: results.len(),
                expected,
            });
        }
        results.sort_unstable_by_key(|(index, _)| *index);
        Ok(results.into_iter().map(|(_, r)| r).collect())
    }
}

/// Run queued tasks until the queue is empty and closed.
fn drain_queue<T, R, F>(rx: &Receiver<(usize, T)>, job: &F, results: &Mutex<Vec<(usize, R)>>)
where
    F: Fn(T) -> R,
{
    while let Ok((index, task)) = rx.recv() {
        let output = job(task);
        results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((index, output));
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_zero_means_host_parallelism() {
        assert!(WorkerPool::new(0).workers() >= 1);
        assert_eq!(WorkerPool::new(3).workers(), 3);
    }

    #[test]
    fn test_results_in_task_order() {
        let pool = WorkerPool::new(4);
        let tasks: Vec<u32> = (0..100).collect();

        let results = pool.run(tasks, |n| n * 2).unwrap();

        assert_eq!(results, (0..100).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_task_runs_once() {
        let calls = AtomicUsize::new(0);
        let pool = WorkerPool::new(3);

        let results = pool
            .run((0..17).collect(), |n: usize| {
                calls.fetch_add(1, Ordering::SeqCst);
                n
            })
            .unwrap();

        assert_eq!(results.len(), 17);
        assert_eq!(calls.load(Ordering::SeqCst), 17);
    }

    #[test]
    fn test_empty_task_list() {
        let results: Vec<u8> = WorkerPool::new(2).run(Vec::<u8>::new(), |n| n).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_queue_drains_on_calling_thread() {
        let (tx, rx) = unbounded();
        for task in (0..5u32).enumerate() {
            tx.send(task).unwrap();
        }
        drop(tx);
        let results = Mutex::new(Vec::new());

        drain_queue(&rx, &|n: u32| n + 10, &results);

        let mut results = results.into_inner().unwrap();
        results.sort_unstable();
        assert_eq!(results, vec![(0, 10), (1, 11), (2, 12), (3, 13), (4, 14)]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_more_workers_than_tasks() {
        let results = WorkerPool::new(16).run(vec!['a', 'b'], |c| c.to_ascii_uppercase());
        assert_eq!(results, Ok(vec!['A', 'B']));
    }

    #[test]
    fn test_panicking_worker_fails_run() {
        let pool = WorkerPool::new(2);

        let result = pool.run((0..8).collect(), |n: u32| {
            if n == 5 {
                panic!("task {} failed", n);
            }
            n
        });

        assert!(matches!(result, Err(PoolError::WorkerPanicked { .. })));
    }
}
