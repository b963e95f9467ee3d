use derivative::Derivative;
use error_stack::{report, Result};
use threadpool::ThreadPool;

use super::Error;

/// Simple thread pool executor
#[derive(Debug, Derivative)]
#[derivative(Default)]
pub struct Executor {
    #[derivative(Default(value = "ThreadPool::new(worker_count())"))]
    pool: ThreadPool,
}

/// NUM_CPU - 1 workers, at least 1
fn worker_count() -> usize {
    match num_cpus::get() {
        0..=2 => 1,
        n => n - 1,
    }
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a task
    pub fn execute<T>(&self, f: impl FnOnce() -> T + Send + 'static) -> Task<T>
    where
        T: Send + 'static,
    {
        let (send, recv) = oneshot::channel();
        self.pool.execute(move || {
            let _ = send.send(f());
        });
        Task { recv }
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        self.pool.join();
    }
}

/// Handle for a task spawned in the executor
pub struct Task<T> {
    recv: oneshot::Receiver<T>,
}

impl<T> Task<T> {
    /// Wait for the task to complete and return the result
    ///
    /// Errors if the task panicked before sending its result
    pub fn wait(self) -> Result<T, Error> {
        self.recv
            .recv()
            .map_err(|_| report!(Error::Expect("task to complete without panicking")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_return_in_spawn_order() {
        let executor = Executor::new();
        let tasks = (0..8)
            .map(|i| executor.execute(move || i * 2))
            .collect::<Vec<_>>();
        let results = tasks
            .into_iter()
            .map(|t| t.wait().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14]);
    }
}
