//! Deferred tasks
//!
//! Generators stage file changes synchronously and hand back work that has
//! to happen after the tree is committed (package installs, mostly). A
//! [`TaskQueue`] keeps that work in the order the producing generators ran
//! and [`TaskQueue::run_serial`] awaits each task to completion before the
//! next one is even constructed.

use crate::error::Result;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

/// Future returned by a deferred task
pub type TaskFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// A named unit of work to run after all file mutations are committed
pub struct DeferredTask {
    name: String,
    run: Box<dyn FnOnce() -> TaskFuture + Send>,
}

impl DeferredTask {
    /// Create a task from a closure producing its future
    pub fn new<F, Fut>(name: impl Into<String>, run: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            run: Box::new(move || Box::pin(run())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start the task and wait for it
    pub async fn run(self) -> Result<()> {
        (self.run)().await
    }
}

impl fmt::Debug for DeferredTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredTask").field("name", &self.name).finish()
    }
}

/// Ordered list of deferred tasks
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<DeferredTask>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task
    pub fn push(&mut self, task: DeferredTask) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task names in execution order
    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(DeferredTask::name).collect()
    }

    /// Run every task in order; the first failure stops the queue
    pub async fn run_serial(self) -> Result<()> {
        let total = self.tasks.len();
        for (index, task) in self.tasks.into_iter().enumerate() {
            info!("Running task {}/{}: {}", index + 1, total, task.name());
            let name = task.name().to_string();
            task.run().await?;
            debug!("Task finished: {}", name);
        }
        Ok(())
    }
}

impl FromIterator<DeferredTask> for TaskQueue {
    fn from_iter<I: IntoIterator<Item = DeferredTask>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}
