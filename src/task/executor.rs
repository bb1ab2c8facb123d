use crate::runtime::event::{EventSink, SystemEvent};
use async_executor::{LocalExecutor, Task};
use std::future::Future;
use std::rc::Rc;

/// Runs the editor's asynchronous steps on the local executor and posts
/// each result back to the event queue.
pub struct TaskExecutor {
    executor: Rc<LocalExecutor<'static>>,
    sink: EventSink,
    running: Vec<Task<()>>,
}

impl TaskExecutor {
    pub fn new(executor: Rc<LocalExecutor<'static>>, sink: EventSink) -> Self {
        Self {
            executor,
            sink,
            running: Vec::new(),
        }
    }

    pub fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = SystemEvent> + 'static,
    {
        self.running.retain(|task| !task.is_finished());
        let sink = self.sink.clone();
        let task = self.executor.spawn(async move {
            let event = work.await;
            sink.send(event);
        });
        self.running.push(task);
    }

    pub fn in_flight(&self) -> usize {
        self.running.iter().filter(|task| !task.is_finished()).count()
    }

    /// Drops every in-flight task, which cancels it at its next suspension.
    pub fn cancel_all(&mut self) {
        self.running.clear();
    }
}
