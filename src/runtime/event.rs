use crate::core::EditorError;
use crate::provider::MapHandle;
use crate::runtime::intent::UserIntent;
use crate::task::{CommitCompletion, SearchCompletion};
use async_channel::{Receiver, Sender};

/// Events produced by the editor's own machinery rather than the operator:
/// timers and the completions of the asynchronous steps.
#[derive(Debug)]
pub enum SystemEvent {
    RuntimeLoaded(Result<(), EditorError>),
    MapCreated(Result<Box<dyn MapHandle>, EditorError>),
    /// The search debounce window elapsed.
    SearchDue { text: String },
    SearchCompleted(SearchCompletion),
    CommitCompleted(CommitCompletion),
    Destroyed,
}

#[derive(Debug)]
pub enum EditorEvent {
    Intent(UserIntent),
    System(SystemEvent),
}

impl From<UserIntent> for EditorEvent {
    fn from(intent: UserIntent) -> Self {
        Self::Intent(intent)
    }
}

impl From<SystemEvent> for EditorEvent {
    fn from(event: SystemEvent) -> Self {
        Self::System(event)
    }
}

/// Sending half of the editor's event queue, handed to provider callbacks
/// and background tasks.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<EditorEvent>,
}

impl EventSink {
    pub fn channel() -> (Self, Receiver<EditorEvent>) {
        let (tx, rx) = async_channel::unbounded();
        (Self { tx }, rx)
    }

    pub fn send(&self, event: impl Into<EditorEvent>) {
        if self.tx.try_send(event.into()).is_err() {
            tracing::trace!("editor event dropped, runtime has stopped");
        }
    }

    pub fn close(&self) {
        self.tx.close();
    }
}
