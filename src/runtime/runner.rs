use crate::core::{EditorConfig, RawValue};
use crate::provider::{HostForm, PlacesGateway, PlacesProvider, RuntimeLoader};
use crate::runtime::effect::Effect;
use crate::runtime::event::{EditorEvent, EventSink, SystemEvent};
use crate::runtime::intent::UserIntent;
use crate::runtime::scheduler::Scheduler;
use crate::state::editor::{EditorPhase, EditorState};
use crate::task::execution::{
    execute_commit, execute_create_map, execute_runtime_load, execute_search,
};
use crate::task::TaskExecutor;
use async_channel::{Receiver, RecvError};
use async_executor::LocalExecutor;
use async_io::Timer;
use futures_lite::future;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// Everything one editor instance is wired to.
pub struct EditorParts {
    pub config: EditorConfig,
    pub initial_value: RawValue,
    /// Shared by every editor on the page.
    pub loader: RuntimeLoader,
    pub places: Rc<dyn PlacesProvider>,
    pub host: Rc<dyn HostForm>,
}

enum Wake {
    Event(EditorEvent),
    Timer,
    Closed,
}

impl From<Result<EditorEvent, RecvError>> for Wake {
    fn from(received: Result<EditorEvent, RecvError>) -> Self {
        match received {
            Ok(event) => Self::Event(event),
            Err(_) => Self::Closed,
        }
    }
}

/// Drives one [`EditorState`]: feeds it events, runs the timers and tasks it
/// asks for, and forwards emitted values to the host form.
pub struct EditorRuntime {
    state: Rc<RefCell<EditorState>>,
    scheduler: Scheduler,
    tasks: TaskExecutor,
    events: Receiver<EditorEvent>,
    sink: EventSink,
    host: Rc<dyn HostForm>,
    loader: RuntimeLoader,
    places: PlacesGateway,
}

impl EditorRuntime {
    pub fn new(parts: EditorParts, executor: Rc<LocalExecutor<'static>>) -> (Self, EditorHandle) {
        let (sink, events) = EventSink::channel();
        let state = Rc::new(RefCell::new(EditorState::new(
            parts.config,
            &parts.initial_value,
            sink.clone(),
        )));
        let handle = EditorHandle {
            state: Rc::clone(&state),
            sink: sink.clone(),
        };
        let runtime = Self {
            state,
            scheduler: Scheduler::new(),
            tasks: TaskExecutor::new(executor, sink.clone()),
            events,
            sink,
            host: parts.host,
            loader: parts.loader,
            places: PlacesGateway::new(parts.places),
        };
        (runtime, handle)
    }

    /// Runs until the editor is destroyed.
    pub async fn run(mut self) {
        self.start();

        while self.is_alive() {
            self.process_scheduled_events();
            if !self.is_alive() {
                break;
            }

            let wake = match self.scheduler.next_due() {
                Some(due) => {
                    let events = &self.events;
                    future::or(async { Wake::from(events.recv().await) }, async {
                        Timer::at(due).await;
                        Wake::Timer
                    })
                    .await
                }
                None => Wake::from(self.events.recv().await),
            };

            match wake {
                Wake::Event(event) => self.dispatch(event),
                Wake::Timer => {}
                Wake::Closed => break,
            }
        }

        self.shutdown();
    }

    fn start(&mut self) {
        let sink = self.sink.clone();
        let subscription = self.host.subscribe_pointer_down(Box::new(move |target| {
            sink.send(UserIntent::PointerDown(target))
        }));
        self.state
            .borrow_mut()
            .attach_pointer_subscription(subscription);

        if self.is_alive() {
            self.tasks.spawn(execute_runtime_load(self.loader.clone()));
        }
    }

    fn is_alive(&self) -> bool {
        self.state.borrow().is_alive()
    }

    fn process_scheduled_events(&mut self) {
        for event in self.scheduler.drain_ready(Instant::now()) {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: EditorEvent) {
        let effects = self.state.borrow_mut().handle_event(event);
        self.apply_effects(effects);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Schedule(command) => self.scheduler.schedule(command, Instant::now()),
                Effect::CreateMap(options) => {
                    self.tasks
                        .spawn(execute_create_map(self.loader.provider(), options));
                }
                Effect::StartSearch(invocation) => {
                    self.tasks
                        .spawn(execute_search(self.places.clone(), invocation));
                }
                Effect::StartCommit(invocation) => {
                    self.tasks
                        .spawn(execute_commit(self.places.clone(), invocation));
                }
                Effect::EmitValue(raw) => self.host.set_value(raw),
            }
        }
    }

    fn shutdown(&mut self) {
        self.scheduler.clear();
        self.tasks.cancel_all();
        self.state.borrow_mut().destroy();
        self.sink.close();
        tracing::debug!("editor runtime stopped");
    }
}

/// Spawns an editor on `executor` and returns the host's handle to it.
pub fn spawn(parts: EditorParts, executor: &Rc<LocalExecutor<'static>>) -> EditorHandle {
    let (runtime, handle) = EditorRuntime::new(parts, Rc::clone(executor));
    executor.spawn(runtime.run()).detach();
    handle
}

/// Read-only view of an editor for rendering the search box and dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub phase: EditorPhase,
    pub value: RawValue,
    pub search_text: String,
    pub dropdown_open: bool,
    pub suggestions: Vec<String>,
    pub highlighted: Option<usize>,
}

/// The host's side of a running editor.
#[derive(Clone)]
pub struct EditorHandle {
    state: Rc<RefCell<EditorState>>,
    sink: EventSink,
}

impl EditorHandle {
    pub fn set_value(&self, raw: &RawValue) {
        self.state.borrow_mut().set_external_value(raw);
    }

    pub fn value(&self) -> RawValue {
        self.state.borrow().value()
    }

    pub fn is_valid(&self) -> bool {
        self.state.borrow().is_valid()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.state.borrow().validate()
    }

    pub fn dispatch(&self, intent: UserIntent) {
        self.sink.send(intent);
    }

    pub fn phase(&self) -> EditorPhase {
        self.state.borrow().phase()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        let state = self.state.borrow();
        EditorSnapshot {
            phase: state.phase(),
            value: state.value(),
            search_text: state.search_text().to_string(),
            dropdown_open: state.is_dropdown_open(),
            suggestions: state
                .session()
                .suggestions()
                .iter()
                .map(|suggestion| suggestion.display_text.clone())
                .collect(),
            highlighted: state.session().highlighted(),
        }
    }

    /// Tears the editor down. Calling it again, or before the map exists,
    /// is harmless.
    pub fn destroy(&self) {
        match self.state.try_borrow_mut() {
            Ok(mut state) => {
                state.destroy();
            }
            Err(_) => tracing::debug!("editor busy, deferring destroy to its runtime"),
        }
        self.sink.send(SystemEvent::Destroyed);
    }
}
