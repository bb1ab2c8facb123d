//! In-memory providers and a deterministic driver for the editor state.

use crate::core::{EditorConfig, EditorError, LatLng, PlaceHandle, RawValue, Suggestion};
use crate::provider::{
    HostForm, MapEventKind, MapHandle, MapOptions, MapProvider, MarkerHandle, PlacesLibrary,
    PlacesProvider, PointerTarget, ProviderResult, Subscription, SuggestionQuery,
};
use crate::runtime::effect::Effect;
use crate::runtime::event::{EditorEvent, EventSink, SystemEvent};
use crate::runtime::intent::UserIntent;
use crate::runtime::scheduler::Scheduler;
use crate::state::editor::EditorState;
use crate::task::{CommitCompletion, CommitInvocation, SearchCompletion, SearchInvocation};
use async_channel::Receiver;
use futures_lite::future::{self, BoxedLocal};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Map provider
// ---------------------------------------------------------------------------

type PositionCallback = Rc<dyn Fn(LatLng)>;

#[derive(Default)]
struct MapLog {
    load_calls: usize,
    load_failures: VecDeque<String>,
    created: Vec<MapOptions>,
    center: Option<LatLng>,
    zoom: Option<f64>,
    markers_created: usize,
    markers_removed: usize,
    marker_position: Option<LatLng>,
    listeners: Vec<(u64, MapEventKind, PositionCallback)>,
    next_listener: u64,
    subscriptions_removed: usize,
}

#[derive(Clone, Default)]
pub struct FakeMapProvider {
    log: Rc<RefCell<MapLog>>,
}

impl FakeMapProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_load(&self, message: &str) {
        self.log
            .borrow_mut()
            .load_failures
            .push_back(message.to_string());
    }

    /// Creates a map synchronously, as `create_map` would after resolving.
    pub fn build_map(&self, options: MapOptions) -> Box<dyn MapHandle> {
        {
            let mut log = self.log.borrow_mut();
            log.center = Some(options.center);
            log.zoom = Some(options.zoom);
            log.created.push(options);
        }
        Box::new(FakeMap {
            log: Rc::clone(&self.log),
        })
    }

    pub fn load_calls(&self) -> usize {
        self.log.borrow().load_calls
    }

    pub fn maps_created(&self) -> usize {
        self.log.borrow().created.len()
    }

    pub fn last_options(&self) -> Option<MapOptions> {
        self.log.borrow().created.last().cloned()
    }

    pub fn center(&self) -> Option<LatLng> {
        self.log.borrow().center
    }

    pub fn zoom(&self) -> Option<f64> {
        self.log.borrow().zoom
    }

    pub fn markers_created(&self) -> usize {
        self.log.borrow().markers_created
    }

    pub fn live_markers(&self) -> usize {
        let log = self.log.borrow();
        log.markers_created - log.markers_removed
    }

    pub fn marker_position(&self) -> Option<LatLng> {
        self.log.borrow().marker_position
    }

    pub fn listener_count(&self) -> usize {
        self.log.borrow().listeners.len()
    }

    pub fn subscriptions_removed(&self) -> usize {
        self.log.borrow().subscriptions_removed
    }

    pub fn right_click(&self, position: LatLng) {
        let callbacks = self
            .log
            .borrow()
            .listeners
            .iter()
            .filter(|(_, kind, _)| *kind == MapEventKind::RightClick)
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect::<Vec<_>>();
        for callback in callbacks {
            callback(position);
        }
    }
}

impl MapProvider for FakeMapProvider {
    fn load_runtime(
        &self,
        _api_key: &str,
        _libraries: &[String],
    ) -> BoxedLocal<ProviderResult<()>> {
        let mut log = self.log.borrow_mut();
        log.load_calls += 1;
        let result = match log.load_failures.pop_front() {
            Some(message) => Err(message),
            None => Ok(()),
        };
        Box::pin(future::ready(result))
    }

    fn create_map(&self, options: MapOptions) -> BoxedLocal<ProviderResult<Box<dyn MapHandle>>> {
        Box::pin(future::ready(Ok(self.build_map(options))))
    }
}

struct FakeMap {
    log: Rc<RefCell<MapLog>>,
}

impl MapHandle for FakeMap {
    fn center(&self) -> LatLng {
        self.log
            .borrow()
            .center
            .unwrap_or(LatLng::new(0.0, 0.0))
    }

    fn set_center(&mut self, center: LatLng) {
        self.log.borrow_mut().center = Some(center);
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.log.borrow_mut().zoom = Some(zoom);
    }

    fn create_marker(&mut self) -> Box<dyn MarkerHandle> {
        self.log.borrow_mut().markers_created += 1;
        Box::new(FakeMarker {
            log: Rc::clone(&self.log),
            removed: false,
        })
    }

    fn on(&mut self, event: MapEventKind, callback: Box<dyn Fn(LatLng)>) -> Box<dyn Subscription> {
        let mut log = self.log.borrow_mut();
        log.next_listener += 1;
        let id = log.next_listener;
        log.listeners.push((id, event, Rc::from(callback)));
        Box::new(FakeMapSubscription {
            log: Rc::clone(&self.log),
            id,
        })
    }
}

struct FakeMarker {
    log: Rc<RefCell<MapLog>>,
    removed: bool,
}

impl MarkerHandle for FakeMarker {
    fn position(&self) -> Option<LatLng> {
        if self.removed {
            return None;
        }
        self.log.borrow().marker_position
    }

    fn set_position(&mut self, position: LatLng) {
        if !self.removed {
            self.log.borrow_mut().marker_position = Some(position);
        }
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        let mut log = self.log.borrow_mut();
        log.markers_removed += 1;
        log.marker_position = None;
    }
}

struct FakeMapSubscription {
    log: Rc<RefCell<MapLog>>,
    id: u64,
}

impl Subscription for FakeMapSubscription {
    fn remove(self: Box<Self>) {
        let mut log = self.log.borrow_mut();
        log.listeners.retain(|(id, _, _)| *id != self.id);
        log.subscriptions_removed += 1;
    }
}

// ---------------------------------------------------------------------------
// Places provider
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PlacesLog {
    import_calls: usize,
    import_failure: Option<String>,
    query_failure: Option<String>,
    responses: HashMap<String, Vec<Suggestion>>,
    places: HashMap<String, LatLng>,
    queries: Vec<SuggestionQuery>,
    resolved: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakePlaces {
    log: Rc<RefCell<PlacesLog>>,
}

impl FakePlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_import(&self, message: &str) {
        self.log.borrow_mut().import_failure = Some(message.to_string());
    }

    pub fn fail_queries(&self, message: &str) {
        self.log.borrow_mut().query_failure = Some(message.to_string());
    }

    /// Answers searches for `input` with `(display text, place id)` pairs.
    pub fn respond(&self, input: &str, suggestions: &[(&str, &str)]) {
        let suggestions = suggestions
            .iter()
            .map(|(text, handle)| Suggestion::new(*text, *handle))
            .collect();
        self.log
            .borrow_mut()
            .responses
            .insert(input.to_string(), suggestions);
    }

    pub fn add_place(&self, handle: &str, location: LatLng) {
        self.log
            .borrow_mut()
            .places
            .insert(handle.to_string(), location);
    }

    pub fn import_calls(&self) -> usize {
        self.log.borrow().import_calls
    }

    pub fn queries(&self) -> Vec<SuggestionQuery> {
        self.log.borrow().queries.clone()
    }

    pub fn resolved_handles(&self) -> Vec<String> {
        self.log.borrow().resolved.clone()
    }
}

impl PlacesProvider for FakePlaces {
    fn import_library(&self) -> BoxedLocal<ProviderResult<Rc<dyn PlacesLibrary>>> {
        let mut log = self.log.borrow_mut();
        log.import_calls += 1;
        let result: ProviderResult<Rc<dyn PlacesLibrary>> = match log.import_failure.clone() {
            Some(message) => Err(message),
            None => Ok(Rc::new(self.clone())),
        };
        Box::pin(future::ready(result))
    }
}

impl PlacesLibrary for FakePlaces {
    fn fetch_suggestions(
        &self,
        query: SuggestionQuery,
    ) -> BoxedLocal<ProviderResult<Vec<Suggestion>>> {
        let mut log = self.log.borrow_mut();
        let result = match log.query_failure.clone() {
            Some(message) => Err(message),
            None => Ok(log
                .responses
                .get(query.input.as_str())
                .cloned()
                .unwrap_or_default()),
        };
        log.queries.push(query);
        Box::pin(future::ready(result))
    }

    fn resolve(
        &self,
        handle: PlaceHandle,
        _fields: &'static [&'static str],
    ) -> BoxedLocal<ProviderResult<Option<LatLng>>> {
        let mut log = self.log.borrow_mut();
        log.resolved.push(handle.as_str().to_string());
        let location = log.places.get(handle.as_str()).copied();
        Box::pin(future::ready(Ok(location)))
    }
}

// ---------------------------------------------------------------------------
// Host form
// ---------------------------------------------------------------------------

type PointerCallback = Rc<dyn Fn(PointerTarget)>;

#[derive(Default)]
struct HostLog {
    values: Vec<RawValue>,
    listeners: Vec<(u64, PointerCallback)>,
    next_listener: u64,
    subscriptions_removed: usize,
}

#[derive(Clone, Default)]
pub struct FakeHost {
    log: Rc<RefCell<HostLog>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> Vec<RawValue> {
        self.log.borrow().values.clone()
    }

    pub fn last_value(&self) -> Option<RawValue> {
        self.log.borrow().values.last().cloned()
    }

    pub fn press(&self, target: PointerTarget) {
        let callbacks = self
            .log
            .borrow()
            .listeners
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect::<Vec<_>>();
        for callback in callbacks {
            callback(target);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.log.borrow().listeners.len()
    }

    pub fn subscriptions_removed(&self) -> usize {
        self.log.borrow().subscriptions_removed
    }
}

impl HostForm for FakeHost {
    fn set_value(&self, raw: RawValue) {
        self.log.borrow_mut().values.push(raw);
    }

    fn subscribe_pointer_down(
        &self,
        callback: Box<dyn Fn(PointerTarget)>,
    ) -> Box<dyn Subscription> {
        let mut log = self.log.borrow_mut();
        log.next_listener += 1;
        let id = log.next_listener;
        log.listeners.push((id, Rc::from(callback)));
        Box::new(FakeHostSubscription {
            log: Rc::clone(&self.log),
            id,
        })
    }
}

struct FakeHostSubscription {
    log: Rc<RefCell<HostLog>>,
    id: u64,
}

impl Subscription for FakeHostSubscription {
    fn remove(self: Box<Self>) {
        let mut log = self.log.borrow_mut();
        log.listeners.retain(|(id, _)| *id != self.id);
        log.subscriptions_removed += 1;
    }
}

// ---------------------------------------------------------------------------
// Deterministic driver
// ---------------------------------------------------------------------------

/// Drives an [`EditorState`] without an executor: effects are recorded,
/// timers run on a synthetic clock and completions are fed in by the test.
pub struct EditorHarness {
    pub state: EditorState,
    pub scheduler: Scheduler,
    pub map: FakeMapProvider,
    pub host: FakeHost,
    pub now: Instant,
    pub searches: Vec<SearchInvocation>,
    pub commits: Vec<CommitInvocation>,
    pub emitted: Vec<RawValue>,
    callbacks: Receiver<EditorEvent>,
}

impl EditorHarness {
    pub fn new(config: EditorConfig, initial: RawValue) -> Self {
        let (sink, callbacks) = EventSink::channel();
        let host = FakeHost::new();
        let mut state = EditorState::new(config, &initial, sink.clone());
        let pointer_sink = sink;
        state.attach_pointer_subscription(host.subscribe_pointer_down(Box::new(move |target| {
            pointer_sink.send(UserIntent::PointerDown(target))
        })));
        Self {
            state,
            scheduler: Scheduler::new(),
            map: FakeMapProvider::new(),
            host,
            now: Instant::now(),
            searches: Vec::new(),
            commits: Vec::new(),
            emitted: Vec::new(),
            callbacks,
        }
    }

    /// An editor that went through runtime load and map creation.
    pub fn ready(config: EditorConfig, initial: RawValue) -> Self {
        let mut harness = Self::new(config, initial);
        harness.load_map();
        harness
    }

    pub fn load_map(&mut self) {
        let effects = self
            .state
            .handle_event(SystemEvent::RuntimeLoaded(Ok(())).into());
        for effect in effects {
            match effect {
                Effect::CreateMap(options) => {
                    let map = self.map.build_map(options);
                    self.dispatch(SystemEvent::MapCreated(Ok(map)));
                }
                other => self.apply(other),
            }
        }
    }

    pub fn dispatch(&mut self, event: impl Into<EditorEvent>) {
        let effects = self.state.handle_event(event.into());
        for effect in effects {
            self.apply(effect);
        }
    }

    pub fn intent(&mut self, intent: UserIntent) {
        self.dispatch(intent);
    }

    /// Types `text` and lets the debounce window pass.
    pub fn type_and_wait(&mut self, text: &str) {
        self.intent(UserIntent::SearchInput(text.to_string()));
        self.advance(Duration::from_millis(self.state.config().search_debounce_ms + 1));
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        for event in self.scheduler.drain_ready(self.now) {
            self.dispatch(event);
        }
    }

    /// Delivers events queued by provider and host callbacks.
    pub fn pump_callbacks(&mut self) {
        while let Ok(event) = self.callbacks.try_recv() {
            self.dispatch(event);
        }
    }

    pub fn last_search(&self) -> &SearchInvocation {
        self.searches.last().expect("a search was started")
    }

    pub fn complete_search(&mut self, run_id: u64, suggestions: &[(&str, &str)]) {
        let suggestions = suggestions
            .iter()
            .map(|(text, handle)| Suggestion::new(*text, *handle))
            .collect();
        self.dispatch(SystemEvent::SearchCompleted(SearchCompletion {
            run_id,
            result: Ok(suggestions),
        }));
    }

    pub fn complete_commit(&mut self, result: Result<LatLng, EditorError>) {
        let invocation = self.commits.last().cloned().expect("a commit was started");
        self.dispatch(SystemEvent::CommitCompleted(CommitCompletion {
            run_id: invocation.run_id,
            index: invocation.index,
            result,
        }));
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Schedule(command) => self.scheduler.schedule(command, self.now),
            Effect::CreateMap(options) => {
                self.map.build_map(options);
            }
            Effect::StartSearch(invocation) => self.searches.push(invocation),
            Effect::StartCommit(invocation) => self.commits.push(invocation),
            Effect::EmitValue(raw) => self.emitted.push(raw),
        }
    }
}
