mod map_runtime;
mod search_runtime;
mod validation_runtime;
mod value_sync;

use crate::core::{CoordinateModel, EditorConfig, RawValue};
use crate::provider::Subscription;
use crate::runtime::effect::Effect;
use crate::runtime::event::{EditorEvent, EventSink, SystemEvent};
use crate::runtime::intent::UserIntent;
use crate::runtime::scheduler::SchedulerCommand;
use crate::state::map_surface::MapSurfaceController;
use crate::state::suggestion_session::SuggestionSession;

pub(crate) const SEARCH_DEBOUNCE_KEY: &str = "editor:search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Waiting for the map runtime.
    Uninitialized,
    /// Runtime loaded, map surface being created.
    MapLoading,
    Ready,
    /// Terminal. No event changes the editor any more.
    Destroyed,
}

/// The editor's state machine.
///
/// Coordinates the value, the suggestion session and the map surface in
/// response to [`EditorEvent`]s. Asynchronous work is never awaited here;
/// it is requested as [`Effect`]s and its outcome comes back as another
/// event.
pub struct EditorState {
    config: EditorConfig,
    phase: EditorPhase,
    value: CoordinateModel,
    session: SuggestionSession,
    surface: MapSurfaceController,
    search_text: String,
    dropdown_open: bool,
    pointer_subscription: Option<Box<dyn Subscription>>,
    sink: EventSink,
    pending_effects: Vec<Effect>,
}

impl EditorState {
    pub fn new(config: EditorConfig, initial: &RawValue, sink: EventSink) -> Self {
        let value = CoordinateModel::from_external_or_absent(config.format, initial);
        let surface = MapSurfaceController::new(&config);
        Self {
            config,
            phase: EditorPhase::Uninitialized,
            value,
            session: SuggestionSession::new(),
            surface,
            search_text: String::new(),
            dropdown_open: false,
            pointer_subscription: None,
            sink,
            pending_effects: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.phase != EditorPhase::Destroyed
    }

    pub fn is_ready(&self) -> bool {
        self.phase == EditorPhase::Ready
    }

    pub fn model(&self) -> &CoordinateModel {
        &self.value
    }

    pub fn session(&self) -> &SuggestionSession {
        &self.session
    }

    pub fn surface(&self) -> &MapSurfaceController {
        &self.surface
    }

    pub fn search_text(&self) -> &str {
        self.search_text.as_str()
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn handle_event(&mut self, event: EditorEvent) -> Vec<Effect> {
        if !self.is_alive() {
            tracing::trace!(?event, "editor destroyed, ignoring event");
            return Vec::new();
        }

        match event {
            EditorEvent::Intent(intent) => self.handle_intent(intent),
            EditorEvent::System(event) => self.handle_system_event(event),
        }
        self.take_effects()
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        self.pending_effects.drain(..).collect()
    }

    /// Hands the page-wide pointer listener to the editor, which removes it
    /// on teardown.
    pub fn attach_pointer_subscription(&mut self, subscription: Box<dyn Subscription>) {
        if !self.is_alive() {
            subscription.remove();
            return;
        }
        if let Some(previous) = self.pointer_subscription.replace(subscription) {
            previous.remove();
        }
    }

    /// Releases every resource the editor holds. Safe to call in any phase;
    /// returns false when the editor was already destroyed.
    pub fn destroy(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }

        self.session.reset();
        self.surface.teardown();
        if let Some(subscription) = self.pointer_subscription.take() {
            subscription.remove();
        }
        self.search_text.clear();
        self.dropdown_open = false;
        self.pending_effects.clear();
        self.phase = EditorPhase::Destroyed;
        tracing::debug!("editor destroyed");
        true
    }

    fn handle_intent(&mut self, intent: UserIntent) {
        if self.config.read_only && intent.edits_value() {
            tracing::trace!(?intent, "read-only editor, ignoring edit");
            return;
        }

        match intent {
            UserIntent::SearchInput(text) => self.on_search_input(text),
            UserIntent::SearchFocused => self.on_search_focused(),
            UserIntent::HighlightNext => self.move_highlight(true),
            UserIntent::HighlightPrevious => self.move_highlight(false),
            UserIntent::Highlight(index) => {
                self.session.highlight(index);
            }
            UserIntent::ConfirmHighlighted => self.confirm_highlighted(),
            UserIntent::PickSuggestion(index) => self.pick_suggestion(index),
            UserIntent::DismissDropdown => self.dropdown_open = false,
            UserIntent::PointerDown(target) => self.on_pointer_down(target),
            UserIntent::MapRightClicked(position) => self.on_map_right_click(position),
            UserIntent::Clear => self.clear(),
        }
    }

    fn handle_system_event(&mut self, event: SystemEvent) {
        match event {
            SystemEvent::RuntimeLoaded(result) => self.on_runtime_loaded(result),
            SystemEvent::MapCreated(result) => self.on_map_created(result),
            SystemEvent::SearchDue { text } => self.run_search(text.as_str()),
            SystemEvent::SearchCompleted(completion) => self.on_search_completed(completion),
            SystemEvent::CommitCompleted(completion) => self.on_commit_completed(completion),
            SystemEvent::Destroyed => {
                self.destroy();
            }
        }
    }

    fn schedule(&mut self, command: SchedulerCommand) {
        self.pending_effects.push(Effect::Schedule(command));
    }

    fn emit_value(&mut self) {
        self.pending_effects
            .push(Effect::EmitValue(self.value.to_external()));
    }
}
