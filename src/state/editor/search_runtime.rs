use super::{EditorState, SEARCH_DEBOUNCE_KEY};
use crate::provider::PointerTarget;
use crate::runtime::effect::Effect;
use crate::runtime::event::SystemEvent;
use crate::runtime::scheduler::SchedulerCommand;
use crate::state::map_surface::RenderOptions;
use crate::state::suggestion_session::SearchStep;
use crate::task::{CommitCompletion, SearchCompletion};

impl EditorState {
    pub(super) fn on_search_input(&mut self, text: String) {
        self.search_text = text;

        if self.search_text.trim().is_empty() {
            self.schedule(SchedulerCommand::Cancel {
                key: SEARCH_DEBOUNCE_KEY.to_string(),
            });
            self.run_search("");
            return;
        }

        self.schedule(SchedulerCommand::Debounce {
            key: SEARCH_DEBOUNCE_KEY.to_string(),
            delay: self.config.search_debounce(),
            event: SystemEvent::SearchDue {
                text: self.search_text.clone(),
            }
            .into(),
        });
    }

    pub(super) fn run_search(&mut self, text: &str) {
        let origin = self.surface.center();
        match self.session.search(text, origin) {
            SearchStep::Cleared => self.dropdown_open = false,
            SearchStep::Query(invocation) => {
                tracing::debug!(
                    run_id = invocation.run_id,
                    input = %invocation.query.input,
                    "searching suggestions"
                );
                self.pending_effects.push(Effect::StartSearch(invocation));
            }
        }
    }

    pub(super) fn on_search_completed(&mut self, completion: SearchCompletion) {
        if self.session.apply_results(completion) {
            self.dropdown_open = !self.session.suggestions().is_empty();
        }
    }

    pub(super) fn on_search_focused(&mut self) {
        if !self.session.suggestions().is_empty() {
            self.dropdown_open = true;
        }
    }

    pub(super) fn move_highlight(&mut self, forward: bool) {
        let moved = if forward {
            self.session.highlight_next()
        } else {
            self.session.highlight_previous()
        };
        if moved {
            self.dropdown_open = true;
        }
    }

    pub(super) fn confirm_highlighted(&mut self) {
        if !self.dropdown_open {
            return;
        }
        if let Some(index) = self.session.highlighted() {
            self.pick_suggestion(index);
        }
    }

    pub(super) fn pick_suggestion(&mut self, index: usize) {
        match self.session.commit(index) {
            Some(invocation) => {
                tracing::debug!(
                    run_id = invocation.run_id,
                    suggestion = %invocation.suggestion.display_text,
                    "resolving suggestion"
                );
                self.pending_effects.push(Effect::StartCommit(invocation));
            }
            None => tracing::debug!(index, "no suggestion to pick at index"),
        }
    }

    pub(super) fn on_commit_completed(&mut self, completion: CommitCompletion) {
        if !self.session.accept_commit(completion.run_id) {
            tracing::trace!(run_id = completion.run_id, "discarding stale commit");
            return;
        }

        match completion.result {
            Ok(location) if !self.accepts_point(location) => {
                tracing::warn!(
                    index = completion.index,
                    %location,
                    "resolved location is not a usable coordinate"
                );
            }
            Ok(location) => {
                self.schedule(SchedulerCommand::Cancel {
                    key: SEARCH_DEBOUNCE_KEY.to_string(),
                });
                self.search_text.clear();
                self.dropdown_open = false;
                self.session.reset();
                let options = RenderOptions::recenter().with_zoom(self.config.pick_zoom);
                self.apply_pick(location, options);
            }
            Err(err) => {
                tracing::warn!(
                    index = completion.index,
                    error = %err,
                    "suggestion could not be resolved"
                );
            }
        }
    }

    pub(super) fn on_pointer_down(&mut self, target: PointerTarget) {
        if self.dropdown_open && target == PointerTarget::Elsewhere {
            self.dropdown_open = false;
        }
    }
}
