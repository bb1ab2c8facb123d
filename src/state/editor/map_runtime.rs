use super::{EditorPhase, EditorState};
use crate::core::{EditorError, LatLng};
use crate::provider::MapHandle;
use crate::runtime::effect::Effect;
use crate::state::map_surface::RenderOptions;

impl EditorState {
    pub(super) fn on_runtime_loaded(&mut self, result: Result<(), EditorError>) {
        if let Err(err) = result {
            tracing::warn!(error = %err, "map runtime unavailable, editor stays without a map");
            return;
        }
        if self.phase != EditorPhase::Uninitialized {
            return;
        }

        self.phase = EditorPhase::MapLoading;
        let options = self.surface.map_options(&self.config, self.value.point());
        tracing::debug!(?options, "creating map surface");
        self.pending_effects.push(Effect::CreateMap(options));
    }

    pub(super) fn on_map_created(&mut self, result: Result<Box<dyn MapHandle>, EditorError>) {
        let map = match result {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(error = %err, "map surface could not be created");
                return;
            }
        };
        if self.phase != EditorPhase::MapLoading {
            tracing::debug!(phase = ?self.phase, "ignoring unexpected map surface");
            return;
        }

        self.surface.initialize(map, &self.sink);
        self.phase = EditorPhase::Ready;
        tracing::debug!("editor ready");
        self.render_value(RenderOptions::recenter());
    }

    pub(super) fn on_map_right_click(&mut self, position: LatLng) {
        if self.config.read_only || !self.is_ready() {
            return;
        }
        if !self.accepts_point(position) {
            tracing::debug!(%position, "ignoring pick on the unset sentinel");
            return;
        }
        self.apply_pick(position, RenderOptions::default());
    }

    pub(super) fn render_value(&mut self, options: RenderOptions) {
        if self.phase == EditorPhase::Ready {
            self.surface.render(&self.value, options);
        }
    }
}
