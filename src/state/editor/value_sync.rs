use super::{EditorState, SEARCH_DEBOUNCE_KEY};
use crate::core::{CoordinateModel, LatLng, RawValue};
use crate::runtime::scheduler::SchedulerCommand;
use crate::state::map_surface::RenderOptions;

impl EditorState {
    /// Current value in the host's wire format.
    pub fn value(&self) -> RawValue {
        self.value.to_external()
    }

    /// Value assigned by the host. Stored in any phase, shown once the map
    /// is ready. Not echoed back to the host.
    pub fn set_external_value(&mut self, raw: &RawValue) {
        if !self.is_alive() {
            return;
        }
        self.value = CoordinateModel::from_external_or_absent(self.config.format, raw);
        self.render_value(RenderOptions::recenter());
    }

    /// Whether `point` survives as a value. Zero and non-finite coordinates
    /// would read back as "unset".
    pub(super) fn accepts_point(&self, point: LatLng) -> bool {
        CoordinateModel::from_point(self.config.format, point).is_valid()
    }

    pub(super) fn apply_pick(&mut self, point: LatLng, options: RenderOptions) {
        self.value = CoordinateModel::from_point(self.config.format, point);
        tracing::debug!(
            latitude = ?self.value.latitude(),
            longitude = ?self.value.longitude(),
            "location picked"
        );
        self.render_value(options);
        self.emit_value();
    }

    pub(super) fn clear(&mut self) {
        self.schedule(SchedulerCommand::Cancel {
            key: SEARCH_DEBOUNCE_KEY.to_string(),
        });
        self.value = CoordinateModel::absent(self.config.format);
        self.session.reset();
        self.search_text.clear();
        self.dropdown_open = false;
        self.render_value(RenderOptions::default());
        self.emit_value();
    }
}
