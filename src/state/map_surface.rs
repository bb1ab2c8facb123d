use crate::core::{CoordinateModel, EditorConfig, LatLng};
use crate::provider::{MapEventKind, MapHandle, MapOptions, MapStyle, MarkerHandle, Subscription};
use crate::runtime::event::EventSink;
use crate::runtime::intent::UserIntent;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    pub recenter: bool,
    pub zoom_to: Option<f64>,
}

impl RenderOptions {
    pub fn recenter() -> Self {
        Self {
            recenter: true,
            zoom_to: None,
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom_to = Some(zoom);
        self
    }
}

/// Owns the map and marker handles of one editor and keeps the marker in
/// step with the coordinate model.
pub struct MapSurfaceController {
    map: Option<Box<dyn MapHandle>>,
    marker: Option<Box<dyn MarkerHandle>>,
    subscriptions: Vec<Box<dyn Subscription>>,
    read_only: bool,
    default_center: LatLng,
    torn_down: bool,
}

impl MapSurfaceController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            map: None,
            marker: None,
            subscriptions: Vec::new(),
            read_only: config.read_only,
            default_center: config.default_location,
            torn_down: false,
        }
    }

    /// Options for creating the map. Read-only editors get a greyed-out,
    /// non-interactive map.
    pub fn map_options(&self, config: &EditorConfig, center: Option<LatLng>) -> MapOptions {
        let style = if self.read_only {
            MapStyle::Desaturated
        } else {
            config
                .map_style_id
                .clone()
                .map(MapStyle::Custom)
                .unwrap_or(MapStyle::Standard)
        };
        MapOptions {
            center: center.unwrap_or(self.default_center),
            zoom: config.default_zoom,
            style,
            interactive: !self.read_only,
        }
    }

    /// Takes ownership of a freshly created map. Editable maps report right
    /// clicks to `sink`.
    pub fn initialize(&mut self, mut map: Box<dyn MapHandle>, sink: &EventSink) {
        if self.torn_down {
            return;
        }
        if !self.read_only {
            let sink = sink.clone();
            let subscription = map.on(
                MapEventKind::RightClick,
                Box::new(move |position| sink.send(UserIntent::MapRightClicked(position))),
            );
            self.subscriptions.push(subscription);
        }
        self.map = Some(map);
    }

    pub fn is_initialized(&self) -> bool {
        self.map.is_some()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    pub fn marker_position(&self) -> Option<LatLng> {
        self.marker.as_ref().and_then(|marker| marker.position())
    }

    pub fn center(&self) -> Option<LatLng> {
        self.map.as_ref().map(|map| map.center())
    }

    /// Projects `model` onto the map. Rendering the same model twice leaves
    /// the map as it was after the first call.
    pub fn render(&mut self, model: &CoordinateModel, options: RenderOptions) {
        let Some(map) = self.map.as_mut() else {
            return;
        };

        match model.point() {
            Some(point) => {
                let marker = self.marker.get_or_insert_with(|| map.create_marker());
                marker.set_position(point);
                if options.recenter {
                    map.set_center(point);
                }
                if let Some(zoom) = options.zoom_to {
                    map.set_zoom(zoom);
                }
            }
            None => {
                if let Some(mut marker) = self.marker.take() {
                    marker.remove();
                }
                map.set_center(self.default_center);
            }
        }
    }

    /// Detaches listeners and removes the marker. Returns false when the
    /// surface was already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;

        for subscription in self.subscriptions.drain(..) {
            subscription.remove();
        }
        if let Some(mut marker) = self.marker.take() {
            marker.remove();
        }
        self.map = None;
        true
    }
}
