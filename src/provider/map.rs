use super::{ProviderResult, Subscription};
use crate::core::LatLng;
use futures_lite::future::BoxedLocal;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MapStyle {
    /// Provider default look.
    Standard,
    /// A style configured on the provider side, referenced by id.
    Custom(String),
    /// Greyed-out look used for read-only editors.
    Desaturated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: f64,
    pub style: MapStyle,
    /// When false the map ignores dragging, zooming and clicks.
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    RightClick,
}

pub trait MapProvider {
    /// Loads the provider script/runtime with the given libraries.
    fn load_runtime(&self, api_key: &str, libraries: &[String]) -> BoxedLocal<ProviderResult<()>>;

    fn create_map(&self, options: MapOptions) -> BoxedLocal<ProviderResult<Box<dyn MapHandle>>>;
}

pub trait MapHandle {
    fn center(&self) -> LatLng;
    fn set_center(&mut self, center: LatLng);
    fn set_zoom(&mut self, zoom: f64);
    fn create_marker(&mut self) -> Box<dyn MarkerHandle>;
    fn on(&mut self, event: MapEventKind, callback: Box<dyn Fn(LatLng)>) -> Box<dyn Subscription>;
}

pub trait MarkerHandle {
    fn position(&self) -> Option<LatLng>;
    fn set_position(&mut self, position: LatLng);
    /// Takes the marker off the map. The handle must not be used afterwards.
    fn remove(&mut self);
}

impl fmt::Debug for dyn MapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapHandle")
            .field("center", &self.center())
            .finish_non_exhaustive()
    }
}
