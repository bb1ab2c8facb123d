//! Seams to the collaborators the editor orchestrates but does not implement:
//! the map runtime, the places search service and the host form.

pub mod host;
pub mod loader;
pub mod map;
pub mod places;

pub use host::{HostForm, PointerTarget};
pub use loader::{PlacesGateway, RuntimeLoader};
pub use map::{MapEventKind, MapHandle, MapOptions, MapProvider, MapStyle, MarkerHandle};
pub use places::{PlacesLibrary, PlacesProvider, SuggestionQuery};

/// Provider calls report failures as plain messages; the editor wraps them
/// into its own error taxonomy at the task boundary.
pub type ProviderResult<T> = Result<T, String>;

/// A registered listener. Removing it detaches the callback for good.
pub trait Subscription {
    fn remove(self: Box<Self>);
}
