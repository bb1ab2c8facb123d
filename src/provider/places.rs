use super::ProviderResult;
use crate::core::{LatLng, PlaceHandle, SessionToken, Suggestion};
use futures_lite::future::BoxedLocal;
use std::rc::Rc;

/// Detail fields requested when a suggestion is resolved. Only the location
/// is needed, which keeps the detail call in the cheapest billing tier.
pub const LOCATION_FIELDS: &[&str] = &["location"];

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    pub input: String,
    pub session_token: SessionToken,
    /// Bias results toward this point, usually the current map center.
    pub origin: Option<LatLng>,
}

pub trait PlacesProvider {
    /// Loads the places library. Expensive; callers cache the result.
    fn import_library(&self) -> BoxedLocal<ProviderResult<Rc<dyn PlacesLibrary>>>;
}

pub trait PlacesLibrary {
    fn fetch_suggestions(
        &self,
        query: SuggestionQuery,
    ) -> BoxedLocal<ProviderResult<Vec<Suggestion>>>;

    /// Resolves a place to its details. `Ok(None)` means the place has no
    /// location.
    fn resolve(
        &self,
        handle: PlaceHandle,
        fields: &'static [&'static str],
    ) -> BoxedLocal<ProviderResult<Option<LatLng>>>;
}
