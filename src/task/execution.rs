use crate::core::{EditorError, LatLng, Suggestion};
use crate::provider::places::LOCATION_FIELDS;
use crate::provider::{MapOptions, MapProvider, PlacesGateway, RuntimeLoader, SuggestionQuery};
use crate::runtime::event::SystemEvent;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct SearchInvocation {
    pub run_id: u64,
    pub query: SuggestionQuery,
}

#[derive(Debug)]
pub struct SearchCompletion {
    pub run_id: u64,
    pub result: Result<Vec<Suggestion>, EditorError>,
}

#[derive(Debug, Clone)]
pub struct CommitInvocation {
    pub run_id: u64,
    pub index: usize,
    pub suggestion: Suggestion,
}

#[derive(Debug)]
pub struct CommitCompletion {
    pub run_id: u64,
    pub index: usize,
    pub result: Result<LatLng, EditorError>,
}

pub async fn execute_runtime_load(loader: RuntimeLoader) -> SystemEvent {
    SystemEvent::RuntimeLoaded(loader.ready().await)
}

pub async fn execute_create_map(provider: Rc<dyn MapProvider>, options: MapOptions) -> SystemEvent {
    let created = provider
        .create_map(options)
        .await
        .map_err(EditorError::MapSurface);
    SystemEvent::MapCreated(created)
}

pub async fn execute_search(places: PlacesGateway, invocation: SearchInvocation) -> SystemEvent {
    let result = match places.library().await {
        Ok(library) => library
            .fetch_suggestions(invocation.query)
            .await
            .map_err(EditorError::Search),
        Err(err) => Err(err),
    };
    SystemEvent::SearchCompleted(SearchCompletion {
        run_id: invocation.run_id,
        result,
    })
}

pub async fn execute_commit(places: PlacesGateway, invocation: CommitInvocation) -> SystemEvent {
    let result = match places.library().await {
        Ok(library) => {
            match library
                .resolve(invocation.suggestion.handle.clone(), LOCATION_FIELDS)
                .await
            {
                Ok(Some(location)) => Ok(location),
                Ok(None) => Err(EditorError::Resolution(format!(
                    "no location for '{}'",
                    invocation.suggestion.display_text
                ))),
                Err(err) => Err(EditorError::Resolution(err)),
            }
        }
        Err(err) => Err(EditorError::Resolution(err.to_string())),
    };
    SystemEvent::CommitCompleted(CommitCompletion {
        run_id: invocation.run_id,
        index: invocation.index,
        result,
    })
}
