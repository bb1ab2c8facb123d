use super::map::MapProvider;
use super::places::{PlacesLibrary, PlacesProvider};
use crate::core::{EditorConfig, EditorError};
use async_lock::OnceCell;
use std::rc::Rc;

/// Loads the map runtime once per process.
///
/// Clones share one initialization: every editor awaits the same load, and
/// whoever arrives after it finished proceeds immediately. A failed load is
/// not remembered, so a later editor tries again.
#[derive(Clone)]
pub struct RuntimeLoader {
    inner: Rc<LoaderInner>,
}

struct LoaderInner {
    provider: Rc<dyn MapProvider>,
    api_key: String,
    libraries: Vec<String>,
    ready: OnceCell<()>,
}

impl RuntimeLoader {
    pub fn new(provider: Rc<dyn MapProvider>, config: &EditorConfig) -> Self {
        Self {
            inner: Rc::new(LoaderInner {
                provider,
                api_key: config.api_key.clone(),
                libraries: config.libraries.clone(),
                ready: OnceCell::new(),
            }),
        }
    }

    pub fn provider(&self) -> Rc<dyn MapProvider> {
        Rc::clone(&self.inner.provider)
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.is_initialized()
    }

    pub async fn ready(&self) -> Result<(), EditorError> {
        let inner = &self.inner;
        inner
            .ready
            .get_or_try_init(|| async {
                tracing::debug!(libraries = ?inner.libraries, "loading map runtime");
                inner
                    .provider
                    .load_runtime(inner.api_key.as_str(), inner.libraries.as_slice())
                    .await
                    .map_err(EditorError::ProviderLoad)
            })
            .await?;
        Ok(())
    }
}

/// Per-editor access to the places library, imported on first use.
#[derive(Clone)]
pub struct PlacesGateway {
    provider: Rc<dyn PlacesProvider>,
    library: Rc<OnceCell<Rc<dyn PlacesLibrary>>>,
}

impl PlacesGateway {
    pub fn new(provider: Rc<dyn PlacesProvider>) -> Self {
        Self {
            provider,
            library: Rc::new(OnceCell::new()),
        }
    }

    pub async fn library(&self) -> Result<Rc<dyn PlacesLibrary>, EditorError> {
        let library = self
            .library
            .get_or_try_init(|| async {
                tracing::debug!("importing places library");
                self.provider
                    .import_library()
                    .await
                    .map_err(|err| {
                        EditorError::Search(format!("places library unavailable: {err}"))
                    })
            })
            .await?;
        Ok(Rc::clone(library))
    }
}
