use crate::core::coordinate::{LatLng, ValueFormat};
use crate::core::error::EditorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings handed over by the host form when the editor is attached.
///
/// Every field has a default so a host may send only what it customizes:
///
/// ```yaml
/// format: delimited
/// required: true
/// default_location: { lat: 52.37, lng: 4.89 }
/// map_style_id: 8f348c1b
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub format: ValueFormat,
    pub required: bool,
    pub read_only: bool,
    pub api_key: String,
    pub libraries: Vec<String>,
    /// Map center used when there is no value to show.
    pub default_location: LatLng,
    pub default_zoom: f64,
    /// Zoom applied after a suggestion has been committed.
    pub pick_zoom: f64,
    pub map_style_id: Option<String>,
    pub search_debounce_ms: u64,
    pub required_message: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            format: ValueFormat::Structured,
            required: false,
            read_only: false,
            api_key: String::new(),
            libraries: vec!["places".to_string(), "marker".to_string()],
            default_location: LatLng::new(51.5072, -0.1276),
            default_zoom: 10.0,
            pick_zoom: 15.0,
            map_style_id: None,
            search_debounce_ms: 200,
            required_message: "Pick a location".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(value: serde_json::Value) -> Result<Self, EditorError> {
        serde_json::from_value(value).map_err(|err| EditorError::Config(err.to_string()))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, EditorError> {
        serde_yaml::from_str(source).map_err(|err| EditorError::Config(err.to_string()))
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_search_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.search_debounce_ms = debounce_ms;
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
