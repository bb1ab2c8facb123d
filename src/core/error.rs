use thiserror::Error;

/// Why an externally supplied value could not be read as a coordinate pair.
///
/// Never surfaced to the operator: the editor treats every variant as
/// "no coordinates".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseFailure {
    #[error("expected {expected}, got {found}")]
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },
    #[error("field `{0}` is not a finite number")]
    NotFinite(&'static str),
    #[error("zero coordinates are reserved for an unset value")]
    ZeroSentinel,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("malformed coordinate value: {0}")]
    Parse(#[from] ParseFailure),
    #[error("map provider failed to load: {0}")]
    ProviderLoad(String),
    #[error("map surface could not be created: {0}")]
    MapSurface(String),
    #[error("suggestion search failed: {0}")]
    Search(String),
    #[error("could not resolve suggestion: {0}")]
    Resolution(String),
    #[error("invalid editor config: {0}")]
    Config(String),
}
