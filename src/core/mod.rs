pub mod config;
pub mod coordinate;
pub mod error;
pub mod suggestion;

pub use config::EditorConfig;
pub use coordinate::{CoordinateModel, LatLng, RawValue, ValueFormat};
pub use error::{EditorError, ParseFailure};
pub use suggestion::{PlaceHandle, SessionToken, Suggestion};
