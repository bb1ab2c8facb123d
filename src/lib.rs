//! A geographic coordinate picker for host forms.
//!
//! An editor keeps one latitude/longitude value in sync with a map marker,
//! a place search box and the form field that stores it. The map runtime,
//! the places service and the form are reached through the traits in
//! [`provider`]; [`runtime::spawn`] wires them to an [`EditorState`] running
//! on a single-threaded executor.

pub mod core;
pub mod provider;
pub mod runtime;
pub mod state;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use core::{
    CoordinateModel, EditorConfig, EditorError, LatLng, ParseFailure, PlaceHandle, RawValue,
    SessionToken, Suggestion, ValueFormat,
};
pub use runtime::intent::UserIntent;
pub use runtime::{EditorHandle, EditorParts, EditorRuntime, EditorSnapshot, spawn};
pub use state::editor::{EditorPhase, EditorState};
