pub mod effect;
pub mod event;
pub mod intent;
pub mod runner;
pub mod scheduler;

pub use runner::{EditorHandle, EditorParts, EditorRuntime, EditorSnapshot, spawn};
