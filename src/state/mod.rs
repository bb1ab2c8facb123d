pub mod editor;
pub mod map_surface;
pub mod suggestion_session;
