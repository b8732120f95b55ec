// Presentation layer - HTTP surface for the remote view
pub mod app_state;
pub mod handlers;
