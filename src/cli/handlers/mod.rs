//! Command handlers for CLI operations

pub mod render;
pub mod serve;

pub use render::RenderCommandHandler;
pub use serve::ServeCommandHandler;
