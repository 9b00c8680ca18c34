//! Presentation driver: game state in, platform drawing primitives out

pub mod renderer;

pub use renderer::Renderer;
