//! Service Layer

pub mod builder;
pub mod renderer;

pub use builder::{build_graph, validate};
pub use renderer::{OfflineRenderer, RenderOutcome, RendererConfig};
