//! Ports Layer
//!
//! The renderer has a single driving port. It has no driven ports: rendering
//! is pure computation over in-memory buffers.

pub mod inbound;

pub use inbound::RenderApi;
