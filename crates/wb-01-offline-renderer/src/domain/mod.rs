//! Domain layer: render quanta, parameter automation, nodes and graphs.

pub mod block;
pub mod graph;
pub mod nodes;
pub mod param;

pub use block::{AudioBlock, Channel, RENDER_QUANTUM};
pub use graph::{RenderGraph, RenderedAudio};
pub use nodes::{Generator, ProcessingNode, RenderContext};
pub use param::{AudioParam, AutomationEvent};
