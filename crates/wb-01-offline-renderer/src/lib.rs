//! # WB-01 Offline Renderer
//!
//! The rendering collaborator of the benchmark: turns a `WorkloadSpec` into a
//! signal graph and renders it offline as fast as the CPU allows, reporting
//! the wall-clock time spent rendering.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): render quanta, automation timelines and the
//!   processing nodes. No timing, no I/O.
//!   - `AudioBlock`: multi-channel render quantum (128 frames)
//!   - `AudioParam`: scheduled parameter automation (a-rate / k-rate)
//!   - `ProcessingNode` / `Generator`: node state + DSP
//!   - `RenderGraph`: source, chained nodes, generators, destination mixdown
//!
//! - **Ports Layer** (`ports/`): `RenderApi`, the driving port
//!
//! - **Service Layer** (`service/`):
//!   - `build_graph`: the single interpreter from `WorkloadKind` to a graph
//!   - `OfflineRenderer`: implements `RenderApi`, times the render
//!
//! ## Graph shape
//!
//! Every graph starts with the same source: a one-second 440 Hz sine buffer,
//! looped, played at rate 0.9 so the source does a little resampling work.
//!
//! ```text
//! source ──► node 1 ──► node 2 ──► … ──► node N ──► destination (mono)
//!                                                      ▲
//! generator 1..N (oscillators, buffer sources) ────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use shared_types::WorkloadCatalog;
//! use wb_01_offline_renderer::{OfflineRenderer, RenderApi};
//!
//! let catalog = WorkloadCatalog::standard();
//! let spec = catalog.get("Gain-0.9").unwrap();
//! let outcome = OfflineRenderer::new().render(spec, 1.0)?;
//! println!("{} took {:?}", spec.name, outcome.elapsed);
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{AudioBlock, AudioParam, RenderGraph, RENDER_QUANTUM};
pub use error::RenderError;
pub use ports::RenderApi;
pub use service::{build_graph, OfflineRenderer, RenderOutcome, RendererConfig};
