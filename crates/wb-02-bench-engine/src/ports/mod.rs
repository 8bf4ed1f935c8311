//! Ports Layer
//!
//! - Driving port (inbound): `BenchmarkApi`
//! - Driven ports (outbound): `WorkloadRenderer` (the rendering collaborator)
//!   and `ResultSink` (progress display/log)

pub mod inbound;
pub mod outbound;

pub use inbound::BenchmarkApi;
pub use outbound::{ResultSink, WorkloadRenderer};
