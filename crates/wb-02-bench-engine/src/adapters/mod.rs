//! Adapters Layer (Driven Adapters)
//!
//! `ResultSink` implementations for the progress stream of a run.
//!
//! ## Adapters
//!
//! - `TracingResultSink` - Logs each result row and the score
//! - `ChannelResultSink` - Forwards events to a tokio channel
//! - `CollectingResultSink` - Keeps events in memory
//! - `NoOpResultSink` - Discards everything

pub mod sinks;

pub use sinks::{
    BenchmarkEvent, ChannelResultSink, CollectingResultSink, NoOpResultSink, TracingResultSink,
};
