//! # Bench Runtime
//!
//! Library side of the `wab-bench` executable.
//!
//! ## Modular Structure
//!
//! - `config` - CLI flags and environment variables
//! - `adapters` - Port implementations wiring the renderer, metrics and output
//!   into the engine
//! - `runtime` - `BenchRuntime`, the wired service
//!
//! ## Startup Sequence
//!
//! 1. Parse flags (environment fills in what the flags omit)
//! 2. Register metrics and install the log subscriber
//! 3. Wire the offline renderer into the benchmark service
//! 4. Run the baseline and selected workloads, printing rows as they finish
//! 5. Print the score (or the JSON report) and exit non-zero without a score

pub mod adapters;
pub mod config;
pub mod runtime;

pub use config::RuntimeConfig;
pub use runtime::BenchRuntime;
