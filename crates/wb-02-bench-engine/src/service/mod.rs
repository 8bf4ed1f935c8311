//! Service Layer
//!
//! Trial Runner → Repeated-Trial Scheduler → Benchmark Orchestrator.
//! Each stage awaits the previous one; nothing runs concurrently.

pub mod orchestrator;
pub mod scheduler;
pub mod trial;

pub use orchestrator::BenchmarkService;
pub use scheduler::RepeatedTrialScheduler;
pub use trial::TrialRunner;
