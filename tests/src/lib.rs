//! # WebAudio Bench Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fakes.rs        # Scripted and overlap-detecting renderers
//!     ├── flows.rs        # Engine over the real offline renderer
//!     ├── scoring.rs      # Standard catalog against the mixed score table
//!     └── sequencing.rs   # Trial ordering and progress events
//! tests/benches/
//! └── render_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wb-tests
//! cargo bench -p wb-tests
//! ```

pub mod integration;
