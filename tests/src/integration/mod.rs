//! Cross-crate integration tests.

pub mod fakes;
pub mod flows;
pub mod scoring;
pub mod sequencing;
