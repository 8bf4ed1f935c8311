//! # Shared Types Crate
//!
//! This crate contains the workload descriptors and the workload catalog used
//! across the workspace.
//!
//! ## Design Principles
//!
//! - **Workloads are data**: every workload is a `WorkloadSpec` carrying a
//!   `WorkloadKind` tag plus parameters. There is no per-workload behaviour
//!   here; the renderer interprets the tag.
//! - **Immutable catalog**: the catalog is built once and only ever handed out
//!   by reference. Catalog order is the run order.
//! - **Names are keys**: workload names are the keys of the result table and
//!   of the composite score groups, so they must never change spelling.

pub mod catalog;
pub mod entities;
pub mod errors;

pub use catalog::{WorkloadCatalog, BASELINE_NAME, STANDARD_WORKLOADS};
pub use entities::*;
pub use errors::*;
