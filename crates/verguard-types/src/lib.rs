//! Stable DTOs and IDs used across the verguard workspace.
//!
//! This crate is intentionally boring:
//! - the version comparator (total order over arbitrary version strings)
//! - artifact coordinates handed over by the build-resolution side
//! - data types for the emitted report
//! - stable string IDs and codes

#![forbid(unsafe_code)]

pub mod coordinate;
pub mod ids;
pub mod report;
pub mod version;

pub use coordinate::{ArtifactCoordinate, CoordinateParseError};
pub use report::{
    Finding, ReportEnvelope, RunData, Severity, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
pub use version::Version;
