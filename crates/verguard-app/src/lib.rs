//! Use case orchestration for verguard.
//!
//! The application layer wires settings, the repository locator, the policy
//! parser, and the pure evaluator into one `check` use case. It is
//! intentionally thin; the CLI crate depends on this and only handles
//! argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod report;

pub use check::{run_check, verdict_exit_code, CheckInput, CheckOutput, PolicyNotLocated};
pub use report::{runtime_error_report, serialize_report};
