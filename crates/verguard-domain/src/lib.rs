//! Pure policy evaluation (no IO).
//!
//! Input: a parsed policy document and a resolved artifact set constructed
//! elsewhere. Output: findings + verdict + summary counts.

#![forbid(unsafe_code)]

pub mod policy;
pub mod report;

mod engine;

pub use engine::{evaluate, GroupFilter};
