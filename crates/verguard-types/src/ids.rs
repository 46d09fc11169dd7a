//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_DEPS_MIN_SAFE_VERSION: &str = "deps.min_safe_version";

// Codes: deps.min_safe_version
pub const CODE_BELOW_MIN_SAFE_FORCED: &str = "below_min_safe_forced";
pub const CODE_BELOW_MIN_SAFE: &str = "below_min_safe";
pub const CODE_NO_RULE_DEFINED: &str = "no_rule_defined";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
