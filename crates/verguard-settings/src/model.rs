use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `verguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so
/// forward-compat is easy. Everything here can also be supplied or overridden
/// on the command line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct VerguardConfigV1 {
    /// Optional schema string for tooling (`verguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Candidate repository bases, highest priority first.
    #[serde(default)]
    pub repositories: Vec<String>,

    /// HTTP fetch timeout in seconds (default 30).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Coordinates the policy artifact is published under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyCoordinates>,

    /// Direct policy document address, bypassing repository discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_url: Option<String>,

    /// Group allow-list; empty means every group is checked.
    #[serde(default)]
    pub check_groups: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyCoordinates {
    pub group: String,
    pub artifact: String,
}
