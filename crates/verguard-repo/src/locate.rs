//! Policy location: a priority-ordered chain of candidate repositories.
//!
//! Each repository is probed in list order: resolve the latest policy
//! version from its metadata, then confirm the policy document itself is
//! fetchable. The first candidate that passes both wins. Failures along the
//! way are absorbed into probe notes; exhausting the chain is the caller's
//! fatal `PolicyNotLocated` condition.

use crate::fetch::{FetchError, Fetcher};
use crate::metadata::{group_path, resolve_latest_version};
use verguard_types::Version;

/// Extension of the published policy document.
const POLICY_EXTENSION: &str = "xml";

/// A located, already-fetched policy document.
#[derive(Clone, Debug)]
pub struct LocatedPolicy {
    pub repo_base: String,
    pub version: Version,
    pub address: String,
    /// Document text from the reachability probe; the run parses this
    /// instead of fetching the same address twice.
    pub text: String,
}

#[derive(Debug, Default)]
pub struct LocateOutcome {
    pub located: Option<LocatedPolicy>,
    /// One low-severity note per repository or candidate that fell through.
    pub probes: Vec<String>,
}

/// Candidate policy document address under a repository base.
pub fn policy_address(repo_base: &str, group: &str, artifact_id: &str, version: &Version) -> String {
    format!(
        "{base}/{group}/{artifact}/{v}/{artifact}-{v}.{POLICY_EXTENSION}",
        base = repo_base.trim_end_matches('/'),
        group = group_path(group),
        artifact = artifact_id,
        v = version.as_str(),
    )
}

/// Walk `repos` in priority order and return the first reachable policy
/// document for `group:artifact_id`, or none if every repository fails.
pub fn locate_policy(
    fetcher: &dyn Fetcher,
    repos: &[String],
    group: &str,
    artifact_id: &str,
) -> LocateOutcome {
    let mut probes = Vec::new();

    for base in repos {
        let version = match resolve_latest_version(fetcher, base, group, artifact_id) {
            Err(FetchError::Unreachable { reason, .. }) => {
                probes.push(format!("{base}: metadata unreachable ({reason})"));
                continue;
            }
            Ok(None) => {
                probes.push(format!("{base}: metadata names no usable version"));
                continue;
            }
            Ok(Some(v)) => v,
        };

        let address = policy_address(base, group, artifact_id, &version);
        match fetcher.fetch(&address) {
            Ok(body) => match String::from_utf8(body) {
                Ok(text) => {
                    return LocateOutcome {
                        located: Some(LocatedPolicy {
                            repo_base: base.clone(),
                            version,
                            address,
                            text,
                        }),
                        probes,
                    };
                }
                Err(_) => probes.push(format!("{address}: policy document is not valid UTF-8")),
            },
            Err(FetchError::Unreachable { reason, .. }) => {
                probes.push(format!("{address}: unreachable ({reason})"));
            }
        }
    }

    LocateOutcome {
        located: None,
        probes,
    }
}
