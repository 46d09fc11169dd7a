use crate::model::VerguardConfigV1;
use std::time::Duration;
use verguard_domain::GroupFilter;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI-side overrides; file values are used where these are absent.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub repositories: Vec<String>,
    pub policy_group: Option<String>,
    pub policy_artifact: Option<String>,
    pub policy_url: Option<String>,
    /// Comma-separated group allow-list, as the host build tool passes it.
    pub check_groups: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Where the policy document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicySource {
    /// Fetch this address directly; repository discovery is skipped.
    Url(String),
    /// Discover the latest published version across the repository list.
    Coordinates { group: String, artifact: String },
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub repositories: Vec<String>,
    pub policy: PolicySource,
    pub group_filter: Option<GroupFilter>,
    pub timeout: Duration,
}

pub fn parse_config_toml(text: &str) -> anyhow::Result<VerguardConfigV1> {
    let cfg: VerguardConfigV1 = toml::from_str(text)?;
    Ok(cfg)
}

pub fn resolve_config(
    cfg: VerguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let policy = resolve_policy_source(&cfg.policy, cfg.policy_url, &overrides)?;

    let repositories = if overrides.repositories.is_empty() {
        cfg.repositories
    } else {
        overrides.repositories
    };

    let group_filter = match overrides.check_groups {
        Some(list) => filter_from_comma_list(&list),
        None if !cfg.check_groups.is_empty() => {
            Some(GroupFilter::new(cfg.check_groups.into_iter()))
        }
        None => None,
    };

    let timeout_secs = overrides
        .timeout_secs
        .or(cfg.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ResolvedConfig {
        repositories,
        policy,
        group_filter,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn resolve_policy_source(
    cfg_policy: &Option<crate::model::PolicyCoordinates>,
    cfg_policy_url: Option<String>,
    overrides: &Overrides,
) -> anyhow::Result<PolicySource> {
    if let Some(url) = overrides.policy_url.clone().or(cfg_policy_url) {
        return Ok(PolicySource::Url(url));
    }

    match (&overrides.policy_group, &overrides.policy_artifact) {
        (Some(group), Some(artifact)) => {
            return Ok(PolicySource::Coordinates {
                group: group.clone(),
                artifact: artifact.clone(),
            });
        }
        (None, None) => {}
        _ => anyhow::bail!("--policy-group and --policy-artifact must be given together"),
    }

    if let Some(coords) = cfg_policy {
        return Ok(PolicySource::Coordinates {
            group: coords.group.clone(),
            artifact: coords.artifact.clone(),
        });
    }

    anyhow::bail!("no policy source configured: set [policy] coordinates or a policy-url")
}

/// Split a comma-separated allow-list, trimming whitespace around commas.
/// A blank list means "no filter".
fn filter_from_comma_list(list: &str) -> Option<GroupFilter> {
    let groups: Vec<String> = list
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if groups.is_empty() {
        None
    } else {
        Some(GroupFilter::new(groups))
    }
}
