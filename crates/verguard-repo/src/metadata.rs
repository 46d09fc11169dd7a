//! Repository metadata resolution: pick the latest published policy version.
//!
//! Selection precedence mirrors publish conventions: an explicit `release`
//! is most authoritative, `latest` may include pre-release builds, and the
//! raw version list is the last resort. Metadata that is malformed or names
//! no version resolves to `None` — a normal outcome that sends the locator
//! to the next candidate repository, never a hard error.

use crate::fetch::{FetchError, Fetcher};
use serde::Deserialize;
use verguard_types::Version;

/// Fixed metadata filename under `{base}/{groupPath}/{artifactId}/`.
pub const METADATA_FILE_NAME: &str = "maven-metadata.xml";

#[derive(Debug, Default, Deserialize)]
struct MetadataXml {
    #[serde(default)]
    versioning: Option<VersioningXml>,
}

#[derive(Debug, Default, Deserialize)]
struct VersioningXml {
    #[serde(default)]
    release: Option<String>,
    #[serde(default)]
    latest: Option<String>,
    #[serde(default)]
    versions: Option<VersionsXml>,
}

#[derive(Debug, Default, Deserialize)]
struct VersionsXml {
    #[serde(default)]
    version: Vec<String>,
}

pub(crate) fn group_path(group: &str) -> String {
    group.replace('.', "/")
}

/// Address of the metadata document for a policy artifact under a repository base.
pub fn metadata_address(repo_base: &str, group: &str, artifact_id: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        repo_base.trim_end_matches('/'),
        group_path(group),
        artifact_id,
        METADATA_FILE_NAME
    )
}

/// Resolve the latest published version of `group:artifact_id` under `repo_base`.
///
/// `Err` means the metadata document itself could not be fetched (caller:
/// try the next repository). `Ok(None)` means the fetch worked but no
/// version could be selected.
pub fn resolve_latest_version(
    fetcher: &dyn Fetcher,
    repo_base: &str,
    group: &str,
    artifact_id: &str,
) -> Result<Option<Version>, FetchError> {
    let address = metadata_address(repo_base, group, artifact_id);
    let body = fetcher.fetch(&address)?;
    let Ok(text) = String::from_utf8(body) else {
        return Ok(None);
    };
    Ok(select_version(&text))
}

fn select_version(text: &str) -> Option<Version> {
    let metadata: MetadataXml = quick_xml::de::from_str(text).ok()?;
    let versioning = metadata.versioning?;

    for explicit in [&versioning.release, &versioning.latest] {
        if let Some(v) = explicit.as_deref() {
            let v = v.trim();
            if !v.is_empty() {
                return Some(Version::parse(v));
            }
        }
    }

    versioning
        .versions?
        .version
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(Version::parse)
        .max()
}
