//! Policy document parsing: XML text into the immutable domain model.
//!
//! Pure transformation; fetching happens in the locator. The root element
//! must be `dependencyVersionPolicy`, and every entry needs a group,
//! artifact, and minimum safe version. `forceUpdate` and `message` are
//! optional.

use quick_xml::events::Event;
use serde::Deserialize;
use thiserror::Error;
use verguard_domain::policy::{PolicyDocument, Rule};

const ROOT_ELEMENT: &str = "dependencyVersionPolicy";

/// The document at `origin` does not match the policy schema. Fatal for the
/// final located document; during metadata probing the caller downgrades it
/// to "try the next repository".
#[derive(Debug, Error)]
#[error("malformed policy document from {origin}: {reason}")]
pub struct PolicyFormatError {
    pub origin: String,
    pub reason: String,
}

impl PolicyFormatError {
    fn new(origin: &str, reason: impl ToString) -> Self {
        Self {
            origin: origin.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PolicyXml {
    #[serde(default, rename = "dependency")]
    dependencies: Vec<DependencyXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DependencyXml {
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    artifact_id: Option<String>,
    #[serde(default)]
    min_safe_version: Option<String>,
    #[serde(default)]
    force_update: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Parse policy XML fetched from `origin` into a [`PolicyDocument`].
pub fn parse_policy(text: &str, origin: &str) -> Result<PolicyDocument, PolicyFormatError> {
    check_root_element(text, origin)?;

    let parsed: PolicyXml =
        quick_xml::de::from_str(text).map_err(|e| PolicyFormatError::new(origin, e))?;

    let mut rules = Vec::with_capacity(parsed.dependencies.len());
    for (index, dep) in parsed.dependencies.into_iter().enumerate() {
        rules.push(Rule {
            group: required(dep.group_id, "groupId", index, origin)?,
            artifact: required(dep.artifact_id, "artifactId", index, origin)?,
            min_safe_version: required(dep.min_safe_version, "minSafeVersion", index, origin)?,
            force_update: dep.force_update.unwrap_or(false),
            message: dep.message.unwrap_or_default(),
        });
    }
    Ok(PolicyDocument::new(rules))
}

fn required(
    value: Option<String>,
    element: &str,
    index: usize,
    origin: &str,
) -> Result<String, PolicyFormatError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(PolicyFormatError::new(
            origin,
            format!("dependency entry {index} is missing <{element}>"),
        )),
    }
}

fn check_root_element(text: &str, origin: &str) -> Result<(), PolicyFormatError> {
    let mut reader = quick_xml::Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return if e.name().as_ref() == ROOT_ELEMENT.as_bytes() {
                    Ok(())
                } else {
                    Err(PolicyFormatError::new(
                        origin,
                        format!(
                            "unexpected root element <{}>, expected <{ROOT_ELEMENT}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        ),
                    ))
                };
            }
            Ok(Event::Eof) => {
                return Err(PolicyFormatError::new(origin, "document has no root element"));
            }
            Ok(_) => continue,
            Err(e) => return Err(PolicyFormatError::new(origin, e)),
        }
    }
}
