//! Artifact coordinates handed over by the build-resolution collaborator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A resolved dependency: `(group, artifact, version)`. Read-only input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

#[derive(Debug, Error)]
#[error("invalid artifact spec '{spec}': expected group:artifact:version")]
pub struct CoordinateParseError {
    pub spec: String,
}

impl ArtifactCoordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Parse a `group:artifact:version` spec line.
    pub fn parse_spec(spec: &str) -> Result<Self, CoordinateParseError> {
        let mut parts = spec.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(g), Some(a), Some(v), None) => {
                let (g, a, v) = (g.trim(), a.trim(), v.trim());
                if g.is_empty() || a.is_empty() || v.is_empty() {
                    return Err(CoordinateParseError {
                        spec: spec.to_string(),
                    });
                }
                Ok(Self::new(g, a, v))
            }
            _ => Err(CoordinateParseError {
                spec: spec.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_spec_accepts_triple() {
        let c = ArtifactCoordinate::parse_spec("com.example:lib:1.0.0").unwrap();
        assert_eq!(c.group, "com.example");
        assert_eq!(c.artifact, "lib");
        assert_eq!(c.version, "1.0.0");
    }

    #[test]
    fn parse_spec_trims_whitespace() {
        let c = ArtifactCoordinate::parse_spec(" com.example : lib : 1.0.0 ").unwrap();
        assert_eq!(c.artifact, "lib");
    }

    #[test]
    fn parse_spec_rejects_wrong_arity() {
        assert!(ArtifactCoordinate::parse_spec("com.example:lib").is_err());
        assert!(ArtifactCoordinate::parse_spec("a:b:c:d").is_err());
        assert!(ArtifactCoordinate::parse_spec("::").is_err());
    }
}
