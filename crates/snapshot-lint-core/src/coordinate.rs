//! Artifact coordinates (`group:artifact:version`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identity of a buildable unit: group id, artifact id and version.
///
/// Equality is exact string equality on all three fields; nothing is
/// normalized. The canonical text form is `group:artifact:version`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
}

impl Coordinate {
    /// Creates a coordinate from its three parts.
    #[must_use]
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

    /// Parses the canonical `group:artifact:version` form.
    ///
    /// # Errors
    ///
    /// Returns an error unless the text has exactly three non-empty,
    /// colon-separated segments.
    pub fn parse(text: &str) -> Result<Self, CoordinateError> {
        let parts: Vec<&str> = text.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *artifact, *version))
            }
            _ => Err(CoordinateError::Malformed {
                text: text.to_string(),
            }),
        }
    }

    /// Returns the group id.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the artifact id.
    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Returns the version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Errors produced when parsing a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// The text is not `group:artifact:version`.
    #[error("malformed coordinate `{text}`, expected group:artifact:version")]
    Malformed {
        /// The rejected input.
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_canonical_gav() {
        let c = Coordinate::new("org.x", "lib", "2.0-SNAPSHOT");
        insta::assert_snapshot!(c.to_string(), @"org.x:lib:2.0-SNAPSHOT");
    }

    #[test]
    fn parse_accepts_three_segments() {
        let c: Coordinate = "org.x:app:1.0".parse().unwrap();
        assert_eq!(c.group(), "org.x");
        assert_eq!(c.artifact(), "app");
        assert_eq!(c.version(), "1.0");
    }

    #[test]
    fn parse_rejects_wrong_segment_count() {
        assert!(Coordinate::parse("org.x:app").is_err());
        assert!(Coordinate::parse("org.x:app:1.0:jar").is_err());
        assert!(Coordinate::parse("org.x::1.0").is_err());
    }

    #[test]
    fn equality_is_exact() {
        let a = Coordinate::new("org.x", "lib", "1.0");
        let b = Coordinate::new("org.x", "lib", "1.0.0");
        let c = Coordinate::new("org.X", "lib", "1.0");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, Coordinate::new("org.x", "lib", "1.0"));
    }

    #[test]
    fn serializes_as_string() {
        let c = Coordinate::new("org.x", "lib", "1.0");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"org.x:lib:1.0\"");
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
