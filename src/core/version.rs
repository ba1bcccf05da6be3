//! Environment-file version state.
//!
//! The `APP_VERSION=X.Y.Z` line in the project's environment file is the
//! sole durable version state. Everything here is a pure transform over the
//! file's text; callers read and persist the contents.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::utils::parser;

/// Pattern for the version line. Each component is digits only.
const VERSION_PATTERN: &str = r"APP_VERSION=([0-9]+\.[0-9]+\.[0-9]+)";

/// Pattern used when rewriting the line, whatever its prior value.
const VERSION_LINE_PATTERN: &str = r"APP_VERSION=.*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted triple. Exactly three numeric components.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        Some(Self {
            major: parts[0].parse().ok()?,
            minor: parts[1].parse().ok()?,
            patch: parts[2].parse().ok()?,
        })
    }

    /// Patch increment. Major and minor are unchanged; no rollover.
    pub fn bump_patch(self) -> Self {
        Self {
            patch: self.patch + 1,
            ..self
        }
    }

    pub fn tag(&self) -> String {
        format!("v{}", self)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// Versions serialize as the dotted string they take in the env file.
impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Read the current version from environment-file contents.
/// None when the key is absent or malformed.
pub fn current_version(contents: &str) -> Option<Version> {
    parser::extract_first(contents, VERSION_PATTERN).and_then(|v| Version::parse(&v))
}

/// Compute the next version from environment-file contents.
///
/// A well-formed `APP_VERSION=X.Y.Z` line yields `X.Y.(Z+1)`. A missing or
/// malformed line yields `1.0.0` — version-file corruption never blocks a
/// release. No side effects.
pub fn next_version(contents: &str) -> Version {
    current_version(contents)
        .map(Version::bump_patch)
        .unwrap_or_default()
}

/// Rewrite the `APP_VERSION=` line with the new version.
///
/// Pure transform; the caller persists the result. When no version line
/// exists the contents come back unchanged — callers must ensure the key
/// exists or accept the no-op.
pub fn write_version(contents: &str, version: &Version) -> String {
    let replacement = format!("APP_VERSION={}", version);
    match parser::replace_all(contents, VERSION_LINE_PATTERN, &replacement) {
        Some((replaced, _count)) => replaced,
        None => contents.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_version_bumps_patch() {
        assert_eq!(
            next_version("APP_VERSION=0.5.2\n"),
            Version::new(0, 5, 3)
        );
    }

    #[test]
    fn next_version_defaults_when_key_missing() {
        assert_eq!(next_version("FOO=bar\n"), Version::new(1, 0, 0));
        assert_eq!(next_version(""), Version::new(1, 0, 0));
    }

    #[test]
    fn next_version_defaults_when_malformed() {
        assert_eq!(next_version("APP_VERSION=banana\n"), Version::new(1, 0, 0));
        assert_eq!(next_version("APP_VERSION=1.2\n"), Version::new(1, 0, 0));
    }

    #[test]
    fn next_version_ignores_prerelease_suffix_components() {
        // Digits-only components; anything else falls back to the default.
        assert_eq!(
            next_version("APP_VERSION=1.2.3-rc1\n"),
            Version::new(1, 2, 4)
        );
    }

    #[test]
    fn scenario_bump_and_rewrite() {
        let contents = "APP_VERSION=2.3.9\nOTHER=1\n";
        let next = next_version(contents);
        assert_eq!(next, Version::new(2, 3, 10));

        let written = write_version(contents, &next);
        assert_eq!(written, "APP_VERSION=2.3.10\nOTHER=1\n");
    }

    #[test]
    fn write_version_is_idempotent() {
        let v = Version::new(1, 4, 0);
        let once = write_version("APP_VERSION=1.3.9\nDB_HOST=localhost\n", &v);
        let twice = write_version(&once, &v);
        assert_eq!(once, twice);
    }

    #[test]
    fn round_trip_touches_only_the_version_line() {
        let contents = "APP_NAME=depapp\nAPP_VERSION=0.9.9\nAPP_DEBUG=false\n";
        let written = write_version(contents, &next_version(contents));

        let version_lines: Vec<&str> = written
            .lines()
            .filter(|l| l.starts_with("APP_VERSION="))
            .collect();
        assert_eq!(version_lines, vec!["APP_VERSION=0.9.10"]);
        assert!(written.contains("APP_NAME=depapp\n"));
        assert!(written.contains("APP_DEBUG=false\n"));
    }

    #[test]
    fn write_version_without_key_is_a_noop() {
        let contents = "FOO=bar\n";
        let written = write_version(contents, &Version::new(1, 0, 0));
        assert_eq!(written, contents);
    }

    #[test]
    fn version_tag_is_v_prefixed() {
        assert_eq!(Version::new(2, 3, 10).tag(), "v2.3.10");
    }

    #[test]
    fn current_version_reads_without_bumping() {
        assert_eq!(
            current_version("APP_VERSION=3.1.4\n"),
            Some(Version::new(3, 1, 4))
        );
        assert_eq!(current_version("FOO=bar\n"), None);
    }
}
