use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("tenant id cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("template id cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TemplateId> for String {
    fn from(value: TemplateId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionId(String);

impl VersionId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("version id cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<VersionId> for String {
    fn from(value: VersionId) -> Self {
        value.0
    }
}

/// Coarse lifecycle flag of a version, distinct from the approval sub-status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    Draft,
    PendingReview,
    Approved,
    Published,
    Deprecated,
    Archived,
    Rollback,
    Hotfix,
    Beta,
    Stable,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Published => "published",
            Self::Deprecated => "deprecated",
            Self::Archived => "archived",
            Self::Rollback => "rollback",
            Self::Hotfix => "hotfix",
            Self::Beta => "beta",
            Self::Stable => "stable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionIncrement {
    Major,
    Minor,
    Patch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityLevel {
    Exact,
    Minor,
    Major,
}

/// Severity scale shared by breaking-change analysis, migration risk and
/// stored validation issues. Ordering is `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Semantic version identifier, `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
///
/// Parsing is the only way to construct one, so an invalid version string is
/// unrepresentable past the domain boundary. Equality and ordering follow
/// semver precedence: build metadata participates in neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionNumber {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Option<String>,
    build: Option<String>,
}

impl VersionNumber {
    pub fn parse(value: &str) -> DomainResult<Self> {
        let invalid = || {
            DomainError::validation(format!(
                "version '{value}' must follow semantic versioning format \
                 (MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD])"
            ))
        };

        let (rest, build) = match value.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (value, None),
        };
        let (core, pre_release) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let mut segments = core.split('.');
        let major = Self::numeric_segment(segments.next()).ok_or_else(invalid)?;
        let minor = Self::numeric_segment(segments.next()).ok_or_else(invalid)?;
        let patch = Self::numeric_segment(segments.next()).ok_or_else(invalid)?;
        if segments.next().is_some() {
            return Err(invalid());
        }

        for tag in [pre_release, build].into_iter().flatten() {
            if tag.is_empty() || !tag.chars().all(Self::is_tag_char) {
                return Err(invalid());
            }
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre_release: pre_release.map(str::to_owned),
            build: build.map(str::to_owned),
        })
    }

    fn numeric_segment(segment: Option<&str>) -> Option<u64> {
        let segment = segment?;
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse().ok()
    }

    fn is_tag_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '.'
    }

    pub fn initial() -> Self {
        Self {
            major: 1,
            minor: 0,
            patch: 0,
            pre_release: None,
            build: None,
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn pre_release(&self) -> Option<&str> {
        self.pre_release.as_deref()
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    /// Next version for the given increment kind. Pre-release and build
    /// metadata never survive an increment.
    pub fn bump(&self, increment: VersionIncrement) -> Self {
        let (major, minor, patch) = match increment {
            VersionIncrement::Major => (self.major + 1, 0, 0),
            VersionIncrement::Minor => (self.major, self.minor + 1, 0),
            VersionIncrement::Patch => (self.major, self.minor, self.patch + 1),
        };
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build: None,
        }
    }

    pub fn is_compatible(&self, required: &Self, level: CompatibilityLevel) -> bool {
        match level {
            CompatibilityLevel::Exact => {
                self.major == required.major
                    && self.minor == required.minor
                    && self.patch == required.patch
            }
            CompatibilityLevel::Minor => {
                self.major == required.major && self.minor == required.minor
            }
            CompatibilityLevel::Major => self.major == required.major,
        }
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionNumber {}

impl Hash for VersionNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                // A pre-release has lower precedence than the release it tags.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for VersionNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionNumber> for String {
    fn from(value: VersionNumber) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> VersionNumber {
        VersionNumber::parse(s).unwrap()
    }

    #[test]
    fn parses_full_grammar() {
        let parsed = v("1.22.3-beta.1+build-7");
        assert_eq!(parsed.major(), 1);
        assert_eq!(parsed.minor(), 22);
        assert_eq!(parsed.patch(), 3);
        assert_eq!(parsed.pre_release(), Some("beta.1"));
        assert_eq!(parsed.build(), Some("build-7"));
        assert_eq!(parsed.to_string(), "1.22.3-beta.1+build-7");
    }

    #[test]
    fn rejects_malformed_strings() {
        for input in ["1.2", "v1.2.3", "1.2.3.4", "1.2.x", "", "1..3", "1.2.3-", "1.2.3+"] {
            assert!(VersionNumber::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn orders_by_numeric_parts() {
        assert!(v("1.2.3") < v("1.2.4"));
        assert!(v("1.2.9") < v("1.10.0"));
        assert!(v("2.0.0") > v("1.99.99"));
    }

    #[test]
    fn pre_release_sorts_before_release() {
        assert!(v("1.0.0-alpha") < v("1.0.0"));
        assert!(v("1.0.0-alpha") < v("1.0.0-beta"));
    }

    #[test]
    fn build_metadata_is_ignored() {
        assert_eq!(v("1.0.0+build1"), v("1.0.0+build2"));
        assert_eq!(v("1.0.0+build1").cmp(&v("1.0.0")), Ordering::Equal);
    }

    #[test]
    fn bump_drops_pre_release_and_build() {
        let base = v("1.2.3-rc.1+42");
        assert_eq!(base.bump(VersionIncrement::Major).to_string(), "2.0.0");
        assert_eq!(base.bump(VersionIncrement::Minor).to_string(), "1.3.0");
        assert_eq!(base.bump(VersionIncrement::Patch).to_string(), "1.2.4");
    }

    #[test]
    fn compatibility_levels() {
        let current = v("2.3.4");
        assert!(current.is_compatible(&v("2.3.4"), CompatibilityLevel::Exact));
        assert!(!current.is_compatible(&v("2.3.5"), CompatibilityLevel::Exact));
        assert!(current.is_compatible(&v("2.3.9"), CompatibilityLevel::Minor));
        assert!(!current.is_compatible(&v("2.4.0"), CompatibilityLevel::Minor));
        assert!(current.is_compatible(&v("2.9.9"), CompatibilityLevel::Major));
        assert!(!current.is_compatible(&v("3.0.0"), CompatibilityLevel::Major));
    }
}
