use crate::domain::version::value_objects::ImpactLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Changed,
    Fixed,
    Removed,
    Deprecated,
    Security,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogEntry {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub category: String,
    pub description: String,
    pub impact: ImpactLevel,
    pub breaking: bool,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl ChangelogEntry {
    /// Seed entry written at creation time: either the initial entry for a
    /// brand-new template or a pointer back to the version it was based on.
    pub fn creation_entry(
        based_on: Option<&str>,
        author: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let (change_type, description) = match based_on {
            Some(base) => (ChangeType::Changed, format!("Updated from version {base}")),
            None => (ChangeType::Added, "Initial version created".to_owned()),
        };
        Self {
            change_type,
            category: "general".to_owned(),
            description,
            impact: ImpactLevel::Low,
            breaking: false,
            author: author.into(),
            timestamp: now,
            references: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_entry_without_base_is_initial() {
        let entry = ChangelogEntry::creation_entry(None, "alex", Utc::now());
        assert_eq!(entry.change_type, ChangeType::Added);
        assert_eq!(entry.description, "Initial version created");
        assert!(!entry.breaking);
    }

    #[test]
    fn creation_entry_with_base_references_it() {
        let entry = ChangelogEntry::creation_entry(Some("1.2.0"), "alex", Utc::now());
        assert_eq!(entry.change_type, ChangeType::Changed);
        assert_eq!(entry.description, "Updated from version 1.2.0");
    }
}
