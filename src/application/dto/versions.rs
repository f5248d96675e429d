use crate::domain::version::approval::ApprovalWorkflow;
use crate::domain::version::changelog::ChangelogEntry;
use crate::domain::version::content::VersionContent;
use crate::domain::version::entity::{TemplateVersion, VersionAuthor};
use crate::domain::version::metadata::{
    Asset, CompatibilityInfo, Dependency, DeploymentInfo, ExtendedMetadata, LifecycleInfo,
};
use crate::domain::version::services::{ContentValidation, VersionScore};
use crate::domain::version::value_objects::VersionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of description kept by the summary projection.
pub const SUMMARY_DESCRIPTION_LIMIT: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVersionDto {
    pub id: String,
    pub tenant_id: String,
    pub template_id: String,
    pub template_type: String,
    pub version_number: String,
    pub major_version: u64,
    pub minor_version: u64,
    pub patch_version: u64,
    pub pre_release: Option<String>,
    pub build: Option<String>,
    pub status: VersionStatus,
    pub title: String,
    pub description: String,
    pub content: VersionContent,
    pub changelog: Vec<ChangelogEntry>,
    pub author: VersionAuthor,
    pub approval: ApprovalWorkflow,
    pub deployment: DeploymentInfo,
    pub lifecycle: LifecycleInfo,
    pub compatibility: CompatibilityInfo,
    pub dependencies: Vec<Dependency>,
    pub assets: Vec<Asset>,
    pub metadata: ExtendedMetadata,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub is_published: bool,
    pub is_deprecated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_at: Option<DateTime<Utc>>,
}

impl From<TemplateVersion> for TemplateVersionDto {
    fn from(version: TemplateVersion) -> Self {
        Self {
            id: version.id.to_string(),
            tenant_id: version.tenant_id.to_string(),
            template_id: version.template_id.to_string(),
            template_type: version.template_type.clone(),
            version_number: version.version_number.to_string(),
            major_version: version.version_number.major(),
            minor_version: version.version_number.minor(),
            patch_version: version.version_number.patch(),
            pre_release: version.version_number.pre_release().map(str::to_owned),
            build: version.version_number.build().map(str::to_owned),
            status: version.status,
            title: version.title,
            description: version.description,
            content: version.content,
            changelog: version.changelog,
            author: version.author,
            approval: version.approval,
            deployment: version.deployment,
            lifecycle: version.lifecycle,
            compatibility: version.compatibility,
            dependencies: version.dependencies,
            assets: version.assets,
            metadata: version.metadata,
            tags: version.tags,
            is_active: version.is_active,
            is_published: version.is_published,
            is_deprecated: version.is_deprecated,
            created_at: version.created_at,
            updated_at: version.updated_at,
            published_at: version.published_at,
            deprecated_at: version.deprecated_at,
        }
    }
}

/// Slim projection used by the `summary` history format: nested structures
/// are stripped down to identity, status and authorship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionSummaryDto {
    pub id: String,
    pub version_number: String,
    pub title: String,
    pub description: String,
    pub status: VersionStatus,
    pub author_name: String,
    pub author_role: String,
    pub is_published: bool,
    pub is_deprecated: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl From<&TemplateVersion> for VersionSummaryDto {
    fn from(version: &TemplateVersion) -> Self {
        Self {
            id: version.id.to_string(),
            version_number: version.version_number.to_string(),
            title: version.title.clone(),
            description: truncate_description(&version.description),
            status: version.status,
            author_name: version.author.name.clone(),
            author_role: version.author.role.clone(),
            is_published: version.is_published,
            is_deprecated: version.is_deprecated,
            created_at: version.created_at,
            published_at: version.published_at,
            tags: version.tags.clone(),
        }
    }
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() <= SUMMARY_DESCRIPTION_LIMIT {
        return description.to_owned();
    }
    let truncated: String = description.chars().take(SUMMARY_DESCRIPTION_LIMIT).collect();
    format!("{truncated}...")
}

/// Result payload of a successful version creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedVersionDto {
    pub version: TemplateVersionDto,
    pub version_score: VersionScore,
    pub validation: ContentValidation,
    pub next_steps: Vec<String>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_descriptions_pass_through() {
        assert_eq!(truncate_description("short"), "short");
    }

    #[test]
    fn long_descriptions_get_an_ellipsis() {
        let long = "x".repeat(250);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), SUMMARY_DESCRIPTION_LIMIT + 3);
        assert!(truncated.ends_with("..."));
    }
}
