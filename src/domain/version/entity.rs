// src/domain/version/entity.rs
use crate::domain::version::approval::ApprovalWorkflow;
use crate::domain::version::changelog::ChangelogEntry;
use crate::domain::version::content::VersionContent;
use crate::domain::version::metadata::{
    Asset, CompatibilityInfo, Dependency, DeploymentInfo, ExtendedMetadata, LifecycleInfo,
};
use crate::domain::version::value_objects::{
    TemplateId, TenantId, VersionId, VersionIncrement, VersionNumber, VersionStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorContribution {
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorStatistics {
    pub versions_created: u64,
    pub versions_published: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionAuthor {
    pub user_id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub contributions: Vec<AuthorContribution>,
    #[serde(default)]
    pub statistics: AuthorStatistics,
}

/// The aggregate root. The parsed `version_number` is the single source of
/// truth for the decomposed major/minor/patch parts; they are never stored or
/// updated independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVersion {
    pub id: VersionId,
    pub tenant_id: TenantId,
    pub template_id: TemplateId,
    pub template_type: String,
    pub version_number: VersionNumber,
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
    pub published_at: Option<DateTime<Utc>>,
    pub deprecated_at: Option<DateTime<Utc>>,
}

impl TemplateVersion {
    pub fn major_version(&self) -> u64 {
        self.version_number.major()
    }

    pub fn minor_version(&self) -> u64 {
        self.version_number.minor()
    }

    pub fn patch_version(&self) -> u64 {
        self.version_number.patch()
    }

    pub fn submit_for_review(&mut self, now: DateTime<Utc>) {
        self.status = VersionStatus::PendingReview;
        self.updated_at = now;
    }

    pub fn approve(&mut self, now: DateTime<Utc>) {
        self.status = VersionStatus::Approved;
        self.updated_at = now;
    }

    /// Flips the status enum and the publish flag together; `published_at`
    /// is always set alongside `is_published`.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.status = VersionStatus::Published;
        self.is_published = true;
        self.published_at = Some(now);
        self.updated_at = now;
    }

    pub fn deprecate(&mut self, reason: impl Into<String>, now: DateTime<Utc>) {
        self.status = VersionStatus::Deprecated;
        self.is_deprecated = true;
        self.deprecated_at = Some(now);
        self.lifecycle.deprecation_reason = Some(reason.into());
        self.updated_at = now;
    }

    /// Terminal state: archived versions stay queryable but inactive.
    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.status = VersionStatus::Archived;
        self.is_active = false;
        self.updated_at = now;
    }

    /// Seeds a new draft from this version: same content and tags, fresh
    /// patch-bumped number, reset lifecycle flags and approval workflow.
    pub fn clone_as_draft(&self, author: VersionAuthor, now: DateTime<Utc>) -> NewTemplateVersion {
        let number = self.version_number.bump(VersionIncrement::Patch);
        let changelog = vec![ChangelogEntry::creation_entry(
            Some(&self.version_number.to_string()),
            author.name.clone(),
            now,
        )];
        NewTemplateVersion {
            tenant_id: self.tenant_id.clone(),
            template_id: self.template_id.clone(),
            template_type: self.template_type.clone(),
            version_number: number,
            status: VersionStatus::Draft,
            title: self.title.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            changelog,
            author,
            approval: ApprovalWorkflow::standard(),
            deployment: DeploymentInfo::default(),
            lifecycle: LifecycleInfo::default(),
            compatibility: self.compatibility.clone(),
            dependencies: self.dependencies.clone(),
            assets: Vec::new(),
            metadata: ExtendedMetadata::default(),
            tags: self.tags.clone(),
            is_active: true,
            is_published: false,
            is_deprecated: false,
            created_at: now,
            updated_at: now,
            published_at: None,
            deprecated_at: None,
        }
    }
}

/// Insert payload: a fully-assembled aggregate minus the id, which the
/// repository mints at write time.
#[derive(Debug, Clone)]
pub struct NewTemplateVersion {
    pub tenant_id: TenantId,
    pub template_id: TemplateId,
    pub template_type: String,
    pub version_number: VersionNumber,
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
    pub published_at: Option<DateTime<Utc>>,
    pub deprecated_at: Option<DateTime<Utc>>,
}

impl NewTemplateVersion {
    pub fn into_version(self, id: VersionId) -> TemplateVersion {
        TemplateVersion {
            id,
            tenant_id: self.tenant_id,
            template_id: self.template_id,
            template_type: self.template_type,
            version_number: self.version_number,
            status: self.status,
            title: self.title,
            description: self.description,
            content: self.content,
            changelog: self.changelog,
            author: self.author,
            approval: self.approval,
            deployment: self.deployment,
            lifecycle: self.lifecycle,
            compatibility: self.compatibility,
            dependencies: self.dependencies,
            assets: self.assets,
            metadata: self.metadata,
            tags: self.tags,
            is_active: self.is_active,
            is_published: self.is_published,
            is_deprecated: self.is_deprecated,
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
            deprecated_at: self.deprecated_at,
        }
    }
}
