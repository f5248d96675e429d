use crate::domain::errors::DomainResult;
use crate::domain::version::entity::{NewTemplateVersion, TemplateVersion};
use crate::domain::version::services::breaking_changes::BreakingChange;
use crate::domain::version::value_objects::{
    ImpactLevel, TemplateId, TenantId, VersionId, VersionNumber, VersionStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Query filter shared by the per-template and cross-template listings.
/// Deprecated and archived versions are excluded unless opted in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionFilter {
    pub template_type: Option<String>,
    pub status: Option<VersionStatus>,
    pub author: Option<String>,
    pub include_deprecated: bool,
    pub include_archived: bool,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub sort: SortOrder,
}

impl VersionFilter {
    pub fn matches(&self, version: &TemplateVersion) -> bool {
        if !self.include_deprecated && version.is_deprecated {
            return false;
        }
        if !self.include_archived && version.status == VersionStatus::Archived {
            return false;
        }
        if let Some(template_type) = &self.template_type {
            if version.template_type != *template_type {
                return false;
            }
        }
        if let Some(status) = self.status {
            if version.status != status {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if version.author.user_id != *author && version.author.name != *author {
                return false;
            }
        }
        if let Some(after) = self.created_after {
            if version.created_at < after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if version.created_at > before {
                return false;
            }
        }
        true
    }
}

/// Result of comparing a base version against a target version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionComparison {
    pub base_version: VersionNumber,
    pub target_version: VersionNumber,
    pub breaking_changes: Vec<BreakingChange>,
    pub major_differences: u32,
    pub minor_differences: u32,
    pub impact: ImpactLevel,
}

/// Persistence and query surface for template versions. Every method is
/// tenant-scoped; no cross-tenant read or write is ever valid. `create` is
/// the final authority on `(tenant, template, version_number)` uniqueness and
/// returns `DomainError::Conflict` for a duplicate, which covers the race
/// between the use-case's pre-check and the write.
#[async_trait]
pub trait TemplateVersionRepository: Send + Sync {
    async fn create(&self, new_version: NewTemplateVersion) -> DomainResult<TemplateVersion>;

    async fn update(&self, version: TemplateVersion) -> DomainResult<TemplateVersion>;

    async fn delete(&self, tenant_id: &TenantId, id: &VersionId) -> DomainResult<()>;

    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &VersionId,
    ) -> DomainResult<Option<TemplateVersion>>;

    async fn find_by_version_number(
        &self,
        tenant_id: &TenantId,
        template_id: &TemplateId,
        version_number: &VersionNumber,
    ) -> DomainResult<Option<TemplateVersion>>;

    async fn find_latest_version(
        &self,
        tenant_id: &TenantId,
        template_id: &TemplateId,
    ) -> DomainResult<Option<TemplateVersion>>;

    async fn find_by_template(
        &self,
        tenant_id: &TenantId,
        template_id: &TemplateId,
        filter: &VersionFilter,
    ) -> DomainResult<Vec<TemplateVersion>>;

    async fn find_all(
        &self,
        tenant_id: &TenantId,
        filter: &VersionFilter,
    ) -> DomainResult<Vec<TemplateVersion>>;

    async fn compare_versions(
        &self,
        tenant_id: &TenantId,
        base_id: &VersionId,
        target_id: &VersionId,
    ) -> DomainResult<VersionComparison>;
}
