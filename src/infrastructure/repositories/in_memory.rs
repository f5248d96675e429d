// src/infrastructure/repositories/in_memory.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::version::entity::{NewTemplateVersion, TemplateVersion};
use crate::domain::version::repository::{
    SortOrder, TemplateVersionRepository, VersionComparison, VersionFilter,
};
use crate::domain::version::services::analyze_breaking_changes;
use crate::domain::version::value_objects::{TemplateId, TenantId, VersionId, VersionNumber};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Map-backed repository. Production deployments put a database behind the
/// `TemplateVersionRepository` trait instead; this implementation exists for
/// tests and as the reference semantics of the contract, notably the
/// tenant scoping of every query and the uniqueness check in `create`.
#[derive(Default)]
pub struct InMemoryVersionRepository {
    inner: Mutex<HashMap<String, TemplateVersion>>,
}

impl InMemoryVersionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DomainResult<std::sync::MutexGuard<'_, HashMap<String, TemplateVersion>>> {
        self.inner
            .lock()
            .map_err(|_| DomainError::Persistence("version store lock poisoned".into()))
    }

    fn sorted(mut versions: Vec<TemplateVersion>, sort: SortOrder) -> Vec<TemplateVersion> {
        versions.sort_by(|a, b| match sort {
            SortOrder::NewestFirst => b.created_at.cmp(&a.created_at),
            SortOrder::OldestFirst => a.created_at.cmp(&b.created_at),
        });
        versions
    }
}

#[async_trait]
impl TemplateVersionRepository for InMemoryVersionRepository {
    async fn create(&self, new_version: NewTemplateVersion) -> DomainResult<TemplateVersion> {
        let mut store = self.lock()?;
        let duplicate = store.values().any(|existing| {
            existing.tenant_id == new_version.tenant_id
                && existing.template_id == new_version.template_id
                && existing.version_number == new_version.version_number
        });
        if duplicate {
            return Err(DomainError::conflict(format!(
                "version {} already exists for template {}",
                new_version.version_number, new_version.template_id
            )));
        }

        let id = VersionId::new(Uuid::new_v4().to_string())?;
        let version = new_version.into_version(id.clone());
        store.insert(id.to_string(), version.clone());
        Ok(version)
    }

    async fn update(&self, version: TemplateVersion) -> DomainResult<TemplateVersion> {
        let mut store = self.lock()?;
        let key = version.id.to_string();
        match store.get(&key) {
            Some(existing) if existing.tenant_id == version.tenant_id => {
                store.insert(key, version.clone());
                Ok(version)
            }
            _ => Err(DomainError::not_found(format!(
                "version {} not found",
                version.id
            ))),
        }
    }

    async fn delete(&self, tenant_id: &TenantId, id: &VersionId) -> DomainResult<()> {
        let mut store = self.lock()?;
        match store.get(id.as_str()) {
            Some(existing) if existing.tenant_id == *tenant_id => {
                store.remove(id.as_str());
                Ok(())
            }
            _ => Err(DomainError::not_found(format!("version {id} not found"))),
        }
    }

    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: &VersionId,
    ) -> DomainResult<Option<TemplateVersion>> {
        let store = self.lock()?;
        Ok(store
            .get(id.as_str())
            .filter(|version| version.tenant_id == *tenant_id)
            .cloned())
    }

    async fn find_by_version_number(
        &self,
        tenant_id: &TenantId,
        template_id: &TemplateId,
        version_number: &VersionNumber,
    ) -> DomainResult<Option<TemplateVersion>> {
        let store = self.lock()?;
        Ok(store
            .values()
            .find(|version| {
                version.tenant_id == *tenant_id
                    && version.template_id == *template_id
                    && version.version_number == *version_number
            })
            .cloned())
    }

    async fn find_latest_version(
        &self,
        tenant_id: &TenantId,
        template_id: &TemplateId,
    ) -> DomainResult<Option<TemplateVersion>> {
        let store = self.lock()?;
        Ok(store
            .values()
            .filter(|version| {
                version.tenant_id == *tenant_id && version.template_id == *template_id
            })
            .max_by(|a, b| a.version_number.cmp(&b.version_number))
            .cloned())
    }

    async fn find_by_template(
        &self,
        tenant_id: &TenantId,
        template_id: &TemplateId,
        filter: &VersionFilter,
    ) -> DomainResult<Vec<TemplateVersion>> {
        let store = self.lock()?;
        let versions = store
            .values()
            .filter(|version| {
                version.tenant_id == *tenant_id
                    && version.template_id == *template_id
                    && filter.matches(version)
            })
            .cloned()
            .collect();
        Ok(Self::sorted(versions, filter.sort))
    }

    async fn find_all(
        &self,
        tenant_id: &TenantId,
        filter: &VersionFilter,
    ) -> DomainResult<Vec<TemplateVersion>> {
        let store = self.lock()?;
        let versions = store
            .values()
            .filter(|version| version.tenant_id == *tenant_id && filter.matches(version))
            .cloned()
            .collect();
        Ok(Self::sorted(versions, filter.sort))
    }

    async fn compare_versions(
        &self,
        tenant_id: &TenantId,
        base_id: &VersionId,
        target_id: &VersionId,
    ) -> DomainResult<VersionComparison> {
        let store = self.lock()?;
        let fetch = |id: &VersionId| {
            store
                .get(id.as_str())
                .filter(|version| version.tenant_id == *tenant_id)
                .ok_or_else(|| DomainError::not_found(format!("version {id} not found")))
        };
        let base = fetch(base_id)?;
        let target = fetch(target_id)?;

        let analysis = analyze_breaking_changes(&base.content, &target.content);

        // Difference counts beyond the breaking set: added variables and
        // script/style deltas count as minor, everything breaking as major.
        let base_names: std::collections::HashSet<&str> = base
            .content
            .variables
            .iter()
            .map(|variable| variable.name.as_str())
            .collect();
        let added_variables = target
            .content
            .variables
            .iter()
            .filter(|variable| !base_names.contains(variable.name.as_str()))
            .count() as u32;
        let script_delta = base.content.scripts.len().abs_diff(target.content.scripts.len()) as u32;
        let style_delta = base.content.styles.len().abs_diff(target.content.styles.len()) as u32;

        Ok(VersionComparison {
            base_version: base.version_number.clone(),
            target_version: target.version_number.clone(),
            major_differences: analysis.breaking_changes.len() as u32,
            minor_differences: added_variables + script_delta + style_delta,
            impact: analysis.impact,
            breaking_changes: analysis.breaking_changes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::approval::ApprovalWorkflow;
    use crate::domain::version::changelog::ChangelogEntry;
    use crate::domain::version::content::VersionContent;
    use crate::domain::version::entity::{AuthorStatistics, VersionAuthor};
    use crate::domain::version::value_objects::VersionStatus;
    use chrono::Utc;

    fn new_version(tenant: &str, template: &str, number: &str) -> NewTemplateVersion {
        let now = Utc::now();
        NewTemplateVersion {
            tenant_id: TenantId::new(tenant).unwrap(),
            template_id: TemplateId::new(template).unwrap(),
            template_type: "email".to_owned(),
            version_number: VersionNumber::parse(number).unwrap(),
            status: VersionStatus::Draft,
            title: "sample".to_owned(),
            description: "a sample version".to_owned(),
            content: VersionContent::default(),
            changelog: vec![ChangelogEntry::creation_entry(None, "alex", now)],
            author: VersionAuthor {
                user_id: "u-1".to_owned(),
                name: "alex".to_owned(),
                role: "developer".to_owned(),
                contributions: Vec::new(),
                statistics: AuthorStatistics::default(),
            },
            approval: ApprovalWorkflow::standard(),
            deployment: Default::default(),
            lifecycle: Default::default(),
            compatibility: Default::default(),
            dependencies: Vec::new(),
            assets: Vec::new(),
            metadata: Default::default(),
            tags: Vec::new(),
            is_active: true,
            is_published: false,
            is_deprecated: false,
            created_at: now,
            updated_at: now,
            published_at: None,
            deprecated_at: None,
        }
    }

    #[tokio::test]
    async fn create_mints_an_id_and_rejects_duplicates() {
        let repo = InMemoryVersionRepository::new();
        let created = repo
            .create(new_version("tenant-a", "tpl-1", "1.0.0"))
            .await
            .unwrap();
        assert!(!created.id.as_str().is_empty());

        let duplicate = repo.create(new_version("tenant-a", "tpl-1", "1.0.0")).await;
        assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

        // same number under another tenant is a different version
        assert!(repo
            .create(new_version("tenant-b", "tpl-1", "1.0.0"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn reads_are_tenant_scoped() {
        let repo = InMemoryVersionRepository::new();
        let created = repo
            .create(new_version("tenant-a", "tpl-1", "1.0.0"))
            .await
            .unwrap();

        let own_tenant = TenantId::new("tenant-a").unwrap();
        let other_tenant = TenantId::new("tenant-b").unwrap();
        assert!(repo
            .find_by_id(&own_tenant, &created.id)
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_id(&other_tenant, &created.id)
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            repo.delete(&other_tenant, &created.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_version() {
        let repo = InMemoryVersionRepository::new();
        let created = repo
            .create(new_version("tenant-a", "tpl-1", "1.0.0"))
            .await
            .unwrap();
        let tenant = TenantId::new("tenant-a").unwrap();
        repo.delete(&tenant, &created.id).await.unwrap();
        assert!(repo
            .find_by_id(&tenant, &created.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn latest_version_follows_semver_precedence() {
        let repo = InMemoryVersionRepository::new();
        for number in ["1.0.0", "1.10.0", "1.2.0", "2.0.0-rc.1"] {
            repo.create(new_version("tenant-a", "tpl-1", number))
                .await
                .unwrap();
        }
        let tenant = TenantId::new("tenant-a").unwrap();
        let template = TemplateId::new("tpl-1").unwrap();
        let latest = repo
            .find_latest_version(&tenant, &template)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.version_number.to_string(), "2.0.0-rc.1");
    }
}
