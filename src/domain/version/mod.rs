pub mod approval;
pub mod changelog;
pub mod content;
pub mod entity;
pub mod metadata;
pub mod repository;
pub mod services;
pub mod specifications;
pub mod value_objects;

pub use entity::{NewTemplateVersion, TemplateVersion, VersionAuthor};
pub use repository::{SortOrder, TemplateVersionRepository, VersionComparison, VersionFilter};
pub use value_objects::{
    CompatibilityLevel, ImpactLevel, TemplateId, TenantId, VersionId, VersionIncrement,
    VersionNumber, VersionStatus,
};
