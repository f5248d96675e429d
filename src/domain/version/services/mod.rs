//! Pure domain services over version data: structural content validation,
//! breaking-change analysis, quality scoring and migration planning.

pub mod breaking_changes;
pub mod content_validator;
pub mod migration;
pub mod scoring;

pub use breaking_changes::{
    analyze_breaking_changes, BreakingChange, BreakingChangeAnalysis, BreakingChangeType,
    MigrationEffort,
};
pub use content_validator::{validate_version_content, ContentValidation};
pub use migration::{generate_migration_plan, MigrationPlan, MigrationStep, StepKind};
pub use scoring::{calculate_version_score, ScoreFactor, VersionScore};
