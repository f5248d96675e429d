use crate::domain::version::content::VersionContent;
use crate::domain::version::value_objects::ImpactLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakingChangeType {
    Schema,
    Variable,
    Script,
    Configuration,
}

impl fmt::Display for BreakingChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Schema => "schema",
            Self::Variable => "variable",
            Self::Script => "script",
            Self::Configuration => "configuration",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationEffort {
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakingChange {
    #[serde(rename = "type")]
    pub change_type: BreakingChangeType,
    /// The affected component, used as the migration step title.
    pub component: String,
    pub description: String,
    pub impact: ImpactLevel,
    pub migration_required: bool,
    pub migration_effort: MigrationEffort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakingChangeAnalysis {
    pub has_breaking_changes: bool,
    pub breaking_changes: Vec<BreakingChange>,
    /// Maximum severity among the recorded changes; `Low` when there are none.
    pub impact: ImpactLevel,
}

/// Diffs two versions' content for backward-incompatible differences.
/// `old` is the version being upgraded *from*, `new` the one being upgraded
/// *to*; swapping them flips which side counts as removed. Variables that
/// only exist in `new` are additions and never breaking.
pub fn analyze_breaking_changes(
    old: &VersionContent,
    new: &VersionContent,
) -> BreakingChangeAnalysis {
    let mut changes = Vec::new();

    let old_schema_version = old.schema.as_ref().map(|s| s.version.as_str());
    let new_schema_version = new.schema.as_ref().map(|s| s.version.as_str());
    if old_schema_version != new_schema_version {
        changes.push(BreakingChange {
            change_type: BreakingChangeType::Schema,
            component: "schema".to_owned(),
            description: format!(
                "schema version changed from {} to {}",
                old_schema_version.unwrap_or("none"),
                new_schema_version.unwrap_or("none"),
            ),
            impact: ImpactLevel::Medium,
            migration_required: true,
            migration_effort: MigrationEffort::Manual,
        });
    }

    let new_variables: HashMap<&str, _> = new
        .variables
        .iter()
        .map(|variable| (variable.name.as_str(), variable))
        .collect();

    for old_variable in &old.variables {
        match new_variables.get(old_variable.name.as_str()) {
            None => changes.push(BreakingChange {
                change_type: BreakingChangeType::Variable,
                component: format!("variable '{}'", old_variable.name),
                description: format!("variable '{}' was removed", old_variable.name),
                impact: ImpactLevel::High,
                migration_required: true,
                migration_effort: MigrationEffort::Manual,
            }),
            Some(new_variable) if new_variable.variable_type != old_variable.variable_type => {
                let display = |t: &Option<_>| {
                    t.as_ref()
                        .map_or_else(|| "untyped".to_owned(), ToString::to_string)
                };
                changes.push(BreakingChange {
                    change_type: BreakingChangeType::Variable,
                    component: format!("variable '{}'", old_variable.name),
                    description: format!(
                        "variable '{}' type changed from {} to {}",
                        old_variable.name,
                        display(&old_variable.variable_type),
                        display(&new_variable.variable_type),
                    ),
                    impact: ImpactLevel::High,
                    migration_required: true,
                    migration_effort: MigrationEffort::Manual,
                });
            }
            Some(_) => {}
        }
    }

    let impact = changes
        .iter()
        .map(|change| change.impact)
        .max()
        .unwrap_or(ImpactLevel::Low);

    BreakingChangeAnalysis {
        has_breaking_changes: !changes.is_empty(),
        breaking_changes: changes,
        impact,
    }
}
