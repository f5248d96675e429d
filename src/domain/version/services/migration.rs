use crate::domain::version::content::VersionContent;
use crate::domain::version::services::breaking_changes::{
    analyze_breaking_changes, MigrationEffort,
};
use crate::domain::version::value_objects::{ImpactLevel, VersionNumber};
use serde::{Deserialize, Serialize};

const MINUTES_PER_STEP: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Automated,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationStep {
    pub order: u32,
    pub title: String,
    pub description: String,
    pub kind: StepKind,
}

/// Ordered plan for moving consumers between two versions, with a mirrored
/// rollback path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationPlan {
    pub from_version: VersionNumber,
    pub to_version: VersionNumber,
    pub steps: Vec<MigrationStep>,
    pub rollback_steps: Vec<MigrationStep>,
    /// True only when every breaking change migrates automatically.
    pub automated: bool,
    pub estimated_minutes: u32,
    pub risk_level: ImpactLevel,
    pub pre_checks: Vec<String>,
    pub post_checks: Vec<String>,
    pub rollback_checks: Vec<String>,
}

pub fn generate_migration_plan(
    from_version: &VersionNumber,
    to_version: &VersionNumber,
    from_content: &VersionContent,
    to_content: &VersionContent,
) -> MigrationPlan {
    let analysis = analyze_breaking_changes(from_content, to_content);

    let mut steps = vec![MigrationStep {
        order: 1,
        title: "Create Backup".to_owned(),
        description: format!("Back up all data bound to version {from_version}"),
        kind: StepKind::Automated,
    }];

    for change in &analysis.breaking_changes {
        steps.push(MigrationStep {
            order: steps.len() as u32 + 1,
            title: format!("Migrate {}", change.component),
            description: change.description.clone(),
            kind: match change.migration_effort {
                MigrationEffort::Automatic => StepKind::Automated,
                MigrationEffort::Manual => StepKind::Manual,
            },
        });
    }

    steps.push(MigrationStep {
        order: steps.len() as u32 + 1,
        title: "Validate Migration".to_owned(),
        description: format!("Verify all consumers run correctly on version {to_version}"),
        kind: StepKind::Automated,
    });

    let rollback_steps = steps
        .iter()
        .rev()
        .enumerate()
        .map(|(index, step)| MigrationStep {
            order: index as u32 + 1,
            title: format!("Rollback {}", step.title),
            description: format!("Rollback {}", step.description),
            kind: step.kind,
        })
        .collect();

    let automated = analysis
        .breaking_changes
        .iter()
        .all(|change| change.migration_effort == MigrationEffort::Automatic);

    MigrationPlan {
        from_version: from_version.clone(),
        to_version: to_version.clone(),
        estimated_minutes: steps.len() as u32 * MINUTES_PER_STEP,
        rollback_steps,
        automated,
        risk_level: analysis.impact,
        steps,
        pre_checks: vec![format!(
            "Confirm compatibility between {from_version} and {to_version}"
        )],
        post_checks: vec!["Confirm migration completed without data loss".to_owned()],
        rollback_checks: vec!["Confirm rollback restored the previous state".to_owned()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::content::{ContentSchema, TemplateVariable, VariableType};

    fn content(schema_version: &str, variable_names: &[&str]) -> VersionContent {
        VersionContent {
            schema: Some(ContentSchema {
                version: schema_version.to_owned(),
                schema_type: "email".to_owned(),
                ..ContentSchema::default()
            }),
            variables: variable_names
                .iter()
                .map(|name| TemplateVariable {
                    name: (*name).to_owned(),
                    variable_type: Some(VariableType::String),
                    scope: Default::default(),
                    required: false,
                    value: None,
                    description: None,
                })
                .collect(),
            ..VersionContent::default()
        }
    }

    fn number(s: &str) -> VersionNumber {
        VersionNumber::parse(s).unwrap()
    }

    #[test]
    fn plan_without_breaking_changes_is_backup_and_validate() {
        let from = content("1.0", &["a"]);
        let to = content("1.0", &["a"]);
        let plan = generate_migration_plan(&number("1.0.0"), &number("1.1.0"), &from, &to);

        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].title, "Create Backup");
        assert_eq!(plan.steps[1].title, "Validate Migration");
        assert!(plan.automated);
        assert_eq!(plan.estimated_minutes, 30);
        assert_eq!(plan.risk_level, ImpactLevel::Low);
    }

    #[test]
    fn one_step_per_breaking_change_in_order() {
        let from = content("1.0", &["a", "b"]);
        let to = content("2.0", &[]);
        let plan = generate_migration_plan(&number("1.0.0"), &number("2.0.0"), &from, &to);

        assert_eq!(plan.steps.len(), 5);
        assert!(plan.steps[1].title.starts_with("Migrate"));
        assert_eq!(plan.steps.last().unwrap().title, "Validate Migration");
        let orders: Vec<u32> = plan.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
        // manual variable migrations make the whole plan manual
        assert!(!plan.automated);
        assert_eq!(plan.estimated_minutes, 75);
        assert_eq!(plan.risk_level, ImpactLevel::High);
    }

    #[test]
    fn rollback_mirrors_forward_steps_reversed() {
        let from = content("1.0", &["a"]);
        let to = content("2.0", &["a"]);
        let plan = generate_migration_plan(&number("1.0.0"), &number("2.0.0"), &from, &to);

        assert_eq!(plan.rollback_steps.len(), plan.steps.len());
        assert_eq!(plan.rollback_steps[0].title, "Rollback Validate Migration");
        assert_eq!(
            plan.rollback_steps.last().unwrap().title,
            "Rollback Create Backup"
        );
        assert_eq!(plan.rollback_steps[0].order, 1);
    }

    #[test]
    fn checks_are_always_present() {
        let from = content("1.0", &[]);
        let to = content("1.0", &[]);
        let plan = generate_migration_plan(&number("1.0.0"), &number("1.0.1"), &from, &to);
        assert_eq!(plan.pre_checks.len(), 1);
        assert_eq!(plan.post_checks.len(), 1);
        assert_eq!(plan.rollback_checks.len(), 1);
    }
}
