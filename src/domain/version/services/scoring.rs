use crate::domain::version::entity::TemplateVersion;
use crate::domain::version::metadata::BudgetStatus;
use crate::domain::version::value_objects::ImpactLevel;
use serde::{Deserialize, Serialize};

const WEIGHT_CONTENT_QUALITY: f64 = 0.25;
const WEIGHT_SECURITY: f64 = 0.20;
const WEIGHT_PERFORMANCE: f64 = 0.20;
const WEIGHT_ACCESSIBILITY: f64 = 0.15;
const WEIGHT_FEEDBACK: f64 = 0.20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub factor: String,
    pub score: f64,
    pub weight: f64,
}

/// Single 0–100 quality metric with its per-factor breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionScore {
    pub overall: u8,
    pub breakdown: Vec<ScoreFactor>,
}

pub fn calculate_version_score(version: &TemplateVersion) -> VersionScore {
    let factors = [
        ("Content Quality", content_quality_score(version), WEIGHT_CONTENT_QUALITY),
        ("Security", security_score(version), WEIGHT_SECURITY),
        ("Performance", performance_score(version), WEIGHT_PERFORMANCE),
        ("Accessibility", accessibility_score(version), WEIGHT_ACCESSIBILITY),
        ("User Feedback", feedback_score(version), WEIGHT_FEEDBACK),
    ];

    let weighted: f64 = factors
        .iter()
        .map(|(_, score, weight)| score * weight)
        .sum();

    VersionScore {
        overall: weighted.round().clamp(0.0, 100.0) as u8,
        breakdown: factors
            .into_iter()
            .map(|(factor, score, weight)| ScoreFactor {
                factor: factor.to_owned(),
                score,
                weight,
            })
            .collect(),
    }
}

pub fn content_quality_score(version: &TemplateVersion) -> f64 {
    let mut score = 100.0;

    for issue in &version.content.validation.errors {
        score -= match issue.severity {
            ImpactLevel::Critical => 25.0,
            ImpactLevel::High => 15.0,
            ImpactLevel::Medium => 10.0,
            ImpactLevel::Low => 5.0,
        };
    }
    score -= 2.0 * version.content.validation.warnings.len() as f64;

    if version
        .content
        .schema
        .as_ref()
        .is_some_and(|schema| schema.checksum.is_some())
    {
        score += 5.0;
    }
    if version.content.translations.len() > 1 {
        score += 10.0;
    }
    if !version.content.scripts.is_empty() {
        score += 5.0;
    }

    score.clamp(0.0, 100.0)
}

pub fn security_score(version: &TemplateVersion) -> f64 {
    version
        .metadata
        .security_scan
        .as_ref()
        .map_or(0.0, |scan| scan.security_score)
}

pub fn performance_score(version: &TemplateVersion) -> f64 {
    let Some(test) = &version.metadata.performance_test else {
        return 0.0;
    };

    let mut score: f64 = 100.0;
    match test.budget_status {
        BudgetStatus::OverBudget => score -= 30.0,
        BudgetStatus::ApproachingLimit => score -= 15.0,
        BudgetStatus::WithinBudget => {}
    }
    if test.regression_detected {
        score -= 20.0;
    }
    score.max(0.0)
}

pub fn accessibility_score(version: &TemplateVersion) -> f64 {
    version
        .metadata
        .accessibility_audit
        .as_ref()
        .map_or(0.0, |audit| audit.overall_score)
}

pub fn feedback_score(version: &TemplateVersion) -> f64 {
    version
        .metadata
        .feedback
        .as_ref()
        .map_or(0.0, |feedback| feedback.satisfaction_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::approval::ApprovalWorkflow;
    use crate::domain::version::content::{
        ContentSchema, ScriptType, TemplateScript, Translation, ValidationIssue, VersionContent,
    };
    use crate::domain::version::entity::{AuthorStatistics, VersionAuthor};
    use crate::domain::version::metadata::{
        AccessibilityAudit, ExtendedMetadata, FeedbackSummary, PerformanceTest, SecurityScan,
    };
    use crate::domain::version::value_objects::{
        TemplateId, TenantId, VersionId, VersionNumber, VersionStatus,
    };
    use chrono::Utc;

    fn bare_version() -> TemplateVersion {
        let now = Utc::now();
        TemplateVersion {
            id: VersionId::new("v-1").unwrap(),
            tenant_id: TenantId::new("tenant-a").unwrap(),
            template_id: TemplateId::new("tpl-1").unwrap(),
            template_type: "email".to_owned(),
            version_number: VersionNumber::parse("1.0.0").unwrap(),
            status: VersionStatus::Draft,
            title: "sample".to_owned(),
            description: "a sample version".to_owned(),
            content: VersionContent::default(),
            changelog: Vec::new(),
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
            metadata: ExtendedMetadata::default(),
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

    #[test]
    fn missing_metadata_scores_only_content_quality() {
        let score = calculate_version_score(&bare_version());
        // content quality 100 * 0.25, every other factor 0
        assert_eq!(score.overall, 25);
        assert_eq!(score.breakdown.len(), 5);
    }

    #[test]
    fn full_metadata_scores_high() {
        let mut version = bare_version();
        version.content.schema = Some(ContentSchema {
            checksum: Some("abc".to_owned()),
            ..ContentSchema::default()
        });
        version.metadata.security_scan = Some(SecurityScan {
            security_score: 90.0,
            ..SecurityScan::default()
        });
        version.metadata.performance_test = Some(PerformanceTest {
            budget_status: BudgetStatus::WithinBudget,
            regression_detected: false,
            p95_latency_ms: 10.0,
            tested_at: None,
        });
        version.metadata.accessibility_audit = Some(AccessibilityAudit {
            overall_score: 80.0,
            violations: 0,
        });
        version.metadata.feedback = Some(FeedbackSummary {
            satisfaction_score: 95.0,
            responses: 12,
        });
        // 100*0.25 + 90*0.20 + 100*0.20 + 80*0.15 + 95*0.20 = 94
        assert_eq!(calculate_version_score(&version).overall, 94);
    }

    #[test]
    fn validation_issues_drag_content_quality_down() {
        let mut version = bare_version();
        version.content.validation.errors = vec![
            ValidationIssue {
                severity: ImpactLevel::Critical,
                message: "bad".to_owned(),
                field: None,
            },
            ValidationIssue {
                severity: ImpactLevel::Low,
                message: "meh".to_owned(),
                field: None,
            },
        ];
        version.content.validation.warnings = vec!["w1".to_owned(), "w2".to_owned()];
        // 100 - 25 - 5 - 4 = 66 content quality, weighted 16.5, rounds to 17
        assert_eq!(calculate_version_score(&version).overall, 17);
    }

    #[test]
    fn bonuses_cannot_push_past_one_hundred() {
        let mut version = bare_version();
        version.content.schema = Some(ContentSchema {
            checksum: Some("abc".to_owned()),
            ..ContentSchema::default()
        });
        version.content.translations = vec![
            Translation {
                locale: "en".to_owned(),
                strings: serde_json::Value::Null,
                coverage: 1.0,
            },
            Translation {
                locale: "de".to_owned(),
                strings: serde_json::Value::Null,
                coverage: 1.0,
            },
        ];
        version.content.scripts = vec![TemplateScript {
            name: "hook".to_owned(),
            content: "noop".to_owned(),
            script_type: Some(ScriptType::Hook),
            triggers: Vec::new(),
        }];
        let score = calculate_version_score(&version);
        let content = &score.breakdown[0];
        assert_eq!(content.score, 100.0);
    }

    #[test]
    fn overall_is_always_within_bounds() {
        let mut version = bare_version();
        version.content.validation.errors = (0..50)
            .map(|i| ValidationIssue {
                severity: ImpactLevel::Critical,
                message: format!("issue {i}"),
                field: None,
            })
            .collect();
        let score = calculate_version_score(&version);
        assert_eq!(score.overall, 0);
    }

    #[test]
    fn performance_penalties_stack() {
        let mut version = bare_version();
        version.metadata.performance_test = Some(PerformanceTest {
            budget_status: BudgetStatus::OverBudget,
            regression_detected: true,
            p95_latency_ms: 900.0,
            tested_at: None,
        });
        let performance = &calculate_version_score(&version).breakdown[2];
        assert_eq!(performance.factor, "Performance");
        assert_eq!(performance.score, 50.0);
    }
}
