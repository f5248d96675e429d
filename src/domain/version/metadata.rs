//! Operational metadata blocks attached to every version.
//!
//! These records are structurally complete at creation and treated as inert
//! pass-through data: only the fields the scorer and the history analytics
//! read (security score, performance budget, accessibility score,
//! satisfaction score, usage counters) carry semantics here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentInfo {
    #[serde(default)]
    pub environments: Vec<String>,
    pub strategy: Option<String>,
    pub deployed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rollout_percentage: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecycleInfo {
    pub stage: Option<String>,
    pub support_ends_at: Option<DateTime<Utc>>,
    pub end_of_life_at: Option<DateTime<Utc>>,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatibilityInfo {
    pub minimum_platform_version: Option<String>,
    #[serde(default)]
    pub supported_locales: Vec<String>,
    #[serde(default)]
    pub backward_compatible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version_requirement: String,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub checksum: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildInfo {
    pub build_id: Option<String>,
    pub built_at: Option<DateTime<Utc>>,
    pub toolchain: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityMetrics {
    #[serde(default)]
    pub test_coverage: f64,
    #[serde(default)]
    pub lint_issues: u32,
    #[serde(default)]
    pub documentation_coverage: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityScan {
    /// 0–100; feeds the version score with weight 0.20.
    pub security_score: f64,
    #[serde(default)]
    pub vulnerabilities: u32,
    pub scanned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    WithinBudget,
    ApproachingLimit,
    OverBudget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceTest {
    pub budget_status: BudgetStatus,
    #[serde(default)]
    pub regression_detected: bool,
    #[serde(default)]
    pub p95_latency_ms: f64,
    pub tested_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessibilityAudit {
    /// 0–100; feeds the version score with weight 0.15.
    pub overall_score: f64,
    #[serde(default)]
    pub violations: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub score: f64,
    #[serde(default)]
    pub frameworks: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageAnalytics {
    #[serde(default)]
    pub total_uses: u64,
    #[serde(default)]
    pub unique_users: u64,
    #[serde(default)]
    pub adoption_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackSummary {
    /// 0–100 satisfaction; feeds the version score with weight 0.20.
    pub satisfaction_score: f64,
    #[serde(default)]
    pub responses: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtendedMetadata {
    #[serde(default)]
    pub build: BuildInfo,
    #[serde(default)]
    pub quality: QualityMetrics,
    pub security_scan: Option<SecurityScan>,
    pub performance_test: Option<PerformanceTest>,
    pub accessibility_audit: Option<AccessibilityAudit>,
    pub compliance_check: Option<ComplianceCheck>,
    #[serde(default)]
    pub usage_analytics: UsageAnalytics,
    pub feedback: Option<FeedbackSummary>,
}
