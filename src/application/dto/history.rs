use crate::application::dto::versions::{TemplateVersionDto, VersionSummaryDto};
use crate::domain::version::repository::VersionFilter;
use crate::domain::version::value_objects::ImpactLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryVersionDto {
    Detailed(Box<TemplateVersionDto>),
    Summary(VersionSummaryDto),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    Created,
    Published,
    Deprecated,
    ReviewApproved,
    ReviewRejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEventDto {
    pub timestamp: DateTime<Utc>,
    pub event: TimelineEventKind,
    pub version_number: String,
    pub description: String,
    pub actor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityTrendPoint {
    pub version_number: String,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionPoint {
    pub version_number: String,
    pub total_uses: u64,
    pub unique_users: u64,
    pub adoption_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionStatisticsDto {
    pub total_versions: usize,
    pub published_versions: usize,
    pub deprecated_versions: usize,
    /// Mean days between publish and deprecation, over versions with both.
    pub average_lifespan_days: Option<f64>,
    pub most_active_author: Option<String>,
    /// Versions created per `YYYY-MM` month.
    pub version_frequency: BTreeMap<String, u32>,
    /// Quality scores newest-first.
    pub quality_trend: Vec<QualityTrendPoint>,
    pub adoption: Vec<AdoptionPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationTrendPoint {
    pub month: String,
    pub count: u32,
    pub change_percent: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityAnalyticsDto {
    pub average_security: f64,
    pub average_performance: f64,
    pub average_accessibility: f64,
    pub average_compliance: f64,
    pub overall_average: f64,
    pub benchmark: f64,
    pub target: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSnapshotDto {
    pub average_render_time_ms: f64,
    pub p95_render_time_ms: f64,
    pub error_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementPoint {
    pub version_number: String,
    pub total_uses: u64,
    pub unique_users: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryAnalyticsDto {
    pub creation_trend: Vec<CreationTrendPoint>,
    pub quality: QualityAnalyticsDto,
    pub performance: PerformanceSnapshotDto,
    pub engagement: Vec<EngagementPoint>,
    pub breaking_changes_by_type: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationComplexity {
    Simple,
    Moderate,
    Complex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionComparisonDto {
    pub base_version: String,
    pub target_version: String,
    pub breaking_changes: usize,
    pub major_differences: u32,
    pub minor_differences: u32,
    pub impact: ImpactLevel,
    pub complexity: MigrationComplexity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMetadataDto {
    pub total_versions: usize,
    pub filtered_versions: usize,
    pub latest_version: Option<String>,
    pub oldest_version: Option<String>,
    pub filters: VersionFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionHistoryDto {
    pub versions: Vec<HistoryVersionDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineEventDto>>,
    pub statistics: VersionStatisticsDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<HistoryAnalyticsDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparisons: Option<Vec<VersionComparisonDto>>,
    pub metadata: HistoryMetadataDto,
}
