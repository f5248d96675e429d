pub mod history;
pub mod versions;

pub use history::{
    AdoptionPoint, CreationTrendPoint, EngagementPoint, HistoryAnalyticsDto, HistoryMetadataDto,
    HistoryVersionDto, MigrationComplexity, PerformanceSnapshotDto, QualityAnalyticsDto,
    QualityTrendPoint, TimelineEventDto, TimelineEventKind, TrendDirection, VersionComparisonDto,
    VersionHistoryDto, VersionStatisticsDto,
};
pub use versions::{CreatedVersionDto, TemplateVersionDto, VersionSummaryDto};
