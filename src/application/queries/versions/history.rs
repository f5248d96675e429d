// src/application/queries/versions/history.rs
use super::VersionQueryService;
use crate::{
    application::{
        dto::{
            AdoptionPoint, CreationTrendPoint, EngagementPoint, HistoryAnalyticsDto,
            HistoryMetadataDto, HistoryVersionDto, MigrationComplexity, PerformanceSnapshotDto,
            QualityAnalyticsDto, QualityTrendPoint, TemplateVersionDto, TimelineEventDto,
            TimelineEventKind, TrendDirection, VersionComparisonDto, VersionHistoryDto,
            VersionStatisticsDto, VersionSummaryDto,
        },
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        version::{
            approval::ReviewStatus,
            entity::TemplateVersion,
            repository::{VersionComparison, VersionFilter},
            services::scoring,
            specifications::CanViewVersionHistorySpec,
            value_objects::{TemplateId, TenantId},
        },
    },
};
use std::collections::BTreeMap;

const QUALITY_BENCHMARK: f64 = 80.0;
const QUALITY_TARGET: f64 = 90.0;
/// Band within which month-over-month creation volume counts as stable.
const TREND_STABLE_BAND_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFormat {
    Summary,
    #[default]
    Detailed,
}

#[derive(Default)]
pub struct VersionHistoryQuery {
    pub tenant_id: String,
    pub template_id: Option<String>,
    pub user_role: String,
    pub filter: VersionFilter,
    pub max_versions: Option<usize>,
    pub include_timeline: bool,
    pub include_analytics: bool,
    pub include_comparisons: bool,
    pub format: HistoryFormat,
}

impl VersionQueryService {
    /// Retrieves version history for one template or across all of a
    /// tenant's templates, with optional timeline, analytics and pairwise
    /// comparisons. Read access is gated on the caller's role before any
    /// data is touched.
    pub async fn version_history(
        &self,
        query: VersionHistoryQuery,
    ) -> ApplicationResult<VersionHistoryDto> {
        self.try_history(query).await.map_err(|err| match err {
            ApplicationError::Domain(DomainError::Persistence(cause)) => {
                tracing::error!(error = %cause, "version history retrieval failed");
                ApplicationError::infrastructure("internal error while retrieving version history")
            }
            other => other,
        })
    }

    async fn try_history(&self, query: VersionHistoryQuery) -> ApplicationResult<VersionHistoryDto> {
        if !CanViewVersionHistorySpec::new(&query.user_role).is_satisfied() {
            return Err(ApplicationError::forbidden(format!(
                "role '{}' is not permitted to view version history",
                query.user_role
            )));
        }

        let tenant_id = TenantId::new(query.tenant_id.clone())?;

        let mut versions = match &query.template_id {
            Some(raw) => {
                let template_id = TemplateId::new(raw.clone())?;
                self.repo
                    .find_by_template(&tenant_id, &template_id, &query.filter)
                    .await?
            }
            // Cross-template: same filter set, history synthesized locally.
            None => self.repo.find_all(&tenant_id, &query.filter).await?,
        };

        let total_versions = versions.len();
        let latest_version = versions
            .iter()
            .map(|v| &v.version_number)
            .max()
            .map(ToString::to_string);
        let oldest_version = versions
            .iter()
            .map(|v| &v.version_number)
            .min()
            .map(ToString::to_string);

        if let Some(max) = query.max_versions {
            versions.truncate(max);
        }

        let timeline = query.include_timeline.then(|| build_timeline(&versions));
        let statistics = build_statistics(&versions);
        let analytics = query.include_analytics.then(|| build_analytics(&versions));

        let comparisons = if query.include_comparisons && versions.len() >= 2 {
            Some(self.build_comparisons(&tenant_id, &versions).await)
        } else {
            None
        };

        let filtered_versions = versions.len();
        let rendered = versions
            .into_iter()
            .map(|version| match query.format {
                HistoryFormat::Summary => {
                    HistoryVersionDto::Summary(VersionSummaryDto::from(&version))
                }
                HistoryFormat::Detailed => {
                    HistoryVersionDto::Detailed(Box::new(TemplateVersionDto::from(version)))
                }
            })
            .collect();

        Ok(VersionHistoryDto {
            versions: rendered,
            timeline,
            statistics,
            analytics,
            comparisons,
            metadata: HistoryMetadataDto {
                total_versions,
                filtered_versions,
                latest_version,
                oldest_version,
                filters: query.filter,
            },
        })
    }

    /// Compares each version against its immediate predecessor in the sorted
    /// order. A single failed comparison is logged and skipped; it never
    /// fails the whole request.
    async fn build_comparisons(
        &self,
        tenant_id: &TenantId,
        versions: &[TemplateVersion],
    ) -> Vec<VersionComparisonDto> {
        let mut chronological: Vec<&TemplateVersion> = versions.iter().collect();
        chronological.sort_by_key(|version| version.created_at);

        let mut comparisons = Vec::new();
        for pair in chronological.windows(2) {
            let (base, target) = (pair[0], pair[1]);
            match self
                .repo
                .compare_versions(tenant_id, &base.id, &target.id)
                .await
            {
                Ok(comparison) => comparisons.push(comparison_dto(&comparison)),
                Err(err) => {
                    tracing::warn!(
                        base = %base.version_number,
                        target = %target.version_number,
                        error = %err,
                        "skipping failed version comparison"
                    );
                }
            }
        }
        comparisons
    }
}

fn comparison_dto(comparison: &VersionComparison) -> VersionComparisonDto {
    let breaking = comparison.breaking_changes.len();
    let complexity = if breaking > 5 || comparison.major_differences > 20 {
        MigrationComplexity::Complex
    } else if breaking > 0 || comparison.major_differences > 5 {
        MigrationComplexity::Moderate
    } else {
        MigrationComplexity::Simple
    };
    VersionComparisonDto {
        base_version: comparison.base_version.to_string(),
        target_version: comparison.target_version.to_string(),
        breaking_changes: breaking,
        major_differences: comparison.major_differences,
        minor_differences: comparison.minor_differences,
        impact: comparison.impact,
        complexity,
    }
}

fn build_timeline(versions: &[TemplateVersion]) -> Vec<TimelineEventDto> {
    let mut events = Vec::new();
    for version in versions {
        let number = version.version_number.to_string();
        events.push(TimelineEventDto {
            timestamp: version.created_at,
            event: TimelineEventKind::Created,
            version_number: number.clone(),
            description: format!("Version {number} created"),
            actor: version.author.name.clone(),
        });
        if let Some(published_at) = version.published_at {
            events.push(TimelineEventDto {
                timestamp: published_at,
                event: TimelineEventKind::Published,
                version_number: number.clone(),
                description: format!("Version {number} published"),
                actor: version.author.name.clone(),
            });
        }
        if let Some(deprecated_at) = version.deprecated_at {
            events.push(TimelineEventDto {
                timestamp: deprecated_at,
                event: TimelineEventKind::Deprecated,
                version_number: number.clone(),
                description: format!("Version {number} deprecated"),
                actor: version.author.name.clone(),
            });
        }
        for review in &version.approval.reviews {
            let event = match review.status {
                ReviewStatus::Approved => TimelineEventKind::ReviewApproved,
                ReviewStatus::Rejected => TimelineEventKind::ReviewRejected,
                ReviewStatus::ChangesRequested => continue,
            };
            events.push(TimelineEventDto {
                timestamp: review.submitted_at,
                event,
                version_number: number.clone(),
                description: format!("Review submitted for version {number}"),
                actor: review.reviewer.clone(),
            });
        }
    }
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events
}

fn build_statistics(versions: &[TemplateVersion]) -> VersionStatisticsDto {
    let published_versions = versions.iter().filter(|v| v.is_published).count();
    let deprecated_versions = versions.iter().filter(|v| v.is_deprecated).count();

    let lifespans: Vec<f64> = versions
        .iter()
        .filter_map(|version| {
            let published = version.published_at?;
            let deprecated = version.deprecated_at?;
            Some((deprecated - published).num_seconds() as f64 / 86_400.0)
        })
        .collect();
    let average_lifespan_days = (!lifespans.is_empty())
        .then(|| lifespans.iter().sum::<f64>() / lifespans.len() as f64);

    let mut by_author: BTreeMap<&str, u32> = BTreeMap::new();
    for version in versions {
        *by_author.entry(version.author.name.as_str()).or_default() += 1;
    }
    let most_active_author = by_author
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(name, _)| (*name).to_owned());

    let version_frequency = monthly_counts(versions);

    let mut newest_first: Vec<&TemplateVersion> = versions.iter().collect();
    newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let quality_trend = newest_first
        .iter()
        .map(|version| QualityTrendPoint {
            version_number: version.version_number.to_string(),
            score: scoring::calculate_version_score(version).overall,
            created_at: version.created_at,
        })
        .collect();

    let adoption = versions
        .iter()
        .map(|version| AdoptionPoint {
            version_number: version.version_number.to_string(),
            total_uses: version.metadata.usage_analytics.total_uses,
            unique_users: version.metadata.usage_analytics.unique_users,
            adoption_rate: version.metadata.usage_analytics.adoption_rate,
        })
        .collect();

    VersionStatisticsDto {
        total_versions: versions.len(),
        published_versions,
        deprecated_versions,
        average_lifespan_days,
        most_active_author,
        version_frequency,
        quality_trend,
        adoption,
    }
}

fn build_analytics(versions: &[TemplateVersion]) -> HistoryAnalyticsDto {
    // Gap months count as zero so an idle stretch reads as a drop, not as
    // stable continuation of the last active month.
    let monthly = zero_filled_months(&monthly_counts(versions));
    let mut creation_trend = Vec::with_capacity(monthly.len());
    let mut previous: Option<u32> = None;
    for (month, count) in monthly {
        let change_percent = match previous {
            Some(prev) if prev > 0 => (f64::from(count) - f64::from(prev)) / f64::from(prev) * 100.0,
            Some(_) if count > 0 => 100.0,
            _ => 0.0,
        };
        let direction = if change_percent > TREND_STABLE_BAND_PERCENT {
            TrendDirection::Increasing
        } else if change_percent < -TREND_STABLE_BAND_PERCENT {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };
        creation_trend.push(CreationTrendPoint {
            month,
            count,
            change_percent,
            direction,
        });
        previous = Some(count);
    }

    let count = versions.len().max(1) as f64;
    let average_security = versions.iter().map(scoring::security_score).sum::<f64>() / count;
    let average_performance = versions.iter().map(scoring::performance_score).sum::<f64>() / count;
    let average_accessibility =
        versions.iter().map(scoring::accessibility_score).sum::<f64>() / count;
    let average_compliance = versions
        .iter()
        .map(|version| {
            version
                .metadata
                .compliance_check
                .as_ref()
                .map_or(0.0, |check| check.score)
        })
        .sum::<f64>()
        / count;
    let overall_average =
        (average_security + average_performance + average_accessibility + average_compliance) / 4.0;

    let engagement = versions
        .iter()
        .map(|version| EngagementPoint {
            version_number: version.version_number.to_string(),
            total_uses: version.metadata.usage_analytics.total_uses,
            unique_users: version.metadata.usage_analytics.unique_users,
        })
        .collect();

    let mut chronological: Vec<&TemplateVersion> = versions.iter().collect();
    chronological.sort_by_key(|version| version.created_at);
    let mut breaking_changes_by_type: BTreeMap<String, u32> = BTreeMap::new();
    for pair in chronological.windows(2) {
        let analysis = crate::domain::version::services::analyze_breaking_changes(
            &pair[0].content,
            &pair[1].content,
        );
        for change in analysis.breaking_changes {
            *breaking_changes_by_type
                .entry(change.change_type.to_string())
                .or_default() += 1;
        }
    }

    HistoryAnalyticsDto {
        creation_trend,
        quality: QualityAnalyticsDto {
            average_security,
            average_performance,
            average_accessibility,
            average_compliance,
            overall_average,
            benchmark: QUALITY_BENCHMARK,
            target: QUALITY_TARGET,
        },
        // Representative rendering-path sample; live numbers come from the
        // telemetry pipeline, not this store.
        performance: PerformanceSnapshotDto {
            average_render_time_ms: 120.0,
            p95_render_time_ms: 450.0,
            error_rate: 0.002,
        },
        engagement,
        breaking_changes_by_type,
    }
}

fn monthly_counts(versions: &[TemplateVersion]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for version in versions {
        let month = version.created_at.format("%Y-%m").to_string();
        *counts.entry(month).or_default() += 1;
    }
    counts
}

/// Expands a sparse `YYYY-MM` histogram into a contiguous month range from
/// its first to its last key, with missing months at zero.
fn zero_filled_months(counts: &BTreeMap<String, u32>) -> Vec<(String, u32)> {
    let parse = |key: &str| -> Option<(i32, u32)> {
        let (year, month) = key.split_once('-')?;
        Some((year.parse().ok()?, month.parse().ok()?))
    };
    let bounds = counts
        .keys()
        .next()
        .zip(counts.keys().last())
        .and_then(|(first, last)| parse(first).zip(parse(last)));
    let Some(((mut year, mut month), (last_year, last_month))) = bounds else {
        return counts.iter().map(|(m, c)| (m.clone(), *c)).collect();
    };

    let mut months = Vec::new();
    loop {
        let key = format!("{year:04}-{month:02}");
        months.push((key.clone(), counts.get(&key).copied().unwrap_or(0)));
        if (year, month) == (last_year, last_month) {
            break;
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    months
}
