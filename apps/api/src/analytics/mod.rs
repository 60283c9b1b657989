//! Analytics View — KPIs over reference metrics plus the simulated skill ranking.
//!
//! The metrics come from a [`MetricsSource`]. Today that is [`sample_data::SampleMetrics`];
//! a real reporting backend can be swapped in behind the trait without touching handlers.

pub mod handlers;
pub mod relevance;
pub mod sample_data;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::analytics::relevance::{skill_relevance, SkillScore};
use crate::models::metrics::DashboardMetric;

/// Read-only provider of application-tracking metrics.
pub trait MetricsSource: Send + Sync {
    fn metrics(&self) -> &[DashboardMetric];

    /// True when the rows are sample data rather than real tracking.
    fn is_simulated(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectorFilter {
    All,
    Sector(String),
}

impl SectorFilter {
    /// `None`, blank and `"all"` (any case) select every sector.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => SectorFilter::All,
            Some(v) if v.eq_ignore_ascii_case("all") => SectorFilter::All,
            Some(v) => SectorFilter::Sector(v.to_string()),
        }
    }

    fn matches(&self, metric: &DashboardMetric) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Sector(sector) => metric.sector == *sector,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub resume_count: usize,
    /// 0.0 – 1.0
    pub avg_interview_rate: f64,
    pub avg_ats_score: f64,
    pub total_email_responses: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsBand {
    High,
    Medium,
    Low,
}

impl AtsBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            s if s >= 80 => AtsBand::High,
            s if s >= 60 => AtsBand::Medium,
            _ => AtsBand::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    #[serde(flatten)]
    pub metric: DashboardMetric,
    pub interview_rate: f64,
    /// Compared against the filtered average.
    pub rate_above_average: bool,
    pub ats_band: AtsBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub sector: Option<String>,
    pub sectors: Vec<String>,
    pub kpis: KpiSummary,
    pub rows: Vec<MetricRow>,
    pub skill_relevance: Vec<SkillScore>,
    pub simulated: bool,
}

fn filtered<'a>(
    metrics: &'a [DashboardMetric],
    filter: &'a SectorFilter,
) -> impl Iterator<Item = &'a DashboardMetric> {
    metrics.iter().filter(move |m| filter.matches(m))
}

/// KPIs over the filtered subset. An empty subset divides by 1, so averages are 0.
pub fn summarize(metrics: &[DashboardMetric], filter: &SectorFilter) -> KpiSummary {
    let subset: Vec<&DashboardMetric> = filtered(metrics, filter).collect();
    let count = subset.len();
    let divisor = count.max(1) as f64;

    KpiSummary {
        resume_count: count,
        avg_interview_rate: subset.iter().map(|m| m.interview_rate()).sum::<f64>() / divisor,
        avg_ats_score: subset.iter().map(|m| m.ats_score as f64).sum::<f64>() / divisor,
        total_email_responses: subset.iter().map(|m| m.email_response_count).sum(),
    }
}

/// Distinct sectors, sorted.
pub fn sectors(metrics: &[DashboardMetric]) -> Vec<String> {
    metrics
        .iter()
        .map(|m| m.sector.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn metric_table(metrics: &[DashboardMetric], filter: &SectorFilter) -> Vec<MetricRow> {
    let average = summarize(metrics, filter).avg_interview_rate;
    filtered(metrics, filter)
        .map(|m| {
            let interview_rate = m.interview_rate();
            MetricRow {
                metric: m.clone(),
                interview_rate,
                rate_above_average: interview_rate > average,
                ats_band: AtsBand::for_score(m.ats_score),
            }
        })
        .collect()
}

pub fn build_dashboard(
    source: &dyn MetricsSource,
    filter: &SectorFilter,
    skills: &str,
) -> DashboardView {
    let metrics = source.metrics();
    DashboardView {
        sector: match filter {
            SectorFilter::All => None,
            SectorFilter::Sector(s) => Some(s.clone()),
        },
        sectors: sectors(metrics),
        kpis: summarize(metrics, filter),
        rows: metric_table(metrics, filter),
        skill_relevance: skill_relevance(skills),
        simulated: source.is_simulated(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::sample_data::SampleMetrics;

    #[test]
    fn test_filter_from_query() {
        assert_eq!(SectorFilter::from_query(None), SectorFilter::All);
        assert_eq!(SectorFilter::from_query(Some(" ALL ")), SectorFilter::All);
        assert_eq!(
            SectorFilter::from_query(Some("Education")),
            SectorFilter::Sector("Education".to_string())
        );
    }

    #[test]
    fn test_summarize_all() {
        let source = SampleMetrics::new();
        let kpis = summarize(source.metrics(), &SectorFilter::All);
        assert_eq!(kpis.resume_count, 16);
        assert_eq!(kpis.total_email_responses, 115);
        let expected_ats = 1265.0 / 16.0;
        assert!((kpis.avg_ats_score - expected_ats).abs() < 1e-9);
        assert!(kpis.avg_interview_rate > 0.0 && kpis.avg_interview_rate < 1.0);
    }

    #[test]
    fn test_summarize_single_sector() {
        let source = SampleMetrics::new();
        let filter = SectorFilter::Sector("Technology & IT".to_string());
        let kpis = summarize(source.metrics(), &filter);
        assert_eq!(kpis.resume_count, 2);
        assert!((kpis.avg_ats_score - 78.5).abs() < 1e-9);
        // (3/10 + 6/15) / 2
        assert!((kpis.avg_interview_rate - 0.35).abs() < 1e-9);
        assert_eq!(kpis.total_email_responses, 13);
    }

    #[test]
    fn test_unknown_sector_yields_zero_not_nan() {
        let source = SampleMetrics::new();
        let filter = SectorFilter::Sector("Astronautics".to_string());
        let kpis = summarize(source.metrics(), &filter);
        assert_eq!(kpis.resume_count, 0);
        assert_eq!(kpis.avg_ats_score, 0.0);
        assert_eq!(kpis.avg_interview_rate, 0.0);
        assert_eq!(kpis.total_email_responses, 0);
        assert!(metric_table(source.metrics(), &filter).is_empty());
    }

    #[test]
    fn test_sectors_sorted_and_distinct() {
        let source = SampleMetrics::new();
        let sectors = sectors(source.metrics());
        assert_eq!(sectors.len(), 8);
        assert!(sectors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ats_bands() {
        assert_eq!(AtsBand::for_score(80), AtsBand::High);
        assert_eq!(AtsBand::for_score(79), AtsBand::Medium);
        assert_eq!(AtsBand::for_score(60), AtsBand::Medium);
        assert_eq!(AtsBand::for_score(59), AtsBand::Low);
    }

    #[test]
    fn test_rows_flag_rates_above_filtered_average() {
        let source = SampleMetrics::new();
        let filter = SectorFilter::Sector("Technology & IT".to_string());
        let rows = metric_table(source.metrics(), &filter);
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].rate_above_average); // 0.30 vs 0.35
        assert!(rows[1].rate_above_average); // 0.40 vs 0.35
    }

    #[test]
    fn test_dashboard_includes_skill_ranking() {
        let source = SampleMetrics::new();
        let view = build_dashboard(&source, &SectorFilter::All, "JavaScript, React, SQL");
        assert_eq!(view.skill_relevance.len(), 3);
        assert!(view.simulated);
        assert!(view.sector.is_none());
    }
}
