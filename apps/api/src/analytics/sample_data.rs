//! Simulated application-tracking data standing in for a spreadsheet-backed reporting source.

use crate::analytics::MetricsSource;
use crate::models::metrics::DashboardMetric;

/// (id, version, created, sector, applied, email responses, interviews, ATS score)
type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    u32,
    u32,
    u8,
);

const SAMPLE_ROWS: &[Row] = &[
    ("1", "Tech Lead Version", "2023-10-01", "Technology & IT", 10, 5, 3, 75),
    ("2", "Frontend Developer Version", "2023-10-05", "Technology & IT", 15, 8, 6, 82),
    ("3", "Project Manager Version", "2023-10-10", "Management & Projects", 8, 2, 1, 65),
    ("4", "Store Sales Associate", "2023-10-12", "Sales & Retail", 25, 10, 8, 88),
    ("5", "Senior Account Executive", "2023-10-14", "Sales & Retail", 12, 4, 3, 78),
    ("6", "Sales Representative", "2023-10-18", "Sales & Retail", 30, 15, 5, 91),
    ("7", "Responsible Pharmacist", "2023-10-20", "Health & Pharmacy", 8, 6, 5, 94),
    ("8", "ICU Nursing Technician", "2023-10-22", "Health & Pharmacy", 18, 12, 9, 89),
    ("9", "Pharmacy Attendant", "2023-10-23", "Health & Pharmacy", 40, 10, 4, 72),
    ("10", "Administrative Assistant", "2023-10-25", "Administration", 50, 5, 2, 60),
    ("11", "Junior Financial Analyst", "2023-10-26", "Administration", 20, 8, 4, 85),
    ("12", "Refrigeration Technician", "2023-10-28", "Technical & Maintenance", 5, 4, 4, 70),
    ("13", "Building Electrician", "2023-10-29", "Technical & Maintenance", 10, 7, 5, 75),
    ("14", "Logistics Analyst", "2023-11-01", "Logistics & Supply", 15, 5, 3, 81),
    ("15", "Warehouse Assistant", "2023-11-02", "Logistics & Supply", 22, 6, 2, 68),
    ("16", "English Teacher", "2023-11-05", "Education", 12, 8, 6, 92),
];

/// The built-in simulated metrics set.
pub struct SampleMetrics {
    rows: Vec<DashboardMetric>,
}

impl SampleMetrics {
    pub fn new() -> Self {
        let rows = SAMPLE_ROWS
            .iter()
            .map(
                |&(id, version, created, sector, applied, emails, interviews, ats)| {
                    DashboardMetric {
                        id: id.to_string(),
                        version_name: version.to_string(),
                        date_created: created.to_string(),
                        sector: sector.to_string(),
                        applied_count: applied,
                        email_response_count: emails,
                        interview_count: interviews,
                        ats_score: ats,
                    }
                },
            )
            .collect();
        Self { rows }
    }
}

impl Default for SampleMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SampleMetrics {
    fn metrics(&self) -> &[DashboardMetric] {
        &self.rows
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_set_is_complete_and_in_range() {
        let source = SampleMetrics::new();
        assert_eq!(source.metrics().len(), 16);
        assert!(source.metrics().iter().all(|m| m.ats_score <= 100));
        assert!(source.is_simulated());
    }
}
