use serde::{Deserialize, Serialize};

/// One row of application-tracking metrics for a résumé version.
/// Read-only reference data; never derived from the live document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetric {
    pub id: String,
    pub version_name: String,
    pub date_created: String,
    pub sector: String,
    pub applied_count: u32,
    pub email_response_count: u32,
    pub interview_count: u32,
    /// 0 – 100
    pub ats_score: u8,
}

impl DashboardMetric {
    /// Interviews per application. Zero when nothing was applied to.
    pub fn interview_rate(&self) -> f64 {
        if self.applied_count == 0 {
            return 0.0;
        }
        self.interview_count as f64 / self.applied_count as f64
    }
}
