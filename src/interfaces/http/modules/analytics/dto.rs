//! Analytics API data transfer objects

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RainfallSummary;

/// Aggregate rainfall statistics. All zero when nothing is recorded.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsResponse {
    /// Sum of all amounts.
    pub total: f64,
    /// Mean amount per recorded year.
    pub average: f64,
    /// Largest recorded amount.
    pub highest: f64,
    /// Smallest recorded amount.
    pub lowest: f64,
    /// Number of recorded years.
    pub count: usize,
}

impl From<RainfallSummary> for AnalyticsResponse {
    fn from(s: RainfallSummary) -> Self {
        Self {
            total: s.total,
            average: s.average,
            highest: s.highest,
            lowest: s.lowest,
            count: s.count,
        }
    }
}
