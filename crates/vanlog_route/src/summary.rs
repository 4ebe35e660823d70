use serde::{Deserialize, Serialize};

use crate::{segment::SegmentMetrics, units::round_to_tenth};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub segment_count: usize,
    pub total_distance_km: f64,
    pub total_duration_min: i64,
    pub total_toll_cost: f64,
}

impl RouteSummary {
    pub fn from_metrics<I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = SegmentMetrics>,
    {
        let mut summary = metrics
            .into_iter()
            .fold(RouteSummary::default(), |mut acc, metrics| {
                acc.segment_count += 1;
                acc.total_distance_km += metrics.distance_km;
                acc.total_duration_min += metrics.duration_min;
                acc.total_toll_cost += metrics.toll_cost;
                acc
            });

        summary.total_distance_km = round_to_tenth(summary.total_distance_km);
        summary.total_toll_cost = round_to_tenth(summary.total_toll_cost);
        summary
    }

    pub fn total_hours_and_minutes(&self) -> (i64, i64) {
        (self.total_duration_min / 60, self.total_duration_min % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_metrics() {
        let summary = RouteSummary::from_metrics([
            SegmentMetrics {
                distance_km: 520.4,
                duration_min: 367,
                toll_cost: 45.2,
            },
            SegmentMetrics {
                distance_km: 190.3,
                duration_min: 134,
                toll_cost: 18.9,
            },
        ]);

        assert_eq!(summary.segment_count, 2);
        assert_eq!(summary.total_distance_km, 710.7);
        assert_eq!(summary.total_duration_min, 501);
        assert_eq!(summary.total_toll_cost, 64.1);
        assert_eq!(summary.total_hours_and_minutes(), (8, 21));
    }

    #[test]
    fn test_empty() {
        assert_eq!(RouteSummary::from_metrics([]), RouteSummary::default());
    }
}
