use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{calendar, itinerary::Itinerary};

/// Totals shown above the planning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySummary {
    pub stop_count: usize,
    pub overnight_count: usize,
    pub total_nights: i64,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
    /// Calendar days covered, both ends included.
    pub trip_days: i64,
    pub lodging_budget: u32,
    pub culture_budget: u32,
    pub food_budget: u32,
    pub total_budget: u32,
}

impl Itinerary {
    pub fn summary(&self) -> ItinerarySummary {
        let mut summary = ItinerarySummary {
            stop_count: self.len(),
            first_date: self.first_date(),
            last_date: self.last_date(),
            ..Default::default()
        };

        for stop in self.stops() {
            if stop.is_overnight() {
                summary.overnight_count += 1;
            }
            summary.total_nights += stop.nights();
            summary.lodging_budget += stop.budget.lodging_for(stop.night_type) as u32;
            summary.culture_budget += stop.budget.culture as u32;
            summary.food_budget += stop.budget.food as u32;
        }

        summary.total_budget =
            summary.lodging_budget + summary.culture_budget + summary.food_budget;

        if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
            summary.trip_days = calendar::days_between(first, last) + 1;
        }

        summary
    }
}
