use geo::Point;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use vanlog_route::{geo_utils, waypoint::Waypoint};

use crate::{budget::Budget, calendar, night_type::NightType};

/// One city of the trip.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    #[serde(alias = "nom")]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, alias = "ordre")]
    pub order: usize,
    #[serde(default, alias = "date_prevue")]
    pub arrival_date: Option<Date>,
    /// Only meaningful for overnight stops.
    #[serde(default, alias = "date_depart")]
    pub departure_date: Option<Date>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "nuitee_type")]
    pub night_type: NightType,
    #[serde(flatten)]
    pub budget: Budget,
}

impl Stop {
    pub fn new(id: &str, name: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            lat,
            lng,
            order: 0,
            arrival_date: None,
            departure_date: None,
            night_type: NightType::default(),
            budget: Budget::default(),
        }
    }

    pub fn with_night_type(mut self, night_type: NightType) -> Self {
        self.night_type = night_type;
        self
    }

    pub fn with_dates(mut self, arrival: Option<Date>, departure: Option<Date>) -> Self {
        self.arrival_date = arrival;
        self.departure_date = departure;
        self
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn is_overnight(&self) -> bool {
        self.night_type.is_overnight()
    }

    /// Date a following stop leaves from: the departure of an overnight stop
    /// (its arrival if no departure was planned), the arrival of a drive-through.
    pub fn effective_departure(&self) -> Option<Date> {
        if self.is_overnight() {
            self.departure_date.or(self.arrival_date)
        } else {
            self.arrival_date
        }
    }

    pub fn nights(&self) -> i64 {
        if !self.is_overnight() {
            return 0;
        }

        match self.arrival_date {
            Some(arrival) => {
                let departure = self.departure_date.unwrap_or(arrival);
                calendar::days_between(arrival, departure).max(0)
            }
            None => 0,
        }
    }

    pub fn planned_budget(&self) -> u32 {
        self.budget.total_for(self.night_type)
    }
}

impl Waypoint for Stop {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn point(&self) -> Point {
        geo_utils::point(self.lat, self.lng)
    }
}
