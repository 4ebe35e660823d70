use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    budget::BudgetCategory,
    calendar,
    error::EditRejected,
    night_type::NightType,
    reconcile::reconcile,
    slug::unique_slug,
    stop::Stop,
};

/// Stop added through the geocode-and-add flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStop {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub arrival_date: Option<Date>,
}

/// Ordered list of stops. Every mutation returns a new itinerary with
/// positions renumbered `0..n`, so readers never observe a partial update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Stop>", into = "Vec<Stop>")]
pub struct Itinerary {
    stops: Vec<Stop>,
}

impl From<Vec<Stop>> for Itinerary {
    fn from(stops: Vec<Stop>) -> Self {
        Itinerary::new(stops)
    }
}

impl From<Itinerary> for Vec<Stop> {
    fn from(itinerary: Itinerary) -> Self {
        itinerary.stops
    }
}

impl Itinerary {
    /// Keeps the given order, renumbers positions and clamps budgets. When
    /// two stops share an id only the first one is kept.
    pub fn new(stops: Vec<Stop>) -> Self {
        let mut unique: Vec<Stop> = Vec::with_capacity(stops.len());
        for mut stop in stops {
            if unique.iter().any(|existing| existing.id == stop.id) {
                debug!("Dropping duplicated stop {}", stop.id);
                continue;
            }
            stop.budget = stop.budget.clamped();
            unique.push(stop);
        }

        Self::renumbered(unique)
    }

    fn renumbered(mut stops: Vec<Stop>) -> Self {
        for (order, stop) in stops.iter_mut().enumerate() {
            stop.order = order;
        }
        Self { stops }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn position(&self, stop_id: &str) -> Option<usize> {
        self.stops.iter().position(|stop| stop.id == stop_id)
    }

    pub fn get(&self, stop_id: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == stop_id)
    }

    pub(crate) fn require(&self, stop_id: &str) -> Result<usize, EditRejected> {
        self.position(stop_id)
            .ok_or_else(|| EditRejected::StopNotFound(stop_id.to_owned()))
    }

    /// Copy with the stop at `index` replaced by `f(stop)`.
    pub(crate) fn with_stop<F>(&self, index: usize, f: F) -> Self
    where
        F: FnOnce(Stop) -> Stop,
    {
        let mut stops = self.stops.clone();
        let stop = stops.remove(index);
        stops.insert(index, f(stop));
        Self::renumbered(stops)
    }

    /// Date the stop at `index` is reached from: what the previous stop
    /// hands over, `None` for the first stop.
    pub fn previous_effective_date(&self, index: usize) -> Option<Date> {
        index
            .checked_sub(1)
            .and_then(|previous| self.stops.get(previous))
            .and_then(|stop| stop.effective_departure())
    }

    /// Earliest known arrival, the day the trip starts.
    pub fn first_date(&self) -> Option<Date> {
        self.stops.iter().filter_map(|stop| stop.arrival_date).min()
    }

    /// Latest known departure or arrival, the day the trip ends.
    pub fn last_date(&self) -> Option<Date> {
        self.stops
            .iter()
            .filter_map(|stop| {
                if stop.is_overnight() {
                    stop.departure_date.or(stop.arrival_date)
                } else {
                    stop.arrival_date
                }
            })
            .max()
    }

    pub fn day_label(&self, stop_id: &str) -> String {
        let arrival = self.get(stop_id).and_then(|stop| stop.arrival_date);
        calendar::day_label(arrival, self.first_date())
    }

    /// Dates reassigned in the current order, see [`reconcile`].
    pub fn reconciled(&self) -> Self {
        Self::renumbered(reconcile(&self.stops))
    }

    /// Drag-and-drop move: the stop leaves its slot and is inserted at
    /// `target` (clamped to the last position), then dates are reconciled.
    pub fn move_stop(&self, stop_id: &str, target: usize) -> Result<Self, EditRejected> {
        let index = self.require(stop_id)?;
        let target = target.min(self.stops.len() - 1);

        if index == target {
            return Ok(self.clone());
        }

        let mut stops = self.stops.clone();
        let stop = stops.remove(index);
        stops.insert(target, stop);

        debug!("Moved {} from {} to {}", stop_id, index, target);

        Ok(Self::renumbered(reconcile(&stops)))
    }

    /// Full reorder by id. Ids missing from `order` keep their relative order
    /// after the listed ones; unknown ids are rejected.
    pub fn reorder(&self, order: &[String]) -> Result<Self, EditRejected> {
        let mut stops = Vec::with_capacity(self.stops.len());
        for stop_id in order {
            let index = self.require(stop_id)?;
            if !stops.iter().any(|stop: &Stop| stop.id == *stop_id) {
                stops.push(self.stops[index].clone());
            }
        }
        for stop in &self.stops {
            if !order.contains(&stop.id) {
                stops.push(stop.clone());
            }
        }

        Ok(Self::renumbered(reconcile(&stops)))
    }

    pub fn remove_stop(&self, stop_id: &str) -> Result<Self, EditRejected> {
        let index = self.require(stop_id)?;
        let mut stops = self.stops.clone();
        stops.remove(index);
        Ok(Self::renumbered(stops))
    }

    /// Appends a van stop whose id is derived from its name. A given arrival
    /// date gets a one-night stay by default.
    pub fn add_stop(&self, new_stop: NewStop) -> Self {
        let id = unique_slug(&new_stop.name, |candidate| self.position(candidate).is_some());

        let stop = Stop::new(&id, &new_stop.name, new_stop.lat, new_stop.lng)
            .with_night_type(NightType::Van)
            .with_dates(
                new_stop.arrival_date,
                new_stop.arrival_date.map(|date| calendar::add_days(date, 1)),
            );

        let mut stops = self.stops.clone();
        stops.push(stop);
        Self::renumbered(stops)
    }

    pub fn set_budget(
        &self,
        stop_id: &str,
        category: BudgetCategory,
        value: f64,
    ) -> Result<Self, EditRejected> {
        let index = self.require(stop_id)?;
        Ok(self.with_stop(index, |mut stop| {
            stop.budget = stop.budget.with(category, value);
            stop
        }))
    }
}
