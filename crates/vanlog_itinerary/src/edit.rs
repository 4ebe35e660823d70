//! Single-field edits made from the planning table.
//!
//! Unlike a reorder these never touch other stops. An edit that would break
//! the calendar is rejected and the itinerary it was applied to stays valid.

use jiff::civil::Date;
use tracing::debug;

use crate::{
    calendar, error::EditRejected, itinerary::Itinerary, night_type::NightType,
    reconcile::valid_departure,
};

impl Itinerary {
    /// Switching to a drive-through drops the departure and takes the date
    /// handed over by the previous stop. Switching to an overnight type keeps
    /// a valid departure, otherwise sleeps one night.
    pub fn set_night_type(
        &self,
        stop_id: &str,
        night_type: NightType,
    ) -> Result<Itinerary, EditRejected> {
        let index = self.require(stop_id)?;
        let inherited = self.previous_effective_date(index);

        Ok(self.with_stop(index, |mut stop| {
            if night_type.is_overnight() {
                stop.departure_date = stop
                    .arrival_date
                    .map(|arrival| valid_departure(arrival, stop.departure_date));
            } else {
                stop.arrival_date = inherited.or(stop.arrival_date);
                stop.departure_date = None;
            }

            debug!("{} is now {}", stop.id, night_type);
            stop.night_type = night_type;
            stop
        }))
    }

    /// Moves an overnight stop to another arrival date. A departure falling
    /// before the new date is pulled up to it.
    pub fn set_arrival_date(
        &self,
        stop_id: &str,
        date: Option<Date>,
    ) -> Result<Itinerary, EditRejected> {
        let index = self.require(stop_id)?;
        let stop = &self.stops()[index];

        if !stop.is_overnight() {
            return Err(EditRejected::DriveThroughDate(stop.id.clone()));
        }

        if let Some(date) = date {
            if let Some(other) = self.stops().iter().find(|other| {
                other.id != stop.id && other.is_overnight() && other.arrival_date == Some(date)
            }) {
                return Err(EditRejected::DateTaken {
                    date,
                    stop_id: other.id.clone(),
                });
            }

            match self.previous_effective_date(index) {
                Some(previous) if date < previous => {
                    return Err(EditRejected::BeforePreviousStop { date, previous });
                }
                _ => {}
            }
        }

        Ok(self.with_stop(index, |mut stop| {
            if let (Some(date), Some(departure)) = (date, stop.departure_date) {
                stop.departure_date = Some(departure.max(date));
            }
            stop.arrival_date = date;
            stop
        }))
    }

    pub fn set_departure_date(
        &self,
        stop_id: &str,
        date: Option<Date>,
    ) -> Result<Itinerary, EditRejected> {
        let index = self.require(stop_id)?;
        let stop = &self.stops()[index];

        if !stop.is_overnight() {
            return Err(EditRejected::DriveThroughDate(stop.id.clone()));
        }

        match (stop.arrival_date, date) {
            (Some(arrival), Some(departure)) if departure < arrival => {
                return Err(EditRejected::DepartureBeforeArrival { arrival, departure });
            }
            _ => {}
        }

        Ok(self.with_stop(index, |mut stop| {
            stop.departure_date = date;
            stop
        }))
    }

    /// Stay length in nights, `nights` days after arrival.
    pub fn set_nights(&self, stop_id: &str, nights: u16) -> Result<Itinerary, EditRejected> {
        let index = self.require(stop_id)?;
        let stop = &self.stops()[index];

        match stop.arrival_date {
            Some(arrival) => {
                self.set_departure_date(stop_id, Some(calendar::add_days(arrival, nights as i64)))
            }
            None if !stop.is_overnight() => Err(EditRejected::DriveThroughDate(stop.id.clone())),
            None => Ok(self.clone()),
        }
    }
}
