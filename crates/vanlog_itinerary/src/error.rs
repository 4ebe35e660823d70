use jiff::civil::Date;
use thiserror::Error;

/// Why an edit was not applied. The itinerary it was applied to is left as
/// it was, so callers keep their previous snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRejected {
    #[error("Unknown stop {0}")]
    StopNotFound(String),

    #[error("{date} is already the arrival date of {stop_id}")]
    DateTaken { date: Date, stop_id: String },

    #[error("{date} is before {previous}, the date of the previous stop")]
    BeforePreviousStop { date: Date, previous: Date },

    #[error("Departure {departure} is before arrival {arrival}")]
    DepartureBeforeArrival { arrival: Date, departure: Date },

    #[error("{0} is a drive-through, its date follows the previous stop")]
    DriveThroughDate(String),
}
