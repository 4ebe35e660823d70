use std::collections::BTreeSet;

use jiff::civil::Date;
use tracing::debug;

use crate::{calendar, stop::Stop};

/// Departure kept when still on or after `arrival`, otherwise the next day.
pub fn valid_departure(arrival: Date, departure: Option<Date>) -> Date {
    match departure {
        Some(departure) if departure >= arrival => departure,
        _ => calendar::add_days(arrival, 1),
    }
}

/// Reassigns dates after the stops were reordered.
///
/// The arrival dates already held by overnight stops form a sorted pool that
/// is handed out again in the new order, so the set of dates in use never
/// changes, only which stop sleeps on which date. A drive-through takes the
/// departure of the stop before it and does not move the calendar forward.
///
/// When the pool runs out (stops added without a date, duplicated dates), the
/// remaining overnight stops are left without dates rather than given
/// invented ones. This includes stops that had a date of their own before the
/// move: once earlier stops have taken every pooled date, they lose it.
pub fn reconcile(stops: &[Stop]) -> Vec<Stop> {
    let pool = stops
        .iter()
        .filter(|stop| stop.is_overnight())
        .filter_map(|stop| stop.arrival_date)
        .collect::<BTreeSet<_>>();

    let first_overnight_date = pool.first().copied();
    let mut pool = pool.into_iter();
    let mut last_departure: Option<Date> = None;

    stops
        .iter()
        .map(|stop| {
            let mut stop = stop.clone();

            if stop.is_overnight() {
                match pool.next() {
                    Some(arrival) => {
                        let departure = valid_departure(arrival, stop.departure_date);
                        stop.arrival_date = Some(arrival);
                        stop.departure_date = Some(departure);
                        last_departure = Some(departure);
                    }
                    None => {
                        debug!("No date left for overnight stop {}", stop.id);
                        stop.arrival_date = None;
                        stop.departure_date = None;
                    }
                }
            } else {
                let inherited = last_departure
                    .or(first_overnight_date)
                    .or(stop.arrival_date);
                stop.arrival_date = inherited;
                last_departure = inherited;
            }

            stop
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::night_type::NightType;

    fn overnight(id: &str, arrival: Option<Date>, departure: Option<Date>) -> Stop {
        Stop::new(id, id, 0.0, 0.0).with_dates(arrival, departure)
    }

    fn passage(id: &str, arrival: Option<Date>) -> Stop {
        Stop::new(id, id, 0.0, 0.0)
            .with_night_type(NightType::DriveThrough)
            .with_dates(arrival, None)
    }

    #[test]
    fn test_valid_departure() {
        let arrival = date(2026, 6, 15);

        assert_eq!(valid_departure(arrival, None), date(2026, 6, 16));
        assert_eq!(valid_departure(arrival, Some(date(2026, 6, 14))), date(2026, 6, 16));
        assert_eq!(valid_departure(arrival, Some(arrival)), arrival);
        assert_eq!(valid_departure(arrival, Some(date(2026, 6, 20))), date(2026, 6, 20));
    }

    #[test]
    fn test_empty() {
        assert!(reconcile(&[]).is_empty());
    }

    #[test]
    fn test_swap_two_overnight_stops() {
        let paris = overnight("paris", Some(date(2026, 6, 15)), Some(date(2026, 6, 17)))
            .with_night_type(NightType::PaidLodging);
        let bordeaux = overnight("bordeaux", Some(date(2026, 6, 18)), Some(date(2026, 6, 20)));

        let result = reconcile(&[bordeaux, paris]);

        assert_eq!(result[0].id, "bordeaux");
        assert_eq!(result[0].arrival_date, Some(date(2026, 6, 15)));
        assert_eq!(result[0].departure_date, Some(date(2026, 6, 20)));
        assert_eq!(result[1].id, "paris");
        assert_eq!(result[1].arrival_date, Some(date(2026, 6, 18)));
        assert_eq!(result[1].departure_date, Some(date(2026, 6, 19)));
    }

    #[test]
    fn test_passage_run_inherits_previous_departure() {
        let stops = [
            overnight("a", Some(date(2026, 6, 15)), Some(date(2026, 6, 17))),
            passage("b", Some(date(2026, 6, 1))),
            passage("c", None),
            overnight("d", Some(date(2026, 6, 18)), Some(date(2026, 6, 19))),
        ];

        let result = reconcile(&stops);

        assert_eq!(result[1].arrival_date, Some(date(2026, 6, 17)));
        assert_eq!(result[2].arrival_date, Some(date(2026, 6, 17)));
        assert_eq!(result[3].arrival_date, Some(date(2026, 6, 18)));
    }

    #[test]
    fn test_leading_passage_takes_first_overnight_date() {
        let stops = [
            passage("a", Some(date(2026, 5, 1))),
            overnight("b", Some(date(2026, 6, 20)), None),
            overnight("c", Some(date(2026, 6, 15)), None),
        ];

        let result = reconcile(&stops);

        assert_eq!(result[0].arrival_date, Some(date(2026, 6, 15)));
        assert_eq!(result[1].arrival_date, Some(date(2026, 6, 15)));
        assert_eq!(result[1].departure_date, Some(date(2026, 6, 16)));
        assert_eq!(result[2].arrival_date, Some(date(2026, 6, 20)));
    }

    #[test]
    fn test_passages_only_keep_their_dates() {
        let stops = [passage("a", Some(date(2026, 5, 1))), passage("b", None)];

        let result = reconcile(&stops);

        assert_eq!(result[0].arrival_date, Some(date(2026, 5, 1)));
        assert_eq!(result[1].arrival_date, Some(date(2026, 5, 1)));
    }

    #[test]
    fn test_exhausted_pool_leaves_dates_empty() {
        let stops = [
            overnight("a", Some(date(2026, 6, 15)), Some(date(2026, 6, 16))),
            overnight("b", None, None),
            overnight("c", Some(date(2026, 6, 15)), Some(date(2026, 6, 18))),
        ];

        let result = reconcile(&stops);

        assert_eq!(result[0].arrival_date, Some(date(2026, 6, 15)));
        assert_eq!(result[1].arrival_date, None);
        assert_eq!(result[1].departure_date, None);
        assert_eq!(result[2].arrival_date, None);
        assert_eq!(result[2].departure_date, None);
    }

    #[test]
    fn test_is_idempotent() {
        let stops = [
            overnight("a", Some(date(2026, 6, 20)), None),
            passage("b", None),
            overnight("c", Some(date(2026, 6, 15)), Some(date(2026, 6, 25))),
        ];

        let once = reconcile(&stops);
        assert_eq!(reconcile(&once), once);
    }
}
