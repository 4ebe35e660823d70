use std::time::Duration;

use jiff::{SignedDuration, Span, SpanRelativeTo};
use vanlog_route::waypoint::LatLng;

/// Request timeout given as a friendly or ISO 8601 duration ("10s", "PT1M")
/// or a bare number of seconds.
pub fn parse_timeout(input: &str) -> Result<Duration, String> {
    let duration = input
        .parse::<SignedDuration>()
        .ok()
        .or_else(|| {
            input
                .parse::<Span>()
                .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
                .ok()
        })
        .or_else(|| {
            input
                .parse::<u64>()
                .ok()
                .map(|secs| SignedDuration::from_secs(secs as i64))
        })
        .ok_or_else(|| format!("Invalid timeout {input:?}"))?;

    Duration::try_from(duration).map_err(|_| format!("Timeout {input:?} must be positive"))
}

pub fn parse_lat_lng(input: &str) -> Result<LatLng, String> {
    input.parse::<LatLng>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("10s"), Ok(Duration::from_secs(10)));
        assert_eq!(parse_timeout("PT1M30S"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_timeout("5"), Ok(Duration::from_secs(5)));
        assert!(parse_timeout("-5s").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_parse_lat_lng() {
        let point = parse_lat_lng("44.8378,-0.5792").unwrap();

        assert_eq!(point.lat, 44.8378);
        assert_eq!(point.lng, -0.5792);
        assert!(parse_lat_lng("44.8378").is_err());
    }
}
