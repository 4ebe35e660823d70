use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use serde::Serialize;
use vanlog_itinerary::itinerary::Itinerary;

pub fn read_itinerary(path: &Path) -> anyhow::Result<Itinerary> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let itinerary = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid itinerary in {}", path.display()))?;

    Ok(itinerary)
}

/// Pretty JSON to `out`, or stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
        }
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_itinerary_round_trip_through_file() {
        let path = env::temp_dir().join("vanlog_cli_round_trip.json");
        let itinerary: Itinerary = serde_json::from_str(
            r#"[{"id": "paris", "nom": "Paris", "lat": 48.8566, "lng": 2.3522, "date_prevue": "2026-06-15"}]"#,
        )
        .unwrap();

        write_json(&itinerary, Some(&path)).unwrap();
        let read = read_itinerary(&path).unwrap();

        assert_eq!(read.stops()[0].id, "paris");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        assert!(read_itinerary(Path::new("does/not/exist.json")).is_err());
    }
}
