use std::{fs::File, io::BufReader, path::Path};

use fxhash::FxHashMap;
use thiserror::Error;
use tracing::debug;

pub const TOLLS_FILE_ENV_VAR: &str = "VANLOG_TOLLS_FILE";

/// Hand-maintained highway costs, keyed `"{fromId}-{toId}"`.
const BUILTIN_TOLLS: [(&str, f64); 2] = [("paris-bordeaux", 45.2), ("bordeaux-biarritz", 18.9)];

#[derive(Debug, Error)]
pub enum TollTableError {
    #[error("Failed to read toll table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid toll table: {0}")]
    Deserialize(#[from] serde_json::Error),
}

pub fn toll_key(from_id: &str, to_id: &str) -> String {
    format!("{from_id}-{to_id}")
}

/// Toll cost between two stops, looked up in the built-in table.
pub fn toll_cost(from_id: &str, to_id: &str) -> f64 {
    TollTable::builtin().get(from_id, to_id)
}

/// Directed toll lookup. `a -> b` and `b -> a` are different entries, and a
/// missing entry costs nothing.
#[derive(Debug, Clone, Default)]
pub struct TollTable {
    entries: FxHashMap<String, f64>,
}

impl TollTable {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_TOLLS
                .iter()
                .map(|(key, cost)| (key.to_string(), *cost))
                .collect(),
        }
    }

    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, TollTableError> {
        let entries: FxHashMap<String, f64> = serde_json::from_reader(reader)?;
        Ok(Self { entries })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, TollTableError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Built-in table, overridden by the file named in `VANLOG_TOLLS_FILE`
    /// when it is set.
    pub fn from_env() -> Result<Self, TollTableError> {
        let table = Self::builtin();

        match std::env::var(TOLLS_FILE_ENV_VAR) {
            Ok(path) => {
                debug!("Loading toll table from {}", path);
                Ok(table.merged_with(Self::from_json_file(Path::new(&path))?))
            }
            Err(_) => Ok(table),
        }
    }

    pub fn merged_with(mut self, other: TollTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn insert(&mut self, from_id: &str, to_id: &str, cost: f64) {
        self.entries.insert(toll_key(from_id, to_id), cost);
    }

    pub fn get(&self, from_id: &str, to_id: &str) -> f64 {
        self.entries
            .get(&toll_key(from_id, to_id))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(toll_cost("paris", "bordeaux"), 45.2);
        assert_eq!(toll_cost("bordeaux", "biarritz"), 18.9);
        assert_eq!(toll_cost("bordeaux", "unknown"), 0.0);
    }

    #[test]
    fn test_lookup_is_directed_and_exact() {
        let table = TollTable::builtin();

        assert_eq!(table.get("bordeaux", "paris"), 0.0);
        assert_eq!(table.get("Paris", "bordeaux"), 0.0);
    }

    #[test]
    fn test_merge_overrides_builtin() {
        let file = TollTable::from_json_reader(r#"{"paris-bordeaux": 50.0, "lyon-grenoble": 9.4}"#.as_bytes())
            .unwrap();
        let table = TollTable::builtin().merged_with(file);

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("paris", "bordeaux"), 50.0);
        assert_eq!(table.get("lyon", "grenoble"), 9.4);
        assert_eq!(table.get("bordeaux", "biarritz"), 18.9);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            TollTable::from_json_reader("[1, 2]".as_bytes()),
            Err(TollTableError::Deserialize(_))
        ));
    }

    #[test]
    fn test_insert() {
        let mut table = TollTable::default();
        assert!(table.is_empty());

        table.insert("a", "b", 3.5);
        assert_eq!(table.get("a", "b"), 3.5);
        assert_eq!(table.get("b", "a"), 0.0);
    }
}
