use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How the traveller spends the night at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NightType {
    /// Sleeping in the van. The default when nothing was chosen.
    #[default]
    #[serde(rename = "van", alias = "none")]
    Van,
    /// Passing through without staying.
    #[serde(rename = "passage", alias = "drive-through")]
    DriveThrough,
    #[serde(rename = "airbnb", alias = "paid-lodging")]
    PaidLodging,
}

impl NightType {
    /// Overnight stops consume a calendar date of their own.
    pub fn is_overnight(&self) -> bool {
        !matches!(self, NightType::DriveThrough)
    }
}

impl Display for NightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NightType::Van => "van",
                NightType::DriveThrough => "passage",
                NightType::PaidLodging => "airbnb",
            }
        )
    }
}
