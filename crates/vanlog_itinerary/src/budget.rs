use serde::{Deserialize, Serialize};

use crate::night_type::NightType;

pub const MAX_BUDGET: u16 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Lodging,
    Culture,
    Food,
}

/// Planned spend at a stop, in whole euros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default, alias = "budget_nuitee")]
    pub lodging: u16,
    #[serde(default, alias = "budget_culture")]
    pub culture: u16,
    #[serde(default, alias = "budget_nourriture")]
    pub food: u16,
}

impl Budget {
    /// Rounds then clamps a user-entered amount into `0..=MAX_BUDGET`.
    pub fn clamp(value: f64) -> u16 {
        if value.is_nan() {
            return 0;
        }

        value.round().clamp(0.0, MAX_BUDGET as f64) as u16
    }

    pub fn get(&self, category: BudgetCategory) -> u16 {
        match category {
            BudgetCategory::Lodging => self.lodging,
            BudgetCategory::Culture => self.culture,
            BudgetCategory::Food => self.food,
        }
    }

    pub fn with(mut self, category: BudgetCategory, value: f64) -> Self {
        let value = Self::clamp(value);
        match category {
            BudgetCategory::Lodging => self.lodging = value,
            BudgetCategory::Culture => self.culture = value,
            BudgetCategory::Food => self.food = value,
        }
        self
    }

    pub fn clamped(self) -> Self {
        Self {
            lodging: self.lodging.min(MAX_BUDGET),
            culture: self.culture.min(MAX_BUDGET),
            food: self.food.min(MAX_BUDGET),
        }
    }

    /// Lodging only costs money at paid lodgings.
    pub fn lodging_for(&self, night_type: NightType) -> u16 {
        match night_type {
            NightType::PaidLodging => self.lodging,
            _ => 0,
        }
    }

    pub fn total_for(&self, night_type: NightType) -> u32 {
        self.lodging_for(night_type) as u32 + self.culture as u32 + self.food as u32
    }
}
