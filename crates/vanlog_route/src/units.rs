use std::{
    iter::Sum,
    ops::{Add, AddAssign, Div},
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Kilometers(f64);

impl Kilometers {
    pub const ZERO: Kilometers = Kilometers(0.0);

    pub fn new(value: f64) -> Self {
        Kilometers(value)
    }

    pub fn from_meters(meters: f64) -> Self {
        Kilometers(meters / 1000.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Rounded to one decimal, the precision shown to travellers.
    pub fn rounded(&self) -> f64 {
        round_to_tenth(self.0)
    }
}

impl From<f64> for Kilometers {
    fn from(value: f64) -> Self {
        Kilometers::new(value)
    }
}

impl Add for Kilometers {
    type Output = Kilometers;

    fn add(self, other: Kilometers) -> Kilometers {
        Kilometers(self.0 + other.0)
    }
}

impl AddAssign for Kilometers {
    fn add_assign(&mut self, other: Kilometers) {
        self.0 += other.0;
    }
}

impl Sum for Kilometers {
    fn sum<I: Iterator<Item = Kilometers>>(iter: I) -> Kilometers {
        iter.fold(Kilometers::ZERO, |acc, x| acc + x)
    }
}

/// Travel time in minutes, not rounded.
impl Div<Kmh> for Kilometers {
    type Output = f64;

    fn div(self, speed: Kmh) -> f64 {
        self.0 / speed.value() * 60.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Kmh(f64);

impl Kmh {
    pub fn new(value: f64) -> Self {
        Kmh(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn travel_minutes(&self, distance: Kilometers) -> i64 {
        (distance / *self).round() as i64
    }
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
