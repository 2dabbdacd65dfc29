//! Process parameters entered on the form

use serde::{Deserialize, Serialize};

/// Number of features the model consumes
pub const FEATURE_COUNT: usize = 3;

/// Column names the regressor was trained on, in training order
pub const TRAINED_FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Amina Flow",
    "Flotation Column 01 Air Flow",
    "% Iron Concentrate",
];

/// Inclusive range a process parameter is allowed to take
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const AMINA_FLOW_BOUNDS: Bounds = Bounds::new(241.7, 739.3);
pub const AIR_FLOW_BOUNDS: Bounds = Bounds::new(175.85, 372.44);
pub const IRON_CONCENTRATE_BOUNDS: Bounds = Bounds::new(62.51, 68.01);

/// One set of flotation process parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Amine flow (m³/s)
    #[serde(alias = "AminaFlow", alias = "Amina Flow")]
    pub amina_flow: f64,

    /// Air flow in flotation column 01 (m³/s)
    #[serde(alias = "AirFlow", alias = "Flotation Column 01 Air Flow")]
    pub air_flow: f64,

    /// Iron concentrate (%)
    #[serde(alias = "IronConcentrate", alias = "% Iron Concentrate")]
    pub iron_concentrate: f64,
}

impl InputRecord {
    pub fn new(amina_flow: f64, air_flow: f64, iron_concentrate: f64) -> Self {
        Self {
            amina_flow,
            air_flow,
            iron_concentrate,
        }
    }

    /// Values in training order
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [self.amina_flow, self.air_flow, self.iron_concentrate]
    }

    /// Bounds in training order
    pub fn bounds() -> [Bounds; FEATURE_COUNT] {
        [AMINA_FLOW_BOUNDS, AIR_FLOW_BOUNDS, IRON_CONCENTRATE_BOUNDS]
    }

    /// Copy of the record with every field clamped into its range.
    ///
    /// NaN passes through unchanged so the handler can reject it.
    pub fn clamped(&self) -> Self {
        Self {
            amina_flow: AMINA_FLOW_BOUNDS.clamp(self.amina_flow),
            air_flow: AIR_FLOW_BOUNDS.clamp(self.air_flow),
            iron_concentrate: IRON_CONCENTRATE_BOUNDS.clamp(self.iron_concentrate),
        }
    }

    pub fn is_within_bounds(&self) -> bool {
        Self::bounds()
            .iter()
            .zip(self.values())
            .all(|(bounds, value)| bounds.contains(value))
    }
}

impl Default for InputRecord {
    /// Operating point the form starts from
    fn default() -> Self {
        Self::new(488.43, 200.13, 65.04)
    }
}
