//! Slider definitions for the three process parameters.

use crate::types::record::{
    Bounds, InputRecord, AIR_FLOW_BOUNDS, AMINA_FLOW_BOUNDS, FEATURE_COUNT,
    IRON_CONCENTRATE_BOUNDS,
};

/// Increment used with Shift held
pub const FINE_STEP: f64 = 0.01;

/// Static description of one slider
#[derive(Debug, Clone, Copy)]
pub struct SliderSpec {
    pub label: &'static str,
    pub unit: &'static str,
    pub caption: &'static str,
    pub bounds: Bounds,
    pub default: f64,
    pub step: f64,
}

impl SliderSpec {
    /// Move `value` by `delta`, keeping two decimals and staying in range
    pub fn nudge(&self, value: f64, delta: f64) -> f64 {
        let moved = ((value + delta) * 100.0).round() / 100.0;
        self.bounds.clamp(moved)
    }

    /// Position of `value` inside the range, 0.0 to 1.0
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.bounds.max - self.bounds.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.bounds.min) / span).clamp(0.0, 1.0)
    }
}

/// Sliders in feature order
pub const SLIDERS: [SliderSpec; FEATURE_COUNT] = [
    SliderSpec {
        label: "Amina flow",
        unit: "m³/s",
        caption: "Amine flow is directly proportional to silica flotation: a higher dosage \
                  collects and floats more silica particles, raising its recovery in the concentrate.",
        bounds: AMINA_FLOW_BOUNDS,
        default: 488.43,
        step: 1.0,
    },
    SliderSpec {
        label: "Air flow, flotation column 01",
        unit: "m³/s",
        caption: "Air flow and final silica concentration are inversely related: more air \
                  favours flotation and therefore lowers the silica left in the concentrate.",
        bounds: AIR_FLOW_BOUNDS,
        default: 200.13,
        step: 1.0,
    },
    SliderSpec {
        label: "Iron concentrate",
        unit: "%",
        caption: "Iron percentage is inversely proportional to silica percentage; when the \
                  iron concentration rises, silica drops.",
        bounds: IRON_CONCENTRATE_BOUNDS,
        default: 65.04,
        step: 1.0,
    },
];

/// Record built from the slider defaults
pub fn default_record() -> InputRecord {
    InputRecord::new(SLIDERS[0].default, SLIDERS[1].default, SLIDERS[2].default)
}
