//! Distance units for the known-distance input.

use serde::{Deserialize, Serialize};

/// Linear distance unit for the user-entered reference distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Meters,
    Centimeters,
    Inches,
    Feet,
}

impl Default for DistanceUnit {
    fn default() -> Self {
        DistanceUnit::Meters
    }
}

impl DistanceUnit {
    /// All units, in picker display order.
    pub const ALL: [DistanceUnit; 4] = [
        DistanceUnit::Meters,
        DistanceUnit::Centimeters,
        DistanceUnit::Inches,
        DistanceUnit::Feet,
    ];

    /// Multiplicative factor converting one of this unit to meters.
    pub fn factor(&self) -> f32 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Centimeters => 0.01,
            DistanceUnit::Inches => 0.0254,
            DistanceUnit::Feet => 0.3048,
        }
    }

    /// Convert a value in this unit to meters.
    ///
    /// Pure conversion; negative and zero values pass through unchanged.
    pub fn to_meters(&self, value: f32) -> f32 {
        value * self.factor()
    }

    /// Convert a value in meters to this unit.
    pub fn from_meters(&self, meters: f32) -> f32 {
        meters / self.factor()
    }

    /// Short label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Inches => "in",
            DistanceUnit::Feet => "ft",
        }
    }

    /// Default unit for a device region code.
    ///
    /// The three countries still on imperial units get feet, everyone else
    /// gets meters. Unknown or empty codes fall back to meters.
    pub fn default_for_region(region: &str) -> Self {
        match region.to_ascii_uppercase().as_str() {
            "US" | "LR" | "MM" => DistanceUnit::Feet,
            _ => DistanceUnit::Meters,
        }
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceUnit::Meters => write!(f, "Meters"),
            DistanceUnit::Centimeters => write!(f, "Centimeters"),
            DistanceUnit::Inches => write!(f, "Inches"),
            DistanceUnit::Feet => write!(f, "Feet"),
        }
    }
}
