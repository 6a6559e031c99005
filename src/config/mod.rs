//! Application settings and serialization.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calibration::DistanceUnit;

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Viewport width in pixels.
    pub screen_width: f32,
    /// Viewport height in pixels.
    pub screen_height: f32,
    /// Device region code (ISO 3166 alpha-2), drives the default unit.
    pub region: String,
    /// Unit the user picked, overriding the regional default.
    pub unit_override: Option<DistanceUnit>,
    /// Start with auto-level enabled.
    pub auto_level: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            screen_width: 1080.0,
            screen_height: 2340.0,
            region: String::new(),
            unit_override: None,
            auto_level: false,
        }
    }
}

impl AppConfig {
    /// Distance unit to start the session with: the user's saved choice, or
    /// the regional default.
    pub fn default_unit(&self) -> DistanceUnit {
        self.unit_override
            .unwrap_or_else(|| DistanceUnit::default_for_region(&self.region))
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Save settings to a JSON file.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let config = AppConfig {
            screen_width: 1440.0,
            screen_height: 3120.0,
            region: "US".to_string(),
            unit_override: Some(DistanceUnit::Centimeters),
            auto_level: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.screen_width, 1440.0);
        assert_eq!(back.screen_height, 3120.0);
        assert_eq!(back.region, "US");
        assert_eq!(back.unit_override, Some(DistanceUnit::Centimeters));
        assert!(back.auto_level);
    }

    #[test]
    fn test_default_unit_follows_region() {
        let mut config = AppConfig::default();
        assert_eq!(config.default_unit(), DistanceUnit::Meters);
        config.region = "US".to_string();
        assert_eq!(config.default_unit(), DistanceUnit::Feet);

        config.unit_override = Some(DistanceUnit::Meters);
        assert_eq!(config.default_unit(), DistanceUnit::Meters);
    }
}
