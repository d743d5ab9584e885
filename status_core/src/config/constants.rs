//! Tunable status constants

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;

/// Tunable status constants
///
/// The rating curve is handed to each `Statable` when it is created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusConstants {
    #[serde(default)]
    pub rating: RatingCurve,
}

impl StatusConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: StatusConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: StatusConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn rating_curve(&self) -> RatingCurve {
        self.rating
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.rating.validate()
    }
}

/// Level-scaled conversion from rating points to a fixed stat amount
///
/// `fixed = rating / (per_point_base + per_point_per_level * max(level, min_level))`
///
/// Higher levels need more rating for the same fixed bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingCurve {
    /// Rating per fixed point independent of level
    #[serde(default = "default_per_point_base")]
    pub per_point_base: f64,
    /// Additional rating per fixed point for each level
    #[serde(default = "default_per_point_per_level")]
    pub per_point_per_level: f64,
    /// Levels below this convert as if they were this level
    #[serde(default = "default_min_level")]
    pub min_level: u32,
}

impl Default for RatingCurve {
    fn default() -> Self {
        RatingCurve {
            per_point_base: default_per_point_base(),
            per_point_per_level: default_per_point_per_level(),
            min_level: default_min_level(),
        }
    }
}

fn default_per_point_base() -> f64 {
    0.0
}
fn default_per_point_per_level() -> f64 {
    0.5
}
fn default_min_level() -> u32 {
    1
}

impl RatingCurve {
    /// Rating points needed for one fixed point at `level`
    pub fn rating_per_point(&self, level: u32) -> f64 {
        let level = level.max(self.min_level) as f64;
        self.per_point_base + self.per_point_per_level * level
    }

    /// Convert a summed rating into its fixed-value equivalent at `level`
    pub fn rating_to_fixed(&self, level: u32, rating: f64) -> f64 {
        let per_point = self.rating_per_point(level);
        if per_point <= 0.0 {
            return 0.0;
        }
        rating / per_point
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.per_point_per_level < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "rating.per_point_per_level must not be negative (got {})",
                self.per_point_per_level
            )));
        }
        if self.rating_per_point(self.min_level) <= 0.0 {
            return Err(ConfigError::ValidationError(
                "rating curve divides by zero at min_level".to_string(),
            ));
        }
        Ok(())
    }
}
