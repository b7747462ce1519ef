//! Distance-based danger classification

use serde::{Deserialize, Serialize};

/// At or below this distance an obstacle is an immediate danger (meters)
pub const DISTANCE_DANGER: f32 = 0.5;
/// At or below this distance the user should slow down (meters)
pub const DISTANCE_CAUTION: f32 = 0.6;
/// At or below this distance the user is warned (meters)
pub const DISTANCE_WARNING: f32 = 1.2;

/// Ordinal danger level, `Safe < Warning < Caution < Danger`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DangerLevel {
    #[default]
    Safe,
    Warning,
    Caution,
    Danger,
}

impl DangerLevel {
    /// Classify a distance; band edges belong to the more dangerous level
    pub fn from_distance(distance: f32) -> Self {
        if distance <= DISTANCE_DANGER {
            DangerLevel::Danger
        } else if distance <= DISTANCE_CAUTION {
            DangerLevel::Caution
        } else if distance <= DISTANCE_WARNING {
            DangerLevel::Warning
        } else {
            DangerLevel::Safe
        }
    }

    /// Short word for status displays
    pub fn label(self) -> &'static str {
        match self {
            DangerLevel::Safe => "Safe",
            DangerLevel::Warning => "Warning",
            DangerLevel::Caution => "Caution",
            DangerLevel::Danger => "DANGER",
        }
    }
}
