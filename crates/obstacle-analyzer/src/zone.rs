//! Directional zones of the camera field of view

use serde::{Deserialize, Serialize};

/// Stereo pan for obstacles on the left
pub const AUDIO_PAN_LEFT: f32 = -1.0;
/// Stereo pan for obstacles straight ahead
pub const AUDIO_PAN_CENTER: f32 = 0.0;
/// Stereo pan for obstacles on the right
pub const AUDIO_PAN_RIGHT: f32 = 1.0;

/// One cell of the 3x3 partition, rows top to bottom, columns left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObstacleZone {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ObstacleZone {
    /// All zones in row-major grid order; `zone.index()` indexes this array
    pub const ALL: [ObstacleZone; 9] = [
        ObstacleZone::TopLeft,
        ObstacleZone::TopCenter,
        ObstacleZone::TopRight,
        ObstacleZone::MiddleLeft,
        ObstacleZone::MiddleCenter,
        ObstacleZone::MiddleRight,
        ObstacleZone::BottomLeft,
        ObstacleZone::BottomCenter,
        ObstacleZone::BottomRight,
    ];

    /// Row-major position in the grid (0..9)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Zone at grid `(row, col)`, both in `0..3`
    pub fn from_grid(row: usize, col: usize) -> Option<Self> {
        if row > 2 || col > 2 {
            return None;
        }
        Some(Self::ALL[row * 3 + col])
    }

    /// Grid `(row, col)` of this zone
    pub fn grid_position(self) -> (usize, usize) {
        (self.index() / 3, self.index() % 3)
    }

    /// Attention priority, 1 is highest
    pub fn priority(self) -> u8 {
        match self {
            ObstacleZone::MiddleCenter => 1,
            ObstacleZone::MiddleLeft | ObstacleZone::MiddleRight => 2,
            ObstacleZone::BottomCenter => 3,
            ObstacleZone::BottomLeft | ObstacleZone::BottomRight => 4,
            ObstacleZone::TopCenter => 5,
            ObstacleZone::TopLeft | ObstacleZone::TopRight => 6,
        }
    }

    /// Stereo pan in `[-1.0, 1.0]` from the zone's column
    pub fn audio_pan(self) -> f32 {
        match self.grid_position().1 {
            0 => AUDIO_PAN_LEFT,
            1 => AUDIO_PAN_CENTER,
            _ => AUDIO_PAN_RIGHT,
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            ObstacleZone::TopLeft => "Top Left",
            ObstacleZone::TopCenter => "Top Center",
            ObstacleZone::TopRight => "Top Right",
            ObstacleZone::MiddleLeft => "Middle Left",
            ObstacleZone::MiddleCenter => "Center",
            ObstacleZone::MiddleRight => "Middle Right",
            ObstacleZone::BottomLeft => "Bottom Left",
            ObstacleZone::BottomCenter => "Bottom Center",
            ObstacleZone::BottomRight => "Bottom Right",
        }
    }
}
