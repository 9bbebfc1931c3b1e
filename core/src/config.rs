use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::types::Rgb;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("stage dimensions must be positive, got {width}x{height}")]
    Dimensions { width: f64, height: f64 },
    #[error("gravity must be finite, got {0}")]
    Gravity(f64),
    #[error("background color must look like #rrggbb, got {0:?}")]
    BackgroundColor(String),
    #[error("frame delta must be positive and finite, got {0}ms")]
    FrameDelta(f64),
}

/// Engine-level settings handed to the scene at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    pub gravity_y: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            background_color: BACKGROUND_COLOR.to_string(),
            gravity_y: GRAVITY_Y,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.gravity_y.is_finite() {
            return Err(ConfigError::Gravity(self.gravity_y));
        }
        self.background_rgb()?;
        Ok(())
    }

    pub fn background_rgb(&self) -> Result<Rgb, ConfigError> {
        let bad = || ConfigError::BackgroundColor(self.background_color.clone());
        let hex = self.background_color.strip_prefix('#').ok_or_else(bad)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
        Ok(Rgb::from_hex(value))
    }
}
