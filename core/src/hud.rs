use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{Rgb, Vec2};

/// On-screen stock/percent readout owned by a fighter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HudLabel {
    pub position: Vec2,
    pub text: String,
    pub color: String,
}

impl HudLabel {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            text: String::new(),
            color: String::new(),
        }
    }

    pub fn set(&mut self, name: &str, stocks: i32, percent: f64) {
        self.text = hud_text(name, stocks, percent);
        self.color = hud_color(percent).css();
    }
}

pub fn hud_text(name: &str, stocks: i32, percent: f64) -> String {
    format!("{name}  {stocks}★   {}%", percent.floor())
}

/// Red rises to full by 300%, green drains to zero by 600%. The percent is
/// clamped to 999 for the color only.
pub fn hud_color(percent: f64) -> Rgb {
    let p = percent.min(HUD_MAX_PERCENT);
    let r = ((p / HUD_RED_FULL_PERCENT) * 255.0).floor().min(255.0);
    let g = (255.0 - ((p / HUD_GREEN_ZERO_PERCENT) * 255.0).floor()).max(0.0);
    Rgb {
        r: r as u8,
        g: g as u8,
        b: HUD_BLUE,
    }
}
