use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub color: Color,
}

/// Static stage geometry plus the bounds the blast zone is measured from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
    pub platforms: Vec<Platform>,
    pub spawn_points: [Vec2; 2],
}

impl Stage {
    /// Ground plus three floating platforms, all placed proportionally to
    /// the stage size.
    pub fn new(width: f64, height: f64) -> Self {
        let platform = |cx: f64, cy: f64, w: f64, h: f64, color: Color| Platform {
            rect: Rect::centered(cx, cy, w, h),
            color,
        };
        Stage {
            width,
            height,
            platforms: vec![
                // Ground
                platform(width / 2.0, height * 0.85, width * 0.6, 30.0, 0x34495e),
                // Side platforms
                platform(width * 0.35, height * 0.6, 200.0, 20.0, 0x3d566e),
                platform(width * 0.65, height * 0.6, 200.0, 20.0, 0x3d566e),
                // Top platform
                platform(width / 2.0, height * 0.4, 260.0, 20.0, 0x2e4053),
            ],
            spawn_points: [
                Vec2::new(width * 0.35, height * 0.2),
                Vec2::new(width * 0.65, height * 0.2),
            ],
        }
    }

    pub fn colliders(&self) -> Vec<Rect> {
        self.platforms.iter().map(|p| p.rect).collect()
    }

    /// Stage bounds grown by the blast padding on every side.
    pub fn blast_zone(&self) -> Rect {
        Rect {
            x: -BLAST_PADDING,
            y: -BLAST_PADDING,
            w: self.width + 2.0 * BLAST_PADDING,
            h: self.height + 2.0 * BLAST_PADDING,
        }
    }

    /// Inclusive containment test of a fighter's center.
    pub fn in_bounds(&self, position: Vec2) -> bool {
        let zone = self.blast_zone();
        position.x >= zone.x
            && position.x <= zone.right()
            && position.y >= zone.y
            && position.y <= zone.bottom()
    }
}
