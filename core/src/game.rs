use crate::config::{ConfigError, GameConfig};
use crate::input::Keyboard;
use crate::replay::InputFrame;
use crate::scene::{Scene, SceneEvent};

/// The engine instance: owns the scene and the input devices feeding it.
pub struct Game {
    scene: Scene,
    keyboard: Keyboard,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            scene: Scene::new(config)?,
            keyboard: Keyboard::new(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Apply one frame of held keys and tick the scene.
    pub fn frame(&mut self, input: &InputFrame) -> Result<Vec<SceneEvent>, ConfigError> {
        if !(input.delta_ms.is_finite() && input.delta_ms > 0.0) {
            return Err(ConfigError::FrameDelta(input.delta_ms));
        }
        self.keyboard.sync(&input.held);
        Ok(self.scene.update(input.delta_ms, &mut self.keyboard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn frame_rejects_bad_delta() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        for delta_ms in [0.0, -16.0, f64::NAN, f64::INFINITY] {
            let input = InputFrame { delta_ms, held: vec![] };
            assert!(matches!(game.frame(&input), Err(ConfigError::FrameDelta(_))));
        }
        assert_eq!(game.scene().frame(), 0);
    }

    #[test]
    fn held_keys_reach_the_fighters() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        let input = InputFrame {
            held: vec![KeyCode::Right],
            ..InputFrame::idle()
        };
        game.frame(&input).unwrap();
        assert_eq!(game.scene().fighter(1).body.velocity.x, 500.0);
        assert_eq!(game.scene().fighter(0).body.velocity.x, 0.0);
    }
}
