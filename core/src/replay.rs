use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::constants::FRAME_MS;
use crate::game::Game;
use crate::hash::{hash_snapshot, hash_transcript};
use crate::input::KeyCode;
use crate::scene::{MatchSnapshot, SceneEvent};

fn default_delta_ms() -> f64 {
    FRAME_MS
}

/// Keys held during one frame, and how long that frame lasted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    #[serde(default = "default_delta_ms")]
    pub delta_ms: f64,
    #[serde(default)]
    pub held: Vec<KeyCode>,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self {
            delta_ms: FRAME_MS,
            held: Vec::new(),
        }
    }

    pub fn holding(held: &[KeyCode]) -> Self {
        Self {
            delta_ms: FRAME_MS,
            held: held.to_vec(),
        }
    }
}

/// A recorded match: engine settings plus one entry per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayInput {
    #[serde(default)]
    pub config: GameConfig,
    #[serde(default)]
    pub frames: Vec<InputFrame>,
}

impl ReplayInput {
    /// `frames` idle frames on the default stage.
    pub fn idle(frames: usize) -> Self {
        Self {
            config: GameConfig::default(),
            frames: vec![InputFrame::idle(); frames],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTally {
    pub attacks: u32,
    pub hits: u32,
    pub knockouts: u32,
}

impl EventTally {
    pub fn record(&mut self, event: &SceneEvent) {
        match event {
            SceneEvent::AttackStarted { .. } => self.attacks += 1,
            SceneEvent::Hit { .. } => self.hits += 1,
            SceneEvent::KnockedOut { .. } => self.knockouts += 1,
            SceneEvent::HitboxFinished { .. } => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutput {
    pub frames: u64,
    pub tally: EventTally,
    pub final_state: MatchSnapshot,
    /// SHA-256 of the input frames.
    pub transcript_hash: [u8; 32],
    /// SHA-256 of the final snapshot.
    pub state_hash: [u8; 32],
}

/// Play a recorded match from a fresh scene.
pub fn run_replay(input: &ReplayInput) -> Result<ReplayOutput, ConfigError> {
    let mut game = Game::new(input.config.clone())?;
    let mut tally = EventTally::default();

    for frame in &input.frames {
        for event in game.frame(frame)? {
            tally.record(&event);
        }
    }

    let final_state = game.scene().snapshot();
    Ok(ReplayOutput {
        frames: game.scene().frame(),
        tally,
        state_hash: hash_snapshot(&final_state),
        transcript_hash: hash_transcript(&input.frames),
        final_state,
    })
}
