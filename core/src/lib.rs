pub mod config;
pub mod constants;
pub mod fighter;
pub mod game;
pub mod hash;
pub mod hitbox;
pub mod hud;
pub mod input;
pub mod physics;
pub mod replay;
pub mod scene;
pub mod stage;
pub mod timer;
pub mod types;

pub use config::{ConfigError, GameConfig};
pub use constants::*;
pub use fighter::{Fighter, FighterConfig};
pub use game::Game;
pub use hash::*;
pub use hitbox::{attack_region, attack_size, AttackMeta, Hitbox};
pub use hud::{hud_color, hud_text, HudLabel};
pub use input::{Controls, KeyCode, Keyboard};
pub use physics::{Body, Contact, PhysicsWorld};
pub use replay::{run_replay, EventTally, InputFrame, ReplayInput, ReplayOutput};
pub use scene::{FighterSnapshot, MatchSnapshot, Scene, SceneEvent};
pub use stage::{Platform, Stage};
pub use timer::Timer;
pub use types::*;
