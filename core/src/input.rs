use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    D,
    W,
    S,
    J,
    Left,
    Right,
    Up,
    Down,
    Numpad1,
}

impl KeyCode {
    /// Stable byte used when hashing transcripts.
    pub fn code(self) -> u8 {
        match self {
            KeyCode::A => 0,
            KeyCode::D => 1,
            KeyCode::W => 2,
            KeyCode::S => 3,
            KeyCode::J => 4,
            KeyCode::Left => 5,
            KeyCode::Right => 6,
            KeyCode::Up => 7,
            KeyCode::Down => 8,
            KeyCode::Numpad1 => 9,
        }
    }
}

/// One fighter's key bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub attack: KeyCode,
}

impl Controls {
    pub const PLAYER_ONE: Controls = Controls {
        left: KeyCode::A,
        right: KeyCode::D,
        up: KeyCode::W,
        down: KeyCode::S,
        attack: KeyCode::J,
    };

    pub const PLAYER_TWO: Controls = Controls {
        left: KeyCode::Left,
        right: KeyCode::Right,
        up: KeyCode::Up,
        down: KeyCode::Down,
        attack: KeyCode::Numpad1,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyState {
    is_down: bool,
    just_down: bool,
}

/// Key-state table with consumable press edges.
#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    keys: BTreeMap<KeyCode, KeyState>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        if !state.is_down {
            state.is_down = true;
            state.just_down = true;
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        state.is_down = false;
        state.just_down = false;
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_down)
    }

    /// True once per press; reading consumes the edge. An unread edge stays
    /// pending for as long as the key is held.
    pub fn just_down(&mut self, key: KeyCode) -> bool {
        match self.keys.get_mut(&key) {
            Some(state) if state.just_down => {
                state.just_down = false;
                true
            }
            _ => false,
        }
    }

    /// Apply a held-key snapshot: keys not listed are released.
    pub fn sync(&mut self, held: &[KeyCode]) {
        let released: Vec<KeyCode> = self
            .keys
            .iter()
            .filter(|(key, state)| state.is_down && !held.contains(*key))
            .map(|(key, _)| *key)
            .collect();
        for key in released {
            self.release(key);
        }
        for &key in held {
            self.press(key);
        }
    }
}
