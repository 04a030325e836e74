// Raw keys and the logical actions they map to.

use serde::{Deserialize, Serialize};

pub type PlayerId = u8;

// Terminal-independent key identity; adapters convert into this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Esc,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Shoot,
}

// One player's intent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub player_id: PlayerId,
    pub action: Option<Action>,
}

impl KeyPress {
    pub fn new(player_id: PlayerId, action: Option<Action>) -> Self {
        Self { player_id, action }
    }

    pub fn idle(player_id: PlayerId) -> Self {
        Self::new(player_id, None)
    }
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Shoot => "shoot",
        }
    }
}
