// Input routing: one raw key in, one key press per seated player out.

use std::collections::HashMap;

use crate::domain::{Action, Key, KeyPress, PlayerId};

/// Keymap for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Yoke {
    pub player_id: PlayerId,
    bindings: HashMap<Key, Action>,
}

impl Yoke {
    pub fn new(player_id: PlayerId, bindings: impl IntoIterator<Item = (Key, Action)>) -> Self {
        Self {
            player_id,
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Arrow keys with inverted pitch (down climbs, like a control column)
    /// and space to fire.
    pub fn player_one(player_id: PlayerId) -> Self {
        Self::new(
            player_id,
            [
                (Key::Down, Action::Up),
                (Key::Up, Action::Down),
                (Key::Space, Action::Shoot),
            ],
        )
    }

    pub fn player_two(player_id: PlayerId) -> Self {
        Self::new(
            player_id,
            [
                (Key::Char('w'), Action::Up),
                (Key::Char('s'), Action::Down),
                (Key::Char('d'), Action::Shoot),
            ],
        )
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.bindings.get(&key).copied()
    }
}

/// Maps `key` through every yoke. Players whose yoke does not bind the key
/// still get an idle press, so the result always has one entry per yoke.
pub fn route_key(key: Option<Key>, yokes: &[Yoke]) -> Vec<KeyPress> {
    yokes
        .iter()
        .map(|yoke| KeyPress::new(yoke.player_id, key.and_then(|k| yoke.action_for(k))))
        .collect()
}

/// Both seats at one keyboard.
pub fn local_yokes() -> Vec<Yoke> {
    vec![Yoke::player_one(1), Yoke::player_two(2)]
}
