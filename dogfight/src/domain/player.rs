use crate::domain::input::PlayerId;
use crate::domain::plane::Plane;

// A seat in the game. The plane is reset in place on death; players live for
// the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub player_id: PlayerId,
    pub callsign: String,
    pub plane: Plane,
    pub kills: u32,
    pub ready: bool,
}

impl Player {
    pub fn new(player_id: PlayerId, callsign: impl Into<String>, plane: Plane) -> Self {
        Self {
            player_id,
            callsign: callsign.into(),
            plane,
            kills: 0,
            ready: true,
        }
    }
}
