// Use-case level inputs for seating a game.

use crate::domain::PlaneModel;

/// Someone about to be seated: what they call themselves and what they fly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recruit {
    pub callsign: String,
    pub plane: PlaneModel,
}

impl Recruit {
    pub fn new(callsign: impl Into<String>, plane: PlaneModel) -> Self {
        Self {
            callsign: callsign.into(),
            plane,
        }
    }
}
