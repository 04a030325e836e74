// Wire protocol DTOs for the relay. Every message in either direction is one
// JSON object keyed by client id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Action, PlaneModel};
use crate::use_cases::Recruit;

pub type ClientId = String;

/// One relay message. Keys sort lexicographically, which is also slot order.
pub type RelayFrame = BTreeMap<ClientId, Option<Payload>>;

/// What a client puts under its own id: a per-tick action or, once, its
/// bootstrap details. `null` (no input this tick) is the `None` around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Action(Action),
    Join(JoinPayload),
}

/// Bootstrap details a client announces before the first tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPayload {
    pub callsign: String,
    #[serde(default)]
    pub plane: PlaneModel,
}

impl From<&Recruit> for JoinPayload {
    fn from(recruit: &Recruit) -> Self {
        Self {
            callsign: recruit.callsign.clone(),
            plane: recruit.plane,
        }
    }
}

impl From<JoinPayload> for Recruit {
    fn from(join: JoinPayload) -> Self {
        Recruit::new(join.callsign, join.plane)
    }
}

pub fn join_frame(client_id: &str, join: JoinPayload) -> RelayFrame {
    BTreeMap::from([(client_id.to_string(), Some(Payload::Join(join)))])
}

pub fn action_frame(client_id: &str, action: Option<Action>) -> RelayFrame {
    BTreeMap::from([(client_id.to_string(), action.map(Payload::Action))])
}

/// The action `client_id` sent in a merged frame, if any.
pub fn action_of(frame: &RelayFrame, client_id: &str) -> Option<Action> {
    match frame.get(client_id) {
        Some(Some(Payload::Action(action))) => Some(*action),
        _ => None,
    }
}
