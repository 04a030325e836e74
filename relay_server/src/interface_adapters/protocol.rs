// Wire shapes. Clients send `{client_id: payload}`; the relay answers with the
// merged `{client_id: payload, ...}` of a full round. Payloads are opaque here:
// `null`, an action string, or a join object.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::ClientId;

pub type ClientFrame = BTreeMap<ClientId, Value>;
