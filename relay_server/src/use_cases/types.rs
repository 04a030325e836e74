use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::domain::ClientId;

pub type ConnId = u64;

// Everything the relay task learns about its connections.
#[derive(Debug)]
pub enum RelayEvent {
    Connected {
        conn_id: ConnId,
        // Merged frames for this connection; dropping it closes the socket.
        outbound: mpsc::Sender<Arc<str>>,
    },
    Frame {
        conn_id: ConnId,
        frame: BTreeMap<ClientId, Value>,
    },
    Disconnected {
        conn_id: ConnId,
    },
}
