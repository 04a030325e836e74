// Client side of the relay connection: framing and the TCP transport.

pub mod codec;
pub mod transport;

pub use codec::JsonFrames;
pub use transport::Transport;

use crate::domain::InputError;

#[derive(Debug)]
pub enum NetError {
    // Categorizes transport failures so callers can decide policy.
    Io(std::io::Error),
    Serialization(serde_json::Error),
    // The relay closed the socket (zero-byte read).
    Closed,
    // No complete pairing arrived within the bootstrap window.
    BootstrapTimeout,
}

impl From<std::io::Error> for NetError {
    fn from(e: std::io::Error) -> Self {
        NetError::Io(e)
    }
}

impl From<serde_json::Error> for NetError {
    fn from(e: serde_json::Error) -> Self {
        NetError::Serialization(e)
    }
}

impl From<NetError> for InputError {
    fn from(e: NetError) -> Self {
        match e {
            NetError::Closed => InputError::Disconnected,
            other => InputError::Transport(format!("{other:?}")),
        }
    }
}
