use super::ClientId;

// Reasons the relay refuses a client frame.
#[derive(Debug, PartialEq, Eq)]
pub enum RelayError {
    // The target round already holds every seat's entry.
    RoundFull,
    // A pairing already exists and this client is not part of it.
    NotPaired { client_id: ClientId },
    // Client frames carry exactly one `{client_id: payload}` entry.
    UnexpectedEntries { count: usize },
    // A connection spoke with a different client id than it started with.
    IdentityChanged { expected: ClientId, got: ClientId },
}
