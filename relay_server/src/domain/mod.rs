pub mod errors;
pub mod pairing;
pub mod round;

pub use errors::RelayError;
pub use pairing::Pairing;
pub use round::{Round, RoundQueue};

// Identifier a client picks for itself and repeats as the key of every frame.
pub type ClientId = String;

// Clients per game.
pub const SEATS: usize = 2;
