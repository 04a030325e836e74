// Use cases layer: the frame scheduler, seating and input routing.

pub mod game;
pub mod input;
pub mod provision;
pub mod types;

pub use game::{GameState, TickClock};
pub use input::{Yoke, local_yokes, route_key};
pub use provision::{default_recruits, provision_players, spawn_for_slot};
pub use types::Recruit;
