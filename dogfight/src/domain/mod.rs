// Domain layer: simulation types and rules. No I/O beyond the `Canvas` port.

pub mod arena;
pub mod body;
pub mod cannon;
pub mod errors;
pub mod gun;
pub mod input;
pub mod plane;
pub mod player;
pub mod ports;
pub mod sprite;
pub mod tuning;
pub mod vector;

#[cfg(test)]
pub(crate) mod test_support;

pub use arena::Arena;
pub use body::{Body, Projectile};
pub use cannon::Cannon;
pub use errors::{ArenaError, InputError};
pub use gun::Gun;
pub use input::{Action, Key, KeyPress, PlayerId};
pub use plane::{Plane, Spawn};
pub use player::Player;
pub use ports::{Canvas, Color, InputSource};
pub use sprite::{AnimatedSprite, SpriteKind};
pub use tuning::PlaneModel;
pub use vector::{Cell, Vector, resolve_direction};
