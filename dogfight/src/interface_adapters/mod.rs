// Interface adapters: wire protocol, relay transport, input sources and the
// terminal.

pub mod hud;
pub mod input;
pub mod net;
pub mod protocol;
pub mod terminal;

pub use input::{LocalInput, NetworkInput, Seat};
pub use net::{NetError, Transport};
pub use terminal::TerminalCanvas;
