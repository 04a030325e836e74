use async_trait::async_trait;

use crate::domain::errors::InputError;
use crate::domain::input::{Key, KeyPress};
use crate::domain::vector::Cell;

// Palette the simulation may ask a canvas to paint with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Yellow,
    White,
}

// Character-cell drawing surface. The simulation only ever puts single
// glyphs; a blank glyph (' ') erases.
pub trait Canvas {
    fn put(&mut self, cell: Cell, glyph: char, color: Option<Color>);
}

// Port for turning this tick's local key into every player's key press.
// Local games route through keymaps; network games exchange through the relay.
#[async_trait]
pub trait InputSource: Send {
    async fn exchange(&mut self, key: Option<Key>) -> Result<Vec<KeyPress>, InputError>;

    // Orderly shutdown; must be safe to call once after the last exchange.
    async fn close(&mut self);
}
