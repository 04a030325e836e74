use std::collections::HashMap;

use crate::domain::ports::{Canvas, Color};
use crate::domain::vector::Cell;

// In-memory canvas so rendering side effects can be asserted without a terminal.
#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    cells: HashMap<Cell, (char, Option<Color>)>,
}

impl RecordingCanvas {
    pub(crate) fn glyph_at(&self, cell: Cell) -> Option<char> {
        self.cells.get(&cell).map(|(glyph, _)| *glyph)
    }

    pub(crate) fn color_at(&self, cell: Cell) -> Option<Color> {
        self.cells.get(&cell).and_then(|(_, color)| *color)
    }
}

impl Canvas for RecordingCanvas {
    fn put(&mut self, cell: Cell, glyph: char, color: Option<Color>) {
        self.cells.insert(cell, (glyph, color));
    }
}
