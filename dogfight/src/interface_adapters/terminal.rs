// Character-cell rendering and keyboard decoding on top of crossterm.

use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::cursor;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Print};

use crate::domain::{Arena, Canvas, Cell, Color, Key};
use crate::interface_adapters::hud::{self, BOX_LINES};
use crate::use_cases::GameState;

const C_BORDER: style::Color = style::Color::DarkGrey;
// Border plus its lines.
const BOX_HEIGHT: i64 = BOX_LINES as i64 + 2;

fn to_terminal(color: Color) -> style::Color {
    match color {
        Color::Red => style::Color::Red,
        Color::Yellow => style::Color::Yellow,
        Color::White => style::Color::White,
    }
}

/// Queues glyphs onto a writer and flushes once per frame.
///
/// `Canvas::put` cannot fail, so the first write error is kept and returned
/// by the next `flush`.
pub struct TerminalCanvas<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn move_to(&mut self, row: i64, col: i64) -> io::Result<bool> {
        match (u16::try_from(row), u16::try_from(col)) {
            (Ok(row), Ok(col)) => {
                self.out.queue(cursor::MoveTo(col, row))?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn print_at(&mut self, row: i64, col: i64, text: &str, color: Option<style::Color>) -> io::Result<()> {
        if !self.move_to(row, col)? {
            return Ok(());
        }
        match color {
            Some(color) => self.out.queue(style::SetForegroundColor(color))?,
            None => self.out.queue(style::ResetColor)?,
        };
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_box(&mut self, top: i64, left: i64, bottom: i64, right: i64) -> io::Result<()> {
        let inner = usize::try_from(right - left - 1).unwrap_or(0);
        let bar = "─".repeat(inner);
        self.print_at(top, left, &format!("┌{bar}┐"), Some(C_BORDER))?;
        self.print_at(bottom, left, &format!("└{bar}┘"), Some(C_BORDER))?;
        for row in top + 1..bottom {
            self.print_at(row, left, "│", Some(C_BORDER))?;
            self.print_at(row, right, "│", Some(C_BORDER))?;
        }
        Ok(())
    }

    fn fill_box(&mut self, top: i64, left: i64, right: i64, lines: &[String]) -> io::Result<()> {
        let width = usize::try_from(right - left - 1).unwrap_or(0);
        for (offset, text) in (1..).zip(lines) {
            let clipped: String = text.chars().chain(std::iter::repeat(' ')).take(width).collect();
            self.print_at(top + offset, left + 1, &clipped, None)?;
        }
        Ok(())
    }

    /// Paints the arena border once at start-up.
    pub fn draw_arena(&mut self, arena: &Arena) -> io::Result<()> {
        self.out
            .queue(crossterm::terminal::Clear(crossterm::terminal::ClearType::All))?;
        self.draw_box(arena.top, arena.left, arena.bottom, arena.right)
    }

    /// Player boxes side by side under the arena, plus the debug box above it
    /// when enabled. Boxes that would fall off the screen are skipped.
    pub fn draw_info(&mut self, state: &GameState, debug: bool) -> io::Result<()> {
        let arena = state.arena;
        let seats = i64::try_from(state.players.len()).unwrap_or(1).max(1);
        let width = (arena.right - arena.left) / seats;
        let top = arena.bottom + 1;

        for (index, player) in (0..).zip(&state.players) {
            let left = arena.left + index * width;
            let right = if index == seats - 1 {
                arena.right
            } else {
                left + width - 1
            };
            self.draw_box(top, left, top + BOX_HEIGHT - 1, right)?;
            self.fill_box(top, left, right, &hud::player_lines(player))?;
        }

        let debug_top = arena.top - BOX_HEIGHT;
        if debug && debug_top >= 0 {
            self.draw_box(debug_top, arena.left, arena.top - 1, arena.right)?;
            self.fill_box(debug_top, arena.left, arena.right, &hud::debug_lines(state))?;
        }
        Ok(())
    }

    fn queue_glyph(&mut self, cell: Cell, glyph: char, color: Option<Color>) -> io::Result<()> {
        if !self.move_to(cell.row, cell.col)? {
            return Ok(());
        }
        match color {
            Some(color) => self.out.queue(style::SetForegroundColor(to_terminal(color)))?,
            None => self.out.queue(style::ResetColor)?,
        };
        self.out.queue(Print(glyph))?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn put(&mut self, cell: Cell, glyph: char, color: Option<Color>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.queue_glyph(cell, glyph, color) {
            self.error = Some(e);
        }
    }
}

/// Converts a terminal key event into a game key. Releases are ignored and
/// letters are case-folded so caps lock does not lock a player out.
pub fn key_from_event(event: &KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

/// Esc, `q` and Ctrl+C end the game. In raw mode Ctrl+C arrives as a key.
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
