// Frame-sequence animations (smoke trails and explosion debris).

use std::collections::VecDeque;

use crate::domain::arena::Arena;
use crate::domain::ports::{Canvas, Color};
use crate::domain::vector::{Cell, Vector, resolve_direction};

const SMOKE_FRAMES: &str = "••ooO0oo00oo••";
const EXPLOSION_FRAMES: &str = "x+x+x+•••.........";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Smoke,
    Explosion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite {
    pub kind: SpriteKind,
    pub coordinates: Vector,
    pub angle_of_attack: f64,
    pub speed: f64,
    // Consumed front to back, one per tick.
    pub frames: VecDeque<char>,
    pub for_deletion: bool,
}

impl AnimatedSprite {
    /// Stationary smoke puff left behind by a damaged plane.
    pub fn smoke(cell: Cell) -> Self {
        Self {
            kind: SpriteKind::Smoke,
            coordinates: cell.into(),
            angle_of_attack: 0.0,
            speed: 0.0,
            frames: SMOKE_FRAMES.chars().collect(),
            for_deletion: false,
        }
    }

    /// Debris drifting away from an impact or a destroyed plane.
    pub fn explosion(coordinates: Vector, angle_of_attack: f64, speed: f64) -> Self {
        Self {
            kind: SpriteKind::Explosion,
            coordinates,
            angle_of_attack,
            speed,
            frames: EXPLOSION_FRAMES.chars().collect(),
            for_deletion: false,
        }
    }

    pub fn cell(&self) -> Cell {
        self.coordinates.resolve()
    }

    // Erases the previous frame, drifts, then paints the next frame. Once the
    // frames run out the sprite blanks its cell and asks to be reaped.
    pub fn next_frame(&mut self, arena: &Arena, canvas: &mut dyn Canvas) {
        if arena.contains(self.cell()) {
            canvas.put(self.cell(), ' ', None);
        }

        self.coordinates += resolve_direction(self.angle_of_attack) * self.speed;

        match self.frames.pop_front() {
            Some(frame) => {
                if arena.contains(self.cell()) {
                    canvas.put(self.cell(), frame, Some(self.color()));
                }
            }
            None => {
                if arena.contains(self.cell()) {
                    canvas.put(self.cell(), ' ', None);
                }
                self.for_deletion = true;
            }
        }
    }

    fn color(&self) -> Color {
        match self.kind {
            SpriteKind::Smoke => Color::White,
            SpriteKind::Explosion => Color::Yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::RecordingCanvas;

    fn arena() -> Arena {
        Arena::new(0, 0, 20, 80).expect("valid arena")
    }

    #[test]
    fn when_frames_run_out_then_sprite_is_marked_for_deletion() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut smoke = AnimatedSprite::smoke(Cell::new(5, 5));
        let frame_count = smoke.frames.len();

        for _ in 0..frame_count {
            smoke.next_frame(&arena, &mut canvas);
            assert!(!smoke.for_deletion);
        }
        smoke.next_frame(&arena, &mut canvas);

        assert!(smoke.for_deletion);
        assert_eq!(canvas.glyph_at(Cell::new(5, 5)), Some(' '));
    }

    #[test]
    fn when_explosion_advances_then_it_drifts_and_paints_the_first_frame() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut debris = AnimatedSprite::explosion(Vector::new(5.0, 5.0), 0.0, 1.0);

        debris.next_frame(&arena, &mut canvas);

        assert_eq!(debris.cell(), Cell::new(6, 5));
        assert_eq!(canvas.glyph_at(Cell::new(6, 5)), Some('x'));
    }

    #[test]
    fn when_sprite_leaves_the_arena_then_nothing_is_painted_on_the_border() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut debris = AnimatedSprite::explosion(Vector::new(19.0, 5.0), 0.0, 1.0);

        debris.next_frame(&arena, &mut canvas);

        assert_eq!(canvas.glyph_at(Cell::new(20, 5)), None);
    }
}
