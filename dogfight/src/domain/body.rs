// Kinematic state shared by planes and cannon rounds, plus the capability
// trait the scheduler drives them through.

use crate::domain::arena::Arena;
use crate::domain::ports::Canvas;
use crate::domain::vector::{Cell, Vector, resolve_direction};

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub coordinates: Vector,
    // Radians; accumulates without normalisation.
    pub angle_of_attack: f64,
    // Radians added or removed per pitch input.
    pub turning_circle: f64,
    pub speed: f64,
    // Wrap at the boundary instead of despawning.
    pub infinite: bool,
    pub glyph: char,
    pub for_deletion: bool,
}

impl Body {
    pub fn cell(&self) -> Cell {
        self.coordinates.resolve()
    }

    pub fn direction(&self) -> Vector {
        resolve_direction(self.angle_of_attack)
    }

    pub fn change_pitch(&mut self, up: bool) {
        if up {
            self.angle_of_attack += self.turning_circle;
        } else {
            self.angle_of_attack -= self.turning_circle;
        }
    }

    // Integrates one tick of motion without looking at the arena.
    pub fn step(&mut self) {
        self.coordinates += self.direction() * self.speed;
    }

    pub fn react_to_boundary(&mut self, arena: &Arena) {
        if !arena.on_boundary(self.cell()) {
            return;
        }
        if self.infinite {
            self.coordinates = arena.wrap(self.coordinates);
        } else {
            self.for_deletion = true;
        }
    }

    /// Exact-cell hit test: both bodies resolve to the same cell.
    pub fn hit_check(&self, other: &Body) -> bool {
        self.cell() == other.cell()
    }
}

pub trait Projectile {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn on_boundary(&mut self, arena: &Arena) {
        self.body_mut().react_to_boundary(arena);
    }

    fn advance(&mut self, arena: &Arena) {
        self.body_mut().step();
        self.on_boundary(arena);
    }

    fn render(&self, arena: &Arena, canvas: &mut dyn Canvas);

    // Blanks the cells this projectile currently occupies.
    fn erase(&self, arena: &Arena, canvas: &mut dyn Canvas) {
        let cell = self.body().cell();
        if arena.contains(cell) {
            canvas.put(cell, ' ', None);
        }
    }

    fn hit_check(&self, other: &dyn Projectile) -> bool {
        self.body().hit_check(other.body())
    }
}
