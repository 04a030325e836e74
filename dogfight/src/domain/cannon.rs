// Cannon rounds: finite projectiles that damage the first plane they share a
// cell with.

use crate::domain::arena::Arena;
use crate::domain::body::{Body, Projectile};
use crate::domain::plane::Plane;
use crate::domain::ports::Canvas;
use crate::domain::sprite::AnimatedSprite;
use crate::domain::vector::Vector;

const CANNON_GLYPH: char = '•';
// Impact debris: angle offsets are i / IMPACT_SPREAD for i in -1..=1.
const IMPACT_SPREAD: f64 = 5.0;
const IMPACT_SPEED_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Cannon {
    pub body: Body,
    pub damage: i32,
}

impl Cannon {
    pub fn new(coordinates: Vector, angle_of_attack: f64, speed: f64, damage: i32) -> Self {
        Self {
            body: Body {
                coordinates,
                angle_of_attack,
                turning_circle: 0.0,
                speed,
                infinite: false,
                glyph: CANNON_GLYPH,
                for_deletion: false,
            },
            damage,
        }
    }

    // One scheduler step: hit-check in place, and only if nothing was hit,
    // move and hit-check again. The double check stops a round skipping
    // through a plane within a single tick.
    pub fn update(&mut self, arena: &Arena, canvas: &mut dyn Canvas, planes: &mut [&mut Plane]) {
        self.erase(arena, canvas);

        if self.check_hits(planes) {
            return;
        }
        self.advance(arena);
        if self.check_hits(planes) {
            return;
        }
        self.render(arena, canvas);
    }

    // Applies damage to every live plane sharing this round's cell.
    pub fn check_hits(&mut self, planes: &mut [&mut Plane]) -> bool {
        let mut hit = false;
        for plane in planes.iter_mut() {
            if plane.body.for_deletion || !plane.hit_check(&*self) {
                continue;
            }
            plane.take_hit(self.damage);
            for i in -1..=1 {
                plane.animations.push(AnimatedSprite::explosion(
                    self.body.coordinates,
                    self.body.angle_of_attack + f64::from(i) / IMPACT_SPREAD,
                    self.body.speed * IMPACT_SPEED_FACTOR,
                ));
            }
            self.body.for_deletion = true;
            hit = true;
        }
        hit
    }
}

impl Projectile for Cannon {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render(&self, arena: &Arena, canvas: &mut dyn Canvas) {
        let cell = self.body.cell();
        if arena.contains(cell) {
            canvas.put(cell, self.body.glyph, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plane::Spawn;
    use crate::domain::test_support::RecordingCanvas;
    use crate::domain::tuning::PlaneModel;
    use crate::domain::vector::Cell;
    use std::f64::consts::PI;

    fn arena() -> Arena {
        Arena::new(0, 0, 20, 80).expect("valid arena")
    }

    fn plane_at(y: f64, x: f64) -> Plane {
        PlaneModel::P51.build(1, Spawn::new(Vector::new(y, x), PI / 2.0))
    }

    #[test]
    fn when_round_shares_a_cell_with_a_plane_then_hull_drops_by_damage() {
        let mut plane = plane_at(10.0, 10.0);
        let mut round = Cannon::new(Vector::new(10.2, 9.8), 0.0, 1.0, 20);

        let hit = round.check_hits(&mut [&mut plane]);

        assert!(hit);
        assert!(round.body.for_deletion);
        assert_eq!(plane.hull_integrity, 80);
        assert_eq!(plane.animations.len(), 3);
    }

    #[test]
    fn when_round_reaches_plane_after_moving_then_post_move_check_hits() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut plane = plane_at(11.0, 10.0);
        let mut round = Cannon::new(Vector::new(10.0, 10.0), 0.0, 1.0, 20);

        round.update(&arena, &mut canvas, &mut [&mut plane]);

        assert!(round.body.for_deletion);
        assert_eq!(plane.hull_integrity, 80);
        // A round that hit is not painted over the plane.
        assert_ne!(canvas.glyph_at(Cell::new(11, 10)), Some(CANNON_GLYPH));
    }

    #[test]
    fn when_round_already_overlaps_then_it_does_not_move() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut plane = plane_at(10.0, 10.0);
        let mut round = Cannon::new(Vector::new(10.0, 10.0), 0.0, 1.0, 20);

        round.update(&arena, &mut canvas, &mut [&mut plane]);

        assert_eq!(round.body.coordinates, Vector::new(10.0, 10.0));
        assert_eq!(plane.hull_integrity, 80);
    }

    #[test]
    fn when_round_misses_then_it_moves_and_is_drawn() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut plane = plane_at(3.0, 3.0);
        let mut round = Cannon::new(Vector::new(10.0, 10.0), PI / 2.0, 1.0, 20);

        round.update(&arena, &mut canvas, &mut [&mut plane]);

        assert!(!round.body.for_deletion);
        assert_eq!(plane.hull_integrity, 100);
        assert_eq!(canvas.glyph_at(Cell::new(10, 11)), Some(CANNON_GLYPH));
    }

    #[test]
    fn when_round_touches_the_border_then_it_is_flagged_and_not_drawn() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut round = Cannon::new(Vector::new(10.0, 78.6), PI / 2.0, 1.0, 20);

        round.update(&arena, &mut canvas, &mut []);

        assert!(round.body.for_deletion);
        assert_eq!(canvas.glyph_at(Cell::new(10, 80)), None);
    }

    #[test]
    fn when_plane_is_already_destroyed_then_rounds_pass_through() {
        let mut plane = plane_at(10.0, 10.0);
        plane.body.for_deletion = true;
        let mut round = Cannon::new(Vector::new(10.0, 10.0), 0.0, 1.0, 20);

        assert!(!round.check_hits(&mut [&mut plane]));
        assert_eq!(plane.hull_integrity, 100);
    }
}
