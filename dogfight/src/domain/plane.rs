// Player-controlled plane: a wrapping body with a nose, a hull and a gun.

use std::time::Instant;

use crate::domain::arena::Arena;
use crate::domain::body::{Body, Projectile};
use crate::domain::cannon::Cannon;
use crate::domain::gun::Gun;
use crate::domain::input::{Action, KeyPress, PlayerId};
use crate::domain::ports::{Canvas, Color};
use crate::domain::sprite::{AnimatedSprite, SpriteKind};
use crate::domain::tuning::{PlaneModel, PlaneTuning};
use crate::domain::vector::{Cell, Vector};

const PLANE_GLYPH: char = '+';
// Hull below this leaves a smoke trail.
const SMOKE_THRESHOLD: i32 = 40;
// Destruction debris: angle offsets are i / WRECK_SPREAD for i in -2..=2.
const WRECK_SPREAD: f64 = 3.0;
const WRECK_SPEED_FACTOR: f64 = 0.7;

/// Where and which way a plane (re)enters the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub coordinates: Vector,
    pub angle: f64,
}

impl Spawn {
    pub const fn new(coordinates: Vector, angle: f64) -> Self {
        Self { coordinates, angle }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub plane_id: PlayerId,
    pub model: PlaneModel,
    pub body: Body,
    pub spawn: Spawn,
    pub nose_coords: Vector,
    pub nose: char,
    pub hull_integrity: i32,
    pub max_hull: i32,
    pub color: Color,
    pub gun: Gun,
    // Rounds fired this tick, drained by the scheduler.
    pub fired_cannon: Vec<Cannon>,
    // Sprites spawned by or on this plane, handed over to the scheduler.
    pub animations: Vec<AnimatedSprite>,
}

impl Plane {
    pub fn new(plane_id: PlayerId, model: PlaneModel, spawn: Spawn, tuning: PlaneTuning, gun: Gun) -> Self {
        let mut plane = Self {
            plane_id,
            model,
            body: Body {
                coordinates: spawn.coordinates,
                angle_of_attack: spawn.angle,
                turning_circle: tuning.turning_circle,
                speed: tuning.speed,
                infinite: true,
                glyph: PLANE_GLYPH,
                for_deletion: false,
            },
            spawn,
            nose_coords: spawn.coordinates,
            nose: '-',
            hull_integrity: tuning.hull,
            max_hull: tuning.hull,
            color: tuning.color,
            gun,
            fired_cannon: Vec::new(),
            animations: Vec::new(),
        };
        plane.update_nose();
        plane
    }

    pub fn nose_cell(&self) -> Cell {
        self.nose_coords.resolve()
    }

    /// Applies this plane's key presses for the tick. Wrecked planes ignore
    /// input until they are reset.
    pub fn parse_keys(&mut self, presses: &[KeyPress], now: Instant) {
        if self.hull_integrity <= 0 {
            return;
        }

        let plane_id = self.plane_id;
        for press in presses.iter().filter(|p| p.player_id == plane_id) {
            match press.action {
                Some(Action::Up) => self.body.change_pitch(true),
                Some(Action::Down) => self.body.change_pitch(false),
                Some(Action::Shoot) => self.fire_cannon(now),
                None => {}
            }
        }
    }

    // Rounds leave one cell ahead of the nose so they never start on top of
    // their own plane.
    fn fire_cannon(&mut self, now: Instant) {
        let muzzle = self.nose_coords + self.body.direction().rounded();
        if let Some(round) = self.gun.fire(muzzle, self.body.angle_of_attack, now) {
            self.fired_cannon.push(round);
        }
    }

    pub fn take_hit(&mut self, damage: i32) {
        self.hull_integrity -= damage;
    }

    /// Erase, smoke, move, then either repaint or break apart.
    ///
    /// `in_play` is the scheduler's shared animation list; a smoke puff is only
    /// added when no smoke already sits on the plane's cell.
    pub fn draw(&mut self, arena: &Arena, canvas: &mut dyn Canvas, in_play: &[AnimatedSprite]) {
        self.erase(arena, canvas);

        if self.hull_integrity > 0 && self.hull_integrity < SMOKE_THRESHOLD {
            let cell = self.body.cell();
            let smoking = self
                .animations
                .iter()
                .chain(in_play)
                .any(|a| a.kind == SpriteKind::Smoke && a.cell() == cell);
            if !smoking {
                self.animations.push(AnimatedSprite::smoke(cell));
            }
        }

        self.advance(arena);

        if self.hull_integrity > 0 {
            self.render(arena, canvas);
        } else {
            self.break_apart();
        }
    }

    fn break_apart(&mut self) {
        let origin = Vector::from(self.body.cell());
        for i in -2..=2 {
            self.animations.push(AnimatedSprite::explosion(
                origin,
                self.body.angle_of_attack + f64::from(i) / WRECK_SPREAD,
                self.body.speed * WRECK_SPEED_FACTOR,
            ));
        }
        self.body.for_deletion = true;
    }

    /// Puts the plane back on its spawn with a full hull and a full chamber.
    pub fn reset(&mut self, now: Instant) {
        self.body.coordinates = self.spawn.coordinates;
        self.body.angle_of_attack = self.spawn.angle;
        self.body.for_deletion = false;
        self.hull_integrity = self.max_hull;
        self.gun.reload_chamber(now, true);
        self.fired_cannon.clear();
        self.update_nose();
    }

    fn update_nose(&mut self) {
        let heading = self.body.direction().rounded();
        self.nose_coords = Vector::from(self.body.cell()) + heading;
        self.nose = nose_glyph(heading).unwrap_or(self.nose);
    }
}

impl Projectile for Plane {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, arena: &Arena) {
        self.body.step();
        self.on_boundary(arena);
        self.update_nose();
    }

    fn render(&self, arena: &Arena, canvas: &mut dyn Canvas) {
        let body = self.body.cell();
        if arena.contains(body) {
            canvas.put(body, self.body.glyph, Some(self.color));
        }
        let nose = self.nose_cell();
        if arena.contains(nose) {
            canvas.put(nose, self.nose, Some(self.color));
        }
    }

    fn erase(&self, arena: &Arena, canvas: &mut dyn Canvas) {
        for cell in [self.body.cell(), self.nose_cell()] {
            if arena.contains(cell) {
                canvas.put(cell, ' ', None);
            }
        }
    }
}

// Glyph for each of the eight rounded headings; `None` for a zero heading.
fn nose_glyph(heading: Vector) -> Option<char> {
    let glyph = match (heading.y as i64, heading.x as i64) {
        (0, 0) => return None,
        (0, _) => '-',
        (1, 0) | (-1, 0) => '|',
        (1, -1) | (-1, 1) => '/',
        (1, 1) | (-1, -1) => '\\',
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::RecordingCanvas;
    use std::f64::consts::PI;

    fn arena() -> Arena {
        Arena::new(0, 0, 20, 80).expect("valid arena")
    }

    fn plane(angle: f64) -> Plane {
        PlaneModel::P51.build(1, Spawn::new(Vector::new(10.0, 10.0), angle))
    }

    #[test]
    fn when_heading_changes_then_nose_follows_the_lookup_table() {
        let cases = [
            (0.0, '|'),
            (PI, '|'),
            (PI / 2.0, '-'),
            (-PI / 2.0, '-'),
            (PI / 4.0, '\\'),
            (-PI / 4.0, '/'),
            (3.0 * PI / 4.0, '/'),
            (-3.0 * PI / 4.0, '\\'),
        ];
        for (angle, glyph) in cases {
            assert_eq!(plane(angle).nose, glyph, "angle {angle}");
        }
    }

    #[test]
    fn when_plane_moves_then_nose_sits_one_cell_ahead_of_the_body() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut p = plane(PI / 2.0);

        p.draw(&arena, &mut canvas, &[]);

        assert_eq!(p.body.coordinates, Vector::new(10.0, 10.0) + Vector::new(0.0, 1.0) * 0.3);
        assert_eq!(p.nose_cell(), Cell::new(10, 11));
        assert_eq!(canvas.glyph_at(Cell::new(10, 10)), Some('+'));
        assert_eq!(canvas.glyph_at(Cell::new(10, 11)), Some('-'));
        assert_eq!(canvas.color_at(Cell::new(10, 10)), Some(Color::Red));
    }

    #[test]
    fn when_shoot_is_pressed_then_round_spawns_ahead_of_the_nose() {
        let mut p = plane(PI / 2.0);

        p.parse_keys(&[KeyPress::new(1, Some(Action::Shoot))], Instant::now());

        assert_eq!(p.fired_cannon.len(), 1);
        assert_eq!(p.fired_cannon[0].body.coordinates, Vector::new(10.0, 12.0));
        assert_eq!(p.gun.rounds_in_chamber, p.gun.capacity - 1);
    }

    #[test]
    fn when_keys_belong_to_another_player_then_plane_ignores_them() {
        let mut p = plane(0.0);

        p.parse_keys(
            &[
                KeyPress::new(2, Some(Action::Up)),
                KeyPress::new(2, Some(Action::Shoot)),
            ],
            Instant::now(),
        );

        assert_eq!(p.body.angle_of_attack, 0.0);
        assert!(p.fired_cannon.is_empty());
    }

    #[test]
    fn when_hull_is_low_then_one_smoke_puff_is_left_per_cell() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut p = plane(PI / 2.0);
        p.hull_integrity = 20;

        p.draw(&arena, &mut canvas, &[]);
        assert_eq!(p.animations.len(), 1);
        assert_eq!(p.animations[0].kind, SpriteKind::Smoke);

        // Still on (10, 10): the existing puff suppresses a second one.
        p.draw(&arena, &mut canvas, &[]);
        assert_eq!(p.animations.len(), 1);

        let handed_over = std::mem::take(&mut p.animations);
        p.body.coordinates = Vector::new(10.0, 10.0);
        p.draw(&arena, &mut canvas, &handed_over);
        assert!(p.animations.is_empty());
    }

    #[test]
    fn when_hull_is_depleted_then_plane_breaks_into_five_pieces() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut p = plane(PI / 2.0);
        p.take_hit(100);

        p.draw(&arena, &mut canvas, &[]);

        assert!(p.body.for_deletion);
        assert_eq!(p.animations.len(), 5);
        assert!(p.animations.iter().all(|a| a.kind == SpriteKind::Explosion));
        assert!((p.animations[0].speed - 0.3 * 0.7).abs() < 1e-12);
        // A wreck is not repainted.
        assert_eq!(canvas.glyph_at(Cell::new(10, 10)), Some(' '));
    }

    #[test]
    fn when_wrecked_then_input_is_ignored_until_reset() {
        let mut p = plane(0.0);
        p.hull_integrity = 0;
        let now = Instant::now();

        p.parse_keys(&[KeyPress::new(1, Some(Action::Shoot))], now);
        assert!(p.fired_cannon.is_empty());

        p.reset(now);
        p.parse_keys(&[KeyPress::new(1, Some(Action::Shoot))], now);
        assert_eq!(p.fired_cannon.len(), 1);
    }

    #[test]
    fn when_reset_then_spawn_hull_and_chamber_are_restored() {
        let mut p = plane(PI / 2.0);
        let now = Instant::now();
        for _ in 0..p.gun.capacity {
            p.parse_keys(&[KeyPress::new(1, Some(Action::Shoot))], now);
        }
        assert!(p.gun.is_reloading);
        p.body.coordinates = Vector::new(3.0, 70.0);
        p.body.change_pitch(true);
        p.hull_integrity = -20;
        p.body.for_deletion = true;

        p.reset(now);

        assert_eq!(p.body.coordinates, Vector::new(10.0, 10.0));
        assert_eq!(p.body.angle_of_attack, PI / 2.0);
        assert_eq!(p.hull_integrity, 100);
        assert!(!p.body.for_deletion);
        assert!(!p.gun.is_reloading);
        assert_eq!(p.gun.rounds_in_chamber, p.gun.capacity);
        assert!(p.fired_cannon.is_empty());
    }

    #[test]
    fn when_plane_flies_off_the_edge_then_it_wraps() {
        let arena = arena();
        let mut canvas = RecordingCanvas::default();
        let mut p = PlaneModel::P51.build(1, Spawn::new(Vector::new(10.0, 79.4), PI / 2.0));

        p.draw(&arena, &mut canvas, &[]);

        assert!(!p.body.for_deletion);
        assert!(arena.contains(p.body.cell()));
    }
}
