// Seating: turns two recruits into players with planes on their start marks.

use std::f64::consts::PI;

use crate::domain::{Arena, PlaneModel, Player, PlayerId, Spawn, Vector};
use crate::use_cases::types::Recruit;

/// Start mark for a 1-based slot. Slot 1 sits a quarter of the way in from
/// the right heading right; every other slot mirrors it from the left, so
/// the two open on opposite sides of the wrap seam.
pub fn spawn_for_slot(arena: &Arena, slot: PlayerId) -> Spawn {
    let height = arena.bottom - arena.top;
    let width = arena.right - arena.left;
    let row = (arena.top + height / 2) as f64;

    if slot == 1 {
        Spawn::new(Vector::new(row, (arena.right - width / 4) as f64), PI / 2.0)
    } else {
        Spawn::new(Vector::new(row, (arena.left + width / 4) as f64), -PI / 2.0)
    }
}

/// Seats recruits in order; the first recruit gets slot 1.
pub fn provision_players(arena: &Arena, recruits: &[Recruit]) -> Vec<Player> {
    recruits
        .iter()
        .zip(1..)
        .map(|(recruit, slot)| {
            let plane = recruit.plane.build(slot, spawn_for_slot(arena, slot));
            Player::new(slot, recruit.callsign.clone(), plane)
        })
        .collect()
}

/// Seats for a two-player game where neither side picked anything.
pub fn default_recruits() -> [Recruit; 2] {
    [
        Recruit::new("Maverick", PlaneModel::P51),
        Recruit::new("Red Baron", PlaneModel::Bf109),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::new(0, 0, 20, 80).expect("valid arena")
    }

    #[test]
    fn when_slots_are_assigned_then_planes_fly_apart_towards_the_seam() {
        let one = spawn_for_slot(&arena(), 1);
        let two = spawn_for_slot(&arena(), 2);

        assert_eq!(one.coordinates, Vector::new(10.0, 60.0));
        assert_eq!(two.coordinates, Vector::new(10.0, 20.0));
        assert_eq!(one.angle, PI / 2.0);
        assert_eq!(two.angle, -PI / 2.0);
    }

    #[test]
    fn when_recruits_are_provisioned_then_ids_follow_recruit_order() {
        let players = provision_players(&arena(), &default_recruits());

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].player_id, 1);
        assert_eq!(players[0].plane.plane_id, 1);
        assert_eq!(players[0].callsign, "Maverick");
        assert_eq!(players[1].player_id, 2);
        assert_eq!(players[1].plane.model, PlaneModel::Bf109);
        assert!(players.iter().all(|p| p.ready && p.kills == 0));
    }
}
