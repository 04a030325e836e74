// Text for the info boxes around the arena. Layout and painting live in the
// terminal adapter; this only decides what each line says.

use crate::domain::{KeyPress, Player};
use crate::use_cases::GameState;

/// Rows inside a box, excluding its border.
pub const BOX_LINES: usize = 4;

fn line(label: &str, value: impl std::fmt::Display) -> String {
    format!("{label: <15}: {value: <15}")
}

pub fn player_lines(player: &Player) -> [String; BOX_LINES] {
    let gun = &player.plane.gun;
    let ammo = if gun.is_reloading {
        "RELOADING".to_string()
    } else {
        format!("{}/{}", gun.rounds_in_chamber, gun.capacity)
    };

    [
        line("callsign", format!("{} ({})", player.callsign, player.plane.model)),
        line("kills", player.kills),
        line("hull", player.plane.hull_integrity.max(0)),
        line("ammo", ammo),
    ]
}

fn describe_presses(presses: &[KeyPress]) -> String {
    presses
        .iter()
        .map(|p| match p.action {
            Some(action) => format!("{}:{}", p.player_id, action.as_str()),
            None => format!("{}:-", p.player_id),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Overlay shown with `--debug`.
pub fn debug_lines(state: &GameState) -> [String; BOX_LINES] {
    let integrity = state
        .players
        .iter()
        .map(|p| p.plane.hull_integrity.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    [
        line("keys pressed", describe_presses(&state.last_presses)),
        line("cannon in play", state.cannons.len()),
        line("animations", state.animations.len()),
        line("integrity", format!("{integrity} @ tick {}", state.tick)),
    ]
}
