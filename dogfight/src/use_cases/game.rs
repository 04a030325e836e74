// Frame scheduler: advances every entity once per tick in a fixed order.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::domain::{AnimatedSprite, Arena, Cannon, Canvas, KeyPress, Plane, Player, PlayerId};

/// Simulation time derived from the tick count, so every client in a network
/// game sees the same instant on the same tick whatever its wall clock says.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    start: Instant,
    frame: Duration,
}

impl TickClock {
    pub fn new(start: Instant, frame: Duration) -> Self {
        Self { start, frame }
    }

    pub fn at(&self, tick: u64) -> Instant {
        let ticks = u32::try_from(tick).unwrap_or(u32::MAX);
        self.start + self.frame.saturating_mul(ticks)
    }
}

/// Everything that changes while a game is running.
#[derive(Debug)]
pub struct GameState {
    pub arena: Arena,
    pub players: Vec<Player>,
    pub cannons: Vec<Cannon>,
    pub animations: Vec<AnimatedSprite>,
    pub tick: u64,
    // Presses applied on the most recent tick, for the debug overlay.
    pub last_presses: Vec<KeyPress>,
}

impl GameState {
    pub fn new(arena: Arena, players: Vec<Player>) -> Self {
        Self {
            arena,
            players,
            cannons: Vec::new(),
            animations: Vec::new(),
            tick: 0,
            last_presses: Vec::new(),
        }
    }

    /// Runs one tick.
    ///
    /// Order matters: wrecks are reset before input so a destroyed plane never
    /// acts on the tick it is brought back, and cannon rounds move after planes
    /// so hits are tested against where the planes are now.
    pub fn next_frame(&mut self, presses: &[KeyPress], now: Instant, canvas: &mut dyn Canvas) {
        self.respawn_wrecks(now);

        for player in &mut self.players {
            player.plane.parse_keys(presses, now);
            self.cannons.append(&mut player.plane.fired_cannon);
        }

        for player in &mut self.players {
            player.plane.draw(&self.arena, canvas, &self.animations);
        }

        for player in &mut self.players {
            if player.plane.gun.is_reloading {
                player.plane.gun.reload_chamber(now, false);
            }
        }

        for player in &mut self.players {
            self.animations.append(&mut player.plane.animations);
        }

        self.cannons.retain(|c| !c.body.for_deletion);
        let mut planes: Vec<&mut Plane> = self.players.iter_mut().map(|p| &mut p.plane).collect();
        for cannon in &mut self.cannons {
            cannon.update(&self.arena, canvas, &mut planes);
        }

        self.animations.retain(|a| !a.for_deletion);
        for animation in &mut self.animations {
            animation.next_frame(&self.arena, canvas);
        }

        self.last_presses = presses.to_vec();
        self.tick += 1;
    }

    // Resets planes wrecked last tick and credits everyone else with the kill.
    fn respawn_wrecks(&mut self, now: Instant) {
        let wrecked: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.plane.body.for_deletion)
            .map(|p| p.player_id)
            .collect();

        for victim in wrecked {
            for player in &mut self.players {
                if player.player_id == victim {
                    player.plane.reset(now);
                    debug!(player_id = victim, tick = self.tick, "plane reset");
                } else {
                    player.kills += 1;
                    info!(
                        player_id = player.player_id,
                        victim,
                        kills = player.kills,
                        "kill credited"
                    );
                }
            }
        }
    }

    /// Final score line printed once the terminal is restored.
    pub fn summary(&self) -> String {
        match self.players.as_slice() {
            [a, b, ..] => format!(
                "Closed game... ({}) {}:{} ({})",
                a.callsign, a.kills, b.kills, b.callsign
            ),
            _ => "Closed game...".to_string(),
        }
    }
}
