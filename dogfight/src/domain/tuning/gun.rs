use std::time::Duration;

/// Gameplay tuning for a plane's cannon.
#[derive(Debug, Clone, Copy)]
pub struct GunTuning {
    /// Rounds available before the chamber has to be reloaded.
    pub capacity: u32,

    /// Time after the last round before the chamber refills.
    pub reload_time: Duration,

    /// Hull integrity removed by each round that connects.
    pub damage: i32,

    /// Cells travelled per tick by a fired round.
    pub round_speed: f64,
}

impl Default for GunTuning {
    fn default() -> Self {
        Self {
            capacity: 10,
            reload_time: Duration::from_secs(3),
            damage: 20,
            round_speed: 1.0,
        }
    }
}
