// Domain-level errors for the simulation and its ports.

#[derive(Debug)]
pub enum ArenaError {
    // Border-to-border distances that were too small to play in.
    TooSmall { rows: i64, cols: i64 },
}

// Failures surfaced by an input source while exchanging a tick's keys.
#[derive(Debug)]
pub enum InputError {
    // The peer or relay went away; the session cannot continue.
    Disconnected,
    Transport(String),
}
