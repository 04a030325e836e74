use std::env;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 51515;

// Connection events waiting for the relay task.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

// Merged rounds queued per connection before new ones are dropped.
pub fn outbound_capacity() -> usize {
    env::var("RELAY_OUTBOUND_CAPACITY")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|capacity| *capacity > 0)
        .unwrap_or(64)
}
