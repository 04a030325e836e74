pub mod relay;
pub mod types;

pub use relay::{Delivery, Relay, relay_task};
pub use types::{ConnId, RelayEvent};
