// Input sources: both seats on one keyboard, or one seat here and one across
// the relay.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{InputError, InputSource, Key, KeyPress, PlaneModel, PlayerId};
use crate::interface_adapters::net::{NetError, Transport};
use crate::interface_adapters::protocol::{
    ClientId, JoinPayload, Payload, RelayFrame, action_frame, action_of, join_frame,
};
use crate::use_cases::{Recruit, Yoke, local_yokes, route_key};

const LOG_THROTTLE: Duration = Duration::from_secs(2);

pub struct LocalInput {
    yokes: Vec<Yoke>,
}

impl LocalInput {
    pub fn new() -> Self {
        Self {
            yokes: local_yokes(),
        }
    }
}

impl Default for LocalInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputSource for LocalInput {
    async fn exchange(&mut self, key: Option<Key>) -> Result<Vec<KeyPress>, InputError> {
        Ok(route_key(key, &self.yokes))
    }

    async fn close(&mut self) {}
}

/// A seat as agreed during bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub client_id: ClientId,
    pub slot: PlayerId,
    pub recruit: Recruit,
}

/// Lockstep input over the relay. Each exchange sends the local action and
/// waits for the merged frame holding both clients' actions for the tick.
pub struct NetworkInput {
    transport: Transport,
    client_id: ClientId,
    yoke: Yoke,
    // Client id to slot, sorted by id.
    slots: BTreeMap<ClientId, PlayerId>,
    last_timeout_log: Instant,
}

impl NetworkInput {
    /// Announces `recruit` once and waits for the relay to pair us.
    ///
    /// Returns the input source, every seat in slot order, and our own slot.
    pub async fn connect(
        mut transport: Transport,
        client_id: ClientId,
        recruit: &Recruit,
        bootstrap_timeout: Duration,
    ) -> Result<(Self, Vec<Seat>, PlayerId), NetError> {
        let join = join_frame(&client_id, JoinPayload::from(recruit));
        if !transport.send(&join).await? {
            return Err(NetError::BootstrapTimeout);
        }
        info!(client_id = %client_id, "waiting for an opponent");

        let pairing = tokio::time::timeout(bootstrap_timeout, await_pairing(&mut transport, &client_id))
            .await
            .map_err(|_| NetError::BootstrapTimeout)??;

        let seats = seats_from(pairing);
        let local_slot = seats
            .iter()
            .find(|seat| seat.client_id == client_id)
            .map(|seat| seat.slot)
            .ok_or(NetError::BootstrapTimeout)?;
        let slots = seats.iter().map(|s| (s.client_id.clone(), s.slot)).collect();
        info!(client_id = %client_id, slot = local_slot, "paired");

        let input = Self {
            transport,
            client_id,
            yoke: Yoke::player_one(local_slot),
            slots,
            last_timeout_log: Instant::now() - LOG_THROTTLE,
        };
        Ok((input, seats, local_slot))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn presses_from(&self, frame: Option<&RelayFrame>) -> Vec<KeyPress> {
        self.slots
            .iter()
            .map(|(client_id, slot)| {
                KeyPress::new(*slot, frame.and_then(|f| action_of(f, client_id)))
            })
            .collect()
    }
}

// The first two-entry frame that includes us is the pairing broadcast.
async fn await_pairing(transport: &mut Transport, client_id: &str) -> Result<RelayFrame, NetError> {
    loop {
        match transport.receive().await? {
            Some(frame) if frame.len() == 2 && frame.contains_key(client_id) => return Ok(frame),
            Some(frame) => debug!(entries = frame.len(), "ignoring frame before pairing"),
            None => {}
        }
    }
}

// Slot order is lexicographic client id order, whatever order clients joined in.
fn seats_from(frame: RelayFrame) -> Vec<Seat> {
    frame
        .into_iter()
        .zip(1..)
        .map(|((client_id, payload), slot)| {
            let recruit = match payload {
                Some(Payload::Join(join)) => Recruit::from(join),
                _ => Recruit::new(format!("pilot-{slot}"), PlaneModel::default()),
            };
            Seat {
                client_id,
                slot,
                recruit,
            }
        })
        .collect()
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

#[async_trait]
impl InputSource for NetworkInput {
    async fn exchange(&mut self, key: Option<Key>) -> Result<Vec<KeyPress>, InputError> {
        let action = key.and_then(|k| self.yoke.action_for(k));
        let sent = self
            .transport
            .send(&action_frame(&self.client_id, action))
            .await?;
        if !sent && should_log(&mut self.last_timeout_log) {
            warn!("input send timed out; tick input lost");
        }

        match self.transport.receive().await? {
            Some(frame) => Ok(self.presses_from(Some(&frame))),
            None => {
                // Indistinguishable from a tick where nobody pressed anything.
                if should_log(&mut self.last_timeout_log) {
                    warn!("no merged frame within timeout; treating tick as idle");
                }
                Ok(self.presses_from(None))
            }
        }
    }

    async fn close(&mut self) {
        self.transport.close().await;
    }
}
