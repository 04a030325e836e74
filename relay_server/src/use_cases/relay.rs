use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::domain::{ClientId, Pairing, RelayError, RoundQueue};
use crate::use_cases::types::{ConnId, RelayEvent};

const LOG_THROTTLE: Duration = Duration::from_secs(2);

// A merged frame to write to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub conn_id: ConnId,
    pub text: Arc<str>,
}

// All relay state. Owned by a single task, so no locking.
#[derive(Debug, Default)]
pub struct Relay {
    pairing: Pairing,
    rounds: RoundQueue,
    // Connection to the client id it announced, once it has spoken.
    clients: HashMap<ConnId, Option<ClientId>>,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, conn_id: ConnId) {
        self.clients.insert(conn_id, None);
    }

    // Queue a client frame and return whatever rounds it completed.
    pub fn handle_frame(
        &mut self,
        conn_id: ConnId,
        frame: BTreeMap<ClientId, Value>,
    ) -> Result<Vec<Delivery>, RelayError> {
        let Some(bound) = self.clients.get(&conn_id) else {
            debug!(conn_id, "frame from unknown connection; ignoring");
            return Ok(Vec::new());
        };

        let count = frame.len();
        let mut entries = frame.into_iter();
        let (Some((client_id, payload)), None) = (entries.next(), entries.next()) else {
            return Err(RelayError::UnexpectedEntries { count });
        };

        if let Some(expected) = bound
            && *expected != client_id
        {
            return Err(RelayError::IdentityChanged {
                expected: expected.clone(),
                got: client_id,
            });
        }
        let first_frame = bound.is_none();

        self.pairing.admit(&client_id)?;
        self.rounds.submit(&client_id, payload)?;

        if first_frame {
            if let Some(slot) = self.pairing.slot_of(&client_id) {
                info!(conn_id, client_id = %client_id, slot, "pairing complete");
            }
            self.clients.insert(conn_id, Some(client_id));
        }

        Ok(self.pump())
    }

    // Forget a connection. Once nobody is left the relay is ready for a new game.
    pub fn disconnect(&mut self, conn_id: ConnId) {
        if let Some(Some(client_id)) = self.clients.remove(&conn_id)
            && self.pairing.contains(&client_id)
        {
            warn!(conn_id, client_id = %client_id, "paired client left; game cannot continue");
        }

        if self.clients.is_empty() {
            self.pairing = Pairing::new();
            self.rounds = RoundQueue::new();
            debug!("no connections left; relay reset");
        }
    }

    // Send every complete round at the front of the queue to the clients that
    // have not had it yet. Stops at the first round someone cannot receive.
    fn pump(&mut self) -> Vec<Delivery> {
        let mut deliveries = Vec::new();

        while let Some(round) = self.rounds.ready() {
            let text: Arc<str> = Arc::from(round.encode());
            let pending: Vec<ClientId> = round
                .clients()
                .filter(|id| !round.was_sent_to(id))
                .cloned()
                .collect();

            for client_id in pending {
                if let Some(conn_id) = conn_for(&self.clients, &client_id) {
                    deliveries.push(Delivery {
                        conn_id,
                        text: Arc::clone(&text),
                    });
                    round.mark_sent(&client_id);
                }
            }

            if !self.rounds.pop_sent() {
                break;
            }
        }

        deliveries
    }
}

fn conn_for(clients: &HashMap<ConnId, Option<ClientId>>, client_id: &str) -> Option<ConnId> {
    clients
        .iter()
        .find(|(_, bound)| bound.as_deref() == Some(client_id))
        .map(|(conn_id, _)| *conn_id)
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

// The relay task: consumes connection events in order and fans merged rounds
// out to each connection's outbound queue.
pub async fn relay_task(mut events: mpsc::Receiver<RelayEvent>) {
    let mut relay = Relay::new();
    let mut outbound: HashMap<ConnId, mpsc::Sender<Arc<str>>> = HashMap::new();
    let mut last_reject_log = Instant::now() - LOG_THROTTLE;
    let mut last_full_log = Instant::now() - LOG_THROTTLE;

    while let Some(event) = events.recv().await {
        match event {
            RelayEvent::Connected {
                conn_id,
                outbound: tx,
            } => {
                relay.connect(conn_id);
                outbound.insert(conn_id, tx);
            }
            RelayEvent::Frame { conn_id, frame } => match relay.handle_frame(conn_id, frame) {
                Ok(deliveries) => {
                    for Delivery { conn_id, text } in deliveries {
                        let Some(tx) = outbound.get(&conn_id) else {
                            continue;
                        };
                        match tx.try_send(text) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => {
                                if should_log(&mut last_full_log) {
                                    warn!(conn_id, "outbound queue full; dropping round");
                                }
                            }
                            Err(TrySendError::Closed(_)) => {
                                debug!(conn_id, "outbound queue closed");
                            }
                        }
                    }
                }
                Err(RelayError::NotPaired { client_id }) => {
                    warn!(conn_id, client_id = %client_id, "relay already paired; closing connection");
                    outbound.remove(&conn_id);
                    relay.disconnect(conn_id);
                }
                Err(error) => {
                    if should_log(&mut last_reject_log) {
                        warn!(conn_id, ?error, "rejected frame");
                    }
                }
            },
            RelayEvent::Disconnected { conn_id } => {
                outbound.remove(&conn_id);
                relay.disconnect(conn_id);
            }
        }
    }

    info!("relay task stopped");
}
