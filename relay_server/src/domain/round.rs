use std::collections::{BTreeMap, HashSet, VecDeque};

use serde_json::Value;

use super::{ClientId, RelayError, SEATS};

// One tick's worth of client entries plus the clients it has been sent to.
#[derive(Debug, Default)]
pub struct Round {
    entries: BTreeMap<ClientId, Value>,
    sent_to: HashSet<ClientId>,
}

impl Round {
    pub fn is_full(&self) -> bool {
        self.entries.len() == SEATS
    }

    pub fn holds(&self, client_id: &str) -> bool {
        self.entries.contains_key(client_id)
    }

    pub fn clients(&self) -> impl Iterator<Item = &ClientId> {
        self.entries.keys()
    }

    pub fn was_sent_to(&self, client_id: &str) -> bool {
        self.sent_to.contains(client_id)
    }

    pub fn mark_sent(&mut self, client_id: &str) {
        if self.holds(client_id) {
            self.sent_to.insert(client_id.to_string());
        }
    }

    pub fn fully_sent(&self) -> bool {
        self.entries.keys().all(|id| self.sent_to.contains(id))
    }

    // The merged `{client_id: payload, ...}` broadcast for this round.
    pub fn encode(&self) -> String {
        let merged: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(id, payload)| (id.clone(), payload.clone()))
            .collect();
        Value::Object(merged).to_string()
    }
}

// FIFO of rounds. A client that runs ahead queues its entries in later rounds
// instead of overwriting the one its opponent has not answered yet.
#[derive(Debug, Default)]
pub struct RoundQueue {
    rounds: VecDeque<Round>,
}

impl RoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // Store the entry in the oldest round that does not hold this client yet.
    pub fn submit(&mut self, client_id: &str, payload: Value) -> Result<(), RelayError> {
        let index = match self.rounds.iter().position(|r| !r.holds(client_id)) {
            Some(index) => index,
            None => {
                self.rounds.push_back(Round::default());
                self.rounds.len() - 1
            }
        };

        let round = &mut self.rounds[index];
        if round.is_full() {
            return Err(RelayError::RoundFull);
        }
        round.entries.insert(client_id.to_string(), payload);
        Ok(())
    }

    // The oldest round, once every seat has an entry in it.
    pub fn ready(&mut self) -> Option<&mut Round> {
        self.rounds.front_mut().filter(|round| round.is_full())
    }

    // Drop the front round once all its clients have received it.
    pub fn pop_sent(&mut self) -> bool {
        match self.rounds.front() {
            Some(round) if round.is_full() && round.fully_sent() => {
                self.rounds.pop_front();
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}
