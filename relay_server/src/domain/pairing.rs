use std::collections::BTreeSet;

use super::{ClientId, RelayError, SEATS};

// The clients admitted to the current game. Slots follow lexicographic id
// order, so they do not depend on who connected first.
#[derive(Debug, Default)]
pub struct Pairing {
    clients: BTreeSet<ClientId>,
}

impl Pairing {
    pub fn new() -> Self {
        Self::default()
    }

    // Admit a client while seats remain; known clients are always accepted.
    pub fn admit(&mut self, client_id: &str) -> Result<(), RelayError> {
        if self.clients.contains(client_id) {
            return Ok(());
        }
        if self.clients.len() >= SEATS {
            return Err(RelayError::NotPaired {
                client_id: client_id.to_string(),
            });
        }
        self.clients.insert(client_id.to_string());
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.clients.len() == SEATS
    }

    pub fn contains(&self, client_id: &str) -> bool {
        self.clients.contains(client_id)
    }

    // 1-based starting slot, known once the pairing is complete.
    pub fn slot_of(&self, client_id: &str) -> Option<u8> {
        if !self.is_complete() {
            return None;
        }
        self.clients
            .iter()
            .position(|id| id == client_id)
            .and_then(|index| u8::try_from(index + 1).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_ids_arrive_in_either_order_then_smaller_id_gets_slot_one() {
        for order in [["a1", "b2"], ["b2", "a1"]] {
            let mut pairing = Pairing::new();
            for id in order {
                pairing.admit(id).expect("seat available");
            }

            assert_eq!(pairing.slot_of("a1"), Some(1));
            assert_eq!(pairing.slot_of("b2"), Some(2));
        }
    }

    #[test]
    fn when_pairing_is_full_then_third_client_is_rejected() {
        let mut pairing = Pairing::new();
        pairing.admit("a1").expect("seat");
        assert_eq!(pairing.slot_of("a1"), None);
        pairing.admit("b2").expect("seat");

        assert!(pairing.admit("a1").is_ok());
        assert_eq!(
            pairing.admit("c3"),
            Err(RelayError::NotPaired {
                client_id: "c3".into()
            })
        );
        assert!(!pairing.contains("c3"));
    }
}
