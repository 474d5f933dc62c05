// Application state threaded through every operation

use std::collections::BTreeMap;

use crate::catalog::{default_trains, Train, MAX_SEATS};
use crate::reservation::Passenger;
use crate::transaction_log::TransactionLog;

#[derive(Debug, Clone)]
pub struct AppState {
    pub trains: Vec<Train>,
    pub passengers: Vec<Passenger>,
    // Keyed by free-text train name, not checked against the catalog
    pub train_delays: BTreeMap<String, bool>,
    pub transactions: TransactionLog,
    pub next_ticket_id: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_trains(default_trains(MAX_SEATS))
    }
}

impl AppState {
    pub fn with_trains(trains: Vec<Train>) -> Self {
        Self {
            trains,
            passengers: vec![],
            train_delays: BTreeMap::new(),
            transactions: TransactionLog::new(),
            next_ticket_id: 1,
        }
    }

    // `train_no` is the 1-based number shown in the train table
    pub fn train(&self, train_no: usize) -> Option<&Train> {
        train_no.checked_sub(1).and_then(|i| self.trains.get(i))
    }

    pub fn train_mut(&mut self, train_no: usize) -> Option<&mut Train> {
        train_no.checked_sub(1).and_then(|i| self.trains.get_mut(i))
    }

    pub fn issue_ticket_id(&mut self) -> u32 {
        let id = self.next_ticket_id;
        self.next_ticket_id += 1;
        id
    }
}
