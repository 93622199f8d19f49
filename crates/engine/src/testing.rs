//! In-memory stand-in for the Spliit service.
//!
//! Enabled for this crate's tests and, through the `testing` feature, for
//! downstream crates that need a [`Connector`] without a network.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use api_types::group::{Category, Participant};

use crate::{
    EngineError, ResultEngine,
    client::{ClientConfig, Connector, ExpenseClient, NewExpense},
};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct RemoteFailure(pub String);

#[derive(Debug, Default)]
struct State {
    participants: HashMap<String, Vec<Participant>>,
    categories: Vec<Category>,
    expenses: Vec<NewExpense>,
    connects: Vec<ClientConfig>,
    participant_calls: usize,
    fail_participants: bool,
    fail_add_expense: Option<String>,
}

/// Shared fake service. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `(id, display_name)` participants to `group_id`.
    pub fn with_participants(self, group_id: &str, participants: &[(&str, &str)]) -> Self {
        self.lock()
            .participants
            .entry(group_id.to_string())
            .or_default()
            .extend(participants.iter().map(|(id, name)| Participant {
                id: id.to_string(),
                display_name: name.to_string(),
            }));
        self
    }

    pub fn with_category(self, id: i64, grouping: &str, name: &str) -> Self {
        self.lock().categories.push(Category {
            id,
            grouping: grouping.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn fail_participants(&self, fail: bool) {
        self.lock().fail_participants = fail;
    }

    pub fn fail_add_expense(&self, message: &str) {
        self.lock().fail_add_expense = Some(message.to_string());
    }

    /// Expenses accepted so far, in submission order.
    pub fn expenses(&self) -> Vec<NewExpense> {
        self.lock().expenses.clone()
    }

    /// Every config a client was built from.
    pub fn connects(&self) -> Vec<ClientConfig> {
        self.lock().connects.clone()
    }

    pub fn participant_calls(&self) -> usize {
        self.lock().participant_calls
    }
}

impl Connector for MemoryBackend {
    type Client = MemoryClient;

    fn connect(&self, config: &ClientConfig) -> ResultEngine<MemoryClient> {
        self.lock().connects.push(config.clone());
        Ok(MemoryClient {
            backend: self.clone(),
            config: config.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MemoryClient {
    backend: MemoryBackend,
    config: ClientConfig,
}

impl MemoryClient {
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

impl ExpenseClient for MemoryClient {
    async fn participants(&self) -> ResultEngine<Vec<Participant>> {
        let mut state = self.backend.lock();
        state.participant_calls += 1;
        if state.fail_participants {
            return Err(EngineError::remote(RemoteFailure(
                "participants unavailable".to_string(),
            )));
        }
        Ok(state
            .participants
            .get(&self.config.group_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn categories(&self) -> ResultEngine<Vec<Category>> {
        Ok(self.backend.lock().categories.clone())
    }

    async fn add_expense(&self, expense: &NewExpense) -> ResultEngine<String> {
        let mut state = self.backend.lock();
        if let Some(message) = state.fail_add_expense.clone() {
            return Err(EngineError::remote(RemoteFailure(message)));
        }
        state.expenses.push(expense.clone());
        Ok(format!("expense-{}", state.expenses.len()))
    }
}
