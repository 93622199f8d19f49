//! Configured Spliit groups, keyed by entry id.
//!
//! The registry is owned by the hosting application and shared with the
//! action handler. Reads clone an [`Arc`] out of the table so no lock is held
//! while talking to the remote service.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    ACTION_NAME, EngineError, ResultEngine,
    client::{ClientConfig, Connector, DEFAULT_BASE_URL},
};

/// Public description of a configuration entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub entry_id: String,
    pub group_id: String,
    pub base_url: String,
    pub title: String,
}

/// An entry together with the client bound to it.
#[derive(Debug)]
pub struct ConfiguredEntry<C> {
    pub entry: Entry,
    pub client: C,
}

struct Table<C> {
    entries: Vec<Arc<ConfiguredEntry<C>>>,
    action_registered: bool,
}

pub struct Registry<K: Connector> {
    connector: K,
    table: RwLock<Table<K::Client>>,
}

impl<K: Connector> Registry<K> {
    pub fn new(connector: K) -> Self {
        Self {
            connector,
            table: RwLock::new(Table {
                entries: Vec::new(),
                action_registered: false,
            }),
        }
    }

    /// Validates the input, builds a client and stores the new entry.
    ///
    /// The first successful setup registers the action.
    pub async fn setup(&self, group_id: &str, base_url: Option<&str>) -> ResultEngine<Entry> {
        let group_id = validate_group_id(group_id)?;
        let base_url = normalize_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?;

        let mut table = self.table.write().await;
        if table.entries.iter().any(|e| e.entry.group_id == group_id) {
            return Err(EngineError::ExistingKey(group_id));
        }

        let client = self
            .connector
            .connect(&ClientConfig::new(group_id.clone(), base_url.clone()))?;
        let entry = Entry {
            entry_id: Uuid::new_v4().to_string(),
            title: format!("Spliit ({group_id})"),
            group_id,
            base_url,
        };
        table.entries.push(Arc::new(ConfiguredEntry {
            entry: entry.clone(),
            client,
        }));
        tracing::info!(
            "configured entry {} for group {} at {}",
            entry.entry_id,
            entry.group_id,
            entry.base_url
        );

        if !table.action_registered {
            table.action_registered = true;
            tracing::info!("registered action {ACTION_NAME}");
        }
        Ok(entry)
    }

    /// Drops the entry and its client. Removing the last entry unregisters the action.
    pub async fn teardown(&self, entry_id: &str) -> ResultEngine<()> {
        let mut table = self.table.write().await;
        let position = table
            .entries
            .iter()
            .position(|e| e.entry.entry_id == entry_id)
            .ok_or_else(|| EngineError::KeyNotFound(entry_id.to_string()))?;
        let removed = table.entries.remove(position);
        tracing::info!(
            "removed entry {} for group {}",
            removed.entry.entry_id,
            removed.entry.group_id
        );

        if table.entries.is_empty() && table.action_registered {
            table.action_registered = false;
            tracing::info!("unregistered action {ACTION_NAME}");
        }
        Ok(())
    }

    /// Replaces the server URL of an entry and reconnects its client.
    pub async fn update_options(&self, entry_id: &str, base_url: &str) -> ResultEngine<Entry> {
        let base_url = normalize_base_url(base_url)?;

        let mut table = self.table.write().await;
        let slot = table
            .entries
            .iter_mut()
            .find(|e| e.entry.entry_id == entry_id)
            .ok_or_else(|| EngineError::KeyNotFound(entry_id.to_string()))?;

        let client = self.connector.connect(&ClientConfig::new(
            slot.entry.group_id.clone(),
            base_url.clone(),
        ))?;
        let entry = Entry {
            base_url,
            ..slot.entry.clone()
        };
        *slot = Arc::new(ConfiguredEntry {
            entry: entry.clone(),
            client,
        });
        tracing::info!("reloaded entry {} against {}", entry.entry_id, entry.base_url);
        Ok(entry)
    }

    /// Snapshot of configured entries, in configuration order.
    pub async fn entries(&self) -> Vec<Entry> {
        let table = self.table.read().await;
        table.entries.iter().map(|e| e.entry.clone()).collect()
    }

    pub async fn is_action_registered(&self) -> bool {
        self.table.read().await.action_registered
    }

    /// Picks the entry an action runs against: the named one, or the first configured.
    pub async fn select(
        &self,
        config_entry_id: Option<&str>,
    ) -> ResultEngine<Arc<ConfiguredEntry<K::Client>>> {
        let table = self.table.read().await;
        match config_entry_id {
            Some(id) => table
                .entries
                .iter()
                .find(|e| e.entry.entry_id == id)
                .cloned()
                .ok_or_else(|| EngineError::KeyNotFound(format!("config_entry_id {id}"))),
            None => table
                .entries
                .first()
                .cloned()
                .ok_or_else(|| EngineError::KeyNotFound("config_entry_id".to_string())),
        }
    }
}

fn validate_group_id(group_id: &str) -> ResultEngine<String> {
    let trimmed = group_id.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(
            "group_id must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Checks the scheme and strips trailing slashes.
pub fn normalize_base_url(base_url: &str) -> ResultEngine<String> {
    let trimmed = base_url.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| {
            EngineError::InvalidInput("base_url must start with http:// or https://".to_string())
        })?;
    if rest.trim_end_matches('/').is_empty() {
        return Err(EngineError::InvalidInput(
            "base_url must include a host".to_string(),
        ));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
