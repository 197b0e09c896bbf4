use chrono::Local;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::StorageSettings;
use crate::domain::EventRecord;
use crate::errors::RegistryError;
use crate::store::Store;

/// Persisted shape of the registry document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    pub events: Vec<EventRecord>,
    pub next_event_num: u32,
}

impl Default for RegistryDocument {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            next_event_num: 1,
        }
    }
}

/// Assigns stable sequential numbers to remote events
pub struct EventRegistry {
    store: Store,
    storage: StorageSettings,
    document: RegistryDocument,
}

impl EventRegistry {
    /// Load the registry document, or start an empty one
    pub fn open(store: Store, storage: StorageSettings) -> Result<Self, RegistryError> {
        let document = store
            .load_json(&storage.registry_file)?
            .unwrap_or_default();
        Ok(Self {
            store,
            storage,
            document,
        })
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.document.events
    }

    pub fn next_event_num(&self) -> u32 {
        self.document.next_event_num
    }

    pub fn get_event_by_id(&self, event_id: &str) -> Option<&EventRecord> {
        self.document.events.iter().find(|e| e.event_id == event_id)
    }

    /// Number for `event_id`, registering it on first sight.
    ///
    /// Re-registering returns the existing number and leaves the stored
    /// record untouched, even when `num_rounds` differs.
    pub fn register(&mut self, event_id: &str, num_rounds: u32, name: &str) -> Result<u32, RegistryError> {
        if let Some(existing) = self.get_event_by_id(event_id) {
            warn!(
                "Event {} already exists as event #{}",
                event_id, existing.event_num
            );
            return Ok(existing.event_num);
        }

        let event_num = self.document.next_event_num;
        let next = event_num.checked_add(1).ok_or(RegistryError::Exhausted)?;

        let name = if name.trim().is_empty() {
            format!("Event {}", event_num)
        } else {
            name.trim().to_string()
        };

        let mut document = self.document.clone();
        document.events.push(EventRecord {
            event_num,
            event_id: event_id.to_string(),
            name,
            num_rounds,
            scraped_date: Local::now().naive_local(),
            csv_file: self.storage.event_file(event_num),
        });
        document.next_event_num = next;

        self.store.save_json(&self.storage.registry_file, &document)?;
        self.document = document;

        info!("Registered new event #{}: {}", event_num, event_id);
        Ok(event_num)
    }
}
