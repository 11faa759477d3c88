use std::sync::Mutex;

use dashmap::DashMap;

use crate::models::{ReconciliationLogEntry, Reminder};
use crate::types::ReminderId;

/// Reminder set plus the append-only reconciliation log.
///
/// Writes go through the single reconcile actor, so updates never race;
/// reads from other tasks see the state after the pipeline has drained.
pub struct ReminderBook {
    reminders: DashMap<ReminderId, Reminder>,
    log: Mutex<Vec<ReconciliationLogEntry>>,
}

impl ReminderBook {
    pub fn new() -> Self {
        Self {
            reminders: DashMap::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn load(&self, reminder: Reminder) {
        self.reminders.insert(reminder.id, reminder);
    }

    pub fn get(&self, id: ReminderId) -> Option<Reminder> {
        self.reminders.get(&id).map(|entry| entry.value().clone())
    }

    /// All reminders in id order.
    pub fn snapshot(&self) -> Vec<Reminder> {
        let mut reminders: Vec<Reminder> = self
            .reminders
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        reminders.sort_by_key(|reminder| reminder.id);
        reminders
    }

    /// Applies one reconciliation outcome: overwrites the changed reminders
    /// and appends their log entries.
    pub fn apply(&self, updated: Vec<Reminder>, entries: Vec<ReconciliationLogEntry>) {
        for reminder in updated {
            self.reminders.insert(reminder.id, reminder);
        }

        if !entries.is_empty() {
            let mut log = self
                .log
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            log.extend(entries);
        }
    }

    pub fn log_entries(&self) -> Vec<ReconciliationLogEntry> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for ReminderBook {
    fn default() -> Self {
        Self::new()
    }
}
