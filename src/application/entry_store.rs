// The entry store owns every employee's salary history.
//
// Responsibilities
// - Load the whole ledger from storage on every operation; there is no cache between calls.
// - Answer exact, latest and latest-before queries over a chronologically sorted copy.
// - Upsert by month with a shallow field merge, then persist the whole ledger.
//
// Consistency
// - Each operation is load, compute, then persist if it mutated. Nothing locks across the pair,
//   so two writers race and the last full-ledger write wins.
// - Unreadable stored content, or content that is not a JSON object, reads as an empty ledger.
//   Inside a well-formed object, damage is contained per history and per entry and only logged.

use crate::application::errors::StoreError;
use crate::application::prefill::{Prefill, PrefillMode};
use crate::config::{DEFAULT_STORAGE_KEY, StoreConfig};
use crate::core::ports::KeyValueStorage;
use crate::core::resolution::{resolve_latest_before, sort_history};
use crate::core::salary_entry::SalaryEntry;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Employee id to that employee's entries, as persisted.
pub type SalaryLedger = BTreeMap<String, Vec<SalaryEntry>>;

pub struct EntryStore<S: KeyValueStorage> {
    storage: S,
    storage_key: String,
}

impl<S: KeyValueStorage> EntryStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn with_config(storage: S, config: &StoreConfig) -> Self {
        Self {
            storage,
            storage_key: config.storage_key.clone(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Raw snapshot of the stored ledger, histories in stored order.
    pub fn get_all(&self) -> SalaryLedger {
        self.load()
    }

    /// The employee's entries sorted ascending by month, malformed months first.
    pub fn get_entries(&self, employee_id: &str) -> Vec<SalaryEntry> {
        if employee_id.is_empty() {
            return Vec::new();
        }
        let mut entries = self.load().remove(employee_id).unwrap_or_default();
        sort_history(&mut entries);
        entries
    }

    /// Exact match on the month string.
    pub fn get_entry(&self, employee_id: &str, month: &str) -> Option<SalaryEntry> {
        if month.is_empty() {
            return None;
        }
        self.get_entries(employee_id)
            .into_iter()
            .find(|entry| entry.month == month)
    }

    pub fn get_latest(&self, employee_id: &str) -> Option<SalaryEntry> {
        self.get_entries(employee_id).pop()
    }

    /// The entry with the greatest month strictly before `month`. Falls back to the latest entry
    /// when `month` is malformed or no stored month is earlier.
    pub fn get_latest_before(&self, employee_id: &str, month: &str) -> Option<SalaryEntry> {
        let entries = self.get_entries(employee_id);
        resolve_latest_before(&entries, month).entry().cloned()
    }

    /// Inserts the entry, or merges it onto the stored entry for the same month, then persists the
    /// whole ledger. Returns `entry` as given.
    pub fn save_entry(
        &self,
        employee_id: &str,
        entry: SalaryEntry,
    ) -> Result<SalaryEntry, StoreError> {
        if employee_id.is_empty() {
            return Err(StoreError::InvalidArgument(
                "employee id is required".to_string(),
            ));
        }
        if entry.month.is_empty() {
            return Err(StoreError::InvalidArgument(
                "entry month is required".to_string(),
            ));
        }

        let mut ledger = self.load();
        let history = ledger.entry(employee_id.to_string()).or_default();
        let merged = match history.iter_mut().find(|stored| stored.month == entry.month) {
            Some(stored) => {
                stored.merge(entry.clone());
                true
            }
            None => {
                history.push(entry.clone());
                false
            }
        };
        sort_history(history);
        self.persist(&ledger)?;

        info!(employee_id, month = %entry.month, merged, "salary entry saved");
        Ok(entry)
    }

    /// Form prefill for `month`. An exact entry is returned whole. Otherwise only base fields are
    /// carried forward from the latest-before reference, or from `baseline` when the employee has
    /// no history.
    pub fn prefill(
        &self,
        employee_id: &str,
        month: &str,
        baseline: Option<&SalaryEntry>,
    ) -> Prefill {
        let entries = self.get_entries(employee_id);
        let exact = entries
            .iter()
            .find(|entry| !month.is_empty() && entry.month == month);
        if let Some(existing) = exact {
            return Prefill {
                mode: PrefillMode::Existing,
                entry: existing.clone(),
            };
        }

        match resolve_latest_before(&entries, month).entry().or(baseline) {
            Some(reference) => Prefill {
                mode: PrefillMode::CarriedForward {
                    source_month: reference.month.clone(),
                },
                entry: reference.carry_forward(month),
            },
            None => Prefill {
                mode: PrefillMode::Blank,
                entry: SalaryEntry::blank(month),
            },
        }
    }

    fn load(&self) -> SalaryLedger {
        let bytes = match self.storage.read(&self.storage_key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return SalaryLedger::new(),
            Err(err) => {
                warn!(storage_key = %self.storage_key, error = %err, "ledger unreadable, treating as empty");
                return SalaryLedger::new();
            }
        };
        let root = match serde_json::from_slice::<Map<String, Value>>(&bytes) {
            Ok(root) => root,
            Err(err) => {
                warn!(storage_key = %self.storage_key, error = %err, "ledger corrupt, treating as empty");
                return SalaryLedger::new();
            }
        };
        let ledger = decode_ledger(root);
        debug!(storage_key = %self.storage_key, employees = ledger.len(), "ledger loaded");
        ledger
    }

    fn persist(&self, ledger: &SalaryLedger) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(ledger)?;
        self.storage.write(&self.storage_key, &bytes)?;
        debug!(storage_key = %self.storage_key, employees = ledger.len(), "ledger persisted");
        Ok(())
    }
}

/// Decodes each employee's history on its own, so a malformed history or entry only costs itself.
/// Entries that are not objects are dropped; fields of the wrong type are read as empty.
fn decode_ledger(root: Map<String, Value>) -> SalaryLedger {
    let mut ledger = SalaryLedger::new();
    for (employee_id, history) in root {
        let Value::Array(items) = history else {
            warn!(%employee_id, "stored history is not a list, dropped");
            continue;
        };
        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let Value::Object(object) = item else {
                warn!(%employee_id, index, "stored entry is not an object, dropped");
                continue;
            };
            let (entry, rejected) = SalaryEntry::from_stored(object);
            if !rejected.is_empty() {
                warn!(%employee_id, month = %entry.month, ?rejected, "stored fields of the wrong type read as empty");
            }
            entries.push(entry);
        }
        ledger.insert(employee_id, entries);
    }
    ledger
}
