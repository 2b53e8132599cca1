// Crate entry point. Declares and exposes modules so tests and host applications can reach them.
//
// Layers
// - core: month keys, the salary entry record, pure history resolution, and the storage port.
// - application: the entry store operations and prefill.
// - adapters: in memory and file backed storage.

pub mod core {
    pub mod month_key;
    pub mod ports;
    pub mod resolution;
    pub mod salary_entry;
}

pub mod application {
    pub mod entry_store;
    pub mod errors;
    pub mod prefill;
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_storage;
    }
    pub mod file {
        pub mod file_storage;
    }
}

pub mod config;
pub mod telemetry;


pub use crate::application::entry_store::{EntryStore, SalaryLedger};
pub use crate::application::errors::StoreError;
pub use crate::application::prefill::{Prefill, PrefillMode};
pub use crate::config::{DEFAULT_STORAGE_KEY, StoreConfig};
pub use crate::core::month_key::MonthKey;
pub use crate::core::ports::{KeyValueStorage, StorageError};
pub use crate::core::salary_entry::{Field, SalaryEntry};
