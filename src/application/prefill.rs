// Prefill result handed to a form for a month.
//
// Modes
// - Existing: the month already has an entry; every stored field is returned.
// - CarriedForward: a new month; base fields come from the reference entry, the rest is empty.
// - Blank: a new month with nothing to carry forward.

use crate::core::salary_entry::SalaryEntry;

#[derive(Debug, Clone, PartialEq)]
pub enum PrefillMode {
    Existing,
    CarriedForward { source_month: String },
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prefill {
    pub mode: PrefillMode,
    pub entry: SalaryEntry,
}

impl Prefill {
    pub fn is_carried_forward(&self) -> bool {
        matches!(self.mode, PrefillMode::CarriedForward { .. })
    }
}
