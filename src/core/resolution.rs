// Pure temporal logic over one employee's history.
//
// Purpose
// - Establish chronological order of a history.
// - Resolve the reference entry for a month, keeping the fallback policy explicit.
//
// Boundaries
// - Operates on slices only. Loading and persisting belong to the entry store.

use crate::core::month_key::{MonthKey, compare_month_strs};
use crate::core::salary_entry::SalaryEntry;

/// Stable ascending sort by month key; malformed months go first, ties keep their order.
pub fn sort_history(entries: &mut [SalaryEntry]) {
    entries.sort_by(|a, b| compare_month_strs(&a.month, &b.month));
}

/// Outcome of looking for the latest entry strictly before a month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The entry with the greatest month strictly earlier than the target.
    StrictlyBefore(&'a SalaryEntry),
    /// Nothing qualified, or the target was malformed: the chronologically last entry.
    FallbackLatest(&'a SalaryEntry),
    /// The history is empty.
    None,
}

impl<'a> Resolution<'a> {
    pub fn entry(self) -> Option<&'a SalaryEntry> {
        match self {
            Resolution::StrictlyBefore(entry) | Resolution::FallbackLatest(entry) => Some(entry),
            Resolution::None => None,
        }
    }
}

/// `sorted` must already be in `sort_history` order.
pub fn resolve_latest_before<'a>(sorted: &'a [SalaryEntry], month: &str) -> Resolution<'a> {
    let Some(latest) = sorted.last() else {
        return Resolution::None;
    };
    let Some(target) = MonthKey::parse(month) else {
        return Resolution::FallbackLatest(latest);
    };

    let mut best: Option<(MonthKey, &SalaryEntry)> = None;
    for entry in sorted {
        let Some(key) = MonthKey::parse(&entry.month) else {
            continue;
        };
        if key >= target {
            continue;
        }
        if best.is_none_or(|(best_key, _)| key > best_key) {
            best = Some((key, entry));
        }
    }

    match best {
        Some((_, entry)) => Resolution::StrictlyBefore(entry),
        None => Resolution::FallbackLatest(latest),
    }
}
