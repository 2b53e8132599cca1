// Shared test fixture for building SalaryEntry values.
// Every field starts unset so a test only spells out what it cares about.

use crate::core::salary_entry::{Field, SalaryEntry};

pub struct SalaryEntryBuilder {
    inner: SalaryEntry,
}

#[allow(dead_code)]
impl SalaryEntryBuilder {
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            inner: SalaryEntry::new(month),
        }
    }

    pub fn basic_salary(mut self, v: f64) -> Self {
        self.inner.basic_salary = Field::Value(v);
        self
    }

    pub fn general_allowance(mut self, v: f64) -> Self {
        self.inner.general_allowance = Field::Value(v);
        self
    }

    pub fn transport_allowance(mut self, v: f64) -> Self {
        self.inner.transport_allowance = Field::Value(v);
        self
    }

    pub fn special_allowance(mut self, v: f64) -> Self {
        self.inner.special_allowance = Field::Value(v);
        self
    }

    pub fn attendance(mut self, v: f64) -> Self {
        self.inner.attendance = Field::Value(v);
        self
    }

    pub fn overtime(mut self, v: f64) -> Self {
        self.inner.overtime = Field::Value(v);
        self
    }

    pub fn empty_overtime(mut self) -> Self {
        self.inner.overtime = Field::Empty;
        self
    }

    pub fn production_target_allowance(mut self, v: f64) -> Self {
        self.inner.production_target_allowance = Field::Value(v);
        self
    }

    pub fn remarks(mut self, v: impl Into<String>) -> Self {
        self.inner.remarks = Field::Value(v.into());
        self
    }

    pub fn empty_remarks(mut self) -> Self {
        self.inner.remarks = Field::Empty;
        self
    }

    pub fn build(self) -> SalaryEntry {
        self.inner
    }
}
