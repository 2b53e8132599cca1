// SalaryEntry is one employee's salary record for one month.
//
// Purpose
// - Define the persisted field set and its JSON shape.
// - Provide the shallow merge used by upsert and the carry-forward derivation used by prefill.
//
// Field groups
// - Base fields (basic salary and the three allowances) carry forward into a new month.
// - Period fields (attendance, overtime, production target allowance) and remarks never do.
//
// Boundaries
// - No input or output here. Parsing of form text into numbers belongs to the caller.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::mem;

/// A field that may be absent from a payload, explicitly empty, or set.
///
/// `Unset` means "not specified" and is skipped when serialising, so a merge keeps the stored
/// value. `Empty` is stored as JSON `null` and clears the stored value on merge.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Field<T> {
    #[default]
    Unset,
    Empty,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `self` unless it is `Unset`, in which case `existing` wins.
    pub fn or(self, existing: Field<T>) -> Field<T> {
        match self {
            Field::Unset => existing,
            specified => specified,
        }
    }

    fn filled(&self) -> Field<T>
    where
        T: Clone,
    {
        match self {
            Field::Value(v) => Field::Value(v.clone()),
            _ => Field::Empty,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Empty, Field::Value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => serializer.serialize_some(v),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryEntry {
    #[serde(default)]
    pub month: String,

    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub basic_salary: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub general_allowance: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub transport_allowance: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub special_allowance: Field<f64>,

    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub attendance: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub overtime: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub production_target_allowance: Field<f64>,

    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub remarks: Field<String>,
}

impl SalaryEntry {
    /// An entry for `month` with every field unset.
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            ..Self::default()
        }
    }

    /// An entry for `month` with every field explicitly empty.
    pub fn blank(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            basic_salary: Field::Empty,
            general_allowance: Field::Empty,
            transport_allowance: Field::Empty,
            special_allowance: Field::Empty,
            attendance: Field::Empty,
            overtime: Field::Empty,
            production_target_allowance: Field::Empty,
            remarks: Field::Empty,
        }
    }

    /// Shallow field-level merge: every field specified in `incoming` overwrites this entry's,
    /// unset fields keep their stored value. The month is left untouched.
    pub fn merge(&mut self, incoming: SalaryEntry) {
        fn overlay<T: Default>(slot: &mut Field<T>, incoming: Field<T>) {
            *slot = incoming.or(mem::take(slot));
        }

        overlay(&mut self.basic_salary, incoming.basic_salary);
        overlay(&mut self.general_allowance, incoming.general_allowance);
        overlay(&mut self.transport_allowance, incoming.transport_allowance);
        overlay(&mut self.special_allowance, incoming.special_allowance);
        overlay(&mut self.attendance, incoming.attendance);
        overlay(&mut self.overtime, incoming.overtime);
        overlay(
            &mut self.production_target_allowance,
            incoming.production_target_allowance,
        );
        overlay(&mut self.remarks, incoming.remarks);
    }

    /// Decodes one stored entry object field by field. A field holding the wrong JSON type is read
    /// as `Empty` (a non-string month as the empty month) and its key is returned in the second
    /// element, so one bad value never costs the rest of the entry. Unknown keys are ignored.
    pub fn from_stored(object: &Map<String, Value>) -> (SalaryEntry, Vec<&'static str>) {
        let mut rejected = Vec::new();
        let month = match object.get("month") {
            None => String::new(),
            Some(Value::String(month)) => month.clone(),
            Some(_) => {
                rejected.push("month");
                String::new()
            }
        };
        let entry = SalaryEntry {
            month,
            basic_salary: stored_field(object, "basicSalary", &mut rejected),
            general_allowance: stored_field(object, "generalAllowance", &mut rejected),
            transport_allowance: stored_field(object, "transportAllowance", &mut rejected),
            special_allowance: stored_field(object, "specialAllowance", &mut rejected),
            attendance: stored_field(object, "attendance", &mut rejected),
            overtime: stored_field(object, "overtime", &mut rejected),
            production_target_allowance: stored_field(
                object,
                "productionTargetAllowance",
                &mut rejected,
            ),
            remarks: stored_field(object, "remarks", &mut rejected),
        };
        (entry, rejected)
    }

    /// Derives a prefill for `month` from this entry: base fields are copied, period fields and
    /// remarks are left empty.
    pub fn carry_forward(&self, month: impl Into<String>) -> SalaryEntry {
        SalaryEntry {
            basic_salary: self.basic_salary.filled(),
            general_allowance: self.general_allowance.filled(),
            transport_allowance: self.transport_allowance.filled(),
            special_allowance: self.special_allowance.filled(),
            ..SalaryEntry::blank(month)
        }
    }
}

fn stored_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &'static str,
    rejected: &mut Vec<&'static str>,
) -> Field<T> {
    match object.get(key) {
        None => Field::Unset,
        Some(value) => Field::deserialize(value).unwrap_or_else(|_| {
            rejected.push(key);
            Field::Empty
        }),
    }
}
