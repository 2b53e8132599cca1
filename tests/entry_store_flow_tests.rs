// End to end flows for the entry store over real storage adapters.
//
// - File storage: state survives a fresh store instance and is plain JSON on disk.
// - Shared in memory storage: separate store instances observe each other without caching.

use rstest::{fixture, rstest};
use salary_ledger::adapters::file::file_storage::FileStorage;
use salary_ledger::adapters::in_memory::in_memory_storage::InMemoryStorage;
use salary_ledger::{EntryStore, Field, KeyValueStorage, PrefillMode, SalaryEntry, StoreConfig};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

const EMPLOYEE: &str = "emp-0001";

struct TempRoot(PathBuf);

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[fixture]
fn before_each() -> (TempRoot, StoreConfig) {
    let root = std::env::temp_dir().join(format!("salary-ledger-flow-{}", uuid::Uuid::now_v7()));
    let config = StoreConfig {
        storage_key: "salaryEntries_v1".to_string(),
        data_dir: Some(root.clone()),
    };
    (TempRoot(root), config)
}

fn open(config: &StoreConfig) -> EntryStore<FileStorage> {
    let dir = config.require_data_dir().expect("data dir configured");
    EntryStore::with_config(FileStorage::new(dir), config)
}

fn entry(month: &str, basic_salary: f64) -> SalaryEntry {
    SalaryEntry {
        basic_salary: Field::Value(basic_salary),
        ..SalaryEntry::new(month)
    }
}

#[rstest]
fn it_should_persist_entries_across_store_instances(before_each: (TempRoot, StoreConfig)) {
    let (_root, config) = before_each;
    let first = open(&config);
    first.save_entry(EMPLOYEE, entry("2024-03", 1200.0)).unwrap();
    first.save_entry(EMPLOYEE, entry("2024-01", 1000.0)).unwrap();

    let reopened = open(&config);
    let months: Vec<String> = reopened
        .get_entries(EMPLOYEE)
        .into_iter()
        .map(|e| e.month)
        .collect();
    assert_eq!(months, vec!["2024-01", "2024-03"]);
    assert_eq!(
        reopened.get_latest_before(EMPLOYEE, "2024-02").unwrap().month,
        "2024-01"
    );
    assert_eq!(
        reopened.get_latest_before(EMPLOYEE, "2023-12").unwrap().month,
        "2024-03"
    );
}

#[rstest]
fn it_should_write_the_ledger_as_a_json_object(before_each: (TempRoot, StoreConfig)) {
    let (_root, config) = before_each;
    let store = open(&config);
    store
        .save_entry(
            EMPLOYEE,
            SalaryEntry {
                remarks: Field::Value("promo".to_string()),
                ..entry("2024-05", 1500.0)
            },
        )
        .unwrap();

    let path = store.storage().path_for(&config.storage_key);
    let on_disk: serde_json::Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({ "emp-0001": [{ "month": "2024-05", "basicSalary": 1500.0, "remarks": "promo" }] })
    );
}

#[rstest]
fn it_should_recover_from_a_corrupt_file(before_each: (TempRoot, StoreConfig)) {
    let (_root, config) = before_each;
    let store = open(&config);
    store
        .storage()
        .write(&config.storage_key, b"[\"not\", \"a\", \"map\"]")
        .unwrap();

    assert!(store.get_all().is_empty());
    let prefill = store.prefill(EMPLOYEE, "2024-02", None);
    assert_eq!(prefill.mode, PrefillMode::Blank);

    store.save_entry(EMPLOYEE, entry("2024-02", 900.0)).unwrap();
    assert_eq!(store.get_all().len(), 1);
}

#[rstest]
fn it_should_not_cache_between_operations() {
    let storage = Arc::new(InMemoryStorage::new());
    let tab_a = EntryStore::new(storage.clone());
    let tab_b = EntryStore::new(storage);

    tab_a.save_entry(EMPLOYEE, entry("2024-01", 1000.0)).unwrap();
    assert_eq!(tab_b.get_latest(EMPLOYEE).unwrap().month, "2024-01");

    tab_b
        .save_entry(
            EMPLOYEE,
            SalaryEntry {
                overtime: Field::Value(3.0),
                ..SalaryEntry::new("2024-01")
            },
        )
        .unwrap();
    let merged = tab_a.get_entry(EMPLOYEE, "2024-01").unwrap();
    assert_eq!(merged.basic_salary, Field::Value(1000.0));
    assert_eq!(merged.overtime, Field::Value(3.0));
}

#[rstest]
fn it_should_carry_base_fields_into_the_next_month(before_each: (TempRoot, StoreConfig)) {
    let (_root, config) = before_each;
    let store = open(&config);
    store
        .save_entry(
            EMPLOYEE,
            SalaryEntry {
                transport_allowance: Field::Value(60.0),
                attendance: Field::Value(21.0),
                production_target_allowance: Field::Value(75.0),
                remarks: Field::Value("march".to_string()),
                ..entry("2024-03", 1200.0)
            },
        )
        .unwrap();

    let prefill = store.prefill(EMPLOYEE, "2024-04", None);
    assert_eq!(
        prefill.mode,
        PrefillMode::CarriedForward {
            source_month: "2024-03".to_string()
        }
    );
    assert_eq!(
        prefill.entry,
        SalaryEntry {
            basic_salary: Field::Value(1200.0),
            transport_allowance: Field::Value(60.0),
            ..SalaryEntry::blank("2024-04")
        }
    );

    store.save_entry(EMPLOYEE, prefill.entry).unwrap();
    assert_eq!(store.get_latest(EMPLOYEE).unwrap().month, "2024-04");
}
