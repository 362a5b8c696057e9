use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use serde_json::json;
use stockledger_core::{DomainError, Quantity};
use stockledger_inventory::{LoadOutcome, StockLedger, StorageError};
use tempfile::TempDir;

struct TestStore {
    dir: TempDir,
}

impl TestStore {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self) -> PathBuf {
        self.dir.path().join("inventory.json")
    }

    fn ledger(&self) -> StockLedger {
        StockLedger::new(self.path())
    }

    fn write_raw(&self, contents: &str) {
        fs::write(self.path(), contents).expect("failed to seed storage file");
    }
}

#[test]
fn shop_floor_scenario() {
    let store = TestStore::new();
    let mut ledger = store.ledger();

    ledger.add_item("apple", 10).unwrap();
    ledger.add_item("banana", -2).unwrap();
    // Wrong types on the dynamic path are reported and ignored.
    assert!(ledger.add_value(&json!(123), &json!("ten")).is_err());
    ledger.remove_item("apple", 3).unwrap();

    assert_eq!(ledger.get_qty("apple"), Quantity::from(7));
    let low = ledger.check_low_items(5);
    assert!(low.contains(&"banana".to_string()));
    assert!(!low.contains(&"apple".to_string()));

    let before: Vec<(String, Quantity)> = ledger.items().map(|(n, q)| (n.to_string(), q)).collect();
    let activity_before = ledger.activity().len();
    assert_eq!(
        ledger.remove_item("orange", 1),
        Err(DomainError::not_found("orange"))
    );
    let after: Vec<(String, Quantity)> = ledger.items().map(|(n, q)| (n.to_string(), q)).collect();
    assert_eq!(before, after);
    assert_eq!(ledger.activity().len(), activity_before);

    ledger.save_data().unwrap();
    assert_eq!(ledger.load_data(), LoadOutcome::Loaded(2));
    assert_eq!(
        ledger.report().to_string(),
        "Items Report:\napple -> 7\nbanana -> -2"
    );
}

#[test]
fn saved_file_is_indented_json_in_ledger_order() {
    let store = TestStore::new();
    let mut ledger = store.ledger();
    ledger.add_item("pear", 3).unwrap();
    ledger.add_item("apple", 1.5).unwrap();
    ledger.save_data().unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert_eq!(text, "{\n    \"pear\": 3,\n    \"apple\": 1.5\n}");
}

#[test]
fn save_overwrites_previous_contents() {
    let store = TestStore::new();
    store.write_raw(r#"{ "stale": 99, "other": 1 }"#);

    let mut ledger = store.ledger();
    ledger.add_item("fresh", 1).unwrap();
    ledger.save_data().unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert!(!text.contains("stale"));
    assert!(text.contains("fresh"));
}

#[test]
fn load_replaces_instead_of_merging() {
    let store = TestStore::new();
    store.write_raw(r#"{ "flour": 2.5, "sugar": 8 }"#);

    let mut ledger = store.ledger();
    ledger.add_item("apple", 10).unwrap();
    assert_eq!(ledger.load_data(), LoadOutcome::Loaded(2));

    assert_eq!(ledger.get_qty("apple"), Quantity::ZERO);
    assert_eq!(ledger.get_qty("flour"), Quantity::from(2.5));
    assert_eq!(ledger.get_qty("sugar"), Quantity::from(8));
    // The activity log is process-local and survives a reload.
    assert_eq!(ledger.activity().len(), 1);
}

#[test]
fn load_without_file_starts_empty() {
    let store = TestStore::new();
    let mut ledger = store.ledger();
    ledger.add_item("apple", 10).unwrap();

    assert_eq!(ledger.load_data(), LoadOutcome::Missing);
    assert!(ledger.is_empty());
}

#[test]
fn load_of_malformed_content_starts_empty() {
    for contents in [
        "not json at all",
        r#"{ "apple": "ten" }"#,
        r#"["apple", 10]"#,
        r#"{ "apple": { "qty": 10 } }"#,
        "",
    ] {
        let store = TestStore::new();
        store.write_raw(contents);

        let mut ledger = store.ledger();
        ledger.add_item("apple", 10).unwrap();
        assert_eq!(ledger.load_data(), LoadOutcome::Malformed, "contents: {contents:?}");
        assert!(ledger.is_empty());
    }
}

#[test]
fn save_into_missing_directory_is_reported_not_raised() {
    let store = TestStore::new();
    let mut ledger = StockLedger::new(store.dir.path().join("missing").join("inventory.json"));
    ledger.add_item("apple", 10).unwrap();

    let err = ledger.save_data().unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
    assert_eq!(ledger.get_qty("apple"), Quantity::from(10));
}

#[test]
fn activity_log_is_not_written_to_storage() {
    let store = TestStore::new();
    let mut ledger = store.ledger();
    ledger.add_item("apple", 10).unwrap();
    ledger.remove_item("apple", 4).unwrap();
    ledger.save_data().unwrap();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(saved, json!({ "apple": 6 }));

    let mut fresh = store.ledger();
    fresh.load_data();
    assert!(fresh.activity().is_empty());
}

#[test]
fn refused_overflow_keeps_the_file_loadable() {
    let store = TestStore::new();
    let mut ledger = store.ledger();
    ledger.add_item("a", 1).unwrap();
    ledger.add_item("big", 1e308).unwrap();
    assert!(ledger.add_item("big", 1e308).is_err());
    ledger.save_data().unwrap();

    let mut reloaded = store.ledger();
    assert_eq!(reloaded.load_data(), LoadOutcome::Loaded(2));
    assert_eq!(reloaded.get_qty("a"), Quantity::from(1));
    assert_eq!(reloaded.get_qty("big"), Quantity::from(1e308));
}

fn stock_entries() -> impl Strategy<Value = Vec<(String, Quantity)>> {
    let quantity = prop_oneof![
        (-10_000i64..10_000).prop_map(Quantity::from),
        (-10_000.0f64..10_000.0).prop_map(Quantity::from),
    ];
    prop::collection::vec(("[a-z]{1,8}", quantity), 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: save followed by load reproduces the saved mapping, order included.
    #[test]
    fn save_then_load_round_trips(entries in stock_entries()) {
        let store = TestStore::new();
        let mut ledger = store.ledger();
        for (name, qty) in &entries {
            ledger.add_item(name, *qty).unwrap();
        }
        let saved: Vec<(String, Quantity)> = ledger.items().map(|(n, q)| (n.to_string(), q)).collect();

        ledger.save_data().unwrap();
        let mut reloaded = store.ledger();
        prop_assert_eq!(reloaded.load_data(), LoadOutcome::Loaded(saved.len()));

        let loaded: Vec<(String, Quantity)> = reloaded.items().map(|(n, q)| (n.to_string(), q)).collect();
        prop_assert_eq!(saved, loaded);
    }
}
