use std::{cell::RefCell, rc::Rc};

use engine::{
    Category, CategoryFilter, DEFAULT_STORAGE_KEY, ExpenseId, FileStore, Ledger, LedgerEvent,
    MemoryStore, MoneyCents, PersistenceError, Store, ValidationError, codec,
};
use uuid::Uuid;

fn test_store_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/test_stores")
        .join(Uuid::new_v4().to_string())
}

/// Store whose writes always fail, like disabled browser storage.
#[derive(Default)]
struct ReadOnlyStore {
    inner: MemoryStore,
}

impl Store for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &[u8]) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("storage disabled".to_string()))
    }
}

/// Store whose reads always fail.
struct BrokenReadStore;

impl Store for BrokenReadStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Err(PersistenceError::Io(std::io::Error::other("disk on fire")))
    }

    fn set(&mut self, _key: &str, _value: &[u8]) -> Result<(), PersistenceError> {
        Ok(())
    }
}

fn reopen(ledger: &Ledger<MemoryStore>) -> Ledger<MemoryStore> {
    Ledger::open(ledger.store().clone())
}

#[test]
fn coffee_scenario() {
    let mut ledger = Ledger::open(MemoryStore::new());

    let coffee = ledger
        .add("Coffee", "3.5", "2026-02-01", Category::Food)
        .unwrap();

    assert_eq!(ledger.len(), 1);
    assert_eq!(coffee.amount, MoneyCents::new(350));
    assert_eq!(
        ledger.filtered_total(CategoryFilter::All).total.to_string(),
        "$3.50"
    );
    assert_eq!(
        ledger
            .filtered_total(CategoryFilter::Only(Category::Transport))
            .total,
        MoneyCents::ZERO
    );
}

#[test]
fn demo_scenario_totals() {
    let mut ledger = Ledger::open(MemoryStore::new());
    assert_eq!(ledger.load_demo(), 4);

    let titles: Vec<&str> = ledger.expenses().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Groceries", "Bus pass", "Movie", "Electricity"]);
    assert_eq!(
        ledger.filtered_total(CategoryFilter::All).total,
        MoneyCents::new(138_18)
    );
    assert_eq!(
        ledger.filtered_total(Category::Food.into()).total,
        MoneyCents::new(42_35)
    );
    assert_eq!(ledger.overall_total(), MoneyCents::new(138_18));
}

#[test]
fn demo_prepends_and_never_duplicates_ids() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger.add("Rent", "900", "2026-01-01", Category::Other).unwrap();
    ledger.load_demo();
    ledger.load_demo();

    assert_eq!(ledger.len(), 9);
    assert_eq!(ledger.expenses()[8].title, "Rent");

    let mut ids: Vec<&ExpenseId> = ledger.expenses().iter().map(|e| &e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 9);
}

#[test]
fn add_prepends_trimmed_rounded_entry_and_persists() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger.add("First", "1", "2026-01-01", Category::Other).unwrap();
    let added = ledger
        .add("  Dinner out  ", "24.995", "2026-01-03", Category::Entertainment)
        .unwrap();

    assert_eq!(added.title, "Dinner out");
    assert_eq!(added.amount, MoneyCents::new(25_00));
    assert_eq!(added.date, "2026-01-03");
    assert_eq!(added.category, Category::Entertainment);
    assert_eq!(ledger.expenses()[0], added);
    assert_eq!(ledger.expenses()[1].title, "First");

    let reloaded = reopen(&ledger);
    assert_eq!(reloaded.expenses(), ledger.expenses());
}

#[test]
fn invalid_add_leaves_ledger_unchanged() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger.load_demo();
    let before = ledger.expenses().to_vec();
    let stored_before = ledger.store().raw(DEFAULT_STORAGE_KEY).map(<[u8]>::to_vec);

    let cases = [
        ("", "10", "2026-01-01"),
        ("   ", "10", "2026-01-01"),
        ("Tea", "ten", "2026-01-01"),
        ("Tea", "", "2026-01-01"),
        ("Tea", "-4", "2026-01-01"),
        ("Tea", "10", ""),
        ("Tea", "10", "   "),
    ];
    for (title, amount, date) in cases {
        assert!(
            ledger.add(title, amount, date, Category::Food).is_err(),
            "{title:?} {amount:?} {date:?}"
        );
    }

    assert_eq!(ledger.expenses(), before.as_slice());
    assert_eq!(
        ledger.store().raw(DEFAULT_STORAGE_KEY).map(<[u8]>::to_vec),
        stored_before
    );
}

#[test]
fn add_reports_the_first_failing_check() {
    let mut ledger = Ledger::open(MemoryStore::new());
    assert_eq!(
        ledger.add("", "x", "", Category::Food),
        Err(ValidationError::EmptyTitle)
    );
    assert_eq!(
        ledger.add("Tea", "-1", "", Category::Food),
        Err(ValidationError::NegativeAmount)
    );
    assert_eq!(
        ledger.add("Tea", "1", "", Category::Food),
        Err(ValidationError::EmptyDate)
    );
}

#[test]
fn zero_amount_is_accepted() {
    let mut ledger = Ledger::open(MemoryStore::new());
    let free = ledger
        .add("Free sample", "0", "2026-01-01", Category::Food)
        .unwrap();
    assert!(free.amount.is_zero());
}

#[test]
fn remove_is_idempotent() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger.load_demo();
    let id = ledger.expenses()[1].id.clone();

    assert!(ledger.remove(&id));
    let after_once = ledger.expenses().to_vec();
    assert!(!ledger.remove(&id));

    assert_eq!(ledger.expenses(), after_once.as_slice());
    assert_eq!(ledger.len(), 3);
    assert!(ledger.get(&id).is_none());
    assert_eq!(reopen(&ledger).expenses(), after_once.as_slice());
}

#[test]
fn clear_persists_empty_list() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger.load_demo();
    ledger.clear();

    assert!(ledger.is_empty());
    assert_eq!(ledger.store().raw(DEFAULT_STORAGE_KEY), Some(&b"[]"[..]));
    assert!(reopen(&ledger).is_empty());
}

#[test]
fn filtered_totals_partition_the_overall_total() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger.load_demo();
    ledger.add("Lunch", "8.40", "2026-01-08", Category::Food).unwrap();
    ledger.add("Gift", "30", "2026-01-09", Category::Other).unwrap();

    let all = ledger.filtered_total(CategoryFilter::All);
    let by_category: MoneyCents = Category::ALL
        .into_iter()
        .map(|c| ledger.filtered_total(c.into()).total)
        .sum();
    let manual: MoneyCents = ledger.expenses().iter().map(|e| e.amount).sum();

    assert_eq!(all.total, by_category);
    assert_eq!(all.total, manual);
    assert_eq!(all.len(), ledger.len());
    assert_eq!(
        ledger.filtered_total(Category::Food.into()).total,
        MoneyCents::new(50_75)
    );
}

#[test]
fn round_trip_preserves_order_and_values() {
    let mut ledger = Ledger::open(MemoryStore::new());
    ledger.add("A", "0.01", "2026-01-01", Category::Food).unwrap();
    ledger.load_demo();
    ledger.add("B", "1234567.89", "2026-03-01", Category::Other).unwrap();

    let bytes = codec::encode(ledger.expenses()).unwrap();
    let decoded = codec::decode(&bytes).unwrap();
    assert_eq!(decoded, ledger.expenses());
    assert_eq!(reopen(&ledger).expenses(), ledger.expenses());
}

#[test]
fn malformed_store_loads_as_empty() {
    let cases: [&[u8]; 4] = [b"{not json", b"null", b"\"expenses\"", b"[{\"id\":\"1\"}]"];
    for raw in cases {
        let ledger = Ledger::open(MemoryStore::seeded(DEFAULT_STORAGE_KEY, raw));
        assert!(ledger.is_empty());
    }
}

#[test]
fn unreadable_store_loads_as_empty() {
    let mut ledger = Ledger::open(BrokenReadStore);
    assert!(ledger.is_empty());
    ledger.add("Tea", "2", "2026-01-01", Category::Food).unwrap();
    assert!(ledger.take_notice().is_none());
}

#[test]
fn hydrated_ids_are_not_reissued() {
    let raw = br#"[{"id":"99999999999999","title":"Future","amount":1,"date":"2026-01-01","category":"Food"}]"#;
    let mut ledger = Ledger::open(MemoryStore::seeded(DEFAULT_STORAGE_KEY, &raw[..]));
    let added = ledger.add("Next", "1", "2026-01-02", Category::Food).unwrap();
    assert_eq!(added.id.as_str(), "100000000000000");
}

#[test]
fn ids_stay_unique_past_the_numeric_range() {
    let raw = br#"[{"id":"9223372036854775807","title":"Edge","amount":1,"date":"2026-01-01","category":"Food"}]"#;
    let mut ledger = Ledger::open(MemoryStore::seeded(DEFAULT_STORAGE_KEY, &raw[..]));
    let a = ledger.add("A", "1", "2026-01-02", Category::Food).unwrap();
    let b = ledger.add("B", "1", "2026-01-02", Category::Food).unwrap();

    assert_ne!(a.id, b.id);
    assert_ne!(a.id.as_str(), "9223372036854775807");
    assert!(ledger.remove(&a.id));
    assert_eq!(ledger.len(), 2);

    let mut reopened = reopen(&ledger);
    let c = reopened.add("C", "1", "2026-01-03", Category::Food).unwrap();
    assert_eq!(reopened.expenses().iter().filter(|e| e.id == c.id).count(), 1);
}

#[test]
fn amounts_with_exponents_or_comma_thousands() {
    let mut ledger = Ledger::open(MemoryStore::new());
    let rent = ledger.add("Rent", "1e3", "2026-01-01", Category::Other).unwrap();
    assert_eq!(rent.amount, MoneyCents::new(100_000));
    let tip = ledger.add("Tip", "1.5e2", "2026-01-01", Category::Other).unwrap();
    assert_eq!(tip.amount, MoneyCents::new(15_000));

    for amount in ["1,000", "12,345"] {
        assert!(matches!(
            ledger.add("TV", amount, "2026-01-01", Category::Entertainment),
            Err(ValidationError::InvalidAmount(_))
        ));
    }
    assert_eq!(ledger.len(), 2);
}

#[test]
fn ids_issued_in_a_burst_are_unique() {
    let mut ledger = Ledger::open(MemoryStore::new());
    for i in 0..200 {
        ledger
            .add(&format!("item {i}"), "1", "2026-01-01", Category::Other)
            .unwrap();
    }
    let mut ids: Vec<i64> = ledger
        .expenses()
        .iter()
        .map(|e| e.id.as_str().parse().unwrap())
        .collect();
    // Newest first, so ids decrease along the list.
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn write_failures_keep_memory_state_and_raise_one_notice() {
    let mut ledger = Ledger::open(ReadOnlyStore::default());
    let added = ledger.add("Tea", "2", "2026-01-01", Category::Food).unwrap();

    assert_eq!(ledger.expenses(), [added]);
    assert!(matches!(
        ledger.take_notice(),
        Some(PersistenceError::Unavailable(_))
    ));
    assert!(ledger.take_notice().is_none());
}

#[test]
fn quota_exceeded_is_a_notice_not_an_error() {
    let mut ledger = Ledger::open(MemoryStore::with_quota(64));
    ledger.load_demo();

    assert_eq!(ledger.len(), 4);
    assert!(matches!(
        ledger.take_notice(),
        Some(PersistenceError::QuotaExceeded { .. })
    ));
    assert!(ledger.store().raw(DEFAULT_STORAGE_KEY).is_none());
}

#[test]
fn observers_see_each_successful_mutation_once() {
    let events: Rc<RefCell<Vec<(LedgerEvent, usize)>>> = Rc::default();
    let mut ledger = Ledger::open(MemoryStore::new());
    {
        let events = Rc::clone(&events);
        ledger.subscribe(move |event, snapshot| {
            events.borrow_mut().push((event.clone(), snapshot.len()));
        });
    }

    let tea = ledger.add("Tea", "2", "2026-01-01", Category::Food).unwrap();
    let _ = ledger.add("", "2", "2026-01-01", Category::Food);
    ledger.load_demo();
    ledger.remove(&tea.id);
    ledger.remove(&tea.id);
    ledger.clear();

    let events = events.borrow();
    assert_eq!(
        *events,
        vec![
            (LedgerEvent::Added(tea.clone()), 1),
            (LedgerEvent::DemoLoaded { count: 4 }, 5),
            (LedgerEvent::Removed(tea.id.clone()), 4),
            (LedgerEvent::Cleared { removed: 4 }, 0),
        ]
    );
}

#[test]
fn custom_key_is_isolated() {
    let mut ledger = Ledger::open_with_key(MemoryStore::new(), "work");
    ledger.add("Train", "5", "2026-01-01", Category::Transport).unwrap();

    assert_eq!(ledger.key(), "work");
    assert!(ledger.store().raw(DEFAULT_STORAGE_KEY).is_none());
    assert!(Ledger::open(ledger.store().clone()).is_empty());
    assert_eq!(
        Ledger::open_with_key(ledger.store().clone(), "work").len(),
        1
    );
}

#[test]
fn file_store_persists_across_instances() {
    let dir = test_store_dir();

    let mut ledger = Ledger::open(FileStore::new(&dir));
    assert!(ledger.is_empty());
    ledger.load_demo();
    ledger.add("Coffee", "3.5", "2026-02-01", Category::Food).unwrap();
    assert!(ledger.take_notice().is_none());
    assert!(dir.join("expenses.json").exists());

    let reloaded = Ledger::open(FileStore::new(&dir));
    assert_eq!(reloaded.expenses(), ledger.expenses());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn file_store_with_corrupt_file_starts_empty() {
    let dir = test_store_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("expenses.json"), "[{\"id\": ").unwrap();

    let mut ledger = Ledger::open(FileStore::new(&dir));
    assert!(ledger.is_empty());

    // The next mutation overwrites the corrupt file with a valid list.
    ledger.add("Tea", "2", "2026-01-01", Category::Food).unwrap();
    assert_eq!(Ledger::open(FileStore::new(&dir)).len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}
