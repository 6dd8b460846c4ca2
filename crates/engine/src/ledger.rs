//! The expense ledger: an ordered, newest-first list bound to a [`Store`].
//!
//! Every successful mutation re-serializes the whole list into the store and
//! then notifies subscribed observers. Store failures never propagate: reads
//! fall back to an empty ledger, writes are logged and kept as a notice for
//! the caller while the in-memory list stays authoritative.

use std::fmt;

use tracing::{debug, warn};

use crate::{
    Category, CategoryFilter, Expense, ExpenseId, IdGenerator, MoneyCents, NewExpense,
    PersistenceError, Store, ValidationError, codec, demo::demo_expenses,
    store::DEFAULT_STORAGE_KEY,
};

/// What changed in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    Added(Expense),
    Removed(ExpenseId),
    Cleared { removed: usize },
    DemoLoaded { count: usize },
}

type Observer = Box<dyn FnMut(&LedgerEvent, &[Expense])>;

/// Subset of the ledger matching a filter, with its exact total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<'a> {
    pub expenses: Vec<&'a Expense>,
    pub total: MoneyCents,
}

impl FilteredView<'_> {
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// Filters a snapshot and sums the matching amounts in cents.
pub fn filter_expenses(expenses: &[Expense], filter: CategoryFilter) -> FilteredView<'_> {
    let expenses: Vec<&Expense> = expenses
        .iter()
        .filter(|expense| filter.matches(expense.category))
        .collect();
    let total = expenses.iter().map(|expense| expense.amount).sum();
    FilteredView { expenses, total }
}

/// Reads the persisted list, failing soft.
///
/// A missing key, a store read error or undecodable bytes all yield an empty
/// list; the cause is only logged.
pub fn load<S: Store + ?Sized>(store: &S, key: &str) -> Vec<Expense> {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("failed to read stored expenses, starting empty: {err}");
            return Vec::new();
        }
    };

    match codec::decode(&bytes) {
        Ok(expenses) => expenses,
        Err(err) => {
            warn!("stored expenses are malformed, starting empty: {err}");
            Vec::new()
        }
    }
}

pub struct Ledger<S> {
    expenses: Vec<Expense>,
    store: S,
    key: String,
    ids: IdGenerator,
    observers: Vec<Observer>,
    notice: Option<PersistenceError>,
}

impl<S: Store> Ledger<S> {
    /// Hydrates a ledger from `store` under the default key.
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn open_with_key(store: S, key: &str) -> Self {
        let expenses = load(&store, key);
        let mut ids = IdGenerator::new();
        for expense in &expenses {
            ids.observe(&expense.id);
        }
        debug!(count = expenses.len(), key, "ledger hydrated");

        Self {
            expenses,
            store,
            key: key.to_string(),
            ids,
            observers: Vec::new(),
            notice: None,
        }
    }

    /// Current snapshot, newest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Registers a callback run after every successful mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&LedgerEvent, &[Expense]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Validates the input and prepends a new expense.
    ///
    /// On rejection the ledger is left untouched and nothing is written.
    pub fn add(
        &mut self,
        title: &str,
        amount: &str,
        date: &str,
        category: Category,
    ) -> Result<Expense, ValidationError> {
        let draft = NewExpense::parse(title, amount, date, category)?;
        let expense = draft.with_id(self.ids.next_id());
        debug!(id = %expense.id, amount = %expense.amount, "expense added");

        self.expenses.insert(0, expense.clone());
        self.commit(LedgerEvent::Added(expense.clone()));
        Ok(expense)
    }

    /// Removes the expense with `id`. Absent ids are a no-op returning `false`.
    pub fn remove(&mut self, id: &ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| &expense.id != id);
        if self.expenses.len() == before {
            return false;
        }

        debug!(%id, "expense removed");
        self.commit(LedgerEvent::Removed(id.clone()));
        true
    }

    /// Empties the ledger. Confirmation is the caller's job.
    pub fn clear(&mut self) {
        let removed = self.expenses.len();
        self.expenses.clear();
        debug!(removed, "ledger cleared");
        self.commit(LedgerEvent::Cleared { removed });
    }

    /// Prepends the fixed sample entries, each with a fresh id.
    pub fn load_demo(&mut self) -> usize {
        let demo: Vec<Expense> = demo_expenses()
            .into_iter()
            .map(|draft| draft.with_id(self.ids.next_id()))
            .collect();
        let count = demo.len();
        self.expenses.splice(0..0, demo);
        debug!(count, "demo data loaded");
        self.commit(LedgerEvent::DemoLoaded { count });
        count
    }

    pub fn filtered_total(&self, filter: CategoryFilter) -> FilteredView<'_> {
        filter_expenses(&self.expenses, filter)
    }

    pub fn overall_total(&self) -> MoneyCents {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Last write failure since the previous call, if any.
    pub fn take_notice(&mut self) -> Option<PersistenceError> {
        self.notice.take()
    }

    fn commit(&mut self, event: LedgerEvent) {
        self.persist();
        for observer in &mut self.observers {
            observer(&event, &self.expenses);
        }
    }

    fn persist(&mut self) {
        let result =
            codec::encode(&self.expenses).and_then(|bytes| self.store.set(&self.key, &bytes));
        if let Err(err) = result {
            warn!(key = %self.key, "failed to persist expenses: {err}");
            self.notice = Some(err);
        }
    }
}

impl<S> fmt::Debug for Ledger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("key", &self.key)
            .field("expenses", &self.expenses)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn filter_expenses_sums_only_matching_categories() {
        let mut ledger = Ledger::open(MemoryStore::new());
        ledger.add("Lunch", "10.10", "2026-01-01", Category::Food).unwrap();
        ledger.add("Taxi", "20.20", "2026-01-01", Category::Transport).unwrap();
        ledger.add("Snack", "0.30", "2026-01-02", Category::Food).unwrap();

        let food = filter_expenses(ledger.expenses(), CategoryFilter::Only(Category::Food));
        assert_eq!(food.len(), 2);
        assert_eq!(food.total, MoneyCents::new(1040));
        assert_eq!(food.expenses[0].title, "Snack");

        let other = filter_expenses(ledger.expenses(), CategoryFilter::Only(Category::Other));
        assert!(other.is_empty());
        assert_eq!(other.total, MoneyCents::ZERO);
    }

    #[test]
    fn totals_do_not_drift() {
        let mut ledger = Ledger::open(MemoryStore::new());
        for _ in 0..10 {
            ledger.add("Gum", "0.10", "2026-01-01", Category::Food).unwrap();
        }
        ledger.add("Ticket", "0.20", "2026-01-01", Category::Transport).unwrap();
        assert_eq!(ledger.overall_total(), MoneyCents::new(120));
        assert_eq!(ledger.overall_total().to_string(), "$1.20");
    }

    #[test]
    fn no_op_remove_does_not_write() {
        let mut ledger = Ledger::open(MemoryStore::new());
        assert!(!ledger.remove(&ExpenseId::from("missing")));
        assert!(ledger.store().raw(DEFAULT_STORAGE_KEY).is_none());
    }
}
