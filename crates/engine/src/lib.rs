//! Core of the expense tracker.
//!
//! The [`Ledger`] owns an ordered, newest-first list of [`Expense`] records,
//! validates new entries, derives filtered views and totals in exact cents,
//! and persists itself through a [`Store`] after every mutation.
//!
//! ```rust
//! use engine::{Category, CategoryFilter, Ledger, MemoryStore, MoneyCents};
//!
//! let mut ledger = Ledger::open(MemoryStore::new());
//! ledger.add("Coffee", "3.5", "2026-02-01", Category::Food).unwrap();
//!
//! assert_eq!(ledger.filtered_total(CategoryFilter::All).total, MoneyCents::new(350));
//! assert!(ledger.filtered_total(Category::Transport.into()).total.is_zero());
//! ```

pub use category::{Category, CategoryFilter, UnknownCategory};
pub use error::{DecodeError, PersistenceError, ValidationError};
pub use expense::{Expense, ExpenseId, IdGenerator, NewExpense};
pub use ledger::{FilteredView, Ledger, LedgerEvent, filter_expenses, load};
pub use money::MoneyCents;
pub use store::{DEFAULT_STORAGE_KEY, FileStore, MemoryStore, Store};

pub mod codec;
pub mod demo;

mod category;
mod error;
mod expense;
mod ledger;
mod money;
mod store;
