//! The module contains the errors the engine can produce.
//!
//! The errors are:
//!
//! - [`ValidationError`] returned by [`Ledger::add`] when user input breaks
//!   the entry contract. Never stored, always shown next to the form.
//! - [`PersistenceError`] produced by a [`Store`]. Swallowed on read and
//!   best-effort on write: the in-memory ledger stays authoritative.
//! - [`DecodeError`] produced by [`codec::decode`] when the stored bytes are
//!   not a well-formed expense list. [`load`] maps it to "absent".
//!
//!  [`Ledger::add`]: crate::Ledger::add
//!  [`Store`]: crate::Store
//!  [`codec::decode`]: crate::codec::decode
//!  [`load`]: crate::load
use thiserror::Error;

/// User input rejected before an [`Expense`](crate::Expense) is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount must not be negative")]
    NegativeAmount,
    #[error("Date is required")]
    EmptyDate,
}

/// Failure of the backing key-value store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode expenses: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage quota exceeded ({needed} bytes needed, {quota} available)")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Stored bytes that do not describe a well-formed expense list.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("stored data is not utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("stored data is not a valid expense list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored expense rejected: {0}")]
    Invalid(String),
}
