//! JSON encoding of the persisted expense list.
//!
//! Layout: a UTF-8 JSON array of objects with `id` (string), `title`
//! (string), `amount` (number, dollars), `date` (string) and `category`
//! (one of the fixed category names). There is no version field; any shape
//! mismatch is reported as a [`DecodeError`].

use serde::{Deserialize, Serialize};

use crate::{Category, DecodeError, Expense, ExpenseId, MoneyCents, PersistenceError};

#[derive(Debug, Serialize, Deserialize)]
struct StoredExpense {
    id: String,
    title: String,
    amount: f64,
    date: String,
    category: Category,
}

impl From<&Expense> for StoredExpense {
    fn from(value: &Expense) -> Self {
        Self {
            id: value.id.as_str().to_string(),
            title: value.title.clone(),
            amount: value.amount.to_major(),
            date: value.date.clone(),
            category: value.category,
        }
    }
}

impl TryFrom<StoredExpense> for Expense {
    type Error = DecodeError;

    fn try_from(value: StoredExpense) -> Result<Self, Self::Error> {
        if value.title.trim().is_empty() {
            return Err(DecodeError::Invalid(format!(
                "expense {} has an empty title",
                value.id
            )));
        }
        if value.date.trim().is_empty() {
            return Err(DecodeError::Invalid(format!(
                "expense {} has an empty date",
                value.id
            )));
        }
        let amount = MoneyCents::from_major(value.amount).ok_or_else(|| {
            DecodeError::Invalid(format!(
                "expense {} has an invalid amount {}",
                value.id, value.amount
            ))
        })?;

        Ok(Expense {
            id: ExpenseId::new(value.id),
            title: value.title,
            amount,
            date: value.date,
            category: value.category,
        })
    }
}

/// Serializes the full list, preserving order.
pub fn encode(expenses: &[Expense]) -> Result<Vec<u8>, PersistenceError> {
    let stored: Vec<StoredExpense> = expenses.iter().map(StoredExpense::from).collect();
    Ok(serde_json::to_vec(&stored)?)
}

/// Parses a stored list, rejecting anything that is not well formed.
pub fn decode(bytes: &[u8]) -> Result<Vec<Expense>, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let stored: Vec<StoredExpense> = serde_json::from_str(text)?;
    stored.into_iter().map(Expense::try_from).collect()
}
