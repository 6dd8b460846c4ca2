use std::fmt;

use chrono::{NaiveDate, Utc};

use crate::{Category, MoneyCents, ValidationError};

/// Opaque identity of an expense.
///
/// Fresh ids are decimal millisecond timestamps (see [`IdGenerator`]), but any
/// string read back from storage is accepted as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn timestamp(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One spending record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub amount: MoneyCents,
    /// Externally supplied date text, normally ISO `YYYY-MM-DD`.
    pub date: String,
    pub category: Category,
}

impl Expense {
    /// The date as a calendar date, when it is ISO formatted.
    #[must_use]
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Validated input for a new expense, still without identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub title: String,
    pub amount: MoneyCents,
    pub date: String,
    pub category: Category,
}

impl NewExpense {
    /// Applies the entry contract to raw form input.
    ///
    /// Checks run in order title, amount, date; the first failure wins.
    pub fn parse(
        title: &str,
        amount: &str,
        date: &str,
        category: Category,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let amount = amount.parse::<MoneyCents>()?;
        let date = date.trim();
        if date.is_empty() {
            return Err(ValidationError::EmptyDate);
        }

        Ok(Self {
            title: title.to_string(),
            amount,
            date: date.to_string(),
            category,
        })
    }

    pub(crate) fn with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            date: self.date,
            category: self.category,
        }
    }
}

/// Issues session-unique, strictly increasing millisecond ids.
///
/// Once the numeric space is used up (a stored id at `i64::MAX`), ids become
/// `"{i64::MAX}-{n}"` with a counter that also skips observed ids.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: i64,
    overflow: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure ids issued later sort after `id` when it is numeric.
    pub fn observe(&mut self, id: &ExpenseId) {
        if let Some(ts) = id.timestamp() {
            self.last = self.last.max(ts);
        } else if let Some(n) = overflow_counter(id.as_str()) {
            self.overflow = self.overflow.max(n);
        }
    }

    pub fn next_id(&mut self) -> ExpenseId {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, now_ms: i64) -> ExpenseId {
        match self.last.checked_add(1) {
            Some(floor) => {
                let next = now_ms.max(floor);
                self.last = next;
                ExpenseId(next.to_string())
            }
            None => {
                self.overflow = self.overflow.saturating_add(1);
                ExpenseId(format!("{}-{}", i64::MAX, self.overflow))
            }
        }
    }
}

fn overflow_counter(id: &str) -> Option<u64> {
    id.strip_prefix(i64::MAX.to_string().as_str())?
        .strip_prefix('-')?
        .parse()
        .ok()
}
