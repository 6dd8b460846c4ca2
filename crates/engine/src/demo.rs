//! Fixed sample entries for trying the tracker out.

use crate::{Category, MoneyCents, NewExpense};

/// `(title, cents, date, category)` in the order they are prepended.
const DEMO_ENTRIES: [(&str, i64, &str, Category); 4] = [
    ("Groceries", 42_35, "2026-01-05", Category::Food),
    ("Bus pass", 25_00, "2026-01-06", Category::Transport),
    ("Movie", 12_00, "2026-01-07", Category::Entertainment),
    ("Electricity", 58_83, "2026-01-02", Category::Utilities),
];

/// The sample entries, built directly without going through input parsing.
pub fn demo_expenses() -> Vec<NewExpense> {
    DEMO_ENTRIES
        .iter()
        .map(|(title, cents, date, category)| NewExpense {
            title: (*title).to_string(),
            amount: MoneyCents::new(*cents),
            date: (*date).to_string(),
            category: *category,
        })
        .collect()
}
