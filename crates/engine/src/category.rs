//! Fixed expense categories and the list filter built on them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Closed set of categories an expense can belong to.
///
/// Serialized with the exact variant names (`"Food"`, `"Utilities"`, ...).
/// Any other string in storage is a shape mismatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Food,
    Utilities,
    Transport,
    Entertainment,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Utilities,
        Category::Transport,
        Category::Entertainment,
        Category::Other,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Utilities => "Utilities",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive match on the category label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(needle.to_string()))
    }
}

/// Transient list filter: every category, or exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter options in selector order: `All` first, then each category.
    pub const OPTIONS: [CategoryFilter; 6] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Food),
        CategoryFilter::Only(Category::Utilities),
        CategoryFilter::Only(Category::Transport),
        CategoryFilter::Only(Category::Entertainment),
        CategoryFilter::Only(Category::Other),
    ];

    /// Exact category match, or always `true` for `All`.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => only == category,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = self.position();
        Self::OPTIONS[(idx + 1) % Self::OPTIONS.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = self.position();
        Self::OPTIONS[(idx + Self::OPTIONS.len() - 1) % Self::OPTIONS.len()]
    }

    fn position(self) -> usize {
        Self::OPTIONS
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}
