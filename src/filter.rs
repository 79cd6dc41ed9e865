//! Category filtering over the catalog.

use crate::catalog::{Category, ImageRecord};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The active filter selection: the wildcard or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter choices in filter-bar order.
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn matches(&self, record: &ImageRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => record.category == *c,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(c: Category) -> Self {
        CategoryFilter::Only(c)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

/// Stable subsequence of `records` matching `filter`.
///
/// `All` yields every record in order. Applying the same filter to its own
/// output returns the same sequence.
pub fn filter<'a, I>(records: I, filter: CategoryFilter) -> Vec<&'a ImageRecord>
where
    I: IntoIterator<Item = &'a ImageRecord>,
{
    records.into_iter().filter(|r| filter.matches(r)).collect()
}
