//! Derived read-only projections over the todo collection.
//!
//! # Responsibility
//! - Filter and sort the collection for list rendering.
//! - Compute aggregate statistics and due-date labels.
//!
//! # Invariants
//! - Every function here is pure: inputs are the current collection, view
//!   configuration and "today"; nothing is cached or persisted.

pub mod due;
pub mod filter;
pub mod sort;
pub mod stats;

use crate::model::todo::Todo;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use filter::{CategoryFilter, DueDateFilter, FilterState, StatusFilter};
pub use sort::SortOption;
pub use stats::TodoStats;

/// Failure to parse a view option from its text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseViewError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseViewError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

impl Display for ParseViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported {} `{}`; expected {}",
            self.kind, self.value, self.expected
        )
    }
}

impl Error for ParseViewError {}

/// Filters then stably sorts `todos` for display.
pub fn derive_view<'a>(
    todos: &'a [Todo],
    filter: &FilterState,
    sort: SortOption,
    today: NaiveDate,
) -> Vec<&'a Todo> {
    let mut visible: Vec<&Todo> = todos
        .iter()
        .filter(|todo| filter.matches(todo, today))
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}
