//! Sort options for list views.

use super::ParseViewError;
use crate::model::todo::Todo;
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;
use log::warn;
use std::cmp::Ordering;
use std::str::FromStr;

thread_local! {
    static COLLATOR: Option<Collator> = new_collator();
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOption {
    /// Ascending `order`.
    #[default]
    Manual,
    /// Dated todos first by date, undated last by `order`.
    DueDate,
    /// Category name, then `order`.
    Category,
    /// Newest `created_at` first.
    Created,
    /// Title, Unicode collation.
    Alphabetical,
}

impl SortOption {
    /// Comparator for a stable sort; ties not listed above stay `Equal`.
    pub fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            Self::Manual => a.order.cmp(&b.order),
            Self::DueDate => match (a.due_date, b.due_date) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.order.cmp(&b.order),
            },
            Self::Category => {
                if a.category == b.category {
                    a.order.cmp(&b.order)
                } else {
                    locale_compare(a.category.as_str(), b.category.as_str())
                }
            }
            Self::Created => b.created_at.cmp(&a.created_at),
            Self::Alphabetical => locale_compare(&a.title, &b.title),
        }
    }
}

/// Unicode collation at tertiary strength: base letters first, then
/// accents, then case with lowercase before uppercase.
///
/// Falls back to code point order if the collation data cannot be loaded.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

fn new_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&locale!("en").into(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            warn!("event=collator_init module=view status=error error={err}");
            None
        }
    }
}

impl FromStr for SortOption {
    type Err = ParseViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "duedate" | "due-date" | "due_date" | "due" => Ok(Self::DueDate),
            "category" => Ok(Self::Category),
            "created" => Ok(Self::Created),
            "alphabetical" | "alpha" | "title" => Ok(Self::Alphabetical),
            _ => Err(ParseViewError::new(
                "sort option",
                value,
                "manual|due-date|category|created|alphabetical",
            )),
        }
    }
}
