//! Aggregate statistics over the whole collection.

use crate::model::todo::{Category, Todo};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Collection counters; `pending + completed == total` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    /// Contains every `Category`, zero when unused.
    pub by_category: BTreeMap<Category, usize>,
}

impl TodoStats {
    pub fn compute(todos: &[Todo], today: NaiveDate) -> Self {
        let mut by_category: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|category| (category, 0)).collect();
        let mut completed = 0;
        let mut overdue = 0;

        for todo in todos {
            if todo.completed {
                completed += 1;
            }
            if todo.is_overdue(today) {
                overdue += 1;
            }
            *by_category.entry(todo.category).or_insert(0) += 1;
        }

        Self {
            total: todos.len(),
            completed,
            pending: todos.len() - completed,
            overdue,
            by_category,
        }
    }

    /// Count for one category.
    pub fn category_count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    /// Completed share in whole percent, 0 for an empty collection.
    pub fn completion_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }
}
