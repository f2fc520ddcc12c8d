//! Filter configuration for list views.

use super::ParseViewError;
use crate::model::todo::{Category, Todo};
use chrono::{Days, NaiveDate};
use std::str::FromStr;

/// Width of the "week" due bucket, inclusive of both ends.
const WEEK_WINDOW_DAYS: u64 = 7;

/// Category selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// Completion selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

/// Due-date bucket selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueDateFilter {
    #[default]
    All,
    Today,
    Week,
    Overdue,
}

/// Full filter configuration; the default keeps everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub due: DueDateFilter,
}

impl FilterState {
    /// Whether `todo` passes all three selectors on calendar day `today`.
    pub fn matches(&self, todo: &Todo, today: NaiveDate) -> bool {
        self.category.matches(todo) && self.status.matches(todo) && self.due.matches(todo, today)
    }
}

impl CategoryFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => todo.category == category,
        }
    }
}

impl StatusFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

impl DueDateFilter {
    /// Undated todos only pass `All`.
    pub fn matches(self, todo: &Todo, today: NaiveDate) -> bool {
        match (self, todo.due_date) {
            (Self::All, _) => true,
            (_, None) => false,
            (Self::Today, Some(due)) => due == today,
            (Self::Week, Some(due)) => {
                let window_end = today
                    .checked_add_days(Days::new(WEEK_WINDOW_DAYS))
                    .unwrap_or(NaiveDate::MAX);
                due >= today && due <= window_end
            }
            (Self::Overdue, Some(_)) => todo.is_overdue(today),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse::<Category>().map(Self::Only).map_err(|_| {
            ParseViewError::new(
                "category filter",
                value,
                "all|ML|GATE|Projects|Personal|Work",
            )
        })
    }
}

impl FromStr for StatusFilter {
    type Err = ParseViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseViewError::new(
                "status filter",
                value,
                "all|pending|completed",
            )),
        }
    }
}

impl FromStr for DueDateFilter {
    type Err = ParseViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseViewError::new(
                "due-date filter",
                value,
                "all|today|week|overdue",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryFilter, DueDateFilter, FilterState, StatusFilter};
    use crate::model::todo::{Category, NewTodo, Todo};
    use chrono::{Days, NaiveDate, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn due_in(days: i64) -> Todo {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let mut todo = Todo::from_request(NewTodo::new("t", Category::Work), 0, now).unwrap();
        todo.due_date = if days >= 0 {
            today().checked_add_days(Days::new(days as u64))
        } else {
            today().checked_sub_days(Days::new(days.unsigned_abs()))
        };
        todo
    }

    #[test]
    fn week_bucket_includes_seventh_day_and_excludes_eighth() {
        assert!(DueDateFilter::Week.matches(&due_in(0), today()));
        assert!(DueDateFilter::Week.matches(&due_in(7), today()));
        assert!(!DueDateFilter::Week.matches(&due_in(8), today()));
        assert!(!DueDateFilter::Week.matches(&due_in(-1), today()));
    }

    #[test]
    fn undated_todos_only_pass_all_bucket() {
        let mut undated = due_in(0);
        undated.due_date = None;
        assert!(DueDateFilter::All.matches(&undated, today()));
        for bucket in [
            DueDateFilter::Today,
            DueDateFilter::Week,
            DueDateFilter::Overdue,
        ] {
            assert!(!bucket.matches(&undated, today()));
        }
    }

    #[test]
    fn overdue_bucket_skips_completed() {
        let mut late = due_in(-2);
        assert!(DueDateFilter::Overdue.matches(&late, today()));
        late.completed = true;
        assert!(!DueDateFilter::Overdue.matches(&late, today()));
    }

    #[test]
    fn combined_filter_requires_every_selector() {
        let todo = due_in(0);
        let filter = FilterState {
            category: CategoryFilter::Only(Category::Work),
            status: StatusFilter::Pending,
            due: DueDateFilter::Today,
        };
        assert!(filter.matches(&todo, today()));

        let other_category = FilterState {
            category: CategoryFilter::Only(Category::Ml),
            ..filter
        };
        assert!(!other_category.matches(&todo, today()));
    }

    #[test]
    fn selectors_parse_from_text() {
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "projects".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Projects)
        );
        assert_eq!("done".parse::<StatusFilter>().unwrap(), StatusFilter::Completed);
        assert!("someday".parse::<DueDateFilter>().is_err());
    }
}
