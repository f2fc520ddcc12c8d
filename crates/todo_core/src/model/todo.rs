//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record shared by store, views and exports.
//! - Define create/edit request shapes used at the mutation boundary.
//!
//! # Invariants
//! - `id` is stable and never reused for another todo.
//! - `title` is never stored empty; callers pass untrimmed input.
//! - `updated_at` is never earlier than `created_at`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of one todo (UUID v4 text for new records).
///
/// Kept as `String` because restored snapshots may carry ids produced by
/// older front ends in other formats.
pub type TodoId = String;

/// Fixed category set for todos.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    #[serde(rename = "ML")]
    Ml,
    #[serde(rename = "GATE")]
    Gate,
    Projects,
    #[default]
    Personal,
    Work,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 5] = [
        Self::Ml,
        Self::Gate,
        Self::Projects,
        Self::Personal,
        Self::Work,
    ];

    /// Stable display and wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ml => "ML",
            Self::Gate => "GATE",
            Self::Projects => "Projects",
            Self::Personal => "Personal",
            Self::Work => "Work",
        }
    }

    /// Short glyph shown next to the category tag.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Ml => "🤖",
            Self::Gate => "🎓",
            Self::Projects => "💻",
            Self::Personal => "👤",
            Self::Work => "💼",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TodoValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| TodoValidationError::UnknownCategory(normalized.to_string()))
    }
}

/// Validation failures for todo records and edit input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyId,
    EmptyTitle,
    UpdatedBeforeCreated {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
    UnknownCategory(String),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "todo id cannot be empty"),
            Self::EmptyTitle => write!(f, "todo title cannot be empty"),
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({}) must be >= createdAt ({})",
                updated_at.to_rfc3339(),
                created_at.to_rfc3339()
            ),
            Self::UnknownCategory(value) => write!(
                f,
                "unknown category `{value}`; expected ML|GATE|Projects|Personal|Work"
            ),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical todo record.
///
/// Field order is the serialization order of snapshots and JSON exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    /// Lightweight markup; interpreted by display layers only.
    pub description: String,
    pub category: Category,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::model::due_date_serde"
    )]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Manual sort position.
    pub order: usize,
}

impl Todo {
    /// Builds a fresh pending todo with a generated id.
    ///
    /// Returns `None` when `request.title` trims to empty.
    pub fn from_request(request: NewTodo, order: usize, now: DateTime<Utc>) -> Option<Self> {
        let title = request.title.trim();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: request.description.trim().to_string(),
            category: request.category,
            due_date: request.due_date,
            completed: false,
            created_at: now,
            updated_at: now,
            order,
        })
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.trim().is_empty() {
            return Err(TodoValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        if self.updated_at < self.created_at {
            return Err(TodoValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Whether the due date is strictly before `today` and work is open.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }

    /// Stamps `updated_at`, never moving it before `created_at`.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

/// Create request for one todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            category,
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Partial edit applied by `TodoStore::update`.
///
/// `None` leaves a field untouched. `due_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
    pub order: Option<usize>,
}

impl TodoPatch {
    /// Trims text fields and rejects a title that trims to empty.
    pub fn normalized(self) -> Result<Self, TodoValidationError> {
        let title = match self.title {
            Some(title) => {
                let trimmed = title.trim();
                if trimmed.is_empty() {
                    return Err(TodoValidationError::EmptyTitle);
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        Ok(Self {
            title,
            description: self
                .description
                .map(|description| description.trim().to_string()),
            ..self
        })
    }

    /// Merges patch fields into `todo`. Does not stamp `updated_at`.
    pub(crate) fn apply_to(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(category) = self.category {
            todo.category = category;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(order) = self.order {
            todo.order = order;
        }
    }
}
