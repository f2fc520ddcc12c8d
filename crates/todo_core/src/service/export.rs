//! User-facing export rendering.
//!
//! # Responsibility
//! - Render the collection as a JSON array or a Markdown document.
//! - Parse a JSON export back into records.
//!
//! # Invariants
//! - Records appear in collection order; export never re-sorts.

use crate::model::todo::Todo;
use crate::view::due::short_date;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MARKDOWN_HEADER: &str = "# Todo List Export";
const EMPTY_DESCRIPTION: &str = "No description";

/// Export output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Markdown => "text/markdown",
        }
    }

    /// Download name, e.g. `todos-2026-10-19.md`.
    pub fn file_name(self, today: NaiveDate) -> String {
        format!("todos-{}.{}", today.format("%Y-%m-%d"), self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(ExportError::UnknownFormat(value.to_string())),
        }
    }
}

/// Export serialization, parse or format-selection failure.
#[derive(Debug)]
pub enum ExportError {
    Json(serde_json::Error),
    InvalidRecord(String),
    UnknownFormat(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "json export error: {err}"),
            Self::InvalidRecord(message) => write!(f, "invalid exported todo: {message}"),
            Self::UnknownFormat(value) => {
                write!(f, "unsupported export format `{value}`; expected json|markdown")
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidRecord(_) | Self::UnknownFormat(_) => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Renders `todos` in the requested format.
pub fn render_export(todos: &[Todo], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(todos)?),
        ExportFormat::Markdown => Ok(render_markdown(todos)),
    }
}

/// Parses a JSON export and validates each record.
pub fn parse_json_export(raw: &str) -> Result<Vec<Todo>, ExportError> {
    let todos: Vec<Todo> = serde_json::from_str(raw)?;
    for todo in &todos {
        todo.validate()
            .map_err(|err| ExportError::InvalidRecord(format!("`{}`: {err}", todo.id)))?;
    }
    Ok(todos)
}

fn render_markdown(todos: &[Todo]) -> String {
    let blocks: Vec<String> = todos.iter().map(markdown_block).collect();
    format!("{MARKDOWN_HEADER}\n\n{}", blocks.join("\n\n"))
}

fn markdown_block(todo: &Todo) -> String {
    let status = if todo.completed { "✅" } else { "❌" };
    let due = todo
        .due_date
        .map(|date| format!(" (Due: {})", short_date(date)))
        .unwrap_or_default();
    let description = if todo.description.is_empty() {
        EMPTY_DESCRIPTION
    } else {
        todo.description.as_str()
    };

    format!(
        "{status} **{}** [{}]{due}\n   {description}",
        todo.title, todo.category
    )
}

#[cfg(test)]
mod tests {
    use super::{render_export, ExportError, ExportFormat};
    use crate::model::todo::{Category, NewTodo, Todo};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn markdown_renders_status_due_and_placeholder() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let mut done = Todo::from_request(
            NewTodo::new("Read paper", Category::Ml).description("attention is all you need"),
            0,
            now,
        )
        .unwrap();
        done.completed = true;
        let open = Todo::from_request(
            NewTodo::new("Mock test", Category::Gate).due(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()),
            1,
            now,
        )
        .unwrap();

        let markdown = render_export(&[done, open], ExportFormat::Markdown).unwrap();
        assert_eq!(
            markdown,
            "# Todo List Export\n\n\
             ✅ **Read paper** [ML]\n   attention is all you need\n\n\
             ❌ **Mock test** [GATE] (Due: 11/2/2026)\n   No description"
        );
    }

    #[test]
    fn format_metadata_matches_download_names() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(ExportFormat::Json.file_name(today), "todos-2026-10-19.json");
        assert_eq!(ExportFormat::Markdown.file_name(today), "todos-2026-10-19.md");
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!(ExportFormat::Json.mime_type(), "application/json");
    }

    #[test]
    fn unknown_format_reports_export_error() {
        let err = "csv".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(&err, ExportError::UnknownFormat(value) if value == "csv"));
        assert_eq!(
            err.to_string(),
            "unsupported export format `csv`; expected json|markdown"
        );
    }
}
