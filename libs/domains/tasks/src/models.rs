use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Longest accepted title, in characters.
pub const TITLE_MAX_LEN: usize = 255;

pub const INVALID_STATUS: &str = "Invalid status. Must be one of: pending, in_progress, completed";

/// Task status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TaskStatus {
    /// Task not started
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Task in progress
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Task completed
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl TaskStatus {
    /// Parse user input: surrounding whitespace is ignored and matching is
    /// case-insensitive. Blank input is not a status.
    pub fn from_input(input: &str) -> Option<Self> {
        input.trim().parse().ok()
    }

    /// Human-readable label for the HTML page.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// Task entity - represents a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier, assigned by the store
    pub id: i32,
    /// Task title
    pub title: String,
    /// Task description, empty when not given
    pub description: String,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Task status
    pub status: TaskStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub update_task: DateTime<Utc>,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(
        required(message = "Title is required"),
        custom(function = "validate_title")
    )]
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    /// One of `pending`, `in_progress`, `completed` (case-insensitive)
    #[validate(custom(function = "validate_status"))]
    #[schema(example = "pending")]
    pub status: Option<String>,
}

/// DTO for updating an existing task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    /// `null` is an empty title, not an absent one
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    pub description: Option<String>,
    /// `null` keeps the stored due date
    pub due_date: Option<DateTime<Utc>>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
}

/// A validated task ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl CreateTask {
    /// Normalise a validated request into the row to insert.
    pub fn into_new_task(self, now: DateTime<Utc>) -> NewTask {
        NewTask {
            title: self.title.unwrap_or_default().trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            due_date: self.due_date.map(truncate_micros),
            status: self
                .status
                .as_deref()
                .and_then(TaskStatus::from_input)
                .unwrap_or_default(),
            created_at: now,
        }
    }
}

impl Task {
    /// Apply a validated update.
    ///
    /// `update_task` always moves forward, by at least one microsecond.
    pub fn apply_update(&mut self, update: UpdateTask, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(truncate_micros(due_date));
        }
        if let Some(status) = update.status.as_deref().and_then(TaskStatus::from_input) {
            self.status = status;
        }

        let floor = self.update_task + chrono::Duration::microseconds(1);
        self.update_task = now.max(floor);
    }
}

/// List order: due date ascending with undated tasks last, then newest
/// first, then highest id first.
pub fn list_order(a: &Task, b: &Task) -> Ordering {
    let by_due = match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_due
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Current time at the precision PostgreSQL stores.
pub fn now_micros() -> DateTime<Utc> {
    truncate_micros(Utc::now())
}

fn truncate_micros(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(6)
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("title")
            .with_message(Cow::Borrowed("Title cannot be empty")));
    }
    if trimmed.chars().count() > TITLE_MAX_LEN {
        return Err(ValidationError::new("title")
            .with_message(Cow::Borrowed("Title must be at most 255 characters")));
    }
    Ok(())
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    match TaskStatus::from_input(status) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("status").with_message(Cow::Borrowed(INVALID_STATUS))),
    }
}

/// First failing field's message, checking `title` before `status` so the
/// response does not depend on map iteration order.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    ["title", "status"]
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

// A missing key stays `None` through `serde(default)`; an explicit `null`
// becomes `Some("")` so title validation rejects it.
fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| Some(value.unwrap_or_default()))
}
