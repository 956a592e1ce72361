//! Server-rendered task list.

use axum::{extract::State, response::Html};
use axum_helpers::AppError;
use minijinja::{Environment, context};
use serde::Serialize;
use std::sync::Arc;

use crate::models::Task;
use crate::repository::TaskRepository;
use crate::service::TaskService;

const TASK_LIST: &str = "task_list.html";

pub const LOAD_ERROR_MESSAGE: &str = "Error loading tasks. Please try again later.";

/// State shared by the HTML routes.
pub struct TaskPages<R: TaskRepository> {
    pub(crate) service: Arc<TaskService<R>>,
    pub(crate) templates: Arc<Environment<'static>>,
}

impl<R: TaskRepository> Clone for TaskPages<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            templates: Arc::clone(&self.templates),
        }
    }
}

/// Load the page templates. `.html` names are autoescaped.
pub fn templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(TASK_LIST, include_str!("../../templates/task_list.html"))?;
    Ok(env)
}

#[derive(Debug, Serialize)]
struct TaskRow {
    title: String,
    description: String,
    status: &'static str,
    /// Snake-case status, used as the `status-*` CSS class
    status_key: String,
    due_date: Option<String>,
}

impl From<Task> for TaskRow {
    fn from(task: Task) -> Self {
        Self {
            title: task.title,
            description: task.description,
            status: task.status.label(),
            status_key: task.status.to_string(),
            due_date: task
                .due_date
                .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string()),
        }
    }
}

/// `GET /`: every task in list order. A failing store still renders the
/// page, empty and with an error banner.
pub async fn task_list<R: TaskRepository>(
    State(pages): State<TaskPages<R>>,
) -> Result<Html<String>, AppError> {
    let (rows, error): (Vec<TaskRow>, Option<&str>) = match pages.service.list_tasks().await {
        Ok(tasks) => (tasks.into_iter().map(TaskRow::from).collect(), None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load tasks for the task list page");
            (Vec::new(), Some(LOAD_ERROR_MESSAGE))
        }
    };

    let html = pages
        .templates
        .get_template(TASK_LIST)
        .and_then(|template| template.render(context! { tasks => rows, error => error }))
        .map_err(|e| AppError::Template(e.to_string()))?;

    Ok(Html(html))
}
