mod api;
pub mod web;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use axum_helpers::ErrorResponse;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub use web::TaskPages;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::list_tasks,
        api::create_task,
        api::get_task,
        api::update_task,
        api::delete_task,
    ),
    components(
        schemas(Task, TaskStatus, CreateTask, UpdateTask, ErrorResponse)
    ),
    tags(
        (name = "tasks", description = "Task CRUD operations")
    )
)]
pub struct TasksApiDoc;

/// JSON routes, to be nested under `/api`
pub fn api_router<R: TaskRepository + 'static>(service: Arc<TaskService<R>>) -> Router {
    Router::new()
        .route("/tasks/", get(api::list_tasks::<R>))
        .route("/tasks/create/", post(api::create_task::<R>))
        .route("/tasks/{id}/", get(api::get_task::<R>))
        .route("/tasks/{id}/update/", put(api::update_task::<R>))
        .route("/tasks/{id}/delete/", delete(api::delete_task::<R>))
        .with_state(service)
}

/// HTML routes, merged at the root
pub fn web_router<R: TaskRepository + 'static>(
    service: Arc<TaskService<R>>,
) -> Result<Router, minijinja::Error> {
    let pages = TaskPages {
        service,
        templates: Arc::new(web::templates()?),
    };

    Ok(Router::new()
        .route("/", get(web::task_list::<R>))
        .with_state(pages))
}
