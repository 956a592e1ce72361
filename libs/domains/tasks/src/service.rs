use observability::TaskMetrics;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask, first_validation_message, now_micros};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All tasks, due date ascending with undated tasks last
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        measured("list", self.repository.list()).await
    }

    /// Validate, normalise and store a new task
    #[instrument(skip(self, input))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        measured("create", async {
            validate(&input)?;
            let new_task = input.into_new_task(now_micros());
            self.repository.create(new_task).await
        })
        .await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Task> {
        measured("get", self.find(id)).await
    }

    /// Apply the supplied fields to an existing task.
    ///
    /// A missing task is reported before any field validation.
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: i32, input: UpdateTask) -> TaskResult<Task> {
        measured("update", async {
            let mut task = self.find(id).await?;
            validate(&input)?;

            task.apply_update(input, now_micros());

            self.repository
                .update(task)
                .await?
                .ok_or(TaskError::NotFound(id))
        })
        .await
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<()> {
        measured("delete", async {
            if id < 1 || !self.repository.delete(id).await? {
                return Err(TaskError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find(&self, id: i32) -> TaskResult<Task> {
        if id < 1 {
            return Err(TaskError::NotFound(id));
        }

        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }
}

fn validate(input: &impl Validate) -> TaskResult<()> {
    input
        .validate()
        .map_err(|e| TaskError::Validation(first_validation_message(&e)))
}

async fn measured<T>(
    operation: &'static str,
    fut: impl Future<Output = TaskResult<T>>,
) -> TaskResult<T> {
    let started = Instant::now();
    let result = fut.await;
    TaskMetrics::record(operation, &result, started.elapsed());
    result
}
