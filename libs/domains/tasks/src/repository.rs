use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{NewTask, Task};

/// Repository trait for Task persistence
///
/// Implementations must return `list` in [`list_order`](crate::models::list_order).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, due date ascending with undated tasks last
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Insert a task and return it with its assigned id
    async fn create(&self, input: NewTask) -> TaskResult<Task>;

    /// Overwrite the mutable columns of `task.id`; `None` if the row is gone
    async fn update(&self, task: Task) -> TaskResult<Option<Task>>;

    /// Delete a task by ID, `true` if a row was removed
    async fn delete(&self, id: i32) -> TaskResult<bool>;
}
