//! In-process [`TaskRepository`], for tests and for running without PostgreSQL.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::{
    error::TaskResult,
    models::{NewTask, Task, list_order},
    repository::TaskRepository,
};

#[derive(Debug)]
struct Store {
    tasks: BTreeMap<i32, Task>,
    next_id: i32,
}

/// Tasks kept in a map behind a lock. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryTaskRepository {
    store: RwLock<Store>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                tasks: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        let store = self.store.read().await;
        let mut tasks: Vec<Task> = store.tasks.values().cloned().collect();
        tasks.sort_by(list_order);
        Ok(tasks)
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        Ok(self.store.read().await.tasks.get(&id).cloned())
    }

    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;

        let task = Task {
            id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status,
            created_at: input.created_at,
            update_task: input.created_at,
        };
        store.tasks.insert(id, task.clone());

        tracing::info!(task_id = %id, "Created task");
        Ok(task)
    }

    async fn update(&self, task: Task) -> TaskResult<Option<Task>> {
        let mut store = self.store.write().await;
        let Some(existing) = store.tasks.get_mut(&task.id) else {
            return Ok(None);
        };

        existing.title = task.title;
        existing.description = task.description;
        existing.due_date = task.due_date;
        existing.status = task.status;
        existing.update_task = task.update_task;

        tracing::info!(task_id = %task.id, "Updated task");
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let removed = self.store.write().await.tasks.remove(&id).is_some();
        if removed {
            tracing::info!(task_id = %id, "Deleted task");
        }
        Ok(removed)
    }
}
