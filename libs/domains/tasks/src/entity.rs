use crate::models::{NewTask, Task, TaskStatus};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the `tasks` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub status: TaskStatus,
    pub created_at: DateTimeWithTimeZone,
    pub update_task: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Task
impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            due_date: model.due_date.map(Into::into),
            status: model.status,
            created_at: model.created_at.into(),
            update_task: model.update_task.into(),
        }
    }
}

// Insert: the id comes from the SERIAL column, both timestamps from `created_at`
impl From<NewTask> for ActiveModel {
    fn from(input: NewTask) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            due_date: Set(input.due_date.map(Into::into)),
            status: Set(input.status),
            created_at: Set(input.created_at.into()),
            update_task: Set(input.created_at.into()),
        }
    }
}

// Update: every mutable column is written, `created_at` never is
impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Unchanged(task.id),
            title: Set(task.title),
            description: Set(task.description),
            due_date: Set(task.due_date.map(Into::into)),
            status: Set(task.status),
            created_at: NotSet,
            update_task: Set(task.update_task.into()),
        }
    }
}
