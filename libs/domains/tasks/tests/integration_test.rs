//! PostgreSQL round trips through `PgTaskRepository` and `TaskService`.
//!
//! Run with `cargo test -p domain_tasks -- --ignored` on a machine with Docker.

use domain_tasks::{CreateTask, PgTaskRepository, TaskError, TaskService, TaskStatus, UpdateTask};
use test_utils::assertions::assert_sorted_by_key;
use test_utils::{TestDataBuilder, TestDatabase};

async fn service(db: &TestDatabase) -> TaskService<PgTaskRepository> {
    db.truncate_tasks().await;
    TaskService::new(PgTaskRepository::new(db.connection()))
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_crud_round_trip() {
    let db = TestDatabase::new().await;
    let service = service(&db).await;
    let data = TestDataBuilder::from_test_name("test_crud_round_trip");

    let created = service
        .create_task(CreateTask {
            title: Some(data.title("milk")),
            due_date: Some(data.due_date(1)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.created_at, created.update_task);

    let fetched = service.get_task(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = service
        .update_task(
            created.id,
            UpdateTask {
                status: Some("completed".to_string()),
                due_date: None,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.due_date, created.due_date);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.update_task > created.update_task);

    service.delete_task(created.id).await.unwrap();
    assert!(matches!(
        service.get_task(created.id).await,
        Err(TaskError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_task(created.id).await,
        Err(TaskError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_list_puts_undated_tasks_last() {
    let db = TestDatabase::new().await;
    let service = service(&db).await;
    let data = TestDataBuilder::from_test_name("test_list_puts_undated_tasks_last");

    for (suffix, due) in [("undated", None), ("late", Some(5)), ("early", Some(1))] {
        service
            .create_task(CreateTask {
                title: Some(data.title(suffix)),
                due_date: due.map(|days| data.due_date(days)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let tasks = service.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].title, data.title("early"));
    assert_eq!(tasks[1].title, data.title("late"));
    assert_eq!(tasks[2].due_date, None);
    assert_sorted_by_key(&tasks[..2], |t| t.due_date, "dated tasks");
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_update_of_deleted_row_is_not_found() {
    let db = TestDatabase::new().await;
    let service = service(&db).await;

    let created = service
        .create_task(CreateTask {
            title: Some("ephemeral".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    service.delete_task(created.id).await.unwrap();

    let err = service
        .update_task(created.id, UpdateTask::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::NotFound(id) if id == created.id));
}
