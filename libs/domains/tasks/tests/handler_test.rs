use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use domain_tasks::{
    InMemoryTaskRepository, NewTask, Task, TaskError, TaskRepository, TaskResult, TaskService,
    TasksApiDoc, api_router, web_router,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with<R: TaskRepository + 'static>(repository: R) -> Router {
    let service = Arc::new(TaskService::new(repository));
    let pages = web_router(service.clone()).unwrap();
    axum_helpers::create_router::<TasksApiDoc>(api_router(service), pages).unwrap()
}

fn app() -> Router {
    app_with(InMemoryTaskRepository::new())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get_html(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, task) = send(app, "POST", "/api/tasks/create/", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {task}");
    task
}

#[tokio::test]
async fn test_create_minimal_task() {
    let app = app();
    let task = create(&app, json!({"title": "Buy milk"})).await;

    assert_eq!(task["id"], 1);
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["status"], "pending");
    assert_eq!(task["description"], "");
    assert_eq!(task["due_date"], Value::Null);
    assert_eq!(task["created_at"], task["update_task"]);
    assert!(task["created_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_create_normalises_input() {
    let app = app();
    let task = create(
        &app,
        json!({
            "title": "  Call mum ",
            "description": " weekly ",
            "due_date": "2030-01-01T12:00:00+02:00",
            "status": "In_Progress"
        }),
    )
    .await;

    assert_eq!(task["title"], "Call mum");
    assert_eq!(task["description"], "weekly");
    assert_eq!(task["due_date"], "2030-01-01T10:00:00Z");
    assert_eq!(task["status"], "in_progress");
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = app();
    let cases = [
        (json!({}), "Title is required"),
        (json!({"title": null}), "Title is required"),
        (json!({"title": "   "}), "Title cannot be empty"),
        (
            json!({"title": "x".repeat(256)}),
            "Title must be at most 255 characters",
        ),
        (
            json!({"title": "Buy milk", "status": "done"}),
            "Invalid status. Must be one of: pending, in_progress, completed",
        ),
        (
            json!({"title": "Buy milk", "status": ""}),
            "Invalid status. Must be one of: pending, in_progress, completed",
        ),
    ];

    for (body, message) in cases {
        let (status, error) = send(&app, "POST", "/api/tasks/create/", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(error, json!({"error": message}), "body: {body}");
    }

    let (_, tasks) = send(&app, "GET", "/api/tasks/", None).await;
    assert_eq!(tasks, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tasks/create/")
                .header("content-type", "application/json")
                .body(Body::from("{\"title\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unparsable_due_date_is_bad_request() {
    let app = app();
    for due_date in ["tomorrow", "2030-01-01T09:00:00"] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/tasks/create/",
            Some(json!({"title": "Buy milk", "due_date": due_date})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "due_date: {due_date}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_get_task() {
    let app = app();
    let created = create(&app, json!({"title": "Buy milk"})).await;

    let (status, task) = send(&app, "GET", "/api/tasks/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task, created);
}

#[tokio::test]
async fn test_missing_and_invalid_ids_are_not_found() {
    let app = app();
    create(&app, json!({"title": "Buy milk"})).await;

    for id in ["42", "0", "-1", "+1", "01x", "abc", "1.5"] {
        for (method, uri, body) in [
            ("GET", format!("/api/tasks/{id}/"), None),
            (
                "PUT",
                format!("/api/tasks/{id}/update/"),
                Some(json!({"title": "x"})),
            ),
            ("DELETE", format!("/api/tasks/{id}/delete/"), None),
        ] {
            let (status, error) = send(&app, method, &uri, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(error, json!({"error": "Task not found"}), "{method} {uri}");
        }
    }
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let app = app();
    let before = create(
        &app,
        json!({"title": "Buy milk", "description": "2 litres", "due_date": "2030-01-01T09:00:00Z"}),
    )
    .await;

    let (status, after) = send(
        &app,
        "PUT",
        "/api/tasks/1/update/",
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(after["status"], "completed");
    for field in ["id", "title", "description", "due_date", "created_at"] {
        assert_eq!(after[field], before[field], "field {field} changed");
    }
    let parse = |v: &Value| {
        chrono::DateTime::parse_from_rfc3339(v["update_task"].as_str().unwrap()).unwrap()
    };
    assert!(parse(&after) > parse(&before));
}

#[tokio::test]
async fn test_update_timestamp_strictly_increases() {
    let app = app();
    let mut previous = create(&app, json!({"title": "Buy milk"})).await;

    for _ in 0..5 {
        let (_, next) = send(&app, "PUT", "/api/tasks/1/update/", Some(json!({}))).await;
        let parse = |v: &Value| {
            chrono::DateTime::parse_from_rfc3339(v["update_task"].as_str().unwrap()).unwrap()
        };
        assert!(parse(&next) > parse(&previous));
        assert_eq!(next["created_at"], previous["created_at"]);
        previous = next;
    }
}

#[tokio::test]
async fn test_update_due_date_null_keeps_it() {
    let app = app();
    create(
        &app,
        json!({"title": "Buy milk", "due_date": "2030-01-01T09:00:00Z"}),
    )
    .await;

    let (_, kept) = send(
        &app,
        "PUT",
        "/api/tasks/1/update/",
        Some(json!({"description": null})),
    )
    .await;
    assert_eq!(kept["due_date"], "2030-01-01T09:00:00Z");

    let (status, kept) = send(
        &app,
        "PUT",
        "/api/tasks/1/update/",
        Some(json!({"due_date": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept["due_date"], "2030-01-01T09:00:00Z");

    let (_, moved) = send(
        &app,
        "PUT",
        "/api/tasks/1/update/",
        Some(json!({"due_date": "2030-02-01T09:00:00Z"})),
    )
    .await;
    assert_eq!(moved["due_date"], "2030-02-01T09:00:00Z");
}

#[tokio::test]
async fn test_update_validation_errors() {
    let app = app();
    create(&app, json!({"title": "Buy milk"})).await;

    let (status, error) = send(
        &app,
        "PUT",
        "/api/tasks/1/update/",
        Some(json!({"title": " "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({"error": "Title cannot be empty"}));

    let (status, error) = send(
        &app,
        "PUT",
        "/api/tasks/1/update/",
        Some(json!({"title": null})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({"error": "Title cannot be empty"}));

    let (status, _) = send(
        &app,
        "PUT",
        "/api/tasks/1/update/",
        Some(json!({"status": "archived"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, task) = send(&app, "GET", "/api/tasks/1/", None).await;
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["status"], "pending");
}

#[tokio::test]
async fn test_delete_then_everything_is_not_found() {
    let app = app();
    create(&app, json!({"title": "Buy milk"})).await;

    let (status, body) = send(&app, "DELETE", "/api/tasks/1/delete/", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", "/api/tasks/1/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "PUT", "/api/tasks/1/update/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/api/tasks/1/delete/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Ids are not reused after a delete.
    let task = create(&app, json!({"title": "Again"})).await;
    assert_eq!(task["id"], 2);
}

#[tokio::test]
async fn test_list_orders_by_due_date_nulls_last() {
    let app = app();
    create(&app, json!({"title": "undated"})).await;
    create(&app, json!({"title": "later", "due_date": "2030-03-01T00:00:00Z"})).await;
    create(&app, json!({"title": "sooner", "due_date": "2030-02-01T00:00:00Z"})).await;
    create(&app, json!({"title": "undated too"})).await;

    let (status, tasks) = send(&app, "GET", "/api/tasks/", None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(&titles[..2], &["sooner", "later"]);
    assert!(titles[2..].contains(&"undated"));
    assert!(titles[2..].contains(&"undated too"));
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/tasks/create/", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "The requested resource was not found"})
    );
}

#[tokio::test]
async fn test_html_task_list() {
    let app = app();
    create(&app, json!({"title": "undated"})).await;
    create(
        &app,
        json!({"title": "<b>dated</b>", "due_date": "2030-02-01T08:30:00Z", "status": "completed"}),
    )
    .await;

    let (status, html) = get_html(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("&lt;b&gt;dated"));
    assert!(!html.contains("<b>dated"));
    assert!(html.contains("2030-02-01 08:30 UTC"));
    assert!(html.contains(r#"<td class="status-completed">Completed</td>"#));
    assert!(html.contains(r#"<td class="status-pending">Pending</td>"#));

    let dated = html.find("&lt;b&gt;dated").unwrap();
    let undated = html.find("undated").unwrap();
    assert!(dated < undated);
}

struct FailingRepository;

#[async_trait]
impl TaskRepository for FailingRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        Err(TaskError::Database("connection refused".to_string()))
    }

    async fn get_by_id(&self, _id: i32) -> TaskResult<Option<Task>> {
        Err(TaskError::Database("connection refused".to_string()))
    }

    async fn create(&self, _input: NewTask) -> TaskResult<Task> {
        Err(TaskError::Database("connection refused".to_string()))
    }

    async fn update(&self, _task: Task) -> TaskResult<Option<Task>> {
        Err(TaskError::Database("connection refused".to_string()))
    }

    async fn delete(&self, _id: i32) -> TaskResult<bool> {
        Err(TaskError::Database("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let app = app_with(FailingRepository);

    let (status, body) = send(&app, "GET", "/api/tasks/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().contains("connection refused"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/tasks/create/",
        Some(json!({"title": "Buy milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_html_page_survives_store_failure() {
    let app = app_with(FailingRepository);

    let (status, html) = get_html(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error loading tasks. Please try again later."));
}
