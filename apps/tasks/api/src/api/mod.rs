use axum::{Router, middleware, routing::get};
use axum_helpers::server::health_router;
use core_config::AppInfo;
use database::postgres::DatabaseConnection;
use domain_tasks::{TaskRepository, TaskService, api_router, web_router};
use observability::{metrics_handler, metrics_middleware};
use std::sync::Arc;

use crate::openapi::ApiDoc;

pub mod health;

/// Full application router for one storage backend.
///
/// Task routes (JSON under `/api`, HTML at `/`) are measured by the metrics
/// middleware. `/health`, `/ready` and `/metrics` are merged afterwards and
/// are not.
pub fn app_router<R: TaskRepository + 'static>(
    app: AppInfo,
    service: TaskService<R>,
    db: Option<DatabaseConnection>,
) -> eyre::Result<Router> {
    let service = Arc::new(service);

    let router = axum_helpers::create_router::<ApiDoc>(
        api_router(service.clone()),
        web_router(service)?,
    )?
    .layer(middleware::from_fn(metrics_middleware));

    Ok(router
        .merge(health_router(app))
        .merge(ready_router(db))
        .route("/metrics", get(metrics_handler)))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
pub fn ready_router(db: Option<DatabaseConnection>) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use domain_tasks::InMemoryTaskRepository;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(db: Option<DatabaseConnection>) -> Router {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            app_router(
                core_config::app_info!(),
                TaskService::new(InMemoryTaskRepository::new()),
                db,
            )
            .unwrap()
        })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health_reports_name_and_version() {
        let (status, body) = get(app(None), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "tasks_api");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_ready_without_database() {
        let (status, body) = get(app(None), "/ready").await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"status": "ready"}));
    }

    #[tokio::test]
    async fn test_ready_with_unreachable_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();

        let (status, body) = get(app(Some(db)), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["database"], "disconnected");
    }

    #[tokio::test]
    async fn test_openapi_lists_task_routes() {
        let (status, body) = get(app(None), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);

        let doc: Value = serde_json::from_slice(&body).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api/tasks/",
            "/api/tasks/create/",
            "/api/tasks/{id}/",
            "/api/tasks/{id}/update/",
            "/api/tasks/{id}/delete/",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[tokio::test]
    async fn test_task_routes_and_page_are_mounted() {
        let (status, body) = get(app(None), "/api/tasks/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");

        let (status, body) = get(app(None), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("<h1>Tasks</h1>"));
    }
}
