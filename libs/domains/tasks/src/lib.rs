//! Tasks Domain
//!
//! CRUD over a single `Task` entity, with a PostgreSQL and an in-memory
//! store behind one repository trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← JSON API under /api, HTML list at /
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, normalisation, timestamps
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← PgTaskRepository | InMemoryTaskRepository
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task, TaskStatus, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgTaskRepository, TaskService, api_router};
//! use sea_orm::Database;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = Arc::new(TaskService::new(PgTaskRepository::new(db)));
//! let router = axum::Router::new().nest("/api", api_router(service));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::{TasksApiDoc, api_router, web_router};
pub use memory::InMemoryTaskRepository;
pub use models::{CreateTask, NewTask, Task, TaskStatus, UpdateTask};
pub use postgres::PgTaskRepository;
pub use repository::TaskRepository;
pub use service::TaskService;
