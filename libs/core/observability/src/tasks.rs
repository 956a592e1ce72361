//! Task operation metrics.

use metrics::{counter, histogram};
use std::time::Duration;

/// Task metrics recorder
pub struct TaskMetrics;

impl TaskMetrics {
    /// Count one operation and record its duration.
    ///
    /// `operation` is one of `list`, `create`, `get`, `update`, `delete`.
    pub fn record<T, E>(operation: &'static str, result: &Result<T, E>, elapsed: Duration) {
        let outcome = if result.is_ok() { "success" } else { "error" };

        counter!(
            "task_operations_total",
            "operation" => operation,
            "status" => outcome
        )
        .increment(1);

        histogram!("task_operation_duration_seconds", "operation" => operation)
            .record(elapsed.as_secs_f64());
    }
}
