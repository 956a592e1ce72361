//! Request extractors that reject with [`AppError`](crate::AppError).

pub mod json;

pub use json::JsonBody;
