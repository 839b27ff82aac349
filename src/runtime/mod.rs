//! Runtime module
//!
//! Provides the task handle used for fetch operations and metric workers.

pub mod async_task;

pub use async_task::AsyncTask;
