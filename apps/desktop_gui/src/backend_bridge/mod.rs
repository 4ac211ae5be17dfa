//! Bridge between the UI thread and the tokio-backed session client.

pub mod commands;
pub mod runtime;
