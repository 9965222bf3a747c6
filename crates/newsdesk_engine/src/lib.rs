//! Newsdesk engine: HTTP fetching with retry, and the controller that executes core effects.
mod controller;
mod engine;
mod fetch;
mod retry;
mod types;

pub use controller::{Renderer, ViewStateController};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, JsonFetcher, ReqwestFetcher};
pub use retry::{fetch_with_retry, RetryPolicy};
pub use types::{FailureKind, FetchError};
