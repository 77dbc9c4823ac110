//! Client for the run service's JSON-over-HTTP boundary.

mod client;
mod error;
mod types;

pub use client::{ApiClient, DETAIL_PAGE_SIZE, LIST_PAGE_SIZE};
pub use error::ApiError;
pub use types::{
    CommentRequest, CreatedRun, DetailFilter, Plugin, PluginDeps, PluginStatus, RunConfig,
    RunDetail, RunStatus, RunSummary,
};
