//! HTTP client for the run service.

use std::io::Write;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::http_client;

use super::error::{self, ApiError};
use super::types::{
    CommentRequest, CreatedRun, DetailFilter, Plugin, PluginDeps, RunConfig, RunDetail, RunSummary,
};

const MAX_JSON_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
const MAX_CSV_RESPONSE_BYTES: usize = 256 * 1024 * 1024;

/// Page size used when the UI fetches run and detail listings.
pub const LIST_PAGE_SIZE: usize = 100;
/// Detail listings are fetched in one page; the server caps at 1000.
pub const DETAIL_PAGE_SIZE: usize = 1000;

/// Thin client over the run service's JSON-over-HTTP boundary.
///
/// Cheap to clone; every clone shares the process-wide agent.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client for a server base URL such as `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a new run. Unknown-plugin rejections surface as
    /// [`ApiError::Validation`] with the server's detail message.
    pub fn create_run(&self, config: &RunConfig) -> Result<CreatedRun, ApiError> {
        self.post_json(&self.endpoint("/runs"), config)
    }

    /// Fetch a page of the run table, newest first.
    pub fn list_runs(&self, limit: usize, offset: usize) -> Result<Vec<RunSummary>, ApiError> {
        self.get_json(
            &self.endpoint("/runs"),
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
    }

    /// Fetch one run's summary.
    pub fn get_run(&self, run_id: &str) -> Result<RunSummary, ApiError> {
        self.get_json(&self.endpoint(&format!("/runs/{run_id}")), &[])
    }

    /// Fetch a run's per-case details, optionally server-filtered.
    pub fn run_details(
        &self,
        run_id: &str,
        filter: Option<DetailFilter>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<RunDetail>, ApiError> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(filter) = filter {
            query.push(("filter", filter.query_value().to_string()));
        }
        self.get_json(&self.endpoint(&format!("/runs/{run_id}/details")), &query)
    }

    /// Persist reviewer annotations for one case, returning the updated
    /// detail row.
    pub fn save_comment(
        &self,
        run_id: &str,
        case_id: &str,
        request: &CommentRequest,
    ) -> Result<RunDetail, ApiError> {
        self.post_json(
            &self.endpoint(&format!("/runs/{run_id}/details/{case_id}/comment")),
            request,
        )
    }

    /// Stream the server's CSV rendering of a run into `writer`.
    pub fn export_csv(&self, run_id: &str, writer: &mut impl Write) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/runs/{run_id}/export.csv"));
        let response = Self::unwrap_response(http_client::agent().get(&url).call())?;
        http_client::copy_response_to_writer(response, writer, MAX_CSV_RESPONSE_BYTES)
            .map_err(|err| ApiError::Transport(err.to_string()))
    }

    /// Fetch all available plugins with their config schemas.
    pub fn list_plugins(&self) -> Result<Vec<Plugin>, ApiError> {
        self.get_json(&self.endpoint("/plugins"), &[])
    }

    /// Fetch one plugin by id.
    pub fn get_plugin(&self, plugin_id: &str) -> Result<Plugin, ApiError> {
        self.get_json(&self.endpoint(&format!("/plugins/{plugin_id}")), &[])
    }

    /// Fetch the sandbox dependency allowances (informational only).
    pub fn plugin_deps(&self) -> Result<PluginDeps, ApiError> {
        self.get_json(&self.endpoint("/plugins/deps"), &[])
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = http_client::agent().get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        let response = Self::unwrap_response(request.call())?;
        Self::decode_json(response)
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &impl Serialize,
    ) -> Result<T, ApiError> {
        let request = http_client::agent()
            .post(url)
            .set("Accept", "application/json");
        let response = Self::unwrap_response(request.send_json(payload))?;
        Self::decode_json(response)
    }

    fn unwrap_response(
        result: Result<ureq::Response, ureq::Error>,
    ) -> Result<ureq::Response, ApiError> {
        match result {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response).unwrap_or_else(|err| err);
                Err(error::from_status(code, body))
            }
            Err(ureq::Error::Transport(err)) => Err(ApiError::Transport(err.to_string())),
        }
    }

    fn decode_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ApiError> {
        let body = read_body_limited(response).map_err(ApiError::Decode)?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

fn read_body_limited(response: ureq::Response) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, MAX_JSON_RESPONSE_BYTES)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
