//! Wire types exchanged with the run service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config_form::PrimitiveType;

/// Lifecycle status of a run as reported by the server.
///
/// Unrecognized statuses are preserved verbatim so new server-side states
/// display instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Pending,
    Running,
    Success,
    Failure,
    Other(String),
}

impl RunStatus {
    /// Whether the run may still change state server-side.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for RunStatus {
    fn from(name: String) -> Self {
        match name.as_str() {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "success" => Self::Success,
            "failure" => Self::Failure,
            _ => Self::Other(name),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Validation state of a plugin as reported by the registry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum PluginStatus {
    Pending,
    Active,
    Error,
    Other(String),
}

impl PluginStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Error => "error",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for PluginStatus {
    fn from(name: String) -> Self {
        match name.as_str() {
            "pending" => Self::Pending,
            "active" => Self::Active,
            "error" => Self::Error,
            _ => Self::Other(name),
        }
    }
}

impl From<PluginStatus> for String {
    fn from(status: PluginStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A server-validated scoring procedure with its declared config schema.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Plugin {
    pub id: String,
    pub display_name: String,
    pub status: PluginStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub config_schema: BTreeMap<String, PrimitiveType>,
    pub created_at: String,
    pub updated_at: String,
}

impl Plugin {
    /// The `demo` plugin ships with the server and cannot be changed.
    pub fn is_builtin(&self) -> bool {
        self.id == "demo"
    }
}

/// Payload submitted to create a new run.
#[derive(Clone, Debug, Serialize)]
pub struct RunConfig {
    pub plugin_id: String,
    pub config: Map<String, Value>,
}

/// Server acknowledgment of a run-creation request.
#[derive(Clone, Debug, Deserialize)]
pub struct CreatedRun {
    pub run_id: String,
    pub status: RunStatus,
}

/// One row of the run table, including aggregate metrics.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub plugin_id: String,
    pub status: RunStatus,
    pub created_at: String,
    #[serde(default)]
    pub total_cases: Option<i64>,
    #[serde(default)]
    pub processed_cases: Option<i64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub coverage: Option<f64>,
    #[serde(default)]
    pub error_rate: Option<f64>,
    #[serde(default)]
    pub mismatches: i64,
    #[serde(default)]
    pub errors: i64,
}

/// One case's outcome within a run, including reviewer annotations.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RunDetail {
    pub case_id: String,
    #[serde(default)]
    pub case_data: Map<String, Value>,
    #[serde(default)]
    pub truth: Option<String>,
    #[serde(default)]
    pub pred_value: Option<String>,
    pub pred_ok: bool,
    pub pred_status: String,
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(default)]
    pub mismatch_reason: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub reviewed: bool,
}

/// Partial annotation update for one case.
///
/// Fields left `None` are omitted from the request and stay untouched
/// server-side; the UI always sends the full triple it has in memory.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CommentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed: Option<bool>,
}

/// Sandbox dependency allowances, shown verbatim on the Plugins page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PluginDeps {
    #[serde(default)]
    pub allowed: Vec<String>,
    #[serde(default)]
    pub builtin: Vec<String>,
    #[serde(default)]
    pub note: String,
}

/// Server-side filter applied to a run's detail listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailFilter {
    All,
    Mismatch,
    Error,
}

impl DetailFilter {
    /// Value of the `filter` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mismatch => "mismatch",
            Self::Error => "error",
        }
    }
}
