//! Builders shared by the controller tests.

use std::collections::BTreeMap;

use crate::api::{Plugin, PluginStatus, RunDetail, RunStatus, RunSummary};
use crate::config_form::PrimitiveType;
use crate::settings::ClientSettings;

use super::Controller;

/// Controller wired to a port that refuses connections, so any job thread a
/// test happens to spawn fails fast without touching the network.
pub(super) fn dummy_controller() -> Controller {
    Controller::new(ClientSettings {
        server_url: "http://127.0.0.1:1".to_string(),
    })
}

pub(super) fn sample_run(run_id: &str, status: RunStatus) -> RunSummary {
    RunSummary {
        run_id: run_id.to_string(),
        plugin_id: "demo".to_string(),
        status,
        created_at: "2026-02-03T14:30:05Z".to_string(),
        total_cases: Some(10),
        processed_cases: Some(3),
        accuracy: Some(0.8),
        coverage: Some(1.0),
        error_rate: Some(0.1),
        mismatches: 2,
        errors: 1,
    }
}

pub(super) fn sample_detail(case_id: &str) -> RunDetail {
    RunDetail {
        case_id: case_id.to_string(),
        case_data: serde_json::Map::new(),
        truth: Some("a".to_string()),
        pred_value: Some("b".to_string()),
        pred_ok: true,
        pred_status: "success".to_string(),
        matched: false,
        mismatch_reason: Some("value differs".to_string()),
        raw: None,
        meta: serde_json::Map::new(),
        comment: None,
        tag: None,
        reviewed: false,
    }
}

pub(super) fn sample_plugin(id: &str) -> Plugin {
    Plugin {
        id: id.to_string(),
        display_name: format!("{id} plugin"),
        status: PluginStatus::Active,
        error_message: None,
        config_schema: BTreeMap::from([
            ("max_cases".to_string(), PrimitiveType::Int),
            ("strict".to_string(), PrimitiveType::Bool),
        ]),
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}
