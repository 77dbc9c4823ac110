//! Helpers to convert domain data into egui-facing view structs.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::api::{Plugin, PluginDeps, RunDetail, RunSummary};
use crate::egui_app::state::{
    CaseInspectorState, DetailRowView, PluginDepsView, PluginRowView, RunMetricsView, RunRowView,
};

/// Convert a run summary into a table row.
pub fn run_row(run: &RunSummary) -> RunRowView {
    RunRowView {
        run_id: run.run_id.clone(),
        short_id: short_run_id(&run.run_id),
        plugin_id: run.plugin_id.clone(),
        status: run.status.clone(),
        created_at: format_timestamp(&run.created_at),
        cases: cases_text(run),
        progress: progress_fraction(run),
        accuracy: format_percent(run.accuracy),
        coverage: format_percent(run.coverage),
        error_rate: format_percent(run.error_rate),
        mismatches: run.mismatches,
        errors: run.errors,
    }
}

/// Convert a run summary into the metrics header of the detail page.
pub fn metrics_view(run: &RunSummary) -> RunMetricsView {
    RunMetricsView {
        run_id: run.run_id.clone(),
        short_id: short_run_id(&run.run_id),
        plugin_id: run.plugin_id.clone(),
        status: run.status.clone(),
        created_at: format_timestamp(&run.created_at),
        accuracy: format_percent(run.accuracy),
        coverage: format_percent(run.coverage),
        error_rate: format_percent(run.error_rate),
        total_cases: run
            .total_cases
            .map(|count| count.to_string())
            .unwrap_or_else(|| "-".to_string()),
        mismatches: run.mismatches,
        errors: run.errors,
        progress: progress_fraction(run),
        progress_text: progress_text(run),
    }
}

/// Convert a case detail into a table row.
pub fn detail_row(detail: &RunDetail) -> DetailRowView {
    DetailRowView {
        case_id: detail.case_id.clone(),
        truth: optional_text(&detail.truth),
        pred: optional_text(&detail.pred_value),
        matched: detail.matched,
        pred_status: detail.pred_status.clone(),
        reviewed: detail.reviewed,
    }
}

/// Build the case inspector view, seeding the annotation draft from the
/// case's current annotations.
pub fn inspector(detail: &RunDetail) -> CaseInspectorState {
    CaseInspectorState {
        case_id: detail.case_id.clone(),
        case_data: pretty_json(&Value::Object(detail.case_data.clone())),
        truth: detail.truth.clone(),
        pred_value: detail.pred_value.clone(),
        matched: detail.matched,
        mismatch_reason: detail.mismatch_reason.clone(),
        raw: detail.raw.clone(),
        meta: if detail.meta.is_empty() {
            None
        } else {
            Some(pretty_json(&Value::Object(detail.meta.clone())))
        },
        comment: detail.comment.clone().unwrap_or_default(),
        tag: detail.tag.clone().unwrap_or_default(),
        reviewed: detail.reviewed,
        saving: false,
    }
}

/// Convert a plugin into a registry table row.
pub fn plugin_row(plugin: &Plugin) -> PluginRowView {
    PluginRowView {
        id: plugin.id.clone(),
        display_name: plugin.display_name.clone(),
        status: plugin.status.clone(),
        error_message: plugin.error_message.clone(),
        schema_json: serde_json::to_string(&plugin.config_schema)
            .unwrap_or_else(|_| "{}".to_string()),
        created_at: format_timestamp(&plugin.created_at),
        updated_at: format_timestamp(&plugin.updated_at),
        builtin: plugin.is_builtin(),
    }
}

/// Pre-join the dependency lists for display.
pub fn deps_view(deps: &PluginDeps) -> PluginDepsView {
    PluginDepsView {
        allowed: deps.allowed.join(", "),
        builtin: deps.builtin.join(", "),
        note: deps.note.clone(),
    }
}

/// Human-readable label for a schema key: underscores to spaces, title case.
pub fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text shown in a form buffer for a canonical field value.
pub fn buffer_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

/// Format a 0..1 ratio as a percentage, `-` when absent.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(ratio) => format!("{:.1}%", ratio * 100.0),
        None => "-".to_string(),
    }
}

/// Abbreviate an opaque run id for table display.
pub fn short_run_id(run_id: &str) -> String {
    const VISIBLE: usize = 8;
    if run_id.chars().count() <= VISIBLE {
        return run_id.to_string();
    }
    let mut short: String = run_id.chars().take(VISIBLE).collect();
    short.push('…');
    short
}

/// Render a server timestamp for display, tolerating both RFC 3339 and the
/// offset-less form some backends emit. Unparseable input passes through.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &[time::format_description::FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    const NAIVE: &[time::format_description::FormatItem<'static>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        if let Ok(text) = parsed.format(&DISPLAY) {
            return text;
        }
    }
    // Some backends emit naive timestamps, optionally with subseconds.
    let head = raw.get(..19).unwrap_or(raw);
    if let Ok(parsed) = PrimitiveDateTime::parse(head, &NAIVE) {
        if let Ok(text) = parsed.format(&DISPLAY) {
            return text;
        }
    }
    raw.to_string()
}

/// Completion fraction for a live run, when both counts are usable.
pub fn progress_fraction(run: &RunSummary) -> Option<f32> {
    if run.status.is_terminal() {
        return None;
    }
    let total = run.total_cases.filter(|total| *total > 0)?;
    let processed = run.processed_cases?;
    Some((processed as f32 / total as f32).clamp(0.0, 1.0))
}

fn progress_text(run: &RunSummary) -> Option<String> {
    if run.status.is_terminal() {
        return None;
    }
    match (run.processed_cases, run.total_cases) {
        (Some(processed), Some(total)) if total > 0 => Some(format!("{processed}/{total}")),
        (Some(processed), _) => Some(format!("{processed} processed")),
        _ => None,
    }
}

fn cases_text(run: &RunSummary) -> String {
    if let Some(progress) = progress_text(run) {
        return progress;
    }
    run.total_cases
        .map(|total| total.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn optional_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RunStatus;
    use serde_json::json;

    fn running_run() -> RunSummary {
        RunSummary {
            run_id: "0f9b2c44-aaaa-bbbb-cccc-ddddeeeeffff".to_string(),
            plugin_id: "demo".to_string(),
            status: RunStatus::Running,
            created_at: "2026-02-03T14:30:05Z".to_string(),
            total_cases: Some(10),
            processed_cases: Some(3),
            accuracy: None,
            coverage: None,
            error_rate: None,
            mismatches: 0,
            errors: 0,
        }
    }

    #[test]
    fn percent_formats_ratio_or_dash() {
        assert_eq!(format_percent(Some(0.123)), "12.3%");
        assert_eq!(format_percent(Some(1.0)), "100.0%");
        assert_eq!(format_percent(None), "-");
    }

    #[test]
    fn field_labels_title_case_schema_keys() {
        assert_eq!(field_label("max_tokens"), "Max Tokens");
        assert_eq!(field_label("threshold"), "Threshold");
        assert_eq!(field_label("a__b"), "A B");
    }

    #[test]
    fn run_ids_are_abbreviated() {
        assert_eq!(
            short_run_id("0f9b2c44-aaaa-bbbb-cccc-ddddeeeeffff"),
            "0f9b2c44…"
        );
        assert_eq!(short_run_id("tiny"), "tiny");
    }

    #[test]
    fn timestamps_render_with_and_without_offset() {
        assert_eq!(
            format_timestamp("2026-02-03T14:30:05Z"),
            "2026-02-03 14:30:05"
        );
        assert_eq!(
            format_timestamp("2026-02-03T14:30:05.123456"),
            "2026-02-03 14:30:05"
        );
        assert_eq!(format_timestamp("not a date"), "not a date");
    }

    #[test]
    fn progress_derives_only_for_live_runs() {
        let run = running_run();
        assert_eq!(progress_fraction(&run), Some(0.3));
        assert_eq!(run_row(&run).cases, "3/10");

        let mut finished = running_run();
        finished.status = RunStatus::Success;
        assert_eq!(progress_fraction(&finished), None);
        assert_eq!(run_row(&finished).cases, "10");
    }

    #[test]
    fn missing_total_shows_raw_processed_count() {
        let mut run = running_run();
        run.total_cases = None;
        assert_eq!(progress_fraction(&run), None);
        assert_eq!(run_row(&run).cases, "3 processed");
    }

    #[test]
    fn inspector_omits_empty_optionals_and_seeds_the_draft() {
        let detail = RunDetail {
            case_id: "c1".to_string(),
            case_data: serde_json::from_value(json!({"input": "x"})).unwrap(),
            truth: Some("a".to_string()),
            pred_value: Some("b".to_string()),
            pred_ok: true,
            pred_status: "success".to_string(),
            matched: false,
            mismatch_reason: Some("value differs".to_string()),
            raw: None,
            meta: serde_json::Map::new(),
            comment: Some("earlier note".to_string()),
            tag: None,
            reviewed: true,
        };
        let view = inspector(&detail);
        assert!(view.raw.is_none());
        assert!(view.meta.is_none());
        assert_eq!(view.comment, "earlier note");
        assert_eq!(view.tag, "");
        assert!(view.reviewed);
    }

    #[test]
    fn buffer_text_renders_unset_as_empty() {
        assert_eq!(buffer_text(&Value::Null), "");
        assert_eq!(buffer_text(&json!(5)), "5");
        assert_eq!(buffer_text(&json!("x")), "x");
    }
}
