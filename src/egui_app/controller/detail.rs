//! Run detail page: facets, case inspection, annotations, CSV export.

use std::path::PathBuf;

use crate::api::{ApiError, CommentRequest, RunDetail, RunSummary};
use crate::egui_app::state::Facet;
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;

use super::{Controller, Page};

impl Controller {
    /// Navigate to a run's detail page and fetch its summary.
    pub fn open_run(&mut self, run_id: &str) {
        self.leave_current_page();
        self.page = Page::RunDetail;
        self.detail_run_id = Some(run_id.to_string());
        self.refresh_detail_summary();
    }

    pub fn detail_run_id(&self) -> Option<&str> {
        self.detail_run_id.as_deref()
    }

    /// Re-fetch the run-level aggregate for the open run.
    pub fn refresh_detail_summary(&mut self) {
        let Some(run_id) = self.detail_run_id.clone() else {
            return;
        };
        self.jobs.begin_fetch_run(self.client.clone(), run_id);
    }

    /// Switch the detail facet; every switch re-fetches from the server.
    pub fn set_facet(&mut self, facet: Facet) {
        let Some(run_id) = self.detail_run_id.clone() else {
            return;
        };
        self.ui.detail.facet = facet;
        self.ui.detail.rows.clear();
        self.details.clear();
        if facet.fetches_details() {
            self.ui.detail.loading = true;
            self.jobs
                .begin_fetch_details(self.client.clone(), run_id, facet);
        } else {
            self.ui.detail.loading = false;
        }
    }

    /// Open the focused view for one case.
    pub fn open_case(&mut self, case_id: &str) {
        let Some(detail) = self.details.iter().find(|detail| detail.case_id == case_id) else {
            return;
        };
        self.ui.detail.inspector = Some(view_model::inspector(detail));
    }

    pub fn close_case(&mut self) {
        self.ui.detail.inspector = None;
    }

    /// Persist the inspector's annotation draft for its case.
    ///
    /// The full comment/tag/reviewed triple is always sent so the server's
    /// partial-update semantics never come into play.
    pub fn save_annotation(&mut self) {
        let Some(run_id) = self.detail_run_id.clone() else {
            return;
        };
        let Some(inspector) = self.ui.detail.inspector.as_mut() else {
            return;
        };
        if self.jobs.comment_in_progress {
            return;
        }
        inspector.saving = true;
        let request = CommentRequest {
            comment: Some(inspector.comment.clone()),
            tag: Some(inspector.tag.clone()),
            reviewed: Some(inspector.reviewed),
        };
        let case_id = inspector.case_id.clone();
        self.jobs
            .begin_save_comment(self.client.clone(), run_id, case_id, request);
    }

    /// Ask for a target path and stream the server's CSV rendering to it.
    pub fn export_csv(&mut self) {
        let Some(run_id) = self.detail_run_id.clone() else {
            return;
        };
        if self.jobs.export_in_progress {
            return;
        }
        let Some(target) = rfd::FileDialog::new()
            .set_file_name(format!("run_{run_id}.csv"))
            .save_file()
        else {
            return;
        };
        self.ui.detail.exporting = true;
        self.jobs.begin_export(self.client.clone(), run_id, target);
    }

    pub(super) fn apply_run_fetched(
        &mut self,
        run_id: String,
        result: Result<RunSummary, ApiError>,
    ) {
        self.jobs.run_fetch_in_progress = false;
        if self.page != Page::RunDetail || self.detail_run_id.as_deref() != Some(run_id.as_str()) {
            return;
        }
        match result {
            Ok(summary) => {
                self.ui.detail.metrics = Some(view_model::metrics_view(&summary));
            }
            Err(err) => {
                self.set_status(format!("Failed to load run: {err}"), StatusTone::Error);
            }
        }
    }

    pub(super) fn apply_details_fetched(
        &mut self,
        run_id: String,
        facet: Facet,
        result: Result<Vec<RunDetail>, ApiError>,
    ) {
        self.jobs.details_in_progress = false;
        let current_run = self.detail_run_id.as_deref() == Some(run_id.as_str());
        if self.page != Page::RunDetail || !current_run || self.ui.detail.facet != facet {
            // Superseded by navigation or a facet switch.
            return;
        }
        self.ui.detail.loading = false;
        match result {
            Ok(details) => {
                self.details = details;
                self.ui.detail.rows = self.details.iter().map(view_model::detail_row).collect();
            }
            Err(err) => {
                self.set_status(format!("Failed to load details: {err}"), StatusTone::Error);
            }
        }
    }

    pub(super) fn apply_comment_saved(
        &mut self,
        run_id: String,
        case_id: String,
        result: Result<RunDetail, ApiError>,
    ) {
        self.jobs.comment_in_progress = false;
        if self.detail_run_id.as_deref() != Some(run_id.as_str()) {
            return;
        }
        match result {
            Ok(_) => {
                self.ui.detail.inspector = None;
                self.set_status(format!("Annotations saved for {case_id}"), StatusTone::Info);
                // The summary refresh picks up any server-side recomputation.
                let facet = self.ui.detail.facet;
                if facet.fetches_details() {
                    self.set_facet(facet);
                }
                self.refresh_detail_summary();
            }
            Err(err) => {
                if let Some(inspector) = self.ui.detail.inspector.as_mut() {
                    inspector.saving = false;
                }
                self.set_status(format!("Failed to save annotations: {err}"), StatusTone::Error);
            }
        }
    }

    pub(super) fn apply_export_finished(
        &mut self,
        run_id: String,
        result: Result<PathBuf, ApiError>,
    ) {
        self.jobs.export_in_progress = false;
        self.ui.detail.exporting = false;
        match result {
            Ok(path) => {
                self.set_status(
                    format!(
                        "Exported run_{}.csv to {}",
                        view_model::short_run_id(&run_id),
                        path.display()
                    ),
                    StatusTone::Info,
                );
                if let Some(folder) = path.parent() {
                    if let Err(err) = open::that(folder) {
                        self.set_status(
                            format!("Export saved (could not open folder): {err}"),
                            StatusTone::Warning,
                        );
                    }
                }
            }
            Err(err) => {
                self.set_status(format!("Failed to export CSV: {err}"), StatusTone::Error);
            }
        }
    }
}
