//! Per-frame drain of background job results.

use std::sync::mpsc::TryRecvError;

use super::Controller;
use super::jobs::JobMessage;

impl Controller {
    /// Apply every pending job result; called once per frame before render.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };

            match message {
                JobMessage::RunsListed { poll, result } => {
                    self.apply_runs_listed(poll, result);
                }
                JobMessage::RunCreated(result) => {
                    self.apply_run_created(result);
                }
                JobMessage::RunFetched { run_id, result } => {
                    self.apply_run_fetched(run_id, result);
                }
                JobMessage::DetailsFetched {
                    run_id,
                    facet,
                    result,
                } => {
                    self.apply_details_fetched(run_id, facet, result);
                }
                JobMessage::CommentSaved {
                    run_id,
                    case_id,
                    result,
                } => {
                    self.apply_comment_saved(run_id, case_id, result);
                }
                JobMessage::ExportFinished { run_id, result } => {
                    self.apply_export_finished(run_id, result);
                }
                JobMessage::PluginsListed(result) => {
                    self.apply_plugins_listed(result);
                }
                JobMessage::DepsFetched(result) => {
                    self.apply_deps_fetched(result);
                }
            }
        }
    }
}
