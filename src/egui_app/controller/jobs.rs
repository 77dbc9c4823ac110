//! Background jobs: one short-lived thread per server call, reporting back
//! over a single message channel the controller drains each frame.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::api::{
    ApiClient, ApiError, CommentRequest, CreatedRun, DETAIL_PAGE_SIZE, LIST_PAGE_SIZE, Plugin,
    PluginDeps, RunConfig, RunDetail, RunSummary,
};
use crate::egui_app::state::Facet;

/// Results posted back to the UI thread.
pub(crate) enum JobMessage {
    RunsListed {
        /// Whether this refresh was a poll tick rather than a user action.
        poll: bool,
        result: Result<Vec<RunSummary>, ApiError>,
    },
    RunCreated(Result<CreatedRun, ApiError>),
    RunFetched {
        run_id: String,
        result: Result<RunSummary, ApiError>,
    },
    DetailsFetched {
        run_id: String,
        facet: Facet,
        result: Result<Vec<RunDetail>, ApiError>,
    },
    CommentSaved {
        run_id: String,
        case_id: String,
        result: Result<RunDetail, ApiError>,
    },
    ExportFinished {
        run_id: String,
        result: Result<PathBuf, ApiError>,
    },
    PluginsListed(Result<Vec<Plugin>, ApiError>),
    DepsFetched(Result<PluginDeps, ApiError>),
}

/// Channel plus per-operation in-flight flags.
///
/// Each `begin_*` refuses to start while its flag is set, so at most one
/// request per concern is outstanding; the matching `clear_*` runs when the
/// result message is applied.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    pub(super) runs_refresh_in_progress: bool,
    pub(super) create_in_progress: bool,
    pub(super) run_fetch_in_progress: bool,
    pub(super) details_in_progress: bool,
    pub(super) comment_in_progress: bool,
    pub(super) export_in_progress: bool,
    pub(super) plugins_in_progress: bool,
    pub(super) deps_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            message_tx,
            message_rx,
            runs_refresh_in_progress: false,
            create_in_progress: false,
            run_fetch_in_progress: false,
            details_in_progress: false,
            comment_in_progress: false,
            export_in_progress: false,
            plugins_in_progress: false,
            deps_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn runs_refresh_in_progress(&self) -> bool {
        self.runs_refresh_in_progress
    }

    pub(super) fn begin_list_runs(&mut self, client: ApiClient, poll: bool) {
        if self.runs_refresh_in_progress {
            return;
        }
        self.runs_refresh_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.list_runs(LIST_PAGE_SIZE, 0);
            let _ = tx.send(JobMessage::RunsListed { poll, result });
        });
    }

    pub(super) fn begin_create_run(&mut self, client: ApiClient, config: RunConfig) {
        if self.create_in_progress {
            return;
        }
        self.create_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.create_run(&config);
            let _ = tx.send(JobMessage::RunCreated(result));
        });
    }

    pub(super) fn begin_fetch_run(&mut self, client: ApiClient, run_id: String) {
        if self.run_fetch_in_progress {
            return;
        }
        self.run_fetch_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.get_run(&run_id);
            let _ = tx.send(JobMessage::RunFetched { run_id, result });
        });
    }

    pub(super) fn begin_fetch_details(&mut self, client: ApiClient, run_id: String, facet: Facet) {
        let Some(filter) = facet.wire_filter() else {
            return;
        };
        if self.details_in_progress {
            return;
        }
        self.details_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.run_details(&run_id, Some(filter), DETAIL_PAGE_SIZE, 0);
            let _ = tx.send(JobMessage::DetailsFetched {
                run_id,
                facet,
                result,
            });
        });
    }

    pub(super) fn begin_save_comment(
        &mut self,
        client: ApiClient,
        run_id: String,
        case_id: String,
        request: CommentRequest,
    ) {
        if self.comment_in_progress {
            return;
        }
        self.comment_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.save_comment(&run_id, &case_id, &request);
            let _ = tx.send(JobMessage::CommentSaved {
                run_id,
                case_id,
                result,
            });
        });
    }

    /// Download the CSV rendering into a temp file next to `target`, then
    /// persist atomically so a failed transfer leaves no partial file.
    pub(super) fn begin_export(&mut self, client: ApiClient, run_id: String, target: PathBuf) {
        if self.export_in_progress {
            return;
        }
        self.export_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = download_csv(&client, &run_id, &target);
            let _ = tx.send(JobMessage::ExportFinished { run_id, result });
        });
    }

    pub(super) fn begin_list_plugins(&mut self, client: ApiClient) {
        if self.plugins_in_progress {
            return;
        }
        self.plugins_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.list_plugins();
            let _ = tx.send(JobMessage::PluginsListed(result));
        });
    }

    pub(super) fn begin_fetch_deps(&mut self, client: ApiClient) {
        if self.deps_in_progress {
            return;
        }
        self.deps_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.plugin_deps();
            let _ = tx.send(JobMessage::DepsFetched(result));
        });
    }
}

fn download_csv(client: &ApiClient, run_id: &str, target: &PathBuf) -> Result<PathBuf, ApiError> {
    let parent = target
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut staging = tempfile::NamedTempFile::new_in(&parent)
        .map_err(|err| ApiError::Transport(format!("Could not stage download: {err}")))?;
    client.export_csv(run_id, &mut staging)?;
    staging
        .flush()
        .map_err(|err| ApiError::Transport(format!("Could not flush download: {err}")))?;
    staging
        .persist(target)
        .map_err(|err| ApiError::Transport(format!("Could not save {}: {}", target.display(), err.error)))?;
    Ok(target.clone())
}
