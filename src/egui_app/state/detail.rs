//! View state for the run detail page and the case inspector.

use crate::api::{DetailFilter, RunStatus};

/// Named filter over a run's case details.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    Summary,
    Mismatches,
    All,
    Errors,
}

impl Facet {
    /// Tab label without the count suffix.
    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Mismatches => "Mismatches",
            Self::All => "All",
            Self::Errors => "Errors",
        }
    }

    /// Server-side filter backing this facet; `Summary` fetches nothing.
    pub fn wire_filter(self) -> Option<DetailFilter> {
        match self {
            Self::Summary => None,
            Self::Mismatches => Some(DetailFilter::Mismatch),
            Self::All => Some(DetailFilter::All),
            Self::Errors => Some(DetailFilter::Error),
        }
    }

    pub fn fetches_details(self) -> bool {
        self != Self::Summary
    }
}

/// Run-level aggregate shown above the facet tabs.
#[derive(Clone, Debug, PartialEq)]
pub struct RunMetricsView {
    pub run_id: String,
    pub short_id: String,
    pub plugin_id: String,
    pub status: RunStatus,
    pub created_at: String,
    pub accuracy: String,
    pub coverage: String,
    pub error_rate: String,
    pub total_cases: String,
    pub mismatches: i64,
    pub errors: i64,
    /// Completion fraction for a live run, when derivable.
    pub progress: Option<f32>,
    /// Raw processed/total text for a live run.
    pub progress_text: Option<String>,
}

/// One row of the case table.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailRowView {
    pub case_id: String,
    pub truth: String,
    pub pred: String,
    pub matched: bool,
    pub pred_status: String,
    pub reviewed: bool,
}

/// Focused view of one case plus the annotation draft being edited.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseInspectorState {
    pub case_id: String,
    /// Pretty-printed case input payload.
    pub case_data: String,
    pub truth: Option<String>,
    pub pred_value: Option<String>,
    pub matched: bool,
    pub mismatch_reason: Option<String>,
    pub raw: Option<String>,
    /// Pretty-printed metadata, present only when non-empty.
    pub meta: Option<String>,
    pub comment: String,
    pub tag: String,
    pub reviewed: bool,
    pub saving: bool,
}

/// State backing the run detail page.
#[derive(Clone, Debug, Default)]
pub struct RunDetailViewState {
    pub facet: Facet,
    pub loading: bool,
    pub metrics: Option<RunMetricsView>,
    pub rows: Vec<DetailRowView>,
    pub inspector: Option<CaseInspectorState>,
    pub exporting: bool,
}

impl RunDetailViewState {
    /// Fresh state for a newly opened run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
