//! Command handlers for the observation journal.
//!
//! [`Journal`] owns the record store and the current student selection. Each command runs to
//! completion, returns its outcome and pushes whatever changed to a [`RenderSink`]. The live
//! page renders from a [`JournalView`]; [`MarkupSink`](crate::sheets::html::MarkupSink)
//! produces escaped HTML fragments instead.
//!
//! Storage is read fresh for every command, never cached, so the displayed data always
//! matches the persisted slot.

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::core::error::{StoreError, SubmitError};
use crate::core::model::Observation;
use crate::core::storage::RecordStore;
use crate::sheets::{build_sheets, ProgressSheet};

pub mod filter;
pub mod form;

pub use filter::{FilterOption, StudentFilter, ALL_STUDENTS_LABEL};
pub use form::{ObservationDraft, ValidDraft};

pub const CLEAR_CONFIRMATION: &str =
    "Are you sure you want to clear all observations? This cannot be undone.";

/// Where command results are shown.
pub trait RenderSink {
    fn render_filter(&mut self, filter: &StudentFilter);
    fn render_sheets(&mut self, sheets: &[ProgressSheet]);
    fn notify(&mut self, notice: Notice);
    fn dismiss_notice(&mut self);
}

/// User-facing message raised by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Submission rejected before anything was stored.
    Rejected(String),
    /// A write failed. The form keeps its input.
    SaveFailed(String),
    /// The stored collection can't be read. The page offers to reset it.
    CorruptData(String),
    Unavailable(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Rejected(message) => message.clone(),
            Notice::SaveFailed(detail) => {
                format!("Couldn't save your observation: {detail}. Your entry is still in the form.")
            }
            Notice::CorruptData(detail) => format!(
                "Stored observations couldn't be read ({detail}). Reset data to start over."
            ),
            Notice::Unavailable(detail) => format!("Local storage is unavailable: {detail}"),
        }
    }

    /// Whether the notice comes with a "Reset data" action.
    pub fn offers_reset(&self) -> bool {
        matches!(self, Notice::CorruptData(_))
    }

    /// CSS modifier for the notice banner.
    pub fn tone(&self) -> &'static str {
        match self {
            Notice::Rejected(_) => "warning",
            _ => "error",
        }
    }
}

impl From<&StoreError> for Notice {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::Corrupt(detail) => Notice::CorruptData(detail.clone()),
            StoreError::Persistence(detail) => Notice::SaveFailed(detail.clone()),
            StoreError::Unavailable(detail) => Notice::Unavailable(detail.clone()),
        }
    }
}

/// Plain render target backing the Dioxus page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalView {
    pub filter: StudentFilter,
    pub sheets: Vec<ProgressSheet>,
    pub notice: Option<Notice>,
}

impl RenderSink for JournalView {
    fn render_filter(&mut self, filter: &StudentFilter) {
        self.filter = filter.clone();
    }

    fn render_sheets(&mut self, sheets: &[ProgressSheet]) {
        self.sheets = sheets.to_vec();
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

pub struct Journal<S> {
    store: S,
    selected: String,
}

impl<S: RecordStore> Journal<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            selected: String::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `""` when every student is shown.
    pub fn selected_student(&self) -> &str {
        &self.selected
    }

    /// Initial display on startup.
    pub fn start(&mut self, sink: &mut impl RenderSink) {
        self.refresh_filter(sink);
    }

    /// Validates `draft`, appends the new observation to the stored collection and refreshes
    /// the display. Rejected or failed submissions leave the store untouched.
    pub fn submit(
        &mut self,
        draft: &ObservationDraft,
        now: OffsetDateTime,
        sink: &mut impl RenderSink,
    ) -> Result<Observation, SubmitError> {
        let valid = match draft.validate() {
            Ok(valid) => valid,
            Err(err) => {
                debug!(%err, "observation rejected");
                // An unreadable slot keeps its notice so the reset action stays reachable.
                let notice = match self.store.load() {
                    Ok(_) => Notice::Rejected(err.to_string()),
                    Err(store_err) => Notice::from(&store_err),
                };
                sink.notify(notice);
                return Err(err);
            }
        };

        let mut records = match self.store.load() {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "refusing to append to unreadable storage");
                sink.notify(Notice::from(&err));
                return Err(err.into());
            }
        };

        let observation = match valid.into_observation(&records, now) {
            Ok(observation) => observation,
            Err(err) => {
                warn!(%err, "no fresh id available");
                sink.notify(Notice::from(&err));
                return Err(err.into());
            }
        };
        records.push(observation.clone());

        if let Err(err) = self.store.save(&records) {
            sink.notify(Notice::from(&err));
            return Err(err.into());
        }

        info!(
            id = observation.id,
            student = %observation.student_name,
            kind = %observation.kind,
            total = records.len(),
            "observation recorded"
        );

        sink.dismiss_notice();
        self.refresh_filter(sink);
        Ok(observation)
    }

    /// `""` shows every student.
    pub fn select_student(&mut self, student: &str, sink: &mut impl RenderSink) {
        self.selected = student.to_string();
        self.refresh_sheets(sink);
    }

    /// Removes every stored observation. Callers confirm with the user first.
    pub fn clear_all(&mut self, sink: &mut impl RenderSink) -> Result<(), StoreError> {
        if let Err(err) = self.store.clear() {
            warn!(%err, "failed to clear observations");
            sink.notify(Notice::from(&err));
            return Err(err);
        }

        info!("all observations cleared");
        sink.dismiss_notice();
        self.refresh_filter(sink);
        Ok(())
    }

    /// Rebuilds the student options (keeping the selection when still valid), then
    /// refreshes the sheets.
    pub fn refresh_filter(&mut self, sink: &mut impl RenderSink) {
        let records = self.load_for_display(sink);
        let filter = StudentFilter::rebuild(&records, &self.selected);
        debug!(
            students = filter.options.len() - 1,
            selected = %filter.selected,
            "student filter rebuilt"
        );
        self.selected = filter.selected.clone();
        sink.render_filter(&filter);
        sink.render_sheets(&build_sheets(&records, &self.selected));
    }

    pub fn refresh_sheets(&self, sink: &mut impl RenderSink) {
        let records = self.load_for_display(sink);
        sink.render_sheets(&build_sheets(&records, &self.selected));
    }

    /// Unreadable storage renders as an empty journal with a notice offering a reset.
    fn load_for_display(&self, sink: &mut impl RenderSink) -> Vec<Observation> {
        match self.store.load() {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "showing empty journal");
                sink.notify(Notice::from(&err));
                Vec::new()
            }
        }
    }
}
