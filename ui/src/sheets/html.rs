//! Static HTML rendering of progress sheets and filter options.
//!
//! Every piece of stored text goes through [`escape_html`], including type labels, which are
//! expected to be configuration-validated tokens anyway.

use std::fmt::Write;

use crate::core::format::{capitalize, escape_html, format_date};
use crate::journal::{Notice, RenderSink, StudentFilter};

use super::{ProgressSheet, EMPTY_STATE_MESSAGE};

pub fn render_sheets(sheets: &[ProgressSheet]) -> String {
    if sheets.is_empty() {
        return format!(r#"<p class="empty-state">{EMPTY_STATE_MESSAGE}</p>"#);
    }

    let mut html = String::new();
    for sheet in sheets {
        render_sheet(&mut html, sheet);
    }
    html
}

fn render_sheet(html: &mut String, sheet: &ProgressSheet) {
    let name = escape_html(&sheet.student_name);

    let _ = write!(
        html,
        r#"<div class="student-sheet" data-student="{name}"><div class="student-header"><div><div class="student-name">{name}</div><div class="observation-count">{summary}</div></div></div><div class="observations-list">"#,
        summary = escape_html(&sheet.summary_line()),
    );

    for entry in &sheet.entries {
        let kind = escape_html(&entry.kind);
        let _ = write!(
            html,
            r#"<div class="observation-item"><div class="observation-header"><span class="observation-type {kind}">{kind}</span><span class="observation-date">{date}</span></div><div class="observation-notes">{notes}</div></div>"#,
            date = format_date(entry.date),
            notes = escape_html(&entry.notes),
        );
    }

    let _ = write!(
        html,
        r#"</div><div class="summary-section"><div class="summary-title">Summary</div><div class="summary-stats"><div class="stat-item"><div class="stat-value">{total}</div><div class="stat-label">Total Observations</div></div>"#,
        total = sheet.total(),
    );

    for tally in &sheet.tallies {
        let _ = write!(
            html,
            r#"<div class="stat-item"><div class="stat-value">{count}</div><div class="stat-label">{label}</div></div>"#,
            count = tally.count,
            label = escape_html(&capitalize(&tally.kind)),
        );
    }

    html.push_str("</div></div></div>");
}

pub fn render_filter_options(filter: &StudentFilter) -> String {
    let mut html = String::new();
    for option in &filter.options {
        let selected = if option.value == filter.selected {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<option value="{value}"{selected}>{label}</option>"#,
            value = escape_html(&option.value),
            label = escape_html(&option.label),
        );
    }
    html
}

/// Render sink that keeps the latest markup for each output region, for hosts that accept
/// HTML fragments rather than a component tree.
#[derive(Debug, Clone, Default)]
pub struct MarkupSink {
    pub filter_html: String,
    pub sheets_html: String,
    pub notice: Option<Notice>,
}

impl RenderSink for MarkupSink {
    fn render_filter(&mut self, filter: &StudentFilter) {
        self.filter_html = render_filter_options(filter);
    }

    fn render_sheets(&mut self, sheets: &[ProgressSheet]) {
        self.sheets_html = render_sheets(sheets);
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
