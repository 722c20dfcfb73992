use dioxus::prelude::*;

use crate::core::format::{capitalize, format_date};
use crate::sheets::{ProgressSheet, SheetEntry, EMPTY_STATE_MESSAGE};

#[component]
pub fn ProgressSheets(sheets: Vec<ProgressSheet>) -> Element {
    rsx! {
        div { id: "progress-sheets", class: "progress-sheets",
            if sheets.is_empty() {
                p { class: "empty-state", "{EMPTY_STATE_MESSAGE}" }
            } else {
                for sheet in sheets.into_iter() {
                    StudentSheet { key: "{sheet.student_name}", sheet }
                }
            }
        }
    }
}

#[component]
fn StudentSheet(sheet: ProgressSheet) -> Element {
    let summary = sheet.summary_line();
    let total = sheet.total();

    rsx! {
        div { class: "student-sheet", "data-student": "{sheet.student_name}",
            div { class: "student-header",
                div {
                    div { class: "student-name", "{sheet.student_name}" }
                    div { class: "observation-count", "{summary}" }
                }
            }

            div { class: "observations-list",
                for entry in sheet.entries.iter() {
                    {render_entry(entry)}
                }
            }

            div { class: "summary-section",
                div { class: "summary-title", "Summary" }
                div { class: "summary-stats",
                    div { class: "stat-item",
                        div { class: "stat-value", "{total}" }
                        div { class: "stat-label", "Total Observations" }
                    }
                    for tally in sheet.tallies.iter() {
                        div { key: "{tally.kind}", class: "stat-item",
                            div { class: "stat-value", "{tally.count}" }
                            div { class: "stat-label", "{capitalize(&tally.kind)}" }
                        }
                    }
                }
            }
        }
    }
}

fn render_entry(entry: &SheetEntry) -> Element {
    let date = format_date(entry.date);

    rsx! {
        div { key: "{entry.id}", class: "observation-item",
            div { class: "observation-header",
                span { class: "observation-type {entry.kind}", "{entry.kind}" }
                span { class: "observation-date", "{date}" }
            }
            div { class: "observation-notes", "{entry.notes}" }
        }
    }
}
