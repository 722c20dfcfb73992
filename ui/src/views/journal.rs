use dioxus::prelude::*;

use crate::core::config::AppConfig;
use crate::core::storage::RecordStore;
use crate::core::{platform, timing};
use crate::journal::{Journal, JournalView, ObservationDraft, CLEAR_CONFIRMATION};
use crate::sheets::ProgressSheets;

struct PageState {
    journal: Journal<Box<dyn RecordStore>>,
    view: JournalView,
}

impl PageState {
    fn open(config: &AppConfig) -> Self {
        let mut journal = Journal::new(platform::default_store(config));
        let mut view = JournalView::default();
        journal.start(&mut view);
        Self { journal, view }
    }
}

#[component]
pub fn JournalPage() -> Element {
    let config = try_use_context::<AppConfig>().unwrap_or_default();

    let mut state = use_signal({
        let config = config.clone();
        move || PageState::open(&config)
    });
    let mut draft = use_signal({
        let default_type = config.default_type().to_string();
        move || ObservationDraft::blank(timing::today(), &default_type)
    });
    let mut ack_counter = use_signal(|| 0u64);
    let mut ack_shown = use_signal(|| Option::<u64>::None);

    let on_submit = {
        let default_type = config.default_type().to_string();
        let ack_ms = config.ack_duration_ms;
        move |evt: FormEvent| {
            evt.prevent_default();
            let current = draft();
            let outcome = state.with_mut(|page| {
                page.journal
                    .submit(&current, timing::now(), &mut page.view)
            });
            if outcome.is_err() {
                return;
            }

            draft.set(ObservationDraft::blank(timing::today(), &default_type));

            // A newer acknowledgment takes over the button; stale timers leave it alone.
            let ticket = ack_counter() + 1;
            ack_counter.set(ticket);
            ack_shown.set(Some(ticket));
            spawn(async move {
                timing::sleep_ms(ack_ms).await;
                if ack_shown() == Some(ticket) {
                    ack_shown.set(None);
                }
            });
        }
    };

    let on_filter = move |evt: FormEvent| {
        let student = evt.value();
        state.with_mut(|page| page.journal.select_student(&student, &mut page.view));
    };

    let view = state.read().view.clone();

    let current = draft();
    let saved = ack_shown().is_some();

    rsx! {
        section { class: "page page-journal",
            header { class: "page-journal__header",
                h1 { "Student Progress Sheets" }
                p { "Record quick observations and review each student's progress at a glance." }
            }

            if let Some(notice) = view.notice.clone() {
                div { class: "notice notice--{notice.tone()}", role: "alert",
                    span { class: "notice__message", "{notice.message()}" }
                    if notice.offers_reset() {
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: move |_| request_clear(state),
                            "Reset data"
                        }
                    }
                }
            }

            form { id: "observation-form", class: "observation-form", onsubmit: on_submit,
                div { class: "form-row",
                    label { r#for: "student-name", "Student name" }
                    input {
                        id: "student-name",
                        r#type: "text",
                        placeholder: "e.g. Alex Kim",
                        value: "{current.student_name}",
                        oninput: move |evt| draft.with_mut(|d| d.student_name = evt.value()),
                    }
                }
                div { class: "form-row",
                    label { r#for: "observation-date", "Date" }
                    input {
                        id: "observation-date",
                        r#type: "date",
                        value: "{current.date}",
                        oninput: move |evt| draft.with_mut(|d| d.date = evt.value()),
                    }
                }
                div { class: "form-row",
                    label { r#for: "observation-type", "Type" }
                    select {
                        id: "observation-type",
                        value: "{current.kind}",
                        onchange: move |evt| draft.with_mut(|d| d.kind = evt.value()),
                        for kind in config.observation_types.iter() {
                            option {
                                key: "{kind.value}",
                                value: "{kind.value}",
                                selected: kind.value == current.kind,
                                "{kind.label}"
                            }
                        }
                    }
                }
                div { class: "form-row form-row--wide",
                    label { r#for: "observation-notes", "Notes" }
                    textarea {
                        id: "observation-notes",
                        rows: "3",
                        placeholder: "What did you notice?",
                        value: "{current.notes}",
                        oninput: move |evt| draft.with_mut(|d| d.notes = evt.value()),
                    }
                }
                button {
                    r#type: "submit",
                    class: format!(
                        "button button--primary {}",
                        if saved { "button--saved" } else { "" }
                    ),
                    if saved { "✓ Saved!" } else { "Save Observation" }
                }
            }

            div { class: "journal-toolbar",
                label { r#for: "student-filter", "Show" }
                select {
                    id: "student-filter",
                    value: "{view.filter.selected}",
                    onchange: on_filter,
                    for choice in view.filter.options.iter() {
                        option {
                            key: "{choice.value}",
                            value: "{choice.value}",
                            selected: choice.value == view.filter.selected,
                            "{choice.label}"
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "button",
                    onclick: move |_| {
                        spawn(async move {
                            platform::print().await;
                        });
                    },
                    "Print"
                }
                button {
                    r#type: "button",
                    class: "button button--danger",
                    onclick: move |_| request_clear(state),
                    "Clear All"
                }
            }

            ProgressSheets { sheets: view.sheets.clone() }
        }
    }
}

fn request_clear(mut state: Signal<PageState>) {
    spawn(async move {
        if !platform::confirm(CLEAR_CONFIRMATION).await {
            return;
        }
        // Failures are already surfaced as a notice by the journal.
        let _ = state.with_mut(|page| page.journal.clear_all(&mut page.view));
    });
}
