//! Student filter options derived from the stored collection.

use std::collections::BTreeSet;

use crate::core::model::Observation;

pub const ALL_STUDENTS_LABEL: &str = "All Students";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Empty for the "All Students" entry, otherwise the exact student name.
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFilter {
    pub options: Vec<FilterOption>,
    /// `""` means no filter.
    pub selected: String,
}

impl Default for StudentFilter {
    fn default() -> Self {
        Self::rebuild(&[], "")
    }
}

impl StudentFilter {
    /// Rebuilds the option list, keeping `previous` selected when that student still has
    /// observations and falling back to "All Students" otherwise.
    pub fn rebuild(records: &[Observation], previous: &str) -> Self {
        let students = student_names(records);
        let selected = if !previous.is_empty() && students.iter().any(|name| name == previous) {
            previous.to_string()
        } else {
            String::new()
        };

        let mut options = Vec::with_capacity(students.len() + 1);
        options.push(FilterOption {
            value: String::new(),
            label: ALL_STUDENTS_LABEL.to_string(),
        });
        options.extend(students.into_iter().map(|name| FilterOption {
            value: name.clone(),
            label: name,
        }));

        Self { options, selected }
    }

    /// Student names offered by the filter, without the leading "All Students" entry.
    pub fn students(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|option| !option.value.is_empty())
            .map(|option| option.value.as_str())
    }
}

/// Distinct student names, exact (case-sensitive) matching, ascending.
pub fn student_names(records: &[Observation]) -> Vec<String> {
    records
        .iter()
        .map(|obs| obs.student_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn named(names: &[&str]) -> Vec<Observation> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| Observation {
                id: idx as i64,
                student_name: name.to_string(),
                date: date!(2024 - 03 - 01),
                kind: "note".into(),
                notes: "Checked in".into(),
                timestamp: datetime!(2024-03-01 08:00 UTC),
            })
            .collect()
    }

    #[test]
    fn names_are_distinct_sorted_and_case_sensitive() {
        let records = named(&["Zoe", "alex", "Alex", "Zoe", "Mia"]);
        assert_eq!(student_names(&records), vec!["Alex", "Mia", "Zoe", "alex"]);
    }

    #[test]
    fn all_students_option_leads() {
        let filter = StudentFilter::rebuild(&named(&["Mia", "Alex"]), "");
        assert_eq!(filter.options[0].value, "");
        assert_eq!(filter.options[0].label, ALL_STUDENTS_LABEL);
        assert_eq!(filter.students().collect::<Vec<_>>(), vec!["Alex", "Mia"]);
    }

    #[test]
    fn keeps_selection_that_still_exists() {
        let filter = StudentFilter::rebuild(&named(&["Mia", "Alex"]), "Mia");
        assert_eq!(filter.selected, "Mia");
    }

    #[test]
    fn resets_selection_that_vanished() {
        let filter = StudentFilter::rebuild(&named(&["Alex"]), "Mia");
        assert_eq!(filter.selected, "");
    }

    #[test]
    fn rebuild_is_idempotent() {
        let records = named(&["Mia", "Alex"]);
        let once = StudentFilter::rebuild(&records, "Alex");
        let twice = StudentFilter::rebuild(&records, &once.selected);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_collection_offers_only_all_students() {
        let filter = StudentFilter::default();
        assert_eq!(filter.options.len(), 1);
        assert_eq!(filter.selected, "");
    }
}
