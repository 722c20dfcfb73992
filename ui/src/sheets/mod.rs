//! Progress sheets: the per-student view-model built from the observation collection.
//!
//! [`build_sheets`] is a pure transform from `(collection, filter)` to sheets. The markup
//! renderer in [`html`] and the Dioxus components in [`view`] only lay out what it produced.

use std::collections::BTreeMap;

use time::Date;

use crate::core::model::{Observation, ObservationId};

pub mod html;
mod view;
pub use view::ProgressSheets;

pub const EMPTY_STATE_MESSAGE: &str = "No observations yet. Add your first observation above.";

/// One student's observations with summary statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSheet {
    pub student_name: String,
    /// Newest first.
    pub entries: Vec<SheetEntry>,
    pub first_date: Date,
    pub last_date: Date,
    /// One tally per type, in order of first appearance in `entries`.
    pub tallies: Vec<TypeTally>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    pub id: ObservationId,
    pub kind: String,
    pub date: Date,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTally {
    pub kind: String,
    pub count: usize,
}

impl ProgressSheet {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// `2 observations • Mar 1, 2024 to Mar 5, 2024`.
    pub fn summary_line(&self) -> String {
        use crate::core::format::{format_date, observation_count};

        format!(
            "{} • {} to {}",
            observation_count(self.total()),
            format_date(self.first_date),
            format_date(self.last_date)
        )
    }

    fn from_group(student_name: String, mut group: Vec<&Observation>) -> Option<Self> {
        // Same-day entries fall back to creation order, newest first.
        group.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.timestamp.cmp(&a.timestamp))
                .then_with(|| b.id.cmp(&a.id))
        });

        let last_date = group.first()?.date;
        let first_date = group.last()?.date;

        let mut tallies: Vec<TypeTally> = Vec::new();
        for obs in &group {
            match tallies.iter_mut().find(|tally| tally.kind == obs.kind) {
                Some(tally) => tally.count += 1,
                None => tallies.push(TypeTally {
                    kind: obs.kind.clone(),
                    count: 1,
                }),
            }
        }

        let entries = group
            .into_iter()
            .map(|obs| SheetEntry {
                id: obs.id,
                kind: obs.kind.clone(),
                date: obs.date,
                notes: obs.notes.clone(),
            })
            .collect();

        Some(Self {
            student_name,
            entries,
            first_date,
            last_date,
            tallies,
        })
    }
}

/// Groups `records` into sheets sorted by student name. An empty `selected_student` keeps
/// every student; otherwise only exact (case-sensitive) name matches are kept.
pub fn build_sheets(records: &[Observation], selected_student: &str) -> Vec<ProgressSheet> {
    let mut by_student: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for obs in records
        .iter()
        .filter(|obs| selected_student.is_empty() || obs.student_name == selected_student)
    {
        by_student
            .entry(obs.student_name.as_str())
            .or_default()
            .push(obs);
    }

    by_student
        .into_iter()
        .filter_map(|(name, group)| ProgressSheet::from_group(name.to_string(), group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::OffsetDateTime;

    fn obs(id: i64, name: &str, date: Date, kind: &str, at: OffsetDateTime) -> Observation {
        Observation {
            id,
            student_name: name.into(),
            date,
            kind: kind.into(),
            notes: format!("note {id}"),
            timestamp: at,
        }
    }

    fn alex_example() -> Vec<Observation> {
        vec![
            obs(
                1,
                "Alex Kim",
                date!(2024 - 03 - 01),
                "positive",
                datetime!(2024-03-01 10:00 UTC),
            ),
            obs(
                2,
                "Alex Kim",
                date!(2024 - 03 - 05),
                "concern",
                datetime!(2024-03-05 10:00 UTC),
            ),
        ]
    }

    #[test]
    fn alex_kim_example_sheet() {
        let sheets = build_sheets(&alex_example(), "");
        assert_eq!(sheets.len(), 1);

        let sheet = &sheets[0];
        assert_eq!(sheet.student_name, "Alex Kim");
        assert_eq!(sheet.total(), 2);
        assert_eq!(
            sheet.summary_line(),
            "2 observations • Mar 1, 2024 to Mar 5, 2024"
        );
        assert_eq!(
            sheet.entries.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![2, 1]
        );
        assert_eq!(
            sheet.tallies,
            vec![
                TypeTally {
                    kind: "concern".into(),
                    count: 1
                },
                TypeTally {
                    kind: "positive".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn groups_are_sorted_by_name() {
        let at = datetime!(2024-03-01 10:00 UTC);
        let records = vec![
            obs(1, "Zoe", date!(2024 - 03 - 01), "note", at),
            obs(2, "Alex Kim", date!(2024 - 03 - 01), "note", at),
            obs(3, "Mia", date!(2024 - 03 - 01), "note", at),
            obs(4, "Alex Kim", date!(2024 - 03 - 02), "note", at),
        ];
        let names: Vec<_> = build_sheets(&records, "")
            .into_iter()
            .map(|sheet| sheet.student_name)
            .collect();
        assert_eq!(names, vec!["Alex Kim", "Mia", "Zoe"]);
    }

    #[test]
    fn filter_keeps_exact_matches_only() {
        let at = datetime!(2024-03-01 10:00 UTC);
        let records = vec![
            obs(1, "alex kim", date!(2024 - 03 - 01), "note", at),
            obs(2, "Alex Kim", date!(2024 - 03 - 01), "note", at),
            obs(3, "Alex", date!(2024 - 03 - 01), "note", at),
        ];
        let sheets = build_sheets(&records, "Alex Kim");
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].entries.len(), 1);
        assert_eq!(sheets[0].entries[0].id, 2);

        let all: usize = build_sheets(&records, "").iter().map(|s| s.total()).sum();
        assert_eq!(all, records.len());
    }

    #[test]
    fn unknown_filter_yields_no_sheets() {
        assert!(build_sheets(&alex_example(), "Nobody").is_empty());
        assert!(build_sheets(&[], "").is_empty());
    }

    #[test]
    fn same_day_entries_order_newest_created_first() {
        let day = date!(2024 - 03 - 04);
        let records = vec![
            obs(10, "Alex Kim", day, "note", datetime!(2024-03-04 08:00 UTC)),
            obs(11, "Alex Kim", day, "note", datetime!(2024-03-04 15:00 UTC)),
            obs(12, "Alex Kim", day, "note", datetime!(2024-03-04 11:00 UTC)),
        ];
        let ids: Vec<_> = build_sheets(&records, "")[0]
            .entries
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[test]
    fn building_twice_is_identical_and_leaves_input_alone() {
        let records = alex_example();
        let snapshot = records.clone();
        let first = build_sheets(&records, "");
        let second = build_sheets(&records, "");
        assert_eq!(first, second);
        assert_eq!(records, snapshot);
    }

    #[test]
    fn single_entry_sheet_uses_singular_summary() {
        let records = vec![alex_example().remove(0)];
        let sheet = &build_sheets(&records, "")[0];
        assert_eq!(
            sheet.summary_line(),
            "1 observation • Mar 1, 2024 to Mar 1, 2024"
        );
    }
}
