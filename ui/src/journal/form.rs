//! Observation form input and its validation.

use time::{Date, OffsetDateTime};

use crate::core::error::{Field, StoreError, SubmitError};
use crate::core::model::{iso_date_string, parse_iso_date, Observation};

/// Raw values of the four form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationDraft {
    pub student_name: String,
    /// `YYYY-MM-DD` as supplied by the date input.
    pub date: String,
    pub kind: String,
    pub notes: String,
}

/// A draft that passed validation and can become an [`Observation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub student_name: String,
    pub date: Date,
    pub kind: String,
    pub notes: String,
}

impl ObservationDraft {
    /// Cleared form: blank text, today's date, the default type preselected.
    pub fn blank(today: Date, default_type: &str) -> Self {
        Self {
            student_name: String::new(),
            date: iso_date_string(today),
            kind: default_type.to_string(),
            notes: String::new(),
        }
    }

    /// Name and notes are trimmed; date and type are checked as given.
    pub fn validate(&self) -> Result<ValidDraft, SubmitError> {
        let student_name = self.student_name.trim();
        let notes = self.notes.trim();

        let missing: Vec<Field> = [
            (Field::StudentName, student_name.is_empty()),
            (Field::Date, self.date.is_empty()),
            (Field::Type, self.kind.is_empty()),
            (Field::Notes, notes.is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, empty)| empty.then_some(field))
        .collect();

        if !missing.is_empty() {
            return Err(SubmitError::MissingFields(missing));
        }

        let date =
            parse_iso_date(&self.date).ok_or_else(|| SubmitError::InvalidDate(self.date.clone()))?;

        Ok(ValidDraft {
            student_name: student_name.to_string(),
            date,
            kind: self.kind.clone(),
            notes: notes.to_string(),
        })
    }
}

impl ValidDraft {
    pub fn into_observation(
        self,
        existing: &[Observation],
        now: OffsetDateTime,
    ) -> Result<Observation, StoreError> {
        Observation::create(
            existing,
            self.student_name,
            self.date,
            self.kind,
            self.notes,
            now,
        )
    }
}
