use super::error::ValidationErrors;
use crate::schema::run;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::fmt;

/// Maximum number of characters in a run's test name
pub const TEST_NAME_MAX_LENGTH: usize = 255;

/*
 * A run records one execution of a named test. Timestamps are stored as UTC
 * without an offset. Nothing requires time_end to come after time_start or
 * duration to match the difference between them; both are recorded exactly as
 * the client reported them.
 */
#[derive(Clone, Debug, PartialEq, Queryable)]
pub struct Run {
    pub id: i32,
    pub test_name: String,
    pub time_start: NaiveDateTime,
    pub time_end: NaiveDateTime,
    pub duration: f64,
}

impl Run {
    /// Return the writable fields of this run
    pub fn fields(&self) -> RunFields {
        RunFields {
            test_name: self.test_name.clone(),
            time_start: self.time_start,
            time_end: self.time_end,
            duration: self.duration,
        }
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.test_name, self.time_start, self.time_end
        )
    }
}

/// Everything about a run except its id, used to create runs and to replace them wholesale
#[derive(AsChangeset, Clone, Debug, Insertable, PartialEq)]
#[diesel(table_name = run)]
pub struct RunFields {
    pub test_name: String,
    pub time_start: NaiveDateTime,
    pub time_end: NaiveDateTime,
    pub duration: f64,
}

impl RunFields {
    /// Check the constraints that every stored run must satisfy
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name_length = self.test_name.chars().count();
        if self.test_name.trim().is_empty() {
            errors.add("testName", "This field is required.");
        } else if name_length > TEST_NAME_MAX_LENGTH {
            errors.add(
                "testName",
                format!(
                    "Ensure this value has at most {TEST_NAME_MAX_LENGTH} characters (it has {name_length})."
                ),
            );
        }

        if !self.duration.is_finite() {
            errors.add("duration", "Enter a number.");
        }

        errors.into_result()
    }
}
