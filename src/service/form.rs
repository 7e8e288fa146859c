use crate::database::{Run, RunFields, ValidationErrors};
use crate::timestamp;
use chrono::NaiveDateTime;
use serde::Deserialize;

const REQUIRED: &str = "This field is required.";

/// Raw run fields as submitted from the HTML form
/// Fields missing from the submission deserialize as empty strings and are reported as required.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RunForm {
    pub test_name: String,
    pub time_start: String,
    pub time_end: String,
    pub duration: String,
}

impl RunForm {
    /// Prefill a form with an existing run
    pub fn from_run(run: &Run) -> Self {
        Self {
            test_name: run.test_name.clone(),
            time_start: timestamp::to_input_value(&run.time_start),
            time_end: timestamp::to_input_value(&run.time_end),
            duration: run.duration.to_string(),
        }
    }

    /// Convert the submitted strings into run fields, collecting every problem along the way
    pub fn clean(&self) -> Result<RunFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let time_start = clean_timestamp(&mut errors, "timeStart", &self.time_start);
        let time_end = clean_timestamp(&mut errors, "timeEnd", &self.time_end);
        let duration = clean_duration(&mut errors, &self.duration);

        let fields = RunFields {
            test_name: self.test_name.trim().to_owned(),
            time_start: time_start.unwrap_or_default(),
            time_end: time_end.unwrap_or_default(),
            duration: duration.unwrap_or_default(),
        };
        if let Err(field_errors) = fields.validate() {
            errors.merge(field_errors);
        }

        errors.into_result()?;
        Ok(fields)
    }
}

fn clean_timestamp(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
) -> Option<NaiveDateTime> {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }

    let timestamp = timestamp::parse(value);
    if timestamp.is_none() {
        errors.add(field, "Enter a valid date/time.");
    }
    timestamp
}

fn clean_duration(errors: &mut ValidationErrors, value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        errors.add("duration", REQUIRED);
        return None;
    }

    match value.parse::<f64>() {
        Ok(duration) if duration.is_finite() => Some(duration),
        _ => {
            errors.add("duration", "Enter a number.");
            None
        }
    }
}
