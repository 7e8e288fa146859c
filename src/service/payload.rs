use crate::database::{RunFields, StoreError, ValidationErrors};
use crate::timestamp;
use serde::Deserialize;

/// Body of a run creation request sent to the JSON API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPayload {
    pub test_name: String,
    pub time_start: String,
    pub time_end: String,
    pub duration: f64,
}

impl RunPayload {
    pub fn into_fields(self) -> Result<RunFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let time_start = timestamp::parse(&self.time_start);
        if time_start.is_none() {
            errors.add("timeStart", "Enter a valid date/time.");
        }
        let time_end = timestamp::parse(&self.time_end);
        if time_end.is_none() {
            errors.add("timeEnd", "Enter a valid date/time.");
        }

        match (time_start, time_end) {
            (Some(time_start), Some(time_end)) => Ok(RunFields {
                test_name: self.test_name,
                time_start,
                time_end,
                duration: self.duration,
            }),
            _ => Err(errors),
        }
    }
}

/// Every way that creating a run through the API can fail
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The body is not JSON or does not have the expected keys and types
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    /// A timestamp could not be parsed
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),

    #[error("{0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(time_start: &str, time_end: &str) -> RunPayload {
        RunPayload {
            test_name: "smoke-test".to_owned(),
            time_start: time_start.to_owned(),
            time_end: time_end.to_owned(),
            duration: 300.0,
        }
    }

    #[test]
    fn test_deserialize() {
        let payload: RunPayload = serde_json::from_str(
            r#"{"testName": "smoke-test", "timeStart": "2024-01-01T00:00:00Z", "timeEnd": "2024-01-01T00:05:00Z", "duration": 300}"#,
        )
        .unwrap();
        assert_eq!(payload.test_name, "smoke-test");
        assert_eq!(payload.duration, 300.0);
    }

    #[test]
    fn test_deserialize_missing_key() {
        let err = serde_json::from_str::<RunPayload>(r#"{"testName": "bad"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `timeStart`"));
    }

    #[test]
    fn test_deserialize_wrong_type() {
        assert!(serde_json::from_str::<RunPayload>(
            r#"{"testName": "bad", "timeStart": "2024-01-01T00:00:00Z", "timeEnd": "2024-01-01T00:05:00Z", "duration": "300"}"#,
        )
        .is_err());
    }

    #[test]
    fn test_into_fields() {
        let fields = payload("2024-01-01T00:00:00Z", "2024-01-01T00:05:00Z")
            .into_fields()
            .unwrap();
        assert_eq!(fields.time_start.to_string(), "2024-01-01 00:00:00");
        assert_eq!(fields.time_end.to_string(), "2024-01-01 00:05:00");
    }

    #[test]
    fn test_into_fields_invalid_timestamps() {
        let errors = payload("2024-01-01T00:00:00Z", "later")
            .into_fields()
            .unwrap_err();
        assert!(errors.field("timeStart").is_empty());
        assert_eq!(errors.field("timeEnd"), ["Enter a valid date/time."]);
    }
}
