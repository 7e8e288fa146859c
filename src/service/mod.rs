mod form;
mod payload;

pub use self::form::RunForm;
pub use self::payload::ApiError;
use self::payload::RunPayload;
use crate::database::{Run, RunStore, StoreError, StoreResult, ValidationErrors};
use log::{debug, info};

/// The outcome of submitting a run form
#[derive(Debug)]
pub enum Submission {
    Saved(Run),
    /// The form needs to be shown again with these errors
    Rejected(ValidationErrors),
}

// Turn store validation failures into rejected submissions, leaving other errors untouched
fn into_submission(result: StoreResult<Run>) -> StoreResult<Submission> {
    match result {
        Ok(run) => Ok(Submission::Saved(run)),
        Err(StoreError::Validation(errors)) => Ok(Submission::Rejected(errors)),
        Err(err) => Err(err),
    }
}

/// Return every run for display
pub fn list_runs(store: &mut dyn RunStore) -> StoreResult<Vec<Run>> {
    store.list()
}

/// Load a single run to show in a form, a confirmation page, or a report
pub fn get_run(store: &mut dyn RunStore, id: i32) -> StoreResult<Run> {
    store.get(id)
}

/// Create a run from a submitted form
pub fn create_run(store: &mut dyn RunStore, form: &RunForm) -> StoreResult<Submission> {
    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => {
            debug!("Rejected run form: {errors}");
            return Ok(Submission::Rejected(errors));
        }
    };

    let submission = into_submission(store.create(fields))?;
    if let Submission::Saved(run) = &submission {
        info!("Created run {} ({})", run.id, run.test_name);
    }
    Ok(submission)
}

/// Replace every field of an existing run from a submitted form
/// The run must exist even if the form is invalid.
pub fn update_run(store: &mut dyn RunStore, id: i32, form: &RunForm) -> StoreResult<Submission> {
    store.get(id)?;

    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => {
            debug!("Rejected update of run {id}: {errors}");
            return Ok(Submission::Rejected(errors));
        }
    };

    let submission = into_submission(store.update(id, fields))?;
    if let Submission::Saved(run) = &submission {
        info!("Updated run {} ({})", run.id, run.test_name);
    }
    Ok(submission)
}

/// Delete a run after the user confirmed it
pub fn delete_run(store: &mut dyn RunStore, id: i32) -> StoreResult<()> {
    store.delete(id)?;
    info!("Deleted run {id}");
    Ok(())
}

/// Create a run from the raw body of an API request
pub fn create_run_from_payload(store: &mut dyn RunStore, body: &[u8]) -> Result<Run, ApiError> {
    let payload: RunPayload = serde_json::from_slice(body)?;
    let run = store.create(payload.into_fields()?)?;
    info!("Created run {} ({}) from the API", run.id, run.test_name);
    Ok(run)
}

#[cfg(test)]
mod tests {
    use crate::database::MemoryRunStore;
    use assert_matches::assert_matches;

    use super::*;

    const SMOKE_TEST: &str = r#"{"testName": "smoke-test", "timeStart": "2024-01-01T00:00:00Z", "timeEnd": "2024-01-01T00:05:00Z", "duration": 300.0}"#;

    fn form(test_name: &str) -> RunForm {
        RunForm {
            test_name: test_name.to_owned(),
            time_start: "2024-01-01T00:00:00".to_owned(),
            time_end: "2024-01-01T00:05:00".to_owned(),
            duration: "300".to_owned(),
        }
    }

    #[test]
    fn test_create_run() {
        let mut store = MemoryRunStore::default();
        let Submission::Saved(run) = create_run(&mut store, &form("smoke-test")).unwrap() else {
            panic!("Form was rejected");
        };
        assert_eq!(run.test_name, "smoke-test");
        assert_eq!(list_runs(&mut store).unwrap(), vec![run]);
    }

    #[test]
    fn test_create_run_rejected() {
        let mut store = MemoryRunStore::default();
        let mut form = form("smoke-test");
        form.duration = String::new();
        assert_matches!(
            create_run(&mut store, &form),
            Ok(Submission::Rejected(errors)) if errors.field("duration") == ["This field is required."]
        );
        assert_eq!(list_runs(&mut store).unwrap(), vec![]);
    }

    #[test]
    fn test_update_run() {
        let mut store = MemoryRunStore::default();
        create_run(&mut store, &form("smoke-test")).unwrap();

        // The end is before the start, which is accepted
        let mut renamed = form("renamed");
        renamed.time_end = "2023-12-31T23:00:00".to_owned();
        assert_matches!(
            update_run(&mut store, 1, &renamed),
            Ok(Submission::Saved(run)) if run.test_name == "renamed"
        );
        let run = get_run(&mut store, 1).unwrap();
        assert_eq!(run.test_name, "renamed");
        assert!(run.time_end < run.time_start);
    }

    #[test]
    fn test_update_run_missing() {
        let mut store = MemoryRunStore::default();
        assert_matches!(
            update_run(&mut store, 1, &form("renamed")),
            Err(StoreError::NotFound(1))
        );
        // The run is missing, so an invalid form is still a missing run
        assert_matches!(
            update_run(&mut store, 1, &RunForm::default()),
            Err(StoreError::NotFound(1))
        );
    }

    #[test]
    fn test_update_run_rejected() {
        let mut store = MemoryRunStore::default();
        create_run(&mut store, &form("smoke-test")).unwrap();
        assert_matches!(
            update_run(&mut store, 1, &form("")),
            Ok(Submission::Rejected(_))
        );
        assert_eq!(get_run(&mut store, 1).unwrap().test_name, "smoke-test");
    }

    #[test]
    fn test_delete_run() {
        let mut store = MemoryRunStore::default();
        create_run(&mut store, &form("smoke-test")).unwrap();
        delete_run(&mut store, 1).unwrap();
        assert_matches!(get_run(&mut store, 1), Err(StoreError::NotFound(1)));
        assert_matches!(delete_run(&mut store, 1), Err(StoreError::NotFound(1)));
    }

    #[test]
    fn test_create_run_from_payload() {
        let mut store = MemoryRunStore::default();
        let run = create_run_from_payload(&mut store, SMOKE_TEST.as_bytes()).unwrap();
        assert_eq!(run.id, 1);

        let stored = get_run(&mut store, run.id).unwrap();
        assert_eq!(stored.test_name, "smoke-test");
        assert_eq!(stored.time_start.to_string(), "2024-01-01 00:00:00");
        assert_eq!(stored.time_end.to_string(), "2024-01-01 00:05:00");
        assert_eq!(stored.duration, 300.0);
    }

    #[test]
    fn test_create_run_from_payload_failures() {
        let mut store = MemoryRunStore::default();
        assert_matches!(
            create_run_from_payload(&mut store, br#"{"testName": "bad"}"#),
            Err(ApiError::Malformed(_))
        );
        assert_matches!(
            create_run_from_payload(&mut store, b"not json"),
            Err(ApiError::Malformed(_))
        );
        assert_matches!(
            create_run_from_payload(
                &mut store,
                br#"{"testName": "bad", "timeStart": "soon", "timeEnd": "2024-01-01T00:05:00Z", "duration": 1}"#
            ),
            Err(ApiError::Invalid(_))
        );
        assert_matches!(
            create_run_from_payload(
                &mut store,
                br#"{"testName": "", "timeStart": "2024-01-01T00:00:00Z", "timeEnd": "2024-01-01T00:05:00Z", "duration": 1}"#
            ),
            Err(ApiError::Store(StoreError::Validation(_)))
        );

        // None of the failures persisted anything
        assert_eq!(list_runs(&mut store).unwrap(), vec![]);
    }
}
