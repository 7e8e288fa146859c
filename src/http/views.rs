use crate::database::{Run, ValidationErrors, TEST_NAME_MAX_LENGTH};
use crate::format;
use crate::service::RunForm;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = "
body { font-family: sans-serif; margin: 2em auto; max-width: 60em; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: 0.4em; text-align: left; }
label { display: block; margin-top: 1em; }
.error { color: #b00020; margin: 0.2em 0; }
dt { font-weight: bold; margin-top: 0.6em; }
";

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " | perfstor" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav { a href="/" { "All runs" } }
                main { (content) }
            }
        }
    }
}

/// Table of every run with links to act on each one
pub fn run_list(runs: &[Run]) -> Markup {
    layout(
        "Runs",
        html! {
            h1 { "Runs" }
            p { a href="/create/" { "Record a run" } }
            @if runs.is_empty() {
                p { "No runs have been recorded yet." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Test" }
                            th { "Started" }
                            th { "Ended" }
                            th { "Duration (s)" }
                            th {}
                        }
                    }
                    tbody {
                        @for run in runs {
                            tr {
                                td { (run.test_name) }
                                td { (format::date(&run.time_start)) }
                                td { (format::date(&run.time_end)) }
                                td { (run.duration.to_string()) }
                                td {
                                    a href={ "/report/" (run.id) "/" } { "Report" }
                                    " "
                                    a href={ "/update/" (run.id) "/" } { "Edit" }
                                    " "
                                    a href={ "/delete/" (run.id) "/" } { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn field_errors(errors: &ValidationErrors, field: &str) -> Markup {
    html! {
        @for message in errors.field(field) {
            p.error { (message) }
        }
    }
}

/// Form for creating or editing a run, annotated with any validation errors from the last submission
pub fn run_form(heading: &str, form: &RunForm, errors: &ValidationErrors) -> Markup {
    layout(
        heading,
        html! {
            h1 { (heading) }
            form method="post" {
                label for="testName" { "Test name" }
                input id="testName" type="text" name="testName" maxlength=(TEST_NAME_MAX_LENGTH) value=(form.test_name);
                (field_errors(errors, "testName"))

                label for="timeStart" { "Start time (UTC)" }
                input id="timeStart" type="datetime-local" step="any" name="timeStart" value=(form.time_start);
                (field_errors(errors, "timeStart"))

                label for="timeEnd" { "End time (UTC)" }
                input id="timeEnd" type="datetime-local" step="any" name="timeEnd" value=(form.time_end);
                (field_errors(errors, "timeEnd"))

                label for="duration" { "Duration (seconds)" }
                input id="duration" type="number" step="any" name="duration" value=(form.duration);
                (field_errors(errors, "duration"))

                p {
                    button type="submit" { "Save" }
                    " "
                    a href="/" { "Cancel" }
                }
            }
        },
    )
}

/// Page asking the user to confirm the deletion of a run
pub fn confirm_delete(run: &Run) -> Markup {
    layout(
        "Delete run",
        html! {
            h1 { "Delete run" }
            p { "Are you sure you want to delete \"" (run.to_string()) "\"?" }
            form method="post" {
                button type="submit" { "Delete" }
                " "
                a href="/" { "Cancel" }
            }
        },
    )
}

/// Read-only view of a single run
pub fn report(run: &Run) -> Markup {
    layout(
        &run.test_name,
        html! {
            h1 { "Run report: " (run.test_name) }
            dl {
                dt { "Run" }
                dd { "#" (run.id) }
                dt { "Test name" }
                dd { (run.test_name) }
                dt { "Started" }
                dd { (format::date(&run.time_start)) }
                dt { "Ended" }
                dd { (format::date(&run.time_end)) }
                dt { "Duration" }
                dd { (run.duration.to_string()) " seconds (about " (format::duration(run.duration)) ")" }
            }
            p {
                a href={ "/update/" (run.id) "/" } { "Edit" }
                " "
                a href="/" { "Back to all runs" }
            }
        },
    )
}
