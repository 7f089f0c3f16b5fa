//! Fixtures shared by the unit tests of the core modules.

use crate::config::toml_config::RosterConfig;
use crate::domain::model::CourseSectionRecord;
use serde_json::{json, Value};

pub(crate) fn test_config(base_url: &str) -> RosterConfig {
    RosterConfig::from_toml_str(&format!(
        r#"
[api.periods]
base_url = "{base_url}"
client_id = "period-id"
client_secret = "period-secret"

[api.sections]
base_url = "{base_url}"
client_id = "section-id"
client_secret = "section-secret"

[catalog]
campus_marker = "UBC-V"

[harvest]
subjects = ["LFS", "FNH"]

[output]
directory = "./unused"
"#
    ))
    .expect("test config parses")
}

pub(crate) fn email(channel: &str, address: &str) -> Value {
    json!({"channelType": {"code": channel, "description": channel}, "emailAddress": address})
}

pub(crate) fn person_name(name_type: &str, given: &str, family: &str) -> Value {
    json!({"nameType": name_type, "givenName": given, "familyName": family})
}

pub(crate) fn worker(names: Vec<Value>, emails: Vec<Value>) -> Value {
    json!({"worker": {"personNames": names, "communicationChannel": {"emails": emails}}})
}

/// A worker with a single legal name, a Work email and a Personal email.
pub(crate) fn simple_worker(given: &str, family: &str) -> Value {
    let handle = given.to_lowercase();
    worker(
        vec![person_name("Legal Name", given, family)],
        vec![
            email("Work", &format!("{}@ubc.ca", handle)),
            email("Personal", &format!("{}@example.com", handle)),
        ],
    )
}

pub(crate) fn assignment(role: &str, identifiers: Vec<Value>) -> Value {
    json!({"assignableRole": {"code": role}, "identifiers": identifiers})
}

pub(crate) fn section_json(
    term_id: &str,
    code: &str,
    format: &str,
    dates: (&str, &str),
    assignments: Vec<Value>,
) -> Value {
    let parts: Vec<&str> = code.split(' ').collect();
    json!({
        "courseSectionId": format!("{}-{}", term_id, code.replace(' ', "-")),
        "sectionNumber": parts[2],
        "startDate": dates.0,
        "endDate": dates.1,
        "academicPeriod": {"academicPeriodId": term_id, "academicPeriodName": "2024-25 Winter Term 1 (UBC-V)"},
        "course": {"courseSubject": {"code": parts[0]}, "courseNumber": parts[1]},
        "courseComponent": {"instructionalFormat": {"code": format}},
        "teachingAssignments": assignments,
    })
}

/// `code` is `SUBJECT NUMBER SECTION`, e.g. `LFS_V 100 001`.
pub(crate) fn section(code: &str, format: &str, instructors: Vec<Value>) -> CourseSectionRecord {
    let assignments = if instructors.is_empty() {
        vec![]
    } else {
        vec![assignment("Instructor Teaching", instructors)]
    };
    serde_json::from_value(section_json(
        "T1",
        code,
        format,
        ("2024-09-03", "2024-12-06"),
        assignments,
    ))
    .expect("fixture decodes")
}
