#![allow(dead_code)]

use course_roster::RosterConfig;
use serde_json::{json, Value};

pub fn config(base_url: &str, output_dir: &str, refresh_section_details: bool) -> RosterConfig {
    let output_dir = output_dir.replace('\\', "/");
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
refresh_section_details = {refresh_section_details}

[output]
directory = "{output_dir}"
"#
    ))
    .unwrap()
}

pub fn period(id: &str, name: &str) -> Value {
    json!({"academicPeriod": {"academicPeriodId": id, "academicPeriodName": name}})
}

pub fn instructor(given: &str, family: &str) -> Value {
    let handle = given.to_lowercase();
    json!({"worker": {
        "personNames": [{"nameType": "Legal Name", "givenName": given, "familyName": family}],
        "communicationChannel": {"emails": [
            {"channelType": {"code": "Work", "description": "Work"}, "emailAddress": format!("{}@ubc.ca", handle)},
            {"channelType": {"code": "Personal", "description": "Personal"}, "emailAddress": format!("{}@example.com", handle)}
        ]}
    }})
}

/// `code` is `SUBJECT NUMBER SECTION`.
pub fn section(
    section_id: &str,
    term: (&str, &str),
    code: &str,
    format: &str,
    dates: (&str, &str),
    instructors: Vec<Value>,
) -> Value {
    let parts: Vec<&str> = code.split(' ').collect();
    json!({
        "courseSectionId": section_id,
        "sectionNumber": parts[2],
        "startDate": dates.0,
        "endDate": dates.1,
        "academicPeriod": {"academicPeriodId": term.0, "academicPeriodName": term.1},
        "course": {"courseSubject": {"code": parts[0]}, "courseNumber": parts[1]},
        "courseComponent": {"instructionalFormat": {"code": format}},
        "teachingAssignments": [
            {"assignableRole": {"code": "Instructor Teaching"}, "identifiers": instructors}
        ],
    })
}

pub fn page(items: Vec<Value>) -> Value {
    json!({ "pageItems": items })
}
