use crate::config::toml_config::CourseFilter;
use crate::domain::model::{CourseSectionRecord, Email, Instructor, PersonName, Worker};

pub const INSTRUCTOR_ROLE: &str = "Instructor Teaching";
pub const PREFERRED_NAME: &str = "Preferred Name";
pub const WORK_CHANNEL: &str = "Work";
pub const PERSONAL_CHANNEL: &str = "Personal";

/// Pulls the teaching instructors out of a section record.
///
/// Sections are only considered when their instructional format is allowed
/// or their `SUBJECT NUMBER` is listed as an exception. Within a section,
/// every identifier of every "Instructor Teaching" assignment that carries a
/// worker becomes one [`Instructor`].
pub struct InstructorExtractor<'a> {
    filter: &'a CourseFilter,
}

impl<'a> InstructorExtractor<'a> {
    pub fn new(filter: &'a CourseFilter) -> Self {
        Self { filter }
    }

    pub fn is_reportable(&self, section: &CourseSectionRecord) -> bool {
        let format = section.instructional_format();
        if self.filter.instructional_formats.iter().any(|f| f == format) {
            return true;
        }
        let course_key = section.course_key();
        self.filter.exceptions.iter().any(|e| *e == course_key)
    }

    pub fn extract(&self, section: &CourseSectionRecord) -> Vec<Instructor> {
        if !self.is_reportable(section) {
            tracing::debug!(
                "Skipping {} ({})",
                section.code(),
                section.instructional_format()
            );
            return Vec::new();
        }

        section
            .teaching_assignments
            .iter()
            .filter(|assignment| assignment.assignable_role.code == INSTRUCTOR_ROLE)
            .flat_map(|assignment| assignment.identifiers.iter())
            .filter_map(|identifier| identifier.worker.as_ref())
            .map(resolve_instructor)
            .collect()
    }
}

pub fn resolve_instructor(worker: &Worker) -> Instructor {
    let (first_name, last_name) = resolve_name(&worker.person_names);
    let (work_email, secondary_email) = resolve_emails(&worker.communication_channel.emails);
    Instructor {
        first_name,
        last_name,
        work_email,
        secondary_email,
    }
}

/// Preferred name wherever it sits in the list, otherwise the first entry.
fn resolve_name(names: &[PersonName]) -> (String, String) {
    names
        .iter()
        .find(|name| name.name_type.as_deref() == Some(PREFERRED_NAME))
        .or_else(|| names.first())
        .map(|name| (name.given_name.clone(), name.family_name.clone()))
        .unwrap_or_default()
}

/// Classifies by `channelType.code`. Last address per class wins; a Personal
/// address outranks any other non-Work channel for the secondary slot.
fn resolve_emails(emails: &[Email]) -> (String, String) {
    let mut work = None;
    let mut personal = None;
    let mut other = None;

    for email in emails {
        let address = Some(email.email_address.as_str());
        match email.channel_type.code.as_str() {
            WORK_CHANNEL => work = address,
            PERSONAL_CHANNEL => personal = address,
            _ => other = address,
        }
    }

    (
        work.unwrap_or_default().to_string(),
        personal.or(other).unwrap_or_default().to_string(),
    )
}
