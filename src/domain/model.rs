use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---- academic-periods ----

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodItem {
    #[serde(rename = "academicPeriod")]
    pub academic_period: PeriodRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodRef {
    #[serde(rename = "academicPeriodId")]
    pub id: String,
    #[serde(rename = "academicPeriodName", default)]
    pub name: Option<String>,
}

/// A period whose name starts with its calendar year, e.g. `2024-25 Winter Term 1 (UBC-V)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicPeriod {
    pub id: String,
    pub name: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TermToken {
    pub id: String,
    pub name: String,
}

impl TermToken {
    /// 名稱前四碼即為年份
    pub fn year_prefix(&self) -> &str {
        self.name.get(..4).unwrap_or(&self.name)
    }
}

impl fmt::Display for TermToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.id, self.name)
    }
}

// ---- course-section-details ----

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSectionRecord {
    #[serde(default)]
    pub course_section_id: Option<String>,
    pub section_number: String,
    pub start_date: String,
    pub end_date: String,
    pub academic_period: PeriodRef,
    pub course: Course,
    pub course_component: CourseComponent,
    pub teaching_assignments: Vec<TeachingAssignment>,
}

impl CourseSectionRecord {
    /// `SUBJECT NUMBER`, the key used by the exception list.
    pub fn course_key(&self) -> String {
        format!("{} {}", self.course.course_subject.code, self.course.course_number)
    }

    /// `SUBJECT NUMBER SECTION`
    pub fn code(&self) -> String {
        format!("{} {}", self.course_key(), self.section_number)
    }

    pub fn instructional_format(&self) -> &str {
        &self.course_component.instructional_format.code
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_subject: CodeRef,
    pub course_number: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseComponent {
    pub instructional_format: CodeRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeRef {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachingAssignment {
    pub assignable_role: CodeRef,
    pub identifiers: Vec<Identifier>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Identifier {
    #[serde(default)]
    pub worker: Option<Worker>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub person_names: Vec<PersonName>,
    pub communication_channel: CommunicationChannel,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default)]
    pub name_type: Option<String>,
    pub given_name: String,
    pub family_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommunicationChannel {
    pub emails: Vec<Email>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub channel_type: CodeRef,
    pub email_address: String,
}

/// Sections of one academic year, bucketed by academic-period id.
#[derive(Debug, Clone, Default)]
pub struct HarvestedSections {
    pub by_term: BTreeMap<String, Vec<CourseSectionRecord>>,
}

impl HarvestedSections {
    pub fn insert(&mut self, record: CourseSectionRecord) {
        self.by_term
            .entry(record.academic_period.id.clone())
            .or_default()
            .push(record);
    }

    pub fn term(&self, term_id: &str) -> Option<&[CourseSectionRecord]> {
        self.by_term.get(term_id).map(Vec::as_slice)
    }

    pub fn section_count(&self) -> usize {
        self.by_term.values().map(Vec::len).sum()
    }
}

// ---- output ----

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Instructor {
    pub first_name: String,
    pub last_name: String,
    pub work_email: String,
    pub secondary_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CourseRow {
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub work_email: String,
    pub personal_email: String,
}

impl CourseRow {
    pub fn new(code: &str, instructor: Instructor) -> Self {
        Self {
            code: code.to_string(),
            first_name: instructor.first_name,
            last_name: instructor.last_name,
            work_email: instructor.work_email,
            personal_email: instructor.secondary_email,
        }
    }
}

/// One section with all of its instructors, for the widened CSV shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseGroup {
    pub code: String,
    pub instructors: Vec<Instructor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub rows: Vec<CourseRow>,
    pub term_span_rows: Vec<CourseRow>,
}

/// Outcome of one catalog term in the roster run.
#[derive(Debug, Clone)]
pub enum TermReport {
    Missing(TermToken),
    Aggregated {
        term: TermToken,
        result: AggregateResult,
    },
}
