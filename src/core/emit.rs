use crate::domain::model::{CourseGroup, CourseRow, Instructor};
use crate::domain::ports::Storage;
use crate::utils::error::{RosterError, Result};

pub const ROW_HEADER: [&str; 5] = [
    "Course",
    "First Name",
    "Last Name",
    "Work Email",
    "Personal Email",
];

pub const GROUP_HEADER: [&str; 5] = [
    "Course",
    "First Name",
    "Last Name",
    "Work Email",
    "Secondary Email",
];

const COLUMNS_PER_INSTRUCTOR: usize = 4;

pub struct CsvEmitter<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> CsvEmitter<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// One instructor per line, sorted by course code.
    pub async fn emit_rows(&self, mut rows: Vec<CourseRow>, file_name: &str) -> Result<String> {
        let data = rows_to_csv(&mut rows)?;
        tracing::debug!("Writing {} rows ({} bytes) to {}", rows.len(), data.len(), file_name);
        self.storage.write_file(file_name, &data).await
    }

    /// One section per line with as many instructor column groups as the busiest section needs.
    pub async fn emit_groups(&self, mut groups: Vec<CourseGroup>, file_name: &str) -> Result<String> {
        let data = groups_to_csv(&mut groups)?;
        tracing::debug!(
            "Writing {} sections ({} bytes) to {}",
            groups.len(),
            data.len(),
            file_name
        );
        self.storage.write_file(file_name, &data).await
    }
}

pub fn rows_to_csv(rows: &mut [CourseRow]) -> Result<Vec<u8>> {
    // 穩定排序：相同課號保留擷取順序
    rows.sort_by(|a, b| a.code.cmp(&b.code));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ROW_HEADER)?;
    for row in rows.iter() {
        writer.write_record([
            &row.code,
            &row.first_name,
            &row.last_name,
            &row.work_email,
            &row.personal_email,
        ])?;
    }
    finish(writer)
}

pub fn groups_to_csv(groups: &mut [CourseGroup]) -> Result<Vec<u8>> {
    groups.sort_by(|a, b| a.code.cmp(&b.code));

    let slots = max_instructor_count(groups).max(1);
    let width = 1 + slots * COLUMNS_PER_INSTRUCTOR;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(widened_header(slots))?;
    for group in groups.iter() {
        let mut record = Vec::with_capacity(width);
        record.push(group.code.clone());
        record.extend(group.instructors.iter().flat_map(instructor_cells));
        record.resize(width, String::new());
        writer.write_record(&record)?;
    }
    finish(writer)
}

pub fn max_instructor_count(groups: &[CourseGroup]) -> usize {
    groups.iter().map(|g| g.instructors.len()).max().unwrap_or(0)
}

/// Base header plus `Instructor N ...` columns for every slot after the first.
pub fn widened_header(slots: usize) -> Vec<String> {
    let mut header: Vec<String> = GROUP_HEADER.iter().map(|h| h.to_string()).collect();
    for slot in 2..=slots {
        for column in &GROUP_HEADER[1..] {
            header.push(format!("Instructor {} {}", slot, column));
        }
    }
    header
}

fn instructor_cells(instructor: &Instructor) -> [String; COLUMNS_PER_INSTRUCTOR] {
    [
        instructor.first_name.clone(),
        instructor.last_name.clone(),
        instructor.work_email.clone(),
        instructor.secondary_email.clone(),
    ]
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| RosterError::IoError(e.into_error()))
}
