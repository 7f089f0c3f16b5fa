use crate::config::toml_config::CourseFilter;
use crate::core::extract::InstructorExtractor;
use crate::domain::model::{AggregateResult, CourseGroup, CourseRow, CourseSectionRecord};
use crate::domain::ports::ApiEndpoint;
use crate::utils::error::{RosterError, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::hash::Hash;

pub struct CourseAggregator<'a> {
    extractor: InstructorExtractor<'a>,
}

impl<'a> CourseAggregator<'a> {
    pub fn new(filter: &'a CourseFilter) -> Self {
        Self {
            extractor: InstructorExtractor::new(filter),
        }
    }

    /// One row per (reportable section, instructor). Rows of sections that
    /// start and end in different calendar years are also kept in
    /// `term_span_rows`. Identical rows are collapsed to their first occurrence.
    pub fn aggregate(&self, sections: &[CourseSectionRecord]) -> Result<AggregateResult> {
        let mut result = AggregateResult::default();

        for section in sections {
            let instructors = self.extractor.extract(section);
            if instructors.is_empty() {
                continue;
            }

            let code = section.code();
            let spans_years = spans_calendar_years(section)?;
            for instructor in instructors {
                let row = CourseRow::new(&code, instructor);
                if spans_years {
                    result.term_span_rows.push(row.clone());
                }
                result.rows.push(row);
            }
        }

        let before = result.rows.len();
        result.rows = dedup_first(result.rows);
        result.term_span_rows = dedup_first(result.term_span_rows);
        if result.rows.len() < before {
            tracing::debug!("Dropped {} duplicate rows", before - result.rows.len());
        }

        Ok(result)
    }

    /// One group per reportable section, including sections nobody teaches yet.
    /// Identical groups are collapsed to their first occurrence.
    pub fn group_sections(&self, sections: &[CourseSectionRecord]) -> Vec<CourseGroup> {
        let groups: Vec<CourseGroup> = sections
            .iter()
            .filter(|section| self.extractor.is_reportable(section))
            .map(|section| CourseGroup {
                code: section.code(),
                instructors: self.extractor.extract(section),
            })
            .collect();
        dedup_first(groups)
    }
}

pub fn spans_calendar_years(section: &CourseSectionRecord) -> Result<bool> {
    Ok(year_of(&section.start_date)? != year_of(&section.end_date)?)
}

fn year_of(date: &str) -> Result<i32> {
    date.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(|day| day.year())
        .ok_or_else(|| {
            RosterError::decode(
                ApiEndpoint::CourseSectionDetails.path(),
                format!("invalid section date '{}'", date),
            )
        })
}

/// Drops later copies of equal items, preserving order.
pub fn dedup_first<T: Clone + Eq + Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
