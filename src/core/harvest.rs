use crate::core::fetcher::PaginatedFetcher;
use crate::domain::model::{CourseSectionRecord, HarvestedSections};
use crate::domain::ports::{ApiEndpoint, ConfigProvider};
use crate::utils::error::{RosterError, Result};

/// Pulls course-section detail records for every configured subject code.
pub struct CourseHarvester<'a> {
    fetcher: &'a PaginatedFetcher,
    subjects: &'a [String],
    subject_suffix: &'a str,
}

impl<'a> CourseHarvester<'a> {
    pub fn new<C: ConfigProvider>(fetcher: &'a PaginatedFetcher, config: &'a C) -> Self {
        Self {
            fetcher,
            subjects: config.subjects(),
            subject_suffix: config.subject_suffix(),
        }
    }

    pub async fn harvest(&self, year: &str) -> Result<HarvestedSections> {
        tracing::info!("📥 Started fetching all the courses for {}", year);

        let mut harvested = HarvestedSections::default();
        for subject in self.subjects {
            let course_subject = format!("{}{}", subject, self.subject_suffix);
            let records: Vec<CourseSectionRecord> = self
                .fetcher
                .fetch(
                    ApiEndpoint::CourseSectionDetails,
                    &[
                        ("academicYear", year.to_string()),
                        ("courseSubject", course_subject),
                    ],
                )
                .await?;
            tracing::info!("📥 Read {} =====> {} pageItems", subject, records.len());

            for record in records {
                harvested.insert(record);
            }
        }

        tracing::info!(
            "📥 Harvested {} sections across {} term(s)",
            harvested.section_count(),
            harvested.by_term.len()
        );
        Ok(harvested)
    }

    /// Re-reads one section by its `courseSectionId`.
    pub async fn section_detail(&self, course_section_id: &str) -> Result<CourseSectionRecord> {
        let records: Vec<CourseSectionRecord> = self
            .fetcher
            .fetch(
                ApiEndpoint::CourseSectionDetails,
                &[("courseSectionId", course_section_id.to_string())],
            )
            .await?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| RosterError::not_found(format!("course section {}", course_section_id)))
    }
}
