use crate::core::aggregate::CourseAggregator;
use crate::core::catalog::TermCatalog;
use crate::core::emit::CsvEmitter;
use crate::core::fetcher::PaginatedFetcher;
use crate::core::harvest::CourseHarvester;
use crate::domain::model::{CourseGroup, CourseSectionRecord, TermToken};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;

/// Single-term run: every reportable section on one line, with one column
/// group per instructor. A whole-session term (no `Term` in its name) is read
/// as its Term 1 and Term 2 halves.
pub struct SectionPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: PaginatedFetcher,
    selected: TermToken,
    terms: Vec<TermToken>,
}

impl<S: Storage, C: ConfigProvider> SectionPipeline<S, C> {
    pub fn new(storage: S, config: C, catalog: &TermCatalog, selected: TermToken) -> Self {
        let terms = Self::expand_session_terms(&selected.name)
            .into_iter()
            .filter_map(|name| match catalog.find_by_name(&name) {
                Some(term) => Some(term.clone()),
                None => {
                    tracing::warn!("🔶 {} is not in the term catalog, skipping", name);
                    None
                }
            })
            .collect();
        let fetcher = PaginatedFetcher::new(&config);

        Self {
            storage,
            config,
            fetcher,
            selected,
            terms,
        }
    }

    pub fn expand_session_terms(term_name: &str) -> Vec<String> {
        if term_name.contains("Term") {
            vec![term_name.to_string()]
        } else {
            vec![
                term_name.replacen("Session", "Term 1", 1),
                term_name.replacen("Session", "Term 2", 1),
            ]
        }
    }

    pub fn terms(&self) -> &[TermToken] {
        &self.terms
    }

    pub fn output_file_name(&self) -> String {
        format!("{} - Course Instructors.csv", self.selected.name)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SectionPipeline<S, C> {
    type Extracted = Vec<CourseSectionRecord>;
    type Transformed = Vec<CourseGroup>;

    async fn extract(&self) -> Result<Vec<CourseSectionRecord>> {
        if self.terms.is_empty() {
            tracing::warn!("🔶 No catalog terms match {}", self.selected.name);
            return Ok(Vec::new());
        }

        let harvester = CourseHarvester::new(&self.fetcher, &self.config);
        let mut harvested = harvester.harvest(self.selected.year_prefix()).await?;

        let mut sections = Vec::new();
        for term in &self.terms {
            match harvested.by_term.remove(&term.id) {
                Some(records) => sections.extend(records),
                None => tracing::warn!(
                    "🔶 This term - {} - does not exist in the course section data",
                    term.name
                ),
            }
        }

        if self.config.refresh_section_details() {
            let mut refreshed = Vec::with_capacity(sections.len());
            for section in sections {
                match section.course_section_id.as_deref() {
                    Some(id) => refreshed.push(harvester.section_detail(id).await?),
                    None => refreshed.push(section),
                }
            }
            tracing::info!("📥 Refreshed {} section details", refreshed.len());
            sections = refreshed;
        }

        Ok(sections)
    }

    async fn transform(&self, data: Vec<CourseSectionRecord>) -> Result<Vec<CourseGroup>> {
        let groups = CourseAggregator::new(self.config.course_filter()).group_sections(&data);
        tracing::info!(
            "🔄 {} of {} sections are reportable",
            groups.len(),
            data.len()
        );
        Ok(groups)
    }

    async fn load(&self, groups: Vec<CourseGroup>) -> Result<Vec<String>> {
        if groups.is_empty() {
            println!("There are no courses in this term - {}.", self.selected.name);
            return Ok(Vec::new());
        }

        let path = CsvEmitter::new(&self.storage)
            .emit_groups(groups, &self.output_file_name())
            .await?;
        tracing::info!("💾 Saved {}", path);
        Ok(vec![path])
    }
}
