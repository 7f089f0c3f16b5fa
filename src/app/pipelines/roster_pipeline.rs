use crate::core::aggregate::{dedup_first, CourseAggregator};
use crate::core::emit::CsvEmitter;
use crate::core::fetcher::PaginatedFetcher;
use crate::core::harvest::CourseHarvester;
use crate::domain::model::{CourseRow, HarvestedSections, TermReport, TermToken};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use std::collections::BTreeMap;

/// Year run: one `<term> - Courses.csv` per catalog term of the selected
/// year, plus a `Term 1+2` file for sections running across the new year.
pub struct RosterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: PaginatedFetcher,
    year: String,
    terms: Vec<TermToken>,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(storage: S, config: C, year: impl Into<String>, terms: Vec<TermToken>) -> Self {
        let fetcher = PaginatedFetcher::new(&config);
        Self {
            storage,
            config,
            fetcher,
            year: year.into(),
            terms,
        }
    }

    pub fn courses_file_name(term_name: &str) -> String {
        format!("{} - Courses.csv", term_name)
    }

    /// `2024-25 Winter Term 1 (UBC-V)` → `2024-25 Winter Term 1+2 (UBC-V)`
    pub fn term_span_name(term_name: &str, campus_marker: &str) -> String {
        let mut words = term_name.split_whitespace();
        match (words.next(), words.next()) {
            (Some(first), Some(second)) => {
                format!("{} {} Term 1+2 ({})", first, second, campus_marker)
            }
            _ => format!("{} Term 1+2 ({})", term_name, campus_marker),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RosterPipeline<S, C> {
    type Extracted = HarvestedSections;
    type Transformed = Vec<TermReport>;

    async fn extract(&self) -> Result<HarvestedSections> {
        CourseHarvester::new(&self.fetcher, &self.config)
            .harvest(&self.year)
            .await
    }

    async fn transform(&self, data: HarvestedSections) -> Result<Vec<TermReport>> {
        let aggregator = CourseAggregator::new(self.config.course_filter());

        let mut reports = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match data.term(&term.id) {
                Some(sections) => {
                    let result = aggregator.aggregate(sections)?;
                    tracing::info!(
                        "🔄 {}: {} rows from {} sections, {} spanning two years",
                        term.name,
                        result.rows.len(),
                        sections.len(),
                        result.term_span_rows.len()
                    );
                    reports.push(TermReport::Aggregated {
                        term: term.clone(),
                        result,
                    });
                }
                None => reports.push(TermReport::Missing(term.clone())),
            }
        }

        Ok(reports)
    }

    async fn load(&self, reports: Vec<TermReport>) -> Result<Vec<String>> {
        let emitter = CsvEmitter::new(&self.storage);
        let mut written = Vec::new();
        // Term 1 與 Term 2 共用同一個 Term 1+2 檔案
        let mut term_span_files: BTreeMap<String, Vec<CourseRow>> = BTreeMap::new();

        for report in reports {
            let (term, result) = match report {
                TermReport::Missing(term) => {
                    tracing::warn!(
                        "🔶 This term - {} - does not exist in the course section data",
                        term.name
                    );
                    println!(
                        "This term - {} - does not exist in the course section data.",
                        term.name
                    );
                    continue;
                }
                TermReport::Aggregated { term, result } => (term, result),
            };

            if result.rows.is_empty() {
                println!("There are no courses in this term - {}.", term.name);
            } else {
                let path = emitter
                    .emit_rows(result.rows, &Self::courses_file_name(&term.name))
                    .await?;
                tracing::info!("💾 Saved {}", path);
                written.push(path);
            }

            if !result.term_span_rows.is_empty() {
                println!(
                    "There are {} Term 1+2 courses in this term - {}.",
                    result.term_span_rows.len(),
                    term.name
                );
                let span_name = Self::term_span_name(&term.name, self.config.campus_marker());
                term_span_files
                    .entry(Self::courses_file_name(&span_name))
                    .or_default()
                    .extend(result.term_span_rows);
            }
        }

        for (file_name, rows) in term_span_files {
            let path = emitter.emit_rows(dedup_first(rows), &file_name).await?;
            tracing::info!("💾 Saved {}", path);
            written.push(path);
        }

        Ok(written)
    }
}
