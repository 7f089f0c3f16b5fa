use crate::core::fetcher::PaginatedFetcher;
use crate::domain::model::{AcademicPeriod, PeriodItem, TermToken};
use crate::domain::ports::ApiEndpoint;
use crate::utils::error::{RosterError, Result};
use std::collections::BTreeMap;

const NO_PERIODS_MIN_YEAR: i32 = 9999;
const NO_PERIODS_MAX_YEAR: i32 = 0;

impl AcademicPeriod {
    pub fn from_item(item: PeriodItem) -> Result<Self> {
        let id = item.academic_period.id;
        let name = item.academic_period.name.ok_or_else(|| {
            RosterError::decode(
                ApiEndpoint::AcademicPeriods.path(),
                format!("period {} has no academicPeriodName", id),
            )
        })?;
        let year = parse_year_prefix(&name)?;
        Ok(Self { id, name, year })
    }
}

/// Leading four characters of a period name as a calendar year.
pub fn parse_year_prefix(name: &str) -> Result<i32> {
    match name.get(..4) {
        Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => {
            prefix.parse().map_err(|_| RosterError::ParseError {
                value: name.to_string(),
            })
        }
        _ => Err(RosterError::ParseError {
            value: name.to_string(),
        }),
    }
}

/// Campus terms grouped by year, plus the year range of every period seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCatalog {
    terms: BTreeMap<String, Vec<TermToken>>,
    pub min_year: i32,
    pub max_year: i32,
}

impl TermCatalog {
    pub fn from_periods(periods: impl IntoIterator<Item = AcademicPeriod>, campus_marker: &str) -> Self {
        let mut catalog = Self {
            terms: BTreeMap::new(),
            min_year: NO_PERIODS_MIN_YEAR,
            max_year: NO_PERIODS_MAX_YEAR,
        };

        for period in periods {
            catalog.min_year = catalog.min_year.min(period.year);
            catalog.max_year = catalog.max_year.max(period.year);

            if !period.name.contains(campus_marker) {
                continue;
            }

            let token = TermToken {
                id: period.id,
                name: period.name,
            };
            let bucket = catalog
                .terms
                .entry(token.year_prefix().to_string())
                .or_default();
            if !bucket.contains(&token) {
                bucket.push(token);
            }
        }

        catalog
    }

    /// `None` while no period has been seen at all.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        (self.min_year <= self.max_year).then_some((self.min_year, self.max_year))
    }

    /// True when no campus term is available to select.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms of one year in insertion order; empty for unknown years.
    pub fn bucket(&self, year: &str) -> &[TermToken] {
        self.terms.get(year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Terms of one year sorted by their `id|name` token.
    pub fn terms_for_year(&self, year: &str) -> Result<Vec<TermToken>> {
        let mut terms = self
            .terms
            .get(year.trim())
            .filter(|terms| !terms.is_empty())
            .cloned()
            .ok_or_else(|| RosterError::not_found(format!("year {}", year.trim())))?;
        terms.sort_by_key(|term| term.to_string());
        Ok(terms)
    }

    /// Every campus term, years ascending, for index-based selection.
    pub fn all_terms(&self) -> Vec<TermToken> {
        self.terms
            .keys()
            .flat_map(|year| self.terms_for_year(year).unwrap_or_default())
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&TermToken> {
        self.terms.values().flatten().find(|term| term.name == name)
    }

    pub fn years(&self) -> impl Iterator<Item = (&str, &[TermToken])> {
        self.terms
            .iter()
            .map(|(year, terms)| (year.as_str(), terms.as_slice()))
    }
}

pub struct TermCatalogBuilder<'a> {
    fetcher: &'a PaginatedFetcher,
    campus_marker: &'a str,
}

impl<'a> TermCatalogBuilder<'a> {
    pub fn new(fetcher: &'a PaginatedFetcher, campus_marker: &'a str) -> Self {
        Self {
            fetcher,
            campus_marker,
        }
    }

    pub async fn build(&self) -> Result<TermCatalog> {
        let items: Vec<PeriodItem> = self
            .fetcher
            .fetch(ApiEndpoint::AcademicPeriods, &[])
            .await?;
        tracing::info!("📅 Fetched {} academic periods", items.len());

        let periods = items
            .into_iter()
            .map(AcademicPeriod::from_item)
            .collect::<Result<Vec<_>>>()?;
        let catalog = TermCatalog::from_periods(periods, self.campus_marker);

        match catalog.year_range() {
            Some((min, max)) => tracing::info!(
                "📅 Catalog covers {}..={} with {} {} term(s)",
                min,
                max,
                catalog.all_terms().len(),
                self.campus_marker
            ),
            None => tracing::warn!("📅 No academic periods returned"),
        }

        Ok(catalog)
    }
}
