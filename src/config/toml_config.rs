use crate::domain::ports::{ApiEndpoint, ConfigProvider};
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub filter: CourseFilter,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    pub periods: EndpointConfig,
    pub sections: EndpointConfig,
}

/// Base URL plus the two static credential headers sent with every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl EndpointConfig {
    pub fn url_for(&self, endpoint: ApiEndpoint) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub campus_marker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    pub subjects: Vec<String>,
    #[serde(default = "default_subject_suffix")]
    pub subject_suffix: String,
    #[serde(default)]
    pub refresh_section_details: bool,
}

/// Which sections are reported at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseFilter {
    #[serde(default = "default_instructional_formats")]
    pub instructional_formats: Vec<String>,
    /// `SUBJECT NUMBER` pairs reported regardless of their instructional format.
    #[serde(default = "default_exceptions")]
    pub exceptions: Vec<String>,
}

impl Default for CourseFilter {
    fn default() -> Self {
        Self {
            instructional_formats: default_instructional_formats(),
            exceptions: default_exceptions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_page_size() -> usize {
    500
}

fn default_subject_suffix() -> String {
    "_V".to_string()
}

fn default_instructional_formats() -> Vec<String> {
    vec!["Lecture".to_string(), "Research".to_string()]
}

fn default_exceptions() -> Vec<String> {
    vec!["FNH_V 326".to_string(), "FNH_V 426".to_string()]
}

impl RosterConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| RosterError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ClientID})；找不到的變數保留原樣，交給驗證處理
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    fn validate_endpoint(prefix: &str, endpoint: &EndpointConfig) -> Result<()> {
        validation::validate_url(&format!("{}.base_url", prefix), &endpoint.base_url)?;
        validation::validate_secret(&format!("{}.client_id", prefix), &endpoint.client_id)?;
        validation::validate_secret(
            &format!("{}.client_secret", prefix),
            &endpoint.client_secret,
        )?;
        Ok(())
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        Self::validate_endpoint("api.periods", &self.api.periods)?;
        Self::validate_endpoint("api.sections", &self.api.sections)?;
        validation::validate_positive_number("api.page_size", self.api.page_size, 1)?;
        validation::validate_non_empty_string("catalog.campus_marker", &self.catalog.campus_marker)?;
        validation::validate_non_empty_list("harvest.subjects", &self.harvest.subjects)?;
        validation::validate_non_empty_list(
            "filter.instructional_formats",
            &self.filter.instructional_formats,
        )?;
        validation::validate_path("output.directory", &self.output.directory)?;
        Ok(())
    }
}

impl ConfigProvider for RosterConfig {
    fn endpoint(&self, endpoint: ApiEndpoint) -> &EndpointConfig {
        match endpoint {
            ApiEndpoint::AcademicPeriods => &self.api.periods,
            ApiEndpoint::CourseSectionDetails => &self.api.sections,
        }
    }

    fn page_size(&self) -> usize {
        self.api.page_size
    }

    fn campus_marker(&self) -> &str {
        &self.catalog.campus_marker
    }

    fn subjects(&self) -> &[String] {
        &self.harvest.subjects
    }

    fn subject_suffix(&self) -> &str {
        &self.harvest.subject_suffix
    }

    fn course_filter(&self) -> &CourseFilter {
        &self.filter
    }

    fn refresh_section_details(&self) -> bool {
        self.harvest.refresh_section_details
    }

    fn output_path(&self) -> &str {
        &self.output.directory
    }
}
