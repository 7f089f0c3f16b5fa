use crate::config::toml_config::{CourseFilter, EndpointConfig};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// The two upstream resources the roster is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEndpoint {
    AcademicPeriods,
    CourseSectionDetails,
}

impl ApiEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ApiEndpoint::AcademicPeriods => "academic-periods",
            ApiEndpoint::CourseSectionDetails => "course-section-details",
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self, endpoint: ApiEndpoint) -> &EndpointConfig;
    fn page_size(&self) -> usize;
    fn campus_marker(&self) -> &str;
    fn subjects(&self) -> &[String];
    fn subject_suffix(&self) -> &str;
    fn course_filter(&self) -> &CourseFilter;
    fn refresh_section_details(&self) -> bool;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Extracted: Send;
    type Transformed: Send;

    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    /// Returns the paths of every file written.
    async fn load(&self, result: Self::Transformed) -> Result<Vec<String>>;
}
