pub mod aggregate;
pub mod catalog;
pub mod emit;
pub mod etl;
pub mod extract;
pub mod fetcher;
pub mod harvest;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{AggregateResult, CourseGroup, CourseRow, Instructor, TermToken};
pub use crate::domain::ports::{ApiEndpoint, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
