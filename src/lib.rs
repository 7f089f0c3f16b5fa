pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliArgs, RunMode};

pub use crate::app::pipelines::{RosterPipeline, SectionPipeline};
pub use crate::config::{cli::LocalStorage, toml_config::RosterConfig};
pub use crate::core::{
    catalog::{TermCatalog, TermCatalogBuilder},
    etl::EtlEngine,
    fetcher::PaginatedFetcher,
};
pub use crate::utils::error::{Result, RosterError};
