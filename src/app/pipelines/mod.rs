pub mod roster_pipeline;
pub mod section_pipeline;

pub use roster_pipeline::RosterPipeline;
pub use section_pipeline::SectionPipeline;
