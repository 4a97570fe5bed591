mod executor;
mod name_builder;
mod planner;
mod types;

pub use executor::execute_plan;
pub use name_builder::{
    build_episode_name, display_title, episode_designator, quality_suffix, sanitize_filename,
};
pub use planner::build_plan;
pub use types::{
    ExecutionReport, PartialMatchPolicy, PartialMatchResolver, RenameFailure, RenameParameters,
    RenamePlan, RenamePlanEntry, SkipReason, SkippedFile,
};
