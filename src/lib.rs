pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;
pub mod rename;
pub mod scanner;
pub mod shell;
pub mod ui;

pub use api::{
    ApiConfig, ApiError, BangumiClient, EpisodeTitleMap, MetadataSource, SeasonData,
    SubjectMetadata,
};
pub use config::{Config, ConfigLocation, ConfigStore};
pub use error::{AppError, ExitCode};
pub use parser::{match_filename, EpisodeMatch, MatchResult};
pub use rename::{
    build_plan, execute_plan, ExecutionReport, PartialMatchPolicy, PartialMatchResolver,
    RenameParameters, RenamePlan, RenamePlanEntry,
};
pub use scanner::{scan_files, ScannerError};
pub use shell::{Prompter, Shell, ShellError, ShellOptions};
