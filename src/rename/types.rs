/// User-supplied settings for one directory pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameParameters {
    /// Placed before the episode designator; empty for none
    pub prefix: String,
    /// Release group label, rendered as `[tag]` at the front
    pub subgroup_tag: Option<String>,
    pub season: Option<u32>,
    /// Prefer fetched episode titles over titles embedded in filenames
    pub use_episode_titles: bool,
    /// Renumber so that episode 1 becomes this number; 0 keeps numbering
    pub numbering_offset: u32,
    /// Resolution to report for HDR files instead of the detected one
    pub hdr_target_resolution: Option<String>,
}

impl RenameParameters {
    /// Episode number after applying the numbering offset
    pub fn effective_episode(&self, episode: u32) -> u32 {
        if self.numbering_offset > 0 {
            episode.saturating_add(self.numbering_offset - 1)
        } else {
            episode
        }
    }
}

/// Sticky decision for files that carry only an episode number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialMatchPolicy {
    #[default]
    Unset,
    ForceRename,
    Skip,
}

/// Decides the partial-match policy the first time a partial file is seen
pub trait PartialMatchResolver {
    /// Returning `Unset` skips this file and asks again at the next one
    fn resolve(&mut self, filename: &str) -> PartialMatchPolicy;
}

/// A fixed answer, for non-interactive use
impl PartialMatchResolver for PartialMatchPolicy {
    fn resolve(&mut self, _filename: &str) -> PartialMatchPolicy {
        *self
    }
}

/// A single planned rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlanEntry {
    pub original_name: String,
    pub proposed_name: String,
    /// Episode number after offset
    pub episode: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoMatch,
    PartialDeclined,
    PartialUndecided,
}

impl SkipReason {
    pub fn description(&self) -> &'static str {
        match self {
            SkipReason::NoMatch => "does not match any episode pattern",
            SkipReason::PartialDeclined => "episode number only, skipped by choice",
            SkipReason::PartialUndecided => "episode number only, no valid answer given",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub name: String,
    pub reason: SkipReason,
}

/// Ordered renames for one directory plus the files left alone
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub entries: Vec<RenamePlanEntry>,
    pub skipped: Vec<SkippedFile>,
}

impl RenamePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: RenamePlanEntry) {
        self.entries.push(entry);
    }

    pub fn skip(&mut self, name: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedFile {
            name: name.into(),
            reason,
        });
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameFailure {
    pub entry: RenamePlanEntry,
    pub message: String,
}

/// Outcome of executing a plan; entries are independent of each other
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    pub renamed: Vec<RenamePlanEntry>,
    pub failed: Vec<RenameFailure>,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
