use tracing::{debug, info};

use crate::api::EpisodeTitleMap;
use crate::parser::{match_filename, MatchResult};

use super::name_builder::build_episode_name;
use super::types::{
    PartialMatchPolicy, PartialMatchResolver, RenameParameters, RenamePlan, RenamePlanEntry,
    SkipReason,
};

/// Build the rename plan for one directory's files, in the given order.
///
/// `policy` carries the partial-match decision across the pass; it is
/// resolved through `resolver` the first time a file with only an episode
/// number is seen and reused for the rest.
pub fn build_plan<S: AsRef<str>>(
    filenames: &[S],
    titles: &EpisodeTitleMap,
    params: &RenameParameters,
    policy: &mut PartialMatchPolicy,
    resolver: &mut dyn PartialMatchResolver,
) -> RenamePlan {
    let mut plan = RenamePlan::new();

    for filename in filenames {
        let filename = filename.as_ref();

        let m = match match_filename(filename) {
            MatchResult::Matched(m) => m,
            MatchResult::NoMatch => {
                debug!("Skipping {}: no episode marker", filename);
                plan.skip(filename, SkipReason::NoMatch);
                continue;
            }
        };

        if m.is_partial() {
            if *policy == PartialMatchPolicy::Unset {
                *policy = resolver.resolve(filename);
                debug!("Partial match policy resolved to {:?}", policy);
            }

            match policy {
                PartialMatchPolicy::ForceRename => {}
                PartialMatchPolicy::Skip => {
                    plan.skip(filename, SkipReason::PartialDeclined);
                    continue;
                }
                PartialMatchPolicy::Unset => {
                    plan.skip(filename, SkipReason::PartialUndecided);
                    continue;
                }
            }
        }

        let proposed_name = build_episode_name(&m, titles, params);
        debug!("Planned: {} -> {}", filename, proposed_name);

        plan.add_entry(RenamePlanEntry {
            original_name: filename.to_string(),
            proposed_name,
            episode: params.effective_episode(m.episode),
        });
    }

    info!(
        "Planned {} renames, skipped {} files",
        plan.len(),
        plan.skipped_count()
    );

    plan
}
