use crate::api::EpisodeTitleMap;
use crate::parser::{normalize_resolution, EpisodeMatch};

use super::types::RenameParameters;

/// `S01E03` with a season, `E03` without; both padded to at least two digits
pub fn episode_designator(season: Option<u32>, episode: u32) -> String {
    match season {
        Some(season) => format!("S{:02}E{:02}", season, episode),
        None => format!("E{:02}", episode),
    }
}

/// Title for the new name. Fetched titles are looked up by the number
/// written in the file, before any offset.
pub fn display_title(m: &EpisodeMatch, titles: &EpisodeTitleMap, params: &RenameParameters) -> String {
    if params.use_episode_titles {
        if let Some(title) = titles.get(m.episode).filter(|t| !t.is_empty()) {
            return title.to_string();
        }
    }

    m.embedded_title.clone()
}

/// Dotted quality suffix: codec, resolution, then an `HDR` marker.
/// The HDR target resolution replaces the detected one only for HDR files.
pub fn quality_suffix(m: &EpisodeMatch, hdr_target_resolution: Option<&str>) -> String {
    let hdr = m.is_hdr();
    let mut parts: Vec<String> = Vec::new();

    if let Some(codec) = m.codec {
        parts.push(codec.to_string());
    }

    let resolution = match hdr_target_resolution.filter(|_| hdr) {
        Some(target) => Some(normalize_resolution(target).unwrap_or_else(|| target.to_uppercase())),
        None => m.resolution.clone(),
    };
    if let Some(resolution) = resolution {
        parts.push(resolution);
    }

    if hdr {
        parts.push("HDR".to_string());
    }

    parts.join(".")
}

/// Assemble the new filename for a matched episode
pub fn build_episode_name(
    m: &EpisodeMatch,
    titles: &EpisodeTitleMap,
    params: &RenameParameters,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(tag) = params.subgroup_tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        parts.push(format!("[{}]", tag));
    }

    let prefix = params.prefix.trim();
    if !prefix.is_empty() {
        parts.push(prefix.to_string());
    }

    parts.push(episode_designator(
        params.season,
        params.effective_episode(m.episode),
    ));

    let title = display_title(m, titles, params);
    let title = title.trim();
    if !title.is_empty() {
        parts.push(title.to_string());
    }

    let mut name = sanitize_filename(&parts.join(" "));

    let suffix = quality_suffix(m, params.hdr_target_resolution.as_deref());
    if !suffix.is_empty() {
        name.push('.');
        name.push_str(&suffix);
    }

    name.push('.');
    name.push_str(&m.extension);
    name
}

/// Replace characters that are invalid in filenames on common filesystems
pub fn sanitize_filename(name: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    name.chars()
        .map(|c| if invalid_chars.contains(&c) { '_' } else { c })
        .collect()
}
