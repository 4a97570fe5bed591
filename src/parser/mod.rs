mod matchers;
mod types;

pub use matchers::normalize_resolution;
pub use types::*;

use matchers::{is_separator, scan_tokens, tokenize, Recognized};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

// Episode marker: 第<N>话 (also 話/集) or EP<N>, preceded by start or a separator
// Examples: "正片 第1话 初见", "[Sub] Show EP03 1080P"
static EPISODE_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s\[\]【】_.\-])(?:第\s*(\d+)\s*[话話集]|(?i:ep)\.?\s*(\d+))").unwrap()
});

/// Recognize an episode filename and extract its fields
pub fn match_filename(filename: &str) -> MatchResult {
    match try_match(filename) {
        Some(m) => MatchResult::Matched(m),
        None => {
            trace!(filename = %filename, "No episode marker");
            MatchResult::NoMatch
        }
    }
}

fn try_match(filename: &str) -> Option<EpisodeMatch> {
    let (stem, extension) = split_extension(filename)?;
    let (episode, rest) = find_episode_marker(stem)?;

    let tokens = tokenize(rest);
    let recognized = scan_tokens(&tokens);

    let title_end = recognized.first().map(|(pos, _)| *pos).unwrap_or(rest.len());
    let embedded_title = trim_title(&rest[..title_end]).to_string();

    let mut codec = None;
    let mut hdr = false;
    let mut resolution = None;
    let mut quality_tags = Vec::new();

    for (_, item) in recognized {
        match item {
            Recognized::Codec(c) => {
                codec.get_or_insert(c);
            }
            Recognized::Hdr => hdr = true,
            Recognized::Sdr => {}
            Recognized::Resolution(r) => {
                resolution.get_or_insert(r);
            }
            Recognized::Quality(tag) => {
                if !quality_tags.contains(&tag) {
                    quality_tags.push(tag);
                }
            }
        }
    }

    let shape = if embedded_title.is_empty() {
        MatchShape::Partial
    } else {
        MatchShape::Titled
    };

    Some(EpisodeMatch {
        episode,
        embedded_title,
        codec,
        hdr,
        resolution,
        quality_tags,
        extension,
        shape,
    })
}

fn split_extension(filename: &str) -> Option<(&str, String)> {
    let (stem, ext) = filename.rsplit_once('.')?;

    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some((stem, ext.to_ascii_lowercase()))
}

/// Find the first valid episode marker, returning its number and the text after it
fn find_episode_marker(stem: &str) -> Option<(u32, &str)> {
    for caps in EPISODE_MARKER_REGEX.captures_iter(stem) {
        let whole = caps.get(0)?;
        let rest = &stem[whole.end()..];

        if let Some(number) = caps.get(1) {
            return Some((number.as_str().parse().ok()?, rest));
        }

        if let Some(number) = caps.get(2) {
            let rest = skip_version_suffix(rest);
            // "EP3rd" or "EPISODE" are not markers
            if rest.chars().next().map_or(true, is_separator) {
                return Some((number.as_str().parse().ok()?, rest));
            }
        }
    }

    None
}

/// Skip a release revision such as the `v2` in `EP05v2`
fn skip_version_suffix(rest: &str) -> &str {
    match rest.strip_prefix(['v', 'V']) {
        Some(after) if after.starts_with(|c: char| c.is_ascii_digit()) => {
            after.trim_start_matches(|c: char| c.is_ascii_digit())
        }
        _ => rest,
    }
}

fn is_plain_separator(c: char) -> bool {
    is_separator(c) && closing_bracket(c).is_none() && !is_closing_bracket(c)
}

fn closing_bracket(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '【' => Some('】'),
        _ => None,
    }
}

fn is_closing_bracket(c: char) -> bool {
    matches!(c, ']' | ')' | '】')
}

/// Byte offsets of matched bracket pairs and of brackets left unmatched
fn bracket_pairs(text: &str) -> (Vec<(usize, usize)>, Vec<usize>) {
    let mut pairs = Vec::new();
    let mut unmatched = Vec::new();
    let mut open: Vec<(usize, char)> = Vec::new();

    for (i, c) in text.char_indices() {
        if let Some(close) = closing_bracket(c) {
            open.push((i, close));
        } else if is_closing_bracket(c) {
            match open.last() {
                Some(&(start, close)) if close == c => {
                    open.pop();
                    pairs.push((start, i));
                }
                _ => unmatched.push(i),
            }
        }
    }

    unmatched.extend(open.into_iter().map(|(i, _)| i));
    (pairs, unmatched)
}

/// Trim the text between the episode marker and the first quality token.
///
/// Brackets inside the title stay balanced: an opening bracket is only
/// dropped from the end and a closing one from the start, and a bracket at
/// an edge is removed only when it has no partner in the title or its
/// partner is the opposite edge.
fn trim_title(raw: &str) -> &str {
    let mut title = raw
        .trim_end_matches(|c: char| is_plain_separator(c) || closing_bracket(c).is_some())
        .trim_start_matches(|c: char| is_plain_separator(c) || is_closing_bracket(c));

    while let Some(inner) = strip_edge_bracket(title) {
        title = inner.trim_matches(is_plain_separator);
    }

    title
}

fn strip_edge_bracket(title: &str) -> Option<&str> {
    let first = title.chars().next()?;
    let (last_index, _) = title.char_indices().last()?;
    let (pairs, unmatched) = bracket_pairs(title);

    if last_index > 0 && pairs.contains(&(0, last_index)) {
        Some(&title[first.len_utf8()..last_index])
    } else if unmatched.contains(&last_index) {
        Some(&title[..last_index])
    } else if unmatched.contains(&0) {
        Some(&title[first.len_utf8()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(name: &str) -> EpisodeMatch {
        match match_filename(name) {
            MatchResult::Matched(m) => m,
            MatchResult::NoMatch => panic!("Expected a match for {}", name),
        }
    }

    // ============ Chinese Marker Tests ============

    #[test]
    fn test_titled_with_leading_text() {
        let m = matched("正片 第1话 初见.mp4");

        assert_eq!(m.episode, 1);
        assert_eq!(m.embedded_title, "初见");
        assert_eq!(m.extension, "mp4");
        assert_eq!(m.shape, MatchShape::Titled);
        assert!(m.codec.is_none());
        assert!(m.resolution.is_none());
        assert!(!m.hdr);
        assert!(m.quality_tags.is_empty());
    }

    #[test]
    fn test_titled_without_leading_text() {
        let m = matched("第12话 最后的旅程.mkv");

        assert_eq!(m.episode, 12);
        assert_eq!(m.embedded_title, "最后的旅程");
        assert_eq!(m.extension, "mkv");
    }

    #[test]
    fn test_title_with_spaces_kept_whole() {
        let m = matched("第3话 The Long Road Home.mp4");
        assert_eq!(m.embedded_title, "The Long Road Home");
    }

    #[test]
    fn test_partial_match() {
        let m = matched("正片 第7话.mp4");

        assert_eq!(m.episode, 7);
        assert_eq!(m.embedded_title, "");
        assert_eq!(m.shape, MatchShape::Partial);
        assert!(m.is_partial());
    }

    #[test]
    fn test_extension_lowercased() {
        let m = matched("第2话 重逢.MP4");
        assert_eq!(m.extension, "mp4");
    }

    #[test]
    fn test_traditional_marker() {
        let m = matched("第4話 再會.mkv");
        assert_eq!(m.episode, 4);
        assert_eq!(m.embedded_title, "再會");
    }

    // ============ Bracket Tests ============

    #[test]
    fn test_title_ending_in_parentheses_kept() {
        let m = matched("正片 第1话 初见 (前篇).mp4");
        assert_eq!(m.embedded_title, "初见 (前篇)");
    }

    #[test]
    fn test_parenthesized_part_before_quality_kept() {
        let m = matched("第2话 Who Am I (Part 2) 1080P.mkv");

        assert_eq!(m.embedded_title, "Who Am I (Part 2)");
        assert_eq!(m.resolution, Some("1080P".to_string()));
    }

    #[test]
    fn test_title_ending_in_square_brackets_kept() {
        let m = matched("第4话 初见 [上].mp4");
        assert_eq!(m.embedded_title, "初见 [上]");
    }

    #[test]
    fn test_bracketed_quality_group_removed() {
        let m = matched("第3话 初见 [1080P].mp4");

        assert_eq!(m.embedded_title, "初见");
        assert_eq!(m.resolution, Some("1080P".to_string()));
    }

    #[test]
    fn test_bracketed_fields_unwrapped() {
        let m = matched("[Group][第5话][初见][HEVC 1080P].mkv");

        assert_eq!(m.episode, 5);
        assert_eq!(m.embedded_title, "初见");
        assert_eq!(m.codec, Some(Codec::Hevc));
    }

    #[test]
    fn test_unbalanced_bracket_at_title_edge_removed() {
        let m = matched("[第6话 初见][1080P].mp4");
        assert_eq!(m.embedded_title, "初见");
    }

    // ============ EP Marker Tests ============

    #[test]
    fn test_ep_marker() {
        let m = matched("[Group] Show EP03 Departure.mkv");

        assert_eq!(m.episode, 3);
        assert_eq!(m.embedded_title, "Departure");
    }

    #[test]
    fn test_ep_marker_lowercase_and_dot() {
        let m = matched("show ep.05.mp4");
        assert_eq!(m.episode, 5);
        assert!(m.is_partial());
    }

    #[test]
    fn test_ep_marker_with_version_suffix() {
        let m = matched("EP05v2.mkv");
        assert_eq!(m.episode, 5);
        assert!(m.is_partial());

        let m = matched("[Group] Show EP12v3 Reunion 1080P.mkv");
        assert_eq!(m.episode, 12);
        assert_eq!(m.embedded_title, "Reunion");
        assert_eq!(m.resolution, Some("1080P".to_string()));
    }

    #[test]
    fn test_ep_inside_word_not_marker() {
        assert_eq!(match_filename("Deep3 Dive.mp4"), MatchResult::NoMatch);
        assert_eq!(match_filename("Show EP3rd.mp4"), MatchResult::NoMatch);
    }

    // ============ Quality Token Tests ============

    #[test]
    fn test_dotted_quality_fields() {
        let m = matched("第1话 初见.HEVC.HDR.4K.mp4");

        assert_eq!(m.embedded_title, "初见");
        assert_eq!(m.codec, Some(Codec::Hevc));
        assert!(m.hdr);
        assert_eq!(m.resolution, Some("2160P".to_string()));
        assert_eq!(m.extension, "mp4");
    }

    #[test]
    fn test_space_separated_quality_fields() {
        let m = matched("正片 第2话 重逢 H.264 1080P 高码率.mp4");

        assert_eq!(m.embedded_title, "重逢");
        assert_eq!(m.codec, Some(Codec::Avc));
        assert_eq!(m.resolution, Some("1080P".to_string()));
        assert_eq!(m.quality_tags, vec![QualityTag::HighBitrate]);
        assert!(!m.is_hdr());
    }

    #[test]
    fn test_true_color_infers_hdr() {
        let m = matched("第5话 Finale 8K true color.mkv");

        assert_eq!(m.embedded_title, "Finale");
        assert_eq!(m.resolution, Some("4320P".to_string()));
        assert!(!m.hdr);
        assert!(m.is_hdr());
    }

    #[test]
    fn test_sdr_token_ends_title() {
        let m = matched("第6话 Night.SDR.mp4");

        assert_eq!(m.embedded_title, "Night");
        assert!(!m.is_hdr());
    }

    #[test]
    fn test_quality_only_is_partial() {
        let m = matched("第8话.HEVC.mp4");

        assert_eq!(m.codec, Some(Codec::Hevc));
        assert!(m.is_partial());
    }

    // ============ No Match Tests ============

    #[test]
    fn test_no_marker() {
        assert_eq!(match_filename("random video.mp4"), MatchResult::NoMatch);
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(match_filename("第1话 初见"), MatchResult::NoMatch);
    }

    #[test]
    fn test_already_renamed_output_does_not_match() {
        assert_eq!(match_filename("MyShow S01E01 初见.mp4"), MatchResult::NoMatch);
        assert_eq!(match_filename("E03.mkv"), MatchResult::NoMatch);
    }
}
