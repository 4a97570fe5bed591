//! Token-level sub-matchers for the part of a filename that follows the
//! episode marker.
//!
//! The remainder is split into tokens first, then each token (or pair of
//! adjacent tokens, for two-word quality phrases) is offered to the
//! sub-matchers in a fixed order: quality phrase, codec, dynamic range,
//! resolution, single-word quality tag.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Codec, QualityTag};

static RESOLUTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)(\d{3,4})p$").unwrap());

/// A slice of the remainder with its starting byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
}

/// What a token (or token pair) was recognized as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognized {
    Codec(Codec),
    Hdr,
    Sdr,
    Resolution(String),
    Quality(QualityTag),
}

pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '_' | '-' | ',' | '[' | ']' | '(' | ')' | '【' | '】')
}

/// Split on separators, keeping `H.264`/`H.265` style codecs intact
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let dotted_codec = c == '.'
            && start.is_some_and(|s| text[s..i].eq_ignore_ascii_case("h"))
            && chars.peek().is_some_and(|(_, next)| next.is_ascii_digit());

        if is_separator(c) && !dotted_codec {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    text: &text[s..i],
                    start: s,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        tokens.push(Token {
            text: &text[s..],
            start: s,
        });
    }

    tokens
}

pub fn match_codec(token: &str) -> Option<Codec> {
    match token.to_ascii_lowercase().as_str() {
        "avc" | "h.264" | "h264" | "x264" => Some(Codec::Avc),
        "hevc" | "h.265" | "h265" | "x265" => Some(Codec::Hevc),
        "av1" => Some(Codec::Av1),
        "vp9" => Some(Codec::Vp9),
        _ => None,
    }
}

pub fn match_dynamic_range(token: &str) -> Option<Recognized> {
    match token.to_ascii_lowercase().as_str() {
        "hdr" | "hdr10" | "hdr10+" => Some(Recognized::Hdr),
        "sdr" => Some(Recognized::Sdr),
        _ => None,
    }
}

/// `4K` → `2160P`, `8K` → `4320P`, `1080p` → `1080P`
pub fn normalize_resolution(token: &str) -> Option<String> {
    let token = token.trim();
    match token.to_ascii_lowercase().as_str() {
        "4k" => return Some("2160P".to_string()),
        "8k" => return Some("4320P".to_string()),
        _ => {}
    }

    RESOLUTION_REGEX
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map(|digits| format!("{}P", digits.as_str()))
}

pub fn match_quality_word(token: &str) -> Option<QualityTag> {
    match token.to_lowercase().as_str() {
        "真彩色" | "truecolor" => Some(QualityTag::TrueColor),
        "hi10p" => Some(QualityTag::Hi10P),
        "高码率" => Some(QualityTag::HighBitrate),
        "10bit" => Some(QualityTag::TenBit),
        "60fps" | "高帧率" => Some(QualityTag::HighFrameRate),
        _ => None,
    }
}

pub fn match_quality_phrase(first: &str, second: &str) -> Option<QualityTag> {
    let phrase = format!("{} {}", first, second).to_lowercase();
    match phrase.as_str() {
        "true color" => Some(QualityTag::TrueColor),
        "high bitrate" => Some(QualityTag::HighBitrate),
        _ => None,
    }
}

fn match_single(token: &str) -> Option<Recognized> {
    if let Some(codec) = match_codec(token) {
        return Some(Recognized::Codec(codec));
    }
    if let Some(range) = match_dynamic_range(token) {
        return Some(range);
    }
    if let Some(resolution) = normalize_resolution(token) {
        return Some(Recognized::Resolution(resolution));
    }
    match_quality_word(token).map(Recognized::Quality)
}

/// Walk the tokens left to right, returning every recognized item with the
/// byte offset where it starts. Unrecognized tokens are passed over.
pub fn scan_tokens(tokens: &[Token<'_>]) -> Vec<(usize, Recognized)> {
    let mut found = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];

        if let Some(next) = tokens.get(i + 1) {
            if let Some(tag) = match_quality_phrase(token.text, next.text) {
                found.push((token.start, Recognized::Quality(tag)));
                i += 2;
                continue;
            }
        }

        if let Some(item) = match_single(token.text) {
            found.push((token.start, item));
        }
        i += 1;
    }

    found
}
