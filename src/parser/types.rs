use std::fmt;

/// Whether the episode marker was followed by an embedded title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchShape {
    /// `第3话 Title.mp4`, `EP03 Title.mkv`
    Titled,
    /// `第3话.mp4`: episode number only
    Partial,
}

/// Video codec families recognized in filenames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Avc,
    Hevc,
    Av1,
    Vp9,
}

impl Codec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::Avc => "AVC",
            Codec::Hevc => "HEVC",
            Codec::Av1 => "AV1",
            Codec::Vp9 => "VP9",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release quality words that carry no structured field of their own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTag {
    TrueColor,
    Hi10P,
    HighBitrate,
    TenBit,
    HighFrameRate,
}

impl QualityTag {
    /// True color releases are HDR masters even when the literal token is missing
    pub fn implies_hdr(&self) -> bool {
        matches!(self, QualityTag::TrueColor)
    }
}

/// Structured fields extracted from a recognized episode filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMatch {
    pub episode: u32,
    /// Empty when the marker is directly followed by quality tokens or the extension
    pub embedded_title: String,
    pub codec: Option<Codec>,
    /// Literal `HDR` token present
    pub hdr: bool,
    /// Normalized resolution (`2160P`, `1080P`, ...)
    pub resolution: Option<String>,
    pub quality_tags: Vec<QualityTag>,
    /// Lowercased, without the dot
    pub extension: String,
    pub shape: MatchShape,
}

impl EpisodeMatch {
    /// HDR either from the literal token or inferred from a true color tag
    pub fn is_hdr(&self) -> bool {
        self.hdr || self.quality_tags.iter().any(QualityTag::implies_hdr)
    }

    pub fn is_partial(&self) -> bool {
        self.shape == MatchShape::Partial
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    Matched(EpisodeMatch),
}
