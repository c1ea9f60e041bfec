//! Type-safe enumerations for submission and analysis kinds.
//!
//! The backend exposes one endpoint per analysis and each endpoint accepts a
//! single kind of input. These enums keep the pairing in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Kind of content a user can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Free text (news article or statement).
    Text,
    /// Link to a news article.
    Url,
    /// Image file.
    Image,
    /// Audio file.
    Audio,
    /// Video file.
    Video,
}

impl InputKind {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Url => "url",
            InputKind::Image => "image",
            InputKind::Audio => "audio",
            InputKind::Video => "video",
        }
    }

    /// Declared media-type prefix a file must carry for this kind.
    ///
    /// Text kinds have no prefix because they never carry a file.
    pub fn media_prefix(&self) -> Option<&'static str> {
        match self {
            InputKind::Image => Some("image/"),
            InputKind::Audio => Some("audio/"),
            InputKind::Video => Some("video/"),
            InputKind::Text | InputKind::Url => None,
        }
    }

    /// Returns true if submissions of this kind are files.
    pub fn is_file(&self) -> bool {
        self.media_prefix().is_some()
    }

    /// Returns true if the declared media type matches this kind.
    ///
    /// The comparison is a plain prefix test on the lowercase media type,
    /// mirroring how browsers report `File.type`.
    pub fn accepts_media_type(&self, media_type: &str) -> bool {
        match self.media_prefix() {
            Some(prefix) => media_type.trim().to_ascii_lowercase().starts_with(prefix),
            None => false,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(InputKind::Text),
            "url" => Ok(InputKind::Url),
            "image" => Ok(InputKind::Image),
            "audio" => Ok(InputKind::Audio),
            "video" => Ok(InputKind::Video),
            other => Err(ModelError::UnknownInputKind(other.to_string())),
        }
    }
}

/// Analysis requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Deepfake detection on a still image.
    DeepfakeImage,
    /// Frame-by-frame deepfake detection on a video.
    DeepfakeVideo,
    /// Deepfake detection on an audio clip.
    DeepfakeAudio,
    /// NLP fact-check of free text.
    TextFactCheck,
    /// Fact-check of the article behind a news URL.
    UrlFactCheck,
    /// Web detection of matching and similar images.
    ReverseImageSearch,
}

impl AnalysisKind {
    /// All analysis kinds in display order.
    pub const ALL: [AnalysisKind; 6] = [
        AnalysisKind::DeepfakeImage,
        AnalysisKind::DeepfakeVideo,
        AnalysisKind::DeepfakeAudio,
        AnalysisKind::TextFactCheck,
        AnalysisKind::UrlFactCheck,
        AnalysisKind::ReverseImageSearch,
    ];

    /// Returns the canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::DeepfakeImage => "deepfake_image",
            AnalysisKind::DeepfakeVideo => "deepfake_video",
            AnalysisKind::DeepfakeAudio => "deepfake_audio",
            AnalysisKind::TextFactCheck => "text_fact_check",
            AnalysisKind::UrlFactCheck => "url_fact_check",
            AnalysisKind::ReverseImageSearch => "reverse_image_search",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::DeepfakeImage => "Deepfake Detection (Image)",
            AnalysisKind::DeepfakeVideo => "Deepfake Detection (Video)",
            AnalysisKind::DeepfakeAudio => "Deepfake Detection (Audio)",
            AnalysisKind::TextFactCheck => "NLP Fact Checker",
            AnalysisKind::UrlFactCheck => "News URL Fact Check",
            AnalysisKind::ReverseImageSearch => "Reverse Image Search",
        }
    }

    /// The single input kind this analysis accepts.
    pub fn input_kind(&self) -> InputKind {
        match self {
            AnalysisKind::DeepfakeImage | AnalysisKind::ReverseImageSearch => InputKind::Image,
            AnalysisKind::DeepfakeVideo => InputKind::Video,
            AnalysisKind::DeepfakeAudio => InputKind::Audio,
            AnalysisKind::TextFactCheck => InputKind::Text,
            AnalysisKind::UrlFactCheck => InputKind::Url,
        }
    }

    /// Endpoint path relative to the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisKind::DeepfakeImage => "/deepfake/image",
            AnalysisKind::DeepfakeVideo => "/deepfake/video",
            AnalysisKind::DeepfakeAudio => "/deepfake/audio",
            AnalysisKind::TextFactCheck => "/nlp/analyze",
            AnalysisKind::UrlFactCheck => "/get-fc-url",
            AnalysisKind::ReverseImageSearch => "/reverse-image-search",
        }
    }

    /// Returns true for the deepfake family, which shares one response shape.
    pub fn is_deepfake(&self) -> bool {
        matches!(
            self,
            AnalysisKind::DeepfakeImage | AnalysisKind::DeepfakeVideo | AnalysisKind::DeepfakeAudio
        )
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = ModelError;

    /// Accepts the canonical name as well as hyphenated spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        AnalysisKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownAnalysisKind(s.trim().to_string()))
    }
}
