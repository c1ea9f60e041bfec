//! Raw backend payloads.
//!
//! These types mirror the JSON the verification backend returns. Every field
//! the backend may omit is an `Option`, and every struct deserializes with
//! `#[serde(default)]`, so a payload missing any optional field still parses.
//! Fallback values are applied later by the normalizer, never here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A number the backend may send either as a JSON number or as a string.
///
/// `gemini_confidence` is always string-encoded, and several detectors
/// report scores as strings depending on the model path that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    Number(f64),
    Text(String),
}

impl LenientNumber {
    /// Numeric value, or `None` if a string does not parse.
    ///
    /// A trailing `%` is tolerated so `"87.5%"` reads as `87.5`.
    pub fn value(&self) -> Option<f64> {
        match self {
            LenientNumber::Number(value) => Some(*value).filter(|v| v.is_finite()),
            LenientNumber::Text(text) => text
                .trim()
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
        }
    }
}

/// A descriptive scalar the backend may send as a string, number or bool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LenientText {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl LenientText {
    /// Display form of the value.
    pub fn into_string(self) -> String {
        match self {
            LenientText::Text(text) => text,
            LenientText::Number(number) => number.to_string(),
            LenientText::Flag(flag) => flag.to_string(),
        }
    }
}

// =============================================================================
// DEEPFAKE (image / video / audio)
// =============================================================================

/// Response of `POST /deepfake/{image,video,audio}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDeepfake {
    #[serde(rename = "Final Prediction")]
    pub final_prediction: Option<String>,
    #[serde(rename = "Confidence Score")]
    pub confidence_score: Option<LenientNumber>,
    #[serde(rename = "Fake Percentage")]
    pub fake_percentage: Option<LenientNumber>,
    #[serde(rename = "Real Frames")]
    pub real_frames: Option<LenientNumber>,
    #[serde(rename = "Fake Frames")]
    pub fake_frames: Option<LenientNumber>,
    #[serde(rename = "Total Frames Analyzed")]
    pub total_frames: Option<LenientNumber>,
    #[serde(rename = "CNN Prediction")]
    pub cnn_prediction: Option<LenientText>,
    #[serde(rename = "Noise Pattern Analysis")]
    pub noise_pattern: Option<LenientText>,
    /// Free-form; some model paths return an object instead of a sentence.
    #[serde(rename = "Metadata Analysis")]
    pub metadata_analysis: Option<Value>,
    #[serde(rename = "Symmetry Analysis")]
    pub symmetry: Option<RawSymmetry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSymmetry {
    #[serde(rename = "Vertical Symmetry")]
    pub vertical: Option<LenientNumber>,
    #[serde(rename = "Horizontal Symmetry")]
    pub horizontal: Option<LenientNumber>,
}

// =============================================================================
// NLP FACT CHECK
// =============================================================================

/// Response of `POST /nlp/analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTextFactCheck {
    pub ml_prediction: Option<String>,
    pub ml_confidence: Option<LenientNumber>,
    pub kg_prediction: Option<String>,
    pub kg_confidence: Option<LenientNumber>,
    pub gemini_prediction: Option<String>,
    pub gemini_confidence: Option<LenientNumber>,
    pub detailed_analysis: Option<RawDetailedAnalysis>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDetailedAnalysis {
    pub entities: Option<Vec<RawEntity>>,
    pub knowledge_graph: Option<RawKnowledgeGraph>,
    pub is_fake: Option<bool>,
    pub gemini_analysis: Option<RawAiAnalysis>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEntity {
    pub entity: Option<String>,
    #[serde(rename = "type")]
    pub label: Option<String>,
}

/// Knowledge-graph rendering; `image` is base64 PNG without a data-URL prefix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawKnowledgeGraph {
    pub image: Option<String>,
}

/// Multi-section AI analysis. Only the verdict block is always sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAiAnalysis {
    pub gemini_analysis: Option<RawAiVerdict>,
    pub text_classification: Option<RawTextClassification>,
    pub sentiment_analysis: Option<RawSentiment>,
    pub entity_recognition: Option<RawEntityRecognition>,
    pub context: Option<RawNarrativeContext>,
    pub fact_checking: Option<RawFactChecking>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAiVerdict {
    pub predicted_classification: Option<LenientText>,
    pub confidence_score: Option<LenientText>,
    pub reasoning: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTextClassification {
    pub category: Option<LenientText>,
    pub writing_style: Option<LenientText>,
    pub target_audience: Option<LenientText>,
    pub content_type: Option<LenientText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSentiment {
    pub primary_emotion: Option<LenientText>,
    pub emotional_intensity: Option<LenientText>,
    pub sensationalism_level: Option<LenientText>,
    pub bias_indicators: Option<Vec<String>>,
    pub tone: Option<RawTone>,
    pub emotional_triggers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTone {
    pub formality: Option<LenientText>,
    pub style: Option<LenientText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEntityRecognition {
    pub source_credibility: Option<LenientText>,
    pub people: Option<Vec<String>>,
    pub organizations: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub dates: Option<Vec<String>>,
    pub statistics: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNarrativeContext {
    pub main_narrative: Option<LenientText>,
    pub supporting_elements: Option<Vec<String>>,
    pub key_claims: Option<Vec<String>>,
    pub narrative_structure: Option<LenientText>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFactChecking {
    pub verifiable_claims: Option<Vec<String>>,
    pub evidence_present: Option<LenientText>,
    pub fact_check_score: Option<LenientText>,
}

// =============================================================================
// REVERSE IMAGE SEARCH
// =============================================================================

/// Response of `POST /reverse-image-search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReverseSearch {
    pub pages_with_matching_images: Option<Vec<RawPageMatch>>,
    pub full_matching_images: Option<Vec<RawImageMatch>>,
    pub partial_matching_images: Option<Vec<RawImageMatch>>,
    pub visually_similar_images: Option<Vec<RawImageMatch>>,
    pub web_entities: Option<Vec<RawWebEntity>>,
    pub best_guess_labels: Option<Vec<String>>,
    pub analysis: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawImageMatch {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPageMatch {
    pub url: Option<String>,
    pub page_title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWebEntity {
    pub description: Option<String>,
    pub score: Option<LenientNumber>,
}

// =============================================================================
// URL FACT CHECK
// =============================================================================

/// Envelope of `POST /get-fc-url`.
///
/// On `status == "error"` the `content` is a message string; on success it
/// is an object matching [`RawUrlContent`]. Unhandled backend exceptions
/// come back as a bare `{"error": "..."}` object instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUrlEnvelope {
    pub status: Option<String>,
    pub content: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUrlContent {
    pub fact_check_result: Option<RawFactCheckReport>,
    pub sources: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFactCheckReport {
    pub detailed_analysis: Option<RawFactCheckDetail>,
}

/// Report sections are backend-defined objects; they are flattened for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFactCheckDetail {
    pub overall_analysis: Option<Value>,
    pub claim_analysis: Option<Value>,
    pub source_analysis: Option<Value>,
}
