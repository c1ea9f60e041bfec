//! Normalized, display-ready analysis results.
//!
//! Unlike the raw payloads, these types carry no `Option` where a fallback
//! is defined: missing lists are empty, missing descriptive strings are
//! [`UNKNOWN`], missing scores are `0.0`. `Option` remains only where
//! absence itself changes what is displayed (an optional report section).

use serde::Serialize;
use std::fmt;

use crate::kind::AnalysisKind;
use crate::section::AnalysisSection;

/// Fallback for descriptive strings the backend did not send.
pub const UNKNOWN: &str = "Unknown";

/// Fallback title for a matching page without a title.
pub const UNTITLED_PAGE: &str = "Untitled Page";

/// Outcome of one completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    Deepfake(DeepfakeResult),
    TextFactCheck(TextFactCheckResult),
    UrlFactCheck(UrlFactCheckResult),
    ReverseImageSearch(ReverseSearchResult),
}

impl AnalysisResult {
    /// The analysis kind this result answers.
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisResult::Deepfake(result) => result.kind,
            AnalysisResult::TextFactCheck(_) => AnalysisKind::TextFactCheck,
            AnalysisResult::UrlFactCheck(_) => AnalysisKind::UrlFactCheck,
            AnalysisResult::ReverseImageSearch(_) => AnalysisKind::ReverseImageSearch,
        }
    }

    /// One-line summary used in logs and status lines.
    pub fn headline(&self) -> String {
        match self {
            AnalysisResult::Deepfake(result) => format!(
                "{}: {} ({:.1}% confidence)",
                result.kind.label(),
                result.final_prediction,
                result.confidence_score * 100.0
            ),
            AnalysisResult::TextFactCheck(result) => {
                format!("NLP Fact Checker: {}", result.truth.label())
            }
            AnalysisResult::UrlFactCheck(result) => format!(
                "News URL Fact Check: {} claims, {} sources",
                result.claims.len(),
                result.sources.len()
            ),
            AnalysisResult::ReverseImageSearch(result) => format!(
                "Reverse Image Search: {} matches on {} pages",
                result.total_matches(),
                result.pages.len()
            ),
        }
    }
}

// =============================================================================
// DEEPFAKE
// =============================================================================

/// Binary authenticity verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    /// Threshold rule of the secondary badge: strictly greater than 0.5 is real.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.5 {
            Verdict::Real
        } else {
            Verdict::Fake
        }
    }

    /// Parse a backend prediction label ("Real", "FAKE", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "real" => Some(Verdict::Real),
            "fake" => Some(Verdict::Fake),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "Real",
            Verdict::Fake => "Fake",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deepfake detection outcome for an image, video or audio clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepfakeResult {
    pub kind: AnalysisKind,
    /// `Final Prediction` as sent, or [`UNKNOWN`].
    pub final_prediction: String,
    /// Parsed primary prediction, if the label was recognizable.
    pub final_verdict: Option<Verdict>,
    /// `Confidence Score` in `0..=1`, `0.0` when missing.
    pub confidence_score: f64,
    /// Verdict derived from `confidence_score` alone.
    pub aggregate_verdict: Verdict,
    pub fake_percentage: f64,
    /// Present iff the backend reported any frame statistic.
    pub frames: Option<FrameStats>,
    pub signals: DetectorSignals,
    pub symmetry: Option<Symmetry>,
}

impl DeepfakeResult {
    /// True when the primary prediction and the confidence-derived badge
    /// disagree. Both are shown; neither is treated as authoritative.
    pub fn verdicts_disagree(&self) -> bool {
        self.final_verdict
            .is_some_and(|verdict| verdict != self.aggregate_verdict)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub total: u64,
    pub real: u64,
    pub fake: u64,
}

/// Individual detector outputs shown next to the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectorSignals {
    pub cnn_prediction: Option<String>,
    pub noise_pattern: Option<String>,
    pub metadata: Option<String>,
}

impl DetectorSignals {
    pub fn is_empty(&self) -> bool {
        self.cnn_prediction.is_none() && self.noise_pattern.is_none() && self.metadata.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Symmetry {
    pub vertical: f64,
    pub horizontal: f64,
}

// =============================================================================
// TEXT FACT CHECK
// =============================================================================

/// Overall truth label driven by `detailed_analysis.is_fake`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TruthLabel {
    LikelyTrue,
    LikelyFalse,
    Unknown,
}

impl TruthLabel {
    pub fn from_is_fake(is_fake: Option<bool>) -> Self {
        match is_fake {
            Some(true) => TruthLabel::LikelyFalse,
            Some(false) => TruthLabel::LikelyTrue,
            None => TruthLabel::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TruthLabel::LikelyTrue => "Likely True",
            TruthLabel::LikelyFalse => "Likely False",
            TruthLabel::Unknown => UNKNOWN,
        }
    }
}

/// Which way a model's prediction points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Leaning {
    Real,
    Fake,
}

/// One row of the model-confidence meters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelScore {
    pub model: String,
    pub prediction: String,
    /// Confidence on a 0-100 scale.
    pub confidence_percent: f64,
    pub leaning: Leaning,
}

impl ModelScore {
    /// Percentage formatted with one decimal, e.g. `"87.5%"`.
    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence_percent)
    }
}

/// Display category for a named-entity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityCategory {
    Person,
    Organization,
    Location,
    Date,
    Time,
    Money,
    Percent,
    /// Neutral category for labels without a dedicated style.
    Other,
}

impl EntityCategory {
    /// Color name of the category's badge.
    pub fn color_name(&self) -> &'static str {
        match self {
            EntityCategory::Person => "blue",
            EntityCategory::Organization => "purple",
            EntityCategory::Location => "green",
            EntityCategory::Date => "yellow",
            EntityCategory::Time => "orange",
            EntityCategory::Money => "emerald",
            EntityCategory::Percent => "pink",
            EntityCategory::Other => "gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    pub category: EntityCategory,
}

/// NLP fact-check outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFactCheckResult {
    pub truth: TruthLabel,
    /// Machine Learning, Knowledge Graph and AI Prediction, in that order.
    pub models: Vec<ModelScore>,
    pub entities: Vec<Entity>,
    /// `data:image/png;base64,...` when the backend rendered a graph.
    pub knowledge_graph: Option<String>,
    pub ai: AiAnalysis,
}

/// AI analysis block of the fact-check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiAnalysis {
    pub classification: String,
    pub confidence: String,
    pub reasoning: Vec<String>,
    pub text_classification: Option<TextClassification>,
    pub sentiment: Option<Sentiment>,
    pub entity_recognition: Option<EntityRecognition>,
    pub context: Option<NarrativeContext>,
    pub fact_checking: Option<FactChecking>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextClassification {
    pub category: String,
    pub writing_style: String,
    pub target_audience: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentiment {
    pub primary_emotion: String,
    pub emotional_intensity: String,
    pub sensationalism_level: String,
    pub bias_indicators: Vec<String>,
    pub tone_formality: String,
    pub tone_style: String,
    pub emotional_triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecognition {
    pub source_credibility: String,
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
    pub dates: Vec<String>,
    pub statistics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeContext {
    pub main_narrative: String,
    pub supporting_elements: Vec<String>,
    pub key_claims: Vec<String>,
    pub narrative_structure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactChecking {
    pub verifiable_claims: Vec<String>,
    pub evidence_present: String,
    pub fact_check_score: String,
}

// =============================================================================
// URL FACT CHECK
// =============================================================================

/// A label/value pair flattened out of a backend-defined report object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Fact-check report for a news article fetched from a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlFactCheckResult {
    pub overall: Vec<Field>,
    /// One entry per analyzed claim.
    pub claims: Vec<Vec<Field>>,
    /// One entry per assessed source.
    pub source_credibility: Vec<Vec<Field>>,
    pub sources: Vec<String>,
}

// =============================================================================
// REVERSE IMAGE SEARCH
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebEntity {
    pub description: String,
    pub score: Option<f64>,
}

impl WebEntity {
    /// Score with two decimals; hidden when missing or zero.
    pub fn score_display(&self) -> Option<String> {
        self.score
            .filter(|score| *score != 0.0)
            .map(|score| format!("{score:.2}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMatch {
    pub url: String,
    pub title: String,
}

/// Reverse image search outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReverseSearchResult {
    pub pages: Vec<PageMatch>,
    pub full_matches: Vec<String>,
    pub partial_matches: Vec<String>,
    pub visually_similar: Vec<String>,
    pub web_entities: Vec<WebEntity>,
    pub labels: Vec<String>,
    /// Raw narrative as sent.
    pub analysis: String,
    /// Narrative parsed into titled sections.
    pub analysis_sections: Vec<AnalysisSection>,
}

impl ReverseSearchResult {
    /// Full + partial + visually similar. Pages are not image matches.
    pub fn total_matches(&self) -> usize {
        self.full_matches.len() + self.partial_matches.len() + self.visually_similar.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_threshold_is_strict() {
        assert_eq!(Verdict::from_confidence(0.51), Verdict::Real);
        assert_eq!(Verdict::from_confidence(0.5), Verdict::Fake);
        assert_eq!(Verdict::from_confidence(0.0), Verdict::Fake);
    }

    #[test]
    fn web_entity_score_hidden_when_zero() {
        let entity = WebEntity {
            description: "Eiffel Tower".to_string(),
            score: Some(0.0),
        };
        assert_eq!(entity.score_display(), None);
        let entity = WebEntity {
            score: Some(0.8765),
            ..entity
        };
        assert_eq!(entity.score_display().as_deref(), Some("0.88"));
    }
}
