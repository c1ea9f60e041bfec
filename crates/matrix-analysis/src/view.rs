//! View composition.
//!
//! [`compose`] lays a normalized [`AnalysisResult`] out as an ordered list of
//! [`ViewSection`]s. The order is fixed per result kind and never depends on
//! the data; data only decides each section's `visible` flag. Front ends
//! render sections in order and skip hidden ones (see [`visible_sections`]).

use serde::Serialize;

use matrix_model::{
    AiAnalysis, AnalysisResult, AnalysisSection, DeepfakeResult, Entity, Field, ModelScore,
    PageMatch, ReverseSearchResult, TextFactCheckResult, UrlFactCheckResult, WebEntity,
};

/// Stable identifier of a rendered section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    // Reverse image search
    MatchSummary,
    AnalysisNarrative,
    WebEntities,
    Labels,
    FullMatches,
    MatchingPages,
    PartialMatches,
    VisuallySimilar,
    NoResults,
    // Deepfake
    VerdictBadges,
    DetectorSignals,
    FrameStatistics,
    Symmetry,
    FinalVerdict,
    // Text fact check
    TruthScore,
    ModelConfidence,
    Entities,
    KnowledgeGraph,
    AiVerdict,
    TextClassification,
    Sentiment,
    EntityRecognition,
    NarrativeContext,
    FactChecking,
    // URL fact check
    OverallAnalysis,
    ClaimAnalysis,
    SourceCredibility,
    Sources,
}

/// Content of a section, in the shape a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SectionBody {
    /// Label/value rows.
    Fields(Vec<Field>),
    /// Groups of label/value rows, one group per record.
    Records(Vec<Vec<Field>>),
    /// Plain list of strings.
    List(Vec<String>),
    /// A single message.
    Text(String),
    /// Parsed narrative sections.
    Narrative(Vec<AnalysisSection>),
    WebEntities(Vec<WebEntity>),
    Pages(Vec<PageMatch>),
    /// Image URLs.
    Images(Vec<String>),
    Models(Vec<ModelScore>),
    Entities(Vec<Entity>),
    /// A `data:` URL of a rendered image.
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSection {
    pub id: SectionId,
    pub title: String,
    pub visible: bool,
    pub body: SectionBody,
}

impl ViewSection {
    fn new(id: SectionId, title: &str, visible: bool, body: SectionBody) -> Self {
        Self {
            id,
            title: title.to_string(),
            visible,
            body,
        }
    }

    fn always(id: SectionId, title: &str, body: SectionBody) -> Self {
        Self::new(id, title, true, body)
    }
}

/// Compose the ordered sections for a result.
pub fn compose(result: &AnalysisResult) -> Vec<ViewSection> {
    match result {
        AnalysisResult::Deepfake(result) => deepfake(result),
        AnalysisResult::TextFactCheck(result) => text_fact_check(result),
        AnalysisResult::UrlFactCheck(result) => url_fact_check(result),
        AnalysisResult::ReverseImageSearch(result) => reverse_search(result),
    }
}

/// Compose and keep only the visible sections.
pub fn visible_sections(result: &AnalysisResult) -> Vec<ViewSection> {
    compose(result)
        .into_iter()
        .filter(|section| section.visible)
        .collect()
}

fn reverse_search(result: &ReverseSearchResult) -> Vec<ViewSection> {
    let total = result.total_matches();
    let summary = vec![
        Field::new("Full Matches", result.full_matches.len().to_string()),
        Field::new("Partial Matches", result.partial_matches.len().to_string()),
        Field::new("Similar Images", result.visually_similar.len().to_string()),
        Field::new("Matching Pages", result.pages.len().to_string()),
        Field::new("Total Matches", total.to_string()),
    ];

    vec![
        ViewSection::always(
            SectionId::MatchSummary,
            "Search Summary",
            SectionBody::Fields(summary),
        ),
        ViewSection::new(
            SectionId::AnalysisNarrative,
            "Analysis",
            !result.analysis_sections.is_empty(),
            SectionBody::Narrative(result.analysis_sections.clone()),
        ),
        ViewSection::new(
            SectionId::WebEntities,
            "Web Entities",
            !result.web_entities.is_empty(),
            SectionBody::WebEntities(result.web_entities.clone()),
        ),
        ViewSection::new(
            SectionId::Labels,
            "Best Guess Labels",
            !result.labels.is_empty(),
            SectionBody::List(result.labels.clone()),
        ),
        ViewSection::new(
            SectionId::FullMatches,
            "Full Matching Images",
            !result.full_matches.is_empty(),
            SectionBody::Images(result.full_matches.clone()),
        ),
        ViewSection::new(
            SectionId::MatchingPages,
            "Pages with Matching Images",
            !result.pages.is_empty(),
            SectionBody::Pages(result.pages.clone()),
        ),
        ViewSection::new(
            SectionId::PartialMatches,
            "Partial Matching Images",
            !result.partial_matches.is_empty(),
            SectionBody::Images(result.partial_matches.clone()),
        ),
        ViewSection::new(
            SectionId::VisuallySimilar,
            "Visually Similar Images",
            !result.visually_similar.is_empty(),
            SectionBody::Images(result.visually_similar.clone()),
        ),
        ViewSection::new(
            SectionId::NoResults,
            "No Results",
            total == 0,
            SectionBody::Text("No matching images were found.".to_string()),
        ),
    ]
}

fn deepfake(result: &DeepfakeResult) -> Vec<ViewSection> {
    let mut badges = vec![
        Field::new("Final Prediction", result.final_prediction.clone()),
        Field::new("Confidence Verdict", result.aggregate_verdict.as_str()),
        Field::new(
            "Confidence Score",
            format!("{:.1}%", result.confidence_score * 100.0),
        ),
    ];
    if result.verdicts_disagree() {
        badges.push(Field::new(
            "Note",
            "The prediction and the confidence verdict disagree",
        ));
    }

    let signals = &result.signals;
    let signal_fields = [
        ("CNN Prediction", &signals.cnn_prediction),
        ("Noise Pattern Analysis", &signals.noise_pattern),
        ("Metadata Analysis", &signals.metadata),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|value| Field::new(label, value.clone())))
    .collect();

    let frame_fields = result
        .frames
        .map(|frames| {
            vec![
                Field::new("Total Frames Analyzed", frames.total.to_string()),
                Field::new("Fake Percentage", result.fake_percentage.to_string()),
                Field::new("Real Frames", frames.real.to_string()),
                Field::new("Fake Frames", frames.fake.to_string()),
            ]
        })
        .unwrap_or_default();

    let symmetry_fields = result
        .symmetry
        .map(|symmetry| {
            vec![
                Field::new("Vertical", format!("{:.2}", symmetry.vertical)),
                Field::new("Horizontal", format!("{:.2}", symmetry.horizontal)),
            ]
        })
        .unwrap_or_default();

    let media = result.kind.input_kind();
    let final_verdict = format!(
        "This {media} is {}",
        result.final_prediction.to_lowercase()
    );

    vec![
        ViewSection::always(
            SectionId::VerdictBadges,
            "Analysis Results",
            SectionBody::Fields(badges),
        ),
        ViewSection::new(
            SectionId::DetectorSignals,
            "Detector Signals",
            !signals.is_empty(),
            SectionBody::Fields(signal_fields),
        ),
        ViewSection::new(
            SectionId::FrameStatistics,
            "Frame Statistics",
            result.frames.is_some(),
            SectionBody::Fields(frame_fields),
        ),
        ViewSection::new(
            SectionId::Symmetry,
            "Symmetry Analysis",
            result.symmetry.is_some(),
            SectionBody::Fields(symmetry_fields),
        ),
        ViewSection::always(
            SectionId::FinalVerdict,
            "Final Verdict",
            SectionBody::Text(final_verdict),
        ),
    ]
}

fn text_fact_check(result: &TextFactCheckResult) -> Vec<ViewSection> {
    let mut sections = vec![
        ViewSection::always(
            SectionId::TruthScore,
            "Truth Score",
            SectionBody::Text(result.truth.label().to_string()),
        ),
        ViewSection::always(
            SectionId::ModelConfidence,
            "Model Confidence",
            SectionBody::Models(result.models.clone()),
        ),
        ViewSection::new(
            SectionId::Entities,
            "Named Entities",
            !result.entities.is_empty(),
            SectionBody::Entities(result.entities.clone()),
        ),
        ViewSection::new(
            SectionId::KnowledgeGraph,
            "Knowledge Graph",
            result.knowledge_graph.is_some(),
            SectionBody::Image(result.knowledge_graph.clone().unwrap_or_default()),
        ),
    ];
    sections.extend(ai_sections(&result.ai));
    sections
}

fn ai_sections(ai: &AiAnalysis) -> Vec<ViewSection> {
    let mut verdict = vec![
        Field::new("Classification", ai.classification.clone()),
        Field::new("Confidence", ai.confidence.clone()),
    ];
    verdict.extend(
        ai.reasoning
            .iter()
            .map(|reason| Field::new("Reasoning", reason.clone())),
    );

    let text_classification = ai.text_classification.as_ref().map(|section| {
        vec![
            Field::new("Category", section.category.clone()),
            Field::new("Writing Style", section.writing_style.clone()),
            Field::new("Target Audience", section.target_audience.clone()),
            Field::new("Content Type", section.content_type.clone()),
        ]
    });

    let sentiment = ai.sentiment.as_ref().map(|section| {
        vec![
            Field::new("Primary Emotion", section.primary_emotion.clone()),
            Field::new("Emotional Intensity", section.emotional_intensity.clone()),
            Field::new("Sensationalism Level", section.sensationalism_level.clone()),
            Field::new("Bias Indicators", joined(&section.bias_indicators)),
            Field::new("Tone Formality", section.tone_formality.clone()),
            Field::new("Tone Style", section.tone_style.clone()),
            Field::new("Emotional Triggers", joined(&section.emotional_triggers)),
        ]
    });

    let entity_recognition = ai.entity_recognition.as_ref().map(|section| {
        vec![
            Field::new("Source Credibility", section.source_credibility.clone()),
            Field::new("People", joined(&section.people)),
            Field::new("Organizations", joined(&section.organizations)),
            Field::new("Locations", joined(&section.locations)),
            Field::new("Dates", joined(&section.dates)),
            Field::new("Statistics", joined(&section.statistics)),
        ]
    });

    let context = ai.context.as_ref().map(|section| {
        vec![
            Field::new("Main Narrative", section.main_narrative.clone()),
            Field::new("Supporting Elements", joined(&section.supporting_elements)),
            Field::new("Key Claims", joined(&section.key_claims)),
            Field::new("Narrative Structure", section.narrative_structure.clone()),
        ]
    });

    let fact_checking = ai.fact_checking.as_ref().map(|section| {
        vec![
            Field::new("Verifiable Claims", joined(&section.verifiable_claims)),
            Field::new("Evidence Present", section.evidence_present.clone()),
            Field::new("Fact Check Score", section.fact_check_score.clone()),
        ]
    });

    vec![
        ViewSection::always(
            SectionId::AiVerdict,
            "AI Analysis",
            SectionBody::Fields(verdict),
        ),
        optional_fields(
            SectionId::TextClassification,
            "Text Classification",
            text_classification,
        ),
        optional_fields(SectionId::Sentiment, "Sentiment Analysis", sentiment),
        optional_fields(
            SectionId::EntityRecognition,
            "Entity Recognition",
            entity_recognition,
        ),
        optional_fields(SectionId::NarrativeContext, "Narrative Context", context),
        optional_fields(SectionId::FactChecking, "Fact Checking", fact_checking),
    ]
}

fn optional_fields(id: SectionId, title: &str, fields: Option<Vec<Field>>) -> ViewSection {
    ViewSection::new(
        id,
        title,
        fields.is_some(),
        SectionBody::Fields(fields.unwrap_or_default()),
    )
}

fn url_fact_check(result: &UrlFactCheckResult) -> Vec<ViewSection> {
    vec![
        ViewSection::new(
            SectionId::OverallAnalysis,
            "Overall Analysis",
            !result.overall.is_empty(),
            SectionBody::Fields(result.overall.clone()),
        ),
        ViewSection::new(
            SectionId::ClaimAnalysis,
            "Claim Analysis",
            !result.claims.is_empty(),
            SectionBody::Records(result.claims.clone()),
        ),
        ViewSection::new(
            SectionId::SourceCredibility,
            "Source Credibility",
            !result.source_credibility.is_empty(),
            SectionBody::Records(result.source_credibility.clone()),
        ),
        ViewSection::new(
            SectionId::Sources,
            "Sources",
            !result.sources.is_empty(),
            SectionBody::List(result.sources.clone()),
        ),
    ]
}

fn joined(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_model::AnalysisKind;

    fn ids(sections: &[ViewSection]) -> Vec<SectionId> {
        sections.iter().map(|section| section.id).collect()
    }

    #[test]
    fn reverse_search_order_is_fixed() {
        let sections = compose(&AnalysisResult::ReverseImageSearch(
            ReverseSearchResult::default(),
        ));
        assert_eq!(
            ids(&sections),
            vec![
                SectionId::MatchSummary,
                SectionId::AnalysisNarrative,
                SectionId::WebEntities,
                SectionId::Labels,
                SectionId::FullMatches,
                SectionId::MatchingPages,
                SectionId::PartialMatches,
                SectionId::VisuallySimilar,
                SectionId::NoResults,
            ]
        );
    }

    #[test]
    fn empty_reverse_search_only_shows_summary_and_no_results() {
        let visible = visible_sections(&AnalysisResult::ReverseImageSearch(
            ReverseSearchResult::default(),
        ));
        assert_eq!(
            ids(&visible),
            vec![SectionId::MatchSummary, SectionId::NoResults]
        );
    }

    #[test]
    fn pages_alone_do_not_count_as_matches() {
        let result = ReverseSearchResult {
            pages: vec![PageMatch {
                url: "https://example.org".to_string(),
                title: "Example".to_string(),
            }],
            ..ReverseSearchResult::default()
        };
        let visible = visible_sections(&AnalysisResult::ReverseImageSearch(result));
        assert!(ids(&visible).contains(&SectionId::NoResults));
        assert!(ids(&visible).contains(&SectionId::MatchingPages));
    }

    #[test]
    fn url_report_hides_empty_sections() {
        let result = UrlFactCheckResult {
            sources: vec!["https://news.example".to_string()],
            ..UrlFactCheckResult::default()
        };
        let visible = visible_sections(&AnalysisResult::UrlFactCheck(result));
        assert_eq!(ids(&visible), vec![SectionId::Sources]);
    }

    #[test]
    fn final_verdict_names_the_media() {
        let result = DeepfakeResult {
            kind: AnalysisKind::DeepfakeVideo,
            final_prediction: "FAKE".to_string(),
            final_verdict: Some(matrix_model::Verdict::Fake),
            confidence_score: 0.3,
            aggregate_verdict: matrix_model::Verdict::Fake,
            fake_percentage: 70.0,
            frames: None,
            signals: Default::default(),
            symmetry: None,
        };
        let sections = compose(&AnalysisResult::Deepfake(result));
        let last = sections.last().expect("final verdict section");
        assert_eq!(last.id, SectionId::FinalVerdict);
        assert_eq!(last.body, SectionBody::Text("This video is fake".to_string()));
    }
}
