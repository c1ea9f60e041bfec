//! Result normalizer.
//!
//! Turns a raw backend body into an [`AnalysisResult`]. The raw payload types
//! model every optional field as `Option`; this module is the single place
//! where fallbacks are applied:
//!
//! - missing lists become empty
//! - missing or blank descriptive strings become [`UNKNOWN`]
//! - missing or unparsable scores become `0.0`, missing counts `0`
//!
//! A body that is not a JSON object, or whose fields have the wrong JSON
//! type, is a [`NormalizeError::MalformedResponse`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use matrix_model::raw::{
    LenientNumber, LenientText, RawAiAnalysis, RawDeepfake, RawEntity, RawImageMatch,
    RawPageMatch, RawReverseSearch, RawTextFactCheck, RawUrlContent, RawUrlEnvelope,
    RawWebEntity,
};
use matrix_model::{
    AiAnalysis, AnalysisKind, AnalysisResult, DeepfakeResult, DetectorSignals, Entity,
    EntityRecognition, FactChecking, Field, FrameStats, Leaning, ModelScore, NarrativeContext,
    PageMatch, ReverseSearchResult, Sentiment, Symmetry, TextClassification, TextFactCheckResult,
    TruthLabel, UNKNOWN, UNTITLED_PAGE, UrlFactCheckResult, Verdict, WebEntity,
};

use crate::entity::entity_category;
use crate::error::{NormalizeError, Result};
use crate::narrative::parse_analysis_text;

/// Prefix the backend omits from the knowledge-graph PNG.
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Normalize a raw response body.
pub fn normalize(body: &[u8], kind: AnalysisKind) -> Result<AnalysisResult> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| NormalizeError::malformed(kind, format!("invalid JSON: {e}")))?;
    normalize_value(value, kind)
}

/// Normalize an already parsed JSON value.
pub fn normalize_value(value: Value, kind: AnalysisKind) -> Result<AnalysisResult> {
    if !value.is_object() {
        return Err(NormalizeError::malformed(
            kind,
            format!("expected a JSON object, found {}", json_type(&value)),
        ));
    }

    let result = match kind {
        AnalysisKind::DeepfakeImage | AnalysisKind::DeepfakeVideo | AnalysisKind::DeepfakeAudio => {
            AnalysisResult::Deepfake(deepfake(kind, decode(value, kind)?))
        }
        AnalysisKind::TextFactCheck => AnalysisResult::TextFactCheck(text_fact_check(decode(
            value, kind,
        )?)),
        AnalysisKind::UrlFactCheck => {
            AnalysisResult::UrlFactCheck(url_fact_check(decode(value, kind)?)?)
        }
        AnalysisKind::ReverseImageSearch => {
            AnalysisResult::ReverseImageSearch(reverse_search(decode(value, kind)?))
        }
    };

    debug!(kind = %kind, headline = %result.headline(), "normalized response");
    Ok(result)
}

fn decode<T: DeserializeOwned>(value: Value, kind: AnalysisKind) -> Result<T> {
    serde_json::from_value(value).map_err(|e| NormalizeError::malformed(kind, e.to_string()))
}

// =============================================================================
// DEEPFAKE
// =============================================================================

fn deepfake(kind: AnalysisKind, raw: RawDeepfake) -> DeepfakeResult {
    let final_prediction = text_or_unknown(raw.final_prediction);
    let final_verdict = Verdict::from_label(&final_prediction);
    let confidence_score = score(raw.confidence_score.as_ref());

    let has_frames =
        raw.total_frames.is_some() || raw.real_frames.is_some() || raw.fake_frames.is_some();
    let frames = has_frames.then(|| FrameStats {
        total: count(raw.total_frames.as_ref()),
        real: count(raw.real_frames.as_ref()),
        fake: count(raw.fake_frames.as_ref()),
    });

    let signals = DetectorSignals {
        cnn_prediction: raw.cnn_prediction.and_then(lenient_text),
        noise_pattern: raw.noise_pattern.and_then(lenient_text),
        metadata: raw.metadata_analysis.map(value_text).and_then(non_blank),
    };

    let symmetry = raw.symmetry.map(|symmetry| Symmetry {
        vertical: score(symmetry.vertical.as_ref()),
        horizontal: score(symmetry.horizontal.as_ref()),
    });

    DeepfakeResult {
        kind,
        final_prediction,
        final_verdict,
        confidence_score,
        aggregate_verdict: Verdict::from_confidence(confidence_score),
        fake_percentage: score(raw.fake_percentage.as_ref()),
        frames,
        signals,
        symmetry,
    }
}

// =============================================================================
// TEXT FACT CHECK
// =============================================================================

fn text_fact_check(raw: RawTextFactCheck) -> TextFactCheckResult {
    let detail = raw.detailed_analysis.unwrap_or_default();

    let models = vec![
        model_score("Machine Learning", raw.ml_prediction, raw.ml_confidence.as_ref()),
        model_score("Knowledge Graph", raw.kg_prediction, raw.kg_confidence.as_ref()),
        model_score("AI Prediction", raw.gemini_prediction, raw.gemini_confidence.as_ref()),
    ];

    let entities = detail
        .entities
        .unwrap_or_default()
        .into_iter()
        .map(entity)
        .collect();

    let knowledge_graph = detail
        .knowledge_graph
        .and_then(|graph| graph.image)
        .and_then(non_blank)
        .map(|image| {
            if image.starts_with("data:") {
                image
            } else {
                format!("{PNG_DATA_URL_PREFIX}{image}")
            }
        });

    TextFactCheckResult {
        truth: TruthLabel::from_is_fake(detail.is_fake),
        models,
        entities,
        knowledge_graph,
        ai: ai_analysis(detail.gemini_analysis.unwrap_or_default()),
    }
}

fn model_score(model: &str, prediction: Option<String>, confidence: Option<&LenientNumber>) -> ModelScore {
    let prediction = text_or_unknown(prediction);
    let leaning = if prediction.to_lowercase().contains("fake") {
        Leaning::Fake
    } else {
        Leaning::Real
    };
    ModelScore {
        model: model.to_string(),
        prediction,
        confidence_percent: score(confidence),
        leaning,
    }
}

fn entity(raw: RawEntity) -> Entity {
    let label = text_or_unknown(raw.label);
    Entity {
        text: text_or_unknown(raw.entity),
        category: entity_category(&label),
        label,
    }
}

fn ai_analysis(raw: RawAiAnalysis) -> AiAnalysis {
    let verdict = raw.gemini_analysis.unwrap_or_default();
    AiAnalysis {
        classification: lenient_or_unknown(verdict.predicted_classification),
        confidence: lenient_or_unknown(verdict.confidence_score),
        reasoning: verdict.reasoning.unwrap_or_default(),
        text_classification: raw.text_classification.map(|section| TextClassification {
            category: lenient_or_unknown(section.category),
            writing_style: lenient_or_unknown(section.writing_style),
            target_audience: lenient_or_unknown(section.target_audience),
            content_type: lenient_or_unknown(section.content_type),
        }),
        sentiment: raw.sentiment_analysis.map(|section| {
            let tone = section.tone.unwrap_or_default();
            Sentiment {
                primary_emotion: lenient_or_unknown(section.primary_emotion),
                emotional_intensity: lenient_or_unknown(section.emotional_intensity),
                sensationalism_level: lenient_or_unknown(section.sensationalism_level),
                bias_indicators: section.bias_indicators.unwrap_or_default(),
                tone_formality: lenient_or_unknown(tone.formality),
                tone_style: lenient_or_unknown(tone.style),
                emotional_triggers: section.emotional_triggers.unwrap_or_default(),
            }
        }),
        entity_recognition: raw.entity_recognition.map(|section| EntityRecognition {
            source_credibility: lenient_or_unknown(section.source_credibility),
            people: section.people.unwrap_or_default(),
            organizations: section.organizations.unwrap_or_default(),
            locations: section.locations.unwrap_or_default(),
            dates: section.dates.unwrap_or_default(),
            statistics: section.statistics.unwrap_or_default(),
        }),
        context: raw.context.map(|section| NarrativeContext {
            main_narrative: lenient_or_unknown(section.main_narrative),
            supporting_elements: section.supporting_elements.unwrap_or_default(),
            key_claims: section.key_claims.unwrap_or_default(),
            narrative_structure: lenient_or_unknown(section.narrative_structure),
        }),
        fact_checking: raw.fact_checking.map(|section| FactChecking {
            verifiable_claims: section.verifiable_claims.unwrap_or_default(),
            evidence_present: lenient_or_unknown(section.evidence_present),
            fact_check_score: lenient_or_unknown(section.fact_check_score),
        }),
    }
}

// =============================================================================
// URL FACT CHECK
// =============================================================================

fn url_fact_check(envelope: RawUrlEnvelope) -> Result<UrlFactCheckResult> {
    let kind = AnalysisKind::UrlFactCheck;
    let is_error = envelope
        .status
        .as_deref()
        .is_some_and(|status| status.trim().eq_ignore_ascii_case("error"));

    if is_error {
        let message = envelope
            .content
            .map(value_text)
            .and_then(non_blank)
            .unwrap_or_else(|| "the backend reported an error".to_string());
        return Err(NormalizeError::BackendRejected { kind, message });
    }
    if let Some(message) = envelope.error.and_then(non_blank) {
        return Err(NormalizeError::BackendRejected { kind, message });
    }

    let content: RawUrlContent = match envelope.content {
        None | Some(Value::Null) => RawUrlContent::default(),
        Some(value @ Value::Object(_)) => decode(value, kind)?,
        Some(other) => {
            return Err(NormalizeError::malformed(
                kind,
                format!("expected content object, found {}", json_type(&other)),
            ));
        }
    };

    let detail = content
        .fact_check_result
        .and_then(|report| report.detailed_analysis)
        .unwrap_or_default();

    Ok(UrlFactCheckResult {
        overall: detail.overall_analysis.map(flatten_fields).unwrap_or_default(),
        claims: detail.claim_analysis.map(entries).unwrap_or_default(),
        source_credibility: detail.source_analysis.map(entries).unwrap_or_default(),
        sources: content
            .sources
            .unwrap_or_default()
            .into_iter()
            .filter_map(source_text)
            .collect(),
    })
}

/// Flatten an object into label/value rows; scalars become a single row.
fn flatten_fields(value: Value) -> Vec<Field> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| Field::new(humanize_key(&key), value_text(value)))
            .collect(),
        Value::Null => Vec::new(),
        other => non_blank(value_text(other))
            .map(|text| vec![Field::new("Summary", text)])
            .unwrap_or_default(),
    }
}

/// A list of report entries; a lone object or scalar counts as one entry.
fn entries(value: Value) -> Vec<Vec<Field>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    items
        .into_iter()
        .map(flatten_fields)
        .filter(|fields| !fields.is_empty())
        .collect()
}

fn source_text(value: Value) -> Option<String> {
    match value {
        Value::Object(ref map) => ["url", "link", "title", "name"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| non_blank(value_text(value))),
        other => non_blank(value_text(other)),
    }
}

/// `claim_analysis` -> `Claim Analysis`.
fn humanize_key(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// REVERSE IMAGE SEARCH
// =============================================================================

fn reverse_search(raw: RawReverseSearch) -> ReverseSearchResult {
    let analysis = raw.analysis.unwrap_or_default();
    let analysis_sections = parse_analysis_text(&analysis);

    ReverseSearchResult {
        pages: raw
            .pages_with_matching_images
            .unwrap_or_default()
            .into_iter()
            .map(page_match)
            .collect(),
        full_matches: image_urls(raw.full_matching_images),
        partial_matches: image_urls(raw.partial_matching_images),
        visually_similar: image_urls(raw.visually_similar_images),
        web_entities: raw
            .web_entities
            .unwrap_or_default()
            .into_iter()
            .map(web_entity)
            .collect(),
        labels: raw.best_guess_labels.unwrap_or_default(),
        analysis,
        analysis_sections,
    }
}

fn page_match(raw: RawPageMatch) -> PageMatch {
    PageMatch {
        url: text_or_unknown(raw.url),
        title: raw
            .page_title
            .and_then(non_blank)
            .unwrap_or_else(|| UNTITLED_PAGE.to_string()),
    }
}

fn image_urls(matches: Option<Vec<RawImageMatch>>) -> Vec<String> {
    matches
        .unwrap_or_default()
        .into_iter()
        .map(|image| text_or_unknown(image.url))
        .collect()
}

fn web_entity(raw: RawWebEntity) -> WebEntity {
    WebEntity {
        description: text_or_unknown(raw.description),
        score: raw.score.as_ref().and_then(LenientNumber::value),
    }
}

// =============================================================================
// FALLBACK HELPERS
// =============================================================================

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

fn text_or_unknown(text: Option<String>) -> String {
    text.and_then(non_blank)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn lenient_text(text: LenientText) -> Option<String> {
    non_blank(text.into_string())
}

fn lenient_or_unknown(text: Option<LenientText>) -> String {
    text.and_then(lenient_text)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn score(number: Option<&LenientNumber>) -> f64 {
    number.and_then(LenientNumber::value).unwrap_or(0.0)
}

fn count(number: Option<&LenientNumber>) -> u64 {
    // Counts are non-negative integers; floats are rounded.
    score(number).max(0.0).round() as u64
}

/// Display text of an arbitrary JSON value.
fn value_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .into_iter()
            .map(value_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| format!("{}: {}", humanize_key(&key), value_text(value)))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_snake_case_keys() {
        assert_eq!(humanize_key("overall_analysis"), "Overall Analysis");
        assert_eq!(humanize_key("truth-score"), "Truth Score");
        assert_eq!(humanize_key("verdict"), "Verdict");
    }

    #[test]
    fn counts_round_and_clamp() {
        assert_eq!(count(Some(&LenientNumber::Number(4.6))), 5);
        assert_eq!(count(Some(&LenientNumber::Number(-3.0))), 0);
        assert_eq!(count(None), 0);
    }

    #[test]
    fn nested_values_render_as_text() {
        let value = serde_json::json!({"score": 7, "notes": ["a", "b"], "gone": null});
        assert_eq!(value_text(value), "Notes: a, b; Score: 7");
    }

    #[test]
    fn sources_prefer_url_field() {
        let value = serde_json::json!({"title": "Wire story", "url": "https://news.example/1"});
        assert_eq!(source_text(value).as_deref(), Some("https://news.example/1"));
        assert_eq!(source_text(Value::Null), None);
    }
}
