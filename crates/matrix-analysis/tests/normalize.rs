use matrix_analysis::{NormalizeError, SectionId, normalize, normalize_value, visible_sections};
use matrix_model::{
    AnalysisKind, AnalysisResult, EntityCategory, Leaning, TruthLabel, UNKNOWN, UNTITLED_PAGE,
    Verdict,
};
use serde_json::json;

fn expect_deepfake(result: AnalysisResult) -> matrix_model::DeepfakeResult {
    match result {
        AnalysisResult::Deepfake(result) => result,
        other => panic!("expected deepfake result, got {other:?}"),
    }
}

#[test]
fn deepfake_image_keeps_both_verdicts() {
    let body = br#"{
        "Final Prediction": "Real",
        "Confidence Score": 0.42,
        "Fake Percentage": 58.0,
        "CNN Prediction": "Real",
        "Symmetry Analysis": {"Vertical Symmetry": 0.913, "Horizontal Symmetry": "0.5"}
    }"#;
    let result = expect_deepfake(normalize(body, AnalysisKind::DeepfakeImage).unwrap());

    assert_eq!(result.final_prediction, "Real");
    assert_eq!(result.final_verdict, Some(Verdict::Real));
    assert_eq!(result.aggregate_verdict, Verdict::Fake);
    assert!(result.verdicts_disagree());
    assert_eq!(result.frames, None);
    assert_eq!(result.signals.cnn_prediction.as_deref(), Some("Real"));
    let symmetry = result.symmetry.unwrap();
    assert_eq!(symmetry.horizontal, 0.5);
}

#[test]
fn deepfake_video_reports_frames_when_any_frame_field_is_present() {
    let value = json!({
        "Final Prediction": "Fake",
        "Confidence Score": "0.12",
        "Fake Frames": 18
    });
    let result = expect_deepfake(normalize_value(value, AnalysisKind::DeepfakeVideo).unwrap());

    let frames = result.frames.unwrap();
    assert_eq!((frames.total, frames.real, frames.fake), (0, 0, 18));
    assert_eq!(result.confidence_score, 0.12);
    assert!(!result.verdicts_disagree());
}

#[test]
fn empty_deepfake_object_falls_back() {
    let result = expect_deepfake(normalize(b"{}", AnalysisKind::DeepfakeAudio).unwrap());
    assert_eq!(result.final_prediction, UNKNOWN);
    assert_eq!(result.final_verdict, None);
    assert_eq!(result.confidence_score, 0.0);
    assert_eq!(result.aggregate_verdict, Verdict::Fake);
    assert!(result.signals.is_empty());
}

#[test]
fn text_fact_check_maps_models_entities_and_graph() {
    let value = json!({
        "ml_prediction": "FAKE",
        "ml_confidence": 87.5,
        "kg_prediction": "REAL",
        "kg_confidence": 61.04,
        "gemini_prediction": "Fake",
        "gemini_confidence": "50",
        "detailed_analysis": {
            "is_fake": true,
            "entities": [
                {"entity": "NASA", "type": "organization"},
                {"entity": "Mars", "type": "GPE"}
            ],
            "knowledge_graph": {"image": "iVBORw0KGgo="},
            "gemini_analysis": {
                "gemini_analysis": {
                    "predicted_classification": "Misleading",
                    "confidence_score": 72,
                    "reasoning": ["No primary source is cited."]
                },
                "sentiment_analysis": {
                    "primary_emotion": "fear",
                    "tone": {"formality": "informal"}
                }
            }
        }
    });
    let AnalysisResult::TextFactCheck(result) =
        normalize_value(value, AnalysisKind::TextFactCheck).unwrap()
    else {
        panic!("expected text fact check");
    };

    assert_eq!(result.truth, TruthLabel::LikelyFalse);
    let models: Vec<_> = result
        .models
        .iter()
        .map(|model| (model.model.as_str(), model.confidence_display(), model.leaning))
        .collect();
    assert_eq!(
        models,
        vec![
            ("Machine Learning", "87.5%".to_string(), Leaning::Fake),
            ("Knowledge Graph", "61.0%".to_string(), Leaning::Real),
            ("AI Prediction", "50.0%".to_string(), Leaning::Fake),
        ]
    );
    assert_eq!(result.entities[0].category, EntityCategory::Organization);
    assert_eq!(result.entities[1].category, EntityCategory::Other);
    assert_eq!(
        result.knowledge_graph.as_deref(),
        Some("data:image/png;base64,iVBORw0KGgo=")
    );
    assert_eq!(result.ai.classification, "Misleading");
    assert_eq!(result.ai.confidence, "72");
    assert!(result.ai.text_classification.is_none());
    let sentiment = result.ai.sentiment.unwrap();
    assert_eq!(sentiment.primary_emotion, "fear");
    assert_eq!(sentiment.tone_formality, "informal");
    assert_eq!(sentiment.tone_style, UNKNOWN);
    assert!(sentiment.bias_indicators.is_empty());
}

#[test]
fn text_fact_check_without_detail_is_unknown() {
    let AnalysisResult::TextFactCheck(result) =
        normalize(b"{}", AnalysisKind::TextFactCheck).unwrap()
    else {
        panic!("expected text fact check");
    };
    assert_eq!(result.truth, TruthLabel::Unknown);
    assert!(result.entities.is_empty());
    assert_eq!(result.knowledge_graph, None);
    assert_eq!(result.ai.classification, UNKNOWN);
    assert!(result.models.iter().all(|model| model.confidence_percent == 0.0));
}

#[test]
fn reverse_search_missing_everything_is_empty() {
    let AnalysisResult::ReverseImageSearch(result) =
        normalize(b"{}", AnalysisKind::ReverseImageSearch).unwrap()
    else {
        panic!("expected reverse search");
    };
    assert_eq!(result.total_matches(), 0);
    assert!(result.pages.is_empty());
    assert!(result.web_entities.is_empty());
    assert!(result.labels.is_empty());
    assert!(result.analysis_sections.is_empty());
}

#[test]
fn reverse_search_applies_fallbacks_and_parses_narrative() {
    let value = json!({
        "pages_with_matching_images": [{"url": "https://a.example/story"}],
        "full_matching_images": [{"url": "https://a.example/1.jpg"}],
        "visually_similar_images": [{"url": "https://b.example/2.jpg"}, {}],
        "web_entities": [{"score": 0.91}, {"description": "Eiffel Tower", "score": 0}],
        "best_guess_labels": ["paris"],
        "analysis": "**Verdict**\nLikely authentic."
    });
    let AnalysisResult::ReverseImageSearch(result) =
        normalize_value(value, AnalysisKind::ReverseImageSearch).unwrap()
    else {
        panic!("expected reverse search");
    };

    assert_eq!(result.total_matches(), 3);
    assert_eq!(result.pages[0].title, UNTITLED_PAGE);
    assert_eq!(result.web_entities[0].description, UNKNOWN);
    assert_eq!(result.web_entities[0].score_display().as_deref(), Some("0.91"));
    assert_eq!(result.web_entities[1].score_display(), None);
    assert_eq!(result.analysis_sections.len(), 1);
    assert_eq!(
        result.analysis_sections[0].heading.as_deref(),
        Some("Verdict")
    );
}

#[test]
fn url_fact_check_flattens_report() {
    let value = json!({
        "status": "success",
        "content": {
            "fact_check_result": {
                "detailed_analysis": {
                    "overall_analysis": {"truth_score": 0.8, "summary": "Mostly accurate"},
                    "claim_analysis": [
                        {"claim": "Rates rose", "verdict": "true"},
                        "Unverified quote"
                    ],
                    "source_analysis": "High"
                }
            },
            "sources": ["https://a.example", {"url": "https://b.example"}, null]
        }
    });
    let AnalysisResult::UrlFactCheck(result) =
        normalize_value(value, AnalysisKind::UrlFactCheck).unwrap()
    else {
        panic!("expected url fact check");
    };

    let overall: Vec<_> = result
        .overall
        .iter()
        .map(|field| (field.label.as_str(), field.value.as_str()))
        .collect();
    assert_eq!(
        overall,
        vec![("Summary", "Mostly accurate"), ("Truth Score", "0.8")]
    );
    assert_eq!(result.claims.len(), 2);
    assert_eq!(result.claims[1][0].value, "Unverified quote");
    assert_eq!(result.source_credibility.len(), 1);
    assert_eq!(result.sources, vec!["https://a.example", "https://b.example"]);
}

#[test]
fn url_fact_check_error_status_is_rejected() {
    let value = json!({"status": "error", "content": "Could not fetch article"});
    let err = normalize_value(value, AnalysisKind::UrlFactCheck).unwrap_err();
    match err {
        NormalizeError::BackendRejected { message, .. } => {
            assert_eq!(message, "Could not fetch article");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn non_object_bodies_are_malformed() {
    for body in [&b"[]"[..], b"\"ok\"", b"42", b"null", b"not json"] {
        let err = normalize(body, AnalysisKind::ReverseImageSearch).unwrap_err();
        assert!(
            matches!(err, NormalizeError::MalformedResponse { .. }),
            "{err:?}"
        );
    }
}

#[test]
fn wrong_field_types_are_malformed() {
    let value = json!({"web_entities": "not a list"});
    let err = normalize_value(value, AnalysisKind::ReverseImageSearch).unwrap_err();
    assert!(matches!(err, NormalizeError::MalformedResponse { .. }));
}

#[test]
fn blank_bold_narrative_keeps_analysis_hidden() {
    let result = normalize_value(
        json!({"analysis": "**\n****\n"}),
        AnalysisKind::ReverseImageSearch,
    )
    .unwrap();
    let AnalysisResult::ReverseImageSearch(search) = &result else {
        panic!("expected reverse search result, got {result:?}");
    };
    assert!(search.analysis_sections.is_empty());
    assert!(
        visible_sections(&result)
            .iter()
            .all(|section| section.id != SectionId::AnalysisNarrative)
    );
}
