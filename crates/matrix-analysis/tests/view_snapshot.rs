use matrix_analysis::{normalize_value, visible_sections};
use matrix_model::AnalysisKind;
use serde_json::json;

#[test]
fn empty_reverse_search_view_snapshot() {
    let result = normalize_value(json!({}), AnalysisKind::ReverseImageSearch).unwrap();
    insta::assert_json_snapshot!(visible_sections(&result), @r#"
    [
      {
        "id": "match_summary",
        "title": "Search Summary",
        "visible": true,
        "body": {
          "kind": "fields",
          "data": [
            {
              "label": "Full Matches",
              "value": "0"
            },
            {
              "label": "Partial Matches",
              "value": "0"
            },
            {
              "label": "Similar Images",
              "value": "0"
            },
            {
              "label": "Matching Pages",
              "value": "0"
            },
            {
              "label": "Total Matches",
              "value": "0"
            }
          ]
        }
      },
      {
        "id": "no_results",
        "title": "No Results",
        "visible": true,
        "body": {
          "kind": "text",
          "data": "No matching images were found."
        }
      }
    ]
    "#);
}

#[test]
fn deepfake_video_view_snapshot() {
    let value = json!({
        "Final Prediction": "Fake",
        "Confidence Score": 0.25,
        "Fake Percentage": 75.0,
        "Real Frames": 5,
        "Fake Frames": 15,
        "Total Frames Analyzed": 20
    });
    let result = normalize_value(value, AnalysisKind::DeepfakeVideo).unwrap();
    insta::assert_json_snapshot!(visible_sections(&result), @r#"
    [
      {
        "id": "verdict_badges",
        "title": "Analysis Results",
        "visible": true,
        "body": {
          "kind": "fields",
          "data": [
            {
              "label": "Final Prediction",
              "value": "Fake"
            },
            {
              "label": "Confidence Verdict",
              "value": "Fake"
            },
            {
              "label": "Confidence Score",
              "value": "25.0%"
            }
          ]
        }
      },
      {
        "id": "frame_statistics",
        "title": "Frame Statistics",
        "visible": true,
        "body": {
          "kind": "fields",
          "data": [
            {
              "label": "Total Frames Analyzed",
              "value": "20"
            },
            {
              "label": "Fake Percentage",
              "value": "75"
            },
            {
              "label": "Real Frames",
              "value": "5"
            },
            {
              "label": "Fake Frames",
              "value": "15"
            }
          ]
        }
      },
      {
        "id": "final_verdict",
        "title": "Final Verdict",
        "visible": true,
        "body": {
          "kind": "text",
          "data": "This video is fake"
        }
      }
    ]
    "#);
}

#[test]
fn text_fact_check_section_order_snapshot() {
    let value = json!({
        "detailed_analysis": {
            "is_fake": false,
            "gemini_analysis": {"fact_checking": {"fact_check_score": 8}}
        }
    });
    let result = normalize_value(value, AnalysisKind::TextFactCheck).unwrap();
    let titles: Vec<String> = visible_sections(&result)
        .into_iter()
        .map(|section| section.title)
        .collect();
    insta::assert_json_snapshot!(titles, @r#"
    [
      "Truth Score",
      "Model Confidence",
      "AI Analysis",
      "Fact Checking"
    ]
    "#);
}
