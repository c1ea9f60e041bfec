use matrix_analysis::{compose, normalize_value, parse_analysis_text};
use matrix_model::AnalysisKind;
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Lines mixing headings, content and blanks in the shapes the backend emits.
fn narrative_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ,.]{0,24}",
        "\\*\\*[a-zA-Z ]{0,12}\\*\\*",
        "(🔍|✅|⚠️|📄|🔎|🏷️) [a-zA-Z ]{0,12}",
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

proptest! {
    #[test]
    fn parser_never_emits_empty_sections(lines in prop::collection::vec(narrative_line(), 0..20)) {
        let text = lines.join("\n");
        for section in parse_analysis_text(&text) {
            prop_assert!(!section.is_empty());
            prop_assert!(section.heading.as_deref().is_none_or(|heading| !heading.trim().is_empty()));
            prop_assert!(section.heading.is_some() || !section.content.is_empty());
            prop_assert!(section.content.iter().all(|line| !line.trim().is_empty()));
        }
    }

    #[test]
    fn parser_accepts_arbitrary_text(text in ".*") {
        let _ = parse_analysis_text(&text);
    }

    #[test]
    fn parser_is_line_ending_agnostic(lines in prop::collection::vec(narrative_line(), 0..12)) {
        let unix = parse_analysis_text(&lines.join("\n"));
        let windows = parse_analysis_text(&lines.join("\r\n"));
        prop_assert_eq!(unix, windows);
    }

    /// Any subset of unrelated keys still normalizes to a displayable result.
    #[test]
    fn unknown_keys_normalize_for_every_kind(keys in prop::collection::vec("[a-z_]{1,10}", 0..6)) {
        let mut object = Map::new();
        for key in keys {
            object.insert(format!("x_{key}"), Value::from(1));
        }
        for kind in AnalysisKind::ALL {
            let result = normalize_value(Value::Object(object.clone()), kind);
            prop_assert!(result.is_ok(), "{kind}: {result:?}");
            if let Ok(result) = result {
                prop_assert!(!compose(&result).is_empty());
            }
        }
    }
}
