//! Parser for the free-text analysis narrative.
//!
//! The reverse-image-search backend returns its verdict as a loosely
//! structured string. Two conventions start a new section:
//!
//! - a line starting with one of [`SECTION_GLYPHS`]; the whole line is the heading
//! - a line wrapped in `**`; the heading is the line with every `**` removed,
//!   or no heading at all when nothing but whitespace remains
//!
//! Every other non-blank line is content of the current section. Content
//! before the first heading forms a headless section.

use matrix_model::AnalysisSection;

/// Leading glyphs that mark a section heading.
pub const SECTION_GLYPHS: [&str; 6] = ["🔍", "✅", "⚠️", "📄", "🔎", "🏷️"];

const BOLD_MARKER: &str = "**";

/// Classification of a single narrative line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Heading(Option<String>),
    Content(&'a str),
    Blank,
}

fn classify(line: &str) -> Line<'_> {
    if SECTION_GLYPHS.iter().any(|glyph| line.starts_with(glyph)) {
        Line::Heading(Some(line.to_string()))
    } else if line.starts_with(BOLD_MARKER) && line.ends_with(BOLD_MARKER) {
        let heading = line.replace(BOLD_MARKER, "");
        Line::Heading(Some(heading).filter(|heading| !heading.trim().is_empty()))
    } else if line.trim().is_empty() {
        Line::Blank
    } else {
        Line::Content(line)
    }
}

/// Parse a narrative into ordered sections.
///
/// A heading that is immediately followed by another heading carries no
/// content and is dropped; only the final section may be heading-only.
/// An empty input yields no sections.
pub fn parse_analysis_text(text: &str) -> Vec<AnalysisSection> {
    let mut sections = Vec::new();
    let mut current = AnalysisSection::default();

    for line in text.lines() {
        match classify(line) {
            Line::Heading(heading) => {
                let next = heading.map_or_else(AnalysisSection::default, AnalysisSection::with_heading);
                let finished = std::mem::replace(&mut current, next);
                if !finished.content.is_empty() {
                    sections.push(finished);
                }
            }
            Line::Content(content) => current.content.push(content.to_string()),
            Line::Blank => {}
        }
    }

    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(heading: Option<&str>, content: &[&str]) -> AnalysisSection {
        AnalysisSection {
            heading: heading.map(str::to_string),
            content: content.iter().map(|line| (*line).to_string()).collect(),
        }
    }

    #[test]
    fn empty_input_yields_no_sections() {
        assert!(parse_analysis_text("").is_empty());
        assert!(parse_analysis_text("\n\n   \n").is_empty());
    }

    #[test]
    fn bold_heading_is_stripped() {
        assert_eq!(
            parse_analysis_text("**Header**\nline1\nline2"),
            vec![section(Some("Header"), &["line1", "line2"])]
        );
    }

    #[test]
    fn glyph_heading_is_kept_verbatim() {
        let sections = parse_analysis_text("🔍 Search Summary\nFound 3 pages\n\n✅ Verdict\nLikely original");
        assert_eq!(
            sections,
            vec![
                section(Some("🔍 Search Summary"), &["Found 3 pages"]),
                section(Some("✅ Verdict"), &["Likely original"]),
            ]
        );
    }

    #[test]
    fn leading_content_forms_headless_section() {
        let sections = parse_analysis_text("intro line\n**Details**\nmore");
        assert_eq!(
            sections,
            vec![section(None, &["intro line"]), section(Some("Details"), &["more"])]
        );
    }

    #[test]
    fn heading_without_content_is_dropped_unless_last() {
        let sections = parse_analysis_text("**First**\n**Second**\nbody\n**Trailing**");
        assert_eq!(
            sections,
            vec![section(Some("Second"), &["body"]), section(Some("Trailing"), &[])]
        );
    }

    #[test]
    fn content_lines_keep_their_indentation() {
        let sections = parse_analysis_text("**List**\n  - first\n\t- second");
        assert_eq!(sections[0].content, vec!["  - first", "\t- second"]);
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let sections = parse_analysis_text("**Header**\r\nline1\r\n");
        assert_eq!(sections, vec![section(Some("Header"), &["line1"])]);
    }

    #[test]
    fn bare_bold_markers_carry_no_heading() {
        assert!(parse_analysis_text("**").is_empty());
        assert!(parse_analysis_text("****").is_empty());
        assert!(parse_analysis_text("**Header**\n**").is_empty());
        assert!(parse_analysis_text("**  **").is_empty());
    }

    #[test]
    fn bare_bold_markers_still_break_sections() {
        let sections = parse_analysis_text("**Header**\nline1\n**\nline2");
        assert_eq!(
            sections,
            vec![section(Some("Header"), &["line1"]), section(None, &["line2"])]
        );
    }

    #[test]
    fn warning_glyph_starts_section() {
        let sections = parse_analysis_text("⚠️ Edited\nCropped copy found");
        assert_eq!(sections[0].heading.as_deref(), Some("⚠️ Edited"));
    }
}
