//! Turning backend responses into something a front end can show.
//!
//! - [`normalize`] applies every fallback and yields an [`AnalysisResult`]
//! - [`narrative`] splits the reverse-search narrative into sections
//! - [`view`] lays a result out as ordered, visibility-flagged sections
//!
//! [`AnalysisResult`]: matrix_model::AnalysisResult

pub mod entity;
pub mod error;
pub mod narrative;
pub mod normalize;
pub mod view;

pub use entity::entity_category;
pub use error::{NormalizeError, Result};
pub use narrative::{SECTION_GLYPHS, parse_analysis_text};
pub use normalize::{normalize, normalize_value};
pub use view::{SectionBody, SectionId, ViewSection, compose, visible_sections};
