//! Data model for the Matrix verification client.
//!
//! Raw backend payloads live in [`raw`]; the normalized, display-ready
//! shapes live in [`result`]. Everything here is plain data.

pub mod error;
pub mod game;
pub mod kind;
pub mod raw;
pub mod result;
pub mod section;
pub mod state;

pub use error::{ModelError, Result};
pub use game::{ANONYMOUS_USER, GameAnswer, GameItem, GameItemKind, GamePair, Vote};
pub use kind::{AnalysisKind, InputKind};
pub use result::{
    AiAnalysis, AnalysisResult, DeepfakeResult, DetectorSignals, Entity, EntityCategory,
    EntityRecognition, FactChecking, Field, FrameStats, Leaning, ModelScore, NarrativeContext,
    PageMatch, ReverseSearchResult, Sentiment, Symmetry, TextClassification, TextFactCheckResult,
    TruthLabel, UNKNOWN, UNTITLED_PAGE, UrlFactCheckResult, Verdict, WebEntity,
};
pub use section::AnalysisSection;
pub use state::{PreviewHandle, RequestState, SubmissionToken};
