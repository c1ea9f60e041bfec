//! Analysis requests as sent to the backend.

use std::fmt;

use matrix_model::AnalysisKind;

/// What is uploaded with a request.
#[derive(Clone, PartialEq, Eq)]
pub enum Payload {
    /// Sent as the multipart `file` field.
    File {
        name: String,
        media_type: String,
        bytes: Vec<u8>,
    },
    /// Sent as JSON: `{"text": ..}` or `{"url": ..}` depending on the kind.
    Text(String),
}

impl Payload {
    pub fn is_file(&self) -> bool {
        matches!(self, Payload::File { .. })
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        match self {
            Payload::File { bytes, .. } => bytes.len(),
            Payload::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// File bytes and user text stay out of logs.
impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::File {
                name, media_type, ..
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("media_type", media_type)
                .field("len", &self.len())
                .finish(),
            Payload::Text(_) => f.debug_struct("Text").field("len", &self.len()).finish(),
        }
    }
}

/// One analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub kind: AnalysisKind,
    pub payload: Payload,
}

impl AnalysisRequest {
    pub fn file(
        kind: AnalysisKind,
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            kind,
            payload: Payload::File {
                name: name.into(),
                media_type: media_type.into(),
                bytes,
            },
        }
    }

    pub fn text(kind: AnalysisKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            payload: Payload::Text(text.into()),
        }
    }

    /// JSON body for text kinds.
    pub(crate) fn json_body(&self, text: &str) -> serde_json::Value {
        match self.kind {
            AnalysisKind::UrlFactCheck => serde_json::json!({ "url": text }),
            _ => serde_json::json!({ "text": text }),
        }
    }
}
