use serde::{Deserialize, Serialize};

/// One titled unit of a free-text analysis narrative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub heading: Option<String>,
    pub content: Vec<String>,
}

impl AnalysisSection {
    pub fn with_heading(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            content: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.content.is_empty()
    }
}
