//! "Spot the fake" game exchanges.

use serde::{Deserialize, Serialize};

/// Identity used when no user is signed in.
pub const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameItemKind {
    Article,
    Image,
    Audio,
}

/// One candidate of a pair. The backend strips `is_fake` and `explanation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GameItemKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePair {
    pub id: String,
    #[serde(default)]
    pub items: Vec<GameItem>,
}

/// Body of `POST /api/spot-game/vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub pair_id: String,
    pub choice: usize,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAnswer {
    #[serde(default)]
    pub id: Option<String>,
    /// Index of the fake item; `None` if the pair has no fake.
    #[serde(default)]
    pub answer_index: Option<usize>,
    #[serde(default)]
    pub explanations: Vec<String>,
}

impl GameAnswer {
    pub fn is_fake(&self, index: usize) -> bool {
        self.answer_index == Some(index)
    }

    pub fn explanation(&self, index: usize) -> &str {
        self.explanations.get(index).map_or("", String::as_str)
    }

    /// Returns true if `choice` picked the fake item.
    pub fn is_correct(&self, choice: usize) -> bool {
        self.is_fake(choice)
    }
}
