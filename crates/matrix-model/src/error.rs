use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown input kind: {0}")]
    UnknownInputKind(String),
    #[error("unknown analysis kind: {0}")]
    UnknownAnalysisKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
