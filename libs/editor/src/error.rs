use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("prompts are not loaded yet")]
    NotLoaded,
    #[error("failed to fetch prompts: {0}")]
    Fetch(String),
    #[error("failed to save prompts: {0}")]
    Save(String),
}
