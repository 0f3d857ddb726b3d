use thiserror::Error;

#[derive(Error, Debug)]
pub enum TmyError {
    #[error("error parsing document: {0}")]
    Document(String),
    #[error("no content in the TMY document")]
    NoContent,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<serde_json::Error> for TmyError {
    fn from(e: serde_json::Error) -> Self {
        TmyError::Document(e.to_string())
    }
}
