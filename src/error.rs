use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Unknown hall: {0}")]
    UnknownHall(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed ({status}) for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, MenuError>;
