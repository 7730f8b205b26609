use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Text generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScoutError {
    /// Reply text shown to the user when a token or wallet lookup fails.
    /// Upstream failures carry the service's own message; everything else
    /// gets a generic line.
    pub fn user_message(&self, subject: &str) -> String {
        match self {
            ScoutError::Upstream(message) => {
                format!("Failed to scan {}: {}", subject, message)
            }
            _ => format!(
                "An unexpected error occurred while scanning the {}.",
                subject
            ),
        }
    }
}
