use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GazerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GazerError>;

/// User-facing classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    RateLimited,
    InvalidInput,
    Unknown,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "User or repository not found.",
            ErrorKind::RateLimited => "API rate limit exceeded. Please try again later.",
            ErrorKind::InvalidInput => {
                "Invalid input. Use 'username', 'username/repo', or a full URL."
            }
            ErrorKind::Unknown => "An error occurred while fetching data.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl GazerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GazerError::NotFound(_) => ErrorKind::NotFound,
            GazerError::RateLimited(_) => ErrorKind::RateLimited,
            GazerError::Api(_) | GazerError::Http(_) | GazerError::Io(_) | GazerError::Config(_) => {
                ErrorKind::Unknown
            }
        }
    }
}
