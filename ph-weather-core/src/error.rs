use thiserror::Error;

/// Failures of a single lookup. None of them touch the cached directory.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Only ever reported as degraded status; the loader recovers with the
    /// embedded list.
    #[error("Place directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("City not found in the Philippines. Please check the spelling. (\"{0}\")")]
    PlaceNotFound(String),

    #[error("Failed to fetch weather data: {0}")]
    WeatherFetchFailed(String),

    #[error("Please enter a city name")]
    EmptyQuery,
}

/// Why the remote directory could not be used.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("source answered with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("malformed directory payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("directory source returned no usable places")]
    Empty,
}

impl From<DirectoryError> for LookupError {
    fn from(err: DirectoryError) -> Self {
        LookupError::DirectoryUnavailable(err.to_string())
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
