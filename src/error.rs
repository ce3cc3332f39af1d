// Error taxonomy shared by config, api and the front end.

use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can abort a single Graph API call.
///
/// None of these are recovered locally: the front end reports them and the
/// process exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or empty access token, or an unusable API base URL.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A request could not be built from the given arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The API answered with a non-2xx status.
    #[error("Graph API request failed with status {status}: {body}")]
    Http { status: StatusCode, body: String },
    /// Timeout, connection or TLS failure.
    #[error("network error")]
    Network(#[source] reqwest::Error),
    #[error("response body is not valid JSON")]
    Decode(#[source] serde_json::Error),
    #[error("HTTP client build error")]
    HttpClient(#[source] reqwest::Error),
}

impl Error {
    /// Returns the HTTP status for `Error::Http`.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn wrapped_errors_leave_details_to_the_source_chain() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let detail = json_err.to_string();
        let err = Error::Decode(json_err);

        assert_eq!(err.to_string(), "response body is not valid JSON");
        let source = err.source().expect("decode error keeps its source");
        assert_eq!(source.to_string(), detail);

        let chain = format!("{:?}", anyhow::Error::new(err));
        assert_eq!(chain.matches(&detail).count(), 1, "{chain}");
    }
}
