//! Errors raised while talking to the release server.

/// A fatal failure of one request. Absence on the existence probe is not an
/// error; it is reported as [`super::Existence::Absent`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The base URL or a derived URL could not be parsed.
    #[error("invalid URL {url}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Curl reported an error (DNS, connection, timeout, etc.).
    #[error("request to {url} failed")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The server answered with a status the caller does not accept.
    #[error("{method} {url} returned HTTP {code}")]
    Http {
        method: &'static str,
        url: String,
        code: u32,
    },
    /// Checksum files are plain text; anything else is rejected.
    #[error("response body from {url} is not valid UTF-8")]
    Utf8 {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl FetchError {
    /// HTTP status if the failure was a non-accepted response code.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http { code, .. } => Some(*code),
            _ => None,
        }
    }
}
