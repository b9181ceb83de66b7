use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[cfg(feature = "fetch")]
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[cfg(feature = "fetch")]
    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("missing form field `{0}`")]
    MissingField(String),
}
