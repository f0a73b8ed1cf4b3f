use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("signer error: {0}")]
    Signer(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("submission rejected: {0}")]
    Submission(String),

    #[error("no response within {0}ms")]
    Timeout(u64),

    #[error("connection closed before a response arrived")]
    Closed,
}

impl From<serde_json::Error> for ConnectorError {
    fn from(e: serde_json::Error) -> Self {
        ConnectorError::Parse(e.to_string())
    }
}
