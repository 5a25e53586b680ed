use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed credentials: {0}")]
    MalformedCredentials(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
