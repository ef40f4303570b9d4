use thiserror::Error;

use crate::poster::TransportError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Message could not be encoded; nothing was sent.
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The POST itself failed. Carries the transport's error untouched.
    #[error("webhook request failed: {0}")]
    Transport(#[source] TransportError),

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

impl Error {
    /// Status code observed for [`Error::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus(code) => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn outcome(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize_error",
            Error::Transport(_) => "transport_error",
            Error::UnexpectedStatus(_) => "unexpected_status",
            Error::Build(_) => "build_error",
        }
    }
}
