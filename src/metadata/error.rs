//! Errors raised while talking to a metadata provider.

use std::fmt;

/// Stage of a lookup that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupPhase {
    Search,
    Credits,
    Details,
}

impl fmt::Display for LookupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Credits => write!(f, "credits"),
            Self::Details => write!(f, "details"),
        }
    }
}

/// Failure of a single provider call.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider rejected the request for exceeding its rate limit.
    #[error("rate limited by provider")]
    RateLimited,

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl LookupError {
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }
}
