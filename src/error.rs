use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A construction call received a degenerate argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A lookup was attempted against a ring with no entries.
    #[error("lookup on an empty ring")]
    EmptyRing,
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
