use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("malformed event: {0}")]
    MalformedEvent(String),

    #[error("{service} API returned error: {message}")]
    Api {
        service: &'static str,
        message: String,
    },
}

impl Error {
    /// Remote-call failures are recovered by the handler; everything else
    /// aborts the invocation.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    pub fn missing_key(path: &str) -> Self {
        Error::MalformedEvent(format!("missing required key `{}`", path))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
