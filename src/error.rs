use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Holiday source failure. The provider absorbs these; they never reach
    /// the calculator.
    #[error("Upstream data unavailable: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Upstream(format!("request timed out: {err}"))
        } else if err.is_decode() {
            Error::Upstream(format!("malformed payload: {err}"))
        } else {
            Error::Upstream(format!("request failed: {err}"))
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
