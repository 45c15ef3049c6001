use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    UserNotFound(u64),
    UnexpectedStatus(u16),
    ReqwestError(reqwest::Error),
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ReqwestError(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UserNotFound(id) => write!(f, "User {} not found", id),
            Error::UnexpectedStatus(status) => write!(f, "Unexpected status code {}", status),
            Error::ReqwestError(e) => write!(f, "{}", e),
        }
    }
}
