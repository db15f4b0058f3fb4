use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("path {0:?} does not start with '/'")]
    NotAbsolute(String),
    #[error("path {0:?} has no page segment")]
    EmptySegment(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page number is empty")]
    Empty,
    #[error("page number {0:?} is not a non-negative integer")]
    NotANumber(String),
    #[error("page number {0:?} is too large")]
    Overflow(String),
}
