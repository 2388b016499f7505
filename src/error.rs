use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid filter specification: {0}")]
    InvalidFilterSpec(String),

    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngError>;
