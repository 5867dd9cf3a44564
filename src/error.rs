use thiserror::Error;

/// Errors raised by the plot engine.
///
/// Structural errors (`InvalidArgument`, `InvalidMapping`) come back from the
/// mutating call that caused them and leave every registry untouched.
/// `InvalidCategory` is raised by a single coordinate lookup; the render loop
/// turns it into a skipped item.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid dataset-to-axis mapping: {0}")]
    InvalidMapping(String),
    #[error("Category '{0}' is not on this axis")]
    InvalidCategory(String),
    #[error("Failed to parse plot configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;

impl PlotError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_mapping(msg: impl Into<String>) -> Self {
        Self::InvalidMapping(msg.into())
    }
}
