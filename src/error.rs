use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid input shape: {0}")]
    InvalidInputShape(String),

    #[error("unknown axes setting: `{0}`")]
    UnknownSetting(String),

    #[error("invalid value for axes setting `{key}`: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid layer order: {0}")]
    InvalidPermutation(String),

    #[error("invalid figure configuration: {0}")]
    Configuration(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("rendering backend error: {0}")]
    Backend(String),
}

impl PlotError {
    /// Returns `true` for errors caused by a bad index or index sequence.
    #[must_use]
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::InvalidPermutation(_)
        )
    }
}
