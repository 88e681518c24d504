//! Figure-level limits and the initial style.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

pub const DEFAULT_MAX_AXES: usize = 20;
pub const DEFAULT_MAX_ROWS: usize = 10;

/// Figure bootstrap configuration.
///
/// Serializable so host applications can persist figure setup next to their
/// own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "default_max_axes")]
    pub max_axes: usize,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Global style for every surface; `None` keeps the backend default.
    #[serde(default)]
    pub style: Option<String>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            max_axes: default_max_axes(),
            max_rows: default_max_rows(),
            style: None,
        }
    }
}

impl FigureConfig {
    #[must_use]
    pub fn with_max_axes(mut self, max_axes: usize) -> Self {
        self.max_axes = max_axes;
        self
    }

    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.max_axes == 0 {
            return Err(PlotError::Configuration(
                "max_axes must be at least 1".to_owned(),
            ));
        }
        if self.max_rows == 0 {
            return Err(PlotError::Configuration(
                "max_rows must be at least 1".to_owned(),
            ));
        }
        if self
            .style
            .as_deref()
            .is_some_and(|style| style.trim().is_empty())
        {
            return Err(PlotError::Configuration(
                "style name must not be blank".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_max_axes() -> usize {
    DEFAULT_MAX_AXES
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}
