//! easyplot: dataset classification and figure/axes/layer management for
//! interactive plotting front-ends.
//!
//! Raw arrays are classified into a fixed catalogue of dataset kinds, bound
//! to style options as layers, and painted onto axes surfaces provided by a
//! pluggable rendering backend.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{AxesManager, AxesSettings, FigureConfig, FigureManager, LayerCollection};
pub use core::{Dataset, DatasetKind, classify};
pub use error::{PlotError, PlotResult};
