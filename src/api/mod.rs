//! Managers exposed to the UI layer.

mod axes_manager;
mod axes_settings;
mod figure_config;
mod figure_manager;
mod figure_snapshot;
mod layer_collection;

pub use axes_manager::{AxesId, AxesManager, AxesState};
pub use axes_settings::{AspectMode, AxesProperty, AxesSettings, AxisScale, SettingValue};
pub use figure_config::{DEFAULT_MAX_AXES, DEFAULT_MAX_ROWS, FigureConfig};
pub use figure_manager::FigureManager;
pub use figure_snapshot::{
    AxesSnapshot, FIGURE_SNAPSHOT_JSON_SCHEMA_V1, FigureSnapshot, FigureSnapshotJsonContractV1,
    LayerSnapshot,
};
pub use layer_collection::{Layer, LayerCollection};
