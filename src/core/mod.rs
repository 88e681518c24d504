pub mod array;
pub mod classify;
pub mod dataset;
pub mod grid;
pub mod kind;
pub mod limits;
pub mod style;

pub use array::{IntoPlotArray, IntoPlotArrays, PlotArray, is_equidistant, is_increasing};
pub use classify::{RankedKind, classify, pick_most_likely, rank_kinds};
pub use dataset::{Dataset, VALUE_TYPE_KEY};
pub use grid::{AxesPosition, GridCell, GridLayout, columns_for};
pub use kind::{CATALOGUE, DatasetKind, DrawPrimitive, KindDescriptor};
pub use limits::{AxisRange, AxisUnit, LimitOptions};
pub use style::{StyleField, StyleFieldKind, StyleOptions, StyleValue, merge_over_defaults};
