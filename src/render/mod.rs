//! Boundary to the drawing library.
//!
//! [`FigureBackend`] creates axes surfaces; [`AxesSurface`] takes settings
//! and one draw call per dataset primitive. [`NullFigure`] is the headless
//! implementation.

mod null_renderer;
mod primitives;

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

pub use null_renderer::{DrawCall, NullDrawable, NullFigure, NullSurface, NULL_STYLES};
pub use primitives::Color;

use crate::api::{AxesProperty, SettingValue};
use crate::core::grid::{AxesPosition, GridCell};
use crate::core::style::{StyleOptions, StyleValue};
use crate::error::{PlotError, PlotResult};

/// Which visual channel the value array of a value scatter drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueChannel {
    #[default]
    Color,
    Size,
}

impl ValueChannel {
    /// Parses the `"c"` / `"s"` style codes.
    pub fn from_style(value: &StyleValue) -> PlotResult<Self> {
        match value.as_text() {
            Some("c") => Ok(Self::Color),
            Some("s") => Ok(Self::Size),
            _ => Err(PlotError::InvalidData(format!(
                "value channel must be \"c\" or \"s\", got {value:?}"
            ))),
        }
    }
}

/// One plotting region provided by a rendering backend.
///
/// Draw methods receive borrowed array views plus fully merged style options
/// and return a backend handle for the painted artist.
pub trait AxesSurface {
    type Drawable;

    fn position(&self) -> AxesPosition;
    fn set_position(&mut self, position: AxesPosition) -> PlotResult<()>;

    /// Removes every painted artist and resets applied settings.
    fn clear(&mut self);
    fn reset_color_cycle(&mut self);

    fn apply_setting(&mut self, property: AxesProperty, value: &SettingValue) -> PlotResult<()>;

    fn draw_line(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable>;

    fn draw_scatter(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable>;

    fn draw_value_scatter(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        values: ArrayView1<'_, f64>,
        channel: ValueChannel,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable>;

    /// `z` is shaped `(len(y), len(x))`.
    fn draw_mesh(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        z: ArrayView2<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable>;

    fn draw_irregular_mesh(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        z: ArrayView2<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable>;

    fn draw_quiver(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        u: ArrayView2<'_, f64>,
        v: ArrayView2<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable>;
}

/// Figure-level capability of a rendering backend.
///
/// The global visual style is passed explicitly whenever a surface is
/// created; backends must not keep an implicit current style.
pub trait FigureBackend {
    type Surface: AxesSurface;

    /// Drops every surface previously created on the figure.
    fn clear(&mut self);

    fn add_subplot_grid(&mut self, cell: GridCell, style: Option<&str>)
    -> PlotResult<Self::Surface>;

    fn add_axes_at(
        &mut self,
        position: AxesPosition,
        style: Option<&str>,
    ) -> PlotResult<Self::Surface>;
}
