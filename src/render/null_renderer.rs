use indexmap::IndexMap;
use ndarray::{ArrayView1, ArrayView2};

use crate::api::{AxesProperty, SettingValue};
use crate::core::grid::{AxesPosition, GridCell, GridLayout};
use crate::core::kind::DrawPrimitive;
use crate::core::style::StyleOptions;
use crate::error::{PlotError, PlotResult};
use crate::render::{AxesSurface, FigureBackend, ValueChannel};

/// Style names the headless backend accepts.
pub const NULL_STYLES: &[&str] = &[
    "default",
    "classic",
    "bmh",
    "dark_background",
    "fast",
    "ggplot",
    "grayscale",
    "seaborn-v0_8",
    "Solarize_Light2",
];

/// Headless figure used by tests and non-interactive usage.
///
/// It validates style names and geometry the way a real backend would, so
/// tests catch bad input before a drawing library is involved.
#[derive(Debug, Default)]
pub struct NullFigure {
    layout: GridLayout,
    clear_count: usize,
    live_surfaces: usize,
    surface_limit: Option<usize>,
}

impl NullFigure {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails surface creation once `limit` surfaces exist on the figure.
    #[must_use]
    pub fn with_surface_limit(mut self, limit: usize) -> Self {
        self.surface_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    #[must_use]
    pub fn live_surfaces(&self) -> usize {
        self.live_surfaces
    }

    fn create_surface(
        &mut self,
        position: AxesPosition,
        cell: Option<GridCell>,
        style: Option<&str>,
    ) -> PlotResult<NullSurface> {
        if let Some(name) = style.filter(|name| !NULL_STYLES.contains(name)) {
            return Err(PlotError::Backend(format!("unknown style `{name}`")));
        }
        if self
            .surface_limit
            .is_some_and(|limit| self.live_surfaces >= limit)
        {
            return Err(PlotError::Backend(format!(
                "figure cannot hold more than {} axes",
                self.live_surfaces
            )));
        }
        position.validate()?;
        self.live_surfaces += 1;
        Ok(NullSurface {
            position,
            cell,
            style: style.map(str::to_owned),
            ..NullSurface::default()
        })
    }
}

impl FigureBackend for NullFigure {
    type Surface = NullSurface;

    fn clear(&mut self) {
        self.clear_count += 1;
        self.live_surfaces = 0;
    }

    fn add_subplot_grid(
        &mut self,
        cell: GridCell,
        style: Option<&str>,
    ) -> PlotResult<Self::Surface> {
        let position = self.layout.cell_position(cell);
        self.create_surface(position, Some(cell), style)
    }

    fn add_axes_at(
        &mut self,
        position: AxesPosition,
        style: Option<&str>,
    ) -> PlotResult<Self::Surface> {
        self.create_surface(position, None, style)
    }
}

/// One recorded draw call of a [`NullSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub primitive: DrawPrimitive,
    pub points: usize,
    pub channel: Option<ValueChannel>,
    pub style: StyleOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullDrawable {
    pub index: usize,
    pub primitive: DrawPrimitive,
}

/// Recording axes surface of [`NullFigure`].
#[derive(Debug, Clone, PartialEq)]
pub struct NullSurface {
    position: AxesPosition,
    cell: Option<GridCell>,
    style: Option<String>,
    settings: IndexMap<AxesProperty, SettingValue>,
    draws: Vec<DrawCall>,
    clear_count: usize,
    color_cycle_resets: usize,
}

impl Default for NullSurface {
    fn default() -> Self {
        Self {
            position: AxesPosition::full(),
            cell: None,
            style: None,
            settings: IndexMap::new(),
            draws: Vec::new(),
            clear_count: 0,
            color_cycle_resets: 0,
        }
    }
}

impl NullSurface {
    #[must_use]
    pub fn cell(&self) -> Option<GridCell> {
        self.cell
    }

    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Settings applied since the last clear.
    #[must_use]
    pub fn settings(&self) -> &IndexMap<AxesProperty, SettingValue> {
        &self.settings
    }

    /// Draw calls made since the last clear.
    #[must_use]
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    #[must_use]
    pub fn color_cycle_resets(&self) -> usize {
        self.color_cycle_resets
    }

    fn record(
        &mut self,
        primitive: DrawPrimitive,
        points: usize,
        channel: Option<ValueChannel>,
        style: &StyleOptions,
    ) -> NullDrawable {
        let index = self.draws.len();
        self.draws.push(DrawCall {
            primitive,
            points,
            channel,
            style: style.clone(),
        });
        NullDrawable { index, primitive }
    }
}

fn check_same_len(what: &str, lengths: &[usize]) -> PlotResult<()> {
    if lengths.windows(2).any(|pair| pair[0] != pair[1]) {
        return Err(PlotError::InvalidInputShape(format!(
            "{what} inputs have mismatched lengths {lengths:?}"
        )));
    }
    Ok(())
}

fn check_field(what: &str, field: ArrayView2<'_, f64>, rows: usize, cols: usize) -> PlotResult<()> {
    if field.dim() != (rows, cols) {
        return Err(PlotError::InvalidInputShape(format!(
            "{what} field has shape {:?}, expected ({rows}, {cols})",
            field.dim()
        )));
    }
    Ok(())
}

impl AxesSurface for NullSurface {
    type Drawable = NullDrawable;

    fn position(&self) -> AxesPosition {
        self.position
    }

    fn set_position(&mut self, position: AxesPosition) -> PlotResult<()> {
        position.validate()?;
        self.position = position;
        Ok(())
    }

    fn clear(&mut self) {
        self.settings.clear();
        self.draws.clear();
        self.clear_count += 1;
    }

    fn reset_color_cycle(&mut self) {
        self.color_cycle_resets += 1;
    }

    fn apply_setting(&mut self, property: AxesProperty, value: &SettingValue) -> PlotResult<()> {
        property.validate(value)?;
        self.settings.insert(property, value.clone());
        Ok(())
    }

    fn draw_line(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable> {
        check_same_len("line", &[x.len(), y.len()])?;
        Ok(self.record(DrawPrimitive::Line, x.len(), None, style))
    }

    fn draw_scatter(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable> {
        check_same_len("scatter", &[x.len(), y.len()])?;
        Ok(self.record(DrawPrimitive::Scatter, x.len(), None, style))
    }

    fn draw_value_scatter(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        values: ArrayView1<'_, f64>,
        channel: ValueChannel,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable> {
        check_same_len("value scatter", &[x.len(), y.len(), values.len()])?;
        Ok(self.record(DrawPrimitive::ValueScatter, x.len(), Some(channel), style))
    }

    fn draw_mesh(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        z: ArrayView2<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable> {
        check_field("mesh", z, y.len(), x.len())?;
        Ok(self.record(DrawPrimitive::Mesh, z.len(), None, style))
    }

    fn draw_irregular_mesh(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        z: ArrayView2<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable> {
        let (rows, cols) = z.dim();
        check_field("irregular mesh x", x, rows, cols)?;
        check_field("irregular mesh y", y, rows, cols)?;
        Ok(self.record(DrawPrimitive::IrregularMesh, z.len(), None, style))
    }

    fn draw_quiver(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        u: ArrayView2<'_, f64>,
        v: ArrayView2<'_, f64>,
        style: &StyleOptions,
    ) -> PlotResult<Self::Drawable> {
        check_field("quiver U", u, y.len(), x.len())?;
        check_field("quiver V", v, y.len(), x.len())?;
        Ok(self.record(DrawPrimitive::Quiver, u.len(), None, style))
    }
}
