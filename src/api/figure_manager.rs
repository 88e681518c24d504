//! Grid of axes on one rendering backend.
//!
//! Surfaces are recreated on every grid change and style switch; layers and
//! settings are carried across through [`AxesState`](super::AxesState).

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::dataset::Dataset;
use crate::core::grid::{AxesPosition, GridCell, columns_for};
use crate::core::style::StyleOptions;
use crate::error::{PlotError, PlotResult};
use crate::render::{AxesSurface, FigureBackend};

use super::{
    AxesId, AxesManager, AxesSettings, AxesSnapshot, AxesState, FigureConfig, FigureSnapshot,
};

type Drawables<B> = Vec<<<B as FigureBackend>::Surface as AxesSurface>::Drawable>;

/// A figure: a grid of axes on one rendering backend plus the current-axes cursor.
///
/// The figure always holds at least one axes. Grid rebuilds and style
/// switches recreate every surface; the axes list is only replaced once all
/// new surfaces exist.
pub struct FigureManager<B: FigureBackend> {
    backend: B,
    config: FigureConfig,
    axes: Vec<AxesManager<B::Surface>>,
    rows: usize,
    current: usize,
    style: Option<String>,
    next_id: u32,
}

impl<B: FigureBackend> FigureManager<B> {
    /// Clears `backend` and creates a single axes filling the figure grid.
    pub fn new(backend: B, config: FigureConfig) -> PlotResult<Self> {
        config.validate()?;
        let style = config.style.clone();
        let mut figure = Self {
            backend,
            config,
            axes: Vec::new(),
            rows: 1,
            current: 0,
            style,
            next_id: 0,
        };
        figure.rebuild_grid(1, 1, true)?;
        Ok(figure)
    }

    /// Rebuilds the grid with exactly `count` axes.
    ///
    /// With `reset == false` the first `count` existing axes keep their layers
    /// and settings; extra slots start empty.
    pub fn set_axes_count(&mut self, count: usize, reset: bool) -> PlotResult<()> {
        if count == 0 || count > self.config.max_axes {
            return Err(PlotError::Configuration(format!(
                "axes count must be in 1..={}, got {count}",
                self.config.max_axes
            )));
        }
        self.rebuild_grid(count, self.rows, reset)
    }

    /// Changes the number of grid rows, keeping the axes count.
    pub fn set_row_count(&mut self, rows: usize, reset: bool) -> PlotResult<()> {
        if rows == 0 || rows > self.config.max_rows {
            return Err(PlotError::Configuration(format!(
                "row count must be in 1..={}, got {rows}",
                self.config.max_rows
            )));
        }
        self.rebuild_grid(self.axes.len(), rows, reset)
    }

    /// Switches the global style and recreates every surface at its
    /// current position with unchanged layers and settings.
    ///
    /// On failure the previous axes are reattached to the backend with the
    /// previous style.
    pub fn set_style(&mut self, name: &str) -> PlotResult<()> {
        let saved: Vec<(AxesPosition, AxesState)> = self
            .axes
            .iter()
            .map(|axes| (axes.position(), axes.state()))
            .collect();

        self.backend.clear();
        let rebuilt = self.recreate_at(saved, name).inspect_err(|err| {
            warn!(error = %err, style = name, "style switch failed");
        });
        let rebuilt = match rebuilt {
            Ok(rebuilt) => rebuilt,
            Err(err) => {
                self.restore_surfaces();
                return Err(err);
            }
        };

        self.axes = rebuilt;
        self.style = Some(name.to_owned());
        debug!(style = name, axes = self.axes.len(), "switch figure style");
        Ok(())
    }

    fn recreate_at(
        &mut self,
        saved: Vec<(AxesPosition, AxesState)>,
        style: &str,
    ) -> PlotResult<Vec<AxesManager<B::Surface>>> {
        let mut rebuilt = Vec::with_capacity(saved.len());
        for (position, state) in saved {
            let surface = self.backend.add_axes_at(position, Some(style))?;
            let id = self.allocate_id();
            rebuilt.push(AxesManager::from_state(id, surface, state)?);
        }
        Ok(rebuilt)
    }

    fn rebuild_grid(&mut self, count: usize, rows: usize, reset: bool) -> PlotResult<()> {
        let cols = columns_for(count, rows);
        let kept: Vec<AxesState> = if reset {
            Vec::new()
        } else {
            self.axes.iter().take(count).map(AxesManager::state).collect()
        };

        self.backend.clear();
        let rebuilt = self
            .create_grid(count, rows, cols, kept)
            .inspect_err(|err| warn!(error = %err, count, rows, "axes grid rebuild failed"));
        let rebuilt = match rebuilt {
            Ok(rebuilt) => rebuilt,
            Err(err) => {
                self.restore_surfaces();
                return Err(err);
            }
        };

        self.axes = rebuilt;
        self.rows = rows;
        debug!(count, rows, cols, reset, "rebuild axes grid");
        Ok(())
    }

    fn create_grid(
        &mut self,
        count: usize,
        rows: usize,
        cols: usize,
        kept: Vec<AxesState>,
    ) -> PlotResult<Vec<AxesManager<B::Surface>>> {
        let mut kept = kept.into_iter();
        let mut rebuilt = Vec::with_capacity(count);
        for index in 0..count {
            let cell = GridCell::new(rows, cols, index)?;
            let surface = self.backend.add_subplot_grid(cell, self.style.as_deref())?;
            let id = self.allocate_id();
            let axes = match kept.next() {
                Some(state) => AxesManager::from_state(id, surface, state)?,
                None => AxesManager::new(id, surface),
            };
            rebuilt.push(axes);
        }
        Ok(rebuilt)
    }

    /// Gives every held axes a fresh surface at its position after a failed
    /// rebuild left the backend cleared. Axes ids are kept.
    fn restore_surfaces(&mut self) {
        self.backend.clear();
        let style = self.style.as_deref();
        for axes in &mut self.axes {
            let restored = self
                .backend
                .add_axes_at(axes.position(), style)
                .and_then(|surface| axes.redefine(axes.id(), surface));
            match restored {
                Ok(restored) => *axes = restored,
                Err(err) => warn!(error = %err, axes = axes.id().raw(), "axes surface not restored"),
            }
        }
    }

    fn allocate_id(&mut self) -> AxesId {
        let id = AxesId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Cursor position; a cursor left out of range by a shrink reads as 0.
    #[must_use]
    pub fn current_axes_index(&self) -> usize {
        if self.current < self.axes.len() {
            self.current
        } else {
            0
        }
    }

    pub fn set_current_axes(&mut self, index: usize) -> PlotResult<()> {
        let len = self.axes.len();
        if index >= len {
            return Err(PlotError::IndexOutOfRange { index, len });
        }
        self.current = index;
        Ok(())
    }

    #[must_use]
    pub fn current_axes(&self) -> &AxesManager<B::Surface> {
        // Invariant: every successful rebuild leaves at least one axes.
        &self.axes[self.current_axes_index()]
    }

    pub fn current_axes_mut(&mut self) -> &mut AxesManager<B::Surface> {
        let index = self.current_axes_index();
        &mut self.axes[index]
    }

    #[must_use]
    pub fn axes_count(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        columns_for(self.axes.len(), self.rows)
    }

    /// Position of `axes` in this figure, by identity.
    pub fn index_of(&self, axes: &AxesManager<B::Surface>) -> PlotResult<usize> {
        self.index_of_id(axes.id())
    }

    pub fn index_of_id(&self, id: AxesId) -> PlotResult<usize> {
        self.axes
            .iter()
            .position(|axes| axes.id() == id)
            .ok_or_else(|| {
                PlotError::NotFound(format!("axes {} does not belong to this figure", id.raw()))
            })
    }

    #[must_use]
    pub fn axes(&self) -> &[AxesManager<B::Surface>] {
        &self.axes
    }

    pub fn axes_at(&self, index: usize) -> PlotResult<&AxesManager<B::Surface>> {
        let len = self.axes.len();
        self.axes
            .get(index)
            .ok_or(PlotError::IndexOutOfRange { index, len })
    }

    pub fn axes_at_mut(&mut self, index: usize) -> PlotResult<&mut AxesManager<B::Surface>> {
        let len = self.axes.len();
        self.axes
            .get_mut(index)
            .ok_or(PlotError::IndexOutOfRange { index, len })
    }

    pub fn format_axes(
        &mut self,
        index: usize,
        reset: bool,
        settings: AxesSettings,
    ) -> PlotResult<()> {
        self.axes_at_mut(index)?.format(reset, settings)
    }

    pub fn set_axes_position(&mut self, index: usize, position: AxesPosition) -> PlotResult<()> {
        self.axes_at_mut(index)?.set_position(position)
    }

    #[must_use]
    pub fn positions(&self) -> Vec<AxesPosition> {
        self.axes.iter().map(AxesManager::position).collect()
    }

    /// Adds `dataset` to the current axes; returns the new layer index.
    pub fn add_dataset(
        &mut self,
        dataset: impl Into<Arc<Dataset>>,
        style: StyleOptions,
    ) -> PlotResult<usize> {
        self.current_axes_mut().add_dataset(dataset, style)
    }

    /// Renders every axes in order; one drawable list per axes.
    pub fn render(&mut self) -> PlotResult<Vec<Drawables<B>>> {
        self.axes.iter_mut().map(AxesManager::render).collect()
    }

    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn snapshot(&self) -> FigureSnapshot {
        FigureSnapshot {
            style: self.style.clone(),
            rows: self.rows,
            columns: self.column_count(),
            current_axes: self.current_axes_index(),
            axes: self.axes.iter().map(AxesSnapshot::from_axes).collect(),
        }
    }
}

impl<B: FigureBackend> fmt::Debug for FigureManager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigureManager")
            .field("config", &self.config)
            .field("axes", &self.axes.len())
            .field("rows", &self.rows)
            .field("current", &self.current)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}
