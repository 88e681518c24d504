//! One axes: a surface, its layers and persistent settings.
//!
//! [`AxesState`] is everything needed to rebuild an axes on a new surface,
//! which figure grid rebuilds and style switches rely on.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::dataset::Dataset;
use crate::core::grid::AxesPosition;
use crate::core::limits::AxisRange;
use crate::core::style::StyleOptions;
use crate::error::PlotResult;
use crate::render::AxesSurface;

use super::{AxesProperty, AxesSettings, LayerCollection, SettingValue};

/// Identity of one axes surface; a recreated surface gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxesId(u32);

impl AxesId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Everything needed to rebuild an axes on a fresh surface.
///
/// Layers share their datasets, so cloning a state never copies arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxesState {
    pub layers: LayerCollection,
    pub settings: AxesSettings,
}

/// One axes: a backend surface plus its layers and persistent settings.
#[derive(Debug)]
pub struct AxesManager<S: AxesSurface> {
    id: AxesId,
    surface: S,
    layers: LayerCollection,
    settings: AxesSettings,
}

impl<S: AxesSurface> AxesManager<S> {
    #[must_use]
    pub fn new(id: AxesId, surface: S) -> Self {
        Self {
            id,
            surface,
            layers: LayerCollection::new(),
            settings: AxesSettings::new(),
        }
    }

    /// Rebuilds an axes on `surface` and applies the stored settings to it.
    pub fn from_state(id: AxesId, surface: S, state: AxesState) -> PlotResult<Self> {
        let mut manager = Self {
            id,
            surface,
            layers: state.layers,
            settings: state.settings,
        };
        manager.apply_settings()?;
        trace!(
            axes = id.raw(),
            layers = manager.layers.len(),
            settings = manager.settings.len(),
            "restore axes state"
        );
        Ok(manager)
    }

    /// Equivalent manager bound to a new surface.
    pub fn redefine(&self, id: AxesId, surface: S) -> PlotResult<Self> {
        Self::from_state(id, surface, self.state())
    }

    #[must_use]
    pub fn state(&self) -> AxesState {
        AxesState {
            layers: self.layers.clone(),
            settings: self.settings.clone(),
        }
    }

    #[must_use]
    pub fn into_state(self) -> AxesState {
        AxesState {
            layers: self.layers,
            settings: self.settings,
        }
    }

    #[must_use]
    pub fn id(&self) -> AxesId {
        self.id
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerCollection {
        &mut self.layers
    }

    #[must_use]
    pub fn settings(&self) -> &AxesSettings {
        &self.settings
    }

    /// Merges (or with `reset`, replaces) the persistent settings, then
    /// applies all of them to the surface.
    ///
    /// Every value is checked before the stored settings change.
    pub fn format(&mut self, reset: bool, settings: AxesSettings) -> PlotResult<()> {
        settings.validate()?;
        if reset {
            self.settings = settings;
        } else {
            self.settings.merge(&settings);
        }
        debug!(axes = self.id.raw(), reset, count = self.settings.len(), "format axes");
        self.apply_settings()
    }

    /// [`AxesManager::format`] with string keys; an unknown key fails the
    /// batch before anything is stored.
    pub fn format_pairs<K, V, I>(&mut self, reset: bool, pairs: I) -> PlotResult<()>
    where
        K: AsRef<str>,
        V: Into<SettingValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let settings = AxesSettings::parse(pairs)?;
        self.format(reset, settings)
    }

    pub fn apply_settings(&mut self) -> PlotResult<()> {
        for (property, value) in self.settings.iter() {
            self.surface.apply_setting(property, value)?;
        }
        Ok(())
    }

    /// Widens the stored x/y limits to cover `x` and `y`; never shrinks them.
    pub fn check_and_extend_limits(&mut self, x: AxisRange, y: AxisRange) -> PlotResult<()> {
        let widened = self.widened_limits(x, y)?;
        self.format(false, widened)
    }

    fn widened_limits(&self, x: AxisRange, y: AxisRange) -> PlotResult<AxesSettings> {
        let x = self
            .settings
            .range(AxesProperty::XLim)
            .map_or(x, |current| current.union(x));
        let y = self
            .settings
            .range(AxesProperty::YLim)
            .map_or(y, |current| current.union(y));
        AxesSettings::new()
            .with(AxesProperty::XLim, x)?
            .with(AxesProperty::YLim, y)
    }

    /// Adds `dataset` as a new layer and widens the limits to its default bounds.
    pub fn add_dataset(
        &mut self,
        dataset: impl Into<Arc<Dataset>>,
        style: StyleOptions,
    ) -> PlotResult<usize> {
        let dataset = dataset.into();
        let (x, y) = dataset.default_limits()?;
        let widened = self.widened_limits(x, y)?;
        let index = self.layers.add(dataset, style);
        self.format(false, widened)?;
        Ok(index)
    }

    #[must_use]
    pub fn position(&self) -> AxesPosition {
        self.surface.position()
    }

    pub fn set_position(&mut self, position: AxesPosition) -> PlotResult<()> {
        self.surface.set_position(position)
    }

    /// Clears the surface, re-applies settings and paints every layer.
    pub fn render(&mut self) -> PlotResult<Vec<S::Drawable>> {
        self.surface.clear();
        self.apply_settings()?;
        self.surface.reset_color_cycle();
        let drawables = self.layers.render(&mut self.surface)?;
        trace!(axes = self.id.raw(), layers = drawables.len(), "render axes");
        Ok(drawables)
    }
}

impl<S: AxesSurface> fmt::Display for AxesManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position();
        writeln!(
            f,
            "axes {} at ({:.3}, {:.3}, {:.3}, {:.3})",
            self.id.raw(),
            position.x,
            position.y,
            position.width,
            position.height
        )?;
        write!(f, "{}", self.layers)
    }
}
