//! Ordered layers of one axes with a current-layer cursor.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::dataset::Dataset;
use crate::core::style::{StyleOptions, merge_into, merge_over_defaults};
use crate::error::{PlotError, PlotResult};
use crate::render::AxesSurface;

/// A dataset bound to its style options.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    dataset: Arc<Dataset>,
    style: StyleOptions,
}

impl Layer {
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Shared handle to the dataset; clones of a layer never copy arrays.
    #[must_use]
    pub fn dataset_handle(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    #[must_use]
    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    /// Stored options merged over the kind defaults, as handed to the surface.
    #[must_use]
    pub fn effective_style(&self) -> StyleOptions {
        merge_over_defaults(&self.style, &self.dataset.kind().default_style())
    }
}

/// Ordered layers of one axes plus the current-layer cursor.
///
/// Paint order is list order: later layers occlude earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerCollection {
    layers: Vec<Layer>,
    current: Option<usize>,
}

impl LayerCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer and moves the cursor onto it. Returns its index.
    pub fn add(&mut self, dataset: impl Into<Arc<Dataset>>, style: StyleOptions) -> usize {
        let dataset = dataset.into();
        let style = merge_over_defaults(&style, &dataset.kind().default_style());
        self.layers.push(Layer { dataset, style });
        let index = self.layers.len() - 1;
        self.current = Some(index);
        debug!(index, count = self.layers.len(), "add layer");
        index
    }

    /// Merges `style` into the options of the layer at `index`.
    pub fn edit(&mut self, index: usize, style: &StyleOptions) -> PlotResult<()> {
        let len = self.layers.len();
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(PlotError::IndexOutOfRange { index, len })?;
        merge_into(&mut layer.style, style);
        trace!(index, options = layer.style.len(), "edit layer");
        Ok(())
    }

    /// Edits the layer under the cursor; `reset` replaces its options wholesale.
    pub fn edit_current(&mut self, reset: bool, style: StyleOptions) -> PlotResult<()> {
        let index = self
            .current_index()
            .ok_or_else(|| PlotError::NotFound("no current layer to edit".to_owned()))?;
        if reset {
            let layer = &mut self.layers[index];
            layer.style = style;
            trace!(index, "reset layer style");
            return Ok(());
        }
        self.edit(index, &style)
    }

    /// Reorders layers so that position `i` holds the layer previously at
    /// `new_order[i]`; the cursor moves to the last layer.
    ///
    /// `new_order` must be a permutation of `0..len`; anything else is
    /// rejected before the collection changes.
    pub fn order(&mut self, new_order: &[usize]) -> PlotResult<()> {
        let len = self.layers.len();
        if new_order.len() != len {
            return Err(PlotError::InvalidPermutation(format!(
                "expected {len} indices, got {}",
                new_order.len()
            )));
        }
        let mut seen = vec![false; len];
        for &index in new_order {
            let Some(slot) = seen.get_mut(index) else {
                return Err(PlotError::InvalidPermutation(format!(
                    "index {index} out of range for {len} layers"
                )));
            };
            if *slot {
                return Err(PlotError::InvalidPermutation(format!(
                    "index {index} appears more than once"
                )));
            }
            *slot = true;
        }

        let reordered: Vec<Layer> = new_order
            .iter()
            .map(|&index| self.layers[index].clone())
            .collect();
        self.layers = reordered;
        self.current = len.checked_sub(1);
        debug!(?new_order, "reorder layers");
        Ok(())
    }

    /// Removes the layer at `index`.
    ///
    /// A cursor past `index` follows its layer; a cursor on `index` stays on
    /// the same slot, clamped to the new last layer.
    pub fn delete(&mut self, index: usize) -> PlotResult<Layer> {
        let len = self.layers.len();
        if index >= len {
            return Err(PlotError::IndexOutOfRange { index, len });
        }
        let removed = self.layers.remove(index);
        let last = self.layers.len().checked_sub(1);
        self.current = match (self.current, last) {
            (_, None) => None,
            (Some(current), Some(_)) if current > index => Some(current - 1),
            (Some(current), Some(last)) => Some(current.min(last)),
            (None, Some(_)) => None,
        };
        debug!(index, count = self.layers.len(), "delete layer");
        Ok(removed)
    }

    pub fn set_current(&mut self, index: usize) -> PlotResult<()> {
        let len = self.layers.len();
        if index >= len {
            return Err(PlotError::IndexOutOfRange { index, len });
        }
        self.current = Some(index);
        Ok(())
    }

    /// Cursor position, or `None` for an empty collection.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current.filter(|&index| index < self.layers.len())
    }

    #[must_use]
    pub fn current(&self) -> Option<&Layer> {
        self.current_index().and_then(|index| self.layers.get(index))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Paints every layer in order and returns one drawable per layer.
    pub fn render<S: AxesSurface>(&self, surface: &mut S) -> PlotResult<Vec<S::Drawable>> {
        self.layers
            .iter()
            .map(|layer| layer.dataset.draw(surface, &layer.style))
            .collect()
    }
}

impl fmt::Display for LayerCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layers.is_empty() {
            return f.write_str("(no layers)");
        }
        let current = self.current_index();
        for (index, layer) in self.layers.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            let marker = if current == Some(index) { '>' } else { ' ' };
            write!(f, "{marker} {index}: {}", layer.dataset)?;
        }
        Ok(())
    }
}
