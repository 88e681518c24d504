//! Classified datasets: arrays tagged with a kind, their limits and drawing.

use std::fmt;

use ndarray::{ArrayView1, ArrayView2};
use tracing::trace;

use crate::core::array::{
    IntoPlotArray, IntoPlotArrays, PlotArray, as_1d, as_2d, finite_bounds,
};
use crate::core::kind::{DatasetKind, DrawPrimitive};
use crate::core::limits::{AxisRange, LimitOptions, resolve_axis_range};
use crate::core::style::{StyleOptions, merge_over_defaults};
use crate::error::{PlotError, PlotResult};
use crate::render::{AxesSurface, ValueChannel};

/// Style key selecting which channel the value array of a value-points layer drives.
pub const VALUE_TYPE_KEY: &str = "valuetype";

/// Validated, immutable group of arrays forming one plottable dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    kind: DatasetKind,
    arrays: Vec<PlotArray>,
    names: Vec<String>,
}

impl Dataset {
    /// Validates `arrays` against `kind`; `names` default to the kind's axis names.
    pub fn new(
        kind: DatasetKind,
        arrays: Vec<PlotArray>,
        names: Option<Vec<String>>,
    ) -> PlotResult<Self> {
        kind.check(&arrays)?;
        let names = match names {
            Some(names) if names.len() != arrays.len() => {
                return Err(PlotError::InvalidInputShape(format!(
                    "{kind} expects {} names, got {}",
                    arrays.len(),
                    names.len()
                )));
            }
            Some(names) => names,
            None => kind
                .default_names()
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        };
        Ok(Self {
            kind,
            arrays,
            names,
        })
    }

    pub fn from_arrays(kind: DatasetKind, arrays: impl IntoPlotArrays) -> PlotResult<Self> {
        Self::new(kind, arrays.into_plot_arrays()?, None)
    }

    pub fn timeseries(t: impl IntoPlotArray, v: impl IntoPlotArray) -> PlotResult<Self> {
        Self::from_arrays(DatasetKind::Timeseries, (t, v))
    }

    pub fn points(x: impl IntoPlotArray, y: impl IntoPlotArray) -> PlotResult<Self> {
        Self::from_arrays(DatasetKind::Points, (x, y))
    }

    pub fn value_points(
        x: impl IntoPlotArray,
        y: impl IntoPlotArray,
        z: impl IntoPlotArray,
    ) -> PlotResult<Self> {
        Self::from_arrays(DatasetKind::ValuePoints, (x, y, z))
    }

    pub fn grid(
        x: impl IntoPlotArray,
        y: impl IntoPlotArray,
        z: impl IntoPlotArray,
    ) -> PlotResult<Self> {
        Self::from_arrays(DatasetKind::Grid, (x, y, z))
    }

    pub fn irregular_grid(
        x: impl IntoPlotArray,
        y: impl IntoPlotArray,
        z: impl IntoPlotArray,
    ) -> PlotResult<Self> {
        Self::from_arrays(DatasetKind::IrregularGrid, (x, y, z))
    }

    pub fn vector_data(
        x: impl IntoPlotArray,
        y: impl IntoPlotArray,
        u: impl IntoPlotArray,
        v: impl IntoPlotArray,
    ) -> PlotResult<Self> {
        Self::from_arrays(DatasetKind::VectorData, (x, y, u, v))
    }

    /// Replaces the axis names; the count must match the array count.
    pub fn with_names(self, names: Vec<String>) -> PlotResult<Self> {
        Self::new(self.kind, self.arrays, Some(names))
    }

    #[must_use]
    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    #[must_use]
    pub fn layer_name(&self) -> &'static str {
        self.kind.layer_name()
    }

    #[must_use]
    pub fn arrays(&self) -> &[PlotArray] {
        &self.arrays
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    #[must_use]
    pub fn array(&self, index: usize) -> Option<&PlotArray> {
        self.arrays.get(index)
    }

    #[must_use]
    pub fn array_by_name(&self, name: &str) -> Option<&PlotArray> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|index| self.arrays.get(index))
    }

    /// `(name, array)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlotArray)> {
        self.names.iter().map(String::as_str).zip(&self.arrays)
    }

    #[must_use]
    pub fn shapes(&self) -> Vec<Vec<usize>> {
        self.arrays.iter().map(|array| array.shape().to_vec()).collect()
    }

    /// Axis bounds under the kind's limit policy.
    pub fn default_limits(&self) -> PlotResult<(AxisRange, AxisRange)> {
        self.limits(LimitOptions::NONE)
    }

    /// Axis bounds of the first two arrays; `options` override the kind policy.
    pub fn limits(&self, options: LimitOptions) -> PlotResult<(AxisRange, AxisRange)> {
        let options = options.over(self.kind.limit_options());
        let x = resolve_axis_range(self.bounds_of(0)?, options.x_unit, options.x_margin)?;
        let y = resolve_axis_range(self.bounds_of(1)?, options.y_unit, options.y_margin)?;
        Ok((x, y))
    }

    /// Paints the dataset with the primitive of its kind.
    ///
    /// `style` is merged over the kind defaults before it reaches the surface.
    pub fn draw<S: AxesSurface>(
        &self,
        surface: &mut S,
        style: &StyleOptions,
    ) -> PlotResult<S::Drawable> {
        let mut style = merge_over_defaults(style, &self.kind.default_style());
        trace!(kind = %self.kind, options = style.len(), "draw dataset");
        match self.kind.primitive() {
            DrawPrimitive::Line => surface.draw_line(self.view_1d(0)?, self.view_1d(1)?, &style),
            DrawPrimitive::Scatter => {
                surface.draw_scatter(self.view_1d(0)?, self.view_1d(1)?, &style)
            }
            DrawPrimitive::ValueScatter => {
                let channel = match style.shift_remove(VALUE_TYPE_KEY) {
                    Some(value) => ValueChannel::from_style(&value)?,
                    None => ValueChannel::Color,
                };
                surface.draw_value_scatter(
                    self.view_1d(0)?,
                    self.view_1d(1)?,
                    self.view_1d(2)?,
                    channel,
                    &style,
                )
            }
            DrawPrimitive::Mesh => surface.draw_mesh(
                self.view_1d(0)?,
                self.view_1d(1)?,
                self.view_2d(2)?,
                &style,
            ),
            DrawPrimitive::IrregularMesh => surface.draw_irregular_mesh(
                self.view_2d(0)?,
                self.view_2d(1)?,
                self.view_2d(2)?,
                &style,
            ),
            DrawPrimitive::Quiver => surface.draw_quiver(
                self.view_1d(0)?,
                self.view_1d(1)?,
                self.view_2d(2)?,
                self.view_2d(3)?,
                &style,
            ),
        }
    }

    fn bounds_of(&self, index: usize) -> PlotResult<AxisRange> {
        self.arrays
            .get(index)
            .and_then(finite_bounds)
            .map(AxisRange::from)
            .ok_or_else(|| {
                PlotError::InvalidInputShape(format!(
                    "{} array {index} has no values to derive limits from",
                    self.kind
                ))
            })
    }

    fn view_1d(&self, index: usize) -> PlotResult<ArrayView1<'_, f64>> {
        self.arrays.get(index).and_then(as_1d).ok_or_else(|| {
            PlotError::InvalidInputShape(format!("{} array {index} is not 1-D", self.kind))
        })
    }

    fn view_2d(&self, index: usize) -> PlotResult<ArrayView2<'_, f64>> {
        self.arrays.get(index).and_then(as_2d).ok_or_else(|| {
            PlotError::InvalidInputShape(format!("{} array {index} is not 2-D", self.kind))
        })
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.layer_name())?;
        for (position, (name, array)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            let dims: Vec<String> = array.shape().iter().map(usize::to_string).collect();
            write!(f, "{name}: ({})", dims.join(", "))?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2};

    fn ramp(len: usize) -> Array1<f64> {
        Array1::linspace(0.0, 7.0, len)
    }

    #[test]
    fn default_names_and_lookup() {
        let dataset = Dataset::timeseries(ramp(100), Array1::<f64>::zeros(100)).expect("valid");
        assert_eq!(dataset.names(), ["t", "v"]);
        assert!(dataset.array_by_name("v").is_some());
        assert!(dataset.array_by_name("x").is_none());
        let names: Vec<&str> = dataset.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["t", "v"]);
    }

    #[test]
    fn custom_names_must_match_array_count() {
        let dataset = Dataset::points(ramp(3), ramp(3)).expect("valid");
        let renamed = dataset
            .clone()
            .with_names(vec!["east".to_owned(), "north".to_owned()])
            .expect("two names");
        assert_eq!(renamed.array(0), renamed.array_by_name("east"));
        assert!(dataset.with_names(vec!["only".to_owned()]).is_err());
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let err = Dataset::points(ramp(3), ramp(4)).expect_err("shape mismatch");
        assert!(matches!(err, PlotError::InvalidInputShape(_)));
        let err = Dataset::grid(ramp(3), ramp(4), Array2::<f64>::zeros((3, 4)))
            .expect_err("transposed field");
        assert!(matches!(err, PlotError::InvalidInputShape(_)));
    }

    #[test]
    fn timeseries_limits_round_only_the_value_axis() {
        let values = Array1::from(vec![0.12, 0.56, 0.93]);
        let dataset = Dataset::timeseries(ramp(3), values).expect("valid");
        let (x, y) = dataset.default_limits().expect("limits");
        assert_eq!(x, AxisRange::new(0.0, 7.0));
        // span 0.81 -> unit 0.1, margin 0.05
        assert_relative_eq!(y.min, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y.max, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn caller_options_override_kind_policy() {
        let dataset = Dataset::points(ramp(3), ramp(3)).expect("valid");
        let (x, _) = dataset
            .limits(LimitOptions::NONE.with_x_unit(crate::core::AxisUnit::Fixed(5.0)))
            .expect("limits");
        assert_eq!(x, AxisRange::new(0.0, 10.0));
    }

    #[test]
    fn empty_axes_have_no_limits() {
        let dataset = Dataset::points(Vec::<f64>::new(), Vec::<f64>::new()).expect("valid");
        assert!(dataset.default_limits().is_err());
    }

    #[test]
    fn display_lists_names_and_shapes() {
        let dataset = Dataset::grid(ramp(4), ramp(3), Array2::<f64>::zeros((3, 4))).expect("valid");
        assert_eq!(
            dataset.to_string(),
            "grid.pcolormesh [x: (4), y: (3), z: (3, 4)]"
        );
    }
}
