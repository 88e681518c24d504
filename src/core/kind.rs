//! The fixed catalogue of dataset kinds.
//!
//! Each kind is described by plain data plus function references: its
//! dimension signature, default axis names, default style, limit policy,
//! shape-consistency check and likelihood score. Dispatch always goes through
//! the [`DatasetKind`] tag, never through type names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::array::{
    DEFAULT_EQUIDISTANT_TOLERANCE, PlotArray, is_equidistant, is_increasing,
};
use crate::core::limits::LimitOptions;
use crate::core::style::{
    MESH_FIELDS, POINTS_FIELDS, StyleField, StyleOptions, StyleValue, TIMESERIES_FIELDS,
    VALUE_POINTS_FIELDS, VECTOR_FIELDS, style_options,
};
use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Score given to a kind that validates but has no reason to be preferred.
pub const NEUTRAL_LIKELIHOOD: f64 = 0.5;
const FAVOURED_LIKELIHOOD: f64 = 0.75;
const DISFAVOURED_LIKELIHOOD: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    Timeseries,
    Points,
    ValuePoints,
    Grid,
    IrregularGrid,
    VectorData,
}

/// Drawing primitive a kind is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawPrimitive {
    Line,
    Scatter,
    ValueScatter,
    Mesh,
    IrregularMesh,
    Quiver,
}

type ShapeCheck = fn(&[PlotArray]) -> Result<(), String>;
type Likelihood = fn(&[PlotArray]) -> f64;

/// Static description of one dataset kind.
#[derive(Debug, Clone, Copy)]
pub struct KindDescriptor {
    pub kind: DatasetKind,
    /// Required rank of each array, in order.
    pub signature: &'static [usize],
    pub default_names: &'static [&'static str],
    pub limit_options: LimitOptions,
    pub layer_name: &'static str,
    pub primitive: DrawPrimitive,
    pub style_schema: &'static [StyleField],
    default_style: fn() -> StyleOptions,
    shape_check: ShapeCheck,
    likelihood: Likelihood,
}

/// Every kind in declaration order; ties in likelihood resolve by this order.
pub static CATALOGUE: [KindDescriptor; 6] = [
    KindDescriptor {
        kind: DatasetKind::Timeseries,
        signature: &[1, 1],
        default_names: &["t", "v"],
        limit_options: LimitOptions::auto_y(),
        layer_name: "timeseries.plot",
        primitive: DrawPrimitive::Line,
        style_schema: TIMESERIES_FIELDS,
        default_style: StyleOptions::new,
        shape_check: same_shapes,
        likelihood: increasing_first_axis,
    },
    KindDescriptor {
        kind: DatasetKind::Points,
        signature: &[1, 1],
        default_names: &["x", "y"],
        limit_options: LimitOptions::auto_xy(),
        layer_name: "points.scatter",
        primitive: DrawPrimitive::Scatter,
        style_schema: POINTS_FIELDS,
        default_style: points_style,
        shape_check: same_shapes,
        likelihood: neutral,
    },
    KindDescriptor {
        kind: DatasetKind::ValuePoints,
        signature: &[1, 1, 1],
        default_names: &["x", "y", "z"],
        limit_options: LimitOptions::auto_xy(),
        layer_name: "valuepoints.scatter",
        primitive: DrawPrimitive::ValueScatter,
        style_schema: VALUE_POINTS_FIELDS,
        default_style: value_points_style,
        shape_check: same_shapes,
        likelihood: neutral,
    },
    KindDescriptor {
        kind: DatasetKind::Grid,
        signature: &[1, 1, 2],
        default_names: &["x", "y", "z"],
        limit_options: LimitOptions::NONE,
        layer_name: "grid.pcolormesh",
        primitive: DrawPrimitive::Mesh,
        style_schema: MESH_FIELDS,
        default_style: mesh_style,
        shape_check: fields_match_coordinates,
        likelihood: equidistant_coordinates,
    },
    KindDescriptor {
        kind: DatasetKind::IrregularGrid,
        signature: &[2, 2, 2],
        default_names: &["x", "y", "z"],
        limit_options: LimitOptions::auto_xy(),
        layer_name: "irregulargrid.pcolor",
        primitive: DrawPrimitive::IrregularMesh,
        style_schema: MESH_FIELDS,
        default_style: mesh_style,
        shape_check: same_shapes,
        likelihood: neutral,
    },
    KindDescriptor {
        kind: DatasetKind::VectorData,
        signature: &[1, 1, 2, 2],
        default_names: &["x", "y", "U", "V"],
        limit_options: LimitOptions::auto_xy(),
        layer_name: "vectordata.quiver",
        primitive: DrawPrimitive::Quiver,
        style_schema: VECTOR_FIELDS,
        default_style: StyleOptions::new,
        shape_check: fields_match_coordinates,
        likelihood: equidistant_coordinates,
    },
];

impl DatasetKind {
    #[must_use]
    pub fn descriptor(self) -> &'static KindDescriptor {
        let index = match self {
            Self::Timeseries => 0,
            Self::Points => 1,
            Self::ValuePoints => 2,
            Self::Grid => 3,
            Self::IrregularGrid => 4,
            Self::VectorData => 5,
        };
        &CATALOGUE[index]
    }

    #[must_use]
    pub fn signature(self) -> &'static [usize] {
        self.descriptor().signature
    }

    #[must_use]
    pub fn default_names(self) -> &'static [&'static str] {
        self.descriptor().default_names
    }

    #[must_use]
    pub fn default_style(self) -> StyleOptions {
        (self.descriptor().default_style)()
    }

    #[must_use]
    pub fn limit_options(self) -> LimitOptions {
        self.descriptor().limit_options
    }

    #[must_use]
    pub fn layer_name(self) -> &'static str {
        self.descriptor().layer_name
    }

    #[must_use]
    pub fn primitive(self) -> DrawPrimitive {
        self.descriptor().primitive
    }

    #[must_use]
    pub fn style_schema(self) -> &'static [StyleField] {
        self.descriptor().style_schema
    }

    /// Verifies array count, ranks and kind-specific shape consistency.
    pub fn check(self, arrays: &[PlotArray]) -> PlotResult<()> {
        let descriptor = self.descriptor();
        if arrays.len() != descriptor.signature.len() {
            return Err(PlotError::InvalidInputShape(format!(
                "{self} requires {} arrays, got {}",
                descriptor.signature.len(),
                arrays.len()
            )));
        }
        for (index, (array, &rank)) in arrays.iter().zip(descriptor.signature).enumerate() {
            if array.ndim() != rank {
                return Err(PlotError::InvalidInputShape(format!(
                    "{self} array {index} must have {rank} dimension(s), got {}",
                    array.ndim()
                )));
            }
        }
        (descriptor.shape_check)(arrays)
            .map_err(|reason| PlotError::InvalidInputShape(format!("{self}: {reason}")))
    }

    #[must_use]
    pub fn is_valid(self, arrays: &[PlotArray]) -> bool {
        self.check(arrays).is_ok()
    }

    /// Score in `[0, 1]` of `arrays` being meant as this kind.
    ///
    /// Only meaningful for arrays that pass [`DatasetKind::check`].
    #[must_use]
    pub fn likelihood(self, arrays: &[PlotArray]) -> f64 {
        (self.descriptor().likelihood)(arrays)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timeseries => "Timeseries",
            Self::Points => "Points",
            Self::ValuePoints => "ValuePoints",
            Self::Grid => "Grid",
            Self::IrregularGrid => "IrregularGrid",
            Self::VectorData => "VectorData",
        };
        f.write_str(name)
    }
}

fn points_style() -> StyleOptions {
    style_options([
        ("color", StyleValue::Color(Color::BLACK)),
        ("alpha", StyleValue::Number(1.0)),
        ("s", StyleValue::Number(20.0)),
    ])
}

fn value_points_style() -> StyleOptions {
    style_options([
        ("cmap", StyleValue::colormap("inferno")),
        ("lw", StyleValue::Number(0.0)),
        ("alpha", StyleValue::Number(1.0)),
        ("s", StyleValue::Number(20.0)),
    ])
}

fn mesh_style() -> StyleOptions {
    style_options([("cmap", StyleValue::colormap("viridis"))])
}

fn same_shapes(arrays: &[PlotArray]) -> Result<(), String> {
    let Some((first, rest)) = arrays.split_first() else {
        return Ok(());
    };
    match rest.iter().position(|array| array.shape() != first.shape()) {
        Some(offset) => Err(format!(
            "array {} has shape {:?}, expected {:?}",
            offset + 1,
            rest[offset].shape(),
            first.shape()
        )),
        None => Ok(()),
    }
}

/// Every array after the two coordinate axes must be shaped `(len(y), len(x))`.
fn fields_match_coordinates(arrays: &[PlotArray]) -> Result<(), String> {
    let expected = [arrays[1].len(), arrays[0].len()];
    for (index, field) in arrays.iter().enumerate().skip(2) {
        if field.shape() != &expected[..] {
            return Err(format!(
                "array {index} has shape {:?}, expected {expected:?} from the coordinate axes",
                field.shape()
            ));
        }
    }
    Ok(())
}

fn neutral(_: &[PlotArray]) -> f64 {
    NEUTRAL_LIKELIHOOD
}

fn increasing_first_axis(arrays: &[PlotArray]) -> f64 {
    if arrays.first().is_some_and(is_increasing) {
        FAVOURED_LIKELIHOOD
    } else {
        DISFAVOURED_LIKELIHOOD
    }
}

fn equidistant_coordinates(arrays: &[PlotArray]) -> f64 {
    let coordinates = &arrays[..arrays.len().min(2)];
    if coordinates.len() == 2
        && coordinates
            .iter()
            .all(|axis| is_equidistant(axis, DEFAULT_EQUIDISTANT_TOLERANCE))
    {
        FAVOURED_LIKELIHOOD
    } else {
        DISFAVOURED_LIKELIHOOD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    #[test]
    fn descriptors_are_indexed_by_their_own_kind() {
        for descriptor in &CATALOGUE {
            assert_eq!(descriptor.kind.descriptor().kind, descriptor.kind);
            assert_eq!(descriptor.default_names.len(), descriptor.signature.len());
        }
    }

    #[test]
    fn check_reports_rank_mismatch() {
        let arrays = vec![
            array![0.0, 1.0].into_dyn(),
            Array2::<f64>::zeros((2, 2)).into_dyn(),
        ];
        let err = DatasetKind::Points.check(&arrays).expect_err("rank mismatch");
        assert!(err.to_string().contains("array 1"));
    }

    #[test]
    fn grid_field_must_be_rows_by_columns() {
        let x = Array1::linspace(0.0, 1.0, 4).into_dyn();
        let y = Array1::linspace(0.0, 1.0, 3).into_dyn();
        let good = vec![x.clone(), y.clone(), Array2::<f64>::zeros((3, 4)).into_dyn()];
        let transposed = vec![x, y, Array2::<f64>::zeros((4, 3)).into_dyn()];
        assert!(DatasetKind::Grid.is_valid(&good));
        assert!(!DatasetKind::Grid.is_valid(&transposed));
    }

    #[test]
    fn timeseries_likelihood_follows_monotonic_time_axis() {
        let increasing = vec![array![0.0, 1.0, 2.0].into_dyn(), array![5.0, 1.0, 3.0].into_dyn()];
        let shuffled = vec![array![1.0, 0.0, 2.0].into_dyn(), array![5.0, 1.0, 3.0].into_dyn()];
        assert_eq!(DatasetKind::Timeseries.likelihood(&increasing), 0.75);
        assert_eq!(DatasetKind::Timeseries.likelihood(&shuffled), 0.25);
        assert_eq!(DatasetKind::Points.likelihood(&shuffled), NEUTRAL_LIKELIHOOD);
    }

    #[test]
    fn default_styles_match_kind() {
        assert!(DatasetKind::Timeseries.default_style().is_empty());
        assert_eq!(
            DatasetKind::Grid.default_style()["cmap"],
            StyleValue::colormap("viridis")
        );
        assert_eq!(DatasetKind::ValuePoints.default_style().len(), 4);
        assert_eq!(DatasetKind::VectorData.layer_name(), "vectordata.quiver");
    }
}
