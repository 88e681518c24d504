//! Numeric array coercion and the shape predicates used by classification.

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, Ix1, Ix2};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{PlotError, PlotResult};

/// n-dimensional array of samples; every dataset axis is stored as one.
pub type PlotArray = ArrayD<f64>;

/// Tolerance used by [`is_equidistant`] when classifying coordinate axes.
pub const DEFAULT_EQUIDISTANT_TOLERANCE: f64 = 1e-5;

/// Conversion of array-like input into a [`PlotArray`].
pub trait IntoPlotArray {
    fn into_plot_array(self) -> PlotResult<PlotArray>;
}

impl IntoPlotArray for PlotArray {
    fn into_plot_array(self) -> PlotResult<PlotArray> {
        Ok(self)
    }
}

impl IntoPlotArray for Array1<f64> {
    fn into_plot_array(self) -> PlotResult<PlotArray> {
        Ok(self.into_dyn())
    }
}

impl IntoPlotArray for Array2<f64> {
    fn into_plot_array(self) -> PlotResult<PlotArray> {
        Ok(self.into_dyn())
    }
}

macro_rules! impl_numeric_sequences {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoPlotArray for Vec<$ty> {
                fn into_plot_array(self) -> PlotResult<PlotArray> {
                    Ok(self.into_iter().map(|value| value as f64).collect::<Array1<f64>>().into_dyn())
                }
            }

            impl IntoPlotArray for &[$ty] {
                fn into_plot_array(self) -> PlotResult<PlotArray> {
                    Ok(self.iter().map(|&value| value as f64).collect::<Array1<f64>>().into_dyn())
                }
            }

            impl<const N: usize> IntoPlotArray for [$ty; N] {
                fn into_plot_array(self) -> PlotResult<PlotArray> {
                    self.as_slice().into_plot_array()
                }
            }
        )*
    };
}

impl_numeric_sequences!(f64, f32, i32, i64, u32, usize);

impl IntoPlotArray for Vec<Vec<f64>> {
    fn into_plot_array(self) -> PlotResult<PlotArray> {
        let rows = self.len();
        let cols = self.first().map_or(0, Vec::len);
        if let Some(row) = self.iter().position(|row| row.len() != cols) {
            return Err(PlotError::InvalidInputShape(format!(
                "ragged nested array: row {row} has {} values, expected {cols}",
                self[row].len()
            )));
        }
        let flat: Vec<f64> = self.into_iter().flatten().collect();
        let grid = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|err| PlotError::InvalidInputShape(err.to_string()))?;
        Ok(grid.into_dyn())
    }
}

impl IntoPlotArray for Vec<Decimal> {
    fn into_plot_array(self) -> PlotResult<PlotArray> {
        let values = self
            .into_iter()
            .map(|value| decimal_to_f64(value, "decimal sample"))
            .collect::<PlotResult<Array1<f64>>>()?;
        Ok(values.into_dyn())
    }
}

impl IntoPlotArray for Vec<DateTime<Utc>> {
    fn into_plot_array(self) -> PlotResult<PlotArray> {
        Ok(self
            .into_iter()
            .map(datetime_to_unix_seconds)
            .collect::<Array1<f64>>()
            .into_dyn())
    }
}

/// Conversion of a group of array-like inputs, in axis order.
pub trait IntoPlotArrays {
    fn into_plot_arrays(self) -> PlotResult<Vec<PlotArray>>;
}

impl IntoPlotArrays for Vec<PlotArray> {
    fn into_plot_arrays(self) -> PlotResult<Vec<PlotArray>> {
        Ok(self)
    }
}

impl<A: IntoPlotArray> IntoPlotArrays for (A,) {
    fn into_plot_arrays(self) -> PlotResult<Vec<PlotArray>> {
        Ok(vec![self.0.into_plot_array()?])
    }
}

impl<A: IntoPlotArray, B: IntoPlotArray> IntoPlotArrays for (A, B) {
    fn into_plot_arrays(self) -> PlotResult<Vec<PlotArray>> {
        Ok(vec![self.0.into_plot_array()?, self.1.into_plot_array()?])
    }
}

impl<A: IntoPlotArray, B: IntoPlotArray, C: IntoPlotArray> IntoPlotArrays for (A, B, C) {
    fn into_plot_arrays(self) -> PlotResult<Vec<PlotArray>> {
        Ok(vec![
            self.0.into_plot_array()?,
            self.1.into_plot_array()?,
            self.2.into_plot_array()?,
        ])
    }
}

impl<A: IntoPlotArray, B: IntoPlotArray, C: IntoPlotArray, D: IntoPlotArray> IntoPlotArrays
    for (A, B, C, D)
{
    fn into_plot_arrays(self) -> PlotResult<Vec<PlotArray>> {
        Ok(vec![
            self.0.into_plot_array()?,
            self.1.into_plot_array()?,
            self.2.into_plot_array()?,
            self.3.into_plot_array()?,
        ])
    }
}

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> PlotResult<f64> {
    value.to_f64().ok_or_else(|| {
        PlotError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Borrows `array` as 1-D, or `None` for any other rank.
#[must_use]
pub fn as_1d(array: &PlotArray) -> Option<ArrayView1<'_, f64>> {
    array.view().into_dimensionality::<Ix1>().ok()
}

/// Borrows `array` as 2-D, or `None` for any other rank.
#[must_use]
pub fn as_2d(array: &PlotArray) -> Option<ArrayView2<'_, f64>> {
    array.view().into_dimensionality::<Ix2>().ok()
}

fn consecutive_differences(values: ArrayView1<'_, f64>) -> Vec<f64> {
    let values = values.to_vec();
    values.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// True when `array` is 1-D and every consecutive difference stays within
/// `tolerance` of the smallest one.
#[must_use]
pub fn is_equidistant(array: &PlotArray, tolerance: f64) -> bool {
    let Some(values) = as_1d(array) else {
        return false;
    };
    let diffs = consecutive_differences(values);
    let smallest = diffs.iter().copied().fold(f64::INFINITY, f64::min);
    diffs.iter().all(|diff| diff - smallest < tolerance)
}

/// True when `array` is 1-D and strictly increasing.
#[must_use]
pub fn is_increasing(array: &PlotArray) -> bool {
    let Some(values) = as_1d(array) else {
        return false;
    };
    consecutive_differences(values).iter().all(|diff| *diff > 0.0)
}

/// Minimum and maximum over all elements, skipping NaN and infinities.
///
/// Returns `None` for empty arrays and arrays without a finite value.
#[must_use]
pub fn finite_bounds(array: &PlotArray) -> Option<(f64, f64)> {
    let (min, max) = array
        .iter()
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &value| {
            (min.min(value), max.max(value))
        });
    (min <= max).then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ndarray::{Array1, array};

    #[test]
    fn nested_vectors_become_two_dimensional() {
        let grid = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]
            .into_plot_array()
            .expect("rectangular input");
        assert_eq!(grid.shape(), &[2, 3]);
        assert_eq!(grid[[1, 2]], 6.0);
    }

    #[test]
    fn ragged_nested_vectors_are_rejected() {
        let err = vec![vec![1.0, 2.0], vec![3.0]]
            .into_plot_array()
            .expect_err("ragged input");
        assert!(matches!(err, PlotError::InvalidInputShape(_)));
    }

    #[test]
    fn integer_and_temporal_sequences_are_coerced() {
        let ints = vec![1_i32, 2, 3].into_plot_array().expect("ints");
        assert_eq!(ints.ndim(), 1);
        assert_eq!(ints[[2]], 3.0);

        let times = vec![
            Utc.timestamp_opt(10, 0).single().expect("valid time"),
            Utc.timestamp_opt(12, 500_000_000).single().expect("valid time"),
        ];
        let seconds = times.into_plot_array().expect("times");
        assert_eq!(seconds[[0]], 10.0);
        assert_eq!(seconds[[1]], 12.5);

        let decimals = vec![Decimal::new(125, 2)].into_plot_array().expect("decimals");
        assert_eq!(decimals[[0]], 1.25);
    }

    #[test]
    fn equidistance_uses_the_smallest_step() {
        let linear = Array1::linspace(0.0, 1.0, 100).into_dyn();
        assert!(is_equidistant(&linear, DEFAULT_EQUIDISTANT_TOLERANCE));

        let uneven = array![0.0, 1.0, 3.0].into_dyn();
        assert!(!is_equidistant(&uneven, DEFAULT_EQUIDISTANT_TOLERANCE));

        let matrix = Array2::<f64>::zeros((2, 2)).into_dyn();
        assert!(!is_equidistant(&matrix, DEFAULT_EQUIDISTANT_TOLERANCE));
    }

    #[test]
    fn increasing_requires_strict_order() {
        assert!(is_increasing(&array![0.0, 0.5, 2.0].into_dyn()));
        assert!(!is_increasing(&array![0.0, 0.0, 2.0].into_dyn()));
        assert!(!is_increasing(&array![0.0, f64::NAN, 2.0].into_dyn()));
        assert!(is_increasing(&array![4.0].into_dyn()));
    }

    #[test]
    fn finite_bounds_skip_nan_and_reject_empty() {
        let values = array![3.0, f64::NAN, -1.0, 7.5].into_dyn();
        assert_eq!(finite_bounds(&values), Some((-1.0, 7.5)));
        assert_eq!(finite_bounds(&Array1::<f64>::zeros(0).into_dyn()), None);
        assert_eq!(finite_bounds(&array![f64::NAN].into_dyn()), None);
    }

    #[test]
    fn finite_bounds_skip_infinities() {
        let values = array![0.0, f64::INFINITY, 2.0, f64::NEG_INFINITY].into_dyn();
        assert_eq!(finite_bounds(&values), Some((0.0, 2.0)));
        assert_eq!(finite_bounds(&array![f64::INFINITY].into_dyn()), None);
    }
}
