//! Normalized axes rectangles and subplot grid geometry.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Normalized bounding rectangle of one axes inside its figure.
///
/// `(x, y)` is the lower-left corner; all values are fractions of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxesPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AxesPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole figure.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn validate(self) -> PlotResult<()> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::Configuration(format!(
                    "axes position `{field}` must be finite and in [0, 1], got {value}"
                )));
            }
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(PlotError::Configuration(
                "axes position width and height must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// `(left, bottom, right, top)` edges.
    #[must_use]
    pub fn corners(self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// One slot of a subplot grid; `index` counts row-major from the top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub rows: usize,
    pub cols: usize,
    pub index: usize,
}

impl GridCell {
    pub fn new(rows: usize, cols: usize, index: usize) -> PlotResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(PlotError::Configuration(format!(
                "subplot grid needs at least one row and column, got {rows}x{cols}"
            )));
        }
        if index >= rows * cols {
            return Err(PlotError::Configuration(format!(
                "subplot index {index} outside a {rows}x{cols} grid"
            )));
        }
        Ok(Self { rows, cols, index })
    }

    #[must_use]
    pub fn row(self) -> usize {
        self.index / self.cols
    }

    #[must_use]
    pub fn col(self) -> usize {
        self.index % self.cols
    }
}

/// Figure margins and inter-cell spacing used to place subplots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    /// Horizontal gap as a fraction of the average cell width.
    pub wspace: f64,
    /// Vertical gap as a fraction of the average cell height.
    pub hspace: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
            wspace: 0.2,
            hspace: 0.2,
        }
    }
}

impl GridLayout {
    #[must_use]
    pub fn cell_position(&self, cell: GridCell) -> AxesPosition {
        let (width, x_step) = span_split(self.right - self.left, cell.cols, self.wspace);
        let (height, y_step) = span_split(self.top - self.bottom, cell.rows, self.hspace);
        let x = self.left + cell.col() as f64 * x_step;
        let y = self.top - cell.row() as f64 * y_step - height;
        AxesPosition::new(x, y, width, height)
    }
}

/// Splits `total` into `count` cells separated by `spacing` cell sizes.
/// Returns the cell size and the offset between consecutive cell origins.
fn span_split(total: f64, count: usize, spacing: f64) -> (f64, f64) {
    let count = count as f64;
    let cell = total / (count + spacing * (count - 1.0));
    (cell, cell * (1.0 + spacing))
}

/// Columns needed to fit `count` axes into `rows` rows.
#[must_use]
pub fn columns_for(count: usize, rows: usize) -> usize {
    count.div_ceil(rows.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_cell_fills_the_margins() {
        let cell = GridCell::new(1, 1, 0).expect("cell");
        let position = GridLayout::default().cell_position(cell);
        assert_relative_eq!(position.x, 0.125);
        assert_relative_eq!(position.y, 0.11);
        assert_relative_eq!(position.width, 0.775, epsilon = 1e-12);
        assert_relative_eq!(position.height, 0.77, epsilon = 1e-12);
    }

    #[test]
    fn cells_are_row_major_from_top_left() {
        let layout = GridLayout::default();
        let top_left = layout.cell_position(GridCell::new(2, 2, 0).expect("cell"));
        let top_right = layout.cell_position(GridCell::new(2, 2, 1).expect("cell"));
        let bottom_left = layout.cell_position(GridCell::new(2, 2, 2).expect("cell"));

        assert!(top_right.x > top_left.x);
        assert_relative_eq!(top_right.y, top_left.y);
        assert!(bottom_left.y < top_left.y);
        assert_relative_eq!(bottom_left.y, 0.11, epsilon = 1e-12);
        let (_, _, right, top) = top_right.corners();
        assert_relative_eq!(right, 0.9, epsilon = 1e-12);
        assert_relative_eq!(top, 0.88, epsilon = 1e-12);
    }

    #[test]
    fn grid_cell_rejects_out_of_range_index() {
        assert!(GridCell::new(2, 2, 4).is_err());
        assert!(GridCell::new(0, 2, 0).is_err());
    }

    #[test]
    fn position_validation() {
        assert!(AxesPosition::full().validate().is_ok());
        assert!(AxesPosition::new(0.5, 0.5, 0.0, 0.2).validate().is_err());
        assert!(AxesPosition::new(-0.1, 0.5, 0.2, 0.2).validate().is_err());
        assert!(AxesPosition::new(0.1, f64::NAN, 0.2, 0.2).validate().is_err());
    }

    #[test]
    fn columns_round_up() {
        assert_eq!(columns_for(4, 2), 2);
        assert_eq!(columns_for(5, 2), 3);
        assert_eq!(columns_for(1, 3), 1);
    }
}
