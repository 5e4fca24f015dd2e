//! Geometry of the lawn in simulation space.

use serde::{Deserialize, Serialize};

/// Describes the lane/column grid and the screen area around it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    /// Number of lanes.
    pub rows: u32,
    /// Number of plantable columns per lane.
    pub columns: u32,
    /// Width of a single cell.
    pub cell_width: f32,
    /// Height of a single cell.
    pub cell_height: f32,
    /// Horizontal offset of the grid's left edge.
    pub offset_x: f32,
    /// Vertical offset of the grid's top edge.
    pub offset_y: f32,
    /// Width of the visible field.
    pub width: f32,
    /// Height of the visible field.
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 9,
            cell_width: 80.0,
            cell_height: 100.0,
            offset_x: 100.0,
            offset_y: 80.0,
            width: 900.0,
            height: 600.0,
        }
    }
}

impl Field {
    /// Horizontal centre of the provided column.
    #[must_use]
    pub fn cell_center_x(&self, col: i32) -> f32 {
        self.offset_x + col as f32 * self.cell_width + self.cell_width * 0.5
    }

    /// Vertical centre of the provided lane.
    #[must_use]
    pub fn cell_center_y(&self, row: i32) -> f32 {
        self.offset_y + row as f32 * self.cell_height + self.cell_height * 0.5
    }

    /// Column containing the horizontal coordinate.
    ///
    /// Coordinates left of the grid map to `-1` and coordinates right of it
    /// map to the approach corridor, `columns`.
    #[must_use]
    pub fn column_at(&self, x: f32) -> i32 {
        let relative = (x - self.offset_x) / self.cell_width;
        if relative < 0.0 {
            return -1;
        }
        (relative.floor() as i32).min(self.columns as i32)
    }

    /// Lane containing the vertical coordinate, if it lies within the grid.
    #[must_use]
    pub fn row_at(&self, y: f32) -> Option<i32> {
        let relative = (y - self.offset_y) / self.cell_height;
        if relative < 0.0 {
            return None;
        }
        let row = relative.floor() as i32;
        (row < self.rows as i32).then_some(row)
    }

    /// Whether `(row, col)` addresses a plantable cell.
    #[must_use]
    pub fn contains_cell(&self, row: i32, col: i32) -> bool {
        self.contains_row(row) && col >= 0 && col < self.columns as i32
    }

    /// Whether `row` addresses a lane.
    #[must_use]
    pub fn contains_row(&self, row: i32) -> bool {
        row >= 0 && row < self.rows as i32
    }

    /// Horizontal coordinate of the grid's right edge.
    #[must_use]
    pub fn grid_right(&self) -> f32 {
        self.offset_x + self.columns as f32 * self.cell_width
    }

    /// Number of lanes as an index bound.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.rows as usize
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Flat index of a plantable cell, row-major.
    #[must_use]
    pub fn cell_index(&self, row: i32, col: i32) -> Option<usize> {
        self.contains_cell(row, col)
            .then(|| row as usize * self.columns as usize + col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::Field;

    #[test]
    fn cell_centres_follow_offsets() {
        let field = Field::default();
        assert_eq!(field.cell_center_x(0), 140.0);
        assert_eq!(field.cell_center_x(8), 780.0);
        assert_eq!(field.cell_center_y(0), 130.0);
        assert_eq!(field.cell_center_y(4), 530.0);
    }

    #[test]
    fn column_lookup_distinguishes_strip_grid_and_corridor() {
        let field = Field::default();
        assert_eq!(field.column_at(99.0), -1);
        assert_eq!(field.column_at(100.0), 0);
        assert_eq!(field.column_at(179.9), 0);
        assert_eq!(field.column_at(180.0), 1);
        assert_eq!(field.column_at(819.0), 8);
        assert_eq!(field.column_at(820.0), 9);
        assert_eq!(field.column_at(5000.0), 9);
    }

    #[test]
    fn row_lookup_rejects_points_outside_lanes() {
        let field = Field::default();
        assert_eq!(field.row_at(30.0), None);
        assert_eq!(field.row_at(80.0), Some(0));
        assert_eq!(field.row_at(579.0), Some(4));
        assert_eq!(field.row_at(580.0), None);
    }

    #[test]
    fn cell_index_is_row_major() {
        let field = Field::default();
        assert_eq!(field.cell_index(0, 0), Some(0));
        assert_eq!(field.cell_index(2, 3), Some(21));
        assert_eq!(field.cell_index(5, 0), None);
        assert_eq!(field.cell_index(0, 9), None);
        assert_eq!(field.cell_count(), 45);
    }
}
