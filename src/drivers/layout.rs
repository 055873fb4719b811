use crate::drivers::error::{GridPlotError, Result};
/// Subplot grid. `rows = floor(sqrt(n))`, `cols = ceil(n / rows)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}
impl GridShape {
    pub fn for_channels(channel_count: usize) -> Result<Self> {
        if channel_count == 0 {
            return Err(GridPlotError::NoChannels);
        }
        let rows = (channel_count as f64).sqrt().floor() as usize;
        let cols = (channel_count + rows - 1) / rows;
        Ok(Self { rows, cols })
    }
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
    /// Row-major (row, col) of a cell index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn shape_matches_floor_sqrt_rule() {
        assert_eq!(GridShape::for_channels(10).unwrap(), GridShape { rows: 3, cols: 4 });
        assert_eq!(GridShape::for_channels(16).unwrap(), GridShape { rows: 4, cols: 4 });
        assert_eq!(GridShape::for_channels(1).unwrap(), GridShape { rows: 1, cols: 1 });
        assert_eq!(GridShape::for_channels(3).unwrap(), GridShape { rows: 1, cols: 3 });
        assert_eq!(GridShape::for_channels(64).unwrap(), GridShape { rows: 8, cols: 8 });
        assert_eq!(GridShape::for_channels(63).unwrap(), GridShape { rows: 7, cols: 9 });
    }
    #[test]
    fn every_channel_gets_a_cell() {
        for n in 1..200 {
            let grid = GridShape::for_channels(n).unwrap();
            assert!(grid.cell_count() >= n, "n = {n}");
        }
    }
    #[test]
    fn positions_are_row_major() {
        let grid = GridShape::for_channels(10).unwrap();
        assert_eq!(grid.position(0), (0, 0));
        assert_eq!(grid.position(3), (0, 3));
        assert_eq!(grid.position(4), (1, 0));
        assert_eq!(grid.position(9), (2, 1));
    }
    #[test]
    fn zero_channels_rejected() {
        assert!(GridShape::for_channels(0).unwrap_err().is_bounds());
    }
}
