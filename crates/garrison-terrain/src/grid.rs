//! LevelGrid: the static obstacle layer of one level.

use garrison_core::constants::{GRID_COLS, GRID_ROWS, TILE_SIZE};
use garrison_core::enums::CellKind;
use garrison_core::types::Rect;
use glam::Vec2;

/// Terrain for one level: a row-major grid of optional obstacle cells.
/// Bushes are additionally mirrored into a registry so rendering and
/// piercing-shot checks never scan the whole grid.
#[derive(Debug, Clone)]
pub struct LevelGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<CellKind>>,
    bushes: Vec<(usize, usize)>,
}

impl LevelGrid {
    /// An all-open grid of the given dimensions.
    pub fn new_empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            bushes: Vec::new(),
        }
    }

    /// The standard battlefield size.
    pub fn standard() -> Self {
        Self::new_empty(GRID_ROWS, GRID_COLS)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Battlefield width in pixels.
    pub fn width_px(&self) -> f32 {
        (self.cols as u32 * TILE_SIZE) as f32
    }

    /// Battlefield height in pixels.
    pub fn height_px(&self) -> f32 {
        (self.rows as u32 * TILE_SIZE) as f32
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Terrain in one cell. Out-of-bounds reads as open ground.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellKind> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    /// Replace the terrain in one cell, keeping the bush registry in sync.
    /// Out-of-bounds writes are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, kind: Option<CellKind>) {
        if !self.in_bounds(row, col) {
            return;
        }
        let idx = row * self.cols + col;
        if self.cells[idx] == Some(CellKind::Bush) && kind != Some(CellKind::Bush) {
            self.bushes.retain(|&(r, c)| (r, c) != (row, col));
        }
        if kind == Some(CellKind::Bush) && self.cells[idx] != Some(CellKind::Bush) {
            self.bushes.push((row, col));
        }
        self.cells[idx] = kind;
    }

    /// Row-major cell storage, for snapshot building.
    pub fn cells(&self) -> &[Option<CellKind>] {
        &self.cells
    }

    /// Registry of bush cells, in insertion order.
    pub fn bushes(&self) -> &[(usize, usize)] {
        &self.bushes
    }

    /// Pixel rectangle covered by one cell.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let tile = TILE_SIZE as f32;
        Rect::new(col as f32 * tile, row as f32 * tile, tile, tile)
    }

    /// The cell containing a pixel point, if inside the grid.
    pub fn cell_at_point(&self, p: Vec2) -> Option<(usize, usize)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.width_px() || p.y >= self.height_px() {
            return None;
        }
        let tile = TILE_SIZE as f32;
        Some(((p.y / tile) as usize, (p.x / tile) as usize))
    }

    /// Inclusive row/column span of cells a rectangle touches, clamped
    /// to the grid. Returns None when the rectangle lies fully outside.
    pub fn cell_span(&self, rect: &Rect) -> Option<(usize, usize, usize, usize)> {
        if rect.right() <= 0.0
            || rect.bottom() <= 0.0
            || rect.x >= self.width_px()
            || rect.y >= self.height_px()
        {
            return None;
        }
        let tile = TILE_SIZE as f32;
        let r0 = (rect.y.max(0.0) / tile) as usize;
        let c0 = (rect.x.max(0.0) / tile) as usize;
        // Shrink by a hair so a rect flush on a cell edge does not
        // claim the next cell over.
        let r1 = (((rect.bottom() - 0.01).max(0.0)) / tile) as usize;
        let c1 = (((rect.right() - 0.01).max(0.0)) / tile) as usize;
        Some((
            r0.min(self.rows - 1),
            r1.min(self.rows - 1),
            c0.min(self.cols - 1),
            c1.min(self.cols - 1),
        ))
    }

    /// Cells forming the one-cell ring around a rectangle, in bounds only.
    /// Used to raise and restore the eagle's protective perimeter.
    pub fn perimeter_of(&self, rect: &Rect) -> Vec<(usize, usize)> {
        let Some((r0, r1, c0, c1)) = self.cell_span(rect) else {
            return Vec::new();
        };
        let mut ring = Vec::new();
        let lo_r = r0.checked_sub(1);
        let lo_c = c0.checked_sub(1);
        let hi_r = if r1 + 1 < self.rows { Some(r1 + 1) } else { None };
        let hi_c = if c1 + 1 < self.cols { Some(c1 + 1) } else { None };

        let col_start = lo_c.unwrap_or(c0);
        let col_end = hi_c.unwrap_or(c1);
        if let Some(top) = lo_r {
            for c in col_start..=col_end {
                ring.push((top, c));
            }
        }
        if let Some(bottom) = hi_r {
            for c in col_start..=col_end {
                ring.push((bottom, c));
            }
        }
        for r in r0..=r1 {
            if let Some(left) = lo_c {
                ring.push((r, left));
            }
            if let Some(right) = hi_c {
                ring.push((r, right));
            }
        }
        ring
    }

    /// Remove a bush cell. Returns false if the cell was not a bush.
    pub fn destroy_bush(&mut self, row: usize, col: usize) -> bool {
        if self.cell(row, col) != Some(CellKind::Bush) {
            return false;
        }
        self.set_cell(row, col, None);
        true
    }
}

/// Whether terrain of this kind stops a tank. Rafted tanks roll over water.
pub fn blocks_tank(kind: CellKind, has_boat: bool) -> bool {
    match kind {
        CellKind::Brick | CellKind::Stone => true,
        CellKind::Water => !has_boat,
        CellKind::Ice | CellKind::Bush => false,
    }
}

/// Whether terrain of this kind stops a bullet. Bushes only interact
/// with piercing shots and are handled separately.
pub fn blocks_bullet(kind: CellKind) -> bool {
    matches!(kind, CellKind::Brick | CellKind::Stone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_grid() -> LevelGrid {
        let mut grid = LevelGrid::standard();
        grid.set_cell(5, 5, Some(CellKind::Brick));
        grid.set_cell(5, 6, Some(CellKind::Stone));
        grid.set_cell(10, 10, Some(CellKind::Bush));
        grid.set_cell(10, 11, Some(CellKind::Bush));
        grid.set_cell(12, 3, Some(CellKind::Water));
        grid
    }

    #[test]
    fn test_cell_roundtrip() {
        let grid = make_test_grid();
        assert_eq!(grid.cell(5, 5), Some(CellKind::Brick));
        assert_eq!(grid.cell(5, 6), Some(CellKind::Stone));
        assert_eq!(grid.cell(0, 0), None);
        // Out of bounds reads as open ground
        assert_eq!(grid.cell(100, 100), None);
    }

    #[test]
    fn test_bush_registry_stays_in_sync() {
        let mut grid = make_test_grid();
        assert_eq!(grid.bushes().len(), 2);

        assert!(grid.destroy_bush(10, 10));
        assert_eq!(grid.bushes().len(), 1);
        assert_eq!(grid.cell(10, 10), None);

        // Destroying a non-bush is a no-op
        assert!(!grid.destroy_bush(5, 5));
        assert_eq!(grid.cell(5, 5), Some(CellKind::Brick));

        // Overwriting a bush with brick also removes it from the registry
        grid.set_cell(10, 11, Some(CellKind::Brick));
        assert!(grid.bushes().is_empty());
    }

    #[test]
    fn test_cell_rect() {
        let grid = make_test_grid();
        let r = grid.cell_rect(2, 3);
        assert_eq!(r.x, 48.0);
        assert_eq!(r.y, 32.0);
        assert_eq!(r.w, 16.0);
    }

    #[test]
    fn test_cell_at_point() {
        let grid = make_test_grid();
        assert_eq!(grid.cell_at_point(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(grid.cell_at_point(Vec2::new(47.9, 16.0)), Some((1, 2)));
        assert_eq!(grid.cell_at_point(Vec2::new(-1.0, 5.0)), None);
        assert_eq!(grid.cell_at_point(Vec2::new(416.0, 5.0)), None);
    }

    #[test]
    fn test_cell_span_clamps_to_grid() {
        let grid = make_test_grid();

        // A tank-sized box at the origin covers cells (0..1, 0..1)
        let span = grid.cell_span(&Rect::new(0.0, 0.0, 32.0, 32.0)).unwrap();
        assert_eq!(span, (0, 1, 0, 1));

        // Flush on a cell edge: does not claim the next column
        let span = grid.cell_span(&Rect::new(16.0, 0.0, 16.0, 16.0)).unwrap();
        assert_eq!(span, (0, 0, 1, 1));

        // Partially off the east edge clamps to the last column
        let span = grid.cell_span(&Rect::new(410.0, 0.0, 32.0, 16.0)).unwrap();
        assert_eq!(span.3, grid.cols() - 1);

        // Fully outside
        assert!(grid.cell_span(&Rect::new(500.0, 0.0, 8.0, 8.0)).is_none());
    }

    #[test]
    fn test_perimeter_ring() {
        let grid = make_test_grid();
        let ring = grid.perimeter_of(&Rect::new(192.0, 384.0, 32.0, 32.0));
        assert_eq!(ring.len(), 8, "box on the bottom edge loses its south row");

        // A 2x2-cell box in the open has the full 12-cell ring
        let ring = grid.perimeter_of(&Rect::new(192.0, 192.0, 32.0, 32.0));
        assert_eq!(ring.len(), 12);
        assert!(ring.contains(&(11, 11)));
        assert!(ring.contains(&(14, 14)));
        assert!(!ring.contains(&(12, 12)), "interior cells are not in the ring");
    }

    #[test]
    fn test_passability() {
        assert!(blocks_tank(CellKind::Brick, false));
        assert!(blocks_tank(CellKind::Stone, true));
        assert!(blocks_tank(CellKind::Water, false));
        assert!(!blocks_tank(CellKind::Water, true), "boat crosses water");
        assert!(!blocks_tank(CellKind::Ice, false));
        assert!(!blocks_tank(CellKind::Bush, false));

        assert!(blocks_bullet(CellKind::Brick));
        assert!(blocks_bullet(CellKind::Stone));
        assert!(!blocks_bullet(CellKind::Water));
        assert!(!blocks_bullet(CellKind::Bush));
    }
}
