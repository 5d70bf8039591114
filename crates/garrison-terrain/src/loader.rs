//! Level file parser.
//!
//! Level files are plain text: one line per grid row, one character per
//! cell. `#` brick, `@` stone, `~` water, `-` ice, `%` bush, `.` open
//! ground. Every level must be exactly 26 lines of 26 characters.

use std::io;
use std::path::Path;

use garrison_core::constants::{GRID_COLS, GRID_ROWS};
use garrison_core::enums::CellKind;

use crate::grid::LevelGrid;

/// Terrain denoted by one map character, or None for open ground.
fn cell_for_char(c: char) -> Result<Option<CellKind>, ()> {
    match c {
        '#' => Ok(Some(CellKind::Brick)),
        '@' => Ok(Some(CellKind::Stone)),
        '~' => Ok(Some(CellKind::Water)),
        '-' => Ok(Some(CellKind::Ice)),
        '%' => Ok(Some(CellKind::Bush)),
        '.' => Ok(None),
        _ => Err(()),
    }
}

/// Parse level text into a grid.
pub fn parse_level(text: &str) -> io::Result<LevelGrid> {
    let mut grid = LevelGrid::standard();
    let mut row_count = 0;

    for (row, line) in text.lines().enumerate() {
        if row >= GRID_ROWS {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Level has more than {GRID_ROWS} rows"),
            ));
        }

        let mut col_count = 0;
        for (col, c) in line.chars().enumerate() {
            if col >= GRID_COLS {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Row {row} has more than {GRID_COLS} cells"),
                ));
            }
            let kind = cell_for_char(c).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Unknown terrain character {c:?} at row {row}, col {col}"),
                )
            })?;
            grid.set_cell(row, col, kind);
            col_count += 1;
        }

        if col_count != GRID_COLS {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Row {row} has {col_count} cells, expected {GRID_COLS}"),
            ));
        }
        row_count += 1;
    }

    if row_count != GRID_ROWS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Level has {row_count} rows, expected {GRID_ROWS}"),
        ));
    }

    Ok(grid)
}

/// Load one level file.
pub fn load_level(path: &Path) -> io::Result<LevelGrid> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Cannot read level file {}: {e}", path.display()),
        )
    })?;
    parse_level(&text)
}
