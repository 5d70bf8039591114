//! Built-in campaign levels and the ordered level list.

use std::io;
use std::path::Path;

use crate::grid::LevelGrid;
use crate::loader::{load_level, parse_level};

/// Ordered list of levels making up one campaign.
#[derive(Debug, Clone)]
pub struct LevelSet {
    grids: Vec<LevelGrid>,
}

impl LevelSet {
    pub fn new(grids: Vec<LevelGrid>) -> Self {
        Self { grids }
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelGrid> {
        self.grids.get(index)
    }

    /// Load a set from level files, in the order given.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> io::Result<LevelSet> {
        let mut grids = Vec::with_capacity(paths.len());
        for path in paths {
            grids.push(load_level(path.as_ref())?);
        }
        Ok(LevelSet::new(grids))
    }
}

/// The three embedded campaign levels.
pub fn builtin() -> io::Result<LevelSet> {
    let sources = [
        include_str!("../assets/level-1.txt"),
        include_str!("../assets/level-2.txt"),
        include_str!("../assets/level-3.txt"),
    ];
    let mut grids = Vec::with_capacity(sources.len());
    for (i, text) in sources.iter().enumerate() {
        let grid = parse_level(text).map_err(|e| {
            io::Error::new(e.kind(), format!("Embedded level {} is invalid: {e}", i + 1))
        })?;
        grids.push(grid);
    }
    Ok(LevelSet::new(grids))
}
