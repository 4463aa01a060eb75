use strata_tiles::TileEntry;

/// A grid mutation, recorded so renderers and physics can diff their own
/// objects against the grid instead of the grid owning them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileChange {
    Placed { x: i32, y: i32, entry: TileEntry },
    Removed { x: i32, y: i32, entry: TileEntry },
}

impl TileChange {
    #[inline]
    pub fn coord(&self) -> (i32, i32) {
        match *self {
            TileChange::Placed { x, y, .. } | TileChange::Removed { x, y, .. } => (x, y),
        }
    }

    #[inline]
    pub fn entry(&self) -> TileEntry {
        match *self {
            TileChange::Placed { entry, .. } | TileChange::Removed { entry, .. } => entry,
        }
    }
}
