/// Index into a [`MaterialCatalog`](crate::MaterialCatalog).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

/// One occupied cell of the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileEntry {
    pub material: MaterialId,
    pub is_background: bool,
    /// Sprite variant picked when the tile was placed.
    pub variant: u16,
}

impl TileEntry {
    #[inline]
    pub const fn new(material: MaterialId, is_background: bool, variant: u16) -> Self {
        Self {
            material,
            is_background,
            variant,
        }
    }

    /// Foreground tiles are reported to physics as ground.
    #[inline]
    pub const fn is_collidable(&self) -> bool {
        !self.is_background
    }
}
