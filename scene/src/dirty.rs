bitflags::bitflags! {
    /// Cached values on a [`Node`](crate::Node) that are stale and must be
    /// recomputed before their next use.
    ///
    /// The bits are independent: clearing one never implies anything about
    /// the others.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// The cached world matrix is stale.
        const WORLD = 1 << 0;
        /// The world-view-projection matrix is stale. Informational only;
        /// it is recomputed on every query.
        const WORLD_VIEW_PROJ = 1 << 1;
        /// The cached aggregate bounding volume is stale.
        const BOUNDS = 1 << 2;

        const ALL = Self::WORLD.bits() | Self::WORLD_VIEW_PROJ.bits() | Self::BOUNDS.bits();
    }
}
