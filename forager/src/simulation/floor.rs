/// Color of a floor point as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloorColor {
    Base,
    Food,
    Empty,
}

/// Repaint signal for the renderer. Raised whenever food moves, taken once per redraw.
#[derive(Debug, Default)]
pub struct FloorFlag {
    changed: bool,
}

impl FloorFlag {
    #[inline(always)]
    pub fn set_changed(&mut self) {
        self.changed = true;
    }

    /// Returns whether a repaint is pending and clears the flag.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}
