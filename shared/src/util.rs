use std::fmt;

/// Closed real interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedRange {
    pub min: f32,
    pub max: f32,
}

impl ClosedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True when both bounds are finite and `min <= max`.
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    #[inline(always)]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline(always)]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

impl fmt::Display for ClosedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
