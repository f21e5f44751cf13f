// Rest timer for walkers: counts ticks up from 0 to max_value.

#[derive(Debug, Clone)]
pub struct Timer {
    pub max_value: u32,
    pub value: u32,
}

impl Timer {
    /// Create a new timer with a max value and an initial value
    pub fn new(max_value: u32, initial_value: u32) -> Self {
        Self {
            max_value,
            value: initial_value,
        }
    }

    /// Returns true once the timer has reached the max value
    pub fn is_ready(&self) -> bool {
        self.value >= self.max_value
    }

    /// Advance the timer by one tick
    pub fn update(&mut self) {
        self.value = self.value.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_after_max_ticks() {
        let mut timer = Timer::new(3, 0);
        for _ in 0..2 {
            timer.update();
            assert!(!timer.is_ready());
        }
        timer.update();
        assert!(timer.is_ready());
    }

    #[test]
    fn test_zero_length_timer_is_ready() {
        assert!(Timer::new(0, 0).is_ready());
    }
}
