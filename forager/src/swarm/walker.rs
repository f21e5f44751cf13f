use rand::Rng;
use rand_chacha::ChaCha8Rng;
use shared::{AgentFoodState, AgentId, ClosedRange, ForagingAgent, Vec2};
use std::f32;
use tracing::warn;

use super::Timer;
use crate::config::RunConfig;

// Heading jitter per tick (radians)
const WANDER_JITTER: f32 = 0.5;
const HOMING_JITTER: f32 = 0.3;

/// Region a walker may move in: the food arena plus the base behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkArea {
    pub x: ClosedRange,
    pub y: ClosedRange,
    pub base_x: f32,
}

impl WalkArea {
    #[inline(always)]
    pub fn in_base(&self, pos: Vec2) -> bool {
        pos.x <= self.base_x
    }
}

/// Scripted robot: wanders in the field, heads home with food, sometimes rests at the base.
#[derive(Debug, Clone)]
pub struct Walker {
    pub id: AgentId,
    pub pos: Vec2,
    pub rotation: f32,
    pub food: AgentFoodState,
    pub rest_timer: Option<Timer>,
}

impl Walker {
    pub fn new(id: AgentId, pos: Vec2, rotation: f32) -> Self {
        Self {
            id,
            pos,
            rotation,
            food: AgentFoodState::default(),
            rest_timer: None,
        }
    }

    /// Moves the walker by one tick.
    pub fn update(&mut self, area: &WalkArea, params: &RunConfig, rng: &mut ChaCha8Rng) {
        if let Some(timer) = self.rest_timer.as_mut() {
            timer.update();
            if timer.is_ready() {
                self.rest_timer = None;
            }
            return;
        }

        if self.food.has_food {
            // Head home (negative x)
            self.rotation = f32::consts::PI + rng.random_range(-HOMING_JITTER..=HOMING_JITTER);
        } else if area.in_base(self.pos) {
            if rng.random_bool(params.rest_probability as f64) {
                self.rest_timer = Some(Timer::new(params.rest_ticks, 0));
                return;
            }
            // Leave the base
            self.rotation = rng.random_range(-HOMING_JITTER..=HOMING_JITTER);
        } else {
            self.rotation = (self.rotation + rng.random_range(-WANDER_JITTER..=WANDER_JITTER))
                .rem_euclid(f32::consts::TAU);
        }

        self.update_position(area, params.step_length);
    }

    fn update_position(&mut self, area: &WalkArea, step_length: f32) {
        let (dy, dx) = self.rotation.sin_cos();
        let next = self.pos + Vec2::new(dx, dy) * step_length;

        if !next.is_finite() {
            warn!(
                "Walker {:?} calculated non-finite next position (rot:{:.2}). Movement aborted.",
                self.id, self.rotation
            );
            return;
        }

        let clamped = Vec2::new(area.x.clamp(next.x), area.y.clamp(next.y));
        if clamped != next {
            // Hit the boundary, turn around
            self.rotation = (self.rotation + f32::consts::PI).rem_euclid(f32::consts::TAU);
        }
        self.pos = clamped;
    }

    pub fn is_resting(&self) -> bool {
        self.rest_timer.is_some()
    }
}

impl ForagingAgent for Walker {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn is_resting(&self) -> bool {
        Walker::is_resting(self)
    }

    fn food_state(&self) -> &AgentFoodState {
        &self.food
    }

    fn food_state_mut(&mut self) -> &mut AgentFoodState {
        &mut self.food
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn area() -> WalkArea {
        WalkArea {
            x: ClosedRange::new(-1.7, 1.7),
            y: ClosedRange::new(-1.7, 1.7),
            base_x: -1.0,
        }
    }

    fn params() -> RunConfig {
        RunConfig {
            rest_probability: 0.0,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_walker_stays_in_area() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut walker = Walker::new(AgentId(0), Vec2::new(1.69, 1.69), 0.7);
        for _ in 0..2000 {
            walker.update(&area(), &params(), &mut rng);
            assert!(area().x.contains(walker.pos.x) && area().y.contains(walker.pos.y));
        }
    }

    #[test]
    fn test_carrying_walker_heads_home() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut walker = Walker::new(AgentId(0), Vec2::new(1.0, 0.0), 0.0);
        walker.food.pick_up(0);
        for _ in 0..10 {
            let before = walker.pos.x;
            walker.update(&area(), &params(), &mut rng);
            assert!(walker.pos.x < before);
        }
    }

    #[test]
    fn test_resting_walker_does_not_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut walker = Walker::new(AgentId(0), Vec2::new(-1.5, 0.0), 0.0);
        let always_rest = RunConfig {
            rest_probability: 1.0,
            rest_ticks: 5,
            ..RunConfig::default()
        };

        walker.update(&area(), &always_rest, &mut rng);
        assert!(walker.is_resting());
        for _ in 0..4 {
            walker.update(&area(), &always_rest, &mut rng);
            assert_eq!(walker.pos, Vec2::new(-1.5, 0.0));
        }
        walker.update(&area(), &always_rest, &mut rng);
        assert!(!walker.is_resting());
    }
}
