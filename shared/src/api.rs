use glam::Vec2;

/// Stable identifier of an agent, assigned by whoever owns the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

/// Food-carrying record owned by each agent and updated by the arena once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentFoodState {
    pub has_food: bool,
    pub food_index: usize,     // only meaningful while has_food is set
    pub total_delivered: u32,
}

impl AgentFoodState {
    /// Records a pick-up of the food item at `index`.
    pub fn pick_up(&mut self, index: usize) {
        self.has_food = true;
        self.food_index = index;
    }

    /// Records a completed delivery.
    pub fn deliver(&mut self) {
        self.has_food = false;
        self.food_index = 0;
        self.total_delivered = self.total_delivered.saturating_add(1);
    }

    /// Forgets a carried item without counting it as delivered.
    pub fn drop_food(&mut self) {
        self.has_food = false;
        self.food_index = 0;
    }
}

/// What the arena needs to see of an agent.
///
/// Implemented by the agent population (robot controllers, scripted walkers, test
/// doubles). The arena reads `position` and `is_resting` and writes the food state
/// through `food_state_mut`; it never needs the concrete agent type.
pub trait ForagingAgent {
    fn id(&self) -> AgentId;

    fn position(&self) -> Vec2;

    /// Resting agents do not cost energy.
    fn is_resting(&self) -> bool;

    fn food_state(&self) -> &AgentFoodState;

    fn food_state_mut(&mut self) -> &mut AgentFoodState;
}
