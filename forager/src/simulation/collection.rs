use shared::ForagingAgent;
use tracing::{debug, warn};

use super::food::{FoodRegistry, Placement};

/// What happened to one agent's food during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOutcome {
    Nothing,
    Collected(usize),
    Delivered(usize),
}

impl CollectionOutcome {
    /// True when food moved and the floor needs repainting.
    pub fn moved_food(&self) -> bool {
        !matches!(self, CollectionOutcome::Nothing)
    }
}

/// Runs pick-up and delivery for a single agent.
///
/// A carrying agent at or behind the base threshold delivers its item, which is put back
/// somewhere in the arena. An empty-handed agent out in the field claims the first item
/// (by index) within the collection radius. A claimed item is re-tagged as carried before
/// returning, so agents processed later in the same tick cannot see it.
pub fn process_agent<A>(registry: &mut FoodRegistry, agent: &mut A) -> CollectionOutcome
where
    A: ForagingAgent + ?Sized,
{
    let pos = agent.position();
    let base_x = registry.bounds().base_x;
    let id = agent.id();

    if agent.food_state().has_food {
        if pos.x > base_x {
            return CollectionOutcome::Nothing;
        }

        let index = agent.food_state().food_index;
        match registry.get(index).map(|item| item.placement) {
            Some(Placement::Carried(carrier)) if carrier == id => {}
            // The item went back on the floor in a reset while this agent held it.
            Some(Placement::Active(_)) => {
                debug!(agent = id.0, index, "stale carry dropped");
                agent.food_state_mut().drop_food();
                return CollectionOutcome::Nothing;
            }
            other => {
                warn!(
                    "Agent {:?} claims to carry food item {} but the registry holds it as {:?}; \
                     dropping it",
                    id, index, other
                );
                agent.food_state_mut().drop_food();
                return CollectionOutcome::Nothing;
            }
        }

        registry.relocate(index);
        agent.food_state_mut().deliver();
        debug!(agent = id.0, index, "food delivered");
        return CollectionOutcome::Delivered(index);
    }

    if pos.x <= base_x {
        return CollectionOutcome::Nothing;
    }

    match registry.first_within_radius(pos) {
        Some(index) => {
            registry.park_as_carried(index, id);
            agent.food_state_mut().pick_up(index);
            debug!(agent = id.0, index, "food collected");
            CollectionOutcome::Collected(index)
        }
        None => CollectionOutcome::Nothing,
    }
}
