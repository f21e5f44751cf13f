use rand::Rng;
use rand_chacha::ChaCha8Rng;
use shared::{AgentId, ClosedRange, Vec2};

use super::FloorColor;

/// Where a food item currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Lying in the arena, collectible.
    Active(Vec2),
    /// Held by one agent until it reaches the base.
    Carried(AgentId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodItem {
    pub placement: Placement,
    pub age: u32,
}

impl FoodItem {
    #[inline(always)]
    pub fn position(&self) -> Option<Vec2> {
        match self.placement {
            Placement::Active(pos) => Some(pos),
            Placement::Carried(_) => None,
        }
    }
}

/// Region where food is placed plus the x threshold of the base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub x: ClosedRange,
    pub y: ClosedRange,
    pub base_x: f32,
}

impl ArenaBounds {
    #[inline(always)]
    pub fn contains(&self, pos: Vec2) -> bool {
        self.x.contains(pos.x) && self.y.contains(pos.y)
    }
}

/// Fixed-size set of food items with their ages.
///
/// Indices are stable for the whole run: agents refer to the item they carry by index,
/// so items are only ever moved, never added or removed.
pub struct FoodRegistry {
    items: Vec<FoodItem>,
    bounds: ArenaBounds,
    square_radius: f32,
    despawn_ticks: u32,
    rng: ChaCha8Rng,
}

impl FoodRegistry {
    /// Places `count` items uniformly at random inside `bounds`, all aged 0.
    pub fn new(
        count: usize,
        bounds: ArenaBounds,
        radius: f32,
        despawn_ticks: u32,
        rng: ChaCha8Rng,
    ) -> Self {
        debug_assert!(bounds.x.is_valid() && bounds.y.is_valid());
        let mut registry = Self {
            items: Vec::with_capacity(count),
            bounds,
            square_radius: radius * radius,
            despawn_ticks,
            rng,
        };
        for _ in 0..count {
            let pos = registry.random_position();
            registry.items.push(FoodItem {
                placement: Placement::Active(pos),
                age: 0,
            });
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&FoodItem> {
        self.items.get(index)
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    pub fn square_radius(&self) -> f32 {
        self.square_radius
    }

    fn random_position(&mut self) -> Vec2 {
        let x = self.rng.random_range(self.bounds.x.min..=self.bounds.x.max);
        let y = self.rng.random_range(self.bounds.y.min..=self.bounds.y.max);
        Vec2::new(x, y)
    }

    pub fn age_all(&mut self) {
        for item in &mut self.items {
            item.age = item.age.saturating_add(1);
        }
    }

    /// Relocates every active item that reached the despawn age.
    /// Carried items are left alone whatever their age. Returns how many items moved.
    pub fn despawn_expired(&mut self) -> usize {
        let mut moved = 0;
        for index in 0..self.items.len() {
            let item = &self.items[index];
            if item.age >= self.despawn_ticks && matches!(item.placement, Placement::Active(_)) {
                self.relocate(index);
                moved += 1;
            }
        }
        moved
    }

    /// Puts item `index` back on the floor at a fresh random position, age 0.
    pub fn relocate(&mut self, index: usize) {
        let pos = self.random_position();
        let item = &mut self.items[index];
        item.placement = Placement::Active(pos);
        item.age = 0;
    }

    /// Takes item `index` off the floor on behalf of `agent`, age 0.
    pub fn park_as_carried(&mut self, index: usize, agent: AgentId) {
        let item = &mut self.items[index];
        debug_assert!(
            matches!(item.placement, Placement::Active(_)),
            "food item {} claimed while already carried",
            index
        );
        item.placement = Placement::Carried(agent);
        item.age = 0;
    }

    /// Lowest-index active item strictly within the collection radius of `pos`.
    pub fn first_within_radius(&self, pos: Vec2) -> Option<usize> {
        self.items.iter().position(|item| match item.placement {
            Placement::Active(food_pos) => food_pos.distance_squared(pos) < self.square_radius,
            Placement::Carried(_) => false,
        })
    }

    /// Redraws every item inside the bounds, age 0.
    pub fn reset(&mut self) {
        for index in 0..self.items.len() {
            self.relocate(index);
        }
    }

    pub fn query_floor_color(&self, pos: Vec2) -> FloorColor {
        if pos.x < self.bounds.base_x {
            return FloorColor::Base;
        }
        if self.first_within_radius(pos).is_some() {
            return FloorColor::Food;
        }
        FloorColor::Empty
    }
}
