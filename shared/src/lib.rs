mod api;
pub mod util;

pub use api::*;
pub use glam::Vec2;
pub use util::ClosedRange;
