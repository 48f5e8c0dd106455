//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed per-tick increments only
//! - No rendering or platform dependencies
//! - Input arrives through `TickInput`, never from callbacks directly

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    circle_segment_intersects, detect_wall_collision, resolve_segment_collision,
    resolve_wall_collision, segment_heading,
};
pub use state::{Anchors, Ball, Bounds, CollisionEvent, SimState, WallSide};
pub use tick::{PointerInput, TickInput, step, tick};
