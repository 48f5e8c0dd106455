//! Per-frame simulation step
//!
//! One step per display refresh. Velocities are per-tick increments, so the
//! simulation speed follows the frame rate rather than wall-clock time.

use glam::DVec2;

use super::collision::{
    circle_segment_intersects, detect_wall_collision, resolve_segment_collision,
    resolve_wall_collision,
};
use super::state::{CollisionEvent, SimState};
use crate::settings::PhysicsParams;

/// A pointer event, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Press: move the target and place an anchor
    Down(DVec2),
    /// Move: the guide line follows
    Move(DVec2),
}

/// Input gathered since the previous tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer events, in arrival order
    pub events: Vec<PointerInput>,
}

impl TickInput {
    pub fn pointer_down(&mut self, point: DVec2) {
        self.events.push(PointerInput::Down(point));
    }

    /// Consecutive moves collapse into the latest one
    pub fn pointer_move(&mut self, point: DVec2) {
        if let Some(PointerInput::Move(last)) = self.events.last_mut() {
            *last = point;
        } else {
            self.events.push(PointerInput::Move(point));
        }
    }

    /// Drop everything consumed by a tick
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Advance the simulation by one tick
///
/// Order: segment collision, gravity, wall collision, flash decay. Each check
/// runs at most once, so the result of one resolution is not re-tested
/// against the other obstacle.
pub fn step(state: &mut SimState, params: &PhysicsParams) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    // Segment
    if let Some((a, b)) = state.anchors.segment() {
        if circle_segment_intersects(a, b, state.ball.pos, state.ball.radius) {
            resolve_segment_collision(&mut state.ball, a, b, params.segment_bounce);
            state.flash();
            events.push(CollisionEvent::Segment);
        }
    }

    // Gravity (symplectic Euler)
    state.ball.vel.y += params.gravity;
    state.ball.pos += state.ball.vel;

    // Walls
    if let Some(side) = detect_wall_collision(&state.ball, &state.bounds) {
        resolve_wall_collision(&mut state.ball, side, &state.bounds, params.wall_bounce);
        state.flash();
        events.push(CollisionEvent::Wall(side));
    }

    state.opacity = (state.opacity * params.flash_decay).max(params.flash_floor);
    state.time_ticks += 1;

    for event in &events {
        log::debug!(
            "tick {}: {:?} at ({:.1}, {:.1}) speed {:.2}",
            state.time_ticks,
            event,
            state.ball.pos.x,
            state.ball.pos.y,
            state.ball.vel.length()
        );
    }

    events
}

/// Apply buffered input, then step
pub fn tick(state: &mut SimState, input: &TickInput, params: &PhysicsParams) -> Vec<CollisionEvent> {
    for event in &input.events {
        match *event {
            PointerInput::Down(point) => state.pointer_down(point),
            PointerInput::Move(point) => state.pointer_move(point),
        }
    }

    step(state, params)
}
