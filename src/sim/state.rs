//! Simulation state and core types
//!
//! Everything the frame loop mutates lives in [`SimState`], so a run can be
//! replayed tick by tick without a renderer or audio device.

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which screen edge the ball hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Right,
    Left,
    Bottom,
    Top,
}

/// Something the ball bounced off during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// Ball hit the user-drawn segment
    Segment,
    /// Ball hit a screen edge
    Wall(WallSide),
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    /// Velocity in pixels/tick (not normalized)
    pub vel: DVec2,
    pub radius: f64,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: DVec2::new(BALL_START_POS.0, BALL_START_POS.1),
            vel: DVec2::new(BALL_START_VEL.0, BALL_START_VEL.1),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    pub fn new(pos: DVec2, vel: DVec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }
}

/// Arena size in pixels, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// User-placed segment endpoints, oldest first
///
/// Holds at most [`ANCHOR_CAPACITY`] points; placing another drops the oldest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    points: VecDeque<DVec2>,
}

impl Anchors {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(ANCHOR_CAPACITY),
        }
    }

    /// Place an anchor, recycling the oldest one when full
    pub fn place(&mut self, point: DVec2) {
        if self.points.len() >= ANCHOR_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// The active segment, in placement order
    pub fn segment(&self) -> Option<(DVec2, DVec2)> {
        match (self.points.front(), self.points.get(1)) {
            (Some(&a), Some(&b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec2> {
        self.points.iter()
    }
}

/// Complete frame-loop state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub ball: Ball,
    pub anchors: Anchors,
    pub bounds: Bounds,
    /// Collision flash, in `[FLASH_FLOOR, 1.0]`
    pub opacity: f64,
    /// Last pointer position (end of the guide line)
    pub target_point: DVec2,
    /// Last pointer-down position
    pub previous_target_point: DVec2,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            ball: Ball::default(),
            anchors: Anchors::new(),
            bounds,
            opacity: FLASH_FLOOR,
            target_point: DVec2::new(300.0, 300.0),
            previous_target_point: DVec2::new(200.0, 200.0),
            time_ticks: 0,
        }
    }

    /// Pointer pressed: move the target and drop an anchor there
    pub fn pointer_down(&mut self, point: DVec2) {
        self.previous_target_point = point;
        self.target_point = point;
        self.anchors.place(point);
    }

    /// Pointer moved: the guide line follows
    pub fn pointer_move(&mut self, point: DVec2) {
        self.target_point = point;
    }

    /// Mark a collision for the visual flash
    pub fn flash(&mut self) {
        self.opacity = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_recycling_keeps_latest_two() {
        let mut anchors = Anchors::new();
        let p1 = DVec2::new(10.0, 10.0);
        let p2 = DVec2::new(20.0, 20.0);
        let p3 = DVec2::new(30.0, 30.0);

        anchors.place(p1);
        assert_eq!(anchors.segment(), None);

        anchors.place(p2);
        assert_eq!(anchors.segment(), Some((p1, p2)));

        anchors.place(p3);
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors.segment(), Some((p2, p3)));
    }

    #[test]
    fn test_pointer_down_moves_target_and_places_anchor() {
        let mut state = SimState::new(Bounds::new(800.0, 600.0));
        let p = DVec2::new(42.0, 17.0);

        state.pointer_down(p);
        assert_eq!(state.target_point, p);
        assert_eq!(state.previous_target_point, p);
        assert_eq!(state.anchors.len(), 1);

        let q = DVec2::new(5.0, 6.0);
        state.pointer_move(q);
        assert_eq!(state.target_point, q);
        assert_eq!(state.previous_target_point, p);
        assert_eq!(state.anchors.len(), 1);
    }

    #[test]
    fn test_initial_state() {
        let state = SimState::new(Bounds::new(800.0, 600.0));
        assert_eq!(state.ball.pos, DVec2::new(100.0, 100.0));
        assert_eq!(state.ball.vel, DVec2::new(1.0, 1.0));
        assert_eq!(state.ball.radius, BALL_RADIUS);
        assert_eq!(state.opacity, FLASH_FLOOR);
        assert!(state.anchors.is_empty());
    }
}
