//! Frame composition
//!
//! Turns the simulation state into drawing commands, back to front:
//! background wash, anchor markers, segment and guide line, ball.

use super::graphics::Graphics;
use super::vertex::{Vertex, colors};
use crate::consts::{ANCHOR_MARKER_RADIUS, LINE_WIDTH};
use crate::settings::Settings;
use crate::sim::SimState;

/// Background alpha relative to the flash opacity
const BACKGROUND_ALPHA_SCALE: f32 = 0.2;

/// Build the vertex list for one frame, in screen pixels
pub fn draw_scene(state: &SimState, settings: &Settings) -> Vec<Vertex> {
    let mut g = Graphics::new();
    let opacity = settings.draw_opacity(state.opacity);

    g.begin_fill(colors::BACKGROUND, opacity * BACKGROUND_ALPHA_SCALE);
    g.draw_rect(
        0.0,
        0.0,
        state.bounds.width as f32,
        state.bounds.height as f32,
    );
    g.end_fill();

    for anchor in state.anchors.iter() {
        g.begin_fill(colors::ANCHOR, opacity);
        g.draw_circle(anchor.x as f32, anchor.y as f32, ANCHOR_MARKER_RADIUS);
        g.end_fill();
    }

    if let Some((a, b)) = state.anchors.segment() {
        g.line_style(LINE_WIDTH, colors::SEGMENT, opacity);
        g.move_to(a.x as f32, a.y as f32);
        g.line_to(b.x as f32, b.y as f32);

        // Guide from the newest anchor to the pointer
        g.line_style(LINE_WIDTH, colors::GUIDE, opacity);
        g.line_to(state.target_point.x as f32, state.target_point.y as f32);
    }

    g.begin_fill(colors::BALL, opacity);
    g.draw_circle(
        state.ball.pos.x as f32,
        state.ball.pos.y as f32,
        state.ball.radius as f32,
    );
    g.end_fill();

    g.into_vertices()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::shapes::circle_segments;
    use crate::renderer::vertex::rgba;
    use crate::settings::PhysicsParams;
    use crate::sim::{Bounds, step};
    use glam::DVec2;

    fn ball_vertex_count() -> usize {
        circle_segments(crate::consts::BALL_RADIUS as f32) as usize * 3
    }

    fn anchor_vertex_count() -> usize {
        circle_segments(ANCHOR_MARKER_RADIUS) as usize * 3
    }

    #[test]
    fn test_empty_scene_has_background_and_ball() {
        let state = SimState::new(Bounds::new(800.0, 600.0));
        let verts = draw_scene(&state, &Settings::default());

        assert_eq!(verts.len(), 6 + ball_vertex_count());
        // Background is first and uses the washed-out alpha
        assert_eq!(verts[0].color, rgba(colors::BACKGROUND, 0.3 * 0.2));
        assert_eq!(verts.last().map(|v| v.color), Some(rgba(colors::BALL, 0.3)));
    }

    #[test]
    fn test_single_anchor_draws_marker_but_no_segment() {
        let mut state = SimState::new(Bounds::new(800.0, 600.0));
        state.pointer_down(DVec2::new(100.0, 100.0));
        let verts = draw_scene(&state, &Settings::default());

        assert_eq!(verts.len(), 6 + anchor_vertex_count() + ball_vertex_count());
        assert!(!verts.iter().any(|v| v.color == rgba(colors::SEGMENT, 0.3)));
    }

    #[test]
    fn test_segment_and_guide_lines() {
        let mut state = SimState::new(Bounds::new(800.0, 600.0));
        state.pointer_down(DVec2::new(100.0, 400.0));
        state.pointer_down(DVec2::new(500.0, 400.0));
        state.pointer_move(DVec2::new(500.0, 200.0));
        let verts = draw_scene(&state, &Settings::default());

        let segment = verts
            .iter()
            .filter(|v| v.color == rgba(colors::SEGMENT, 0.3))
            .count();
        let guide = verts
            .iter()
            .filter(|v| v.color == rgba(colors::GUIDE, 0.3))
            .count();
        assert_eq!(segment, 6);
        assert_eq!(guide, 6);
    }

    #[test]
    fn test_ball_drawn_after_step_resolution() {
        let mut state = SimState::new(Bounds::new(800.0, 600.0));
        state.ball.pos = DVec2::new(785.0, 300.0);
        state.ball.vel = DVec2::new(4.0, 0.0);
        step(&mut state, &PhysicsParams::default());

        let verts = draw_scene(&state, &Settings::default());
        let ball = &verts[verts.len() - ball_vertex_count()..];

        // Clamped center, flash already decayed once
        assert_eq!(ball[0].position, [780.0, state.ball.pos.y as f32]);
        assert_eq!(ball[0].color, rgba(colors::BALL, 0.9));
        assert!(ball.iter().all(|v| v.position[0] <= 800.0 + 1e-3));
    }

    #[test]
    fn test_flash_disabled_uses_floor() {
        let mut state = SimState::new(Bounds::new(800.0, 600.0));
        state.opacity = 1.0;
        let settings = Settings {
            flash: false,
            ..Settings::default()
        };
        let verts = draw_scene(&state, &settings);
        assert_eq!(verts.last().map(|v| v.color), Some(rgba(colors::BALL, 0.3)));
    }
}
