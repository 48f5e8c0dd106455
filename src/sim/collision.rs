//! Collision detection and response
//!
//! Two kinds of obstacle: the user-drawn segment, resolved by rotating the
//! ball into the segment's frame, and the four screen edges, resolved by
//! clamping and damping one axis.

use glam::DVec2;

use super::state::{Ball, Bounds, WallSide};
use crate::{heading, rotate_into, rotate_out_of};

/// Whether a point lies inside or on a circle
#[inline]
pub fn point_in_circle(point: DVec2, center: DVec2, radius: f64) -> bool {
    (point - center).length_squared() <= radius * radius
}

/// Closest point to `center` on the infinite line through `a` and `b`,
/// returned as the offset from `a`
#[inline]
fn project_onto_line(a: DVec2, b: DVec2, center: DVec2) -> DVec2 {
    let d = b - a;
    let len_sq = d.length_squared();
    if len_sq > 0.0 {
        d * ((center - a).dot(d) / len_sq)
    } else {
        d
    }
}

/// Check whether a circle intersects the segment `a`-`b`
///
/// Endpoints inside the circle count as a hit. Otherwise the circle center is
/// projected onto the segment's line and the hit requires the projection to
/// land within the segment and within the circle.
pub fn circle_segment_intersects(a: DVec2, b: DVec2, center: DVec2, radius: f64) -> bool {
    if point_in_circle(a, center, radius) || point_in_circle(b, center, radius) {
        return true;
    }

    let d = b - a;
    let p = project_onto_line(a, b, center);
    let nearest = a + p;

    point_in_circle(nearest, center, radius)
        && p.length_squared() <= d.length_squared()
        && p.dot(d) >= 0.0
}

/// Segment heading, pointing toward whichever endpoint has the larger x
///
/// Always in `[-π/2, π/2]`, so swapping `a` and `b` gives the same frame.
pub fn segment_heading(a: DVec2, b: DVec2) -> f64 {
    if a.x > b.x { heading(a, b) } else { heading(b, a) }
}

/// Bounce the ball off the segment `a`-`b`
///
/// Works in the segment's local frame (origin at `a`, x along the heading):
/// the ball is pinned tangent to the line at local y = -radius and its local
/// y velocity is scaled by `bounce`.
pub fn resolve_segment_collision(ball: &mut Ball, a: DVec2, b: DVec2, bounce: f64) {
    let (sin, cos) = segment_heading(a, b).sin_cos();

    let local_pos = rotate_into(ball.pos - a, cos, sin);
    let mut local_vel = rotate_into(ball.vel, cos, sin);

    let local_pos = DVec2::new(local_pos.x, -ball.radius);
    local_vel.y *= bounce;

    ball.vel = rotate_out_of(local_vel, cos, sin);
    ball.pos = a + rotate_out_of(local_pos, cos, sin);
}

/// Find the first screen edge the ball touches
///
/// Checked in order right, left, bottom, top. A corner hit reports one side.
pub fn detect_wall_collision(ball: &Ball, bounds: &Bounds) -> Option<WallSide> {
    let pos = ball.pos;
    let r = ball.radius;

    if pos.x + r >= bounds.width {
        Some(WallSide::Right)
    } else if pos.x - r <= 0.0 {
        Some(WallSide::Left)
    } else if pos.y + r >= bounds.height {
        Some(WallSide::Bottom)
    } else if pos.y - r <= 0.0 {
        Some(WallSide::Top)
    } else {
        None
    }
}

/// Push the ball back inside and reverse the offending velocity component
pub fn resolve_wall_collision(ball: &mut Ball, side: WallSide, bounds: &Bounds, wall_bounce: f64) {
    let r = ball.radius;
    match side {
        WallSide::Right => {
            ball.pos.x = bounds.width - r;
            ball.vel.x = -ball.vel.x * wall_bounce;
        }
        WallSide::Left => {
            ball.pos.x = r;
            ball.vel.x = -ball.vel.x * wall_bounce;
        }
        WallSide::Bottom => {
            ball.pos.y = bounds.height - r;
            ball.vel.y = -ball.vel.y * wall_bounce;
        }
        WallSide::Top => {
            ball.pos.y = r;
            ball.vel.y = -ball.vel.y * wall_bounce;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_circle_segment_hit_from_above() {
        let a = DVec2::new(0.0, 100.0);
        let b = DVec2::new(200.0, 100.0);
        assert!(circle_segment_intersects(a, b, DVec2::new(100.0, 81.0), 20.0));
        assert!(!circle_segment_intersects(a, b, DVec2::new(100.0, 79.0), 20.0));
    }

    #[test]
    fn test_circle_segment_touching_counts() {
        let a = DVec2::new(0.0, 100.0);
        let b = DVec2::new(200.0, 100.0);
        assert!(circle_segment_intersects(a, b, DVec2::new(100.0, 80.0), 20.0));
    }

    #[test]
    fn test_circle_segment_miss_beyond_ends() {
        let a = DVec2::new(0.0, 100.0);
        let b = DVec2::new(200.0, 100.0);
        // On the line but past b, further than the radius from it
        assert!(!circle_segment_intersects(a, b, DVec2::new(230.0, 100.0), 20.0));
        // Past a
        assert!(!circle_segment_intersects(a, b, DVec2::new(-30.0, 95.0), 20.0));
    }

    #[test]
    fn test_circle_segment_endpoint_inside() {
        let a = DVec2::new(0.0, 100.0);
        let b = DVec2::new(200.0, 100.0);
        assert!(circle_segment_intersects(a, b, DVec2::new(210.0, 105.0), 20.0));
    }

    #[test]
    fn test_circle_segment_degenerate() {
        let a = DVec2::new(50.0, 50.0);
        assert!(circle_segment_intersects(a, a, DVec2::new(60.0, 50.0), 20.0));
        assert!(!circle_segment_intersects(a, a, DVec2::new(90.0, 50.0), 20.0));
    }

    #[test]
    fn test_segment_heading_ignores_click_order() {
        let a = DVec2::new(10.0, 40.0);
        let b = DVec2::new(110.0, 140.0);
        let h = segment_heading(a, b);
        assert_eq!(h, segment_heading(b, a));
        assert!((h - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_segment_horizontal() {
        let a = DVec2::new(0.0, 100.0);
        let b = DVec2::new(200.0, 100.0);
        let mut ball = Ball::new(DVec2::new(100.0, 81.0), DVec2::new(0.0, 5.0));

        resolve_segment_collision(&mut ball, a, b, SEGMENT_BOUNCE);

        assert_eq!(ball.pos, DVec2::new(100.0, 80.0));
        assert_eq!(ball.vel.x, 0.0);
        assert!((ball.vel.y - (-6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_segment_reversed_clicks_same_result() {
        let a = DVec2::new(0.0, 100.0);
        let b = DVec2::new(200.0, 100.0);
        let mut ball = Ball::new(DVec2::new(100.0, 81.0), DVec2::new(0.0, 5.0));
        // Local origin moves with the first anchor; heading does not
        resolve_segment_collision(&mut ball, b, a, SEGMENT_BOUNCE);

        assert!((ball.pos.y - 80.0).abs() < 1e-12);
        assert!((ball.vel.y - (-6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_segment_diagonal_reflects_normal_component() {
        // 45° line; a ball moving straight down should leave moving up-right
        // in screen space with a larger speed
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(100.0, 100.0);
        let mut ball = Ball::new(DVec2::new(60.0, 40.0), DVec2::new(0.0, 2.0));

        resolve_segment_collision(&mut ball, a, b, SEGMENT_BOUNCE);

        assert!(ball.vel.x > 0.0);
        assert!(ball.vel.y < 2.0);
        // Tangential part (1.414) kept, normal part (1.414) scaled by 1.2
        let expected_speed = (2.0f64 + 2.0 * 1.44).sqrt();
        assert!((ball.vel.length() - expected_speed).abs() < 1e-9);
        // Ball center sits exactly one radius from the line
        let dist = (ball.pos.x - ball.pos.y).abs() / 2.0f64.sqrt();
        assert!((dist - BALL_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_wall_right() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut ball = Ball::new(DVec2::new(785.0, 300.0), DVec2::new(3.0, 0.0));
        let side = detect_wall_collision(&ball, &bounds);
        assert_eq!(side, Some(WallSide::Right));

        resolve_wall_collision(&mut ball, WallSide::Right, &bounds, WALL_BOUNCE);
        assert_eq!(ball.pos.x, 780.0);
        assert_eq!(ball.vel.x, -3.0 * WALL_BOUNCE);
    }

    #[test]
    fn test_wall_each_side() {
        let bounds = Bounds::new(800.0, 600.0);
        let cases = [
            (DVec2::new(10.0, 300.0), WallSide::Left, DVec2::new(20.0, 300.0)),
            (DVec2::new(400.0, 590.0), WallSide::Bottom, DVec2::new(400.0, 580.0)),
            (DVec2::new(400.0, 5.0), WallSide::Top, DVec2::new(400.0, 20.0)),
        ];
        for (pos, expected_side, expected_pos) in cases {
            let mut ball = Ball::new(pos, DVec2::new(-2.0, 2.0));
            let side = detect_wall_collision(&ball, &bounds);
            assert_eq!(side, Some(expected_side));
            resolve_wall_collision(&mut ball, expected_side, &bounds, WALL_BOUNCE);
            assert_eq!(ball.pos, expected_pos);
        }
    }

    #[test]
    fn test_wall_priority_right_before_bottom() {
        let bounds = Bounds::new(800.0, 600.0);
        let ball = Ball::new(DVec2::new(790.0, 590.0), DVec2::new(1.0, 1.0));
        assert_eq!(detect_wall_collision(&ball, &bounds), Some(WallSide::Right));
    }

    #[test]
    fn test_no_wall_inside() {
        let bounds = Bounds::new(800.0, 600.0);
        let ball = Ball::new(DVec2::new(400.0, 300.0), DVec2::new(1.0, 1.0));
        assert_eq!(detect_wall_collision(&ball, &bounds), None);
    }

    proptest! {
        #[test]
        fn prop_heading_in_half_plane(
            ax in -1000.0f64..1000.0,
            ay in -1000.0f64..1000.0,
            bx in -1000.0f64..1000.0,
            by in -1000.0f64..1000.0,
        ) {
            let h = segment_heading(DVec2::new(ax, ay), DVec2::new(bx, by));
            prop_assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&h));
        }

        #[test]
        fn prop_wall_resolution_clamps_axis(
            x in -100.0f64..900.0,
            y in 100.0f64..500.0,
            vx in -20.0f64..20.0,
        ) {
            let bounds = Bounds::new(800.0, 600.0);
            let mut ball = Ball::new(DVec2::new(x, y), DVec2::new(vx, 0.0));
            if let Some(side) = detect_wall_collision(&ball, &bounds) {
                resolve_wall_collision(&mut ball, side, &bounds, WALL_BOUNCE);
                prop_assert!(ball.pos.x >= BALL_RADIUS);
                prop_assert!(ball.pos.x <= 800.0 - BALL_RADIUS);
                prop_assert!(ball.vel.length() <= vx.abs() + 1e-12);
            }
        }
    }
}
