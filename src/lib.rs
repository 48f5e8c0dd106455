//! Line Bounce - a ball that pings off the screen edges and a line you draw
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, segment and wall collisions)
//! - `renderer`: WebGPU rendering pipeline and 2D drawing commands
//! - `audio`: Collision tones through the Web Audio API
//! - `settings`: Persisted user preferences and physics tuning

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{PhysicsParams, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Ball radius in pixels
    pub const BALL_RADIUS: f64 = 20.0;
    /// Ball spawn position
    pub const BALL_START_POS: (f64, f64) = (100.0, 100.0);
    /// Ball spawn velocity (pixels/tick)
    pub const BALL_START_VEL: (f64, f64) = (1.0, 1.0);

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f64 = 0.07;
    /// Local-y velocity factor on a segment hit (negative: reflects and amplifies)
    pub const SEGMENT_BOUNCE: f64 = -1.2;
    /// Velocity factor on a wall hit (applied after negation)
    pub const WALL_BOUNCE: f64 = 0.9;

    /// Flash opacity multiplier per tick
    pub const FLASH_DECAY: f64 = 0.9;
    /// Flash opacity never decays below this
    pub const FLASH_FLOOR: f64 = 0.3;

    /// Anchors kept by the recycler
    pub const ANCHOR_CAPACITY: usize = 2;
    /// Radius of the anchor markers
    pub const ANCHOR_MARKER_RADIUS: f32 = 30.0;
    /// Width of the segment and target lines
    pub const LINE_WIDTH: f32 = 4.0;

    /// Tone played on a segment hit (Hz)
    pub const SEGMENT_TONE_HZ: f32 = 440.0;
    /// Tone played on a wall hit (Hz)
    pub const WALL_TONE_HZ: f32 = 880.0;
    /// Length of each collision tone (seconds)
    pub const TONE_DURATION: f64 = 0.05;
}

/// Heading of the vector from `from` to `to`, in radians
#[inline]
pub fn heading(to: glam::DVec2, from: glam::DVec2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Rotate `v` by `-angle` given its precomputed cosine and sine
#[inline]
pub fn rotate_into(v: glam::DVec2, cos: f64, sin: f64) -> glam::DVec2 {
    glam::DVec2::new(cos * v.x + sin * v.y, cos * v.y - sin * v.x)
}

/// Rotate `v` by `+angle` given its precomputed cosine and sine
#[inline]
pub fn rotate_out_of(v: glam::DVec2, cos: f64, sin: f64) -> glam::DVec2 {
    glam::DVec2::new(cos * v.x - sin * v.y, cos * v.y + sin * v.x)
}
