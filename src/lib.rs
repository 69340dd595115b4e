//! Slice World - simulation core for a 2D slicing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, blade collision, power states)
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory leaderboard fed by game-over events
//!
//! Rendering, DOM/UI, raw input capture and storage live outside this crate.
//! The host feeds play-field coordinates and timestamps in, and drains
//! [`sim::GameEvent`]s and render snapshots out.

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default play-field dimensions (portrait phone)
    pub const DEFAULT_FIELD_WIDTH: f32 = 400.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 800.0;

    /// Points per sliced object
    pub const EARTH_POINTS: u32 = 1;
    pub const GOLD_POINTS: u32 = 5;
    pub const NEPTUNE_POINTS: u32 = 3;
    /// Alien points are rolled in [ALIEN_POINTS_MIN, ALIEN_POINTS_MAX]
    pub const ALIEN_POINTS_MIN: u32 = 5;
    pub const ALIEN_POINTS_MAX: u32 = 15;

    /// Spawn margin beyond the object's own size
    pub const SPAWN_MARGIN_PAD: f32 = 10.0;

    /// Bottom launch: speed range and angle band (degrees from +x axis)
    pub const BOTTOM_SPEED_MIN: f32 = 1050.0;
    pub const BOTTOM_SPEED_RANGE: f32 = 150.0;
    pub const BOTTOM_ANGLE_MIN_DEG: f32 = -115.0;
    pub const BOTTOM_ANGLE_MAX_DEG: f32 = -65.0;

    /// Top drop: initial downward speed and horizontal drift
    pub const TOP_SPEED_MIN: f32 = 220.0;
    pub const TOP_SPEED_RANGE: f32 = 120.0;
    pub const TOP_DRIFT_MAX: f32 = 140.0;

    /// Side throw: speed range
    pub const SIDE_SPEED_MIN: f32 = 700.0;
    pub const SIDE_SPEED_RANGE: f32 = 120.0;

    /// Max spawn spin (degrees/sec, either direction)
    pub const SPAWN_SPIN_DEG: f32 = 360.0;

    /// Split piece kicks (added to parent velocity)
    pub const PIECE_KICK_X: f32 = 250.0;
    pub const PIECE_KICK_Y: f32 = -200.0;
    pub const GOLD_PIECE_KICK_X: f32 = 260.0;
    pub const GOLD_PIECE_KICK_Y: f32 = -220.0;
    /// Gold pieces are drawn at half size
    pub const GOLD_PIECE_SCALE: f32 = 0.5;
    /// Max piece spin (radians/sec, either direction)
    pub const PIECE_SPIN: f32 = 2.0;
    pub const GOLD_PIECE_SPIN: f32 = 4.0;
}

/// Distance between two points
#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_point(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}
