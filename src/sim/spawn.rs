//! Object factory
//!
//! Builds launched objects from a kind, the field size and a set of random
//! draws, and builds the two debris pieces of a sliced object.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::speed_scale;
use super::object::{MovingObject, ObjectKind, PieceSide};
use crate::consts::*;

/// Field edge an object enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEdge {
    Bottom,
    Top,
    Left,
    Right,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Bottom,
        SpawnEdge::Top,
        SpawnEdge::Left,
        SpawnEdge::Right,
    ];
}

/// Random inputs for one launch
#[derive(Debug, Clone, Copy)]
pub struct LaunchRolls {
    pub edge: SpawnEdge,
    /// Speed variance in [0, 1)
    pub speed: f32,
    /// Position variance in [0, 1); also steers the launch angle
    pub position: f32,
    /// Spin in [-1, 1)
    pub spin: f32,
}

impl LaunchRolls {
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self {
            edge: SpawnEdge::ALL[rng.random_range(0..SpawnEdge::ALL.len())],
            speed: rng.random(),
            position: rng.random(),
            spin: rng.random_range(-1.0..1.0),
        }
    }
}

/// Base object size for a field, following its orientation
pub fn base_object_size(field: Vec2) -> f32 {
    let w = field.x;
    let (min, max, target) = if field.y >= w {
        (0.12, 0.18, 0.15)
    } else {
        (0.05, 0.08, 0.065)
    };
    (w * target)
        .round()
        .clamp((w * min).round(), (w * max).round())
}

/// Size of a freshly launched object of `kind`
#[inline]
pub fn object_size(kind: ObjectKind, base_size: f32) -> f32 {
    (base_size * kind.size_multiplier()).round()
}

/// Initial position and velocity for a launch from `rolls.edge`
pub fn launch_motion(field: Vec2, size: f32, score: u32, rolls: &LaunchRolls) -> (Vec2, Vec2) {
    let scale = speed_scale(score);
    let margin = size + SPAWN_MARGIN_PAD;
    let LaunchRolls {
        speed: spd,
        position: pos,
        ..
    } = *rolls;

    match rolls.edge {
        SpawnEdge::Bottom => {
            let x = margin + pos * (field.x - margin * 2.0);
            let speed = (BOTTOM_SPEED_MIN + spd * BOTTOM_SPEED_RANGE) * scale;
            let min_angle = BOTTOM_ANGLE_MIN_DEG.to_radians();
            let max_angle = BOTTOM_ANGLE_MAX_DEG.to_radians();
            let angle = min_angle + pos * (max_angle - min_angle);
            (
                Vec2::new(x, field.y + margin),
                Vec2::new(angle.cos(), angle.sin()) * speed,
            )
        }
        SpawnEdge::Top => {
            let x = margin + pos * (field.x - margin * 2.0);
            let vx = (pos * 2.0 - 1.0) * TOP_DRIFT_MAX * scale;
            let vy = (TOP_SPEED_MIN + spd * TOP_SPEED_RANGE) * scale;
            (Vec2::new(x, -margin), Vec2::new(vx, vy))
        }
        SpawnEdge::Left | SpawnEdge::Right => {
            let y = field.y * (0.12 + pos * 0.08);
            let (x, target_x) = if rolls.edge == SpawnEdge::Left {
                (-margin, field.x * (0.6 + spd * 0.3))
            } else {
                (field.x + margin, field.x * (0.1 + spd * 0.3))
            };
            let target = Vec2::new(target_x, field.y * (0.25 + pos * 0.15));
            let start = Vec2::new(x, y);
            let dir = (target - start).try_normalize().unwrap_or(Vec2::X);
            let speed = (SIDE_SPEED_MIN + spd * SIDE_SPEED_RANGE) * scale;
            (start, dir * speed)
        }
    }
}

/// Build a launched object
pub fn launch_object(
    id: u32,
    kind: ObjectKind,
    field: Vec2,
    base_size: f32,
    score: u32,
    rolls: &LaunchRolls,
    now: f64,
) -> MovingObject {
    let size = object_size(kind, base_size);
    let (pos, vel) = launch_motion(field, size, score, rolls);
    MovingObject {
        id,
        kind,
        pos,
        vel,
        size,
        rotation: 0.0,
        rotation_rate: rolls.spin * SPAWN_SPIN_DEG.to_radians(),
        sliced: false,
        spawn_time: now,
    }
}

/// Build the two pieces of a sliced object.
///
/// `spins` are rolls in [-1, 1) for the left and right piece. Returns `None`
/// for kinds that don't split. Ids are `first_id` and `first_id + 1`.
pub fn split_pieces(
    parent: &MovingObject,
    first_id: u32,
    spins: [f32; 2],
    now: f64,
) -> Option<[MovingObject; 2]> {
    let left = parent.kind.piece(PieceSide::Left)?;
    let right = parent.kind.piece(PieceSide::Right)?;

    let gold = parent.kind == ObjectKind::Gold;
    let (kick_x, kick_y, spin, size, right_offset) = if gold {
        (
            GOLD_PIECE_KICK_X,
            GOLD_PIECE_KICK_Y,
            GOLD_PIECE_SPIN,
            parent.size * GOLD_PIECE_SCALE,
            0.0,
        )
    } else {
        (
            PIECE_KICK_X,
            PIECE_KICK_Y,
            PIECE_SPIN,
            parent.size,
            parent.size / 2.0,
        )
    };

    let piece = |id: u32, kind: ObjectKind, offset: f32, dir: f32, roll: f32| MovingObject {
        id,
        kind,
        pos: parent.pos + Vec2::new(offset, 0.0),
        vel: parent.vel + Vec2::new(dir * kick_x, kick_y),
        size,
        rotation: parent.rotation,
        rotation_rate: roll * spin,
        sliced: true,
        spawn_time: now,
    };

    Some([
        piece(first_id, left, 0.0, -1.0, spins[0]),
        piece(first_id + 1, right, right_offset, 1.0, spins[1]),
    ])
}
