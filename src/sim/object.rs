//! Moving objects: planets, bombs, aliens and the debris they split into

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which half of the parent a split piece came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceSide {
    Left,
    Right,
}

/// Object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Earth,
    Bomb,
    Gold,
    Neptune,
    Alien,
    EarthPiece(PieceSide),
    GoldPiece(PieceSide),
    AlienPiece(PieceSide),
    NeptunePiece(PieceSide),
}

impl ObjectKind {
    /// Kinds the spawner can launch, in roll order
    pub const SPAWNABLE: [ObjectKind; 5] = [
        ObjectKind::Earth,
        ObjectKind::Bomb,
        ObjectKind::Gold,
        ObjectKind::Neptune,
        ObjectKind::Alien,
    ];

    /// Size relative to the field's base object size
    pub fn size_multiplier(self) -> f32 {
        match self {
            ObjectKind::Gold => 0.85,
            ObjectKind::Alien => 1.1,
            ObjectKind::Neptune => 0.9,
            ObjectKind::Bomb => 0.95,
            _ => 1.0,
        }
    }

    pub fn is_piece(self) -> bool {
        self.piece_side().is_some()
    }

    pub fn piece_side(self) -> Option<PieceSide> {
        match self {
            ObjectKind::EarthPiece(side)
            | ObjectKind::GoldPiece(side)
            | ObjectKind::AlienPiece(side)
            | ObjectKind::NeptunePiece(side) => Some(side),
            _ => None,
        }
    }

    /// Debris kind this object splits into (bombs don't split)
    pub fn piece(self, side: PieceSide) -> Option<ObjectKind> {
        match self {
            ObjectKind::Earth => Some(ObjectKind::EarthPiece(side)),
            ObjectKind::Gold => Some(ObjectKind::GoldPiece(side)),
            ObjectKind::Alien => Some(ObjectKind::AlienPiece(side)),
            ObjectKind::Neptune => Some(ObjectKind::NeptunePiece(side)),
            _ => None,
        }
    }
}

/// One simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Top-left corner of the object's square (field units)
    pub pos: Vec2,
    /// Velocity (units/sec)
    pub vel: Vec2,
    /// Edge length
    pub size: f32,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Spin (radians/sec)
    pub rotation_rate: f32,
    /// Consumed by the blade, or spawned as debris
    pub sliced: bool,
    /// Host timestamp at spawn (ms)
    pub spawn_time: f64,
}

impl MovingObject {
    /// Center used for hit testing
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Whether physics and rendering still apply.
    /// Sliced primaries are frozen and hidden; their debris keeps flying.
    #[inline]
    pub fn is_simulated(&self) -> bool {
        !self.sliced || self.kind.is_piece()
    }

    /// Advance motion by `dt` seconds
    pub fn integrate(&mut self, gravity: f32, damping: f32, dt: f32) {
        self.vel.y += gravity * dt;
        self.vel.x *= damping;
        self.pos += self.vel * dt;
        self.rotation += self.rotation_rate * dt;
    }

    /// True when outside the field grown by `2 * size` on every side
    pub fn is_off_field(&self, field: Vec2) -> bool {
        let margin = self.size * 2.0;
        self.pos.x < -margin
            || self.pos.x > field.x + margin
            || self.pos.y < -margin
            || self.pos.y > field.y + margin
    }

    pub fn render_info(&self) -> RenderObject {
        RenderObject {
            kind: self.kind,
            pos: self.pos,
            size: self.size,
            rotation: self.rotation,
            piece_side: self.kind.piece_side(),
        }
    }
}

/// What the renderer needs to draw one object
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderObject {
    pub kind: ObjectKind,
    pub pos: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub piece_side: Option<PieceSide>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(kind: ObjectKind, pos: Vec2) -> MovingObject {
        MovingObject {
            id: 1,
            kind,
            pos,
            vel: Vec2::ZERO,
            size: 64.0,
            rotation: 0.0,
            rotation_rate: 0.0,
            sliced: false,
            spawn_time: 0.0,
        }
    }

    #[test]
    fn test_piece_kinds() {
        assert_eq!(
            ObjectKind::Earth.piece(PieceSide::Left),
            Some(ObjectKind::EarthPiece(PieceSide::Left))
        );
        assert_eq!(ObjectKind::Bomb.piece(PieceSide::Left), None);
        assert!(ObjectKind::GoldPiece(PieceSide::Right).is_piece());
        assert!(!ObjectKind::Alien.is_piece());
        assert_eq!(ObjectKind::Earth.piece_side(), None);
    }

    #[test]
    fn test_sliced_primary_not_simulated() {
        let mut obj = object(ObjectKind::Earth, Vec2::ZERO);
        assert!(obj.is_simulated());
        obj.sliced = true;
        assert!(!obj.is_simulated());

        let mut piece = object(ObjectKind::EarthPiece(PieceSide::Left), Vec2::ZERO);
        piece.sliced = true;
        assert!(piece.is_simulated());
    }

    #[test]
    fn test_integrate() {
        let mut obj = object(ObjectKind::Earth, Vec2::ZERO);
        obj.vel = Vec2::new(100.0, -100.0);
        obj.rotation_rate = 1.0;
        obj.integrate(1000.0, 0.5, 0.1);
        assert!((obj.vel.x - 50.0).abs() < 1e-4);
        assert!((obj.vel.y - 0.0).abs() < 1e-4);
        assert!((obj.pos.x - 5.0).abs() < 1e-4);
        assert!((obj.rotation - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_off_field_margin() {
        let field = Vec2::new(400.0, 800.0);
        assert!(!object(ObjectKind::Earth, Vec2::new(-128.0, 10.0)).is_off_field(field));
        assert!(object(ObjectKind::Earth, Vec2::new(-129.0, 10.0)).is_off_field(field));
        assert!(object(ObjectKind::Earth, Vec2::new(10.0, 929.0)).is_off_field(field));
        assert!(!object(ObjectKind::Earth, Vec2::new(200.0, 400.0)).is_off_field(field));
    }

    #[test]
    fn test_center() {
        let obj = object(ObjectKind::Earth, Vec2::new(10.0, 20.0));
        assert_eq!(obj.center(), Vec2::new(42.0, 52.0));
    }
}
