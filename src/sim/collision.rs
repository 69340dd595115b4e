//! Blade hit testing
//!
//! A hit is registered when either of the trail's two newest samples lies
//! within `size * hit_radius_factor` of an object's center. Samples are
//! resampled finely enough upstream that this covers the swept segment.

use glam::Vec2;

use super::object::MovingObject;
use super::trail::Trail;

/// Whether either sample is inside the hit circle
#[inline]
pub fn samples_hit(a: Vec2, b: Vec2, center: Vec2, hit_radius: f32) -> bool {
    a.distance(center) < hit_radius || b.distance(center) < hit_radius
}

/// Test one object against the trail's newest stroke
pub fn blade_hits(trail: &Trail, obj: &MovingObject, hit_radius_factor: f32) -> bool {
    if obj.sliced {
        return false;
    }
    let Some((a, b)) = trail.last_two() else {
        return false;
    };
    samples_hit(a, b, obj.center(), obj.size * hit_radius_factor)
}

/// Indices of every live, unsliced object the trail currently hits
pub fn find_hits(trail: &Trail, objects: &[MovingObject], hit_radius_factor: f32) -> Vec<usize> {
    if trail.last_two().is_none() {
        return Vec::new();
    }
    objects
        .iter()
        .enumerate()
        .filter(|(_, obj)| blade_hits(trail, obj, hit_radius_factor))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::object::ObjectKind;
    use crate::tuning::Tuning;

    fn earth_at(center: Vec2) -> MovingObject {
        MovingObject {
            id: 1,
            kind: ObjectKind::Earth,
            pos: center - Vec2::splat(32.0),
            vel: Vec2::ZERO,
            size: 64.0,
            rotation: 0.0,
            rotation_rate: 0.0,
            sliced: false,
            spawn_time: 0.0,
        }
    }

    fn stroke(points: &[Vec2]) -> Trail {
        let mut t = Trail::new(&Tuning::default());
        for p in points {
            t.push(*p);
        }
        t
    }

    #[test]
    fn test_hit_within_radius() {
        let obj = earth_at(Vec2::new(100.0, 100.0));
        // 0.9 * 64 = 57.6
        let t = stroke(&[Vec2::new(0.0, 100.0), Vec2::new(50.0, 100.0)]);
        assert!(blade_hits(&t, &obj, 0.9));

        let t = stroke(&[Vec2::new(0.0, 100.0), Vec2::new(42.0, 100.0)]);
        assert!(!blade_hits(&t, &obj, 0.9));
    }

    #[test]
    fn test_older_sample_counts() {
        let obj = earth_at(Vec2::new(100.0, 100.0));
        let t = stroke(&[Vec2::new(100.0, 100.0), Vec2::new(300.0, 300.0)]);
        assert!(blade_hits(&t, &obj, 0.9));
    }

    #[test]
    fn test_only_newest_two_samples() {
        let obj = earth_at(Vec2::new(100.0, 100.0));
        let t = stroke(&[
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 300.0),
            Vec2::new(330.0, 300.0),
        ]);
        assert!(!blade_hits(&t, &obj, 0.9));
    }

    #[test]
    fn test_single_sample_never_hits() {
        let obj = earth_at(Vec2::new(100.0, 100.0));
        let t = stroke(&[Vec2::new(100.0, 100.0)]);
        assert!(!blade_hits(&t, &obj, 0.9));
        assert!(find_hits(&t, &[obj], 0.9).is_empty());
    }

    #[test]
    fn test_sliced_objects_ignored() {
        let mut obj = earth_at(Vec2::new(100.0, 100.0));
        obj.sliced = true;
        let t = stroke(&[Vec2::new(90.0, 100.0), Vec2::new(100.0, 100.0)]);
        assert!(!blade_hits(&t, &obj, 0.9));
    }

    #[test]
    fn test_find_hits_returns_all() {
        let objects = vec![
            earth_at(Vec2::new(100.0, 100.0)),
            earth_at(Vec2::new(500.0, 500.0)),
            earth_at(Vec2::new(120.0, 100.0)),
        ];
        let t = stroke(&[Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0)]);
        assert_eq!(find_hits(&t, &objects, 0.9), vec![0, 2]);
    }
}
