//! Blade trail: recent pointer samples with resampling and fade-out

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{dist, lerp_point};

/// Bounded, time-decaying sequence of pointer samples (oldest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    points: Vec<Vec2>,
    capacity: usize,
    min_spacing: f32,
    fade_duration_ms: f64,
    /// Set while fading after release (ms timestamp)
    fade_start: Option<f64>,
    /// Pointer is down; moves only extend the stroke while set
    held: bool,
}

impl Trail {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            points: Vec::with_capacity(tuning.trail_capacity + 1),
            capacity: tuning.trail_capacity,
            min_spacing: tuning.min_sample_spacing,
            fade_duration_ms: tuning.fade_duration_ms,
            fade_start: None,
            held: false,
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// The two newest samples (older, newer), if present
    pub fn last_two(&self) -> Option<(Vec2, Vec2)> {
        match self.points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade_start.is_some()
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Start a new stroke, dropping any trail still fading out
    pub fn begin(&mut self, p: Vec2) -> bool {
        self.clear();
        self.held = true;
        self.push(p)
    }

    /// Append a sample. Returns false when dropped (fading or too close).
    pub fn push(&mut self, p: Vec2) -> bool {
        if self.is_fading() {
            return false;
        }
        if let Some(last) = self.last() {
            if dist(last, p) < self.min_spacing {
                return false;
            }
        }
        self.points.push(p);
        if self.points.len() > self.capacity {
            let excess = self.points.len() - self.capacity;
            self.points.drain(..excess);
        }
        true
    }

    /// Pointer released: start fading out
    pub fn release(&mut self, now: f64) {
        self.held = false;
        if self.points.is_empty() || self.is_fading() {
            return;
        }
        self.fade_start = Some(now);
    }

    /// Clear the trail once the fade has finished
    pub fn update(&mut self, now: f64) {
        if let Some(start) = self.fade_start {
            if now - start >= self.fade_duration_ms {
                self.clear();
            }
        }
    }

    /// Render opacity in [0, 1]
    pub fn alpha(&self, now: f64) -> f32 {
        match self.fade_start {
            Some(start) => (1.0 - (now - start) / self.fade_duration_ms).clamp(0.0, 1.0) as f32,
            None => 1.0,
        }
    }

    /// Drop every sample. Does not touch the held state.
    pub fn clear(&mut self) {
        self.points.clear();
        self.fade_start = None;
    }

    /// Forget the stroke entirely, as if the pointer was never pressed
    pub fn reset(&mut self) {
        self.clear();
        self.held = false;
    }
}

/// Points from `from` (exclusive) to `to` (inclusive), spaced at most `step`
/// apart along the larger axis. Always yields at least `to`.
pub fn resample(from: Vec2, to: Vec2, step: f32) -> impl Iterator<Item = Vec2> {
    let delta = to - from;
    let max_axis = delta.x.abs().max(delta.y.abs());
    let steps = ((max_axis / step).ceil() as u32).max(1);
    (1..=steps).map(move |i| {
        if i == steps {
            to
        } else {
            lerp_point(from, to, i as f32 / steps as f32)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail() -> Trail {
        Trail::new(&Tuning::default())
    }

    #[test]
    fn test_push_dedups_close_samples() {
        let mut t = trail();
        assert!(t.push(Vec2::new(0.0, 0.0)));
        assert!(!t.push(Vec2::new(1.0, 1.0)));
        assert!(t.push(Vec2::new(3.0, 0.0)));
        assert_eq!(t.points().len(), 2);
    }

    #[test]
    fn test_capacity_keeps_newest() {
        let mut t = trail();
        for i in 0..10 {
            t.push(Vec2::new(i as f32 * 10.0, 0.0));
        }
        assert_eq!(t.points().len(), 6);
        assert_eq!(t.points()[0].x, 40.0);
        assert_eq!(t.last(), Some(Vec2::new(90.0, 0.0)));
    }

    #[test]
    fn test_last_two() {
        let mut t = trail();
        assert!(t.last_two().is_none());
        t.push(Vec2::ZERO);
        assert!(t.last_two().is_none());
        t.push(Vec2::new(10.0, 0.0));
        assert_eq!(t.last_two(), Some((Vec2::ZERO, Vec2::new(10.0, 0.0))));
    }

    #[test]
    fn test_fade_then_clear() {
        let mut t = trail();
        t.push(Vec2::ZERO);
        t.push(Vec2::new(10.0, 0.0));
        t.release(1000.0);
        assert!(t.is_fading());
        assert!(!t.push(Vec2::new(50.0, 0.0)));
        assert!((t.alpha(1100.0) - 0.5).abs() < 1e-6);

        t.update(1150.0);
        assert_eq!(t.points().len(), 2);
        t.update(1200.0);
        assert!(t.points().is_empty());
        assert!(!t.is_fading());
    }

    #[test]
    fn test_release_empty_does_not_fade() {
        let mut t = trail();
        t.release(0.0);
        assert!(!t.is_fading());
    }

    #[test]
    fn test_begin_clears_fading_trail() {
        let mut t = trail();
        t.push(Vec2::ZERO);
        t.push(Vec2::new(10.0, 0.0));
        t.release(0.0);
        assert!(t.begin(Vec2::new(100.0, 100.0)));
        assert!(!t.is_fading());
        assert_eq!(t.points(), &[Vec2::new(100.0, 100.0)]);
    }

    #[test]
    fn test_held_between_begin_and_release() {
        let mut t = trail();
        assert!(!t.is_held());
        t.begin(Vec2::ZERO);
        assert!(t.is_held());
        t.release(100.0);
        assert!(!t.is_held());

        t.begin(Vec2::ZERO);
        t.reset();
        assert!(!t.is_held());
        assert!(t.points().is_empty());
    }

    #[test]
    fn test_resample_spacing() {
        let pts: Vec<_> = resample(Vec2::ZERO, Vec2::new(100.0, 0.0), 24.0).collect();
        // ceil(100 / 24) = 5 steps of 20
        assert_eq!(pts.len(), 5);
        assert!((pts[0].x - 20.0).abs() < 1e-5);
        assert_eq!(*pts.last().unwrap(), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_resample_short_move() {
        let pts: Vec<_> = resample(Vec2::ZERO, Vec2::new(5.0, 5.0), 24.0).collect();
        assert_eq!(pts, vec![Vec2::new(5.0, 5.0)]);
    }
}
