//! Difficulty curve and spawn scheduling
//!
//! Pure functions of round time, score and frenzy state. Random draws are
//! passed in as rolls in [0, 1) so every rule is testable without an RNG.

use serde::{Deserialize, Serialize};

use super::object::ObjectKind;

/// Difficulty never exceeds this
pub const MAX_DIFFICULTY: f32 = 2.2;

/// Normal spawn interval: uniform in [BASE, BASE + RANGE) ms, divided by difficulty
pub const SPAWN_INTERVAL_BASE_MS: f64 = 550.0;
pub const SPAWN_INTERVAL_RANGE_MS: f64 = 350.0;
/// Frenzy spawn interval: uniform in [BASE, BASE + RANGE) ms
pub const FRENZY_INTERVAL_BASE_MS: f64 = 100.0;
pub const FRENZY_INTERVAL_RANGE_MS: f64 = 100.0;

/// Objects per frenzy burst: FRENZY_BURST_MIN..=FRENZY_BURST_MAX
pub const FRENZY_BURST_MIN: u32 = 3;
pub const FRENZY_BURST_MAX: u32 = 5;

/// Launch speed and gravity grow with score, up to +50%
#[inline]
pub fn speed_scale(score: u32) -> f32 {
    1.0 + (score as f32 / 100.0).min(0.5)
}

/// Combined time/score difficulty in [1.0, 2.2]
pub fn difficulty(elapsed_sec: f32, score: u32) -> f32 {
    let time_factor = (1.0 + elapsed_sec.max(0.0) / 40.0).min(2.0);
    let score_factor = (1.0 + score as f32 / 25.0).min(2.0);
    (time_factor * 0.6 + score_factor * 0.4).min(MAX_DIFFICULTY)
}

/// Delay until the next spawn tick (ms)
pub fn spawn_interval_ms(difficulty: f32, frenzy: bool, roll: f64) -> f64 {
    if frenzy {
        FRENZY_INTERVAL_BASE_MS + roll * FRENZY_INTERVAL_RANGE_MS
    } else {
        (SPAWN_INTERVAL_BASE_MS + roll * SPAWN_INTERVAL_RANGE_MS) / difficulty.max(1.0) as f64
    }
}

/// Probability of a second object in a normal spawn tick
pub fn extra_spawn_chance(difficulty: f32) -> f32 {
    (0.10 + (difficulty - 1.0) * 0.20).min(0.45)
}

/// Objects launched in one frenzy tick
pub fn frenzy_burst_count(roll: f64) -> u32 {
    let span = FRENZY_BURST_MAX - FRENZY_BURST_MIN + 1;
    FRENZY_BURST_MIN + ((roll * span as f64).floor() as u32).min(span - 1)
}

/// Normalized type weights for a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnChances {
    pub earth: f32,
    pub bomb: f32,
    pub gold: f32,
    pub neptune: f32,
    pub alien: f32,
}

impl SpawnChances {
    pub fn for_score(score: u32) -> Self {
        let s = score as f32;
        let mut earth: f32 = 0.65;
        let mut bomb: f32 = 0.20;
        let mut gold: f32 = 0.08;
        let neptune: f32 = 0.05;
        let mut alien: f32 = 0.02;

        if score > 20 {
            bomb = (bomb + s * 0.002).min(0.30);
            earth = (earth - s * 0.003).max(0.45);
        }
        if score > 50 {
            gold = (gold + 0.02).min(0.12);
            alien = (alien + 0.01).min(0.05);
        }

        Self {
            earth,
            bomb,
            gold,
            neptune,
            alien,
        }
        .normalized()
    }

    /// Clamp negatives to zero and scale to sum 1.
    /// An all-zero table falls back to all-Earth.
    pub fn normalized(self) -> Self {
        let mut w = self.weights().map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 });
        let total: f32 = w.iter().sum();
        if total <= 0.0 {
            w = [1.0, 0.0, 0.0, 0.0, 0.0];
        } else {
            for v in &mut w {
                *v /= total;
            }
        }
        Self {
            earth: w[0],
            bomb: w[1],
            gold: w[2],
            neptune: w[3],
            alien: w[4],
        }
    }

    /// Weights in `ObjectKind::SPAWNABLE` order
    pub fn weights(&self) -> [f32; 5] {
        [self.earth, self.bomb, self.gold, self.neptune, self.alien]
    }

    /// Walk the cumulative distribution
    pub fn pick(&self, roll: f32) -> ObjectKind {
        let mut cumulative = 0.0;
        for (kind, weight) in ObjectKind::SPAWNABLE.iter().zip(self.weights()) {
            cumulative += weight;
            if roll < cumulative {
                return *kind;
            }
        }
        ObjectKind::Alien
    }
}

/// Choose the type of the next object
pub fn determine_object_type(roll: f32, score: u32, frenzy: bool) -> ObjectKind {
    if frenzy {
        return ObjectKind::Alien;
    }
    SpawnChances::for_score(score).pick(roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_difficulty_bounds() {
        assert_eq!(difficulty(0.0, 0), 1.0);
        assert!((difficulty(40.0, 25) - 2.0).abs() < 1e-6);
        assert!(difficulty(10_000.0, 10_000) <= MAX_DIFFICULTY);
    }

    #[test]
    fn test_speed_scale_caps() {
        assert_eq!(speed_scale(0), 1.0);
        assert!((speed_scale(20) - 1.2).abs() < 1e-6);
        assert_eq!(speed_scale(500), 1.5);
    }

    #[test]
    fn test_spawn_interval() {
        assert_eq!(spawn_interval_ms(1.0, false, 0.0), 550.0);
        assert!((spawn_interval_ms(2.0, false, 0.5) - 362.5).abs() < 1e-9);
        assert_eq!(spawn_interval_ms(2.0, true, 0.5), 150.0);
        assert!(spawn_interval_ms(1.0, true, 0.999) < 200.0);
    }

    #[test]
    fn test_extra_spawn_chance() {
        assert!((extra_spawn_chance(1.0) - 0.10).abs() < 1e-6);
        assert!((extra_spawn_chance(2.0) - 0.30).abs() < 1e-6);
        assert!(extra_spawn_chance(2.2) <= 0.45);
    }

    #[test]
    fn test_frenzy_burst_count() {
        assert_eq!(frenzy_burst_count(0.0), 3);
        assert_eq!(frenzy_burst_count(0.5), 4);
        assert_eq!(frenzy_burst_count(0.9999), 5);
    }

    #[test]
    fn test_base_chances() {
        let c = SpawnChances::for_score(0);
        assert!((c.earth - 0.65).abs() < 1e-6);
        assert!((c.bomb - 0.20).abs() < 1e-6);
        assert!((c.alien - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_high_score_shifts_weights() {
        let low = SpawnChances::for_score(0);
        let high = SpawnChances::for_score(100);
        assert!(high.bomb > low.bomb);
        assert!(high.earth < low.earth);
        assert!(high.alien > low.alien);
    }

    #[test]
    fn test_pick_order() {
        let c = SpawnChances::for_score(0);
        assert_eq!(c.pick(0.0), ObjectKind::Earth);
        assert_eq!(c.pick(0.7), ObjectKind::Bomb);
        assert_eq!(c.pick(0.86), ObjectKind::Gold);
        assert_eq!(c.pick(0.95), ObjectKind::Neptune);
        assert_eq!(c.pick(0.99), ObjectKind::Alien);
    }

    #[test]
    fn test_normalize_clamps_negative() {
        let c = SpawnChances {
            earth: -1.0,
            bomb: 1.0,
            gold: 1.0,
            neptune: 0.0,
            alien: 0.0,
        }
        .normalized();
        assert_eq!(c.earth, 0.0);
        assert!((c.bomb - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_all_zero() {
        let c = SpawnChances {
            earth: 0.0,
            bomb: 0.0,
            gold: 0.0,
            neptune: 0.0,
            alien: 0.0,
        }
        .normalized();
        assert_eq!(c.earth, 1.0);
    }

    proptest! {
        #[test]
        fn chances_are_normalized(score in 0u32..100_000) {
            let c = SpawnChances::for_score(score);
            let w = c.weights();
            prop_assert!(w.iter().all(|v| *v >= 0.0));
            prop_assert!((w.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        }

        #[test]
        fn difficulty_in_range(elapsed in 0.0f32..100_000.0, score in 0u32..100_000) {
            let d = difficulty(elapsed, score);
            prop_assert!((1.0..=MAX_DIFFICULTY).contains(&d));
        }

        #[test]
        fn frenzy_always_alien(roll in 0.0f32..1.0, score in 0u32..1000) {
            prop_assert_eq!(determine_object_type(roll, score, true), ObjectKind::Alien);
        }

        #[test]
        fn interval_positive(d in 1.0f32..=2.2, roll in 0.0f64..1.0, frenzy in any::<bool>()) {
            let ms = spawn_interval_ms(d, frenzy, roll);
            prop_assert!(ms >= 100.0 && ms < 900.0);
        }
    }
}
