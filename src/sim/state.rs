//! Game state and core simulation types
//!
//! `GameState` owns everything a round mutates: the object list, the blade
//! trail, the round/power state, pending deferred tasks and the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::object::{MovingObject, RenderObject};
use super::schedule::{Scheduler, TaskHandle};
use super::spawn::base_object_size;
use super::trail::Trail;
use crate::tuning::Tuning;

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    Idle,
    /// Active gameplay
    Running,
    /// Round ended by a bomb
    Over,
}

/// Notifications for the UI and persistence layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    ScoreChanged { score: u32 },
    /// A slice or shield absorb happened
    HitFlash,
    ShieldChanged { active: bool },
    /// Shield button affordance (false once used this round)
    ShieldAvailabilityChanged { available: bool },
    TimeSlowStarted { until: f64 },
    TimeSlowEnded,
    FrenzyStarted { until: f64 },
    FrenzyEnded,
    GameOver { final_score: u32 },
}

/// Score and power state of the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: GamePhase,
    pub score: u32,
    /// Round start timestamp (ms)
    pub start_time: f64,
    pub shield_active: bool,
    /// One activation per round
    pub shield_available: bool,
    /// Set once the active shield has absorbed a bomb
    pub shield_was_used: bool,
    /// End of the current frenzy window (ms), if one was started
    pub frenzy_end_time: Option<f64>,
    /// Physics time multiplier
    pub time_scale: f32,
    /// Pending reset of `time_scale`
    pub time_slow_task: Option<TaskHandle>,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            start_time: 0.0,
            shield_active: false,
            shield_available: true,
            shield_was_used: false,
            frenzy_end_time: None,
            time_scale: 1.0,
            time_slow_task: None,
        }
    }
}

impl RoundState {
    /// Fresh running round starting at `now`
    pub fn reset(&mut self, now: f64) {
        *self = Self {
            phase: GamePhase::Running,
            start_time: now,
            ..Self::default()
        };
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn frenzy_active(&self, now: f64) -> bool {
        self.frenzy_end_time.is_some_and(|end| now < end)
    }

    pub fn elapsed_secs(&self, now: f64) -> f32 {
        ((now - self.start_time) / 1000.0).max(0.0) as f32
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Play-field width/height
    pub field: Vec2,
    /// Edge length of a size-1.0 object for this field
    pub base_size: f32,
    pub round: RoundState,
    /// Live objects in spawn order
    pub objects: Vec<MovingObject>,
    pub trail: Trail,
    pub scheduler: Scheduler,
    /// Timestamp of the last frame (ms)
    pub last_frame_time: f64,
    /// Undrained events, oldest first
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game; call `tick::start_round` to play
    pub fn new(seed: u64, field: Vec2, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            trail: Trail::new(&tuning),
            tuning,
            field,
            base_size: base_object_size(field),
            round: RoundState::default(),
            objects: Vec::new(),
            scheduler: Scheduler::new(),
            last_frame_time: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new object ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocate `count` consecutive IDs, returning the first
    pub fn reserve_entity_ids(&mut self, count: u32) -> u32 {
        let first = self.next_id;
        self.next_id += count;
        first
    }

    /// Field was resized by the host
    pub fn resize_field(&mut self, field: Vec2) {
        self.field = field;
        self.base_size = base_object_size(field);
        log::debug!("Field resized to {}x{}, base size {}", field.x, field.y, self.base_size);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Objects the renderer should draw this frame
    pub fn render_snapshot(&self) -> Vec<RenderObject> {
        self.objects
            .iter()
            .filter(|o| o.is_simulated())
            .map(MovingObject::render_info)
            .collect()
    }

    /// Final score of the last round, once it is over
    pub fn final_score(&self) -> Option<u32> {
        self.round.is_over().then_some(self.round.score)
    }
}
