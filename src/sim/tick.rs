//! Frame loop, spawn loop and round lifecycle
//!
//! The host drives two logical loops with its own timestamps:
//! - deferred tasks (spawn firings, time-slow reset) fire at their due time
//! - `tick` runs once per display frame: physics, blade input, culling
//!
//! `advance` does both in that order and is what most hosts want.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::find_hits;
use super::difficulty::{
    determine_object_type, difficulty, extra_spawn_chance, frenzy_burst_count, spawn_interval_ms,
    speed_scale,
};
use super::object::ObjectKind;
use super::power::{end_time_slow, expire_frenzy, slice_object};
use super::schedule::TaskKind;
use super::spawn::{LaunchRolls, launch_object};
use super::state::{GameEvent, GameState};
use super::trail::resample;

/// Pointer input in play-field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Press / touch start
    Begin(Vec2),
    /// Drag while held
    Move(Vec2),
    /// Release, cancel or leave
    End,
}

/// Input collected since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub pointer: Vec<PointerEvent>,
}

impl TickInput {
    pub fn new(pointer: impl IntoIterator<Item = PointerEvent>) -> Self {
        Self {
            pointer: pointer.into_iter().collect(),
        }
    }
}

/// Start (or restart) a round at `now`
pub fn start_round(state: &mut GameState, now: f64) {
    state.scheduler.cancel_all();
    state.objects.clear();
    state.trail.reset();
    state.round.reset(now);
    state.last_frame_time = now;

    log::info!("Round started (seed {})", state.seed);
    state.emit(GameEvent::RoundStarted);
    state.emit(GameEvent::ScoreChanged { score: 0 });
    state.emit(GameEvent::ShieldChanged { active: false });
    state.emit(GameEvent::ShieldAvailabilityChanged { available: true });

    // First spawn-loop firing is due immediately
    state.scheduler.schedule(now, TaskKind::Spawn);
}

/// Launch one object. `forced` overrides the type roll.
/// No-op unless the round is running.
pub fn spawn_object(state: &mut GameState, now: f64, forced: Option<ObjectKind>) {
    if !state.round.is_running() {
        return;
    }
    let score = state.round.score;
    let kind = match forced {
        Some(kind) => kind,
        None => {
            let roll: f32 = state.rng.random();
            determine_object_type(roll, score, state.round.frenzy_active(now))
        }
    };
    let rolls = LaunchRolls::roll(&mut state.rng);
    let id = state.next_entity_id();
    let obj = launch_object(id, kind, state.field, state.base_size, score, &rolls, now);
    log::debug!("Spawned {:?} #{} from {:?}", kind, id, rolls.edge);
    state.objects.push(obj);
}

/// One firing of the spawn loop: launch objects, then schedule the next firing
fn spawn_tick(state: &mut GameState, now: f64) {
    if !state.round.is_running() {
        return;
    }

    let frenzy = state.round.frenzy_active(now);
    let level = difficulty(state.round.elapsed_secs(now), state.round.score);

    if frenzy {
        let count = frenzy_burst_count(state.rng.random());
        for _ in 0..count {
            spawn_object(state, now, None);
        }
    } else {
        spawn_object(state, now, None);
        if state.rng.random::<f32>() < extra_spawn_chance(level) {
            spawn_object(state, now, None);
        }
    }

    let delay = spawn_interval_ms(level, frenzy, state.rng.random());
    state.scheduler.schedule(now + delay, TaskKind::Spawn);
}

/// Fire every deferred task due at or before `now`, each at its own due time
pub fn run_due_tasks(state: &mut GameState, now: f64) {
    while let Some(task) = state.scheduler.pop_due(now) {
        log::trace!("Task {:?} due {:.1}", task.kind, task.due);
        match task.kind {
            TaskKind::Spawn => spawn_tick(state, task.due),
            TaskKind::EndTimeSlow => {
                if state.round.time_slow_task == Some(task.handle) {
                    end_time_slow(state);
                }
            }
        }
    }
}

/// Advance one display frame
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    let raw_dt = ((now - state.last_frame_time) / 1000.0).max(0.0) as f32;
    state.last_frame_time = now;

    // Release always fades the blade, even after game over
    if !state.round.is_running() {
        for event in &input.pointer {
            if *event == PointerEvent::End {
                state.trail.release(now);
            }
        }
        state.trail.update(now);
        return;
    }

    expire_frenzy(state, now);

    let dt = raw_dt.min(state.tuning.max_frame_dt) * state.round.time_scale;
    integrate(state, dt);

    for event in &input.pointer {
        handle_pointer(state, *event, now);
    }
    state.trail.update(now);

    cull(state, now);
}

/// Run due tasks, then the frame
pub fn advance(state: &mut GameState, input: &TickInput, now: f64) {
    run_due_tasks(state, now);
    tick(state, input, now);
}

/// Gravity, damping and spin for everything still in play
fn integrate(state: &mut GameState, dt: f32) {
    let gravity = state.tuning.gravity * speed_scale(state.round.score);
    let damping = state.tuning.air_damping;
    for obj in state.objects.iter_mut().filter(|o| o.is_simulated()) {
        obj.integrate(gravity, damping, dt);
    }
}

fn handle_pointer(state: &mut GameState, event: PointerEvent, now: f64) {
    match event {
        PointerEvent::Begin(p) => {
            if state.round.is_running() {
                state.trail.begin(p);
            }
        }
        PointerEvent::Move(p) => {
            // Hover and drags after release never cut
            if !state.round.is_running() || !state.trail.is_held() {
                return;
            }
            let Some(last) = state.trail.last() else {
                return;
            };
            for sample in resample(last, p, state.tuning.resample_step) {
                if !state.round.is_running() {
                    break;
                }
                state.trail.push(sample);
                slice_pass(state, now);
            }
        }
        PointerEvent::End => state.trail.release(now),
    }
}

/// Hit-test the blade against every object and apply the outcomes
fn slice_pass(state: &mut GameState, now: f64) {
    let hits = find_hits(&state.trail, &state.objects, state.tuning.hit_radius_factor);
    for idx in hits {
        if !state.round.is_running() {
            break;
        }
        slice_object(state, idx, now);
    }
}

/// Drop objects that left the field, once past their grace period
fn cull(state: &mut GameState, now: f64) {
    let field = state.field;
    let grace = state.tuning.cull_grace_ms;
    let before = state.objects.len();
    state
        .objects
        .retain(|o| now - o.spawn_time < grace || !o.is_off_field(field));
    let removed = before - state.objects.len();
    if removed > 0 {
        log::trace!("Culled {removed} objects");
    }
}
