//! Slice outcomes and power states
//!
//! Shield, time-slow, frenzy, star-slash and game over. Every entry point is a
//! no-op unless the round is running.

use rand::Rng;

use super::object::ObjectKind;
use super::schedule::TaskKind;
use super::spawn::split_pieces;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Points for slicing a kind; aliens roll their score
fn points_for(state: &mut GameState, kind: ObjectKind) -> u32 {
    match kind {
        ObjectKind::Earth => EARTH_POINTS,
        ObjectKind::Gold => GOLD_POINTS,
        ObjectKind::Neptune => NEPTUNE_POINTS,
        ObjectKind::Alien => state.rng.random_range(ALIEN_POINTS_MIN..=ALIEN_POINTS_MAX),
        _ => 0,
    }
}

/// Mark object `idx` sliced and append its debris
fn split(state: &mut GameState, idx: usize, now: f64) {
    state.objects[idx].sliced = true;
    let first_id = state.reserve_entity_ids(2);
    let spins: [f32; 2] = [
        state.rng.random_range(-1.0..1.0),
        state.rng.random_range(-1.0..1.0),
    ];
    if let Some(pieces) = split_pieces(&state.objects[idx], first_id, spins, now) {
        state.objects.extend(pieces);
    }
}

fn add_score(state: &mut GameState, points: u32) {
    state.round.score += points;
    let score = state.round.score;
    state.emit(GameEvent::ScoreChanged { score });
}

/// Apply the outcome of the blade hitting object `idx`.
/// Already-sliced objects are ignored.
pub fn slice_object(state: &mut GameState, idx: usize, now: f64) {
    if !state.round.is_running() {
        return;
    }
    let Some(obj) = state.objects.get(idx) else {
        return;
    };
    if obj.sliced {
        return;
    }
    let kind = obj.kind;
    log::debug!("Sliced {:?} #{}", kind, obj.id);

    match kind {
        ObjectKind::Earth | ObjectKind::Gold | ObjectKind::Neptune | ObjectKind::Alien => {
            split(state, idx, now);
            let points = points_for(state, kind);
            add_score(state, points);
            state.emit(GameEvent::HitFlash);

            match kind {
                ObjectKind::Neptune => cast_time_slow(state, now),
                ObjectKind::Alien => start_frenzy(state, now),
                _ => {}
            }
        }
        ObjectKind::Bomb => {
            state.objects[idx].sliced = true;
            if state.round.shield_active {
                state.round.shield_active = false;
                state.round.shield_was_used = true;
                log::info!("Shield absorbed a bomb");
                state.emit(GameEvent::ShieldChanged { active: false });
                state.emit(GameEvent::HitFlash);
            } else {
                end_game(state);
            }
        }
        // Debris is spawned pre-sliced
        _ => {}
    }
}

/// Arm the one-per-round shield. Returns false if unavailable or already up.
pub fn activate_shield(state: &mut GameState) -> bool {
    let round = &mut state.round;
    if !round.is_running() || !round.shield_available || round.shield_active {
        log::debug!("Shield unavailable");
        return false;
    }
    round.shield_active = true;
    round.shield_was_used = false;
    round.shield_available = false;
    log::info!("Shield activated");
    state.emit(GameEvent::ShieldChanged { active: true });
    state.emit(GameEvent::ShieldAvailabilityChanged { available: false });
    true
}

/// Slice every live, unsliced Earth at once. Returns how many were cleared.
pub fn cast_star_slash(state: &mut GameState, now: f64) -> usize {
    if !state.round.is_running() {
        return 0;
    }
    let targets: Vec<usize> = state
        .objects
        .iter()
        .enumerate()
        .filter(|(_, o)| o.kind == ObjectKind::Earth && !o.sliced)
        .map(|(i, _)| i)
        .collect();

    for &idx in &targets {
        split(state, idx, now);
    }
    if !targets.is_empty() {
        add_score(state, EARTH_POINTS * targets.len() as u32);
        state.emit(GameEvent::HitFlash);
    }
    log::info!("Star slash cleared {} objects", targets.len());
    targets.len()
}

/// Slow physics for a fixed window. Re-casting restarts the window.
pub fn cast_time_slow(state: &mut GameState, now: f64) {
    if !state.round.is_running() {
        return;
    }
    if let Some(pending) = state.round.time_slow_task.take() {
        state.scheduler.cancel(pending);
    }
    let until = now + state.tuning.time_slow_duration_ms;
    state.round.time_scale = state.tuning.time_slow_scale;
    state.round.time_slow_task = Some(state.scheduler.schedule(until, TaskKind::EndTimeSlow));
    log::info!("Time slow until {until:.0}");
    state.emit(GameEvent::TimeSlowStarted { until });
}

/// Deferred reset fired by the scheduler
pub fn end_time_slow(state: &mut GameState) {
    state.round.time_scale = 1.0;
    state.round.time_slow_task = None;
    log::info!("Time slow ended");
    state.emit(GameEvent::TimeSlowEnded);
}

/// Open a frenzy window unless one is already running
pub fn start_frenzy(state: &mut GameState, now: f64) {
    if state.round.frenzy_active(now) {
        return;
    }
    expire_frenzy(state, now);
    let until = now + state.tuning.frenzy_duration_ms;
    state.round.frenzy_end_time = Some(until);
    log::info!("Frenzy until {until:.0}");
    state.emit(GameEvent::FrenzyStarted { until });
}

/// Report a frenzy window that has run out
pub fn expire_frenzy(state: &mut GameState, now: f64) {
    if let Some(end) = state.round.frenzy_end_time {
        if now >= end {
            state.round.frenzy_end_time = None;
            log::info!("Frenzy ended");
            state.emit(GameEvent::FrenzyEnded);
        }
    }
}

/// Freeze the round and publish the final score
pub fn end_game(state: &mut GameState) {
    if !state.round.is_running() {
        return;
    }
    state.round.phase = GamePhase::Over;
    let final_score = state.round.score;
    log::info!("Game over, final score {final_score}");
    state.emit(GameEvent::GameOver { final_score });
}
