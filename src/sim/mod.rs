//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied timestamps only, no clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod object;
pub mod power;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trail;

pub use collision::{blade_hits, find_hits};
pub use difficulty::{SpawnChances, determine_object_type, difficulty, speed_scale};
pub use object::{MovingObject, ObjectKind, PieceSide, RenderObject};
pub use power::{activate_shield, cast_star_slash, cast_time_slow};
pub use schedule::{Scheduler, TaskHandle, TaskKind};
pub use spawn::{LaunchRolls, SpawnEdge, base_object_size, launch_object, split_pieces};
pub use state::{GameEvent, GamePhase, GameState, RoundState};
pub use tick::{PointerEvent, TickInput, advance, run_due_tasks, spawn_object, start_round, tick};
pub use trail::Trail;
