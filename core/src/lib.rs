#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lawn Defence engine.
//!
//! This crate defines everything the authoritative world and the gameplay
//! systems agree on: the opaque [`Entity`] identifier, the plain-data
//! component catalog, the archetype tables that describe every plant and
//! zombie kind, the field geometry, the built-in level roster and the
//! balancing [`Tuning`]. Adapters express player intents as [`Command`]
//! values, the world applies them, and every observable outcome of a tick is
//! broadcast as an [`Event`].

pub mod components;
pub mod field;
pub mod kinds;
pub mod level;
pub mod tuning;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use components::*;
pub use field::Field;
pub use kinds::{
    Blast, DropKind, PickupKind, PlantBehavior, PlantKind, PlantStats, ProjectileKind,
    ZombieAbility, ZombieKind, ZombieStats,
};
pub use level::{LevelDef, Wave, WaveEntry};
pub use tuning::{Tuning, TuningError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lawn Defence.";

slotmap::new_key_type! {
    /// Opaque identifier for a simulated entity.
    ///
    /// Identifiers are generational: once an entity has been flushed from the
    /// store its identifier never compares equal to a later entity, so stale
    /// references held by indices can always be detected.
    pub struct Entity;
}

/// Time that elapsed during a single simulation tick.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameTime {
    /// Game time in seconds, already scaled by the active game speed.
    pub dt: f32,
    /// Wall-clock seconds, unaffected by game speed.
    pub real_dt: f32,
}

impl FrameTime {
    /// Creates a frame where game time and real time advance equally.
    #[must_use]
    pub const fn new(dt: f32) -> Self {
        Self { dt, real_dt: dt }
    }

    /// Creates a frame from a wall-clock delta scaled by a game-speed factor.
    #[must_use]
    pub fn scaled(real_dt: f32, speed: f32) -> Self {
        Self {
            dt: real_dt * speed.max(0.0),
            real_dt,
        }
    }
}

/// Player intents accepted by the world between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Requests placement of a plant in the provided cell.
    PlacePlant {
        /// Archetype of the plant to place.
        kind: PlantKind,
        /// Lane receiving the plant.
        row: i32,
        /// Column receiving the plant.
        col: i32,
    },
    /// Requests removal (shovel) of the plant occupying the provided cell.
    RemovePlant {
        /// Lane of the targeted cell.
        row: i32,
        /// Column of the targeted cell.
        col: i32,
    },
    /// Requests collection of any idle pickup near the provided point.
    CollectAt {
        /// Horizontal coordinate of the interaction in simulation space.
        x: f32,
        /// Vertical coordinate of the interaction in simulation space.
        y: f32,
    },
}

/// Outcomes broadcast by the world and the gameplay systems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Reports that the pipeline advanced by the provided game time.
    TimeAdvanced {
        /// Scaled game seconds that elapsed.
        dt: f32,
    },
    /// Confirms that a plant was placed.
    PlantPlaced {
        /// Identifier allocated for the plant.
        plant: Entity,
        /// Archetype of the placed plant.
        kind: PlantKind,
        /// Lane occupied by the plant.
        row: i32,
        /// Column occupied by the plant.
        col: i32,
    },
    /// Reports that a placement request had no effect.
    PlacementRejected {
        /// Archetype that was requested.
        kind: PlantKind,
        /// Lane of the requested cell.
        row: i32,
        /// Column of the requested cell.
        col: i32,
        /// Reason the request was rejected.
        reason: PlacementError,
    },
    /// Confirms that a plant was shovelled out of its cell.
    PlantRemoved {
        /// Identifier of the removed plant.
        plant: Entity,
        /// Lane the plant occupied.
        row: i32,
        /// Column the plant occupied.
        col: i32,
    },
    /// Reports that a removal request had no effect.
    RemovalRejected {
        /// Lane of the requested cell.
        row: i32,
        /// Column of the requested cell.
        col: i32,
        /// Reason the request was rejected.
        reason: RemovalError,
    },
    /// Announces that a pickup started homing toward its collection target.
    PickupCollecting {
        /// Identifier of the pickup.
        pickup: Entity,
    },
    /// Announces that a zombie entered the field.
    ZombieSpawned {
        /// Identifier allocated for the zombie.
        zombie: Entity,
        /// Archetype of the zombie.
        kind: ZombieKind,
        /// Lane the zombie walks down.
        lane: i32,
    },
    /// Announces that the wave index advanced.
    WaveStarted {
        /// Zero-based index of the wave that is now current.
        wave: u32,
        /// Whether the new wave is flagged as a final push.
        flag_wave: bool,
    },
    /// Announces that a plant fired a projectile.
    ProjectileFired {
        /// Identifier allocated for the projectile.
        projectile: Entity,
        /// Archetype of the projectile.
        kind: ProjectileKind,
        /// Lane the projectile travels down.
        lane: i32,
    },
    /// Reports a zombie whose health reached zero and was queued for removal.
    ZombieKilled {
        /// Identifier of the defeated zombie.
        zombie: Entity,
        /// Archetype of the defeated zombie.
        kind: ZombieKind,
        /// Combo counter after accounting for this kill.
        combo: u32,
    },
    /// Reports a plant whose health reached zero and was queued for removal.
    PlantDestroyed {
        /// Identifier of the destroyed plant.
        plant: Entity,
        /// Archetype of the destroyed plant.
        kind: PlantKind,
    },
    /// Announces that a reward drop was spawned.
    DropSpawned {
        /// Identifier allocated for the drop.
        drop: Entity,
        /// Kind of reward carried by the drop.
        kind: DropKind,
    },
    /// Reports that a pickup reached its collection target and applied its effect.
    PickupCollected {
        /// Identifier of the collected pickup.
        pickup: Entity,
        /// What the pickup granted.
        kind: PickupKind,
    },
    /// Announces that the lawnmower guarding a lane started its sweep.
    LawnmowerTriggered {
        /// Lane guarded by the mower.
        lane: i32,
    },
    /// Announces that a boss entered its enraged phase.
    BossEnraged {
        /// Identifier of the boss.
        boss: Entity,
    },
    /// Announces that every wave was cleared.
    LevelWon {
        /// Total coins earned over the level, including the completion reward.
        coins_earned: u32,
    },
    /// Announces that a zombie broke through an unguarded lane.
    LevelLost {
        /// Lane that was breached.
        lane: i32,
    },
    /// Reports how many entities were removed by the end-of-tick flush.
    EntitiesFlushed {
        /// Number of entities physically removed from the store.
        count: usize,
    },
}

/// Reasons a plant placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The requested cell lies outside the planting grid.
    #[error("cell lies outside the planting grid")]
    OutOfBounds,
    /// Another plant already claims the requested cell.
    #[error("cell is already occupied")]
    Occupied,
    /// The sun bank cannot cover the plant's cost.
    #[error("not enough sun: need {cost}, have {available}")]
    InsufficientSun {
        /// Sun cost of the requested plant.
        cost: u32,
        /// Sun currently banked.
        available: u32,
    },
    /// The active level does not offer the requested plant.
    #[error("plant is not available in this level")]
    Unavailable,
    /// The plant's seed packet is still recharging.
    #[error("seed packet recharging for another {remaining_ms} ms")]
    Recharging {
        /// Remaining recharge time in whole milliseconds.
        remaining_ms: u32,
    },
    /// The level has already been won or lost.
    #[error("level is already over")]
    LevelOver,
}

/// Reasons a plant removal request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum RemovalError {
    /// The requested cell lies outside the planting grid.
    #[error("cell lies outside the planting grid")]
    OutOfBounds,
    /// No plant occupies the requested cell.
    #[error("no plant occupies the cell")]
    EmptyCell,
}
