#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Lawn Defence.
//!
//! The [`World`] owns the entity [`Store`](store::Store), the grid-occupancy
//! and lawnmower indices, the economy, wave, power-up and score counters,
//! the level's random number generator and the pending-destruction queue.
//! Player intents enter through [`apply`]; gameplay systems receive
//! `&mut World` from the tick driver and call [`World::flush`] once every
//! system has run.

pub mod factory;
pub mod state;
pub mod store;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info};

use lawn_defence_core::{
    components::{Drop, Sun, WorldPos, Zombie},
    Command, Entity, Event, Field, LevelDef, PlacementError, PlantKind, RemovalError, Tuning,
    WELCOME_BANNER,
};

use state::{Economy, Outcome, PowerUps, Score, SeedBank, WaveProgress};
use store::Store;

/// Seed used when no explicit seed is configured.
pub const DEFAULT_SEED: u64 = 0x1a_3d_5e_ed;

/// Parameters fixed for the lifetime of a world.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Seed of the level's random number generator.
    pub seed: u64,
    /// Balancing knobs.
    pub tuning: Tuning,
    /// Lawn geometry.
    pub field: Field,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tuning: Tuning::default(),
            field: Field::default(),
        }
    }
}

/// Represents the authoritative Lawn Defence game state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    seed: u64,
    field: Field,
    tuning: Tuning,
    level: LevelDef,
    rng: ChaCha8Rng,
    store: Store,
    grid: Vec<Option<Entity>>,
    lawnmowers: Vec<Option<Entity>>,
    pending_destroy: Vec<Entity>,
    zombies_alive: u32,
    economy: Economy,
    seeds: SeedBank,
    waves: WaveProgress,
    power_ups: PowerUps,
    score: Score,
    outcome: Outcome,
}

impl World {
    /// Creates a world and loads the provided level into it.
    #[must_use]
    pub fn new(config: Config, level: LevelDef) -> Self {
        let Config {
            seed,
            tuning,
            field,
        } = config;
        let mut world = Self {
            banner: WELCOME_BANNER,
            seed,
            field,
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            store: Store::new(),
            grid: Vec::new(),
            lawnmowers: Vec::new(),
            pending_destroy: Vec::new(),
            zombies_alive: 0,
            economy: Economy {
                sun: level.starting_sun,
                coins_earned: 0,
                sky_drop_timer: 0.0,
            },
            seeds: SeedBank::default(),
            waves: WaveProgress::default(),
            power_ups: PowerUps::default(),
            score: Score::default(),
            outcome: Outcome::InProgress,
            level: level.clone(),
        };
        world.load_level(level);
        world
    }

    /// Rebuilds every piece of state from scratch for `level`.
    ///
    /// The random number generator is reseeded. Identifiers handed out before
    /// the reload stay stale forever.
    pub fn load_level(&mut self, level: LevelDef) {
        self.store.clear();
        self.pending_destroy.clear();
        self.grid = vec![None; self.field.cell_count()];
        self.lawnmowers = vec![None; self.field.lane_count()];
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.zombies_alive = 0;
        self.economy = Economy {
            sun: level.starting_sun,
            coins_earned: 0,
            sky_drop_timer: self.tuning.pickups.sky_first_delay,
        };
        self.seeds = SeedBank::default();
        self.waves = WaveProgress::default();
        self.power_ups = PowerUps::default();
        self.score = Score::default();
        self.outcome = Outcome::InProgress;
        info!(
            level = level.number,
            name = %level.name,
            waves = level.waves.len(),
            "level loaded"
        );
        self.level = level;

        for lane in 0..self.field.rows as i32 {
            let _ = factory::lawnmower(self, lane);
        }
    }

    /// Read-only access to the entity store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the entity store.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Lawn geometry.
    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Balancing knobs.
    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Level currently loaded.
    #[must_use]
    pub fn level(&self) -> &LevelDef {
        &self.level
    }

    /// The level's random number generator.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Banked currency.
    #[must_use]
    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    /// Mutable access to banked currency.
    pub fn economy_mut(&mut self) -> &mut Economy {
        &mut self.economy
    }

    /// Seed-packet recharge timers.
    #[must_use]
    pub fn seeds(&self) -> &SeedBank {
        &self.seeds
    }

    /// Mutable access to seed-packet recharge timers.
    pub fn seeds_mut(&mut self) -> &mut SeedBank {
        &mut self.seeds
    }

    /// Wave state machine.
    #[must_use]
    pub fn waves(&self) -> &WaveProgress {
        &self.waves
    }

    /// Mutable access to the wave state machine.
    pub fn waves_mut(&mut self) -> &mut WaveProgress {
        &mut self.waves
    }

    /// Timed buffs.
    #[must_use]
    pub fn power_ups(&self) -> &PowerUps {
        &self.power_ups
    }

    /// Mutable access to timed buffs.
    pub fn power_ups_mut(&mut self) -> &mut PowerUps {
        &mut self.power_ups
    }

    /// Kill statistics.
    #[must_use]
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Mutable access to kill statistics.
    pub fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    /// Result of the level so far.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Settles the level. Only the first verdict sticks.
    pub fn declare(&mut self, outcome: Outcome) {
        if self.outcome == Outcome::InProgress {
            self.outcome = outcome;
        }
    }

    /// Plant occupying the cell, if any.
    #[must_use]
    pub fn plant_at(&self, row: i32, col: i32) -> Option<Entity> {
        self.field
            .cell_index(row, col)
            .and_then(|index| self.grid[index])
    }

    /// Releases the cell immediately, without waiting for the flush.
    pub fn vacate(&mut self, row: i32, col: i32) {
        if let Some(index) = self.field.cell_index(row, col) {
            self.grid[index] = None;
        }
    }

    /// Unconsumed lawnmower guarding `lane`, if any.
    #[must_use]
    pub fn lawnmower(&self, lane: i32) -> Option<Entity> {
        usize::try_from(lane)
            .ok()
            .and_then(|lane| self.lawnmowers.get(lane).copied().flatten())
    }

    /// Queues an entity for removal at the end of the tick.
    ///
    /// Queuing an entity twice is a no-op.
    pub fn destroy(&mut self, entity: Entity) {
        if !self.pending_destroy.contains(&entity) {
            self.pending_destroy.push(entity);
        }
    }

    /// Whether the entity is queued for removal.
    #[must_use]
    pub fn is_pending(&self, entity: Entity) -> bool {
        self.pending_destroy.contains(&entity)
    }

    /// Removes every queued entity from the indices and the store.
    ///
    /// Returns how many entities were physically removed.
    pub fn flush(&mut self, out_events: &mut Vec<Event>) -> usize {
        let pending = std::mem::take(&mut self.pending_destroy);
        let mut removed = 0;
        for entity in pending {
            for slot in self.grid.iter_mut().chain(self.lawnmowers.iter_mut()) {
                if *slot == Some(entity) {
                    *slot = None;
                }
            }
            let was_zombie = self.store.has::<Zombie>(entity);
            if self.store.destroy(entity) {
                removed += 1;
                if was_zombie {
                    self.zombies_alive = self.zombies_alive.saturating_sub(1);
                }
            }
        }
        if removed > 0 {
            debug!(removed, "flushed destroyed entities");
            out_events.push(Event::EntitiesFlushed { count: removed });
        }
        removed
    }

    /// Places a plant after checking the level roster, the cell, the seed
    /// recharge and the sun bank, then pays for it.
    pub fn place_plant(
        &mut self,
        kind: PlantKind,
        row: i32,
        col: i32,
    ) -> Result<Entity, PlacementError> {
        if self.outcome != Outcome::InProgress {
            return Err(PlacementError::LevelOver);
        }
        if !self.field.contains_cell(row, col) {
            return Err(PlacementError::OutOfBounds);
        }
        if !self.level.offers(kind) {
            return Err(PlacementError::Unavailable);
        }
        if self.plant_at(row, col).is_some() {
            return Err(PlacementError::Occupied);
        }
        let remaining = self.seeds.remaining(kind);
        if remaining > 0.0 {
            return Err(PlacementError::Recharging {
                remaining_ms: (remaining * 1000.0).ceil() as u32,
            });
        }
        let cost = kind.stats().cost;
        if self.economy.sun < cost {
            return Err(PlacementError::InsufficientSun {
                cost,
                available: self.economy.sun,
            });
        }

        let plant = factory::plant(self, kind, row, col)?;
        let _ = self.economy.try_spend(cost);
        if self.tuning.seed_recharge {
            self.seeds.start(kind);
        }
        Ok(plant)
    }

    /// Shovels the plant out of the cell, releasing the cell immediately.
    pub fn remove_plant(&mut self, row: i32, col: i32) -> Result<Entity, RemovalError> {
        let index = self
            .field
            .cell_index(row, col)
            .ok_or(RemovalError::OutOfBounds)?;
        let plant = self.grid[index].ok_or(RemovalError::EmptyCell)?;
        self.grid[index] = None;
        self.destroy(plant);
        Ok(plant)
    }

    /// Starts collecting every idle pickup within click range of `(x, y)`.
    ///
    /// Suns home toward the sun counter and drops toward the top centre of
    /// the field. Returns the pickups that started homing.
    pub fn collect_at(&mut self, x: f32, y: f32) -> Vec<Entity> {
        let click = glam::Vec2::new(x, y);
        let pickups = self.tuning.pickups;
        let sun_target = glam::Vec2::new(pickups.sun_counter_x, pickups.counter_y);
        let drop_target = glam::Vec2::new(self.field.width * 0.5, pickups.counter_y);
        let mut collecting = Vec::new();

        for (entity, (sun, position)) in self.store.each::<(Sun, WorldPos)>() {
            if sun.motion.collecting || self.is_pending(entity) {
                continue;
            }
            if position.vec().distance(click) < pickups.sun_click_radius {
                let _ = self
                    .store
                    .modify::<Sun>(entity, |sun| sun.motion.collect(sun_target));
                collecting.push(entity);
            }
        }
        for (entity, (drop, position)) in self.store.each::<(Drop, WorldPos)>() {
            if drop.motion.collecting || self.is_pending(entity) {
                continue;
            }
            if position.vec().distance(click) < pickups.drop_click_radius {
                let _ = self
                    .store
                    .modify::<Drop>(entity, |drop| drop.motion.collect(drop_target));
                collecting.push(entity);
            }
        }
        collecting
    }
}

/// Applies the provided player intent, reporting its outcome as events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlacePlant { kind, row, col } => match world.place_plant(kind, row, col) {
            Ok(plant) => out_events.push(Event::PlantPlaced {
                plant,
                kind,
                row,
                col,
            }),
            Err(reason) => {
                debug!(?kind, row, col, %reason, "placement rejected");
                out_events.push(Event::PlacementRejected {
                    kind,
                    row,
                    col,
                    reason,
                });
            }
        },
        Command::RemovePlant { row, col } => match world.remove_plant(row, col) {
            Ok(plant) => out_events.push(Event::PlantRemoved { plant, row, col }),
            Err(reason) => {
                debug!(row, col, %reason, "removal rejected");
                out_events.push(Event::RemovalRejected { row, col, reason });
            }
        },
        Command::CollectAt { x, y } => {
            for pickup in world.collect_at(x, y) {
                out_events.push(Event::PickupCollecting { pickup });
            }
        }
    }
}

/// Broken structural rule detected by [`query::check_invariants`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Health outside `0..=max`.
    #[error("entity {entity:?} has health {current}/{max}")]
    HealthOutOfRange {
        /// Offending entity.
        entity: Entity,
        /// Stored hit points.
        current: i32,
        /// Stored maximum.
        max: i32,
    },
    /// Armor outside `0..=max`.
    #[error("entity {entity:?} has armor {current}/{max}")]
    ArmorOutOfRange {
        /// Offending entity.
        entity: Entity,
        /// Stored armor.
        current: i32,
        /// Stored maximum.
        max: i32,
    },
    /// A grid cell references an entity that is gone or is not a plant there.
    #[error("grid cell ({row}, {col}) holds a stale entry")]
    StaleGridEntry {
        /// Lane of the cell.
        row: i32,
        /// Column of the cell.
        col: i32,
    },
    /// A live plant is not registered in the cell it claims.
    #[error("plant {entity:?} is missing from grid cell ({row}, {col})")]
    UnregisteredPlant {
        /// Offending plant.
        entity: Entity,
        /// Lane the plant claims.
        row: i32,
        /// Column the plant claims.
        col: i32,
    },
    /// A lane references a lawnmower that is gone or guards another lane.
    #[error("lane {lane} holds a stale lawnmower entry")]
    StaleLawnmower {
        /// Lane of the entry.
        lane: i32,
    },
    /// The live zombie counter disagrees with the store.
    #[error("zombie counter says {tracked} but the store holds {actual}")]
    ZombieCountMismatch {
        /// Counter value.
        tracked: u32,
        /// Zombies in the store.
        actual: u32,
    },
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lawn_defence_core::{
        components::{Armor, GridPos, Health, Lawnmower, Plant, Zombie},
        Entity, PlantKind,
    };

    use super::{state::Outcome, InvariantViolation, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Sun currently banked.
    #[must_use]
    pub fn sun(world: &World) -> u32 {
        world.economy.sun
    }

    /// Coins earned so far.
    #[must_use]
    pub fn coins_earned(world: &World) -> u32 {
        world.economy.coins_earned
    }

    /// Result of the level so far.
    #[must_use]
    pub fn outcome(world: &World) -> Outcome {
        world.outcome
    }

    /// Index of the current wave; equals [`wave_count`] once every wave is out.
    #[must_use]
    pub fn current_wave(world: &World) -> u32 {
        world.waves.current_wave
    }

    /// Number of waves in the loaded level.
    #[must_use]
    pub fn wave_count(world: &World) -> u32 {
        world.level.waves.len() as u32
    }

    /// Zombie entities currently in the store, including ones awaiting removal.
    #[must_use]
    pub fn zombies_alive(world: &World) -> u32 {
        world.zombies_alive
    }

    /// Zombies defeated this level.
    #[must_use]
    pub fn zombies_killed(world: &World) -> u32 {
        world.score.zombies_killed
    }

    /// Current and best kill combo.
    #[must_use]
    pub fn combo(world: &World) -> (u32, u32) {
        (world.score.combo, world.score.max_combo)
    }

    /// Plant occupying the cell, if any.
    #[must_use]
    pub fn plant_at(world: &World, row: i32, col: i32) -> Option<Entity> {
        world.plant_at(row, col)
    }

    /// Unconsumed lawnmower guarding the lane, if any.
    #[must_use]
    pub fn lawnmower(world: &World, lane: i32) -> Option<Entity> {
        world.lawnmower(lane)
    }

    /// Seconds until `kind` can be placed again.
    #[must_use]
    pub fn seed_recharge(world: &World, kind: PlantKind) -> f32 {
        world.seeds.remaining(kind)
    }

    /// Zombies walking down each lane, indexed by lane.
    #[must_use]
    pub fn lane_occupancy(world: &World) -> Vec<u32> {
        let mut counts = vec![0; world.field.lane_count()];
        for (_, (_, position)) in world.store.each::<(Zombie, GridPos)>() {
            if let Some(count) = usize::try_from(position.row)
                .ok()
                .and_then(|row| counts.get_mut(row))
            {
                *count += 1;
            }
        }
        counts
    }

    /// Verifies the structural rules every flushed world must satisfy and
    /// reports each violation found.
    pub fn check_invariants(world: &World) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        let store = &world.store;

        for (entity, (health,)) in store.each::<(Health,)>() {
            if health.current < 0 || health.current > health.max {
                violations.push(InvariantViolation::HealthOutOfRange {
                    entity,
                    current: health.current,
                    max: health.max,
                });
            }
        }
        for (entity, (armor,)) in store.each::<(Armor,)>() {
            if armor.current < 0 || armor.current > armor.max {
                violations.push(InvariantViolation::ArmorOutOfRange {
                    entity,
                    current: armor.current,
                    max: armor.max,
                });
            }
        }

        let columns = world.field.columns as i32;
        for (index, slot) in world.grid.iter().enumerate() {
            let Some(entity) = *slot else {
                continue;
            };
            let row = index as i32 / columns;
            let col = index as i32 % columns;
            let claims_cell = store.has::<Plant>(entity)
                && store.get::<GridPos>(entity) == Some(&GridPos { row, col });
            if !store.alive(entity) || !claims_cell {
                violations.push(InvariantViolation::StaleGridEntry { row, col });
            }
        }
        for (entity, (_, position)) in store.each::<(Plant, GridPos)>() {
            if world.is_pending(entity) {
                continue;
            }
            if world.plant_at(position.row, position.col) != Some(entity) {
                violations.push(InvariantViolation::UnregisteredPlant {
                    entity,
                    row: position.row,
                    col: position.col,
                });
            }
        }

        for (lane, slot) in world.lawnmowers.iter().enumerate() {
            let Some(entity) = *slot else {
                continue;
            };
            let lane = lane as i32;
            let guards_lane = store
                .get::<Lawnmower>(entity)
                .is_some_and(|mower| mower.lane == lane);
            if !guards_lane {
                violations.push(InvariantViolation::StaleLawnmower { lane });
            }
        }

        let actual = store.count::<Zombie>() as u32;
        if actual != world.zombies_alive {
            violations.push(InvariantViolation::ZombieCountMismatch {
                tracked: world.zombies_alive,
                actual,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
