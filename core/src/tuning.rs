//! Balancing knobs for every gameplay rule.
//!
//! The defaults reproduce the shipped game. A partial TOML document can
//! override any subset of fields; missing fields keep their default value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kinds::Blast;

/// Aggregated tuning knobs consumed by the gameplay systems.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Projectile flight, hit and status-effect parameters.
    pub combat: CombatTuning,
    /// Plant-specific timings and reach.
    pub plants: PlantTuning,
    /// Zombie spawn placement, eating and ability parameters.
    pub zombies: ZombieTuning,
    /// Sun and drop motion, lifetime and click parameters.
    pub pickups: PickupTuning,
    /// Lawnmower and defender-baseline geometry.
    pub defence: DefenceTuning,
    /// Effects granted by collected drops.
    pub power_ups: PowerUpTuning,
    /// Roll thresholds for reward drops.
    pub rewards: RewardTable,
    /// Kill-combo timing.
    pub combo: ComboTuning,
    /// Wave lane distribution.
    pub waves: WaveTuning,
    /// Whether placing a plant starts its seed-packet recharge.
    pub seed_recharge: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            combat: CombatTuning::default(),
            plants: PlantTuning::default(),
            zombies: ZombieTuning::default(),
            pickups: PickupTuning::default(),
            defence: DefenceTuning::default(),
            power_ups: PowerUpTuning::default(),
            rewards: RewardTable::default(),
            combo: ComboTuning::default(),
            waves: WaveTuning::default(),
            seed_recharge: true,
        }
    }
}

/// Projectile flight, hit and status-effect parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombatTuning {
    /// Travel speed of every projectile.
    pub projectile_speed: f32,
    /// Maximum horizontal distance between a projectile and the zombie it hits.
    pub projectile_hit_radius: f32,
    /// Distance beyond the field's right edge at which projectiles are discarded.
    pub exit_margin: f32,
    /// Vertical lift applied to a projectile's spawn point above the shooter.
    pub muzzle_lift: f32,
    /// Seconds the damage flash stays visible after a hit.
    pub damage_flash: f32,
    /// Speed factor applied by a frozen pea.
    pub snow_slow_factor: f32,
    /// Seconds a frozen pea's slow lasts.
    pub snow_slow_duration: f32,
    /// Distance behind an igniter's centre where projectiles start igniting.
    pub ignite_behind: f32,
    /// Distance ahead of an igniter's centre where projectiles stop igniting.
    pub ignite_ahead: f32,
    /// Damage multiplier applied when a projectile ignites.
    pub ignite_damage_multiplier: i32,
    /// Multiplier applied to attack timers while the plant boost is active.
    pub attack_boost_multiplier: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            projectile_speed: 300.0,
            projectile_hit_radius: 20.0,
            exit_margin: 50.0,
            muzzle_lift: 5.0,
            damage_flash: 0.15,
            snow_slow_factor: 0.5,
            snow_slow_duration: 4.0,
            ignite_behind: 5.0,
            ignite_ahead: 15.0,
            ignite_damage_multiplier: 2,
            attack_boost_multiplier: 2.0,
        }
    }
}

/// Plant-specific timings and reach.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantTuning {
    /// Seconds a potato mine needs to arm.
    pub mine_arm_time: f32,
    /// Trigger distance of an armed mine, in cell widths.
    pub mine_trigger_cells: f32,
    /// Forward reach of a chomper, in cell widths.
    pub chomper_reach_cells: f32,
    /// Seconds a chomper digests after swallowing.
    pub chomper_digest: f32,
    /// Seconds before a square-blast explosive detonates.
    pub square_fuse: f32,
    /// Seconds before a lane-blast explosive detonates.
    pub lane_fuse: f32,
    /// Growth rate of the expanding blast front, in units per second.
    pub blast_growth: f32,
    /// Vertical offset above a sun producer where its sun appears.
    pub sun_spawn_lift: f32,
    /// Vertical offset below a sun producer where its sun settles.
    pub sun_settle_drop: f32,
    /// Maximum horizontal scatter of produced sun.
    pub sun_scatter: f32,
}

impl Default for PlantTuning {
    fn default() -> Self {
        Self {
            mine_arm_time: 15.0,
            mine_trigger_cells: 0.5,
            chomper_reach_cells: 1.5,
            chomper_digest: 20.0,
            square_fuse: 0.3,
            lane_fuse: 0.2,
            blast_growth: 200.0,
            sun_spawn_lift: 30.0,
            sun_settle_drop: 20.0,
            sun_scatter: 10.0,
        }
    }
}

impl PlantTuning {
    /// Seconds before an explosive with the provided blast detonates.
    #[must_use]
    pub const fn fuse(&self, blast: Blast) -> f32 {
        match blast {
            Blast::Square => self.square_fuse,
            Blast::Lane => self.lane_fuse,
        }
    }
}

/// Zombie spawn placement, eating and ability parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZombieTuning {
    /// Relative spread of per-zombie walking speed around the archetype speed.
    pub speed_variation: f32,
    /// Distance right of the grid where the approach corridor starts.
    pub corridor_offset: f32,
    /// Random extra distance added to the corridor start.
    pub corridor_jitter: f32,
    /// Maximum distance from a cell centre at which a zombie bites, in cell widths.
    pub eat_tolerance_cells: f32,
    /// How far ahead a vaulter looks for a plant, in cell widths.
    pub vault_lookahead_cells: f32,
    /// Distance a vaulter jumps, in cell widths.
    pub vault_jump_cells: f32,
    /// Seconds before a summoner calls its backup.
    pub summon_delay: f32,
    /// Health fraction at or below which a boss becomes enraged.
    pub boss_enrage_fraction: f32,
    /// Speed multiplier applied when a boss becomes enraged.
    pub boss_enrage_speed: f32,
    /// Seconds a boss smash needs to charge.
    pub boss_smash_cooldown: f32,
    /// Columns ahead of the boss where its minion lands.
    pub boss_throw_cells: i32,
}

impl Default for ZombieTuning {
    fn default() -> Self {
        Self {
            speed_variation: 0.10,
            corridor_offset: 40.0,
            corridor_jitter: 60.0,
            eat_tolerance_cells: 0.6,
            vault_lookahead_cells: 0.3,
            vault_jump_cells: 1.5,
            summon_delay: 3.0,
            boss_enrage_fraction: 0.5,
            boss_enrage_speed: 1.3,
            boss_smash_cooldown: 4.0,
            boss_throw_cells: 3,
        }
    }
}

/// Sun and drop motion, lifetime and click parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickupTuning {
    /// Sun granted per collected sun pickup.
    pub sun_value: u32,
    /// Seconds an uncollected sun stays on the lawn.
    pub sun_lifetime: f32,
    /// Seconds an uncollected drop stays on the lawn.
    pub drop_lifetime: f32,
    /// Falling speed of every pickup.
    pub fall_speed: f32,
    /// Homing speed of a collected sun.
    pub sun_collect_speed: f32,
    /// Homing speed of a collected drop.
    pub drop_collect_speed: f32,
    /// Distance from the collection target at which a pickup is collected.
    pub arrival_radius: f32,
    /// Click radius around a sun.
    pub sun_click_radius: f32,
    /// Click radius around a drop.
    pub drop_click_radius: f32,
    /// Horizontal position of the sun counter that suns home toward.
    pub sun_counter_x: f32,
    /// Vertical position of the counters that pickups home toward.
    pub counter_y: f32,
    /// Vertical offset above a defeated zombie where its drop appears.
    pub drop_spawn_lift: f32,
    /// Vertical offset below a defeated zombie where its drop settles.
    pub drop_settle_drop: f32,
    /// Height above the field where sky sun appears.
    pub sky_spawn_y: f32,
    /// Seconds before the first sky sun.
    pub sky_first_delay: f32,
    /// Minimum seconds between sky suns.
    pub sky_interval: f32,
    /// Random extra seconds added to each sky interval.
    pub sky_jitter: f32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            sun_value: 25,
            sun_lifetime: 10.0,
            drop_lifetime: 12.0,
            fall_speed: 50.0,
            sun_collect_speed: 600.0,
            drop_collect_speed: 500.0,
            arrival_radius: 10.0,
            sun_click_radius: 25.0,
            drop_click_radius: 30.0,
            sun_counter_x: 60.0,
            counter_y: 30.0,
            drop_spawn_lift: 20.0,
            drop_settle_drop: 30.0,
            sky_spawn_y: -20.0,
            sky_first_delay: 5.0,
            sky_interval: 5.0,
            sky_jitter: 4.0,
        }
    }
}

/// Lawnmower and defender-baseline geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefenceTuning {
    /// Gap between a parked mower and the grid's left edge.
    pub mower_gap: f32,
    /// Sweep speed of a triggered mower.
    pub mower_speed: f32,
    /// Distance ahead of a parked mower at which a zombie triggers it.
    pub mower_trigger_reach: f32,
    /// Horizontal reach of a sweeping mower.
    pub mower_hit_radius: f32,
    /// Distance left of the grid that marks the defender baseline.
    pub baseline_margin: f32,
}

impl Default for DefenceTuning {
    fn default() -> Self {
        Self {
            mower_gap: 30.0,
            mower_speed: 400.0,
            mower_trigger_reach: 10.0,
            mower_hit_radius: 30.0,
            baseline_margin: 60.0,
        }
    }
}

/// Effects granted by collected drops.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerUpTuning {
    /// Coins granted by a coin drop.
    pub coin_value: u32,
    /// Coins granted by a diamond drop.
    pub diamond_value: u32,
    /// Sun granted by a sun-burst drop.
    pub sun_burst: u32,
    /// Seconds the plant boost lasts.
    pub plant_boost_duration: f32,
    /// Seconds the global freeze lasts.
    pub freeze_all_duration: f32,
    /// Speed factor re-applied to every freezable entity during a global freeze.
    pub freeze_all_factor: f32,
    /// Duration of each re-applied global-freeze slow.
    pub freeze_all_refresh: f32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            coin_value: 10,
            diamond_value: 50,
            sun_burst: 100,
            plant_boost_duration: 10.0,
            freeze_all_duration: 5.0,
            freeze_all_factor: 0.3,
            freeze_all_refresh: 1.0,
        }
    }
}

/// Roll thresholds for reward drops on a percentile roll in `0..100`.
///
/// Rolls below `power_up_below` yield a power-up, rolls below `diamond_below`
/// a diamond, rolls below `coin_below` a coin, and the rest nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewardTable {
    /// Exclusive upper roll for the power-up tier.
    pub power_up_below: u32,
    /// Exclusive upper roll for the diamond tier.
    pub diamond_below: u32,
    /// Exclusive upper roll for the coin tier.
    pub coin_below: u32,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            power_up_below: 3,
            diamond_below: 8,
            coin_below: 38,
        }
    }
}

/// Tier selected by a reward roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RewardTier {
    /// One of the power-up drops.
    PowerUp,
    /// A diamond drop.
    Diamond,
    /// A coin drop.
    Coin,
    /// No drop.
    Nothing,
}

impl RewardTable {
    /// Maps a percentile roll onto its tier.
    #[must_use]
    pub const fn tier(&self, roll: u32) -> RewardTier {
        if roll < self.power_up_below {
            RewardTier::PowerUp
        } else if roll < self.diamond_below {
            RewardTier::Diamond
        } else if roll < self.coin_below {
            RewardTier::Coin
        } else {
            RewardTier::Nothing
        }
    }
}

/// Kill-combo timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComboTuning {
    /// Real-time seconds without a kill after which the combo breaks.
    pub break_after: f32,
    /// Seconds the combo counter stays on display after a kill.
    pub display: f32,
}

impl Default for ComboTuning {
    fn default() -> Self {
        Self {
            break_after: 2.0,
            display: 2.0,
        }
    }
}

/// Wave lane distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveTuning {
    /// Percentage of spawns that pick a uniformly random lane instead of the least populated one.
    pub random_lane_percent: u32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            random_lane_percent: 40,
        }
    }
}

/// Errors raised while loading tuning overrides.
#[derive(Debug, Error)]
pub enum TuningError {
    /// The document is not valid TOML or does not match the tuning layout.
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value lies outside its permitted range.
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

impl Tuning {
    /// Parses a TOML document of overrides and validates the result.
    pub fn from_toml_str(contents: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = toml::from_str(contents)?;
        tuning.validate()?;
        tracing::debug!(?tuning.rewards, "loaded tuning overrides");
        Ok(tuning)
    }

    /// Checks every cross-field constraint.
    pub fn validate(&self) -> Result<(), TuningError> {
        let rewards = &self.rewards;
        if rewards.power_up_below > rewards.diamond_below
            || rewards.diamond_below > rewards.coin_below
        {
            return Err(TuningError::Invalid("reward tiers must be ascending"));
        }
        if rewards.coin_below > 100 {
            return Err(TuningError::Invalid("reward tiers must not exceed 100"));
        }
        if self.waves.random_lane_percent > 100 {
            return Err(TuningError::Invalid(
                "random lane percentage must not exceed 100",
            ));
        }
        for factor in [
            self.combat.snow_slow_factor,
            self.power_ups.freeze_all_factor,
        ] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(TuningError::Invalid("slow factors must lie within 0..=1"));
            }
        }
        if self.pickups.sun_collect_speed <= 0.0 || self.pickups.drop_collect_speed <= 0.0 {
            return Err(TuningError::Invalid("collection speeds must be positive"));
        }
        if self.pickups.sky_interval <= 0.0 {
            return Err(TuningError::Invalid("sky drop interval must be positive"));
        }
        if self.zombies.speed_variation < 0.0 || self.zombies.speed_variation >= 1.0 {
            return Err(TuningError::Invalid("speed variation must lie within 0..1"));
        }
        Ok(())
    }
}
