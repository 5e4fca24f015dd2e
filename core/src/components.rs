//! Plain-data components attached to entities.
//!
//! Components carry state only; the gameplay systems own every rule that
//! mutates them. An entity's archetype is the set of components it holds
//! plus the explicit kind stored in [`Plant`], [`Zombie`], [`Projectile`] or
//! [`Drop`].

use glam::Vec2;

use crate::kinds::{DropKind, PlantKind, ProjectileKind, ZombieKind};

/// Lane and column occupied by an entity.
///
/// A column equal to the grid width marks the approach corridor to the right
/// of the lawn; a column of `-1` marks the strip left of the lawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    /// Zero-based lane index.
    pub row: i32,
    /// Column index, see the type docs for the out-of-grid values.
    pub col: i32,
}

/// Continuous position in simulation space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldPos {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl WorldPos {
    /// Creates a position from its coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position expressed as a vector.
    #[must_use]
    pub const fn vec(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for WorldPos {
    fn from(value: Vec2) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Signed rate of change applied to a [`WorldPos`] each second.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    /// Horizontal rate.
    pub x: f32,
    /// Vertical rate.
    pub y: f32,
}

/// Hit points of a plant or zombie.
///
/// `current` stays within `0..=max`; zero marks the entity as dead and
/// awaiting cleanup rather than destroyed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Health {
    /// Remaining hit points.
    pub current: i32,
    /// Maximum hit points.
    pub max: i32,
    /// Seconds left on the damage flash indicator.
    pub damage_flash: f32,
}

impl Health {
    /// Creates a full health pool.
    #[must_use]
    pub const fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            damage_flash: 0.0,
        }
    }

    /// Whether the pool has been emptied.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Remaining hit points as a fraction of the maximum.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    /// Removes up to `amount` hit points, clamping at zero.
    pub fn damage(&mut self, amount: i32) {
        self.current = (self.current - amount.max(0)).max(0);
    }

    /// Empties the pool outright.
    pub fn kill(&mut self) {
        self.current = 0;
    }
}

/// Hit-point buffer consumed before [`Health`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Armor {
    /// Remaining armor.
    pub current: i32,
    /// Maximum armor.
    pub max: i32,
}

impl Armor {
    /// Creates an intact armor piece.
    #[must_use]
    pub const fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Absorbs as much of `amount` as the armor allows and returns the
    /// overflow that should carry into health.
    pub fn absorb(&mut self, amount: i32) -> i32 {
        let absorbed = amount.clamp(0, self.current.max(0));
        self.current -= absorbed;
        amount - absorbed
    }

    /// Whether the armor has been fully consumed.
    #[must_use]
    pub const fn is_broken(&self) -> bool {
        self.current <= 0
    }
}

/// Marker for plants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PlantTag;

/// Marker for zombies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EnemyTag;

/// Marker for projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ProjectileTag;

/// Marker for sun pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SunTag;

/// Marker for lawnmowers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LawnmowerTag;

/// Marker for reward drops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DropTag;

/// Explicit archetype of a plant entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Plant {
    /// Plant archetype.
    pub kind: PlantKind,
}

/// Explicit archetype and eating state of a zombie entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zombie {
    /// Zombie archetype.
    pub kind: ZombieKind,
    /// Whether the zombie is currently chewing on a plant.
    pub eating: bool,
    /// Seconds until the next bite.
    pub eat_timer: f32,
    /// Seconds between bites.
    pub eat_rate: f32,
}

/// Countdown to a plant's next volley.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackTimer {
    /// Seconds between volleys.
    pub cooldown: f32,
    /// Seconds until the next volley.
    pub timer: f32,
}

/// Countdown to a plant's next sun.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunProducer {
    /// Seconds between productions.
    pub interval: f32,
    /// Seconds until the next production.
    pub timer: f32,
}

/// Arming state of a potato mine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PotatoMineState {
    /// Seconds until the mine arms.
    pub arm_timer: f32,
    /// Whether the mine detonates on contact.
    pub armed: bool,
}

/// Digestion state of a chomper.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ChomperState {
    /// Seconds of digestion left.
    pub digest_timer: f32,
    /// Whether the chomper is digesting and cannot bite.
    pub eating: bool,
}

/// Fuse of an explosive plant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionEffect {
    /// Seconds since the plant was placed.
    pub timer: f32,
    /// Seconds until detonation.
    pub duration: f32,
    /// Current radius of the expanding blast front.
    pub radius: f32,
}

/// One-shot ability flags of special zombies.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ZombieSpecial {
    /// Whether a vaulter already used its pole.
    pub has_jumped: bool,
    /// Whether the zombie lost its armor and is enraged.
    pub is_angry: bool,
    /// Seconds accumulated toward a summon.
    pub summon_timer: f32,
    /// Whether the summon already happened.
    pub has_summoned: bool,
}

/// Phase of the boss state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BossPhase {
    /// Walking at normal speed.
    #[default]
    Normal,
    /// Below half health and permanently faster.
    Enraged,
}

/// Boss state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossState {
    /// Seconds accumulated toward the next smash.
    pub smash_timer: f32,
    /// Seconds a smash needs to charge.
    pub smash_cooldown: f32,
    /// Whether the boss already threw its minion.
    pub has_thrown: bool,
    /// Current phase.
    pub phase: BossPhase,
}

/// Multiplicative speed modifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Freezable {
    /// Factor applied to the entity's speed.
    pub slow_factor: f32,
    /// Seconds until the factor resets to 1.0.
    pub timer: f32,
}

impl Freezable {
    /// Applies a slow of `factor` lasting `duration` seconds.
    pub fn apply(&mut self, factor: f32, duration: f32) {
        self.slow_factor = factor;
        self.timer = duration;
    }
}

impl Default for Freezable {
    fn default() -> Self {
        Self {
            slow_factor: 1.0,
            timer: 0.0,
        }
    }
}

/// Lane-locked damage carrier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    /// Projectile archetype.
    pub kind: ProjectileKind,
    /// Travel speed in units per second.
    pub speed: f32,
    /// Damage dealt on hit.
    pub damage: i32,
    /// Lane the projectile is locked to.
    pub lane: i32,
}

/// Fall-idle-collect state shared by every pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupMotion {
    /// Height at which the pickup stops falling.
    pub target_y: f32,
    /// Whether the pickup is still falling.
    pub falling: bool,
    /// Whether the pickup is homing toward its collection target.
    pub collecting: bool,
    /// Point the pickup homes toward once collected.
    pub collect_target: Vec2,
    /// Seconds until an uncollected pickup expires.
    pub lifetime: f32,
}

impl PickupMotion {
    /// Creates a pickup that falls toward `target_y`.
    #[must_use]
    pub const fn falling(target_y: f32, lifetime: f32) -> Self {
        Self {
            target_y,
            falling: true,
            collecting: false,
            collect_target: Vec2::ZERO,
            lifetime,
        }
    }

    /// Starts homing toward `target`.
    pub fn collect(&mut self, target: Vec2) {
        self.collecting = true;
        self.collect_target = target;
    }
}

/// Sun pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sun {
    /// Shared pickup state.
    pub motion: PickupMotion,
}

/// Reward drop pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drop {
    /// Reward granted on collection.
    pub kind: DropKind,
    /// Shared pickup state.
    pub motion: PickupMotion,
}

/// One-shot lane-clearing defense.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lawnmower {
    /// Lane guarded by the mower.
    pub lane: i32,
    /// Whether the mower is sweeping.
    pub triggered: bool,
    /// Sweep speed in units per second.
    pub speed: f32,
}

/// Animation cadence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteAnim {
    /// Frame currently displayed.
    pub frame_index: u32,
    /// Seconds accumulated toward the next frame.
    pub timer: f32,
    /// Frames in the loop.
    pub frame_count: u32,
    /// Frames advanced per second.
    pub fps: f32,
}

impl SpriteAnim {
    /// Creates a loop starting at its first frame.
    #[must_use]
    pub const fn looping(frame_count: u32, fps: f32) -> Self {
        Self {
            frame_index: 0,
            timer: 0.0,
            frame_count,
            fps,
        }
    }
}
