//! Archetype enumerations and the static descriptor tables keyed by them.
//!
//! Every per-kind number and behavior lives here. Gameplay systems never
//! match on a concrete plant or zombie kind; they ask the kind for its
//! [`PlantBehavior`] or [`ZombieAbility`] and act on the descriptor, so a new
//! archetype is added by extending these tables alone.

use serde::{Deserialize, Serialize};

/// Archetypes of plants that can be placed on the lawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlantKind {
    /// Produces sun at a fixed interval.
    Sunflower,
    /// Fires a single pea.
    Peashooter,
    /// High-health blocker.
    WallNut,
    /// Fires a pea that slows its target.
    SnowPea,
    /// Destroys every zombie in the surrounding 3x3 cells.
    CherryBomb,
    /// Arms over time, then destroys the first zombie that steps on it.
    PotatoMine,
    /// Fires two peas per volley.
    Repeater,
    /// Swallows the nearest zombie ahead of it, then digests.
    Chomper,
    /// Destroys every zombie in its lane.
    Jalapeno,
    /// Ignites peas passing through it.
    Torchwood,
}

impl PlantKind {
    /// Every plant archetype in roster order.
    pub const ALL: [PlantKind; 10] = [
        PlantKind::Sunflower,
        PlantKind::Peashooter,
        PlantKind::WallNut,
        PlantKind::SnowPea,
        PlantKind::CherryBomb,
        PlantKind::PotatoMine,
        PlantKind::Repeater,
        PlantKind::Chomper,
        PlantKind::Jalapeno,
        PlantKind::Torchwood,
    ];

    /// Position of the kind within [`PlantKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static stat block for the kind.
    #[must_use]
    pub const fn stats(self) -> &'static PlantStats {
        &PLANT_STATS[self.index()]
    }

    /// Behavior descriptor that drives the plant's gameplay systems.
    #[must_use]
    pub const fn behavior(self) -> PlantBehavior {
        match self {
            Self::Sunflower => PlantBehavior::SunProducer {
                interval: 5.0,
                first_delay: 3.0,
            },
            Self::Peashooter => PlantBehavior::Shooter {
                projectile: ProjectileKind::Pea,
                volley: &[20.0],
            },
            Self::SnowPea => PlantBehavior::Shooter {
                projectile: ProjectileKind::SnowPea,
                volley: &[20.0],
            },
            Self::Repeater => PlantBehavior::Shooter {
                projectile: ProjectileKind::Pea,
                volley: &[20.0, 5.0],
            },
            Self::WallNut => PlantBehavior::Blocker,
            Self::CherryBomb => PlantBehavior::Explosive(Blast::Square),
            Self::Jalapeno => PlantBehavior::Explosive(Blast::Lane),
            Self::PotatoMine => PlantBehavior::Mine,
            Self::Chomper => PlantBehavior::Chomper,
            Self::Torchwood => PlantBehavior::Igniter,
        }
    }
}

/// Static numbers describing a plant archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantStats {
    /// Display name of the archetype.
    pub name: &'static str,
    /// Sun spent to place the plant.
    pub cost: u32,
    /// Starting and maximum health.
    pub health: i32,
    /// Seconds the seed packet recharges after a placement.
    pub recharge: f32,
    /// Seconds between volleys, zero for plants that never shoot.
    pub attack_rate: f32,
    /// Damage carried by each projectile fired.
    pub damage: i32,
}

const fn plant(
    name: &'static str,
    cost: u32,
    health: i32,
    recharge: f32,
    attack_rate: f32,
    damage: i32,
) -> PlantStats {
    PlantStats {
        name,
        cost,
        health,
        recharge,
        attack_rate,
        damage,
    }
}

const PLANT_STATS: [PlantStats; 10] = [
    plant("Sunflower", 50, 100, 7.5, 0.0, 0),
    plant("Peashooter", 100, 100, 7.5, 1.4, 20),
    plant("Wall-nut", 50, 800, 25.0, 0.0, 0),
    plant("Snow Pea", 175, 100, 7.5, 1.4, 20),
    plant("Cherry Bomb", 150, 1, 45.0, 0.0, 0),
    plant("Potato Mine", 25, 100, 25.0, 0.0, 0),
    plant("Repeater", 200, 100, 7.5, 1.4, 20),
    plant("Chomper", 150, 100, 7.5, 0.0, 0),
    plant("Jalapeno", 125, 1, 45.0, 0.0, 0),
    plant("Torchwood", 175, 200, 7.5, 0.0, 0),
];

/// Behavior descriptor attached to each plant archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlantBehavior {
    /// Passive plant that only soaks bites.
    Blocker,
    /// Fires one projectile per volley entry while its lane holds a zombie.
    Shooter {
        /// Projectile archetype fired.
        projectile: ProjectileKind,
        /// Horizontal spawn offsets, one projectile per entry.
        volley: &'static [f32],
    },
    /// Periodically spawns a sun pickup.
    SunProducer {
        /// Seconds between productions.
        interval: f32,
        /// Seconds before the first production.
        first_delay: f32,
    },
    /// Arms over time, then detonates on contact.
    Mine,
    /// Swallows a zombie ahead, then digests.
    Chomper,
    /// Detonates after a short fuse.
    Explosive(Blast),
    /// Upgrades projectiles travelling through its cell.
    Igniter,
}

/// Area affected when an explosive plant detonates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blast {
    /// The 3x3 block of cells centred on the plant.
    Square,
    /// Every cell in the plant's lane.
    Lane,
}

impl Blast {
    /// Reports whether a zombie at the provided cell is caught by a blast
    /// centred on `origin`, both expressed as `(row, col)`.
    #[must_use]
    pub fn covers(self, origin: (i32, i32), target: (i32, i32)) -> bool {
        match self {
            Self::Square => (origin.0 - target.0).abs() <= 1 && (origin.1 - target.1).abs() <= 1,
            Self::Lane => origin.0 == target.0,
        }
    }
}

/// Archetypes of zombies that walk down the lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZombieKind {
    /// Plain walker.
    Basic,
    /// Walker wearing a traffic cone.
    Conehead,
    /// Walker wearing a bucket.
    Buckethead,
    /// Fast walker that leads the final wave.
    Flag,
    /// Speeds up once its newspaper is destroyed.
    Newspaper,
    /// Vaults over the first plant it meets.
    PoleVault,
    /// Heavily armored sprinter.
    Football,
    /// Summons backup walkers once.
    Dancing,
    /// Small, fast walker thrown by bosses.
    Imp,
    /// Boss that smashes plants and throws an imp.
    Gargantuar,
}

impl ZombieKind {
    /// Every zombie archetype in roster order.
    pub const ALL: [ZombieKind; 10] = [
        ZombieKind::Basic,
        ZombieKind::Conehead,
        ZombieKind::Buckethead,
        ZombieKind::Flag,
        ZombieKind::Newspaper,
        ZombieKind::PoleVault,
        ZombieKind::Football,
        ZombieKind::Dancing,
        ZombieKind::Imp,
        ZombieKind::Gargantuar,
    ];

    /// Position of the kind within [`ZombieKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static stat block for the kind.
    #[must_use]
    pub const fn stats(self) -> &'static ZombieStats {
        &ZOMBIE_STATS[self.index()]
    }

    /// Special ability handled by the zombie ability and boss systems.
    #[must_use]
    pub const fn ability(self) -> ZombieAbility {
        match self {
            Self::PoleVault => ZombieAbility::Vault,
            Self::Newspaper => ZombieAbility::RageOnArmorBreak,
            Self::Dancing => ZombieAbility::Summon {
                kind: ZombieKind::Basic,
            },
            Self::Gargantuar => ZombieAbility::Boss {
                thrown: ZombieKind::Imp,
            },
            _ => ZombieAbility::None,
        }
    }
}

/// Static numbers describing a zombie archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombieStats {
    /// Display name of the archetype.
    pub name: &'static str,
    /// Starting and maximum health.
    pub health: i32,
    /// Starting and maximum armor, zero for unarmored kinds.
    pub armor: i32,
    /// Walking speed in cells per second.
    pub speed: f32,
    /// Speed in cells per second after the kind's ability changes it.
    pub speed_alt: f32,
    /// Coins earned when the zombie is defeated.
    pub coin_value: u32,
    /// Health removed from a plant per bite.
    pub bite_damage: i32,
    /// Seconds between bites.
    pub eat_rate: f32,
    /// Whether the kind runs the boss state machine.
    pub boss: bool,
}

#[allow(clippy::too_many_arguments)]
const fn zombie(
    name: &'static str,
    health: i32,
    armor: i32,
    speed: f32,
    speed_alt: f32,
    coin_value: u32,
    bite_damage: i32,
    eat_rate: f32,
    boss: bool,
) -> ZombieStats {
    ZombieStats {
        name,
        health,
        armor,
        speed,
        speed_alt,
        coin_value,
        bite_damage,
        eat_rate,
        boss,
    }
}

const ZOMBIE_STATS: [ZombieStats; 10] = [
    zombie("Zombie", 100, 0, 0.25, 0.25, 1, 10, 0.5, false),
    zombie("Conehead", 100, 200, 0.25, 0.25, 2, 10, 0.5, false),
    zombie("Buckethead", 100, 500, 0.22, 0.22, 4, 10, 0.5, false),
    zombie("Flag Zombie", 100, 0, 0.35, 0.35, 1, 10, 0.5, false),
    zombie("Newspaper", 100, 100, 0.25, 0.65, 2, 15, 0.4, false),
    zombie("Pole Vaulter", 175, 0, 0.70, 0.20, 3, 10, 0.5, false),
    zombie("Football", 300, 100, 0.55, 0.55, 5, 20, 0.4, false),
    zombie("Dancing", 200, 0, 0.30, 0.30, 4, 10, 0.5, false),
    zombie("Imp", 80, 0, 0.5, 0.5, 1, 8, 0.3, false),
    zombie("Gargantuar", 1500, 300, 0.12, 0.12, 20, 80, 1.0, true),
];

/// Special ability descriptor attached to each zombie archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZombieAbility {
    /// No behavior beyond walking and eating.
    None,
    /// Jumps over the first plant ahead, then walks at its alternate speed.
    Vault,
    /// Switches to its alternate speed once its armor breaks.
    RageOnArmorBreak,
    /// Summons one zombie of `kind` into each adjacent lane and its own lane, once.
    Summon {
        /// Archetype summoned.
        kind: ZombieKind,
    },
    /// Runs the boss state machine and throws a `thrown` zombie once.
    Boss {
        /// Archetype thrown when the boss becomes enraged.
        thrown: ZombieKind,
    },
}

impl ZombieAbility {
    /// Whether the ability needs a `ZombieSpecial` state component.
    #[must_use]
    pub const fn has_special_state(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Archetypes of projectiles fired by plants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Plain pea.
    Pea,
    /// Frozen pea that slows its target.
    SnowPea,
    /// Ignited pea produced by a torchwood.
    FirePea,
}

impl ProjectileKind {
    /// Whether a hit slows the target.
    #[must_use]
    pub const fn slows(self) -> bool {
        matches!(self, Self::SnowPea)
    }

    /// Kind produced when the projectile passes through an igniter, if any.
    #[must_use]
    pub const fn ignited(self) -> Option<ProjectileKind> {
        match self {
            Self::Pea => Some(Self::FirePea),
            Self::SnowPea | Self::FirePea => None,
        }
    }
}

/// Rewards that can drop from a defeated zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropKind {
    /// Small coin bonus.
    Coin,
    /// Large coin bonus.
    Diamond,
    /// Temporarily doubles plant attack speed.
    PlantBoost,
    /// Grants a burst of sun.
    SunBurst,
    /// Temporarily slows every zombie.
    FreezeAll,
}

impl DropKind {
    /// Drops rolled from the power-up reward tier.
    pub const POWER_UPS: [DropKind; 3] = [DropKind::PlantBoost, DropKind::SunBurst, DropKind::FreezeAll];
}

/// Anything the player can collect from the lawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// A sun worth the configured sun value.
    Sun,
    /// A reward drop.
    Drop(DropKind),
}
