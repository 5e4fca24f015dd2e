//! Archetype constructors.
//!
//! Each function attaches the full component set of one archetype and keeps
//! the world's indices (grid occupancy, lawnmower lanes, live zombie count)
//! in step with the new entity.

use rand::Rng;
use tracing::debug;

use lawn_defence_core::{
    components::{
        AttackTimer, BossPhase, BossState, ChomperState, Drop, DropTag, EnemyTag, ExplosionEffect,
        Freezable, GridPos, Health, Lawnmower, LawnmowerTag, PickupMotion, Plant, PlantTag,
        PotatoMineState, Projectile, ProjectileTag, SpriteAnim, Sun, SunProducer, SunTag,
        Velocity, WorldPos, Zombie, ZombieSpecial,
    },
    Armor, DropKind, Entity, PlacementError, PlantBehavior, PlantKind, ProjectileKind,
    ZombieAbility, ZombieKind,
};

use crate::World;

/// Creates a plant in the provided cell and claims the cell in the grid.
///
/// Only geometry is checked here; sun, roster and recharge rules belong to
/// [`World::place_plant`].
pub fn plant(
    world: &mut World,
    kind: PlantKind,
    row: i32,
    col: i32,
) -> Result<Entity, PlacementError> {
    let index = world
        .field
        .cell_index(row, col)
        .ok_or(PlacementError::OutOfBounds)?;
    if world.grid[index].is_some() {
        return Err(PlacementError::Occupied);
    }

    let stats = kind.stats();
    let position = WorldPos::new(
        world.field.cell_center_x(col),
        world.field.cell_center_y(row),
    );
    let plants = world.tuning.plants;
    let store = &mut world.store;
    let entity = store.create();
    store.add(entity, Plant { kind });
    store.add(entity, PlantTag);
    store.add(entity, GridPos { row, col });
    store.add(entity, position);
    store.add(entity, Health::new(stats.health));
    store.add(entity, SpriteAnim::looping(2, 4.0));

    if stats.attack_rate > 0.0 {
        store.add(
            entity,
            AttackTimer {
                cooldown: stats.attack_rate,
                timer: stats.attack_rate * 0.5,
            },
        );
    }

    match kind.behavior() {
        PlantBehavior::SunProducer {
            interval,
            first_delay,
        } => store.add(
            entity,
            SunProducer {
                interval,
                timer: first_delay,
            },
        ),
        PlantBehavior::Mine => store.add(
            entity,
            PotatoMineState {
                arm_timer: plants.mine_arm_time,
                armed: false,
            },
        ),
        PlantBehavior::Chomper => store.add(entity, ChomperState::default()),
        PlantBehavior::Explosive(blast) => store.add(
            entity,
            ExplosionEffect {
                timer: 0.0,
                duration: plants.fuse(blast),
                radius: 0.0,
            },
        ),
        PlantBehavior::Blocker | PlantBehavior::Shooter { .. } | PlantBehavior::Igniter => {}
    }

    world.grid[index] = Some(entity);
    debug!(?kind, row, col, "plant spawned");
    Ok(entity)
}

/// Creates a zombie in the approach corridor of `lane`.
pub fn zombie(world: &mut World, kind: ZombieKind, lane: i32) -> Entity {
    let stats = kind.stats();
    let tuning = world.tuning.zombies;
    let variation = world
        .rng
        .gen_range(-tuning.speed_variation..=tuning.speed_variation);
    let jitter = if tuning.corridor_jitter > 0.0 {
        world.rng.gen_range(0.0..tuning.corridor_jitter)
    } else {
        0.0
    };
    let x = world.field.grid_right() + tuning.corridor_offset + jitter;
    let y = world.field.cell_center_y(lane);
    let speed = stats.speed * world.field.cell_width * (1.0 + variation);
    let corridor = world.field.columns as i32;

    let store = &mut world.store;
    let entity = store.create();
    store.add(
        entity,
        Zombie {
            kind,
            eating: false,
            eat_timer: 0.0,
            eat_rate: stats.eat_rate,
        },
    );
    store.add(entity, EnemyTag);
    store.add(entity, Health::new(stats.health));
    store.add(entity, WorldPos::new(x, y));
    store.add(
        entity,
        GridPos {
            row: lane,
            col: corridor,
        },
    );
    store.add(entity, Velocity { x: -speed, y: 0.0 });
    store.add(entity, SpriteAnim::looping(4, 3.0));
    store.add(entity, Freezable::default());

    if stats.armor > 0 {
        store.add(entity, Armor::new(stats.armor));
    }

    let ability = kind.ability();
    if ability.has_special_state() {
        store.add(entity, ZombieSpecial::default());
    }
    if let ZombieAbility::Boss { .. } = ability {
        store.add(
            entity,
            BossState {
                smash_timer: 0.0,
                smash_cooldown: tuning.boss_smash_cooldown,
                has_thrown: false,
                phase: BossPhase::Normal,
            },
        );
    }

    world.zombies_alive = world.zombies_alive.saturating_add(1);
    debug!(?kind, lane, "zombie spawned");
    entity
}

/// Creates a projectile travelling right along `lane`.
pub fn projectile(
    world: &mut World,
    kind: ProjectileKind,
    position: WorldPos,
    lane: i32,
    damage: i32,
) -> Entity {
    let speed = world.tuning.combat.projectile_speed;
    let store = &mut world.store;
    let entity = store.create();
    store.add(
        entity,
        Projectile {
            kind,
            speed,
            damage,
            lane,
        },
    );
    store.add(entity, ProjectileTag);
    store.add(entity, position);
    store.add(entity, Velocity { x: speed, y: 0.0 });
    entity
}

/// Creates a sun that falls from `position` down to `target_y`.
pub fn sun(world: &mut World, position: WorldPos, target_y: f32) -> Entity {
    let lifetime = world.tuning.pickups.sun_lifetime;
    let store = &mut world.store;
    let entity = store.create();
    store.add(
        entity,
        Sun {
            motion: PickupMotion::falling(target_y, lifetime),
        },
    );
    store.add(entity, SunTag);
    store.add(entity, position);
    entity
}

/// Creates a reward drop popping out of a defeated zombie at `origin`.
pub fn drop(world: &mut World, kind: DropKind, origin: WorldPos) -> Entity {
    let pickups = world.tuning.pickups;
    let store = &mut world.store;
    let entity = store.create();
    store.add(
        entity,
        Drop {
            kind,
            motion: PickupMotion::falling(
                origin.y + pickups.drop_settle_drop,
                pickups.drop_lifetime,
            ),
        },
    );
    store.add(entity, DropTag);
    store.add(
        entity,
        WorldPos::new(origin.x, origin.y - pickups.drop_spawn_lift),
    );
    entity
}

/// Parks a lawnmower left of `lane` and registers it as the lane's guard.
pub fn lawnmower(world: &mut World, lane: i32) -> Entity {
    let defence = world.tuning.defence;
    let position = WorldPos::new(
        world.field.offset_x - defence.mower_gap,
        world.field.cell_center_y(lane),
    );
    let store = &mut world.store;
    let entity = store.create();
    store.add(
        entity,
        Lawnmower {
            lane,
            triggered: false,
            speed: defence.mower_speed,
        },
    );
    store.add(entity, LawnmowerTag);
    store.add(entity, position);
    if let Some(slot) = usize::try_from(lane)
        .ok()
        .and_then(|lane| world.lawnmowers.get_mut(lane))
    {
        *slot = Some(entity);
    }
    entity
}
