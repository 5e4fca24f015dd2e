#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Projectile flight, ignition and impact resolution.

use tracing::trace;

use lawn_defence_core::{
    components::{
        Armor, Freezable, GridPos, Health, Plant, Projectile, Velocity, WorldPos, Zombie,
        ZombieSpecial,
    },
    Entity, Event, FrameTime, PlantBehavior, ZombieAbility,
};
use lawn_defence_world::World;

/// Moves projectiles along their lane and discards those that left the field.
pub fn advance(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    let limit = world.field().width + world.tuning().combat.exit_margin;
    let flying = world.store().each::<(Projectile, Velocity, WorldPos)>();
    for (entity, (_, velocity, mut position)) in flying {
        position.x += velocity.x * time.dt;
        position.y += velocity.y * time.dt;
        let _ = world.store_mut().set(entity, position);
        if position.x > limit {
            world.destroy(entity);
        }
    }
}

/// Upgrades projectiles passing through an igniter in their lane.
pub fn ignite(world: &mut World, _time: FrameTime, _out: &mut Vec<Event>) {
    let combat = world.tuning().combat;
    let igniters: Vec<(i32, f32)> = world
        .store()
        .each::<(Plant, GridPos, WorldPos)>()
        .into_iter()
        .filter(|(_, (plant, _, _))| matches!(plant.kind.behavior(), PlantBehavior::Igniter))
        .map(|(_, (_, grid, position))| (grid.row, position.x))
        .collect();
    if igniters.is_empty() {
        return;
    }

    let flying = world.store().each::<(Projectile, WorldPos)>();
    for (entity, (mut projectile, position)) in flying {
        let Some(ignited) = projectile.kind.ignited() else {
            continue;
        };
        let passing = igniters.iter().any(|&(lane, x)| {
            let offset = position.x - x;
            lane == projectile.lane && offset > -combat.ignite_behind && offset < combat.ignite_ahead
        });
        if passing {
            projectile.kind = ignited;
            projectile.damage = projectile
                .damage
                .saturating_mul(combat.ignite_damage_multiplier);
            let _ = world.store_mut().set(entity, projectile);
            trace!(?entity, "projectile ignited");
        }
    }
}

/// Resolves projectile impacts: armor absorbs first, the overflow reaches
/// health, frozen peas slow their target and the projectile is consumed.
pub fn collide(world: &mut World, _time: FrameTime, _out: &mut Vec<Event>) {
    let combat = world.tuning().combat;
    let flying = world.store().each::<(Projectile, WorldPos)>();
    for (projectile_entity, (projectile, position)) in flying {
        if world.is_pending(projectile_entity) {
            continue;
        }
        let Some(target) = first_hit(world, &projectile, position, combat.projectile_hit_radius)
        else {
            continue;
        };

        strike(world, target, projectile.damage);
        if projectile.kind.slows() {
            let _ = world.store_mut().modify::<Freezable>(target, |freezable| {
                freezable.apply(combat.snow_slow_factor, combat.snow_slow_duration)
            });
        }
        let _ = world
            .store_mut()
            .modify::<Health>(target, |health| health.damage_flash = combat.damage_flash);
        world.destroy(projectile_entity);
    }
}

fn first_hit(
    world: &World,
    projectile: &Projectile,
    position: WorldPos,
    radius: f32,
) -> Option<Entity> {
    world
        .store()
        .each::<(Zombie, GridPos, WorldPos, Health)>()
        .into_iter()
        .find(|(_, (_, grid, zombie_position, health))| {
            !health.is_dead()
                && grid.row == projectile.lane
                && (zombie_position.x - position.x).abs() < radius
        })
        .map(|(entity, _)| entity)
}

fn strike(world: &mut World, target: Entity, damage: i32) {
    let store = world.store_mut();
    let mut overflow = damage;
    let mut armor_broke = false;
    if let Some(armor) = store.get_mut::<Armor>(target) {
        if !armor.is_broken() {
            overflow = armor.absorb(damage);
            armor_broke = armor.is_broken();
        }
    }
    if overflow > 0 {
        let _ = store.modify::<Health>(target, |health| health.damage(overflow));
    }

    let enrages = store
        .get::<Zombie>(target)
        .is_some_and(|zombie| zombie.kind.ability() == ZombieAbility::RageOnArmorBreak);
    if armor_broke && enrages {
        let _ = store.modify::<ZombieSpecial>(target, |special| special.is_angry = true);
        trace!(?target, "armor broken, zombie enraged");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawn_defence_core::{LevelDef, ProjectileKind, ZombieKind};
    use lawn_defence_world::{factory, Config};

    #[test]
    fn projectiles_leave_past_the_exit_margin() {
        let mut world = World::new(
            Config::default(),
            LevelDef::builtin(1).expect("level one exists"),
        );
        let pea = factory::projectile(
            &mut world,
            ProjectileKind::Pea,
            WorldPos::new(940.0, 300.0),
            2,
            20,
        );
        advance(&mut world, FrameTime::new(0.02), &mut Vec::new());
        assert!(!world.is_pending(pea), "946 is inside the margin");
        advance(&mut world, FrameTime::new(0.02), &mut Vec::new());
        assert!(world.is_pending(pea));
    }

    #[test]
    fn strikes_skip_broken_armor() {
        let mut world = World::new(
            Config::default(),
            LevelDef::builtin(1).expect("level one exists"),
        );
        let zombie = factory::zombie(&mut world, ZombieKind::Conehead, 0);
        strike(&mut world, zombie, 250);
        assert_eq!(
            world.store().get::<Armor>(zombie).map(|armor| armor.current),
            Some(0)
        );
        assert_eq!(
            world.store().get::<Health>(zombie).map(|h| h.current),
            Some(50)
        );
    }
}
