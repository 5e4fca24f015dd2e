#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plant behavior systems: shooting, sun production, potato mines, chompers
//! and explosives.
//!
//! Each system reads the plant's [`PlantBehavior`] descriptor instead of its
//! concrete kind, so new archetypes only extend the descriptor tables.

use rand::Rng;
use tracing::trace;

use lawn_defence_core::{
    components::{
        AttackTimer, ChomperState, ExplosionEffect, GridPos, Health, Plant, PotatoMineState,
        SunProducer, WorldPos, Zombie,
    },
    Entity, Event, FrameTime, PlantBehavior,
};
use lawn_defence_world::{factory, World};

/// Living zombie copied out of the store for proximity checks.
#[derive(Clone, Copy, Debug)]
struct Target {
    entity: Entity,
    lane: i32,
    col: i32,
    x: f32,
}

fn living_zombies(world: &World) -> Vec<Target> {
    world
        .store()
        .each::<(Zombie, GridPos, WorldPos, Health)>()
        .into_iter()
        .filter(|(_, (_, _, _, health))| !health.is_dead())
        .map(|(entity, (_, grid, position, _))| Target {
            entity,
            lane: grid.row,
            col: grid.col,
            x: position.x,
        })
        .collect()
}

fn kill(world: &mut World, entity: Entity) {
    let _ = world.store_mut().modify::<Health>(entity, Health::kill);
}

/// Counts down attack timers of shooters whose lane holds a zombie and fires
/// a volley whenever a timer runs out.
///
/// While the plant boost is active the timers run at the boosted rate.
pub fn attack(world: &mut World, time: FrameTime, out: &mut Vec<Event>) {
    let combat = world.tuning().combat;
    let field = *world.field();
    let dt = if world.power_ups().plant_boost_active() {
        time.dt * combat.attack_boost_multiplier
    } else {
        time.dt
    };

    let mut threatened = vec![false; field.lane_count()];
    for target in living_zombies(world) {
        if target.x <= field.offset_x {
            continue;
        }
        if let Some(lane) = usize::try_from(target.lane)
            .ok()
            .and_then(|lane| threatened.get_mut(lane))
        {
            *lane = true;
        }
    }

    let shooters = world
        .store()
        .each::<(Plant, AttackTimer, GridPos, WorldPos)>();
    for (entity, (plant, mut timer, grid, position)) in shooters {
        if world.is_pending(entity) {
            continue;
        }
        let lane_threatened = usize::try_from(grid.row)
            .ok()
            .and_then(|lane| threatened.get(lane).copied())
            .unwrap_or(false);
        if !lane_threatened {
            continue;
        }

        timer.timer -= dt;
        if timer.timer <= 0.0 {
            timer.timer = timer.cooldown;
            if let PlantBehavior::Shooter { projectile, volley } = plant.kind.behavior() {
                let damage = plant.kind.stats().damage;
                for offset in volley {
                    let spawn =
                        WorldPos::new(position.x + offset, position.y - combat.muzzle_lift);
                    let fired = factory::projectile(world, projectile, spawn, grid.row, damage);
                    out.push(Event::ProjectileFired {
                        projectile: fired,
                        kind: projectile,
                        lane: grid.row,
                    });
                }
            }
        }
        let _ = world.store_mut().set(entity, timer);
    }
}

/// Spawns a sun next to every sun producer whose timer runs out.
pub fn produce_sun(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    let plants = world.tuning().plants;
    let producers = world.store().each::<(Plant, SunProducer, WorldPos)>();
    for (entity, (_, mut producer, position)) in producers {
        producer.timer -= time.dt;
        if producer.timer <= 0.0 {
            producer.timer = producer.interval;
            let scatter = if plants.sun_scatter > 0.0 {
                world
                    .rng()
                    .gen_range(-plants.sun_scatter..plants.sun_scatter)
            } else {
                0.0
            };
            let spawn = WorldPos::new(position.x + scatter, position.y - plants.sun_spawn_lift);
            let sun = factory::sun(world, spawn, position.y + plants.sun_settle_drop);
            trace!(?sun, "sun produced");
        }
        let _ = world.store_mut().set(entity, producer);
    }
}

/// Arms potato mines and detonates armed ones under the first zombie in
/// trigger range.
pub fn potato_mines(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    let reach = world.tuning().plants.mine_trigger_cells * world.field().cell_width;
    let mines = world
        .store()
        .each::<(Plant, PotatoMineState, GridPos, WorldPos)>();
    for (entity, (_, mut mine, grid, position)) in mines {
        if world.is_pending(entity) {
            continue;
        }
        if !mine.armed {
            mine.arm_timer -= time.dt;
            if mine.arm_timer <= 0.0 {
                mine.armed = true;
            }
            let _ = world.store_mut().set(entity, mine);
            continue;
        }

        let victim = living_zombies(world)
            .into_iter()
            .find(|zombie| zombie.lane == grid.row && (zombie.x - position.x).abs() < reach);
        if let Some(victim) = victim {
            kill(world, victim.entity);
            world.destroy(entity);
        }
    }
}

/// Lets idle chompers swallow the nearest zombie ahead of them and counts
/// down digestion.
pub fn chompers(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    let plants = world.tuning().plants;
    let reach = plants.chomper_reach_cells * world.field().cell_width;
    let chompers = world
        .store()
        .each::<(Plant, ChomperState, GridPos, WorldPos)>();
    for (entity, (_, mut chomper, grid, position)) in chompers {
        if chomper.eating {
            chomper.digest_timer -= time.dt;
            if chomper.digest_timer <= 0.0 {
                chomper.eating = false;
            }
            let _ = world.store_mut().set(entity, chomper);
            continue;
        }
        if world.is_pending(entity) {
            continue;
        }

        let victim = living_zombies(world)
            .into_iter()
            .filter(|zombie| {
                let ahead = zombie.x - position.x;
                zombie.lane == grid.row && ahead > 0.0 && ahead < reach
            })
            .min_by(|a, b| a.x.total_cmp(&b.x));
        if let Some(victim) = victim {
            kill(world, victim.entity);
            chomper.eating = true;
            chomper.digest_timer = plants.chomper_digest;
            let _ = world.store_mut().set(entity, chomper);
        }
    }
}

/// Burns explosive fuses and, once a fuse runs out, kills every zombie the
/// blast covers and removes the explosive.
pub fn explosives(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    let growth = world.tuning().plants.blast_growth;
    let explosives = world
        .store()
        .each::<(Plant, ExplosionEffect, GridPos)>();
    for (entity, (plant, mut effect, grid)) in explosives {
        if world.is_pending(entity) {
            continue;
        }
        let PlantBehavior::Explosive(blast) = plant.kind.behavior() else {
            continue;
        };

        effect.timer += time.dt;
        effect.radius = effect.timer * growth;
        let _ = world.store_mut().set(entity, effect);
        if effect.timer < effect.duration {
            continue;
        }

        let origin = (grid.row, grid.col);
        for zombie in living_zombies(world) {
            if blast.covers(origin, (zombie.lane, zombie.col)) {
                kill(world, zombie.entity);
            }
        }
        trace!(?entity, ?blast, "explosive detonated");
        world.destroy(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawn_defence_core::{LevelDef, PlantKind, ZombieKind};
    use lawn_defence_world::Config;

    #[test]
    fn attack_skips_lanes_without_zombies() {
        let mut world = World::new(
            Config::default(),
            LevelDef::builtin(10).expect("level ten exists"),
        );
        let shooter =
            factory::plant(&mut world, PlantKind::Peashooter, 0, 0).expect("free cell");
        let _ = factory::zombie(&mut world, ZombieKind::Basic, 3);
        let mut out = Vec::new();
        attack(&mut world, FrameTime::new(5.0), &mut out);
        assert!(out.is_empty());
        let timer = world
            .store()
            .get::<AttackTimer>(shooter)
            .expect("shooter has a timer");
        assert!((timer.timer - 0.7).abs() < 1e-6, "timer is untouched");
    }
}
