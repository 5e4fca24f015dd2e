#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Zombie systems: special abilities, walking, eating plants and the boss
//! state machine.

use tracing::{debug, info};

use lawn_defence_core::{
    components::{
        BossPhase, BossState, Freezable, GridPos, Health, Plant, Velocity, WorldPos, Zombie,
        ZombieSpecial,
    },
    Entity, Event, FrameTime, ZombieAbility, ZombieKind,
};
use lawn_defence_world::{factory, World};

/// Runs the per-archetype abilities: vaulting over the first plant,
/// speeding up once enraged and summoning backup once.
pub fn abilities(world: &mut World, time: FrameTime, out: &mut Vec<Event>) {
    let tuning = world.tuning().zombies;
    let field = *world.field();
    let specials = world
        .store()
        .each::<(Zombie, ZombieSpecial, WorldPos, GridPos, Velocity)>();
    for (entity, (zombie, mut special, mut position, grid, mut velocity)) in specials {
        let alt_speed = -zombie.kind.stats().speed_alt * field.cell_width;
        match zombie.kind.ability() {
            ZombieAbility::Vault => {
                if special.has_jumped {
                    velocity.x = alt_speed;
                } else {
                    let lookahead = field.cell_width * tuning.vault_lookahead_cells;
                    let ahead = field.column_at(position.x - lookahead);
                    if world.plant_at(grid.row, ahead).is_some() {
                        position.x -= field.cell_width * tuning.vault_jump_cells;
                        special.has_jumped = true;
                        velocity.x = alt_speed;
                        debug!(?entity, row = grid.row, col = ahead, "zombie vaulted");
                    }
                }
            }
            ZombieAbility::RageOnArmorBreak => {
                if special.is_angry {
                    velocity.x = alt_speed;
                }
            }
            ZombieAbility::Summon { kind } => {
                if !special.has_summoned {
                    special.summon_timer += time.dt;
                    if special.summon_timer >= tuning.summon_delay {
                        special.has_summoned = true;
                        for lane in grid.row - 1..=grid.row + 1 {
                            if field.contains_row(lane) {
                                let _ = spawn(world, kind, lane, out);
                            }
                        }
                    }
                }
            }
            ZombieAbility::Boss { .. } | ZombieAbility::None => {}
        }

        let store = world.store_mut();
        let _ = store.set(entity, special);
        let _ = store.set(entity, position);
        let _ = store.set(entity, velocity);
    }
}

/// Walks every zombie that is not eating toward the house, scaled by its
/// slow factor, and refreshes its column.
pub fn advance(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    let field = *world.field();
    let walkers = world
        .store()
        .each::<(Zombie, WorldPos, Velocity, GridPos, Freezable)>();
    for (entity, (zombie, mut position, velocity, mut grid, freezable)) in walkers {
        if zombie.eating {
            continue;
        }
        position.x -= velocity.x.abs() * freezable.slow_factor * time.dt;
        grid.col = field.column_at(position.x);
        let store = world.store_mut();
        let _ = store.set(entity, position);
        let _ = store.set(entity, grid);
    }
}

/// Lets zombies standing on a planted cell bite the plant on their own
/// cadence. Plants eaten to zero release their cell immediately.
pub fn eat(world: &mut World, time: FrameTime, out: &mut Vec<Event>) {
    let field = *world.field();
    let tolerance = world.tuning().zombies.eat_tolerance_cells * field.cell_width;
    let flash = world.tuning().combat.damage_flash;
    let eaters = world.store().each::<(Zombie, WorldPos, GridPos, Health)>();
    for (entity, (mut zombie, position, grid, health)) in eaters {
        if health.is_dead() {
            continue;
        }
        let col = field.column_at(position.x);
        let meal = world
            .plant_at(grid.row, col)
            .filter(|&plant| {
                world
                    .store()
                    .get::<Health>(plant)
                    .is_some_and(|health| !health.is_dead())
            })
            .filter(|_| (position.x - field.cell_center_x(col)).abs() <= tolerance);

        let Some(plant) = meal else {
            if zombie.eating {
                zombie.eating = false;
                let _ = world.store_mut().set(entity, zombie);
            }
            continue;
        };

        zombie.eating = true;
        zombie.eat_timer -= time.dt;
        if zombie.eat_timer <= 0.0 {
            zombie.eat_timer = zombie.eat_rate;
            let bite = zombie.kind.stats().bite_damage;
            let mut eaten = false;
            let _ = world.store_mut().modify::<Health>(plant, |health| {
                health.damage(bite);
                health.damage_flash = flash;
                eaten = health.is_dead();
            });
            if eaten {
                world.vacate(grid.row, col);
                world.destroy(plant);
                zombie.eating = false;
                if let Some(&Plant { kind }) = world.store().get::<Plant>(plant) {
                    out.push(Event::PlantDestroyed { plant, kind });
                }
                debug!(?plant, row = grid.row, col, "plant eaten");
            }
        }
        let _ = world.store_mut().set(entity, zombie);
    }
}

/// Drives every living boss: enrages below the health threshold, throws its
/// minion once and smashes the plant in front of it on a cooldown.
pub fn boss(world: &mut World, time: FrameTime, out: &mut Vec<Event>) {
    let tuning = world.tuning().zombies;
    let field = *world.field();
    let bosses = world
        .store()
        .each::<(Zombie, BossState, GridPos, Health, Velocity)>();
    for (entity, (zombie, mut state, grid, health, mut velocity)) in bosses {
        if health.is_dead() || world.is_pending(entity) {
            continue;
        }
        let ZombieAbility::Boss { thrown } = zombie.kind.ability() else {
            continue;
        };
        let weakened = health.current as f32 <= health.max as f32 * tuning.boss_enrage_fraction;

        if weakened && state.phase == BossPhase::Normal {
            state.phase = BossPhase::Enraged;
            velocity.x *= tuning.boss_enrage_speed;
            info!(?entity, "boss enraged");
            out.push(Event::BossEnraged { boss: entity });
        }

        if weakened && !state.has_thrown {
            state.has_thrown = true;
            let col = (grid.col - tuning.boss_throw_cells).max(0);
            let minion = spawn(world, thrown, grid.row, out);
            let y = field.cell_center_y(grid.row);
            let store = world.store_mut();
            let _ = store.set(minion, WorldPos::new(field.cell_center_x(col), y));
            let _ = store.set(minion, GridPos { row: grid.row, col });
        }

        state.smash_timer += time.dt;
        if state.smash_timer >= state.smash_cooldown {
            let target = [grid.col, grid.col - 1]
                .into_iter()
                .filter_map(|col| world.plant_at(grid.row, col))
                .find(|&plant| {
                    world
                        .store()
                        .get::<Health>(plant)
                        .is_some_and(|health| !health.is_dead())
                });
            if let Some(plant) = target {
                let _ = world.store_mut().modify::<Health>(plant, Health::kill);
                state.smash_timer = 0.0;
                debug!(?entity, ?plant, "boss smashed a plant");
            }
        }

        let store = world.store_mut();
        let _ = store.set(entity, state);
        let _ = store.set(entity, velocity);
    }
}

fn spawn(world: &mut World, kind: ZombieKind, lane: i32, out: &mut Vec<Event>) -> Entity {
    let zombie = factory::zombie(world, kind, lane);
    out.push(Event::ZombieSpawned { zombie, kind, lane });
    zombie
}
