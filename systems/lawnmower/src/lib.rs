#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Last line of defence: one single-use lawnmower per lane.
//!
//! A parked mower starts its sweep as soon as a zombie in its lane comes
//! within reach. A sweeping mower kills every zombie it passes and leaves
//! the lane guarded until it drives off the field.

use tracing::info;

use lawn_defence_core::{
    components::{GridPos, Health, Lawnmower, WorldPos, Zombie},
    Event, FrameTime,
};
use lawn_defence_world::World;

/// Triggers and sweeps lawnmowers.
pub fn mow(world: &mut World, time: FrameTime, out: &mut Vec<Event>) {
    let defence = world.tuning().defence;
    let exit = world.field().width + world.tuning().combat.exit_margin;
    let mowers = world.store().each::<(Lawnmower, WorldPos)>();
    for (entity, (mut mower, mut position)) in mowers {
        if world.is_pending(entity) {
            continue;
        }
        let lane_zombies: Vec<_> = world
            .store()
            .each::<(Zombie, GridPos, WorldPos, Health)>()
            .into_iter()
            .filter(|(_, (_, grid, _, health))| grid.row == mower.lane && !health.is_dead())
            .map(|(zombie, (_, _, zombie_position, _))| (zombie, zombie_position.x))
            .collect();

        if mower.triggered {
            position.x += mower.speed * time.dt;
            let reach = position.x + defence.mower_hit_radius;
            for &(zombie, x) in &lane_zombies {
                if x < reach {
                    let _ = world.store_mut().modify::<Health>(zombie, Health::kill);
                }
            }
            if position.x > exit {
                world.destroy(entity);
            }
        } else if lane_zombies
            .iter()
            .any(|&(_, x)| x <= position.x + defence.mower_trigger_reach)
        {
            mower.triggered = true;
            info!(lane = mower.lane, "lawnmower triggered");
            out.push(Event::LawnmowerTriggered { lane: mower.lane });
        }

        let store = world.store_mut();
        let _ = store.set(entity, mower);
        let _ = store.set(entity, position);
    }
}
