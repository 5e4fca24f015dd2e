#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collectible pickups: falling and homing sun, sun from the sky and reward
//! drops with their effects.
//!
//! Suns and drops share [`PickupMotion`]: an idle pickup falls to its resting
//! height and then expires once its lifetime runs out, while a collected one
//! homes toward its counter and applies its effect on arrival.

use rand::Rng;
use tracing::{debug, trace};

use lawn_defence_core::{
    components::{Drop, PickupMotion, Sun, WorldPos},
    DropKind, Event, FrameTime, PickupKind,
};
use lawn_defence_world::{factory, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fate {
    Idle,
    Arrived,
    Expired,
}

fn step(
    motion: &mut PickupMotion,
    position: &mut WorldPos,
    dt: f32,
    fall_speed: f32,
    collect_speed: f32,
    arrival_radius: f32,
) -> Fate {
    if motion.collecting {
        let offset = motion.collect_target - position.vec();
        let distance = offset.length();
        if distance < arrival_radius {
            return Fate::Arrived;
        }
        let travel = (collect_speed * dt).min(distance);
        *position = WorldPos::from(position.vec() + offset / distance * travel);
        return Fate::Idle;
    }

    if motion.falling {
        position.y += fall_speed * dt;
        if position.y >= motion.target_y {
            position.y = motion.target_y;
            motion.falling = false;
        }
    }
    motion.lifetime -= dt;
    if motion.lifetime <= 0.0 {
        Fate::Expired
    } else {
        Fate::Idle
    }
}

/// Moves suns, banks the ones that reached the counter and discards the ones
/// that expired on the lawn.
pub fn suns(world: &mut World, time: FrameTime, out: &mut Vec<Event>) {
    let pickups = world.tuning().pickups;
    for (entity, (mut sun, mut position)) in world.store().each::<(Sun, WorldPos)>() {
        if world.is_pending(entity) {
            continue;
        }
        let fate = step(
            &mut sun.motion,
            &mut position,
            time.dt,
            pickups.fall_speed,
            pickups.sun_collect_speed,
            pickups.arrival_radius,
        );
        match fate {
            Fate::Arrived => {
                let economy = world.economy_mut();
                economy.sun = economy.sun.saturating_add(pickups.sun_value);
                world.destroy(entity);
                out.push(Event::PickupCollected {
                    pickup: entity,
                    kind: PickupKind::Sun,
                });
            }
            Fate::Expired => world.destroy(entity),
            Fate::Idle => {}
        }
        let store = world.store_mut();
        let _ = store.set(entity, sun);
        let _ = store.set(entity, position);
    }
}

/// Drops a sun from the sky at a random spot over the lawn whenever the sky
/// timer runs out, on levels that have sky sun.
pub fn sky_drop(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    if !world.level().sky_drop {
        return;
    }
    let pickups = world.tuning().pickups;
    let field = *world.field();
    let economy = world.economy_mut();
    economy.sky_drop_timer -= time.dt;
    if economy.sky_drop_timer > 0.0 {
        return;
    }

    let rng = world.rng();
    let jitter = if pickups.sky_jitter > 0.0 {
        rng.gen_range(0.0..pickups.sky_jitter)
    } else {
        0.0
    };
    let x = rng.gen_range(field.offset_x..field.grid_right());
    let bottom = field.offset_y + field.rows as f32 * field.cell_height;
    let target_y = rng.gen_range(field.offset_y..bottom);
    world.economy_mut().sky_drop_timer = pickups.sky_interval + jitter;

    let sun = factory::sun(world, WorldPos::new(x, pickups.sky_spawn_y), target_y);
    trace!(?sun, x, target_y, "sun fell from the sky");
}

/// Moves reward drops and applies the effect of the ones collected.
pub fn drops(world: &mut World, time: FrameTime, out: &mut Vec<Event>) {
    let pickups = world.tuning().pickups;
    for (entity, (mut drop, mut position)) in world.store().each::<(Drop, WorldPos)>() {
        if world.is_pending(entity) {
            continue;
        }
        let fate = step(
            &mut drop.motion,
            &mut position,
            time.dt,
            pickups.fall_speed,
            pickups.drop_collect_speed,
            pickups.arrival_radius,
        );
        match fate {
            Fate::Arrived => {
                grant(world, drop.kind);
                world.destroy(entity);
                out.push(Event::PickupCollected {
                    pickup: entity,
                    kind: PickupKind::Drop(drop.kind),
                });
            }
            Fate::Expired => world.destroy(entity),
            Fate::Idle => {}
        }
        let store = world.store_mut();
        let _ = store.set(entity, drop);
        let _ = store.set(entity, position);
    }
}

/// Applies the effect of a collected drop.
pub fn grant(world: &mut World, kind: DropKind) {
    let power_ups = world.tuning().power_ups;
    match kind {
        DropKind::Coin => {
            let economy = world.economy_mut();
            economy.coins_earned = economy.coins_earned.saturating_add(power_ups.coin_value);
        }
        DropKind::Diamond => {
            let economy = world.economy_mut();
            economy.coins_earned = economy
                .coins_earned
                .saturating_add(power_ups.diamond_value);
        }
        DropKind::PlantBoost => {
            world.power_ups_mut().plant_boost = power_ups.plant_boost_duration;
        }
        DropKind::SunBurst => {
            let economy = world.economy_mut();
            economy.sun = economy.sun.saturating_add(power_ups.sun_burst);
        }
        DropKind::FreezeAll => {
            world.power_ups_mut().freeze_all = power_ups.freeze_all_duration;
        }
    }
    debug!(?kind, "drop collected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn homing_never_overshoots_the_target() {
        let mut motion = PickupMotion::falling(300.0, 10.0);
        motion.collect(Vec2::new(60.0, 30.0));
        let mut position = WorldPos::new(60.0, 100.0);
        let fate = step(&mut motion, &mut position, 1.0, 50.0, 600.0, 10.0);
        assert_eq!(fate, Fate::Idle);
        assert_eq!(position, WorldPos::new(60.0, 30.0));
        let fate = step(&mut motion, &mut position, 1.0, 50.0, 600.0, 10.0);
        assert_eq!(fate, Fate::Arrived);
    }

    #[test]
    fn resting_pickups_stop_at_their_target_height() {
        let mut motion = PickupMotion::falling(120.0, 10.0);
        let mut position = WorldPos::new(0.0, 100.0);
        assert_eq!(
            step(&mut motion, &mut position, 1.0, 50.0, 600.0, 10.0),
            Fate::Idle
        );
        assert_eq!(position.y, 120.0);
        assert!(!motion.falling);
        assert_eq!(
            step(&mut motion, &mut position, 9.0, 50.0, 600.0, 10.0),
            Fate::Expired
        );
    }
}
