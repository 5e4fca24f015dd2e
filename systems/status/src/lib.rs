#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timed status bookkeeping: slow decay, power-up timers, seed recharge,
//! animation cadence, damage flashes and the kill combo.

use tracing::trace;

use lawn_defence_core::{
    components::{Freezable, Health, SpriteAnim},
    Event, FrameTime,
};
use lawn_defence_world::World;

/// Counts slows down and restores full speed once they lapse.
pub fn thaw(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    world
        .store_mut()
        .each_mut::<Freezable>(|_, freezable| {
            if freezable.timer > 0.0 {
                freezable.timer -= time.dt;
                if freezable.timer <= 0.0 {
                    freezable.slow_factor = 1.0;
                    freezable.timer = 0.0;
                }
            }
        });
}

/// Counts power-up timers down and keeps every freezable entity slowed while
/// the global freeze lasts. Seed packets recharge on the same clock.
pub fn power_ups(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    let tuning = world.tuning().power_ups;
    world.seeds_mut().advance(time.dt);

    let power_ups = world.power_ups_mut();
    if power_ups.plant_boost_active() {
        power_ups.plant_boost = (power_ups.plant_boost - time.dt).max(0.0);
    }
    if !power_ups.freeze_all_active() {
        return;
    }
    power_ups.freeze_all = (power_ups.freeze_all - time.dt).max(0.0);
    trace!(remaining = power_ups.freeze_all, "global freeze holding");
    world.store_mut().each_mut::<Freezable>(|_, freezable| {
        freezable.apply(tuning.freeze_all_factor, tuning.freeze_all_refresh)
    });
}

/// Advances sprite loops, fades damage flashes and runs the combo clock on
/// real time.
pub fn animate(world: &mut World, time: FrameTime, _out: &mut Vec<Event>) {
    let combo = world.tuning().combo;
    let store = world.store_mut();
    store.each_mut::<SpriteAnim>(|_, anim| {
        anim.timer += time.dt;
        if anim.fps > 0.0 && anim.timer >= 1.0 / anim.fps {
            anim.timer = 0.0;
            anim.frame_index = (anim.frame_index + 1) % anim.frame_count.max(1);
        }
    });
    store.each_mut::<Health>(|_, health| {
        if health.damage_flash > 0.0 {
            health.damage_flash = (health.damage_flash - time.dt).max(0.0);
        }
    });
    world
        .score_mut()
        .advance(time.real_dt, time.dt, combo.break_after);
}
