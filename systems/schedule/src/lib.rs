#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick driver that runs every gameplay system in its fixed order.
//!
//! The order below resolves the cross-system dependencies of a frame: plants
//! queue their attacks before projectiles move, collisions land before the
//! outcome step tallies deaths, and removals are only applied by the final
//! flush so no system ever observes an entity disappearing mid-scan.

use std::time::Duration;

use tracing::trace;

use lawn_defence_core::{Event, FrameTime};
use lawn_defence_system_lawnmower as lawnmower;
use lawn_defence_system_outcome as outcome;
use lawn_defence_system_pickups as pickups;
use lawn_defence_system_plants as plants;
use lawn_defence_system_projectiles as projectiles;
use lawn_defence_system_status as status;
use lawn_defence_system_waves as waves;
use lawn_defence_system_zombies as zombies;
use lawn_defence_world::World;

/// Signature shared by every gameplay system.
pub type System = fn(&mut World, FrameTime, &mut Vec<Event>);

/// Pipeline executed once per tick, in order.
pub const PIPELINE: &[(&str, System)] = &[
    ("plant_attack", plants::attack),
    ("sun_production", plants::produce_sun),
    ("potato_mines", plants::potato_mines),
    ("chompers", plants::chompers),
    ("explosives", plants::explosives),
    ("projectile_movement", projectiles::advance),
    ("torchwood", projectiles::ignite),
    ("projectile_collision", projectiles::collide),
    ("waves", waves::spawn_waves),
    ("zombie_abilities", zombies::abilities),
    ("zombie_movement", zombies::advance),
    ("zombie_eat", zombies::eat),
    ("suns", pickups::suns),
    ("sky_drop", pickups::sky_drop),
    ("lawnmowers", lawnmower::mow),
    ("freeze_decay", status::thaw),
    ("boss", zombies::boss),
    ("power_ups", status::power_ups),
    ("animation", status::animate),
    ("drops", pickups::drops),
    ("outcome", outcome::settle),
];

/// Drives the pipeline with a game-speed multiplier and a pause switch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Simulation {
    speed: f32,
    paused: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            speed: 1.0,
            paused: false,
        }
    }
}

impl Simulation {
    /// Creates a running simulation at normal speed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the game-speed multiplier applied to every subsequent tick.
    ///
    /// Negative and non-finite values are treated as a full stop.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    }

    /// Returns the active game-speed multiplier.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Pauses or resumes the simulation.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Reports whether ticks are currently ignored.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances the world by `dt` of wall-clock time.
    ///
    /// A paused simulation leaves the world untouched and emits nothing.
    pub fn tick(&mut self, world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
        if self.paused {
            return;
        }
        let time = FrameTime::scaled(dt.as_secs_f32(), self.speed);
        out_events.push(Event::TimeAdvanced { dt: time.dt });
        for (name, system) in PIPELINE {
            trace!(system = name, dt = time.dt, "running system");
            system(world, time, out_events);
        }
        let _ = world.flush(out_events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_runs_twenty_one_steps_ending_with_the_outcome() {
        assert_eq!(PIPELINE.len(), 21);
        assert_eq!(PIPELINE.first().map(|(name, _)| *name), Some("plant_attack"));
        assert_eq!(PIPELINE.last().map(|(name, _)| *name), Some("outcome"));
    }

    #[test]
    fn speed_rejects_nonsense() {
        let mut simulation = Simulation::new();
        simulation.set_speed(-3.0);
        assert_eq!(simulation.speed(), 0.0);
        simulation.set_speed(f32::NAN);
        assert_eq!(simulation.speed(), 0.0);
        simulation.set_speed(2.0);
        assert_eq!(simulation.speed(), 2.0);
    }
}
