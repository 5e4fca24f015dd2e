//! Tallies the events of a run into a printable summary.

use std::fmt;

use lawn_defence_core::Event;
use lawn_defence_world::{query, state::Outcome, World};

/// Running totals gathered from the event stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Report {
    game_seconds: f32,
    plants_placed: u32,
    plants_lost: u32,
    projectiles_fired: u32,
    zombies_spawned: u32,
    pickups_collected: u32,
    drops_spawned: u32,
    lawnmowers_used: u32,
}

impl Report {
    /// Folds one tick's events into the totals.
    pub(crate) fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => self.game_seconds += dt,
                Event::PlantPlaced { .. } => self.plants_placed += 1,
                Event::PlantDestroyed { .. } => self.plants_lost += 1,
                Event::ProjectileFired { .. } => self.projectiles_fired += 1,
                Event::ZombieSpawned { .. } => self.zombies_spawned += 1,
                Event::PickupCollected { .. } => self.pickups_collected += 1,
                Event::DropSpawned { .. } => self.drops_spawned += 1,
                Event::LawnmowerTriggered { .. } => self.lawnmowers_used += 1,
                _ => {}
            }
        }
    }

    /// Pairs the totals with the world's final state.
    pub(crate) fn summary<'a>(&'a self, world: &'a World) -> Summary<'a> {
        Summary {
            report: self,
            world,
        }
    }
}

/// Human-readable end-of-run summary.
pub(crate) struct Summary<'a> {
    report: &'a Report,
    world: &'a World,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { report, world } = self;
        let outcome = match query::outcome(world) {
            Outcome::InProgress => "unfinished",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        };
        let (_, max_combo) = query::combo(world);
        writeln!(
            f,
            "level {} ({}): {outcome} after {:.1} s of game time",
            world.level().number,
            world.level().name,
            report.game_seconds
        )?;
        writeln!(
            f,
            "waves {}/{}, zombies spawned {}, killed {}, best combo {max_combo}",
            query::current_wave(world),
            query::wave_count(world),
            report.zombies_spawned,
            query::zombies_killed(world)
        )?;
        writeln!(
            f,
            "plants placed {}, lost {}, projectiles fired {}, lawnmowers used {}",
            report.plants_placed,
            report.plants_lost,
            report.projectiles_fired,
            report.lawnmowers_used
        )?;
        write!(
            f,
            "sun banked {}, pickups collected {}, drops {}, coins earned {}",
            query::sun(world),
            report.pickups_collected,
            report.drops_spawned,
            query::coins_earned(world)
        )
    }
}
