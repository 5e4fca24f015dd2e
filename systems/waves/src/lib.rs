#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave state machine that releases the level's scripted zombies.
//!
//! Entries of the current wave are spawned one zombie at a time, separated
//! by the entry's delay. Once the wave is exhausted the machine waits for the
//! wave's trailing delay, or for the lawn to be cleared, before moving on.

use rand::Rng;
use tracing::{debug, info};

use lawn_defence_core::{Event, FrameTime};
use lawn_defence_world::{factory, query, state::Outcome, World};

/// Advances the wave state machine by one frame.
pub fn spawn_waves(world: &mut World, time: FrameTime, out: &mut Vec<Event>) {
    if world.outcome() != Outcome::InProgress {
        return;
    }
    let mut progress = *world.waves();
    let wave_count = world.level().waves.len();
    let Some(wave) = world.level().waves.get(progress.current_wave as usize) else {
        return;
    };
    let delay_after = wave.delay_after;
    let entry = wave.entries.get(progress.entry_index).copied();

    let Some(entry) = entry else {
        progress.wave_timer += time.dt;
        let cleared = delay_after > 0.0 && query::zombies_alive(world) == 0;
        if progress.wave_timer >= delay_after || cleared {
            progress.advance_wave();
            progress.spawn_timer = 0.0;
            if let Some(next) = world.level().waves.get(progress.current_wave as usize) {
                let flag_wave = next.flag_wave;
                info!(wave = progress.current_wave, flag_wave, "wave started");
                out.push(Event::WaveStarted {
                    wave: progress.current_wave,
                    flag_wave,
                });
            } else {
                debug!(waves = wave_count, "every wave released");
            }
        }
        *world.waves_mut() = progress;
        return;
    };

    progress.spawn_timer -= time.dt;
    if progress.spawn_timer <= 0.0 {
        let lane = pick_lane(world);
        let zombie = factory::zombie(world, entry.kind, lane);
        out.push(Event::ZombieSpawned {
            zombie,
            kind: entry.kind,
            lane,
        });
        progress.spawned_in_entry += 1;
        progress.spawn_timer = entry.delay_between;
        if progress.spawned_in_entry >= entry.count {
            progress.entry_index += 1;
            progress.spawned_in_entry = 0;
        }
    }
    *world.waves_mut() = progress;
}

/// Picks a uniformly random lane for a share of spawns and the least
/// populated lane otherwise. Ties go to the lowest lane.
fn pick_lane(world: &mut World) -> i32 {
    let percent = world.tuning().waves.random_lane_percent;
    let occupancy = query::lane_occupancy(world);
    let lanes = occupancy.len().max(1);
    if world.rng().gen_range(0..100) < percent {
        return world.rng().gen_range(0..lanes) as i32;
    }
    occupancy
        .iter()
        .enumerate()
        .min_by_key(|&(lane, count)| (*count, lane))
        .map_or(0, |(lane, _)| lane as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawn_defence_core::{LevelDef, Tuning, ZombieKind};
    use lawn_defence_world::Config;

    #[test]
    fn least_populated_lane_wins_without_randomness() {
        let mut tuning = Tuning::default();
        tuning.waves.random_lane_percent = 0;
        let mut world = World::new(
            Config {
                tuning,
                ..Config::default()
            },
            LevelDef::builtin(1).expect("level one exists"),
        );
        for lane in [0, 1, 3, 4] {
            let _ = factory::zombie(&mut world, ZombieKind::Basic, lane);
        }
        assert_eq!(pick_lane(&mut world), 2);
        let _ = factory::zombie(&mut world, ZombieKind::Basic, 2);
        assert_eq!(pick_lane(&mut world), 0, "ties go to the lowest lane");
    }
}
