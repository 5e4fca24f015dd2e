#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! End-of-pipeline bookkeeping: settles the level and queues everything
//! that died during the tick.
//!
//! Every zombie that reached zero health is credited to the score and the
//! coin bank, may leave a reward drop behind and is queued for removal.
//! Dead plants are queued without a reward.

use rand::Rng;
use tracing::{debug, info};

use lawn_defence_core::{
    components::{GridPos, Health, Plant, WorldPos, Zombie},
    tuning::RewardTier,
    DropKind, Event, FrameTime,
};
use lawn_defence_world::{factory, query, state::Outcome, World};

/// Declares the level lost or won, then accounts for every death.
pub fn settle(world: &mut World, _time: FrameTime, out: &mut Vec<Event>) {
    if world.outcome() == Outcome::InProgress {
        judge(world, out);
    }
    reap_zombies(world, out);
    reap_plants(world, out);
}

fn judge(world: &mut World, out: &mut Vec<Event>) {
    let baseline = world.field().offset_x - world.tuning().defence.baseline_margin;
    let breach = world
        .store()
        .each::<(Zombie, GridPos, WorldPos, Health)>()
        .into_iter()
        .find(|(_, (_, grid, position, health))| {
            !health.is_dead() && position.x < baseline && world.lawnmower(grid.row).is_none()
        })
        .map(|(_, (_, grid, _, _))| grid.row);
    if let Some(lane) = breach {
        world.declare(Outcome::Lost);
        info!(lane, "level lost");
        out.push(Event::LevelLost { lane });
        return;
    }

    let exhausted = query::current_wave(world) >= query::wave_count(world);
    if exhausted && query::zombies_alive(world) == 0 {
        let reward = world.level().coin_reward;
        let economy = world.economy_mut();
        economy.coins_earned = economy.coins_earned.saturating_add(reward);
        let coins_earned = economy.coins_earned;
        world.declare(Outcome::Won);
        info!(coins_earned, "level won");
        out.push(Event::LevelWon { coins_earned });
    }
}

fn reap_zombies(world: &mut World, out: &mut Vec<Event>) {
    let display = world.tuning().combo.display;
    let rewards = world.tuning().rewards;
    let dead = world.store().each::<(Zombie, Health, WorldPos)>();
    for (zombie, (state, health, position)) in dead {
        if !health.is_dead() || world.is_pending(zombie) {
            continue;
        }
        let combo = world.score_mut().record_kill(display);
        let economy = world.economy_mut();
        economy.coins_earned = economy
            .coins_earned
            .saturating_add(state.kind.stats().coin_value);

        let roll = world.rng().gen_range(0..100);
        let reward = match rewards.tier(roll) {
            RewardTier::PowerUp => {
                let pick = world.rng().gen_range(0..DropKind::POWER_UPS.len());
                Some(DropKind::POWER_UPS[pick])
            }
            RewardTier::Diamond => Some(DropKind::Diamond),
            RewardTier::Coin => Some(DropKind::Coin),
            RewardTier::Nothing => None,
        };
        if let Some(kind) = reward {
            let drop = factory::drop(world, kind, position);
            out.push(Event::DropSpawned { drop, kind });
        }

        world.destroy(zombie);
        debug!(?zombie, kind = ?state.kind, combo, "zombie killed");
        out.push(Event::ZombieKilled {
            zombie,
            kind: state.kind,
            combo,
        });
    }
}

fn reap_plants(world: &mut World, out: &mut Vec<Event>) {
    for (plant, (Plant { kind }, health)) in world.store().each::<(Plant, Health)>() {
        if !health.is_dead() || world.is_pending(plant) {
            continue;
        }
        world.destroy(plant);
        out.push(Event::PlantDestroyed { plant, kind });
    }
}
