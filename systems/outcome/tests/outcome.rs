use lawn_defence_core::{
    components::{Drop, GridPos, Health, WorldPos},
    tuning::RewardTable,
    DropKind, Entity, Event, FrameTime, LevelDef, PlantKind, Tuning, ZombieKind,
};
use lawn_defence_system_outcome::settle;
use lawn_defence_world::{factory, query, state::Outcome, Config, World};

fn world_with_rewards(rewards: RewardTable) -> World {
    let mut tuning = Tuning::default();
    tuning.rewards = rewards;
    World::new(
        Config {
            tuning,
            ..Config::default()
        },
        LevelDef::builtin(1).expect("level one exists"),
    )
}

fn no_drops() -> RewardTable {
    RewardTable {
        power_up_below: 0,
        diamond_below: 0,
        coin_below: 0,
    }
}

fn zombie_at(world: &mut World, kind: ZombieKind, lane: i32, x: f32) -> Entity {
    let zombie = factory::zombie(world, kind, lane);
    let y = world.field().cell_center_y(lane);
    let col = world.field().column_at(x);
    let store = world.store_mut();
    let _ = store.set(zombie, WorldPos::new(x, y));
    let _ = store.set(zombie, GridPos { row: lane, col });
    zombie
}

fn kill(world: &mut World, entity: Entity) {
    let _ = world.store_mut().modify::<Health>(entity, Health::kill);
}

#[test]
fn unused_lawnmowers_take_priority_over_losing() {
    let mut world = world_with_rewards(no_drops());
    let _ = zombie_at(&mut world, ZombieKind::Basic, 2, 30.0);
    let mut events = Vec::new();

    settle(&mut world, FrameTime::new(0.016), &mut events);
    assert_eq!(world.outcome(), Outcome::InProgress, "lane two is still guarded");

    let mower = query::lawnmower(&world, 2).expect("lane two guarded");
    world.destroy(mower);
    let _ = world.flush(&mut events);
    settle(&mut world, FrameTime::new(0.016), &mut events);
    assert_eq!(world.outcome(), Outcome::Lost);
    assert!(events.contains(&Event::LevelLost { lane: 2 }));
}

#[test]
fn zombies_short_of_the_baseline_never_lose_the_level() {
    let mut world = world_with_rewards(no_drops());
    let mower = query::lawnmower(&world, 0).expect("lane zero guarded");
    world.destroy(mower);
    let _ = world.flush(&mut Vec::new());
    let _ = zombie_at(&mut world, ZombieKind::Basic, 0, 40.0);
    settle(&mut world, FrameTime::new(0.016), &mut Vec::new());
    assert_eq!(world.outcome(), Outcome::InProgress);
}

#[test]
fn clearing_every_wave_wins_with_the_level_reward() {
    let mut world = world_with_rewards(no_drops());
    world.waves_mut().current_wave = query::wave_count(&world);
    let zombie = zombie_at(&mut world, ZombieKind::Basic, 1, 500.0);
    let mut events = Vec::new();

    settle(&mut world, FrameTime::new(0.016), &mut events);
    assert_eq!(world.outcome(), Outcome::InProgress, "a zombie is still alive");

    kill(&mut world, zombie);
    settle(&mut world, FrameTime::new(0.016), &mut events);
    let _ = world.flush(&mut events);
    assert_eq!(
        world.outcome(),
        Outcome::InProgress,
        "dead zombies count until they are flushed"
    );

    settle(&mut world, FrameTime::new(0.016), &mut events);
    assert_eq!(world.outcome(), Outcome::Won);
    assert_eq!(query::coins_earned(&world), 1 + 50);
    assert!(events.contains(&Event::LevelWon { coins_earned: 51 }));

    settle(&mut world, FrameTime::new(0.016), &mut events);
    assert_eq!(query::coins_earned(&world), 51, "the reward is granted once");
}

#[test]
fn kills_are_credited_once() {
    let mut world = world_with_rewards(no_drops());
    let first = zombie_at(&mut world, ZombieKind::Buckethead, 0, 500.0);
    let second = zombie_at(&mut world, ZombieKind::Football, 1, 500.0);
    kill(&mut world, first);
    kill(&mut world, second);

    let mut events = Vec::new();
    settle(&mut world, FrameTime::new(0.016), &mut events);
    settle(&mut world, FrameTime::new(0.016), &mut events);

    let kills: Vec<(Entity, u32)> = events
        .iter()
        .filter_map(|event| match event {
            Event::ZombieKilled { zombie, combo, .. } => Some((*zombie, *combo)),
            _ => None,
        })
        .collect();
    assert_eq!(kills, vec![(first, 1), (second, 2)]);
    assert_eq!(query::zombies_killed(&world), 2);
    assert_eq!(query::combo(&world), (2, 2));
    assert_eq!(query::coins_earned(&world), 4 + 5);
    assert!(world.is_pending(first) && world.is_pending(second));
    assert_eq!(world.store().count::<Drop>(), 0);
}

#[test]
fn guaranteed_coin_tier_drops_a_coin_at_the_body() {
    let mut world = world_with_rewards(RewardTable {
        power_up_below: 0,
        diamond_below: 0,
        coin_below: 100,
    });
    let zombie = zombie_at(&mut world, ZombieKind::Basic, 3, 400.0);
    kill(&mut world, zombie);

    let mut events = Vec::new();
    settle(&mut world, FrameTime::new(0.016), &mut events);
    let drops = world.store().each::<(Drop, WorldPos)>();
    assert_eq!(drops.len(), 1);
    let (drop, (state, position)) = drops[0];
    assert_eq!(state.kind, DropKind::Coin);
    assert_eq!(position.x, 400.0);
    assert!(events.contains(&Event::DropSpawned {
        drop,
        kind: DropKind::Coin,
    }));
}

#[test]
fn power_up_tier_picks_a_power_up() {
    let mut world = world_with_rewards(RewardTable {
        power_up_below: 100,
        diamond_below: 100,
        coin_below: 100,
    });
    for lane in 0..5 {
        let zombie = zombie_at(&mut world, ZombieKind::Basic, lane, 400.0);
        kill(&mut world, zombie);
    }
    settle(&mut world, FrameTime::new(0.016), &mut Vec::new());
    let drops = world.store().each::<(Drop,)>();
    assert_eq!(drops.len(), 5);
    assert!(drops
        .iter()
        .all(|(_, (drop,))| DropKind::POWER_UPS.contains(&drop.kind)));
}

#[test]
fn dead_plants_are_queued_without_reward() {
    let mut world = world_with_rewards(no_drops());
    let plant = factory::plant(&mut world, PlantKind::Sunflower, 4, 4).expect("free cell");
    kill(&mut world, plant);

    let mut events = Vec::new();
    settle(&mut world, FrameTime::new(0.016), &mut events);
    assert_eq!(
        events,
        vec![Event::PlantDestroyed {
            plant,
            kind: PlantKind::Sunflower,
        }]
    );
    let _ = world.flush(&mut events);
    assert_eq!(query::plant_at(&world, 4, 4), None);
    assert_eq!(query::coins_earned(&world), 0);
}
