use lawn_defence_core::{
    components::{
        BossPhase, BossState, Freezable, GridPos, Health, Velocity, WorldPos, Zombie,
    },
    Entity, Event, FrameTime, LevelDef, PlantKind, ZombieKind,
};
use lawn_defence_system_zombies as zombies;
use lawn_defence_world::{factory, query, Config, World};

fn world() -> World {
    World::new(
        Config::default(),
        LevelDef::builtin(10).expect("level ten exists"),
    )
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

fn x_of(world: &World, entity: Entity) -> f32 {
    world
        .store()
        .get::<WorldPos>(entity)
        .map(|position| position.x)
        .expect("entity has a position")
}

#[test]
fn walking_speed_scales_with_the_slow_factor() {
    let mut world = world();
    let walker = zombie_at(&mut world, ZombieKind::Basic, 0, 500.0);
    let slowed = zombie_at(&mut world, ZombieKind::Basic, 1, 500.0);
    for zombie in [walker, slowed] {
        let _ = world
            .store_mut()
            .set(zombie, Velocity { x: -20.0, y: 0.0 });
    }
    let _ = world
        .store_mut()
        .modify::<Freezable>(slowed, |freezable| freezable.apply(0.5, 4.0));

    zombies::advance(&mut world, FrameTime::new(1.0), &mut Vec::new());
    assert_eq!(x_of(&world, walker), 480.0);
    assert_eq!(x_of(&world, slowed), 490.0);
}

#[test]
fn walking_updates_the_column() {
    let mut world = world();
    let walker = zombie_at(&mut world, ZombieKind::Basic, 0, 181.0);
    let _ = world
        .store_mut()
        .set(walker, Velocity { x: -20.0, y: 0.0 });
    zombies::advance(&mut world, FrameTime::new(0.1), &mut Vec::new());
    assert_eq!(world.store().get::<GridPos>(walker).map(|g| g.col), Some(0));
}

#[test]
fn eating_zombies_hold_position_and_bite_on_cadence() {
    let mut world = world();
    let plant = factory::plant(&mut world, PlantKind::Peashooter, 1, 3).expect("free cell");
    let center = world.field().cell_center_x(3);
    let eater = zombie_at(&mut world, ZombieKind::Basic, 1, center + 10.0);

    let mut events = Vec::new();
    zombies::eat(&mut world, FrameTime::new(0.1), &mut events);
    let plant_health = |world: &World| world.store().get::<Health>(plant).map(|h| h.current);
    assert_eq!(plant_health(&world), Some(90), "first bite is immediate");
    assert!(world
        .store()
        .get::<Zombie>(eater)
        .is_some_and(|zombie| zombie.eating));

    zombies::advance(&mut world, FrameTime::new(1.0), &mut events);
    assert_eq!(x_of(&world, eater), center + 10.0, "eaters stand still");

    zombies::eat(&mut world, FrameTime::new(0.25), &mut events);
    assert_eq!(plant_health(&world), Some(90));
    zombies::eat(&mut world, FrameTime::new(0.25), &mut events);
    assert_eq!(plant_health(&world), Some(80));

    for _ in 0..8 {
        zombies::eat(&mut world, FrameTime::new(0.5), &mut events);
    }
    assert_eq!(plant_health(&world), Some(0));
    assert_eq!(query::plant_at(&world, 1, 3), None, "cell released at once");
    assert!(world.is_pending(plant));
    assert!(events.contains(&Event::PlantDestroyed {
        plant,
        kind: PlantKind::Peashooter,
    }));
    assert!(world
        .store()
        .get::<Zombie>(eater)
        .is_some_and(|zombie| !zombie.eating));
}

#[test]
fn zombies_ignore_plants_out_of_reach() {
    let mut world = world();
    let plant = factory::plant(&mut world, PlantKind::WallNut, 2, 3).expect("free cell");
    let left_edge = world.field().cell_center_x(3) - 39.0;
    let _ = zombie_at(&mut world, ZombieKind::Basic, 3, left_edge);
    zombies::eat(&mut world, FrameTime::new(0.1), &mut Vec::new());
    assert_eq!(
        world.store().get::<Health>(plant).map(|h| h.current),
        Some(800),
        "wrong lane"
    );
}

#[test]
fn pole_vaulters_jump_the_first_plant_once() {
    let mut world = world();
    let _ = factory::plant(&mut world, PlantKind::WallNut, 2, 4).expect("free cell");
    let start = world.field().cell_center_x(4) + 34.0;
    let vaulter = zombie_at(&mut world, ZombieKind::PoleVault, 2, start);

    zombies::abilities(&mut world, FrameTime::new(0.1), &mut Vec::new());
    assert_eq!(x_of(&world, vaulter), start - 120.0);
    let velocity = world
        .store()
        .get::<Velocity>(vaulter)
        .copied()
        .expect("velocity");
    assert_eq!(velocity.x, -0.20 * 80.0);

    zombies::abilities(&mut world, FrameTime::new(0.1), &mut Vec::new());
    assert_eq!(x_of(&world, vaulter), start - 120.0, "vaulting happens once");
}

#[test]
fn dancers_summon_backup_into_neighbouring_lanes() {
    let mut world = world();
    let _ = zombie_at(&mut world, ZombieKind::Dancing, 0, 700.0);
    let mut events = Vec::new();

    zombies::abilities(&mut world, FrameTime::new(2.5), &mut events);
    assert!(events.is_empty());
    zombies::abilities(&mut world, FrameTime::new(0.5), &mut events);
    let lanes: Vec<i32> = events
        .iter()
        .filter_map(|event| match event {
            Event::ZombieSpawned {
                kind: ZombieKind::Basic,
                lane,
                ..
            } => Some(*lane),
            _ => None,
        })
        .collect();
    assert_eq!(lanes, vec![0, 1], "lane -1 lies outside the lawn");

    zombies::abilities(&mut world, FrameTime::new(10.0), &mut events);
    assert_eq!(events.len(), 2, "summoning happens once");
    assert_eq!(query::zombies_alive(&world), 3);
}

#[test]
fn weakened_boss_enrages_and_throws_once() {
    let mut world = world();
    let boss = factory::zombie(&mut world, ZombieKind::Gargantuar, 3);
    let before = world
        .store()
        .get::<Velocity>(boss)
        .map(|velocity| velocity.x)
        .expect("velocity");
    let _ = world
        .store_mut()
        .modify::<Health>(boss, |health| health.current = 700);

    let mut events = Vec::new();
    zombies::boss(&mut world, FrameTime::new(0.1), &mut events);
    zombies::boss(&mut world, FrameTime::new(0.1), &mut events);

    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::BossEnraged { .. }))
            .count(),
        1
    );
    let imp = events
        .iter()
        .find_map(|event| match event {
            Event::ZombieSpawned {
                zombie,
                kind: ZombieKind::Imp,
                lane: 3,
            } => Some(*zombie),
            _ => None,
        })
        .expect("an imp was thrown");
    assert_eq!(x_of(&world, imp), world.field().cell_center_x(6));
    assert_eq!(world.store().get::<GridPos>(imp).map(|g| g.col), Some(6));

    let state = world
        .store()
        .get::<BossState>(boss)
        .copied()
        .expect("boss state");
    assert_eq!(state.phase, BossPhase::Enraged);
    assert!(state.has_thrown);
    let after = world
        .store()
        .get::<Velocity>(boss)
        .map(|velocity| velocity.x)
        .expect("velocity");
    assert!((after - before * 1.3).abs() < 1e-3);
}

#[test]
fn boss_smashes_the_plant_in_front_on_cooldown() {
    let mut world = world();
    let plant = factory::plant(&mut world, PlantKind::WallNut, 0, 4).expect("free cell");
    let x = world.field().cell_center_x(5);
    let boss = zombie_at(&mut world, ZombieKind::Gargantuar, 0, x);

    zombies::boss(&mut world, FrameTime::new(3.5), &mut Vec::new());
    assert_eq!(
        world.store().get::<Health>(plant).map(|h| h.current),
        Some(800)
    );
    zombies::boss(&mut world, FrameTime::new(0.5), &mut Vec::new());
    assert_eq!(world.store().get::<Health>(plant).map(|h| h.current), Some(0));
    assert_eq!(
        world.store().get::<BossState>(boss).map(|s| s.smash_timer),
        Some(0.0)
    );
}
