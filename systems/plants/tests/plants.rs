use lawn_defence_core::{
    components::{ChomperState, Health, PotatoMineState, Projectile, Sun, WorldPos},
    Event, FrameTime, LevelDef, PlantKind, ProjectileKind, ZombieKind,
};
use lawn_defence_system_plants as plants;
use lawn_defence_world::{factory, Config, World};

fn world() -> World {
    World::new(
        Config::default(),
        LevelDef::builtin(10).expect("level ten exists"),
    )
}

fn place_zombie(world: &mut World, kind: ZombieKind, lane: i32, x: f32) -> lawn_defence_core::Entity {
    let zombie = factory::zombie(world, kind, lane);
    let y = world.field().cell_center_y(lane);
    let col = world.field().column_at(x);
    let _ = world.store_mut().set(zombie, WorldPos::new(x, y));
    let _ = world
        .store_mut()
        .set(zombie, lawn_defence_core::GridPos { row: lane, col });
    zombie
}

fn health(world: &World, entity: lawn_defence_core::Entity) -> i32 {
    world
        .store()
        .get::<Health>(entity)
        .map(|health| health.current)
        .expect("entity has health")
}

#[test]
fn repeater_fires_two_peas_per_volley() {
    let mut world = world();
    let _ = factory::plant(&mut world, PlantKind::Repeater, 1, 0).expect("free cell");
    let _ = place_zombie(&mut world, ZombieKind::Basic, 1, 700.0);

    let mut events = Vec::new();
    plants::attack(&mut world, FrameTime::new(0.7), &mut events);

    let fired: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, Event::ProjectileFired { lane: 1, .. }))
        .collect();
    assert_eq!(fired.len(), 2, "repeater volley has two peas");

    let peas = world.store().each::<(Projectile, WorldPos)>();
    let mut xs: Vec<f32> = peas.iter().map(|(_, (_, position))| position.x).collect();
    xs.sort_by(f32::total_cmp);
    let center = world.field().cell_center_x(0);
    assert_eq!(xs, vec![center + 5.0, center + 20.0]);
    assert!(peas
        .iter()
        .all(|(_, (projectile, _))| projectile.kind == ProjectileKind::Pea
            && projectile.damage == 20));
}

#[test]
fn plant_boost_doubles_the_attack_clock() {
    let mut world = world();
    let _ = factory::plant(&mut world, PlantKind::Peashooter, 0, 0).expect("free cell");
    let _ = place_zombie(&mut world, ZombieKind::Basic, 0, 700.0);
    world.power_ups_mut().plant_boost = 10.0;

    let mut events = Vec::new();
    plants::attack(&mut world, FrameTime::new(0.35), &mut events);
    assert_eq!(events.len(), 1, "half the first delay suffices while boosted");
}

#[test]
fn zombies_left_of_the_lawn_do_not_draw_fire() {
    let mut world = world();
    let _ = factory::plant(&mut world, PlantKind::Peashooter, 0, 0).expect("free cell");
    let _ = place_zombie(&mut world, ZombieKind::Basic, 0, 90.0);

    let mut events = Vec::new();
    plants::attack(&mut world, FrameTime::new(2.0), &mut events);
    assert!(events.is_empty());
}

#[test]
fn sunflowers_produce_after_their_first_delay() {
    let mut world = world();
    let _ = factory::plant(&mut world, PlantKind::Sunflower, 2, 2).expect("free cell");

    plants::produce_sun(&mut world, FrameTime::new(2.5), &mut Vec::new());
    assert_eq!(world.store().count::<Sun>(), 0);
    plants::produce_sun(&mut world, FrameTime::new(0.5), &mut Vec::new());
    assert_eq!(world.store().count::<Sun>(), 1);
    plants::produce_sun(&mut world, FrameTime::new(4.5), &mut Vec::new());
    assert_eq!(world.store().count::<Sun>(), 1, "interval is five seconds");
    plants::produce_sun(&mut world, FrameTime::new(0.5), &mut Vec::new());
    assert_eq!(world.store().count::<Sun>(), 2);
}

#[test]
fn potato_mine_needs_fifteen_seconds_to_arm() {
    let mut world = world();
    let mine = factory::plant(&mut world, PlantKind::PotatoMine, 3, 4).expect("free cell");
    let mine_x = world.field().cell_center_x(4);
    let zombie = place_zombie(&mut world, ZombieKind::Basic, 3, mine_x + 10.0);

    for _ in 0..14 {
        plants::potato_mines(&mut world, FrameTime::new(1.0), &mut Vec::new());
    }
    assert_eq!(health(&world, zombie), 100, "unarmed mines are inert");
    assert!(!world.is_pending(mine));

    plants::potato_mines(&mut world, FrameTime::new(1.0), &mut Vec::new());
    let state = world
        .store()
        .get::<PotatoMineState>(mine)
        .expect("mine state");
    assert!(state.armed);

    plants::potato_mines(&mut world, FrameTime::new(0.016), &mut Vec::new());
    assert_eq!(health(&world, zombie), 0);
    assert!(world.is_pending(mine), "mines are single use");
}

#[test]
fn chomper_swallows_the_nearest_zombie_then_digests() {
    let mut world = world();
    let chomper = factory::plant(&mut world, PlantKind::Chomper, 0, 2).expect("free cell");
    let center = world.field().cell_center_x(2);
    let far = place_zombie(&mut world, ZombieKind::Basic, 0, center + 100.0);
    let near = place_zombie(&mut world, ZombieKind::Buckethead, 0, center + 40.0);

    plants::chompers(&mut world, FrameTime::new(0.016), &mut Vec::new());
    assert_eq!(health(&world, near), 0);
    assert_eq!(health(&world, far), 100);

    let state = *world
        .store()
        .get::<ChomperState>(chomper)
        .expect("chomper state");
    assert!(state.eating);

    plants::chompers(&mut world, FrameTime::new(19.0), &mut Vec::new());
    assert_eq!(health(&world, far), 100, "digesting chompers are idle");
    plants::chompers(&mut world, FrameTime::new(1.0), &mut Vec::new());
    plants::chompers(&mut world, FrameTime::new(0.016), &mut Vec::new());
    assert_eq!(health(&world, far), 0);
}

#[test]
fn cherry_bomb_clears_the_surrounding_block() {
    let mut world = world();
    let bomb = factory::plant(&mut world, PlantKind::CherryBomb, 2, 4).expect("free cell");
    let (right, center) = (world.field().cell_center_x(5), world.field().cell_center_x(4));
    let inside = place_zombie(&mut world, ZombieKind::Football, 1, right);
    let outside = place_zombie(&mut world, ZombieKind::Basic, 4, center);

    plants::explosives(&mut world, FrameTime::new(0.2), &mut Vec::new());
    assert_eq!(health(&world, inside), 300, "fuse still burning");

    plants::explosives(&mut world, FrameTime::new(0.2), &mut Vec::new());
    assert_eq!(health(&world, inside), 0);
    assert_eq!(health(&world, outside), 100);
    assert!(world.is_pending(bomb));
}

#[test]
fn jalapeno_burns_its_whole_lane() {
    let mut world = world();
    let _ = factory::plant(&mut world, PlantKind::Jalapeno, 3, 0).expect("free cell");
    let near = place_zombie(&mut world, ZombieKind::Basic, 3, 100.0);
    let far = place_zombie(&mut world, ZombieKind::Conehead, 3, 800.0);
    let other = place_zombie(&mut world, ZombieKind::Basic, 2, 100.0);

    plants::explosives(&mut world, FrameTime::new(0.25), &mut Vec::new());
    assert_eq!(health(&world, near), 0);
    assert_eq!(health(&world, far), 0);
    assert_eq!(health(&world, other), 100);
}
