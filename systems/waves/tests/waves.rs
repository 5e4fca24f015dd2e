use lawn_defence_core::{
    Event, FrameTime, LevelDef, PlantKind, Wave, WaveEntry, ZombieKind,
};
use lawn_defence_system_waves::spawn_waves;
use lawn_defence_world::{query, state::Outcome, Config, World};

fn level(waves: Vec<Wave>) -> LevelDef {
    LevelDef {
        number: 99,
        name: "Test Lawn".to_owned(),
        starting_sun: 50,
        sky_drop: false,
        available_plants: vec![PlantKind::Peashooter],
        waves,
        coin_reward: 10,
    }
}

fn wave(kind: ZombieKind, count: u32, delay_between: f32, delay_after: f32) -> Wave {
    Wave {
        entries: vec![WaveEntry {
            kind,
            count,
            delay_between,
        }],
        delay_after,
        flag_wave: false,
    }
}

fn spawned(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::ZombieSpawned { .. }))
        .count()
}

#[test]
fn entries_spawn_one_zombie_per_delay() {
    let mut world = World::new(
        Config::default(),
        level(vec![wave(ZombieKind::Conehead, 3, 2.0, 10.0)]),
    );
    let mut events = Vec::new();

    spawn_waves(&mut world, FrameTime::new(0.5), &mut events);
    assert_eq!(spawned(&events), 1, "the first spawn is immediate");

    spawn_waves(&mut world, FrameTime::new(1.5), &mut events);
    assert_eq!(spawned(&events), 1);
    spawn_waves(&mut world, FrameTime::new(1.0), &mut events);
    assert_eq!(spawned(&events), 2);
    spawn_waves(&mut world, FrameTime::new(1.0), &mut events);
    assert_eq!(spawned(&events), 2);
    spawn_waves(&mut world, FrameTime::new(1.0), &mut events);
    assert_eq!(spawned(&events), 3);
    assert_eq!(query::zombies_alive(&world), 3);

    for _ in 0..4 {
        spawn_waves(&mut world, FrameTime::new(2.0), &mut events);
    }
    assert_eq!(spawned(&events), 3, "entry count is respected");
    assert!(events.iter().all(|event| match event {
        Event::ZombieSpawned { kind, lane, .. } =>
            *kind == ZombieKind::Conehead && (0..5).contains(lane),
        _ => true,
    }));
}

#[test]
fn clearing_the_lawn_starts_the_next_wave_early() {
    let mut world = World::new(
        Config::default(),
        level(vec![
            wave(ZombieKind::Basic, 1, 0.0, 30.0),
            wave(ZombieKind::Basic, 1, 0.0, 30.0),
        ]),
    );
    let mut events = Vec::new();
    spawn_waves(&mut world, FrameTime::new(0.1), &mut events);
    spawn_waves(&mut world, FrameTime::new(5.0), &mut events);
    assert_eq!(query::current_wave(&world), 0, "zombie still alive");

    let zombie = events
        .iter()
        .find_map(|event| match event {
            Event::ZombieSpawned { zombie, .. } => Some(*zombie),
            _ => None,
        })
        .expect("a zombie spawned");
    world.destroy(zombie);
    let _ = world.flush(&mut events);

    spawn_waves(&mut world, FrameTime::new(0.1), &mut events);
    assert_eq!(query::current_wave(&world), 1);
    assert!(events.contains(&Event::WaveStarted {
        wave: 1,
        flag_wave: false,
    }));
}

#[test]
fn trailing_delay_advances_waves_with_zombies_alive() {
    let mut world = World::new(
        Config::default(),
        level(vec![
            wave(ZombieKind::Basic, 1, 0.0, 3.0),
            wave(ZombieKind::Basic, 1, 0.0, 3.0),
        ]),
    );
    let mut events = Vec::new();
    spawn_waves(&mut world, FrameTime::new(0.1), &mut events);
    spawn_waves(&mut world, FrameTime::new(2.0), &mut events);
    assert_eq!(query::current_wave(&world), 0);
    spawn_waves(&mut world, FrameTime::new(1.0), &mut events);
    assert_eq!(query::current_wave(&world), 1);
}

#[test]
fn wave_index_never_decreases_and_stops_at_the_count() {
    let mut world = World::new(
        Config::default(),
        LevelDef::builtin(1).expect("level one exists"),
    );
    let mut events = Vec::new();
    let mut last = 0;
    for _ in 0..2_000 {
        spawn_waves(&mut world, FrameTime::new(0.1), &mut events);
        let current = query::current_wave(&world);
        assert!(current >= last, "wave index went backwards");
        assert!(current <= query::wave_count(&world));
        last = current;
    }
    assert_eq!(last, query::wave_count(&world));
    let scripted = world.level().scripted_zombies() as usize;
    assert_eq!(spawned(&events), scripted);

    let before = events.len();
    spawn_waves(&mut world, FrameTime::new(10.0), &mut events);
    assert_eq!(events.len(), before, "exhausted levels stay quiet");
}

#[test]
fn settled_levels_spawn_nothing() {
    let mut world = World::new(
        Config::default(),
        LevelDef::builtin(1).expect("level one exists"),
    );
    world.declare(Outcome::Lost);
    let mut events = Vec::new();
    spawn_waves(&mut world, FrameTime::new(1.0), &mut events);
    assert!(events.is_empty());
    assert_eq!(query::zombies_alive(&world), 0);
}
