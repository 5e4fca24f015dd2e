//! Scripted defence used by the headless runner.

use lawn_defence_core::{
    components::{Drop, Sun, WorldPos},
    Command, PlantKind,
};
use lawn_defence_world::{query, World};

/// Plants sunflowers in the back column and peashooters in front of them,
/// and clicks every pickup it can see.
#[derive(Clone, Debug)]
pub(crate) struct Autopilot {
    /// Frames between two rounds of decisions.
    pub(crate) think_every: u64,
    formation: [(i32, PlantKind); 2],
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            think_every: 10,
            formation: [(0, PlantKind::Sunflower), (1, PlantKind::Peashooter)],
        }
    }
}

impl Autopilot {
    /// Intents for the current frame. Plants are only requested when the
    /// level offers them, the sun bank covers them and the seed is ready.
    pub(crate) fn commands(&self, world: &World) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut sun = query::sun(world);

        for &(col, kind) in &self.formation {
            if !world.level().offers(kind) || query::seed_recharge(world, kind) > 0.0 {
                continue;
            }
            let cost = kind.stats().cost;
            let free_row = (0..world.field().rows as i32)
                .find(|&row| query::plant_at(world, row, col).is_none());
            if let Some(row) = free_row {
                if sun >= cost {
                    sun -= cost;
                    commands.push(Command::PlacePlant { kind, row, col });
                }
            }
        }

        let suns = world
            .store()
            .each::<(Sun, WorldPos)>()
            .into_iter()
            .filter(|(_, (sun, _))| !sun.motion.collecting)
            .map(|(_, (_, position))| position);
        let drops = world
            .store()
            .each::<(Drop, WorldPos)>()
            .into_iter()
            .filter(|(_, (drop, _))| !drop.motion.collecting)
            .map(|(_, (_, position))| position);
        commands.extend(suns.chain(drops).map(|position| Command::CollectAt {
            x: position.x,
            y: position.y,
        }));
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::Autopilot;
    use lawn_defence_core::{components::WorldPos, Command, LevelDef, PlantKind};
    use lawn_defence_world::{self as world, factory, Config, World};

    fn world() -> World {
        World::new(
            Config::default(),
            LevelDef::builtin(1).expect("level one exists"),
        )
    }

    #[test]
    fn spends_the_opening_sun_on_both_columns() {
        let world = world();
        let commands = Autopilot::default().commands(&world);
        assert_eq!(
            commands,
            vec![
                Command::PlacePlant {
                    kind: PlantKind::Sunflower,
                    row: 0,
                    col: 0,
                },
                Command::PlacePlant {
                    kind: PlantKind::Peashooter,
                    row: 0,
                    col: 1,
                },
            ]
        );
    }

    #[test]
    fn waits_for_recharging_seeds() {
        let mut world = world();
        let mut events = Vec::new();
        for command in Autopilot::default().commands(&world) {
            world::apply(&mut world, command, &mut events);
        }
        assert!(Autopilot::default().commands(&world).is_empty());
    }

    #[test]
    fn clicks_every_idle_pickup() {
        let mut world = world();
        world.economy_mut().sun = 0;
        let _ = factory::sun(&mut world, WorldPos::new(300.0, 200.0), 250.0);
        let commands = Autopilot::default().commands(&world);
        assert_eq!(commands, vec![Command::CollectAt { x: 300.0, y: 200.0 }]);
    }
}
