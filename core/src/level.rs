//! Level definitions and the built-in level roster.

use serde::{Deserialize, Serialize};

use crate::kinds::{PlantKind, ZombieKind};

/// Group of identical zombies spawned one after another.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    /// Archetype spawned.
    pub kind: ZombieKind,
    /// Number of zombies spawned by the entry.
    pub count: u32,
    /// Seconds between consecutive spawns.
    pub delay_between: f32,
}

/// Ordered list of entries followed by a pause.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Entries spawned in order.
    pub entries: Vec<WaveEntry>,
    /// Seconds to wait after the last spawn before the next wave starts.
    pub delay_after: f32,
    /// Whether the wave is announced as a final push.
    pub flag_wave: bool,
}

/// Static description of a playable level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    /// One-based level number.
    pub number: u32,
    /// Display name.
    pub name: String,
    /// Sun banked when the level starts.
    pub starting_sun: u32,
    /// Whether sun periodically falls from the sky.
    pub sky_drop: bool,
    /// Plants the player may place.
    pub available_plants: Vec<PlantKind>,
    /// Waves in order.
    pub waves: Vec<Wave>,
    /// Coins granted when the level is won.
    pub coin_reward: u32,
}

impl LevelDef {
    /// Looks up a built-in level by its one-based number.
    #[must_use]
    pub fn builtin(number: u32) -> Option<LevelDef> {
        builtin_levels()
            .into_iter()
            .find(|level| level.number == number)
    }

    /// Whether the player may place `kind` in this level.
    #[must_use]
    pub fn offers(&self, kind: PlantKind) -> bool {
        self.available_plants.contains(&kind)
    }

    /// Total number of zombies the waves spawn, excluding summons and throws.
    #[must_use]
    pub fn scripted_zombies(&self) -> u32 {
        self.waves
            .iter()
            .flat_map(|wave| wave.entries.iter())
            .map(|entry| entry.count)
            .sum()
    }
}

fn z(kind: ZombieKind, count: u32, delay_between: f32) -> WaveEntry {
    WaveEntry {
        kind,
        count,
        delay_between,
    }
}

fn w(entries: Vec<WaveEntry>, delay_after: f32) -> Wave {
    Wave {
        entries,
        delay_after,
        flag_wave: false,
    }
}

fn flag(entries: Vec<WaveEntry>) -> Wave {
    Wave {
        entries,
        delay_after: 0.0,
        flag_wave: true,
    }
}

fn level(
    number: u32,
    name: &str,
    starting_sun: u32,
    available_plants: &[PlantKind],
    waves: Vec<Wave>,
    coin_reward: u32,
) -> LevelDef {
    LevelDef {
        number,
        name: name.to_owned(),
        starting_sun,
        sky_drop: true,
        available_plants: available_plants.to_vec(),
        waves,
        coin_reward,
    }
}

/// Builds the ten levels shipped with the game.
#[must_use]
pub fn builtin_levels() -> Vec<LevelDef> {
    use PlantKind as P;
    use ZombieKind::*;

    vec![
        level(
            1,
            "Day 1",
            200,
            &[P::Peashooter, P::Sunflower],
            vec![
                w(vec![z(Basic, 1, 0.0)], 30.0),
                w(vec![z(Basic, 2, 8.0)], 25.0),
                w(vec![z(Basic, 3, 6.0)], 20.0),
                flag(vec![z(Basic, 5, 4.0)]),
            ],
            50,
        ),
        level(
            2,
            "Day 2",
            150,
            &[P::Peashooter, P::Sunflower],
            vec![
                w(vec![z(Basic, 2, 8.0)], 30.0),
                w(vec![z(Basic, 3, 6.0)], 25.0),
                w(vec![z(Basic, 3, 5.0), z(Conehead, 1, 5.0)], 20.0),
                w(vec![z(Basic, 4, 4.0), z(Conehead, 2, 4.0)], 15.0),
                flag(vec![z(Basic, 6, 3.0), z(Conehead, 3, 3.0)]),
            ],
            50,
        ),
        level(
            3,
            "Day 3",
            100,
            &[P::Peashooter, P::Sunflower, P::WallNut],
            vec![
                w(vec![z(Basic, 3, 6.0)], 25.0),
                w(vec![z(Conehead, 2, 5.0), z(Basic, 2, 5.0)], 20.0),
                w(vec![z(Conehead, 3, 4.0), z(Basic, 3, 4.0)], 18.0),
                w(vec![z(Conehead, 4, 3.0), z(Basic, 4, 3.0)], 15.0),
                flag(vec![
                    z(Buckethead, 1, 0.0),
                    z(Conehead, 4, 3.0),
                    z(Basic, 5, 3.0),
                ]),
            ],
            75,
        ),
        level(
            4,
            "Day 4",
            75,
            &[
                P::Peashooter,
                P::Sunflower,
                P::WallNut,
                P::SnowPea,
                P::CherryBomb,
            ],
            vec![
                w(vec![z(Basic, 4, 5.0), z(Conehead, 1, 5.0)], 25.0),
                w(vec![z(Conehead, 3, 4.0), z(Basic, 3, 4.0)], 20.0),
                w(vec![z(Buckethead, 1, 0.0), z(Conehead, 3, 4.0)], 18.0),
                w(
                    vec![z(Basic, 5, 3.0), z(Conehead, 4, 3.0), z(Buckethead, 2, 3.0)],
                    15.0,
                ),
                flag(vec![
                    z(Buckethead, 3, 2.5),
                    z(Conehead, 5, 2.5),
                    z(Basic, 5, 2.0),
                ]),
            ],
            75,
        ),
        level(
            5,
            "Day 5",
            75,
            &[
                P::Peashooter,
                P::Sunflower,
                P::WallNut,
                P::SnowPea,
                P::CherryBomb,
                P::PotatoMine,
            ],
            vec![
                w(vec![z(Newspaper, 2, 6.0), z(Basic, 2, 6.0)], 25.0),
                w(vec![z(Conehead, 3, 4.0), z(Newspaper, 2, 5.0)], 22.0),
                w(vec![z(Newspaper, 3, 4.0), z(Basic, 4, 4.0)], 18.0),
                w(
                    vec![z(Flag, 1, 0.0), z(Newspaper, 4, 3.0), z(Conehead, 3, 3.0)],
                    15.0,
                ),
                flag(vec![
                    z(Buckethead, 2, 3.0),
                    z(Newspaper, 4, 2.5),
                    z(Basic, 6, 2.0),
                ]),
            ],
            100,
        ),
        level(
            6,
            "Night 1",
            50,
            &[
                P::Peashooter,
                P::Sunflower,
                P::WallNut,
                P::SnowPea,
                P::Repeater,
                P::PotatoMine,
            ],
            vec![
                w(vec![z(Basic, 3, 6.0), z(PoleVault, 1, 0.0)], 25.0),
                w(vec![z(PoleVault, 2, 5.0), z(Conehead, 2, 5.0)], 22.0),
                w(vec![z(PoleVault, 3, 4.0), z(Basic, 4, 4.0)], 18.0),
                w(
                    vec![
                        z(PoleVault, 3, 3.0),
                        z(Conehead, 3, 3.0),
                        z(Buckethead, 1, 3.0),
                    ],
                    15.0,
                ),
                flag(vec![
                    z(Flag, 1, 0.0),
                    z(PoleVault, 4, 2.5),
                    z(Buckethead, 2, 3.0),
                    z(Conehead, 4, 2.5),
                ]),
            ],
            100,
        ),
        level(
            7,
            "Night 2",
            50,
            &[
                P::Peashooter,
                P::Sunflower,
                P::WallNut,
                P::SnowPea,
                P::Repeater,
                P::CherryBomb,
                P::Chomper,
            ],
            vec![
                w(vec![z(Basic, 4, 5.0), z(Conehead, 2, 5.0)], 25.0),
                w(vec![z(Football, 1, 0.0), z(Basic, 3, 5.0)], 22.0),
                w(
                    vec![z(Football, 1, 0.0), z(Conehead, 3, 4.0), z(PoleVault, 2, 4.0)],
                    18.0,
                ),
                w(
                    vec![z(Football, 2, 4.0), z(Buckethead, 2, 3.0), z(Basic, 4, 3.0)],
                    15.0,
                ),
                flag(vec![
                    z(Flag, 1, 0.0),
                    z(Football, 3, 2.5),
                    z(Buckethead, 3, 2.5),
                    z(PoleVault, 3, 2.5),
                ]),
            ],
            125,
        ),
        level(
            8,
            "Fog 1",
            50,
            &[
                P::Peashooter,
                P::Sunflower,
                P::WallNut,
                P::SnowPea,
                P::Repeater,
                P::Torchwood,
                P::Jalapeno,
            ],
            vec![
                w(vec![z(Basic, 4, 5.0), z(Conehead, 2, 5.0)], 25.0),
                w(vec![z(Dancing, 1, 0.0), z(Basic, 3, 5.0)], 22.0),
                w(
                    vec![z(Dancing, 1, 0.0), z(Conehead, 3, 4.0), z(Newspaper, 2, 4.0)],
                    18.0,
                ),
                w(
                    vec![z(Dancing, 2, 5.0), z(Football, 1, 0.0), z(Buckethead, 2, 3.0)],
                    15.0,
                ),
                flag(vec![
                    z(Flag, 1, 0.0),
                    z(Dancing, 2, 3.0),
                    z(Football, 2, 3.0),
                    z(Buckethead, 3, 2.5),
                ]),
            ],
            125,
        ),
        level(
            9,
            "Fog 2",
            50,
            &[
                P::Peashooter,
                P::Sunflower,
                P::WallNut,
                P::SnowPea,
                P::Repeater,
                P::CherryBomb,
                P::Torchwood,
                P::Jalapeno,
                P::Chomper,
            ],
            vec![
                w(
                    vec![z(Football, 1, 0.0), z(Dancing, 1, 0.0), z(Conehead, 3, 5.0)],
                    25.0,
                ),
                w(vec![z(PoleVault, 3, 4.0), z(Newspaper, 3, 4.0)], 22.0),
                w(
                    vec![z(Buckethead, 3, 3.0), z(Dancing, 1, 0.0), z(Football, 1, 0.0)],
                    18.0,
                ),
                w(
                    vec![z(Football, 2, 3.0), z(PoleVault, 3, 3.0), z(Conehead, 4, 2.5)],
                    15.0,
                ),
                flag(vec![
                    z(Flag, 1, 0.0),
                    z(Football, 3, 2.0),
                    z(Dancing, 2, 2.5),
                    z(Buckethead, 4, 2.0),
                ]),
            ],
            150,
        ),
        level(
            10,
            "Final Stand",
            75,
            &PlantKind::ALL,
            vec![
                w(vec![z(Basic, 5, 4.0), z(Conehead, 3, 4.0)], 25.0),
                w(
                    vec![z(Buckethead, 2, 3.0), z(PoleVault, 3, 3.0), z(Newspaper, 3, 3.0)],
                    22.0,
                ),
                w(
                    vec![
                        z(Flag, 1, 0.0),
                        z(Football, 2, 3.0),
                        z(Dancing, 2, 3.0),
                        z(Conehead, 4, 2.5),
                    ],
                    18.0,
                ),
                w(
                    vec![z(Football, 3, 2.5), z(Buckethead, 3, 2.5), z(PoleVault, 3, 2.5)],
                    15.0,
                ),
                w(
                    vec![z(Dancing, 3, 3.0), z(Football, 2, 2.0), z(Newspaper, 4, 2.0)],
                    12.0,
                ),
                flag(vec![
                    z(Flag, 2, 0.0),
                    z(Gargantuar, 1, 0.0),
                    z(Football, 3, 2.0),
                    z(Dancing, 2, 2.5),
                    z(Buckethead, 4, 1.5),
                ]),
            ],
            300,
        ),
    ]
}
