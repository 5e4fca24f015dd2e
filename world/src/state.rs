//! Counters and timers aggregated by the world next to the entity store.

use lawn_defence_core::PlantKind;

/// Currency banked during a level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Economy {
    /// Sun available for planting.
    pub sun: u32,
    /// Coins earned so far.
    pub coins_earned: u32,
    /// Seconds until the next sky sun.
    pub sky_drop_timer: f32,
}

impl Economy {
    /// Deducts `cost` if the bank covers it and reports whether it did.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        match self.sun.checked_sub(cost) {
            Some(remaining) => {
                self.sun = remaining;
                true
            }
            None => false,
        }
    }
}

/// Position of the wave state machine.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WaveProgress {
    /// Index of the current wave; equals the wave count once all are done.
    pub current_wave: u32,
    /// Index of the entry being spawned within the current wave.
    pub entry_index: usize,
    /// Zombies already spawned from the current entry.
    pub spawned_in_entry: u32,
    /// Seconds until the next spawn.
    pub spawn_timer: f32,
    /// Seconds spent waiting after the current wave's last spawn.
    pub wave_timer: f32,
}

impl WaveProgress {
    /// Moves to the next wave. The index never decreases.
    pub fn advance_wave(&mut self) {
        self.current_wave = self.current_wave.saturating_add(1);
        self.entry_index = 0;
        self.spawned_in_entry = 0;
        self.wave_timer = 0.0;
    }
}

/// Remaining seconds of each timed buff.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PowerUps {
    /// Seconds of doubled plant attack speed left.
    pub plant_boost: f32,
    /// Seconds of global freeze left.
    pub freeze_all: f32,
}

impl PowerUps {
    /// Whether plants currently attack at boosted speed.
    #[must_use]
    pub fn plant_boost_active(&self) -> bool {
        self.plant_boost > 0.0
    }

    /// Whether every freezable entity is currently being slowed.
    #[must_use]
    pub fn freeze_all_active(&self) -> bool {
        self.freeze_all > 0.0
    }
}

/// Kill statistics and the running combo.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Score {
    /// Zombies defeated this level.
    pub zombies_killed: u32,
    /// Kills chained without a break.
    pub combo: u32,
    /// Largest combo reached this level.
    pub max_combo: u32,
    /// Real-time seconds since the last kill.
    pub combo_timer: f32,
    /// Seconds the combo counter stays on display.
    pub combo_display: f32,
}

impl Score {
    /// Accounts for one kill and returns the combo it extends.
    pub fn record_kill(&mut self, display: f32) -> u32 {
        self.zombies_killed = self.zombies_killed.saturating_add(1);
        self.combo = self.combo.saturating_add(1);
        self.combo_timer = 0.0;
        self.max_combo = self.max_combo.max(self.combo);
        self.combo_display = display;
        self.combo
    }

    /// Advances the combo clocks, breaking the combo once `break_after`
    /// real seconds pass without a kill.
    pub fn advance(&mut self, real_dt: f32, dt: f32, break_after: f32) {
        self.combo_timer += real_dt;
        if self.combo_timer > break_after {
            self.combo = 0;
        }
        if self.combo_display > 0.0 {
            self.combo_display = (self.combo_display - dt).max(0.0);
        }
    }
}

/// Seed-packet recharge timers, one per plant kind.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SeedBank {
    cooldowns: [f32; PlantKind::ALL.len()],
}

impl SeedBank {
    /// Seconds until `kind` can be placed again.
    #[must_use]
    pub fn remaining(&self, kind: PlantKind) -> f32 {
        self.cooldowns[kind.index()]
    }

    /// Starts the recharge of `kind`.
    pub fn start(&mut self, kind: PlantKind) {
        self.cooldowns[kind.index()] = kind.stats().recharge;
    }

    /// Counts every recharge down by `dt`.
    pub fn advance(&mut self, dt: f32) {
        for cooldown in &mut self.cooldowns {
            *cooldown = (*cooldown - dt).max(0.0);
        }
    }
}

/// Result of the level so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// Zombies are still coming.
    #[default]
    InProgress,
    /// Every wave was cleared.
    Won,
    /// A zombie broke through.
    Lost,
}

#[cfg(test)]
mod tests {
    use super::{Economy, Score, SeedBank};
    use lawn_defence_core::PlantKind;

    #[test]
    fn spending_never_goes_negative() {
        let mut economy = Economy {
            sun: 50,
            coins_earned: 0,
            sky_drop_timer: 0.0,
        };
        assert!(!economy.try_spend(100));
        assert_eq!(economy.sun, 50);
        assert!(economy.try_spend(50));
        assert_eq!(economy.sun, 0);
    }

    #[test]
    fn combo_breaks_after_idle_real_time() {
        let mut score = Score::default();
        assert_eq!(score.record_kill(2.0), 1);
        assert_eq!(score.record_kill(2.0), 2);
        score.advance(1.5, 1.5, 2.0);
        assert_eq!(score.combo, 2);
        score.advance(0.6, 0.6, 2.0);
        assert_eq!(score.combo, 0);
        assert_eq!(score.max_combo, 2);
        assert_eq!(score.record_kill(2.0), 1);
        assert_eq!(score.max_combo, 2);
    }

    #[test]
    fn seed_recharge_counts_down_to_zero() {
        let mut seeds = SeedBank::default();
        seeds.start(PlantKind::WallNut);
        assert_eq!(seeds.remaining(PlantKind::WallNut), 25.0);
        seeds.advance(30.0);
        assert_eq!(seeds.remaining(PlantKind::WallNut), 0.0);
        assert_eq!(seeds.remaining(PlantKind::Peashooter), 0.0);
    }
}
