//! Run score and XP progression.

use skirmish_core::constants::xp_to_next;
use skirmish_core::events::GameEvent;
use skirmish_core::state::ScoreView;

/// Kills, gold, and XP accumulated this run. XP thresholds live here so the
/// XP multiplier is observable; spending levels is the external shop's job.
#[derive(Debug, Clone)]
pub struct ScoreState {
    pub kills: u32,
    pub gold: f64,
    pub xp: f64,
    pub level: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            kills: 0,
            gold: 0.0,
            xp: 0.0,
            level: 1,
        }
    }
}

impl ScoreState {
    /// Award XP (already multiplied) and emit a LevelUp per threshold crossed.
    pub fn award_xp(&mut self, amount: f64, events: &mut Vec<GameEvent>) {
        self.xp += amount;
        while self.xp >= xp_to_next(self.level) {
            self.xp -= xp_to_next(self.level);
            self.level += 1;
            events.push(GameEvent::LevelUp { level: self.level });
        }
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            kills: self.kills,
            gold: self.gold,
            xp: self.xp,
            level: self.level,
        }
    }
}
