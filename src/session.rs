use macroquad::logging::info;

use crate::game::{Cell, CellPicker, Game, Grid, Step};
use crate::timer::TickTimer;

/// Owns the game state plus everything the frame loop needs to drive and
/// interpolate it.
pub struct Session {
    game: Game,
    previous: Vec<Cell>,
    timer: TickTimer,
    elapsed: f32,
}

impl Session {
    pub fn new(grid: Grid, palette_len: usize, tick_interval: f32, rng: &mut impl CellPicker) -> Self {
        let game = Game::new(grid, palette_len, rng);
        let previous = game.snake().to_vec();
        Self {
            game,
            previous,
            timer: TickTimer::new(tick_interval),
            elapsed: 0.0,
        }
    }

    /// Advances wall-clock time by `dt` seconds and runs at most one update.
    pub fn frame(&mut self, dt: f32, rng: &mut impl CellPicker) -> Option<Step> {
        self.elapsed += dt.max(0.0);
        if self.game.is_finished() {
            self.timer.accumulate(dt);
            return None;
        }
        if !self.timer.advance(dt) {
            return None;
        }

        self.previous.clear();
        self.previous.extend_from_slice(self.game.snake());
        let step = self.game.update(rng);
        match step {
            Step::Won => info!("snake reached full length after {:.1}s", self.elapsed),
            Step::WallReset => info!("hit the wall, starting over"),
            _ => {}
        }
        Some(step)
    }

    pub fn restart(&mut self, rng: &mut impl CellPicker) {
        self.game.reset(rng);
        self.previous.clear();
        self.previous.extend_from_slice(self.game.snake());
        self.timer.reset();
        info!("game restarted");
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Snake as it was before the most recent update.
    pub fn previous(&self) -> &[Cell] {
        &self.previous
    }

    pub fn interpolation(&self) -> f32 {
        self.timer.fraction()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
