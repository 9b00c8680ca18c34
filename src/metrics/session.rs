use std::time::{Duration, Instant};

use crate::game::StepInfo;

/// Counters for one run of the program, across any number of games
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub food_eaten: u32,
    pub moves: u64,
    pub frames: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            food_eaten: 0,
            moves: 0,
            frames: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold in the outcome of one frame
    pub fn on_frame(&mut self, info: StepInfo) {
        self.frames += 1;
        if info.moved {
            self.moves += 1;
        }
        if info.ate_food {
            self.food_eaten += 1;
        }
    }

    /// Raise the best score without counting a finished game
    ///
    /// Used when the session ends mid-game.
    pub fn observe_high_score(&mut self, score: u32) {
        self.high_score = self.high_score.max(score);
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    pub fn summary(&self) -> String {
        format!(
            "time {} | frames {} | moves {} | games {} | food {} | best {}",
            self.format_time(),
            self.frames,
            self.moves,
            self.games_played,
            self.food_eaten,
            self.high_score
        )
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
