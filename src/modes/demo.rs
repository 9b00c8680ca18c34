//! Headless demo: the autopilot plays against the recording backend
//!
//! Handy for smoke-testing a geometry or timing configuration without a
//! terminal, and for profiling the engine.

use anyhow::Result;
use tracing::{debug, info};

use super::autopilot::Autopilot;
use crate::game::{Game, GameConfig};
use crate::metrics::SessionMetrics;
use crate::platform::{Random, RecordingPlatform, Timing};
use crate::render::Renderer;
use crate::runner::frame_with;

pub struct DemoMode {
    config: GameConfig,
    seed: u32,
    frames: u64,
    metrics: SessionMetrics,
}

impl DemoMode {
    pub fn new(config: GameConfig, seed: u32, frames: u64) -> Self {
        Self {
            config,
            seed,
            frames,
            metrics: SessionMetrics::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.config.validate()?;

        let mut platform = RecordingPlatform::new(self.config.gfx());
        platform.seed_random(self.seed);

        let mut game = Game::init(&platform, &self.config);
        let renderer = Renderer::new();
        let mut pilot = Autopilot::new();

        for _ in 0..self.frames {
            platform.wait_frame();
            let buttons = pilot.buttons(&game);

            let info = frame_with(&mut platform, &mut game, &renderer, buttons);
            self.metrics.on_frame(info);

            if info.collided {
                self.metrics.on_game_over(game.score());
                info!(
                    game = self.metrics.games_played,
                    score = game.score(),
                    length = game.snake().len(),
                    "demo game finished"
                );
            }
        }

        self.metrics.observe_high_score(game.high_score());
        self.metrics.update();
        debug!(
            presented = platform.presented(),
            ignored = platform.ignored(),
            sounds = platform.sounds().len(),
            "demo backend stats"
        );
        Ok(())
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_runs_requested_frames() {
        let mut demo = DemoMode::new(GameConfig::default(), 1, 3_000);
        demo.run().unwrap();

        let metrics = demo.metrics();
        assert_eq!(metrics.frames, 3_000);
        assert!(metrics.moves > 250);
        assert!(metrics.food_eaten >= 5);
        assert!(metrics.high_score >= 10);
    }

    #[test]
    fn test_demo_rejects_bad_config() {
        let mut demo = DemoMode::new(GameConfig::new(2, 2), 1, 10);
        assert!(demo.run().is_err());
    }
}
