use anyhow::Result;
use tracing::info;

use crate::game::{Game, GameConfig, StepInfo};
use crate::metrics::SessionMetrics;
use crate::platform::{Random, TerminalPlatform};
use crate::render::Renderer;
use crate::runner::run_frame;

/// Play with the keyboard in a terminal window
pub struct PlayMode {
    config: GameConfig,
    seed: u32,
    metrics: SessionMetrics,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self {
            config,
            seed,
            metrics: SessionMetrics::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.config.validate()?;

        let mut platform = TerminalPlatform::new(self.config.gfx(), self.config.frame_rate)?;
        platform.seed_random(self.seed);

        let mut game = Game::init(&platform, &self.config);
        let renderer = Renderer::new();

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut platform, &mut game, &renderer);

        platform.restore()?;
        self.finish(&game);
        info!(summary = %self.metrics.summary(), "play session ended");

        result
    }

    fn run_game_loop(
        &mut self,
        platform: &mut TerminalPlatform,
        game: &mut Game,
        renderer: &Renderer,
    ) -> Result<()> {
        loop {
            let info = run_frame(platform, game, renderer);
            self.record(game, info);
            platform.check()?;

            if platform.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn record(&mut self, game: &Game, info: StepInfo) {
        self.metrics.on_frame(info);
        if info.collided {
            self.metrics.on_game_over(game.score());
        }
    }

    /// Close the books; a game still running counts toward the best score
    fn finish(&mut self, game: &Game) {
        self.metrics.observe_high_score(game.high_score());
        self.metrics.update();
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};
    use crate::platform::{Buttons, RecordingPlatform};

    #[test]
    fn test_records_game_over() {
        let config = GameConfig::default();
        let mut mode = PlayMode::new(config.clone(), 7);
        let mut platform = RecordingPlatform::new(config.gfx());
        let mut game = Game::init(&platform, &config);
        game.reset();
        game.arrange(
            &[
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
            ],
            Direction::Left,
            Position::new(20, 15),
        );

        for _ in 0..game.move_interval() {
            let info = game.update(Buttons::empty(), &mut platform);
            mode.record(&game, info);
        }

        assert_eq!(mode.metrics().games_played, 1);
        assert_eq!(mode.metrics().frames, u64::from(game.move_interval()));
    }

    #[test]
    fn test_quitting_mid_game_keeps_current_best() {
        let config = GameConfig::default();
        let mut mode = PlayMode::new(config.clone(), 7);
        let mut platform = RecordingPlatform::new(config.gfx());
        let mut game = Game::init(&platform, &config);
        game.reset();

        // Food right in front of the head, eaten on the next move
        let body = game.snake().segments().to_vec();
        game.arrange(&body, Direction::Right, body[0].moved_by(1, 0));
        for _ in 0..game.move_interval() {
            let info = game.update(Buttons::empty(), &mut platform);
            mode.record(&game, info);
        }
        assert_eq!(game.score(), 10);
        assert_eq!(mode.metrics().high_score, 0);

        mode.finish(&game);
        assert_eq!(mode.metrics().high_score, 10);
        assert_eq!(mode.metrics().games_played, 0);
    }
}
