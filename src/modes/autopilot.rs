//! Greedy pilot for unattended play
//!
//! Steers toward the food along the shortest torus path, never reversing and
//! never into an occupied tile. It commits to one heading per head position,
//! since two turns between moves could fold the snake back onto its neck.

use crate::game::{Direction, Game, GameState, Position};
use crate::platform::Buttons;

pub struct Autopilot {
    steered_at: Option<Position>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self { steered_at: None }
    }

    /// Buttons to press this frame
    pub fn buttons(&mut self, game: &Game) -> Buttons {
        match game.state() {
            GameState::Menu | GameState::GameOver | GameState::Paused => {
                self.steered_at = None;
                Buttons::START
            }
            GameState::Playing => self.steer(game),
        }
    }

    fn steer(&mut self, game: &Game) -> Buttons {
        let head = game.snake().head();
        if self.steered_at == Some(head) {
            return Buttons::empty();
        }
        self.steered_at = Some(head);

        let heading = game.heading();
        let gfx = game.gfx();
        let safe = |dir: Direction| {
            !heading.is_opposite(dir)
                && !game.is_occupied(
                    head.moved_in_direction(dir)
                        .wrapped(gfx.tiles_w.max(1), gfx.tiles_h.max(1)),
                )
        };

        let (dx, dy) = torus_delta(head, game.food(), gfx.tiles_w, gfx.tiles_h);
        let mut preferred = Vec::with_capacity(4);
        if dx != 0 {
            preferred.push(if dx > 0 { Direction::Right } else { Direction::Left });
        }
        if dy != 0 {
            preferred.push(if dy > 0 { Direction::Down } else { Direction::Up });
        }

        let choice = preferred
            .into_iter()
            .chain([heading])
            .chain(Direction::PRIORITY)
            .find(|dir| safe(*dir));

        match choice {
            Some(dir) if dir != heading => dir.button(),
            _ => Buttons::empty(),
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new()
    }
}

/// Signed shortest offset from `from` to `to` on a `width x height` torus
fn torus_delta(from: Position, to: Position, width: i32, height: i32) -> (i32, i32) {
    (
        shortest(to.x - from.x, width.max(1)),
        shortest(to.y - from.y, height.max(1)),
    )
}

fn shortest(delta: i32, size: i32) -> i32 {
    let d = delta.rem_euclid(size);
    if d > size / 2 { d - size } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use crate::platform::{GfxInfo, RecordingPlatform};

    #[test]
    fn test_torus_delta() {
        let a = Position::new(1, 1);
        assert_eq!(torus_delta(a, Position::new(4, 1), 30, 20), (3, 0));
        assert_eq!(torus_delta(a, Position::new(28, 1), 30, 20), (-3, 0));
        assert_eq!(torus_delta(a, Position::new(1, 19), 30, 20), (0, -2));
    }

    #[test]
    fn test_presses_start_outside_play() {
        let game = Game::new(GfxInfo::gba(), &GameConfig::default());
        assert_eq!(Autopilot::new().buttons(&game), Buttons::START);
    }

    #[test]
    fn test_turns_toward_food_once_per_tile() {
        let mut game = Game::new(GfxInfo::gba(), &GameConfig::default());
        game.reset();
        game.arrange(
            &[Position::new(15, 10), Position::new(14, 10), Position::new(13, 10)],
            Direction::Right,
            Position::new(15, 5),
        );

        let mut pilot = Autopilot::new();
        assert_eq!(pilot.buttons(&game), Buttons::UP);
        assert_eq!(pilot.buttons(&game), Buttons::empty());
    }

    #[test]
    fn test_avoids_body() {
        let mut game = Game::new(GfxInfo::gba(), &GameConfig::default());
        game.reset();
        // Food is up, but the tile above the head is body
        game.arrange(
            &[
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
                Position::new(4, 4),
            ],
            Direction::Left,
            Position::new(5, 1),
        );

        let buttons = Autopilot::new().buttons(&game);
        assert!(!buttons.contains(Buttons::UP));
        assert!(!buttons.contains(Buttons::RIGHT));
    }

    #[test]
    fn test_plays_without_crashing_early() {
        let config = GameConfig::default();
        let mut platform = RecordingPlatform::new(config.gfx());
        let mut game = Game::init(&platform, &config);
        let mut pilot = Autopilot::new();

        for _ in 0..2_000 {
            let buttons = pilot.buttons(&game);
            game.update(buttons, &mut platform);
        }
        assert!(game.high_score() >= 50);
    }
}
