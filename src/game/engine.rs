use tracing::{debug, info, trace};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{GameState, Grid, Position, Snake},
};
use crate::platform::{Audio, Buttons, GfxInfo, Video};

/// Segments in a freshly reset snake
pub const INITIAL_SNAKE_LEN: usize = 3;

/// What happened during one update call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// The snake advanced one tile
    pub moved: bool,
    /// The snake ate food this step
    pub ate_food: bool,
    /// The snake ran into itself and the session ended
    pub collided: bool,
}

/// The game: simulation state plus the session counters that outlive a reset
#[derive(Debug, Clone)]
pub struct Game {
    gfx: GfxInfo,
    move_interval: u32,
    score_per_food: u32,
    points_per_level: u32,

    state: GameState,
    snake: Snake,
    heading: Direction,
    food: Position,
    grid: Grid,

    score: u32,
    high_score: u32,
    level: u32,

    frame_count: u64,
    move_timer: u32,
}

impl Game {
    /// Create a game sized to `gfx`, sitting on the menu
    pub fn new(gfx: GfxInfo, config: &GameConfig) -> Self {
        let capacity = gfx.area().max(INITIAL_SNAKE_LEN);
        let mut game = Self {
            gfx,
            move_interval: config.move_interval(),
            score_per_food: config.score_per_food,
            points_per_level: config.points_per_level.max(1),
            state: GameState::Menu,
            snake: Snake::new(Position::ORIGIN, Direction::Right, INITIAL_SNAKE_LEN, capacity),
            heading: Direction::Right,
            food: Position::ORIGIN,
            grid: Grid::new(gfx.tiles_w, gfx.tiles_h),
            score: 0,
            high_score: 0,
            level: 1,
            frame_count: 0,
            move_timer: 0,
        };
        game.place_initial_snake();
        debug!(?gfx, capacity, move_interval = game.move_interval, "game initialised");
        game
    }

    /// Create a game for the geometry a video backend reports
    pub fn init<V: Video + ?Sized>(video: &V, config: &GameConfig) -> Self {
        Self::new(video.gfx_info(), config)
    }

    /// Start a new session: Playing, score 0, level 1, snake centered
    ///
    /// The high score and frame counter survive.
    pub fn reset(&mut self) {
        self.state = GameState::Playing;
        self.score = 0;
        self.level = 1;
        self.place_initial_snake();
        debug!(high_score = self.high_score, "session reset");
    }

    fn place_initial_snake(&mut self) {
        let center = Position::new(self.gfx.tiles_w / 2, self.gfx.tiles_h / 2);
        self.heading = Direction::Right;
        self.move_timer = 0;
        self.snake.lay_out(center, self.heading, INITIAL_SNAKE_LEN);
        self.grid.rebuild(self.snake.segments());
        // May land off a very narrow grid; the renderer hides it then
        self.food = center.moved_by(3, 0);
    }

    /// Advance the game by one frame
    ///
    /// `buttons` is sampled once per frame by the caller. Audio cues are
    /// triggered on `audio` as they happen.
    pub fn update<A: Audio + ?Sized>(&mut self, buttons: Buttons, audio: &mut A) -> StepInfo {
        self.frame_count += 1;

        if buttons.contains(Buttons::START) {
            match self.state {
                GameState::Menu | GameState::GameOver => self.reset(),
                GameState::Playing => {
                    self.state = GameState::Paused;
                    debug!("paused");
                }
                GameState::Paused => {
                    self.state = GameState::Playing;
                    debug!("resumed");
                }
            }
        }

        if self.state != GameState::Playing {
            return StepInfo::default();
        }

        self.heading = self.heading.steer(buttons);

        self.move_timer += 1;
        if self.move_timer < self.move_interval {
            return StepInfo::default();
        }
        self.move_timer = 0;

        self.step(audio)
    }

    fn step<A: Audio + ?Sized>(&mut self, audio: &mut A) -> StepInfo {
        let next = self
            .snake
            .head()
            .moved_in_direction(self.heading)
            .wrapped(self.gfx.tiles_w.max(1), self.gfx.tiles_h.max(1));

        if self.grid.is_occupied(next) {
            self.state = GameState::GameOver;
            self.high_score = self.high_score.max(self.score);
            audio.beep_hit();
            info!(
                score = self.score,
                high_score = self.high_score,
                length = self.snake.len(),
                "game over"
            );
            return StepInfo {
                collided: true,
                ..Default::default()
            };
        }

        // Must be decided before the body shifts
        let ate_food = next == self.food;

        self.snake.advance(next);

        if ate_food {
            if !self.snake.grow() {
                trace!(length = self.snake.len(), "snake at capacity");
            }
            self.score += self.score_per_food;
            self.level = self.score / self.points_per_level + 1;
            self.high_score = self.high_score.max(self.score);
            audio.beep_ok();
        }

        self.grid.rebuild(self.snake.segments());

        if ate_food {
            self.spawn_food();
            trace!(score = self.score, level = self.level, food = ?self.food, "food eaten");
        }

        StepInfo {
            moved: true,
            ate_food,
            collided: false,
        }
    }

    /// Move the food to the first free tile in row-major order
    ///
    /// Falls back to the origin when every tile is occupied.
    pub fn spawn_food(&mut self) {
        self.food = self.grid.first_empty().unwrap_or(Position::ORIGIN);
    }

    pub fn gfx(&self) -> GfxInfo {
        self.gfx
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Update calls since the game was created
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn move_interval(&self) -> u32 {
        self.move_interval
    }

    /// Whether the snake occupies `pos`, as of the last move
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.grid.is_occupied(pos)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sprite slot used for the food, right after the last snake slot
    pub fn food_slot(&self) -> usize {
        self.snake.capacity()
    }

    /// Replace the body, heading and food, then resync the grid
    ///
    /// Used to set up specific situations, e.g. in tests or demos.
    pub fn arrange(&mut self, body: &[Position], heading: Direction, food: Position) {
        let Some((&head, rest)) = body.split_first() else {
            return;
        };
        self.snake.lay_out(head, heading, 1);
        for &segment in rest {
            if !self.snake.grow() {
                break;
            }
            let last = self.snake.len() - 1;
            self.snake.set_segment(last, segment);
        }
        self.heading = heading;
        self.food = food;
        self.grid.rebuild(self.snake.segments());
    }
}
