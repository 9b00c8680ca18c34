use crate::game::{Game, GameState};
use crate::platform::{Video, tiles};

const PRESS_START: &str = "PRESS START";
const PAUSED: &str = "PAUSED";
const GAME_OVER: &str = "GAME OVER";

/// Row of the logo's top edge on the menu
const LOGO_ROW: i32 = 6;

/// Translates game state into drawing primitives
///
/// Reads the game, never mutates it. Every call ends with a present.
pub struct Renderer {
    /// Tile columns available to the score, counting leftwards from `score_x`
    score_digits: i32,
    /// Column of the score's least significant digit
    score_x: i32,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            score_digits: 3,
            score_x: 2,
        }
    }

    pub fn render<V: Video + ?Sized>(&self, game: &Game, video: &mut V) {
        video.clear_bg();

        match game.state() {
            GameState::Menu => self.render_menu(game, video),
            GameState::Playing => self.render_playfield(game, video),
            GameState::Paused => {
                self.render_playfield(game, video);
                self.render_pause(game, video);
            }
            GameState::GameOver => self.render_game_over(game, video),
        }

        video.present();
    }

    fn render_menu<V: Video + ?Sized>(&self, game: &Game, video: &mut V) {
        let gfx = game.gfx();
        let logo_x = (gfx.tiles_w - tiles::LOGO_COLS) / 2;

        for y in 0..tiles::LOGO_ROWS {
            for x in 0..tiles::LOGO_COLS {
                let tile = tiles::LOGO_BASE + (y * tiles::LOGO_COLS + x) as u16;
                video.put_tile(logo_x + x, LOGO_ROW + y, tile, tiles::PAL_DEFAULT);
            }
        }

        let prompt_y = LOGO_ROW + tiles::LOGO_ROWS + 2;
        draw_text_centered(video, gfx.tiles_w, prompt_y, PRESS_START, tiles::PAL_PROMPT);
    }

    fn render_playfield<V: Video + ?Sized>(&self, game: &Game, video: &mut V) {
        let gfx = game.gfx();
        let snake = game.snake();

        for (slot, &segment) in snake.segments().iter().enumerate() {
            let (px, py) = gfx.to_px(segment);
            let (tile, palette) = if slot == 0 {
                (tiles::SPRITE_HEAD, tiles::PAL_HEAD)
            } else {
                (tiles::SPRITE_BODY, tiles::PAL_BODY)
            };
            video.sprite_set(slot, px, py, tile, palette);
        }

        // Sprite slots keep their last position until hidden
        for slot in snake.len()..snake.capacity() {
            video.sprite_hide(slot);
        }

        let food = game.food();
        if gfx.contains(food) {
            let (px, py) = gfx.to_px(food);
            video.sprite_set(game.food_slot(), px, py, tiles::SPRITE_FOOD, tiles::PAL_FOOD);
        } else {
            video.sprite_hide(game.food_slot());
        }

        self.render_score(game.score(), video);
    }

    fn render_score<V: Video + ?Sized>(&self, score: u32, video: &mut V) {
        draw_number(video, score, self.score_x, 0, self.score_digits, tiles::PAL_DEFAULT);
    }

    fn render_pause<V: Video + ?Sized>(&self, game: &Game, video: &mut V) {
        let gfx = game.gfx();
        draw_text_centered(video, gfx.tiles_w, banner_row(gfx.tiles_h), PAUSED, tiles::PAL_ALERT);
    }

    fn render_game_over<V: Video + ?Sized>(&self, game: &Game, video: &mut V) {
        let gfx = game.gfx();
        draw_text_centered(
            video,
            gfx.tiles_w,
            banner_row(gfx.tiles_h),
            GAME_OVER,
            tiles::PAL_ALERT,
        );

        self.render_score(game.score(), video);

        // "HI" followed by the session best, flush right
        let hi_x = gfx.tiles_w - 1 - self.score_digits - 2;
        draw_text(video, hi_x, 0, "HI", tiles::PAL_PROMPT);
        draw_number(
            video,
            game.high_score(),
            gfx.tiles_w - 1,
            0,
            self.score_digits,
            tiles::PAL_PROMPT,
        );
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Row used for the pause and game-over banners
fn banner_row(tiles_h: i32) -> i32 {
    (tiles_h / 2 - 2).max(0)
}

/// Draw `text` from column `x`; spaces leave a gap
fn draw_text<V: Video + ?Sized>(video: &mut V, x: i32, y: i32, text: &str, palette: u8) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(tile) = tiles::letter(ch) {
            video.put_tile(x + i as i32, y, tile, palette);
        }
    }
}

fn draw_text_centered<V: Video + ?Sized>(
    video: &mut V,
    tiles_w: i32,
    y: i32,
    text: &str,
    palette: u8,
) {
    let x = (tiles_w - text.len() as i32) / 2;
    draw_text(video, x, y, text, palette);
}

/// Draw `value` least significant digit first, moving left from `right_x`
///
/// Stops once the remaining value is zero or `budget` columns are used, so
/// zero still shows a single digit.
fn draw_number<V: Video + ?Sized>(
    video: &mut V,
    value: u32,
    right_x: i32,
    y: i32,
    budget: i32,
    palette: u8,
) {
    let mut remaining = value;
    let mut x = right_x;
    let left_limit = right_x - budget + 1;

    loop {
        video.put_tile(x, y, tiles::digit(remaining % 10), palette);
        remaining /= 10;
        x -= 1;
        if remaining == 0 || x < left_limit {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, Position};
    use crate::platform::{Buttons, DrawCall, GfxInfo, RecordingPlatform};

    fn setup(gfx: GfxInfo) -> (Game, RecordingPlatform) {
        let platform = RecordingPlatform::new(gfx);
        let game = Game::init(&platform, &GameConfig::default());
        (game, platform)
    }

    fn text_at(platform: &RecordingPlatform, x: i32, y: i32, len: i32) -> String {
        (x..x + len)
            .map(|tx| {
                platform
                    .tile_at(tx, y)
                    .and_then(tiles::glyph)
                    .unwrap_or(' ')
            })
            .collect()
    }

    #[test]
    fn test_frame_starts_with_clear_and_presents() {
        let (game, mut platform) = setup(GfxInfo::gba());
        Renderer::new().render(&game, &mut platform);

        assert_eq!(platform.presented(), 1);
        assert_eq!(platform.frame().first(), Some(&DrawCall::ClearBg));
        assert!(platform.pending().is_empty());
    }

    #[test]
    fn test_menu_screen() {
        let (game, mut platform) = setup(GfxInfo::gba());
        Renderer::new().render(&game, &mut platform);

        // Logo: 8x4 tiles centered, starting at row 6
        assert_eq!(platform.tile_at(11, 6), Some(tiles::LOGO_BASE));
        assert_eq!(platform.tile_at(18, 9), Some(tiles::LOGO_BASE + 31));
        assert_eq!(text_at(&platform, 9, 12, 11), "PRESS START");

        // No sprites touched on the menu
        assert!(platform.sprite(0).is_none());
    }

    #[test]
    fn test_playing_draws_snake_and_food() {
        let (mut game, mut platform) = setup(GfxInfo::gba());
        game.reset();
        Renderer::new().render(&game, &mut platform);

        assert_eq!(
            platform.sprite(0),
            Some(DrawCall::Sprite {
                slot: 0,
                px: 120,
                py: 80,
                tile: tiles::SPRITE_HEAD,
                palette: tiles::PAL_HEAD,
            })
        );
        assert!(matches!(
            platform.sprite(2),
            Some(DrawCall::Sprite { px: 104, py: 80, tile: tiles::SPRITE_BODY, .. })
        ));

        // Every slot past the tail is hidden
        for slot in 3..game.snake().capacity() {
            assert_eq!(platform.sprite(slot), Some(DrawCall::HideSprite { slot }));
        }

        assert!(matches!(
            platform.sprite(game.food_slot()),
            Some(DrawCall::Sprite { px: 144, py: 80, tile: tiles::SPRITE_FOOD, .. })
        ));
        assert_eq!(platform.ignored(), 0);
    }

    #[test]
    fn test_food_off_grid_is_hidden() {
        // 4 wide: initial food lands at x = 5
        let (mut game, mut platform) = setup(GfxInfo::new(4, 4, 8));
        game.reset();
        assert_eq!(game.food(), Position::new(5, 2));

        Renderer::new().render(&game, &mut platform);
        let slot = game.food_slot();
        assert_eq!(platform.sprite(slot), Some(DrawCall::HideSprite { slot }));
    }

    #[test]
    fn test_score_digits_right_to_left() {
        let mut platform = RecordingPlatform::new(GfxInfo::gba());

        draw_number(&mut platform, 0, 2, 0, 3, 0);
        platform.present();
        assert_eq!(platform.tiles().count(), 1);
        assert_eq!(platform.tile_at(2, 0), Some(tiles::digit(0)));

        draw_number(&mut platform, 70, 2, 0, 3, 0);
        platform.present();
        assert_eq!(text_at(&platform, 0, 0, 3), " 70");

        // Budget exhausted: only the three low digits
        draw_number(&mut platform, 12345, 2, 0, 3, 0);
        platform.present();
        assert_eq!(platform.tiles().count(), 3);
        assert_eq!(text_at(&platform, 0, 0, 3), "345");
    }

    #[test]
    fn test_paused_overlay() {
        let (mut game, mut platform) = setup(GfxInfo::gba());
        game.reset();
        game.update(Buttons::START, &mut platform);
        Renderer::new().render(&game, &mut platform);

        assert_eq!(text_at(&platform, 12, 8, 6), "PAUSED");
        // Playfield still drawn underneath
        assert!(matches!(platform.sprite(0), Some(DrawCall::Sprite { .. })));
    }

    #[test]
    fn test_game_over_screen() {
        let (mut game, mut platform) = setup(GfxInfo::gba());
        game.reset();
        game.arrange(
            &[
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
            ],
            Direction::Left,
            Position::new(6, 5),
        );
        for _ in 0..game.move_interval() {
            game.update(Buttons::empty(), &mut platform);
        }
        assert_eq!(game.state(), GameState::GameOver);

        Renderer::new().render(&game, &mut platform);
        assert_eq!(text_at(&platform, 10, 8, 9), "GAME OVER");
        assert_eq!(platform.tile_at(2, 0), Some(tiles::digit(0)));
        assert_eq!(text_at(&platform, 24, 0, 2), "HI");
        assert_eq!(platform.tile_at(29, 0), Some(tiles::digit(0)));
    }
}
