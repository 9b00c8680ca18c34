//! Desktop backend drawing the console screen in a terminal
//!
//! Background tiles and sprite slots are kept in memory like a handheld's
//! tile map and object table; `present` composes them into one ratatui frame.
//! Each tile is two terminal columns wide so the grid looks square.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    style::Print,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};

use super::{Audio, Buttons, GfxInfo, Input, Random, Timing, Video, tiles};
use crate::input::{InputHandler, KeyAction};

const LOGO_ART: [&str; tiles::LOGO_ROWS as usize] = [
    "╭──────╮",
    "│SNAKE │",
    "│~~~~>@│",
    "╰──────╯",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sprite {
    px: i32,
    py: i32,
    tile: u16,
    palette: u8,
}

pub struct TerminalPlatform {
    gfx: GfxInfo,
    terminal: Terminal<CrosstermBackend<Stderr>>,
    input_handler: InputHandler,
    tiles: Vec<Option<(u16, u8)>>,
    sprites: Vec<Option<Sprite>>,
    frame_duration: Duration,
    next_frame: Instant,
    should_quit: bool,
    error: Option<anyhow::Error>,
    rng: StdRng,
    restored: bool,
}

impl TerminalPlatform {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn new(gfx: GfxInfo, frame_rate: u32) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let frame_duration = Duration::from_secs(1) / frame_rate.max(1);

        Ok(Self {
            gfx,
            terminal,
            input_handler: InputHandler::new(),
            tiles: vec![None; gfx.area()],
            sprites: vec![None; gfx.area() + 1],
            frame_duration,
            next_frame: Instant::now() + frame_duration,
            should_quit: false,
            error: None,
            rng: StdRng::seed_from_u64(0),
            restored: false,
        })
    }

    /// Whether a quit key was pressed
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Surface the first terminal I/O error since the last check
    pub fn check(&mut self) -> Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Hand the terminal back to the shell
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }

    fn fail(&mut self, err: anyhow::Error) {
        tracing::warn!("terminal backend error: {err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn tile_index(&self, tx: i32, ty: i32) -> Option<usize> {
        let inside = tx >= 0 && tx < self.gfx.tiles_w && ty >= 0 && ty < self.gfx.tiles_h;
        inside.then(|| (ty * self.gfx.tiles_w + tx) as usize)
    }

    /// Sprite tile per grid cell; lower slots win, like hardware object priority
    fn sprite_layer(&self) -> Vec<Option<(u16, u8)>> {
        let mut layer = vec![None; self.gfx.area()];
        for sprite in self.sprites.iter().rev().flatten() {
            let tile_px = self.gfx.tile_px.max(1);
            if let Some(i) = self.tile_index(sprite.px / tile_px, sprite.py / tile_px) {
                layer[i] = Some((sprite.tile, sprite.palette));
            }
        }
        layer
    }

    fn compose(&self) -> Paragraph<'static> {
        let sprites = self.sprite_layer();
        let width = self.gfx.tiles_w.max(0) as usize;

        let lines: Vec<Line<'static>> = (0..self.gfx.tiles_h.max(0) as usize)
            .map(|y| {
                let spans: Vec<Span<'static>> = (0..width)
                    .map(|x| {
                        let i = y * width + x;
                        match (sprites[i], self.tiles[i]) {
                            (Some((tile, palette)), _) => sprite_span(tile, palette),
                            (None, Some((tile, palette))) => tile_span(tile, palette),
                            (None, None) => {
                                Span::styled(". ", Style::default().fg(Color::DarkGray))
                            }
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn bell(&mut self) {
        if let Err(err) = execute!(self.terminal.backend_mut(), Print('\x07')) {
            self.fail(anyhow::Error::new(err).context("Failed to ring bell"));
        }
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn sprite_span(tile: u16, palette: u8) -> Span<'static> {
    let color = match palette {
        tiles::PAL_FOOD => Color::Red,
        tiles::PAL_HEAD => Color::Cyan,
        tiles::PAL_BODY => Color::Green,
        _ => Color::Yellow,
    };
    let text = match tile {
        tiles::SPRITE_HEAD => "■ ",
        tiles::SPRITE_BODY => "□ ",
        tiles::SPRITE_FOOD => "O ",
        _ => "? ",
    };
    Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn tile_span(tile: u16, palette: u8) -> Span<'static> {
    let color = match palette {
        tiles::PAL_PROMPT => Color::Yellow,
        tiles::PAL_ALERT => Color::Red,
        _ => Color::White,
    };
    let text = match tiles::glyph(tile) {
        Some(ch) => format!("{ch} "),
        None => logo_cell(tile),
    };
    Span::styled(text, Style::default().fg(color))
}

/// Two-column text for a logo tile; horizontal rules are doubled
fn logo_cell(tile: u16) -> String {
    let index = tile.wrapping_sub(tiles::LOGO_BASE) as i32;
    let (row, col) = (index / tiles::LOGO_COLS, index % tiles::LOGO_COLS);
    let ch = LOGO_ART
        .get(row as usize)
        .and_then(|line| line.chars().nth(col as usize))
        .unwrap_or(' ');
    match ch {
        '─' | '~' => format!("{ch}{ch}"),
        '╭' | '╰' => format!("{ch}─"),
        _ => format!("{ch} "),
    }
}

impl Video for TerminalPlatform {
    fn gfx_info(&self) -> GfxInfo {
        self.gfx
    }

    fn clear_bg(&mut self) {
        self.tiles.fill(None);
    }

    fn put_tile(&mut self, tx: i32, ty: i32, tile: u16, palette: u8) {
        if let Some(i) = self.tile_index(tx, ty) {
            self.tiles[i] = Some((tile, palette));
        }
    }

    fn sprite_set(&mut self, slot: usize, px: i32, py: i32, tile: u16, palette: u8) {
        if slot >= self.sprites.len() || !self.gfx.contains_px(px, py) {
            return;
        }
        self.sprites[slot] = Some(Sprite {
            px,
            py,
            tile,
            palette,
        });
    }

    fn sprite_hide(&mut self, slot: usize) {
        if let Some(sprite) = self.sprites.get_mut(slot) {
            *sprite = None;
        }
    }

    fn present(&mut self) {
        let screen = self.compose();
        if let Err(err) = self.terminal.draw(|frame| {
            frame.render_widget(screen, frame.area());
        }) {
            self.fail(anyhow::Error::new(err).context("Failed to draw frame"));
        }
    }
}

impl Input for TerminalPlatform {
    fn buttons(&mut self) -> Buttons {
        let mut pressed = Buttons::empty();

        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    self.fail(anyhow::Error::new(err).context("Failed to poll input"));
                    break;
                }
            }

            let event = match event::read() {
                Ok(event) => event,
                Err(err) => {
                    self.fail(anyhow::Error::new(err).context("Failed to read input"));
                    break;
                }
            };

            // Only process key press events, not release
            let Event::Key(key) = event else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Press(button) => pressed |= button,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        pressed
    }
}

impl Timing for TerminalPlatform {
    fn wait_frame(&mut self) {
        let now = Instant::now();
        if self.next_frame > now {
            std::thread::sleep(self.next_frame - now);
            self.next_frame += self.frame_duration;
        } else {
            // Running behind: drop the backlog instead of rushing frames
            self.next_frame = now + self.frame_duration;
        }
    }
}

impl Audio for TerminalPlatform {
    fn beep_ok(&mut self) {
        tracing::trace!("beep ok");
        self.bell();
    }

    fn beep_hit(&mut self) {
        tracing::trace!("beep hit");
        self.bell();
    }
}

impl Random for TerminalPlatform {
    fn seed_random(&mut self, seed: u32) {
        self.rng = StdRng::seed_from_u64(u64::from(seed));
    }

    fn random(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
