//! Headless backend that records what the engine asks of it
//!
//! Draw calls for the frame being built collect in a pending list and move to
//! the committed frame on [`Video::present`]. Calls with out-of-range
//! coordinates or slots are dropped, as the contract requires, and counted.

use rand::{RngCore, SeedableRng, rngs::StdRng};
use std::collections::VecDeque;

use super::{Audio, Buttons, GfxInfo, Input, Random, Timing, Video};

/// One accepted drawing primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    ClearBg,
    Tile {
        tx: i32,
        ty: i32,
        tile: u16,
        palette: u8,
    },
    Sprite {
        slot: usize,
        px: i32,
        py: i32,
        tile: u16,
        palette: u8,
    },
    HideSprite {
        slot: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Ok,
    Hit,
}

pub struct RecordingPlatform {
    gfx: GfxInfo,
    sprite_slots: usize,
    pending: Vec<DrawCall>,
    frame: Vec<DrawCall>,
    presented: u64,
    ignored: u64,
    sounds: Vec<Sound>,
    script: VecDeque<Buttons>,
    frames_waited: u64,
    rng: StdRng,
}

impl RecordingPlatform {
    /// Backend with enough sprite slots for a snake filling the grid, plus food
    pub fn new(gfx: GfxInfo) -> Self {
        Self::with_sprite_slots(gfx, gfx.area() + 1)
    }

    pub fn with_sprite_slots(gfx: GfxInfo, sprite_slots: usize) -> Self {
        Self {
            gfx,
            sprite_slots,
            pending: Vec::new(),
            frame: Vec::new(),
            presented: 0,
            ignored: 0,
            sounds: Vec::new(),
            script: VecDeque::new(),
            frames_waited: 0,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Queue button masks returned by successive [`Input::buttons`] calls
    ///
    /// Once the queue runs dry no buttons are reported.
    pub fn script<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = Buttons>,
    {
        self.script.extend(inputs);
    }

    /// Draw calls of the last presented frame
    pub fn frame(&self) -> &[DrawCall] {
        &self.frame
    }

    /// Draw calls issued since the last present
    pub fn pending(&self) -> &[DrawCall] {
        &self.pending
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Out-of-range calls that were dropped
    pub fn ignored(&self) -> u64 {
        self.ignored
    }

    pub fn sounds(&self) -> &[Sound] {
        &self.sounds
    }

    pub fn frames_waited(&self) -> u64 {
        self.frames_waited
    }

    /// Background tiles of the last frame as `(x, y, tile)`
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32, u16)> + '_ {
        self.frame.iter().filter_map(|call| match *call {
            DrawCall::Tile { tx, ty, tile, .. } => Some((tx, ty, tile)),
            _ => None,
        })
    }

    /// Tile painted at `(tx, ty)` in the last frame, if any
    pub fn tile_at(&self, tx: i32, ty: i32) -> Option<u16> {
        self.tiles()
            .filter(|&(x, y, _)| x == tx && y == ty)
            .map(|(_, _, tile)| tile)
            .last()
    }

    /// Final sprite call for `slot` in the last frame
    pub fn sprite(&self, slot: usize) -> Option<DrawCall> {
        self.frame
            .iter()
            .rev()
            .find(|call| match call {
                DrawCall::Sprite { slot: s, .. } | DrawCall::HideSprite { slot: s } => *s == slot,
                _ => false,
            })
            .copied()
    }

    fn record(&mut self, call: DrawCall) {
        self.pending.push(call);
    }
}

impl Video for RecordingPlatform {
    fn gfx_info(&self) -> GfxInfo {
        self.gfx
    }

    fn clear_bg(&mut self) {
        self.record(DrawCall::ClearBg);
    }

    fn put_tile(&mut self, tx: i32, ty: i32, tile: u16, palette: u8) {
        if tx < 0 || tx >= self.gfx.tiles_w || ty < 0 || ty >= self.gfx.tiles_h {
            self.ignored += 1;
            return;
        }
        self.record(DrawCall::Tile {
            tx,
            ty,
            tile,
            palette,
        });
    }

    fn sprite_set(&mut self, slot: usize, px: i32, py: i32, tile: u16, palette: u8) {
        if slot >= self.sprite_slots || !self.gfx.contains_px(px, py) {
            self.ignored += 1;
            return;
        }
        self.record(DrawCall::Sprite {
            slot,
            px,
            py,
            tile,
            palette,
        });
    }

    fn sprite_hide(&mut self, slot: usize) {
        if slot >= self.sprite_slots {
            self.ignored += 1;
            return;
        }
        self.record(DrawCall::HideSprite { slot });
    }

    fn present(&mut self) {
        self.frame = std::mem::take(&mut self.pending);
        self.presented += 1;
    }
}

impl Input for RecordingPlatform {
    fn buttons(&mut self) -> Buttons {
        self.script.pop_front().unwrap_or_default()
    }
}

impl Timing for RecordingPlatform {
    fn wait_frame(&mut self) {
        self.frames_waited += 1;
    }
}

impl Audio for RecordingPlatform {
    fn beep_ok(&mut self) {
        self.sounds.push(Sound::Ok);
    }

    fn beep_hit(&mut self) {
        self.sounds.push(Sound::Hit);
    }
}

impl Random for RecordingPlatform {
    fn seed_random(&mut self, seed: u32) {
        self.rng = StdRng::seed_from_u64(u64::from(seed));
    }

    fn random(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
