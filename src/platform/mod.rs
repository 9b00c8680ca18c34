//! Platform capability contract
//!
//! Everything the engine needs from a device is expressed through the small
//! traits in this module. A backend implements each capability once for its
//! target; the engine and the presentation driver stay generic over them.
//!
//! Every coordinate-taking operation must silently ignore out-of-range tile
//! coordinates, pixel coordinates and sprite slots. The presentation driver
//! relies on that when it paints near the grid edges.

pub mod recording;
pub mod terminal;
pub mod tiles;

use bitflags::bitflags;

use crate::game::Position;

pub use recording::{DrawCall, RecordingPlatform, Sound};
pub use terminal::TerminalPlatform;

bitflags! {
    /// Button state sampled once per frame
    ///
    /// Each logical button has its own bit; any combination may be set in a
    /// single sample.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const START = 1 << 6;
        const SELECT = 1 << 7;
    }
}

/// Screen geometry of a device, in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GfxInfo {
    /// Grid width in tiles
    pub tiles_w: i32,
    /// Grid height in tiles
    pub tiles_h: i32,
    /// Edge length of one tile in pixels
    pub tile_px: i32,
}

impl GfxInfo {
    pub const fn new(tiles_w: i32, tiles_h: i32, tile_px: i32) -> Self {
        Self {
            tiles_w,
            tiles_h,
            tile_px,
        }
    }

    /// Game Boy Advance: 240x160 pixels
    pub const fn gba() -> Self {
        Self::new(30, 20, 8)
    }

    /// Nintendo DS (one screen): 256x192 pixels
    pub const fn nds() -> Self {
        Self::new(32, 24, 8)
    }

    /// Number of tiles on the grid
    pub fn area(&self) -> usize {
        (self.tiles_w.max(0) as usize) * (self.tiles_h.max(0) as usize)
    }

    /// Screen width in pixels
    pub fn width_px(&self) -> i32 {
        self.tiles_w * self.tile_px
    }

    /// Screen height in pixels
    pub fn height_px(&self) -> i32 {
        self.tiles_h * self.tile_px
    }

    /// Whether a tile coordinate lies on the grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.tiles_w && pos.y >= 0 && pos.y < self.tiles_h
    }

    /// Whether a pixel coordinate lies on the screen
    pub fn contains_px(&self, px: i32, py: i32) -> bool {
        px >= 0 && px < self.width_px() && py >= 0 && py < self.height_px()
    }

    /// Top-left pixel of a tile
    pub fn to_px(&self, pos: Position) -> (i32, i32) {
        (pos.x * self.tile_px, pos.y * self.tile_px)
    }
}

/// Background tiles, sprites and frame commit
pub trait Video {
    /// Device geometry. Queried once by the engine and cached.
    fn gfx_info(&self) -> GfxInfo;

    /// Clear the background tile layer. Sprites are left untouched.
    fn clear_bg(&mut self);

    /// Paint one background tile at a tile coordinate
    fn put_tile(&mut self, tx: i32, ty: i32, tile: u16, palette: u8);

    /// Place sprite `slot` at a pixel coordinate
    fn sprite_set(&mut self, slot: usize, px: i32, py: i32, tile: u16, palette: u8);

    /// Hide sprite `slot`
    fn sprite_hide(&mut self, slot: usize);

    /// Commit the frame that was just drawn
    fn present(&mut self);
}

/// Button sampling
pub trait Input {
    fn buttons(&mut self) -> Buttons;
}

/// Frame pacing
pub trait Timing {
    /// Block until the start of the next frame
    fn wait_frame(&mut self);
}

/// The two sound cues the game triggers
pub trait Audio {
    /// Food eaten
    fn beep_ok(&mut self);

    /// Snake hit itself
    fn beep_hit(&mut self);
}

/// Seedable random source
pub trait Random {
    fn seed_random(&mut self, seed: u32);

    fn random(&mut self) -> u32;
}

/// A complete device backend
pub trait Platform: Video + Input + Timing + Audio + Random {}

impl<T> Platform for T where T: Video + Input + Timing + Audio + Random {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_bits() {
        assert_eq!(Buttons::UP.bits(), 0x01);
        assert_eq!(Buttons::START.bits(), 0x40);
        assert_eq!(Buttons::SELECT.bits(), 0x80);

        let mask = Buttons::UP | Buttons::LEFT | Buttons::START;
        assert!(mask.contains(Buttons::LEFT));
        assert!(!mask.contains(Buttons::DOWN));
        assert_eq!(Buttons::from_bits_truncate(0x45), mask);
    }

    #[test]
    fn test_gfx_bounds() {
        let gfx = GfxInfo::gba();
        assert_eq!(gfx.area(), 600);
        assert_eq!((gfx.width_px(), gfx.height_px()), (240, 160));

        assert!(gfx.contains(Position::new(0, 0)));
        assert!(gfx.contains(Position::new(29, 19)));
        assert!(!gfx.contains(Position::new(30, 0)));
        assert!(!gfx.contains(Position::new(0, -1)));

        assert!(gfx.contains_px(239, 159));
        assert!(!gfx.contains_px(240, 0));
        assert_eq!(gfx.to_px(Position::new(3, 2)), (24, 16));
    }
}
