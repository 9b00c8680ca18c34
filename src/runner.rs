//! The outer frame loop shared by every backend

use crate::game::{Game, StepInfo};
use crate::platform::{Buttons, Platform};
use crate::render::Renderer;

/// Seed handed to the platform random source at startup
pub const DEFAULT_SEED: u32 = 0x1234_5678;

/// One frame: wait for the frame boundary, sample input, update, render
pub fn run_frame<P: Platform + ?Sized>(
    platform: &mut P,
    game: &mut Game,
    renderer: &Renderer,
) -> StepInfo {
    platform.wait_frame();
    let buttons = platform.buttons();
    frame_with(platform, game, renderer, buttons)
}

/// Update and render with an externally chosen button mask
///
/// Lets a caller such as the autopilot stand in for the device's own input.
pub fn frame_with<P: Platform + ?Sized>(
    platform: &mut P,
    game: &mut Game,
    renderer: &Renderer,
    buttons: Buttons,
) -> StepInfo {
    let info = game.update(buttons, platform);
    renderer.render(game, platform);
    info
}
