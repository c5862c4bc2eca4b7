//! The poll, redraw, sleep loop.

use std::time::Duration;

use crate::{
    compose::composer::Composer,
    foundation::error::ShowResult,
    render::backend::DrawableBackend,
    runtime::{
        input::{Button, InputEvent, InputSource},
        watch::ProcessProbe,
    },
};

/// Delay between iterations.
pub const FRAME_DELAY: Duration = Duration::from_millis(100);

/// With `keypress_quit`, the loop ends once presses exceed this count.
pub const KEYPRESS_QUIT_LIMIT: u32 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopOptions {
    pub frame_delay: Duration,
    /// Stop after this many iterations.
    pub max_frames: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            frame_delay: FRAME_DELAY,
            max_frames: None,
        }
    }
}

/// Why the loop ended.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "exit", content = "id", rename_all = "snake_case")]
pub enum LoopExit {
    /// Quit event, back button, or a release under `wait_quit`.
    Quit,
    /// The accept button was pressed on this option.
    Accepted(String),
    KeypressLimit,
    /// The `quit` directive was set.
    QuitDirective,
    ProcessAppeared,
    FrameLimit,
}

/// Run until something ends the loop.
///
/// Each iteration drains `input`, redraws when the selection changed or quiet mode has not
/// latched yet, sleeps, then checks the `quit` directive, the process probe and the frame
/// limit in that order.
pub fn run<B: DrawableBackend>(
    composer: &mut Composer<B>,
    input: &mut dyn InputSource,
    mut probe: Option<&mut dyn ProcessProbe>,
    opts: &LoopOptions,
) -> ShowResult<LoopExit> {
    let selection_mode = !composer.carousel().is_empty();
    let mut events = Vec::new();
    let mut presses = 0u32;
    let mut done_render = false;
    let mut frames = 0u64;

    loop {
        events.clear();
        input.poll(&mut events);

        let mut selection_changed = false;
        for event in events.drain(..) {
            let flags = composer.flags();
            match event {
                InputEvent::Quit => return Ok(LoopExit::Quit),
                InputEvent::Release(_) if flags.wait_quit => return Ok(LoopExit::Quit),
                InputEvent::Release(_) => {}
                InputEvent::Press(button) => {
                    presses += 1;
                    if flags.keypress_quit && presses > KEYPRESS_QUIT_LIMIT {
                        return Ok(LoopExit::KeypressLimit);
                    }
                    if !selection_mode {
                        continue;
                    }
                    let carousel = composer.carousel_mut();
                    match button {
                        Button::Up | Button::Left => {
                            carousel.select_previous();
                            selection_changed = true;
                        }
                        Button::Down | Button::Right => {
                            carousel.select_next();
                            selection_changed = true;
                        }
                        Button::Accept => {
                            let id = carousel.selected_id().unwrap_or_default().to_owned();
                            tracing::info!(id = %id, "option accepted");
                            return Ok(LoopExit::Accepted(id));
                        }
                        Button::Back => return Ok(LoopExit::Quit),
                        Button::Other => {}
                    }
                }
            }
        }

        if !done_render || selection_changed {
            composer.draw_frame()?;
            done_render = composer.flags().quiet;
        }

        if !opts.frame_delay.is_zero() {
            std::thread::sleep(opts.frame_delay);
        }
        frames += 1;

        if composer.flags().quit {
            return Ok(LoopExit::QuitDirective);
        }
        if let Some(p) = probe.as_deref_mut()
            && p.is_running()
        {
            tracing::info!("watched process is running");
            return Ok(LoopExit::ProcessAppeared);
        }
        if opts.max_frames.is_some_and(|max| frames >= max) {
            return Ok(LoopExit::FrameLimit);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/run_loop.rs"]
mod tests;
