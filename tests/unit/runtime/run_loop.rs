use super::*;
use crate::{
    compose::vars::VariableStore,
    foundation::core::Size,
    render::headless::HeadlessBackend,
    runtime::{
        input::{NoInput, ScriptedInput},
        watch::ScriptedProbe,
    },
};

fn fast(max_frames: Option<u64>) -> LoopOptions {
    LoopOptions {
        frame_delay: Duration::ZERO,
        max_frames,
    }
}

fn composer() -> Composer<HeadlessBackend> {
    Composer::with_vars(
        HeadlessBackend::new(Size::new(320, 240)),
        VariableStore::isolated(),
    )
}

fn with_options(ids: &[&str]) -> Composer<HeadlessBackend> {
    let mut c = composer();
    for id in ids {
        c.add_option(id, "", &[]);
    }
    c.carousel_mut().select_after_last_inserted();
    c
}

fn press(b: Button) -> InputEvent {
    InputEvent::Press(b)
}

#[test]
fn frame_limit_stops_and_redraws_every_frame() {
    let mut c = composer();
    let exit = run(&mut c, &mut NoInput, None, &fast(Some(4))).unwrap();
    assert_eq!(exit, LoopExit::FrameLimit);
    assert_eq!(c.backend().frames_presented(), 4);
}

#[test]
fn quiet_draws_once() {
    let mut c = composer();
    c.dispatch("quiet", "y");
    run(&mut c, &mut NoInput, None, &fast(Some(5))).unwrap();
    assert_eq!(c.backend().frames_presented(), 1);
}

#[test]
fn quit_directive_stops_after_first_frame() {
    let mut c = composer();
    c.dispatch("quit", "y");
    let exit = run(&mut c, &mut NoInput, None, &fast(None)).unwrap();
    assert_eq!(exit, LoopExit::QuitDirective);
    assert_eq!(c.backend().frames_presented(), 1);
}

#[test]
fn quit_event_stops_before_drawing() {
    let mut c = composer();
    let mut input = ScriptedInput::new([vec![InputEvent::Quit]]);
    assert_eq!(run(&mut c, &mut input, None, &fast(None)).unwrap(), LoopExit::Quit);
    assert_eq!(c.backend().frames_presented(), 0);
}

#[test]
fn navigation_wraps_and_accept_reports_the_id() {
    let mut c = with_options(&["a", "b", "c"]);
    let mut input = ScriptedInput::new([
        vec![press(Button::Up)],
        vec![press(Button::Down), press(Button::Right)],
        vec![InputEvent::Release(Button::Right), press(Button::Accept)],
    ]);
    let exit = run(&mut c, &mut input, None, &fast(None)).unwrap();
    assert_eq!(exit, LoopExit::Accepted("b".to_owned()));
}

#[test]
fn back_quits_in_selection_mode() {
    let mut c = with_options(&["a"]);
    let mut input = ScriptedInput::new([vec![press(Button::Back)]]);
    assert_eq!(run(&mut c, &mut input, None, &fast(None)).unwrap(), LoopExit::Quit);
}

#[test]
fn buttons_do_nothing_without_options() {
    let mut c = composer();
    let mut input = ScriptedInput::new([vec![press(Button::Accept), press(Button::Back)]]);
    let exit = run(&mut c, &mut input, None, &fast(Some(2))).unwrap();
    assert_eq!(exit, LoopExit::FrameLimit);
}

#[test]
fn wait_quit_ends_on_release() {
    let mut c = composer();
    c.dispatch("wait_quit", "y");
    let mut input = ScriptedInput::new([
        vec![press(Button::Other)],
        vec![InputEvent::Release(Button::Other)],
    ]);
    assert_eq!(run(&mut c, &mut input, None, &fast(None)).unwrap(), LoopExit::Quit);
    assert_eq!(c.backend().frames_presented(), 1);
}

#[test]
fn keypress_quit_needs_more_than_thirty_presses() {
    let mut c = composer();
    c.dispatch("keypress_quit", "y");
    let mut input = ScriptedInput::new([
        vec![press(Button::Other); 30],
        vec![press(Button::Other)],
    ]);
    let exit = run(&mut c, &mut input, None, &fast(Some(10))).unwrap();
    assert_eq!(exit, LoopExit::KeypressLimit);
    assert_eq!(c.backend().frames_presented(), 1);
}

#[test]
fn quiet_mode_still_redraws_on_selection_change() {
    let mut c = with_options(&["a", "b"]);
    c.dispatch("quiet", "y");
    let mut input = ScriptedInput::new([vec![], vec![press(Button::Down)], vec![]]);
    run(&mut c, &mut input, None, &fast(Some(3))).unwrap();
    assert_eq!(c.backend().frames_presented(), 2);
}

#[test]
fn process_probe_ends_the_loop() {
    let mut c = composer();
    let mut probe = ScriptedProbe::new([false, false, true]);
    let exit = run(&mut c, &mut NoInput, Some(&mut probe), &fast(None)).unwrap();
    assert_eq!(exit, LoopExit::ProcessAppeared);
    assert_eq!(probe.calls(), 3);
}
