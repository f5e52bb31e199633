use super::*;

use pointfocus_core::Ticker;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn pump_until_done(handle: &pointfocus_core::TickerHandle, done: &Rc<Cell<bool>>, max_frames: u32) -> u32 {
    let mut frames = 0;
    while !done.get() && frames < max_frames {
        handle.drain_frame_callbacks(u64::from(frames) * 16_000_000);
        frames += 1;
    }
    frames
}

#[test]
fn glide_decays_monotonically_and_settles() {
    let ticker = Ticker::new();
    let handle = ticker.handle();
    let glide = Glide::new(handle.frame_clock());

    let emitted = Rc::new(RefCell::new(Vec::new()));
    let done = Rc::new(Cell::new(false));
    let emitted_in_cb = Rc::clone(&emitted);
    let done_in_cb = Rc::clone(&done);

    glide.start(
        Offset::ZERO,
        Velocity::new(-600.0, 0.0),
        ClampWindow::new(-200.0, 0.0, 0.0, 0.0),
        GlideSpec::default(),
        move |offset| emitted_in_cb.borrow_mut().push(offset),
        move || done_in_cb.set(true),
    );

    let frames = pump_until_done(&handle, &done, 200);

    assert!(done.get(), "glide should settle within a bounded step count");
    assert!(frames < 200);
    assert!(!glide.is_running());

    let emitted = emitted.borrow();
    assert!(emitted.len() > 10);

    // The offset only ever moves leftward, and per-step travel (the
    // decayed velocity over one frame) shrinks every step.
    for pair in emitted.windows(2) {
        assert!(pair[1].left < pair[0].left);
    }
    let steps: Vec<f32> = emitted.windows(2).map(|p| p[0].left - p[1].left).collect();
    for pair in steps.windows(2) {
        assert!(pair[1] <= pair[0]);
    }

    for offset in emitted.iter() {
        assert!(offset.left >= -200.0 && offset.left <= 0.0);
        assert_eq!(offset.top, 0.0);
    }
}

#[test]
fn glide_stops_at_the_window_edge() {
    let ticker = Ticker::new();
    let handle = ticker.handle();
    let glide = Glide::new(handle.frame_clock());

    let emitted = Rc::new(RefCell::new(Vec::new()));
    let done = Rc::new(Cell::new(false));
    let emitted_in_cb = Rc::clone(&emitted);
    let done_in_cb = Rc::clone(&done);

    glide.start(
        Offset::ZERO,
        Velocity::new(-6_000.0, 0.0),
        ClampWindow::new(-50.0, 0.0, 0.0, 0.0),
        GlideSpec::default(),
        move |offset| emitted_in_cb.borrow_mut().push(offset),
        move || done_in_cb.set(true),
    );

    pump_until_done(&handle, &done, 50);

    assert!(done.get());
    let emitted = emitted.borrow();
    for offset in emitted.iter() {
        assert!(offset.left >= -50.0);
    }
    assert_eq!(emitted.last().copied(), Some(Offset::new(-50.0, 0.0)));
}

#[test]
fn below_threshold_release_completes_immediately() {
    let ticker = Ticker::new();
    let handle = ticker.handle();
    let glide = Glide::new(handle.frame_clock());

    let emitted = Rc::new(RefCell::new(Vec::new()));
    let done = Rc::new(Cell::new(false));
    let emitted_in_cb = Rc::clone(&emitted);
    let done_in_cb = Rc::clone(&done);

    glide.start(
        Offset::new(12.0, -10.0),
        Velocity::new(5.0, -5.0),
        ClampWindow::new(-200.0, 0.0, -50.0, 0.0),
        GlideSpec::default(),
        move |offset| emitted_in_cb.borrow_mut().push(offset),
        move || done_in_cb.set(true),
    );

    // No frame pump: the final clamp-and-emit happens synchronously.
    assert!(done.get());
    assert!(!glide.is_running());
    assert_eq!(emitted.borrow().as_slice(), &[Offset::new(0.0, -10.0)]);
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn cancel_prevents_any_further_emission() {
    let ticker = Ticker::new();
    let handle = ticker.handle();
    let glide = Glide::new(handle.frame_clock());

    let count = Rc::new(Cell::new(0u32));
    let done = Rc::new(Cell::new(false));
    let count_in_cb = Rc::clone(&count);
    let done_in_cb = Rc::clone(&done);

    glide.start(
        Offset::ZERO,
        Velocity::new(-600.0, 0.0),
        ClampWindow::new(-200.0, 0.0, 0.0, 0.0),
        GlideSpec::default(),
        move |_| count_in_cb.set(count_in_cb.get() + 1),
        move || done_in_cb.set(true),
    );

    handle.drain_frame_callbacks(0);
    assert_eq!(count.get(), 1);

    glide.cancel();
    handle.drain_frame_callbacks(16_000_000);
    handle.drain_frame_callbacks(32_000_000);

    assert_eq!(count.get(), 1);
    assert!(!done.get());
    assert!(!glide.is_running());
}

#[test]
fn restart_supersedes_the_previous_glide() {
    let ticker = Ticker::new();
    let handle = ticker.handle();
    let glide = Glide::new(handle.frame_clock());

    let first_done = Rc::new(Cell::new(false));
    let first_done_in_cb = Rc::clone(&first_done);
    glide.start(
        Offset::ZERO,
        Velocity::new(-600.0, 0.0),
        ClampWindow::new(-200.0, 0.0, 0.0, 0.0),
        GlideSpec::default(),
        |_| {},
        move || first_done_in_cb.set(true),
    );
    handle.drain_frame_callbacks(0);

    let last = Rc::new(RefCell::new(None));
    let second_done = Rc::new(Cell::new(false));
    let last_in_cb = Rc::clone(&last);
    let second_done_in_cb = Rc::clone(&second_done);
    glide.start(
        Offset::ZERO,
        Velocity::new(0.0, -600.0),
        ClampWindow::new(0.0, 0.0, -100.0, 0.0),
        GlideSpec::default(),
        move |offset| *last_in_cb.borrow_mut() = Some(offset),
        move || second_done_in_cb.set(true),
    );

    let mut frame = 1u64;
    while !second_done.get() && frame < 200 {
        handle.drain_frame_callbacks(frame * 16_000_000);
        frame += 1;
    }

    assert!(!first_done.get());
    assert!(second_done.get());
    let last = last.borrow().unwrap();
    assert_eq!(last.left, 0.0);
    assert!(last.top < 0.0);
}

#[test]
fn out_of_range_friction_falls_back_to_default() {
    let spec = GlideSpec {
        friction: 1.5,
        min_velocity: -3.0,
    }
    .sanitized();

    assert_eq!(spec.friction, GlideSpec::default().friction);
    assert_eq!(spec.min_velocity, 0.0);
}
