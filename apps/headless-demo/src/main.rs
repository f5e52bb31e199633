//! Feeds a scripted zoom → drag → fling gesture through the engine and
//! logs every offset it produces. No window, no image: the "host" here is
//! a fixed 200x100 viewport over a 400x150 image.

use std::cell::RefCell;
use std::rc::Rc;

use pointfocus_core::Ticker;
use pointfocus_foundation::{MoveMode, PointerSample, ZoomConfig, ZoomGesture, ZoomHost};
use pointfocus_graphics::{Bounds, Offset, Point, Size, Velocity};
use web_time::Instant;

struct LoggingHost {
    settled: bool,
}

impl ZoomHost for LoggingHost {
    fn viewport_bounds(&self) -> Option<Bounds> {
        Some(Bounds::new(200.0, 100.0, 0.0, 0.0))
    }

    fn scroll_position(&self) -> Point {
        Point::ZERO
    }

    fn offset_changed(&mut self, offset: Offset) {
        log::info!("offset: ({:.2}, {:.2})", offset.left, offset.top);
    }

    fn drag_released(&mut self, velocity: Velocity, position: Offset) {
        log::info!(
            "released at ({:.2}, {:.2}) with velocity ({:.0}, {:.0}) px/s",
            position.left,
            position.top,
            velocity.vx,
            velocity.vy
        );
    }

    fn inertia_settled(&mut self) {
        log::info!("inertia settled");
        self.settled = true;
    }

    fn zoomed_in(&mut self) {
        log::info!("zoomed in");
    }

    fn close_finalized(&mut self) {
        log::info!("session closed");
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let started = Instant::now();

    let ticker = Ticker::new();
    let handle = ticker.handle();
    let host = Rc::new(RefCell::new(LoggingHost { settled: false }));

    let config = ZoomConfig {
        move_mode: MoveMode::Drag,
        fade_duration_ms: 0,
        ..ZoomConfig::default()
    };
    let gesture = ZoomGesture::new(handle.frame_clock(), config, Rc::clone(&host));

    // Tap before the image is ready: the zoom is deferred and replayed.
    gesture.zoom_requested(100.0, 50.0);
    gesture.image_loaded(Size::new(400.0, 150.0));

    // Drag left across the image, building up release velocity.
    gesture.drag_started(PointerSample::new(160.0, 50.0, 0));
    let mut time_ms = 0i64;
    for step in 1..=6i64 {
        time_ms = step * 16;
        let x = 160.0 - step as f32 * 12.0;
        gesture.drag_moved(PointerSample::new(x, 50.0, time_ms));
    }
    gesture.drag_ended(PointerSample::new(88.0, 50.0, time_ms));

    // Pump display frames until the fling comes to rest.
    let mut frame = 0u64;
    while !host.borrow().settled && frame < 300 {
        frame += 1;
        handle.drain_frame_callbacks(frame * 16_000_000);
    }

    gesture.clicked(88.0, 50.0); // suppressed: it trails the drag
    gesture.clicked(88.0, 50.0); // closes the session

    log::info!(
        "simulated {} glide frames in {:?}",
        frame,
        started.elapsed()
    );
}
