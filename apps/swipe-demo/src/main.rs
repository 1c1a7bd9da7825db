//! Headless swipe demo.
//!
//! Replays scripted gestures against two [`SwipeCard`]s and pumps the frame
//! clock at synthetic 16 ms frames: an abandoned drag that settles back, a
//! slow drag past the threshold that dismisses the first card, then a hard
//! fling that dismisses the second. Run with `RUST_LOG=debug` to watch the
//! gesture decisions.

use instant::Instant;

use swipedeck_core::FrameClock;
use swipedeck_foundation::{PointerDispatcher, PointerEvent};
use swipedeck_ui::{DismissDirection, SwipeCard, SwipeConfig};

const FRAME_NANOS: u64 = 16 * 1_000_000;
const CARD_WIDTH: f32 = 1080.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let started = Instant::now();
    let clock = FrameClock::new();
    let config = SwipeConfig::default().with_dismiss_direction(DismissDirection::Left);

    let top = SwipeCard::new(clock.clone(), config);
    top.set_width(CARD_WIDTH);
    let next = SwipeCard::new(clock.clone(), config);
    next.set_width(CARD_WIDTH);

    let _top_progress = top.progress().subscribe(|displacement: &f32| {
        log::debug!("top card progress: {displacement:+.1} px");
    });
    let _top_complete = top.complete().subscribe(|_| {
        log::info!("top card dismissed");
    });
    let _next_complete = next.complete().subscribe(|_| {
        log::info!("next card dismissed");
    });

    let mut dispatcher = PointerDispatcher::new();
    let mut now = 0u64;

    log::info!("gesture 1: drag 400 px left, then the system cancels the gesture");
    for event in abandoned_drag_trace(540.0, 0) {
        dispatcher.push(event);
    }
    pump(&clock, &mut dispatcher, &top, &mut now);
    report("after the abandoned drag, top card", &top);

    log::info!("gesture 2: slow drag 1300 px left, past the threshold");
    for event in drag_trace(900.0, -1300.0, 1_000) {
        dispatcher.push(event);
    }
    pump(&clock, &mut dispatcher, &top, &mut now);
    report("after the threshold drag, top card", &top);

    log::info!("gesture 3: fling the next card left");
    for event in fling_trace(900.0, 2_000) {
        dispatcher.push(event);
    }
    pump(&clock, &mut dispatcher, &next, &mut now);
    report("after the fling, next card", &next);

    log::info!("done in {:?}", started.elapsed());
}

fn report(label: &str, card: &SwipeCard) {
    let transform = card.transform();
    log::info!(
        "{label}: offset {:+.1}, overlay {:.2}, triggered {}",
        transform.offset_x,
        transform.overlay_alpha,
        card.is_triggered()
    );
}

/// A slow drag by `displacement` px, sampled every 50 ms so the release
/// carries no velocity.
fn drag_trace(start_x: f32, displacement: f32, start_ms: i64) -> Vec<PointerEvent> {
    let dir = displacement.signum();
    let end_x = start_x + 20.0 * dir + displacement;
    vec![
        PointerEvent::down(start_x, 960.0, start_ms),
        PointerEvent::moved(start_x + 20.0 * dir, 960.0, start_ms + 50),
        PointerEvent::moved(
            start_x + 20.0 * dir + displacement / 2.0,
            960.0,
            start_ms + 100,
        ),
        PointerEvent::moved(end_x, 960.0, start_ms + 150),
        PointerEvent::up(end_x, 960.0, start_ms + 200),
    ]
}

/// A drag that gets cancelled mid-gesture, e.g. by a parent claiming the
/// pointer stream.
fn abandoned_drag_trace(start_x: f32, start_ms: i64) -> Vec<PointerEvent> {
    vec![
        PointerEvent::down(start_x, 960.0, start_ms),
        PointerEvent::moved(start_x - 20.0, 960.0, start_ms + 50),
        PointerEvent::moved(start_x - 420.0, 960.0, start_ms + 100),
        PointerEvent::cancel(start_ms + 150),
    ]
}

/// A fast leftward swipe, about 10k px/s at release.
fn fling_trace(start_x: f32, start_ms: i64) -> Vec<PointerEvent> {
    let mut trace = vec![
        PointerEvent::down(start_x, 960.0, start_ms),
        PointerEvent::moved(start_x - 20.0, 960.0, start_ms + 8),
    ];
    for i in 1..=5i64 {
        trace.push(PointerEvent::moved(
            start_x - 20.0 - 80.0 * i as f32,
            960.0,
            start_ms + 8 + 8 * i,
        ));
    }
    trace.push(PointerEvent::up(start_x - 500.0, 960.0, start_ms + 56));
    trace
}

/// Delivers the queued events to `card`, then runs synthetic frames until
/// nothing is left to animate. Frame times stay monotonic across gestures.
fn pump(clock: &FrameClock, dispatcher: &mut PointerDispatcher, card: &SwipeCard, now: &mut u64) {
    dispatcher.drain(|event| card.on_pointer_event(event));

    while clock.has_pending() {
        clock.drain(*now);
        *now += FRAME_NANOS;
    }
}
