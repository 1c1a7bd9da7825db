use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipedeck_core::Subscription;

use super::*;

const FRAME_NANOS: u64 = 16 * 1_000_000;

fn test_card(direction: DismissDirection) -> (SwipeCard, FrameClock) {
    let clock = FrameClock::new();
    let card = SwipeCard::new(
        clock.clone(),
        SwipeConfig::default().with_dismiss_direction(direction),
    );
    card.set_width(1000.0);
    (card, clock)
}

fn completion_counter(card: &SwipeCard) -> (Rc<Cell<u32>>, Subscription<()>) {
    let count = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&count);
    let sub = card
        .complete()
        .subscribe(move |_| counter.set(counter.get() + 1));
    (count, sub)
}

/// Drags by `displacement` px with 50 ms sample spacing, so the tracked
/// release velocity is zero and only the threshold decides the outcome.
fn slow_swipe(card: &SwipeCard, displacement: f32) {
    let dir = displacement.signum();
    card.on_pointer_event(PointerEvent::down(0.0, 0.0, 0));
    // First move past the slop arms the anchor without producing displacement.
    card.on_pointer_event(PointerEvent::moved(20.0 * dir, 0.0, 50));
    card.on_pointer_event(PointerEvent::moved(20.0 * dir + displacement, 0.0, 100));
    card.on_pointer_event(PointerEvent::up(20.0 * dir + displacement, 0.0, 150));
}

/// Drags 80 px per 8 ms sample, which tracks at roughly 10k px/s, and
/// releases at `400 * dir` px of displacement.
fn fling_swipe(card: &SwipeCard, dir: f32) {
    card.on_pointer_event(PointerEvent::down(800.0, 0.0, 0));
    let anchor = 800.0 + 20.0 * dir;
    card.on_pointer_event(PointerEvent::moved(anchor, 0.0, 8));
    for i in 1..=4i64 {
        card.on_pointer_event(PointerEvent::moved(
            anchor + 80.0 * i as f32 * dir,
            0.0,
            8 + 8 * i,
        ));
    }
    card.on_pointer_event(PointerEvent::up(anchor + 400.0 * dir, 0.0, 48));
}

/// Pumps frames at 16 ms until nothing is scheduled; returns the last frame
/// time that was delivered.
fn drive_to_idle(clock: &FrameClock) -> u64 {
    let mut now = 0u64;
    let mut frames = 0;
    while clock.has_pending() {
        clock.drain(now);
        now += FRAME_NANOS;
        frames += 1;
        assert!(frames < 10_000, "animation never reached idle");
    }
    now
}

#[test]
fn sub_threshold_release_settles_back_to_rest() {
    let (card, clock) = test_card(DismissDirection::Left);
    let (completions, _sub) = completion_counter(&card);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _progress = card.progress().subscribe(move |v: &f32| sink.borrow_mut().push(*v));

    slow_swipe(&card, -500.0);
    assert_eq!(card.displacement(), -500.0);
    assert!(card.is_animating());

    drive_to_idle(&clock);

    assert_eq!(card.displacement(), 0.0);
    assert!(!card.is_animating());
    assert!(!card.is_triggered());
    assert_eq!(completions.get(), 0);

    let seen = seen.borrow();
    assert!(seen.len() > 2, "expected drag and animation ticks");
    assert_eq!(*seen.last().unwrap(), 0.0);
}

#[test]
fn past_threshold_release_dismisses() {
    let (card, clock) = test_card(DismissDirection::Left);
    let (completions, _sub) = completion_counter(&card);

    // Threshold is 0.9 * (1000 + 300) = 1170 px of travel toward the edge.
    slow_swipe(&card, -1200.0);
    drive_to_idle(&clock);

    assert_eq!(card.displacement(), -2000.0);
    assert!(card.is_triggered());
    assert_eq!(completions.get(), 1);
}

#[test]
fn dismissal_is_terminal() {
    let (card, clock) = test_card(DismissDirection::Left);
    let (completions, _sub) = completion_counter(&card);

    slow_swipe(&card, -1200.0);
    drive_to_idle(&clock);
    assert!(card.is_triggered());

    // Further input is ignored and no second completion is emitted.
    slow_swipe(&card, -1200.0);
    drive_to_idle(&clock);

    assert_eq!(card.displacement(), -2000.0);
    assert_eq!(completions.get(), 1);
}

#[test]
fn right_direction_dismisses_on_positive_drag() {
    let (card, clock) = test_card(DismissDirection::Right);
    let (completions, _sub) = completion_counter(&card);

    slow_swipe(&card, 1200.0);
    drive_to_idle(&clock);

    assert_eq!(card.displacement(), 2000.0);
    assert!(card.is_triggered());
    assert_eq!(completions.get(), 1);
}

#[test]
fn either_direction_dismisses_toward_whichever_edge() {
    for displacement in [-1200.0f32, 1200.0] {
        let (card, clock) = test_card(DismissDirection::Either);
        slow_swipe(&card, displacement);
        drive_to_idle(&clock);

        assert_eq!(card.displacement(), displacement.signum() * 2000.0);
        assert!(card.is_triggered());
    }
}

#[test]
fn drag_away_from_dismiss_edge_settles() {
    let (card, clock) = test_card(DismissDirection::Left);
    let (completions, _sub) = completion_counter(&card);

    // Far past the threshold distance, but on the wrong side.
    slow_swipe(&card, 1200.0);
    drive_to_idle(&clock);

    assert_eq!(card.displacement(), 0.0);
    assert!(!card.is_triggered());
    assert_eq!(completions.get(), 0);
}

#[test]
fn tap_is_inert() {
    let (card, clock) = test_card(DismissDirection::Left);

    card.on_pointer_event(PointerEvent::down(100.0, 0.0, 0));
    card.on_pointer_event(PointerEvent::moved(104.0, 0.0, 20));
    card.on_pointer_event(PointerEvent::up(104.0, 0.0, 40));

    assert_eq!(card.displacement(), 0.0);
    assert!(!card.is_animating());
    assert!(!clock.has_pending());
}

#[test]
fn new_drag_freezes_a_running_settle() {
    let (card, clock) = test_card(DismissDirection::Left);

    slow_swipe(&card, -600.0);
    clock.drain(0);
    // Halfway through the 250 ms settle the eased fraction is 0.5.
    clock.drain(125 * 1_000_000);
    assert!((card.displacement() + 300.0).abs() < 1.0);

    card.on_pointer_event(PointerEvent::moved(50.0, 0.0, 500));

    assert!(!card.is_animating());
    assert!(!clock.has_pending());
    assert!((card.displacement() + 300.0).abs() < 1.0);
}

#[test]
fn fling_toward_dismiss_edge_dismisses() {
    let (card, clock) = test_card(DismissDirection::Left);
    let (completions, _sub) = completion_counter(&card);

    fling_swipe(&card, -1.0);
    // Released at -400 px, well under the threshold, so only the fling can
    // carry it across.
    assert_eq!(card.displacement(), -400.0);

    drive_to_idle(&clock);

    assert_eq!(card.displacement(), -2000.0);
    assert!(card.is_triggered());
    assert_eq!(completions.get(), 1);
}

#[test]
fn fling_away_from_dismiss_edge_settles() {
    let (card, clock) = test_card(DismissDirection::Left);
    let (completions, _sub) = completion_counter(&card);

    fling_swipe(&card, 1.0);
    drive_to_idle(&clock);

    assert_eq!(card.displacement(), 0.0);
    assert!(!card.is_triggered());
    assert_eq!(completions.get(), 0);
}

#[test]
fn either_direction_accepts_flings_both_ways() {
    for dir in [-1.0f32, 1.0] {
        let (card, clock) = test_card(DismissDirection::Either);
        fling_swipe(&card, dir);
        drive_to_idle(&clock);

        assert_eq!(card.displacement(), dir * 2000.0);
        assert!(card.is_triggered());
    }
}

#[test]
fn zero_width_release_never_dismisses() {
    let clock = FrameClock::new();
    let card = SwipeCard::new(clock.clone(), SwipeConfig::default());
    let (completions, _sub) = completion_counter(&card);

    slow_swipe(&card, -1200.0);
    drive_to_idle(&clock);

    assert_eq!(card.displacement(), 0.0);
    assert!(!card.is_triggered());
    assert_eq!(completions.get(), 0);
}

#[test]
fn host_supplied_velocity_drives_the_fling() {
    let (card, clock) = test_card(DismissDirection::Left);
    let (completions, _sub) = completion_counter(&card);

    card.on_pointer_event(PointerEvent::down(500.0, 0.0, 0));
    card.on_pointer_event(PointerEvent::moved(480.0, 0.0, 50));
    card.on_pointer_event(PointerEvent::moved(400.0, 0.0, 100));
    // -6000 px/s coasts to about -1780 px, past the 1170 px threshold.
    card.on_pointer_up_with_velocity(380.0, 150, -6000.0);

    drive_to_idle(&clock);

    assert_eq!(card.displacement(), -2000.0);
    assert_eq!(completions.get(), 1);
}

#[test]
fn cancel_runs_the_threshold_on_the_frozen_displacement() {
    let (card, clock) = test_card(DismissDirection::Left);
    let (completions, _sub) = completion_counter(&card);

    card.on_pointer_event(PointerEvent::down(0.0, 0.0, 0));
    card.on_pointer_event(PointerEvent::moved(-20.0, 0.0, 50));
    card.on_pointer_event(PointerEvent::moved(-1220.0, 0.0, 100));
    card.on_pointer_event(PointerEvent::cancel(150));

    drive_to_idle(&clock);

    assert_eq!(card.displacement(), -2000.0);
    assert_eq!(completions.get(), 1);
}

#[test]
fn cancel_before_the_anchor_arms_is_inert() {
    let (card, clock) = test_card(DismissDirection::Left);

    card.on_pointer_event(PointerEvent::down(100.0, 0.0, 0));
    card.on_pointer_event(PointerEvent::cancel(20));

    assert_eq!(card.displacement(), 0.0);
    assert!(!clock.has_pending());
}

#[test]
fn card_stays_usable_after_a_settle() {
    let (card, clock) = test_card(DismissDirection::Left);

    slow_swipe(&card, -500.0);
    drive_to_idle(&clock);
    assert_eq!(card.displacement(), 0.0);

    slow_swipe(&card, -1200.0);
    drive_to_idle(&clock);
    assert!(card.is_triggered());
}

#[test]
fn transform_reflects_the_live_gesture() {
    let (card, _clock) = test_card(DismissDirection::Left);

    card.on_pointer_event(PointerEvent::down(0.0, 0.0, 0));
    card.on_pointer_event(PointerEvent::moved(-20.0, 0.0, 50));
    card.on_pointer_event(PointerEvent::moved(-520.0, 0.0, 100));

    let t = card.transform();
    assert_eq!(t.offset_x, -500.0);
    assert!((t.overlay_alpha - 0.5).abs() < 1e-6);
    assert_eq!(t.rotation_y, 0.0);

    // Crossing back over the anchor flips into the tilting mode.
    card.on_pointer_event(PointerEvent::moved(180.0, 0.0, 150));
    let t = card.transform();
    assert_eq!(t.offset_x, 200.0);
    assert!(t.rotation_y > 0.0);
}
