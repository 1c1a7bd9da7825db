//! The swipe-to-dismiss card state machine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipedeck_animation::{Decay, Easing, FrictionDecaySpec, Tween, TweenSpec};
use swipedeck_core::{FrameCallbackRegistration, FrameClock, Subject};
use swipedeck_foundation::{
    gesture_constants, PointerEvent, PointerEventKind, VelocityTracker1D,
};

use crate::config::{DismissDirection, SwipeConfig, FLING_CLAMP_SLACK};
use crate::transform::{project_transform, CardTransform, SwipeMode};

/// The single motion driver that owns the displacement value.
///
/// At most one variant other than `Idle` exists at any instant; starting a
/// new driver always replaces the current one with no callback and no
/// snap-back, so the next driver takes over from the frozen value.
enum Driver {
    Idle,
    Settle { tween: Tween, started: Option<u64> },
    Dismiss { tween: Tween, started: Option<u64> },
    Fling { decay: Decay, started: Option<u64> },
}

impl Driver {
    fn is_idle(&self) -> bool {
        matches!(self, Driver::Idle)
    }
}

/// Which driver just finished, decided while the driver borrow is held so the
/// follow-up work can run without it.
#[derive(Clone, Copy)]
enum FinishedDriver {
    Settle,
    Dismiss,
    Fling,
}

struct CardInner {
    config: SwipeConfig,
    clock: FrameClock,
    /// Layout input, set by the host; read at decision time, never cached.
    width: Cell<f32>,
    displacement: Cell<f32>,
    /// X of the first displacement-producing move sample of the current drag.
    anchor_x: Cell<Option<f32>>,
    press_x: Cell<Option<f32>>,
    mode: Cell<SwipeMode>,
    triggered: Cell<bool>,
    complete_sent: Cell<bool>,
    tracker: RefCell<VelocityTracker1D>,
    driver: RefCell<Driver>,
    registration: RefCell<Option<FrameCallbackRegistration>>,
    progress: Subject<f32>,
    complete: Subject<()>,
}

/// A swipeable card.
///
/// Feed it pointer events, drive its frame clock, and observe progress and
/// completion through the subjects. Each card owns its gesture state
/// independently; clones share the same underlying card.
#[derive(Clone)]
pub struct SwipeCard {
    inner: Rc<CardInner>,
}

impl SwipeCard {
    pub fn new(clock: FrameClock, config: SwipeConfig) -> Self {
        Self {
            inner: Rc::new(CardInner {
                config,
                clock,
                width: Cell::new(0.0),
                displacement: Cell::new(0.0),
                anchor_x: Cell::new(None),
                press_x: Cell::new(None),
                mode: Cell::new(SwipeMode::Undecided),
                triggered: Cell::new(false),
                complete_sent: Cell::new(false),
                tracker: RefCell::new(VelocityTracker1D::new()),
                driver: RefCell::new(Driver::Idle),
                registration: RefCell::new(None),
                progress: Subject::new(),
                complete: Subject::new(),
            }),
        }
    }

    /// Tells the card how wide it currently is. Hosts call this from layout;
    /// the value is read fresh at every release decision.
    pub fn set_width(&self, width: f32) {
        self.inner.width.set(width);
    }

    pub fn width(&self) -> f32 {
        self.inner.width.get()
    }

    /// The live signed offset applied to the card.
    pub fn displacement(&self) -> f32 {
        self.inner.displacement.get()
    }

    /// `true` once a dismissal has completed; terminal.
    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.get()
    }

    pub fn is_animating(&self) -> bool {
        !self.inner.driver.borrow().is_idle()
    }

    /// Emits the displacement on every update tick during drag or animation.
    pub fn progress(&self) -> Subject<f32> {
        self.inner.progress.clone()
    }

    /// Emits exactly once, when a dismissal has finished its fly-off and been
    /// acknowledged.
    pub fn complete(&self) -> Subject<()> {
        self.inner.complete.clone()
    }

    /// The visual state a host should render right now.
    pub fn transform(&self) -> CardTransform {
        project_transform(
            self.inner.displacement.get(),
            self.inner.width.get(),
            self.inner.mode.get(),
            self.inner.triggered.get(),
        )
    }

    pub fn on_pointer_event(&self, event: PointerEvent) {
        if self.inner.triggered.get() {
            // Terminal state: the card no longer reacts to input.
            return;
        }
        match event.kind {
            PointerEventKind::Down => self.on_down(event),
            PointerEventKind::Move => self.on_move(event),
            PointerEventKind::Up => self.on_up(event.position.x, event.time_ms, None),
            PointerEventKind::Cancel => self.on_cancel(),
        }
    }

    /// Release with a host-supplied velocity estimate, for platforms that run
    /// their own fling classifier. Velocity in px/sec.
    pub fn on_pointer_up_with_velocity(&self, x: f32, time_ms: i64, velocity: f32) {
        if self.inner.triggered.get() {
            return;
        }
        self.on_up(x, time_ms, Some(velocity));
    }

    fn on_down(&self, event: PointerEvent) {
        let mut tracker = self.inner.tracker.borrow_mut();
        tracker.reset();
        tracker.add_sample(event.time_ms, event.position.x);
        drop(tracker);

        // Re-arm for a new drag; the anchor is captured by the first move
        // sample that clears the tap slop.
        self.inner.press_x.set(Some(event.position.x));
        self.inner.anchor_x.set(None);
        self.inner.mode.set(SwipeMode::Undecided);
    }

    fn on_move(&self, event: PointerEvent) {
        // A new drag always preempts an in-flight animation, freezing the
        // displacement wherever it was.
        self.cancel_animation();

        let x = event.position.x;
        self.inner.tracker.borrow_mut().add_sample(event.time_ms, x);

        let anchor = match self.inner.anchor_x.get() {
            Some(anchor) => anchor,
            None => {
                // Tolerate move-before-down: with no press position on record
                // the first move becomes the anchor regardless of phase.
                if let Some(press) = self.inner.press_x.get() {
                    if (x - press).abs() <= gesture_constants::TAP_SLOP {
                        return;
                    }
                }
                // The anchor sample itself must not count as displacement.
                self.inner.anchor_x.set(Some(x));
                return;
            }
        };

        let displacement = x - anchor;
        self.update_mode(displacement);
        self.set_displacement(displacement);
        log::trace!(
            "drag sample: displacement {displacement:+.1} ({:?})",
            self.inner.mode.get()
        );
    }

    fn on_up(&self, x: f32, time_ms: i64, velocity_override: Option<f32>) {
        let anchor = match self.inner.anchor_x.get() {
            Some(anchor) => anchor,
            None => {
                // Tap: consumed, no visual effect.
                self.reset_gesture();
                return;
            }
        };

        let displacement = x - anchor;
        self.update_mode(displacement);
        self.set_displacement(displacement);

        let velocity = velocity_override.unwrap_or_else(|| {
            let mut tracker = self.inner.tracker.borrow_mut();
            tracker.add_sample(time_ms, x);
            tracker.velocity_capped(self.inner.config.max_fling_velocity)
        });

        self.reset_gesture();

        if velocity.abs() >= self.inner.config.min_fling_velocity
            && self.passes_direction_gate(velocity)
        {
            self.start_fling(displacement, velocity);
        } else {
            self.finish_drag(displacement);
        }
    }

    fn on_cancel(&self) {
        if self.inner.anchor_x.get().is_none() {
            self.reset_gesture();
            return;
        }
        // A cancelled gesture releases with no velocity: run the threshold
        // decision on the frozen displacement.
        let displacement = self.inner.displacement.get();
        self.reset_gesture();
        self.finish_drag(displacement);
    }

    /// Only velocities heading toward the dismiss edge may fling.
    fn passes_direction_gate(&self, velocity: f32) -> bool {
        match self.inner.config.dismiss_direction {
            DismissDirection::Left => velocity < 0.0,
            DismissDirection::Right => velocity > 0.0,
            DismissDirection::Either => true,
        }
    }

    /// Signed multiplier mapping "toward the dismiss edge" onto +1.
    ///
    /// The one place sign handling lives; everything downstream works with
    /// dismiss-direction magnitudes.
    fn dismiss_multiplier(&self, displacement: f32) -> f32 {
        match self.inner.config.dismiss_direction {
            DismissDirection::Left => -1.0,
            DismissDirection::Right => 1.0,
            DismissDirection::Either => {
                if displacement < 0.0 {
                    -1.0
                } else {
                    1.0
                }
            }
        }
    }

    fn update_mode(&self, displacement: f32) {
        if displacement == 0.0 {
            return;
        }
        let toward = self.dismiss_multiplier(displacement) * displacement > 0.0;
        let mode = if toward {
            SwipeMode::TowardDismiss
        } else {
            SwipeMode::AwayFromDismiss
        };
        if self.inner.mode.replace(mode) != mode {
            log::trace!("swipe mode changed to {mode:?}");
        }
    }

    fn set_displacement(&self, value: f32) {
        self.inner.displacement.set(value);
        self.inner.progress.emit(&value);
    }

    fn reset_gesture(&self) {
        self.inner.press_x.set(None);
        self.inner.anchor_x.set(None);
        self.inner.mode.set(SwipeMode::Undecided);
    }

    /// Decides between settle and dismiss for a finished drag or fling.
    fn finish_drag(&self, final_x: f32) {
        let width = self.inner.width.get();
        if width <= 0.0 {
            // Without a width the threshold is meaningless; never dismiss.
            log::warn!("swipe released with zero width; settling back to rest");
            self.animate_to_start(final_x);
            return;
        }

        let toward = match self.inner.config.dismiss_direction {
            DismissDirection::Either => final_x.abs(),
            _ => self.dismiss_multiplier(final_x) * final_x,
        };
        let threshold =
            self.inner.config.threshold_fraction * (width + self.inner.config.overshoot_margin);
        if toward >= threshold {
            log::debug!("release at {final_x:+.1} crossed threshold {threshold:.1}: dismissing");
            self.animate_to_end(final_x);
        } else {
            log::debug!("release at {final_x:+.1} below threshold {threshold:.1}: settling");
            self.animate_to_start(final_x);
        }
    }

    fn animate_to_start(&self, from: f32) {
        let tween = Tween::new(
            from,
            0.0,
            TweenSpec::new(
                self.inner.config.settle_duration_millis,
                Easing::AccelerateDecelerate,
            ),
        );
        self.start_driver(Driver::Settle {
            tween,
            started: None,
        });
    }

    fn animate_to_end(&self, from: f32) {
        let width = self.inner.width.get();
        let target = self.dismiss_multiplier(from) * width * 2.0;
        let tween = Tween::new(
            from,
            target,
            TweenSpec::new(
                self.inner.config.dismiss_duration_millis,
                Easing::AccelerateDecelerate,
            ),
        );
        self.start_driver(Driver::Dismiss {
            tween,
            started: None,
        });
    }

    fn start_fling(&self, from: f32, velocity: f32) {
        log::debug!("fling from {from:+.1} at {velocity:+.0} px/s");
        let slack = self.inner.width.get() + FLING_CLAMP_SLACK;
        let decay = Decay::new(
            FrictionDecaySpec::new(self.inner.config.fling_friction),
            from,
            velocity,
        )
        .with_bounds(-slack, slack);
        self.start_driver(Driver::Fling {
            decay,
            started: None,
        });
    }

    fn start_driver(&self, driver: Driver) {
        self.cancel_animation();
        *self.inner.driver.borrow_mut() = driver;
        self.schedule_frame();
    }

    /// Stops whatever animation is running. No completion callback fires and
    /// the displacement stays where it was. Safe to call when idle.
    fn cancel_animation(&self) {
        *self.inner.driver.borrow_mut() = Driver::Idle;
        self.inner.registration.borrow_mut().take();
    }

    fn schedule_frame(&self) {
        let card = self.clone();
        let registration = self
            .inner
            .clock
            .with_frame_nanos(move |frame_time_nanos| card.on_frame(frame_time_nanos));
        *self.inner.registration.borrow_mut() = Some(registration);
    }

    fn on_frame(&self, now: u64) {
        self.inner.registration.borrow_mut().take();

        let step = {
            let mut driver = self.inner.driver.borrow_mut();
            match &mut *driver {
                Driver::Idle => None,
                Driver::Settle { tween, started } => {
                    let play = now.saturating_sub(*started.get_or_insert(now));
                    Some((
                        tween.value_at(play),
                        tween.is_finished(play),
                        FinishedDriver::Settle,
                    ))
                }
                Driver::Dismiss { tween, started } => {
                    let play = now.saturating_sub(*started.get_or_insert(now));
                    Some((
                        tween.value_at(play),
                        tween.is_finished(play),
                        FinishedDriver::Dismiss,
                    ))
                }
                Driver::Fling { decay, started } => {
                    let play = now.saturating_sub(*started.get_or_insert(now));
                    Some((
                        decay.value_at(play),
                        decay.is_finished(play),
                        FinishedDriver::Fling,
                    ))
                }
            }
        };

        let Some((value, finished, kind)) = step else {
            return;
        };

        self.set_displacement(value);

        if !finished {
            self.schedule_frame();
            return;
        }

        *self.inner.driver.borrow_mut() = Driver::Idle;
        match kind {
            FinishedDriver::Settle => self.acknowledge(),
            FinishedDriver::Dismiss => {
                self.inner.triggered.set(true);
                self.acknowledge();
            }
            FinishedDriver::Fling => self.finish_drag(value),
        }
    }

    /// The settle-side completion check: a dismissal only counts as complete
    /// once the triggered flag has been observed here.
    fn acknowledge(&self) {
        if self.inner.triggered.get() && !self.inner.complete_sent.get() {
            self.inner.complete_sent.set(true);
            self.inner.complete.emit(&());
        }
    }
}

#[cfg(test)]
#[path = "tests/swipe_card_tests.rs"]
mod tests;
