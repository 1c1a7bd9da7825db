use super::*;

const SECOND: u64 = 1_000_000_000;

fn spec() -> FrictionDecaySpec {
    FrictionDecaySpec::new(0.85)
}

#[test]
fn starts_at_initial_value() {
    let value = spec().value_from_nanos(0, 120.0, -4000.0);
    assert!((value - 120.0).abs() < 1e-3);
}

#[test]
fn coasts_to_target() {
    let spec = spec();
    let target = spec.target_value(0.0, -4000.0);
    // v0 / (4.2 * 0.85) = -4000 / 3.57
    assert!((target - (-4000.0 / 3.57)).abs() < 1.0);

    let duration = spec.duration_nanos(-4000.0);
    assert!(duration > 0);
    let end_value = spec.value_from_nanos(duration, 0.0, -4000.0);
    // Within the visibility threshold's worth of travel from the target.
    assert!((end_value - target).abs() < 20.0, "{end_value} vs {target}");
}

#[test]
fn velocity_decays_monotonically() {
    let spec = spec();
    let mut prev = spec.velocity_from_nanos(0, 4000.0);
    for i in 1..=20 {
        let v = spec.velocity_from_nanos(i * SECOND / 10, 4000.0);
        assert!(v <= prev);
        assert!(v >= 0.0);
        prev = v;
    }
}

#[test]
fn position_moves_in_velocity_direction() {
    let spec = spec();
    let forward = spec.value_from_nanos(SECOND / 4, 100.0, 2000.0);
    assert!(forward > 100.0);
    let backward = spec.value_from_nanos(SECOND / 4, 100.0, -2000.0);
    assert!(backward < 100.0);
}

#[test]
fn below_threshold_velocity_is_already_finished() {
    let spec = spec();
    assert_eq!(spec.duration_nanos(10.0), 0);
    let decay = Decay::new(spec, 50.0, 10.0);
    assert!(decay.is_finished(0));
}

#[test]
fn bounds_end_the_fling_early() {
    let decay = Decay::new(spec(), 0.0, -8000.0).with_bounds(-500.0, f32::INFINITY);
    // Unbounded value at 100 ms is about -670, well past the bound and well
    // before the decay would run out on its own.
    let t = SECOND / 10;
    assert_eq!(decay.value_at(t), -500.0);
    assert!(decay.is_finished(t));
    assert_eq!(decay.final_value(), -500.0);
}

#[test]
fn generous_bounds_leave_the_target_alone() {
    let decay = Decay::new(spec(), -400.0, -8000.0).with_bounds(-6000.0, 6000.0);
    let target = spec().target_value(-400.0, -8000.0);
    assert!((decay.final_value() - target).abs() < 1e-3);
}
