// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use marquee_core::{Direction, HostEvent, Lifecycle, Marquee, StrategyKind};
use marquee_dry_tests::{mount_settled, options, FrameClock, MockHost};

const TAU: f64 = 0.25;

fn desktop(sequence_width: f64) -> MockHost {
    MockHost::new().with_sequence_width(sequence_width)
}

#[test]
fn velocity_converges_within_one_second() {
    let mut marquee = Marquee::new(desktop(1200.0), options(5));
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);
    // The first tick only records its timestamp; 59 more make 60 intervals.
    clock.run_frames(&mut marquee, 59);

    let velocity = marquee.snapshot().current_velocity;
    let bound = 120.0 * (-1.0_f64 / TAU).exp();
    assert!(velocity < 120.0);
    assert!((velocity - 120.0).abs() <= bound + 1e-6, "velocity {velocity}");
    assert!(marquee.host().last_offset().is_some_and(|offset| offset > 0.0));
}

#[test]
fn offsets_wrap_for_reverse_travel() {
    let mut opts = options(5);
    opts.direction = Direction::Right;
    let mut marquee = Marquee::new(desktop(900.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);
    clock.run_for(&mut marquee, 3.0);

    assert!(marquee.snapshot().current_velocity < -100.0);
    assert!(marquee
        .host()
        .transforms
        .iter()
        .all(|(_, offset)| (0.0..900.0).contains(offset)));
}

#[test]
fn pause_on_hover_decays_monotonically_and_recovers() {
    let mut opts = options(5);
    opts.hover_speed = Some(0.0);
    let mut marquee = Marquee::new(desktop(1200.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);
    clock.run_for(&mut marquee, 2.0);

    marquee.dispatch(HostEvent::PointerEnter);
    assert!(marquee.snapshot().hovered);
    let mut last = marquee.snapshot().current_velocity;
    for _ in 0..180 {
        clock.step(&mut marquee);
        let velocity = marquee.snapshot().current_velocity;
        assert!(velocity <= last + 1e-12, "{velocity} after {last}");
        assert!(velocity >= 0.0);
        last = velocity;
    }
    assert!(last < 1.0);

    marquee.dispatch(HostEvent::PointerLeave);
    clock.run_for(&mut marquee, 2.0);
    assert!(marquee.snapshot().current_velocity > 119.0);
}

#[test]
fn hover_speed_slows_without_reversing() {
    let mut opts = options(5);
    opts.direction = Direction::Right;
    opts.hover_speed = Some(30.0);
    let mut marquee = Marquee::new(desktop(1200.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);
    marquee.dispatch(HostEvent::PointerEnter);
    clock.run_for(&mut marquee, 3.0);

    let snapshot = marquee.snapshot();
    assert_eq!(snapshot.target_velocity, -30.0);
    assert!((snapshot.current_velocity + 30.0).abs() < 0.1);
}

#[test]
fn hidden_document_suspends_without_jumping() {
    let mut marquee = Marquee::new(desktop(100_000.0), options(5));
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);
    clock.run_for(&mut marquee, 1.0);

    marquee.dispatch(HostEvent::VisibilityChanged { hidden: true });
    assert!(marquee.host().pending_frames.is_empty());
    let before = marquee.offset();
    let writes = marquee.host().transforms.len();

    clock.now_ms += 5_000.0;
    marquee.dispatch(HostEvent::VisibilityChanged { hidden: false });
    clock.step(&mut marquee);
    assert_eq!(marquee.host().transforms.len(), writes + 1);
    assert_eq!(marquee.offset(), before);

    clock.step(&mut marquee);
    assert!(marquee.offset() > before);
}

#[test]
fn unmount_cancels_everything_and_ignores_stale_frames() {
    let mut marquee = Marquee::new(desktop(1200.0), options(5));
    marquee.mount();
    assert_eq!(marquee.host().pending_timers.len(), 3);
    let stale = marquee.host().pending_frames.clone();
    assert!(!stale.is_empty());

    marquee.unmount();
    let host = marquee.host();
    assert!(host.pending_frames.is_empty());
    assert!(host.pending_timers.is_empty());
    assert_eq!(host.cleared_timers.len(), 3);
    assert_eq!(host.disconnects, 1);
    let writes = host.transforms.len();

    for handle in stale {
        marquee.dispatch(HostEvent::Frame {
            handle,
            timestamp_ms: 16.0,
        });
    }
    marquee.dispatch(HostEvent::Resized);
    marquee.unmount();

    let host = marquee.host();
    assert_eq!(host.transforms.len(), writes);
    assert!(host.pending_frames.is_empty());
    assert_eq!(host.disconnects, 1);
    assert_eq!(marquee.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(marquee.strategy(), StrategyKind::Static);
}

#[test]
fn frames_from_a_stopped_loop_are_ignored() {
    let mut marquee = Marquee::new(desktop(1200.0), options(5));
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);
    clock.run_for(&mut marquee, 0.5);

    let stale = marquee.host().pending_frames.clone();
    marquee.dispatch(HostEvent::ReducedMotionChanged(true));
    let writes = marquee.host().transforms.len();
    for handle in stale {
        marquee.dispatch(HostEvent::Frame {
            handle,
            timestamp_ms: clock.now_ms,
        });
    }
    assert_eq!(marquee.host().transforms.len(), writes);
    assert_eq!(marquee.host().last_offset(), Some(0.0));
}
