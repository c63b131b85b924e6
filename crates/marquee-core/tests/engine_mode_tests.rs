// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used)]
use marquee_core::{Direction, EngineTuning, HostEvent, Marquee, StrategyKind, ViewportMode};
use marquee_dry_tests::{fire_timers, mount_settled, options, FrameClock, MockHost};
use marquee_port::{Extent, ImageStatus, NativeLoop, Orientation};

fn mobile(sequence_width: f64) -> MockHost {
    MockHost::new()
        .with_viewport_width(390.0)
        .with_container_width(390.0)
        .with_sequence_width(sequence_width)
}

#[test]
fn mobile_uses_native_loop_sized_by_the_sequence() {
    let mut marquee = Marquee::new(mobile(2400.0), options(5));
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    assert_eq!(marquee.mode(), ViewportMode::Mobile);
    assert_eq!(marquee.strategy(), StrategyKind::NativeLoop);
    let host = marquee.host();
    assert_eq!(
        host.native_loop,
        Some(NativeLoop {
            orientation: Orientation::Horizontal,
            distance: 2400.0,
            duration_secs: 20.0,
            reverse: false,
        })
    );
    // The estimate-sized loop was replaced once the sequence was measured.
    assert_eq!(host.native_installs, 2);
    assert!(host.transforms.iter().all(|(_, offset)| *offset == 0.0));
    assert!(host.pending_frames.is_empty());
}

#[test]
fn native_loop_follows_the_container_period_until_the_copy_is_measured() {
    let host = MockHost::new()
        .with_viewport_width(390.0)
        .with_container_width(390.0);
    let mut marquee = Marquee::new(host, options(5));
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    let native = marquee.host().native_loop.expect("native loop");
    assert_eq!(native.distance, 390.0);
    assert_eq!(native.duration_secs, 10.0);
    assert_eq!(marquee.host().native_installs, 2);

    // Same size confirmed by the first Copy: the installed loop is already right.
    marquee.host_mut().first_copy = Extent::new(390.0, 28.0);
    marquee.dispatch(HostEvent::Resized);
    clock.step(&mut marquee);
    assert_eq!(marquee.sequence_size(), 390.0);
    assert_eq!(marquee.host().native_loop.map(|n| n.distance), Some(390.0));
    assert_eq!(marquee.host().native_installs, 2);

    marquee.host_mut().first_copy = Extent::new(1800.0, 28.0);
    marquee.dispatch(HostEvent::Resized);
    clock.step(&mut marquee);
    let native = marquee.host().native_loop.expect("native loop");
    assert_eq!(native.distance, 1800.0);
    assert_eq!(native.duration_secs, 15.0);
    assert_eq!(marquee.host().native_installs, 3);
}

#[test]
fn custom_tuning_moves_the_breakpoint_and_copy_floor() {
    let tuning = EngineTuning {
        mobile_breakpoint: 1024.0,
        min_copies: 6,
        ..EngineTuning::default()
    };
    let host = MockHost::new()
        .with_viewport_width(900.0)
        .with_container_width(900.0)
        .with_sequence_width(2400.0);
    let mut marquee = Marquee::new(host, options(5)).with_tuning(tuning);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    assert_eq!(marquee.tuning().mobile_breakpoint, 1024.0);
    assert_eq!(marquee.mode(), ViewportMode::Mobile);
    assert_eq!(marquee.strategy(), StrategyKind::NativeLoop);
    assert_eq!(marquee.copy_count(), 6);
    let render = marquee.host().last_render().expect("rendered");
    assert_eq!(render.copies.len(), 6);

    marquee.dispatch(HostEvent::ViewportChanged { width: 1000.0 });
    assert_eq!(marquee.mode(), ViewportMode::Mobile);
    marquee.dispatch(HostEvent::ViewportChanged { width: 1100.0 });
    assert_eq!(marquee.mode(), ViewportMode::Desktop);
}

#[test]
fn short_sequences_hit_the_duration_floor() {
    let mut opts = options(5);
    opts.direction = Direction::Right;
    let mut marquee = Marquee::new(mobile(600.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    let native = marquee.host().native_loop.expect("native loop");
    assert_eq!(native.duration_secs, 10.0);
    assert!(native.reverse);
}

#[test]
fn zero_speed_on_mobile_stays_static() {
    let mut opts = options(5);
    opts.speed = 0.0;
    let mut marquee = Marquee::new(mobile(2400.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    assert_eq!(marquee.strategy(), StrategyKind::Static);
    assert!(marquee.host().native_loop.is_none());
}

#[test]
fn mode_switch_hands_the_transform_to_exactly_one_writer() {
    let mut marquee = Marquee::new(MockHost::new().with_sequence_width(2400.0), options(5));
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);
    clock.run_for(&mut marquee, 0.5);
    let loop_frame = marquee.host().pending_frames.clone();

    marquee.dispatch(HostEvent::ViewportChanged { width: 500.0 });
    assert_eq!(marquee.strategy(), StrategyKind::NativeLoop);
    assert_eq!(marquee.host().last_offset(), Some(0.0));
    assert!(marquee.host().native_loop.is_some());
    assert!(loop_frame
        .iter()
        .all(|frame| marquee.host().cancelled_frames.contains(frame)));

    let writes = marquee.host().transforms.len();
    clock.run_for(&mut marquee, 1.0);
    assert_eq!(marquee.host().transforms.len(), writes);

    marquee.dispatch(HostEvent::ViewportChanged { width: 1280.0 });
    assert_eq!(marquee.strategy(), StrategyKind::JsLoop);
    assert!(marquee.host().native_loop.is_none());
    clock.run_for(&mut marquee, 0.5);
    assert!(marquee.host().transforms.len() > writes);
    assert!(marquee.offset() > 0.0);
}

#[test]
fn touch_is_applied_on_the_next_frame() {
    let mut opts = options(5);
    opts.pause_on_hover = Some(true);
    let mut marquee = Marquee::new(mobile(2400.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    marquee.dispatch(HostEvent::TouchStart);
    assert!(!marquee.snapshot().hovered);
    assert!(!marquee.host().native_paused);
    clock.step(&mut marquee);
    assert!(marquee.snapshot().hovered);
    assert!(marquee.host().native_paused);

    marquee.dispatch(HostEvent::TouchEnd);
    clock.step(&mut marquee);
    assert!(!marquee.snapshot().hovered);
    assert!(!marquee.host().native_paused);
}

#[test]
fn touches_before_a_frame_collapse_into_the_last() {
    let mut opts = options(5);
    opts.pause_on_hover = Some(true);
    let mut marquee = Marquee::new(mobile(2400.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    marquee.dispatch(HostEvent::TouchStart);
    marquee.dispatch(HostEvent::TouchCancel);
    assert_eq!(marquee.host().pending_frames.len(), 1);
    clock.step(&mut marquee);
    assert!(!marquee.snapshot().hovered);
    assert!(!marquee.host().native_paused);
}

#[test]
fn nonzero_hover_speed_leaves_the_native_loop_running() {
    let mut opts = options(5);
    opts.hover_speed = Some(40.0);
    let mut marquee = Marquee::new(mobile(2400.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    marquee.dispatch(HostEvent::PointerEnter);
    assert!(marquee.snapshot().hovered);
    assert!(!marquee.host().native_paused);
}

#[test]
fn reduced_motion_never_requests_a_frame() {
    let mut marquee = Marquee::new(
        MockHost::new().with_sequence_width(1000.0).with_reduced_motion(),
        options(5),
    );
    marquee.mount();
    // Measured on the spot, without waiting for a frame.
    assert_eq!(marquee.sequence_size(), 1000.0);
    assert_eq!(marquee.copy_count(), 5);

    fire_timers(&mut marquee);
    marquee.host_mut().first_copy = Extent::new(1200.0, 28.0);
    marquee.dispatch(HostEvent::Resized);
    assert_eq!(marquee.sequence_size(), 1200.0);
    marquee.dispatch(HostEvent::ViewportChanged { width: 500.0 });
    marquee.dispatch(HostEvent::TouchStart);
    assert!(marquee.snapshot().hovered);
    marquee.dispatch(HostEvent::TouchEnd);
    assert!(!marquee.snapshot().hovered);

    assert_eq!(marquee.strategy(), StrategyKind::Static);
    assert_eq!(marquee.offset(), 0.0);
    let host = marquee.host();
    assert_eq!(host.frame_requests, 0);
    assert!(host.native_loop.is_none());
    assert!(host.transforms.iter().all(|(_, offset)| *offset == 0.0));
}

#[test]
fn reduced_motion_waits_for_images_without_frames() {
    let mut marquee = Marquee::new(
        MockHost::new()
            .with_sequence_width(1000.0)
            .with_reduced_motion()
            .with_images(vec![ImageStatus::Pending, ImageStatus::Settled]),
        options(2),
    );
    marquee.mount();
    assert_eq!(marquee.sequence_size(), 0.0);

    marquee.dispatch(HostEvent::ImageSettled { index: 0 });
    assert_eq!(marquee.sequence_size(), 1000.0);
    assert_eq!(marquee.host().frame_requests, 0);
}

#[test]
fn turning_reduced_motion_on_settles_deferred_work() {
    let mut opts = options(5);
    opts.pause_on_hover = Some(true);
    let mut marquee = Marquee::new(MockHost::new().with_sequence_width(1000.0), opts);
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    marquee.host_mut().first_copy = Extent::new(1200.0, 28.0);
    marquee.dispatch(HostEvent::Resized);
    marquee.dispatch(HostEvent::TouchStart);
    // Motion loop, measurement, and the deferred touch.
    assert_eq!(marquee.host().pending_frames.len(), 3);

    marquee.dispatch(HostEvent::ReducedMotionChanged(true));
    assert!(marquee.host().pending_frames.is_empty());
    assert_eq!(marquee.sequence_size(), 1200.0);
    assert!(marquee.snapshot().hovered);
    assert_eq!(marquee.strategy(), StrategyKind::Static);
}

#[test]
fn reduced_motion_can_change_while_mounted() {
    let mut marquee = Marquee::new(
        MockHost::new().with_sequence_width(1000.0).with_reduced_motion(),
        options(5),
    );
    let mut clock = FrameClock::default();
    mount_settled(&mut marquee, &mut clock);

    marquee.dispatch(HostEvent::ReducedMotionChanged(false));
    assert_eq!(marquee.strategy(), StrategyKind::JsLoop);
    clock.run_for(&mut marquee, 1.0);
    assert!(marquee.offset() > 0.0);

    marquee.dispatch(HostEvent::ReducedMotionChanged(true));
    assert_eq!(marquee.strategy(), StrategyKind::Static);
    assert_eq!(marquee.host().last_offset(), Some(0.0));
    assert!(marquee.host().pending_frames.is_empty());
}
