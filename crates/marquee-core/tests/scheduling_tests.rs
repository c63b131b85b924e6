// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use std::time::Duration;

use marquee_core::interaction::InteractionHandler;
use marquee_core::motion::JsLoop;
use marquee_core::watcher::{DimensionWatcher, ObserverKind};
use marquee_dry_tests::{MockHost, MockObserver};
use marquee_port::Orientation;

const RETRIES: [Duration; 2] = [Duration::from_millis(100), Duration::from_millis(300)];

#[test]
fn watcher_coalesces_until_the_frame_is_claimed() {
    let mut host = MockHost::new();
    let mut watcher = DimensionWatcher::new();
    watcher.attach(&mut host, &RETRIES);
    assert_eq!(watcher.observer(), ObserverKind::SizeObserver);
    assert!(!watcher.is_pending());

    assert!(watcher.notify(&mut host));
    assert!(!watcher.notify(&mut host));
    assert!(watcher.is_pending());
    assert_eq!(host.frame_requests, 1);

    let frame = host.take_frames()[0];
    assert!(watcher.claim_frame(frame));
    assert!(!watcher.is_pending());
    assert!(!watcher.claim_frame(frame));
}

#[test]
fn retry_timers_are_claimed_once() {
    let mut host = MockHost::new();
    let mut watcher = DimensionWatcher::new();
    watcher.attach(&mut host, &RETRIES);
    assert_eq!(watcher.retries_outstanding(), 2);

    let (timer, delay) = host.pending_timers[0];
    assert_eq!(delay, Duration::from_millis(100));
    assert!(watcher.claim_timer(timer));
    assert!(!watcher.claim_timer(timer));
    assert_eq!(watcher.retries_outstanding(), 1);
}

#[test]
fn cancelled_measurement_frame_is_forgotten() {
    let mut host = MockHost::new();
    let mut watcher = DimensionWatcher::new();
    watcher.notify(&mut host);
    let frame = host.pending_frames[0];

    assert!(watcher.cancel_pending(&mut host));
    assert!(!watcher.is_pending());
    assert_eq!(host.cancelled_frames, vec![frame]);
    assert!(!watcher.claim_frame(frame));
    assert!(!watcher.cancel_pending(&mut host));
}

#[test]
fn detach_releases_frame_timers_and_observer() {
    let mut host = MockHost::new().without_size_observer();
    let mut watcher = DimensionWatcher::new();
    watcher.attach(&mut host, &RETRIES);
    assert_eq!(watcher.observer(), ObserverKind::WindowResize);
    watcher.notify(&mut host);

    watcher.detach(&mut host);
    assert!(!watcher.is_pending());
    assert_eq!(watcher.retries_outstanding(), 0);
    assert_eq!(watcher.observer(), ObserverKind::Detached);
    assert!(host.pending_frames.is_empty());
    assert!(host.pending_timers.is_empty());
    assert_eq!(host.observer, MockObserver::None);
    assert_eq!(host.disconnects, 1);
}

#[test]
fn js_loop_keeps_one_frame_outstanding() {
    let mut host = MockHost::new();
    let mut js = JsLoop::start(&mut host);
    assert!(js.is_scheduled());

    let first = host.take_frames()[0];
    assert!(js.tick(&mut host, first, 0.0, 120.0, 1000.0, Orientation::Horizontal, 0.25));
    assert!(js.is_scheduled());
    assert!(!js.owns(first));
    assert_eq!(host.pending_frames.len(), 1);

    js.suspend(&mut host);
    assert!(!js.is_scheduled());
    assert!(host.pending_frames.is_empty());

    js.resume(&mut host);
    assert!(js.is_scheduled());
    assert_eq!(host.frame_requests, 3);
}

#[test]
fn flushing_a_deferred_touch_applies_it_now() {
    let mut host = MockHost::new();
    let mut handler = InteractionHandler::new();
    handler.touch(&mut host, true);
    let frame = host.pending_frames[0];

    assert_eq!(handler.flush(&mut host), Some(true));
    assert!(handler.is_hovered());
    assert_eq!(host.cancelled_frames, vec![frame]);
    assert_eq!(handler.claim_frame(frame), None);
    assert_eq!(handler.flush(&mut host), None);
}
