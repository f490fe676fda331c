// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full drag lifecycle: start, move across two receivers, drop.
//!
//! This demo wires a card, two bins, and a monitoring pane into a
//! [`DragController`], then replays a scripted gesture and prints every
//! notice the controller emits along the way.
//!
//! Run:
//! - `cargo run -p dragline_demos --example drag_basics`

use kurbo::{Point, Rect, Vec2};

use dragline_registry::{NoticeSet, Protocol, RegionId};
use dragline_tracker::dispatch::{self, Outcome};
use dragline_tracker::{DragController, GestureSample, GestureState, Notice};

fn print_seq(label: &str, names: &[(RegionId, &str)], seq: &[Notice<&'static str>]) {
    println!("\n== {label} ==");
    if seq.is_empty() {
        println!("  (no notices)");
    }
    for notice in seq {
        let region = names
            .iter()
            .find(|(id, _)| *id == notice.region)
            .map(|(_, name)| *name)
            .unwrap_or("?");
        print!(
            "  {:?} -> {} @ ({:.0}, {:.0})",
            notice.kind, region, notice.screen.x, notice.screen.y
        );
        if let Some(counterpart) = &notice.counterpart {
            let other = names
                .iter()
                .find(|(id, _)| *id == counterpart.region)
                .map(|(_, name)| *name)
                .unwrap_or("?");
            print!("  counterpart={other} payload={:?}", counterpart.payload);
        }
        if let Some(point) = notice.monitor {
            print!("  ratio=({:.2}, {:.2})", point.ratio.x, point.ratio.y);
        }
        println!();
    }
}

fn main() {
    let mut controller: DragController<&'static str> = DragController::new();

    // A draggable card sitting at the top-left.
    let card = controller.register(None, None);
    controller.report_measurements(card, Rect::new(10.0, 10.0, 60.0, 60.0));
    controller.update_protocol(
        card,
        Protocol {
            drag_payload: Some("card #1"),
            subscriptions: NoticeSet::DRAGGED,
            ..Default::default()
        },
    );

    // Two non-overlapping bins that can receive the card.
    let inbox = controller.register(None, None);
    controller.report_measurements(inbox, Rect::new(100.0, 0.0, 220.0, 120.0));
    controller.update_protocol(
        inbox,
        Protocol {
            receiver_payload: Some("inbox"),
            subscriptions: NoticeSet::RECEIVER,
            ..Default::default()
        },
    );
    let archive = controller.register(None, None);
    controller.report_measurements(archive, Rect::new(260.0, 0.0, 380.0, 120.0));
    controller.update_protocol(
        archive,
        Protocol {
            receiver_payload: Some("archive"),
            subscriptions: NoticeSet::RECEIVER,
            ..Default::default()
        },
    );

    // A pane monitoring the whole strip, e.g. to drive auto-scroll.
    let pane = controller.register(None, None);
    controller.report_measurements(pane, Rect::new(0.0, 0.0, 400.0, 120.0));
    controller.update_protocol(
        pane,
        Protocol {
            monitoring: Some(true),
            draggable: Some(false),
            receptive: Some(false),
            subscriptions: NoticeSet::MONITOR,
            ..Default::default()
        },
    );

    let names = [
        (card, "card"),
        (inbox, "inbox"),
        (archive, "archive"),
        (pane, "pane"),
    ];

    // The touch lands in the middle of the card at screen (35, 35).
    let anchor = Point::new(35.0, 35.0);
    let at = |screen: Point| GestureSample {
        local: Point::new(25.0, 25.0),
        parent: screen,
        screen,
        translation: screen - anchor,
    };

    let seq = controller.on_gesture_state_change(card, GestureState::Active, at(anchor));
    print_seq("press and hold the card", &names, &seq);

    for screen in [
        Point::new(80.0, 40.0),   // over the pane only
        Point::new(160.0, 60.0),  // into the inbox
        Point::new(200.0, 60.0),  // still over the inbox
        Point::new(320.0, 60.0),  // across to the archive
    ] {
        let seq = controller.on_gesture_event(card, at(screen));
        print_seq("drag", &names, &seq);
    }

    let seq = controller.on_gesture_state_change(
        card,
        GestureState::Ended,
        at(Point::new(320.0, 60.0)),
    );
    print_seq("release over the archive", &names, &seq);

    // Typical delivery: fan out on the notice kind. Here we only count.
    let mut drops = 0_u32;
    dispatch::run(&seq, &mut drops, |notice, drops| {
        if matches!(
            notice.kind,
            dragline_registry::NoticeKind::ReceiveDragDrop
        ) {
            *drops += 1;
        }
        Outcome::Continue
    });
    println!("\ndrops delivered: {drops}");

    println!(
        "card offset after release: {:?}",
        controller.activity(card).map(|r| r.drag_offset)
    );
    controller.settle(card);
    println!(
        "card offset after settle:  {:?}",
        controller.activity(card).map(|r| r.drag_offset)
    );
    assert_eq!(
        controller.activity(card).map(|r| r.drag_offset),
        Some(Vec2::ZERO)
    );
}
