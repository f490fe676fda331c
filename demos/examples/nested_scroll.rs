// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Absolute-position resolution under nesting and live scrolling.
//!
//! Builds a scrollable list containing a nested sub-list of drop slots,
//! then scrolls the outer container mid-drag and shows how the resolved
//! bounds (and therefore the receiver under the unchanged pointer) shift
//! with no re-registration or re-measurement.
//!
//! Run:
//! - `cargo run -p dragline_demos --example nested_scroll`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};

use dragline_geometry::relative_position;
use dragline_registry::{NoticeSet, Protocol, RegionId, Registry};
use dragline_tracker::{DragController, GestureSample, GestureState};

fn slot_label(receiver: Option<RegionId>, top: RegionId) -> &'static str {
    match receiver {
        Some(r) if r == top => "top",
        Some(_) => "bottom",
        None => "(none)",
    }
}

fn describe(registry: &Registry<&'static str>, names: &[(RegionId, &str)]) {
    for (id, name) in names {
        match registry.absolute_bounds(*id) {
            Some(rect) => println!(
                "  {name:8} -> ({:.0}, {:.0}) {:.0}x{:.0}",
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height()
            ),
            None => println!("  {name:8} -> (not resolvable)"),
        }
    }
}

fn main() {
    let mut controller: DragController<&'static str> = DragController::new();

    // Outer scrollable list filling a 200x200 viewport.
    let scroll = Rc::new(Cell::new(Vec2::ZERO));
    let list = controller.register(None, Some(scroll.clone()));
    controller.report_measurements(list, Rect::new(0.0, 0.0, 200.0, 200.0));

    // A sub-list nested in the scrolled content, holding two slots.
    let sublist = controller.register(Some(list), None);
    controller.report_measurements(sublist, Rect::new(20.0, 40.0, 180.0, 400.0));

    let slot = |controller: &mut DragController<&'static str>, parent, rect, tag| {
        let id = controller.register(Some(parent), None);
        controller.report_measurements(id, rect);
        controller.update_protocol(
            id,
            Protocol {
                receiver_payload: Some(tag),
                subscriptions: NoticeSet::RECEIVER,
                ..Default::default()
            },
        );
        id
    };
    let top = slot(&mut controller, sublist, Rect::new(10.0, 10.0, 150.0, 90.0), "top");
    let bottom = slot(&mut controller, sublist, Rect::new(10.0, 180.0, 150.0, 260.0), "bottom");

    // A free-floating chip outside the list.
    let chip = controller.register(None, None);
    controller.report_measurements(chip, Rect::new(220.0, 10.0, 260.0, 50.0));
    controller.update_protocol(
        chip,
        Protocol {
            drag_payload: Some("chip"),
            subscriptions: NoticeSet::DRAGGED,
            ..Default::default()
        },
    );

    let names = [
        (list, "list"),
        (sublist, "sublist"),
        (top, "top"),
        (bottom, "bottom"),
        (chip, "chip"),
    ];

    println!("resolved bounds, unscrolled:");
    describe(controller.registry(), &names);

    // Start dragging the chip and park the pointer at (80, 80), which is
    // inside the top slot right now.
    let anchor = Point::new(240.0, 30.0);
    let at = |screen: Point| GestureSample {
        local: Point::new(20.0, 20.0),
        parent: screen,
        screen,
        translation: screen - anchor,
    };
    controller.on_gesture_state_change(chip, GestureState::Active, at(anchor));
    let park = Point::new(80.0, 80.0);
    let seq = controller.on_gesture_event(chip, at(park));
    println!(
        "\npointer parked at (80, 80): {:?}",
        seq.iter().map(|n| n.kind).collect::<Vec<_>>()
    );
    println!(
        "receiver: {}",
        slot_label(controller.tracker().and_then(|t| t.receiver), top)
    );

    // An auto-scroll driver would watch where the pointer sits within the
    // list's viewport and scroll once the ratio nears an edge.
    if let Some(viewport) = controller.registry().absolute_bounds(list) {
        let ratio = relative_position(park, viewport).ratio;
        println!("pointer ratio within the list viewport: ({:.2}, {:.2})", ratio.x, ratio.y);
    }

    // Scroll the outer list down 170 content pixels. Nothing re-registers
    // and nothing re-measures; the next query just sees new bounds.
    scroll.set(Vec2::new(0.0, 170.0));
    println!("\nresolved bounds after scrolling to {:?}:", scroll.get());
    describe(controller.registry(), &names);

    // The same pointer position now sits over the bottom slot; the next
    // sample (even with zero movement) reconciles the receiver.
    let seq = controller.on_gesture_event(chip, at(park));
    println!(
        "\nsame pointer after the scroll: {:?}",
        seq.iter().map(|n| n.kind).collect::<Vec<_>>()
    );
    println!(
        "receiver: {}",
        slot_label(controller.tracker().and_then(|t| t.receiver), top)
    );

    let seq = controller.on_gesture_state_change(chip, GestureState::Ended, at(park));
    println!(
        "release: {:?}",
        seq.iter().map(|n| n.kind).collect::<Vec<_>>()
    );
}
