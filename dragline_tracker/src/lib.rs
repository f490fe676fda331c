// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragline Tracker: the single-drag gesture state machine over a
//! [`dragline_registry::Registry`].
//!
//! The tracker is the coordinating half of Dragline. A [`DragController`]
//! owns the region registry, the at-most-one [`DragTracker`], and the
//! per-region [`ActivityRecord`]s, and translates the external gesture
//! stream into drag lifecycle transitions:
//!
//! - [`DragController::on_gesture_state_change`] handles recognizer
//!   transitions (`Began`/`Active`/`Ended`/`Cancelled`/`Failed`); the first
//!   `Active` on a draggable region starts the drag.
//! - [`DragController::on_gesture_event`] handles continuous pointer-move
//!   samples, re-resolving the receiver and monitor set under the point on
//!   every sample and reconciling enter/over/exit transitions.
//!
//! Every transition's protocol callbacks come back as an ordered [`Notice`]
//! sequence; deliver it to the application's handlers with
//! [`dispatch::run`], which supports early stop via
//! [`dispatch::Outcome::Stop`].
//!
//! All of this is single-threaded and synchronous: state changes happen on
//! the loop that delivers gesture and layout events, and there is no
//! internal queueing or batching.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use dragline_registry::{NoticeKind, NoticeSet, Protocol};
//! use dragline_tracker::dispatch::{self, Outcome};
//! use dragline_tracker::{DragController, GestureSample, GestureState};
//!
//! let mut controller: DragController<&'static str> = DragController::new();
//!
//! let card = controller.register(None, None);
//! controller.report_measurements(card, Rect::new(0.0, 0.0, 40.0, 40.0));
//! controller.update_protocol(
//!     card,
//!     Protocol {
//!         drag_payload: Some("card"),
//!         subscriptions: NoticeSet::DRAGGED,
//!         ..Default::default()
//!     },
//! );
//!
//! let trash = controller.register(None, None);
//! controller.report_measurements(trash, Rect::new(200.0, 0.0, 300.0, 100.0));
//! controller.update_protocol(
//!     trash,
//!     Protocol {
//!         subscriptions: NoticeSet::RECEIVER,
//!         ..Default::default()
//!     },
//! );
//!
//! let at = |screen: Point| GestureSample {
//!     local: Point::new(20.0, 20.0),
//!     parent: screen,
//!     screen,
//!     translation: screen - Point::new(20.0, 20.0),
//! };
//!
//! controller.on_gesture_state_change(card, GestureState::Active, at(Point::new(20.0, 20.0)));
//! let seq = controller.on_gesture_event(card, at(Point::new(250.0, 50.0)));
//! dispatch::run(&seq, &mut (), |notice, _| {
//!     match notice.kind {
//!         NoticeKind::DragEnter => { /* highlight the card */ }
//!         NoticeKind::ReceiveDragEnter => { /* highlight the trash */ }
//!         _ => {}
//!     }
//!     Outcome::Continue
//! });
//!
//! let seq =
//!     controller.on_gesture_state_change(card, GestureState::Ended, at(Point::new(250.0, 50.0)));
//! assert_eq!(seq[0].kind, NoticeKind::DragDrop);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod activity;
pub mod dispatch;
mod tracker;
mod types;

pub use activity::{ActivityRecord, ActivityStore, DragStatus, ReceiveStatus};
pub use tracker::{DragController, DragTracker};
pub use types::{
    Counterpart, GestureSample, GestureState, MonitorPoint, Notice, TrackingStatus,
};
