// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a notice sequence and honor stop outcomes.
//!
//! The gesture state machine emits each transition's callbacks as an ordered
//! [`Notice`] sequence; [`run`] executes a handler for every entry and
//! applies simple propagation rules. It is deliberately minimal:
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - The return value from [`run`] reports where propagation stopped (if at all).
//! - Higher-level semantics such as "drop accepted" live on the event payload
//!   you pass to [`run`], not in [`Outcome`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use dragline_registry::{NoticeKind, NoticeSet, Protocol};
//! use dragline_tracker::dispatch::{self, Outcome};
//! use dragline_tracker::{DragController, GestureSample, GestureState};
//!
//! let mut controller: DragController<()> = DragController::new();
//! let chip = controller.register(None, None);
//! controller.report_measurements(chip, Rect::new(0.0, 0.0, 40.0, 40.0));
//! controller.update_protocol(
//!     chip,
//!     Protocol {
//!         subscriptions: NoticeSet::DRAG_START,
//!         ..Default::default()
//!     },
//! );
//!
//! let seq = controller.on_gesture_state_change(
//!     chip,
//!     GestureState::Active,
//!     GestureSample {
//!         local: Point::new(10.0, 10.0),
//!         parent: Point::new(10.0, 10.0),
//!         screen: Point::new(10.0, 10.0),
//!         translation: Vec2::ZERO,
//!     },
//! );
//!
//! let mut started = false;
//! let stopped = dispatch::run(&seq, &mut started, |notice, started| {
//!     if notice.kind == NoticeKind::DragStart {
//!         *started = true;
//!     }
//!     Outcome::Continue
//! });
//! assert!(stopped.is_none());
//! assert!(started);
//! ```

use crate::types::Notice;

/// A handler's propagation decision.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Keep delivering the remaining notices.
    Continue,
    /// Abort delivery immediately.
    Stop,
}

/// Run a handler over a notice sequence and honor stop outcomes.
///
/// ## Usage
///
/// - `seq`: a sequence produced by the gesture entry points on
///   [`DragController`](crate::DragController); notices are already in the
///   mandated delivery order.
/// - `event`: a mutable payload carried across handler calls; you own its
///   shape.
/// - `handler`: your per-notice callback, typically a match on
///   [`Notice::kind`] fanning out to the application's protocol handlers.
///
/// Returns `None` if the full sequence was delivered, or `Some(n)` with the
/// last visited [`Notice`] if a handler returned [`Outcome::Stop`].
pub fn run<'a, P, E>(
    seq: &'a [Notice<P>],
    event: &mut E,
    mut handler: impl FnMut(&Notice<P>, &mut E) -> Outcome,
) -> Option<&'a Notice<P>> {
    for notice in seq {
        match handler(notice, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(notice),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use dragline_registry::{NoticeKind, Registry};
    use kurbo::Point;

    fn mk_seq() -> Vec<Notice<()>> {
        let mut registry: Registry<()> = Registry::new();
        let a = registry.register(None, None);
        let b = registry.register(None, None);
        vec![
            Notice {
                region: a,
                kind: NoticeKind::DragExit,
                screen: Point::new(1.0, 1.0),
                counterpart: None,
                monitor: None,
            },
            Notice {
                region: b,
                kind: NoticeKind::ReceiveDragExit,
                screen: Point::new(1.0, 1.0),
                counterpart: None,
                monitor: None,
            },
            Notice {
                region: a,
                kind: NoticeKind::DragEnter,
                screen: Point::new(1.0, 1.0),
                counterpart: None,
                monitor: None,
            },
        ]
    }

    #[test]
    fn continue_visits_all() {
        let seq = mk_seq();
        let mut seen: Vec<NoticeKind> = Vec::new();
        let stopped = run(&seq, &mut seen, |n, seen| {
            seen.push(n.kind);
            Outcome::Continue
        });
        assert!(stopped.is_none());
        assert_eq!(
            seen,
            vec![
                NoticeKind::DragExit,
                NoticeKind::ReceiveDragExit,
                NoticeKind::DragEnter,
            ]
        );
    }

    #[test]
    fn stop_aborts_delivery() {
        let seq = mk_seq();
        let mut seen: Vec<NoticeKind> = Vec::new();
        let stopped = run(&seq, &mut seen, |n, seen| {
            seen.push(n.kind);
            if n.kind == NoticeKind::ReceiveDragExit {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        assert_eq!(stopped.map(|n| n.kind), Some(NoticeKind::ReceiveDragExit));
        assert_eq!(seen, vec![NoticeKind::DragExit, NoticeKind::ReceiveDragExit]);
    }

    #[test]
    fn empty_sequence_is_a_clean_pass() {
        let seq: Vec<Notice<()>> = Vec::new();
        let stopped = run(&seq, &mut (), |_, _| Outcome::Stop);
        assert!(stopped.is_none());
    }
}
