// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag controller: gesture state machine, target reconciliation, and
//! notice emission.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use dragline_geometry::{point_inside, relative_position};
use dragline_registry::{
    NoticeKind, Protocol, RegionFlags, RegionId, Registry, ScrollSource,
};

use crate::activity::{ActivityStore, DragStatus, ReceiveStatus};
use crate::types::{
    Counterpart, GestureSample, GestureState, MonitorPoint, Notice, TrackingStatus,
};

/// The in-progress drag, if any. At most one exists system-wide.
///
/// Created on drag start and destroyed on end or cancel; `receiver` and
/// `monitors` are replaced wholesale on every move so they always reflect
/// the last-known drag point.
#[derive(Clone, Debug)]
pub struct DragTracker {
    /// The region being dragged.
    pub dragged: RegionId,
    /// Shared-space position of the initiating touch, captured once.
    pub screen_start: Point,
    /// Container-space position of the initiating touch, captured once.
    pub parent_start: Point,
    /// Shared-space position of the most recent sample.
    pub last_screen: Point,
    /// The receptive region currently under the drag point.
    pub receiver: Option<RegionId>,
    /// Monitoring regions currently containing the drag point, in
    /// registration order.
    pub monitors: SmallVec<[RegionId; 4]>,
}

/// Coordinates a [`Registry`] with the single active drag gesture.
///
/// This is the system's one entry point for mutation: registration and
/// layout reports flow through it so that removing the dragged or receiving
/// region mid-drag can force the matching reset, and the two gesture methods
/// are the only paths that change drag state.
///
/// Each gesture method returns the transition's protocol callbacks as an
/// ordered [`Notice`] sequence; deliver it with
/// [`dispatch::run`](crate::dispatch::run). Regions only appear in the
/// sequence for [`NoticeKind`]s they subscribed to, but tracker and activity
/// state advance regardless of subscriptions.
///
/// ## Usage
///
/// ```rust
/// use kurbo::{Point, Rect, Vec2};
/// use dragline_registry::{NoticeKind, NoticeSet, Protocol};
/// use dragline_tracker::{DragController, GestureSample, GestureState};
///
/// let mut controller: DragController<&'static str> = DragController::new();
///
/// let card = controller.register(None, None);
/// controller.report_measurements(card, Rect::new(0.0, 0.0, 40.0, 40.0));
/// controller.update_protocol(
///     card,
///     Protocol {
///         drag_payload: Some("card"),
///         subscriptions: NoticeSet::DRAGGED,
///         ..Default::default()
///     },
/// );
///
/// let seq = controller.on_gesture_state_change(
///     card,
///     GestureState::Active,
///     GestureSample {
///         local: Point::new(10.0, 10.0),
///         parent: Point::new(10.0, 10.0),
///         screen: Point::new(10.0, 10.0),
///         translation: Vec2::ZERO,
///     },
/// );
/// assert_eq!(seq[0].kind, NoticeKind::DragStart);
/// assert!(controller.tracking_status().dragging);
/// ```
pub struct DragController<P> {
    registry: Registry<P>,
    tracker: Option<DragTracker>,
    activity: ActivityStore,
}

impl<P> core::fmt::Debug for DragController<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragController")
            .field("registry", &self.registry)
            .field("tracker", &self.tracker)
            .field("activity", &self.activity)
            .finish()
    }
}

impl<P> Default for DragController<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DragController<P> {
    /// Create a controller with an empty registry and no active drag.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            tracker: None,
            activity: ActivityStore::new(),
        }
    }

    /// Register a region; see [`Registry::register`].
    ///
    /// Also creates the region's default [`ActivityRecord`](crate::ActivityRecord).
    pub fn register(
        &mut self,
        parent: Option<RegionId>,
        scroll_source: Option<ScrollSource>,
    ) -> RegionId {
        let id = self.registry.register(parent, scroll_source);
        self.activity.insert_default(id);
        id
    }

    /// Replace a region's protocol; see [`Registry::update_protocol`].
    pub fn update_protocol(&mut self, id: RegionId, protocol: Protocol<P>) {
        self.registry.update_protocol(id, protocol);
    }

    /// Report a region's measurements; see [`Registry::report_measurements`].
    pub fn report_measurements(&mut self, id: RegionId, measurements: Rect) {
        self.registry.report_measurements(id, measurements);
    }

    /// Read access to the underlying registry.
    pub fn registry(&self) -> &Registry<P> {
        &self.registry
    }

    /// The in-progress drag, if any.
    pub fn tracker(&self) -> Option<&DragTracker> {
        self.tracker.as_ref()
    }

    /// A region's observable activity, or `None` for stale ids.
    pub fn activity(&self, id: RegionId) -> Option<&crate::ActivityRecord> {
        self.activity.get(id)
    }

    /// Global drag/receive snapshot.
    pub fn tracking_status(&self) -> TrackingStatus {
        TrackingStatus {
            dragging: self.tracker.is_some(),
            receiving: self.tracker.as_ref().is_some_and(|t| t.receiver.is_some()),
        }
    }

    /// Complete a region's post-drag settle.
    ///
    /// Called by the rendering collaborator once its release animation is
    /// done; transitions `Released` back to `Inactive` and zeroes the drag
    /// offset. A no-op in any other state.
    pub fn settle(&mut self, id: RegionId) {
        if let Some(record) = self.activity.get_mut(id)
            && record.drag_status == DragStatus::Released
        {
            record.drag_status = DragStatus::Inactive;
            record.drag_offset = Vec2::ZERO;
        }
    }
}

impl<P: Clone> DragController<P> {
    /// Remove a region; see [`Registry::unregister`].
    ///
    /// Removing the currently dragged region forces a full drag reset;
    /// removing the current receiver forces a receiver reset only. Returned
    /// notices cover the counterparts of the removed region; the removed
    /// region itself is never addressed.
    pub fn unregister(&mut self, id: RegionId) -> Vec<Notice<P>> {
        let mut seq = Vec::new();
        if !self.registry.is_alive(id) {
            return seq;
        }
        if let Some(tracker) = self.tracker.clone() {
            if tracker.dragged == id {
                let screen = tracker.last_screen;
                let dragged_part = self.dragged_counterpart(id);
                if let Some(receiver) = tracker.receiver {
                    self.push_notice(
                        &mut seq,
                        receiver,
                        NoticeKind::ReceiveDragExit,
                        screen,
                        Some(dragged_part.clone()),
                        None,
                    );
                    self.clear_receive(receiver);
                }
                for monitor in &tracker.monitors {
                    let point = self.monitor_point(*monitor, screen);
                    self.push_notice(
                        &mut seq,
                        *monitor,
                        NoticeKind::MonitorDragEnd,
                        screen,
                        Some(dragged_part.clone()),
                        point,
                    );
                }
                self.tracker = None;
            } else if tracker.receiver == Some(id) {
                let receiver_part = self.receiver_counterpart(id);
                self.push_notice(
                    &mut seq,
                    tracker.dragged,
                    NoticeKind::DragExit,
                    tracker.last_screen,
                    Some(receiver_part),
                    None,
                );
                if let Some(t) = &mut self.tracker {
                    t.receiver = None;
                }
            } else if tracker.monitors.contains(&id)
                && let Some(t) = &mut self.tracker
            {
                t.monitors.retain(|m| *m != id);
            }
        }
        self.registry.unregister(id);
        self.activity.remove(id);
        seq
    }

    /// Feed a recognizer state transition for `id`.
    ///
    /// - `Active` with no drag in progress attempts to start one (rejected
    ///   unless `id` is draggable, measured, and `sample.local` is inside
    ///   its own bounds).
    /// - `Active` for the region already being dragged is a move update.
    /// - `Ended` attempts a drop; `Cancelled`/`Failed` end without one.
    /// - Everything else, and any event for a region other than the dragged
    ///   one while a drag is active, is ignored.
    pub fn on_gesture_state_change(
        &mut self,
        id: RegionId,
        state: GestureState,
        sample: GestureSample,
    ) -> Vec<Notice<P>> {
        match state {
            GestureState::Began => Vec::new(),
            GestureState::Active => match &self.tracker {
                Some(t) if t.dragged == id => self.drag_move(sample),
                Some(_) => Vec::new(),
                None => self.start_drag(id, sample),
            },
            GestureState::Ended => match &self.tracker {
                Some(t) if t.dragged == id => {
                    let screen = t.screen_start + sample.translation;
                    self.end_drag(screen, true)
                }
                _ => Vec::new(),
            },
            GestureState::Cancelled | GestureState::Failed => match &self.tracker {
                Some(t) if t.dragged == id => {
                    let screen = t.last_screen;
                    self.end_drag(screen, false)
                }
                _ => Vec::new(),
            },
        }
    }

    /// Feed a continuous pointer-move sample for `id`.
    ///
    /// Only moves the drag if `id` is the region currently being dragged;
    /// samples for any other region are ignored.
    pub fn on_gesture_event(&mut self, id: RegionId, sample: GestureSample) -> Vec<Notice<P>> {
        match &self.tracker {
            Some(t) if t.dragged == id => self.drag_move(sample),
            _ => Vec::new(),
        }
    }

    fn start_drag(&mut self, id: RegionId, sample: GestureSample) -> Vec<Notice<P>> {
        let mut seq = Vec::new();
        let Some(flags) = self.registry.flags(id) else {
            return seq;
        };
        if !flags.contains(RegionFlags::DRAGGABLE) {
            return seq;
        }
        let Some(measurements) = self.registry.measurements(id) else {
            return seq;
        };
        // Unconstrained-distance recognizers can report a touch outside the
        // region; such a start is rejected outright.
        let own = Rect::from_origin_size(Point::ZERO, measurements.size());
        if !point_inside(sample.local, own) {
            return seq;
        }
        self.tracker = Some(DragTracker {
            dragged: id,
            screen_start: sample.screen - sample.translation,
            parent_start: sample.parent - sample.translation,
            last_screen: sample.screen,
            receiver: None,
            monitors: SmallVec::new(),
        });
        if let Some(record) = self.activity.get_mut(id) {
            record.drag_status = DragStatus::Dragging;
            record.drag_offset = sample.translation;
        }
        self.push_notice(&mut seq, id, NoticeKind::DragStart, sample.screen, None, None);
        seq
    }

    fn drag_move(&mut self, sample: GestureSample) -> Vec<Notice<P>> {
        let mut seq = Vec::new();
        let Some(tracker) = self.tracker.clone() else {
            return seq;
        };
        let dragged = tracker.dragged;
        // Translation is relative to the anchored start, so scrolls under
        // the pointer do not corrupt the drag point.
        let screen = tracker.screen_start + sample.translation;
        if let Some(record) = self.activity.get_mut(dragged) {
            record.drag_offset = sample.translation;
        }
        let targets = self.registry.find_targets(screen, Some(dragged));
        let dragged_part = self.dragged_counterpart(dragged);

        // Monitors first: exits in old-set order, then enter/over in new-set
        // order.
        for monitor in &tracker.monitors {
            if !targets.monitors.contains(monitor) {
                let point = self.monitor_point(*monitor, screen);
                self.push_notice(
                    &mut seq,
                    *monitor,
                    NoticeKind::MonitorDragExit,
                    screen,
                    Some(dragged_part.clone()),
                    point,
                );
            }
        }
        for monitor in &targets.monitors {
            let kind = if tracker.monitors.contains(monitor) {
                NoticeKind::MonitorDragOver
            } else {
                NoticeKind::MonitorDragEnter
            };
            let point = self.monitor_point(*monitor, screen);
            self.push_notice(
                &mut seq,
                *monitor,
                kind,
                screen,
                Some(dragged_part.clone()),
                point,
            );
        }

        match (tracker.receiver, targets.receiver) {
            (Some(old), Some(new)) if old == new => {
                self.push_notice(
                    &mut seq,
                    dragged,
                    NoticeKind::DragOver,
                    screen,
                    Some(self.receiver_counterpart(new)),
                    None,
                );
                self.push_notice(
                    &mut seq,
                    new,
                    NoticeKind::ReceiveDragOver,
                    screen,
                    Some(dragged_part.clone()),
                    None,
                );
                self.update_receive(new, screen);
            }
            (Some(old), Some(new)) => {
                self.push_notice(
                    &mut seq,
                    dragged,
                    NoticeKind::DragExit,
                    screen,
                    Some(self.receiver_counterpart(old)),
                    None,
                );
                self.push_notice(
                    &mut seq,
                    old,
                    NoticeKind::ReceiveDragExit,
                    screen,
                    Some(dragged_part.clone()),
                    None,
                );
                self.clear_receive(old);
                self.push_notice(
                    &mut seq,
                    dragged,
                    NoticeKind::DragEnter,
                    screen,
                    Some(self.receiver_counterpart(new)),
                    None,
                );
                self.push_notice(
                    &mut seq,
                    new,
                    NoticeKind::ReceiveDragEnter,
                    screen,
                    Some(dragged_part.clone()),
                    None,
                );
                self.update_receive(new, screen);
            }
            (None, Some(new)) => {
                self.push_notice(
                    &mut seq,
                    dragged,
                    NoticeKind::DragEnter,
                    screen,
                    Some(self.receiver_counterpart(new)),
                    None,
                );
                self.push_notice(
                    &mut seq,
                    new,
                    NoticeKind::ReceiveDragEnter,
                    screen,
                    Some(dragged_part.clone()),
                    None,
                );
                self.update_receive(new, screen);
            }
            (Some(old), None) => {
                self.push_notice(
                    &mut seq,
                    dragged,
                    NoticeKind::DragExit,
                    screen,
                    Some(self.receiver_counterpart(old)),
                    None,
                );
                self.push_notice(
                    &mut seq,
                    old,
                    NoticeKind::ReceiveDragExit,
                    screen,
                    Some(dragged_part.clone()),
                    None,
                );
                self.clear_receive(old);
            }
            (None, None) => {
                self.push_notice(&mut seq, dragged, NoticeKind::Drag, screen, None, None);
            }
        }

        if let Some(t) = &mut self.tracker {
            t.last_screen = screen;
            t.receiver = targets.receiver;
            t.monitors = targets.monitors.iter().copied().collect();
        }
        seq
    }

    fn end_drag(&mut self, screen: Point, attempt_drop: bool) -> Vec<Notice<P>> {
        let mut seq = Vec::new();
        let Some(tracker) = self.tracker.take() else {
            return seq;
        };
        let dragged = tracker.dragged;
        let dragged_part = self.dragged_counterpart(dragged);
        match tracker.receiver {
            Some(receiver) if attempt_drop => {
                self.push_notice(
                    &mut seq,
                    dragged,
                    NoticeKind::DragDrop,
                    screen,
                    Some(self.receiver_counterpart(receiver)),
                    None,
                );
                self.push_notice(
                    &mut seq,
                    receiver,
                    NoticeKind::ReceiveDragDrop,
                    screen,
                    Some(dragged_part.clone()),
                    None,
                );
                for monitor in &tracker.monitors {
                    let point = self.monitor_point(*monitor, screen);
                    self.push_notice(
                        &mut seq,
                        *monitor,
                        NoticeKind::MonitorDragDrop,
                        screen,
                        Some(dragged_part.clone()),
                        point,
                    );
                }
                self.clear_receive(receiver);
            }
            receiver => {
                // Ended with no receiver behaves as the cancel case.
                self.push_notice(&mut seq, dragged, NoticeKind::DragEnd, screen, None, None);
                if let Some(receiver) = receiver {
                    self.push_notice(
                        &mut seq,
                        receiver,
                        NoticeKind::ReceiveDragExit,
                        screen,
                        Some(dragged_part.clone()),
                        None,
                    );
                    self.clear_receive(receiver);
                }
                for monitor in &tracker.monitors {
                    let point = self.monitor_point(*monitor, screen);
                    self.push_notice(
                        &mut seq,
                        *monitor,
                        NoticeKind::MonitorDragEnd,
                        screen,
                        Some(dragged_part.clone()),
                        point,
                    );
                }
            }
        }
        if let Some(record) = self.activity.get_mut(dragged) {
            record.drag_status = DragStatus::Released;
        }
        seq
    }

    fn push_notice(
        &self,
        seq: &mut Vec<Notice<P>>,
        region: RegionId,
        kind: NoticeKind,
        screen: Point,
        counterpart: Option<Counterpart<P>>,
        monitor: Option<MonitorPoint>,
    ) {
        let Some(record) = self.registry.region(region) else {
            return;
        };
        if !record.protocol.wants(kind) {
            return;
        }
        seq.push(Notice {
            region,
            kind,
            screen,
            counterpart,
            monitor,
        });
    }

    fn dragged_counterpart(&self, dragged: RegionId) -> Counterpart<P> {
        Counterpart {
            region: dragged,
            parent: self.registry.parent_of(dragged),
            payload: self
                .registry
                .region(dragged)
                .and_then(|r| r.protocol.effective_drag_payload().cloned()),
        }
    }

    fn receiver_counterpart(&self, receiver: RegionId) -> Counterpart<P> {
        Counterpart {
            region: receiver,
            parent: self.registry.parent_of(receiver),
            payload: self
                .registry
                .region(receiver)
                .and_then(|r| r.protocol.effective_receiver_payload().cloned()),
        }
    }

    fn monitor_point(&self, monitor: RegionId, screen: Point) -> Option<MonitorPoint> {
        let bounds = self.registry.absolute_bounds(monitor)?;
        let rp = relative_position(screen, bounds);
        Some(MonitorPoint {
            position: rp.position,
            ratio: rp.ratio,
        })
    }

    fn update_receive(&mut self, receiver: RegionId, screen: Point) {
        let Some(bounds) = self.registry.absolute_bounds(receiver) else {
            return;
        };
        let rp = relative_position(screen, bounds);
        if let Some(record) = self.activity.get_mut(receiver) {
            record.receive_status = ReceiveStatus::Receiving;
            record.receive_offset = rp.position;
            record.receive_ratio = rp.ratio;
        }
    }

    fn clear_receive(&mut self, receiver: RegionId) {
        if let Some(record) = self.activity.get_mut(receiver) {
            record.receive_status = ReceiveStatus::Inactive;
            record.receive_offset = Vec2::ZERO;
            record.receive_ratio = Vec2::ZERO;
        }
    }
}
