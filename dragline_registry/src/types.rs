// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the registry: region identifiers, capability flags, and
//! the callback/payload protocol.

use alloc::rc::Rc;
use core::cell::Cell;
use kurbo::Vec2;

/// Identifier for a registered region (generational).
///
/// Assigned by [`Registry::register`](crate::Registry::register) and stable
/// for the region's lifetime. A slot may be reused after unregistration, in
/// which case the generation is bumped so the old identifier goes stale
/// rather than aliasing the new region.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegionId(pub(crate) u32, pub(crate) u32);

impl RegionId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Live reference to a scrollable container's `{x, y}` scroll offset.
///
/// Owned and written by the container's external collaborator; the registry
/// only ever reads it, on every resolution query, so scrolls between queries
/// are always observed.
pub type ScrollSource = Rc<Cell<Vec2>>;

bitflags::bitflags! {
    /// Effective region capabilities, derived from a [`Protocol`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RegionFlags: u8 {
        /// Region can originate a drag.
        const DRAGGABLE  = 0b0000_0001;
        /// Region is a drop target.
        const RECEPTIVE  = 0b0000_0010;
        /// Region passively observes drags without receiving them.
        const MONITORING = 0b0000_0100;
    }
}

/// The protocol callbacks a region can declare.
///
/// The first seven fire on the dragged region, the next four on the current
/// receiver, and the rest on overlapping monitors. Each fires at most once
/// per logical transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NoticeKind {
    /// Drag began on this region.
    DragStart,
    /// Drag moved with no receiver under the point.
    Drag,
    /// Drag moved over a new receiver.
    DragEnter,
    /// Drag moved while staying over the same receiver.
    DragOver,
    /// Drag left the current receiver.
    DragExit,
    /// Drag ended or was cancelled without a drop.
    DragEnd,
    /// Drag ended over a receiver.
    DragDrop,
    /// A drag entered this receiver.
    ReceiveDragEnter,
    /// A drag moved while over this receiver.
    ReceiveDragOver,
    /// A drag left this receiver.
    ReceiveDragExit,
    /// A drag was dropped on this receiver.
    ReceiveDragDrop,
    /// A drag entered this monitor's bounds.
    MonitorDragEnter,
    /// A drag moved while inside this monitor's bounds.
    MonitorDragOver,
    /// A drag left this monitor's bounds.
    MonitorDragExit,
    /// A drag was dropped while inside this monitor's bounds.
    MonitorDragDrop,
    /// A drag ended without a drop while inside this monitor's bounds.
    MonitorDragEnd,
}

impl NoticeKind {
    /// The subscription bit corresponding to this kind.
    pub const fn flag(self) -> NoticeSet {
        match self {
            Self::DragStart => NoticeSet::DRAG_START,
            Self::Drag => NoticeSet::DRAG,
            Self::DragEnter => NoticeSet::DRAG_ENTER,
            Self::DragOver => NoticeSet::DRAG_OVER,
            Self::DragExit => NoticeSet::DRAG_EXIT,
            Self::DragEnd => NoticeSet::DRAG_END,
            Self::DragDrop => NoticeSet::DRAG_DROP,
            Self::ReceiveDragEnter => NoticeSet::RECEIVE_DRAG_ENTER,
            Self::ReceiveDragOver => NoticeSet::RECEIVE_DRAG_OVER,
            Self::ReceiveDragExit => NoticeSet::RECEIVE_DRAG_EXIT,
            Self::ReceiveDragDrop => NoticeSet::RECEIVE_DRAG_DROP,
            Self::MonitorDragEnter => NoticeSet::MONITOR_DRAG_ENTER,
            Self::MonitorDragOver => NoticeSet::MONITOR_DRAG_OVER,
            Self::MonitorDragExit => NoticeSet::MONITOR_DRAG_EXIT,
            Self::MonitorDragDrop => NoticeSet::MONITOR_DRAG_DROP,
            Self::MonitorDragEnd => NoticeSet::MONITOR_DRAG_END,
        }
    }
}

bitflags::bitflags! {
    /// Set of [`NoticeKind`]s a region has declared handlers for.
    ///
    /// Declaring a kind here is the data-model rendition of supplying the
    /// corresponding callback; the tracker only emits notices a region has
    /// declared, and capability inference (see [`Protocol::flags`]) keys off
    /// the drag/receive groups.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NoticeSet: u32 {
        /// `DragStart` subscription.
        const DRAG_START = 1 << 0;
        /// `Drag` subscription.
        const DRAG = 1 << 1;
        /// `DragEnter` subscription.
        const DRAG_ENTER = 1 << 2;
        /// `DragOver` subscription.
        const DRAG_OVER = 1 << 3;
        /// `DragExit` subscription.
        const DRAG_EXIT = 1 << 4;
        /// `DragEnd` subscription.
        const DRAG_END = 1 << 5;
        /// `DragDrop` subscription.
        const DRAG_DROP = 1 << 6;
        /// `ReceiveDragEnter` subscription.
        const RECEIVE_DRAG_ENTER = 1 << 7;
        /// `ReceiveDragOver` subscription.
        const RECEIVE_DRAG_OVER = 1 << 8;
        /// `ReceiveDragExit` subscription.
        const RECEIVE_DRAG_EXIT = 1 << 9;
        /// `ReceiveDragDrop` subscription.
        const RECEIVE_DRAG_DROP = 1 << 10;
        /// `MonitorDragEnter` subscription.
        const MONITOR_DRAG_ENTER = 1 << 11;
        /// `MonitorDragOver` subscription.
        const MONITOR_DRAG_OVER = 1 << 12;
        /// `MonitorDragExit` subscription.
        const MONITOR_DRAG_EXIT = 1 << 13;
        /// `MonitorDragDrop` subscription.
        const MONITOR_DRAG_DROP = 1 << 14;
        /// `MonitorDragEnd` subscription.
        const MONITOR_DRAG_END = 1 << 15;

        /// All dragged-region notices.
        const DRAGGED = Self::DRAG_START.bits()
            | Self::DRAG.bits()
            | Self::DRAG_ENTER.bits()
            | Self::DRAG_OVER.bits()
            | Self::DRAG_EXIT.bits()
            | Self::DRAG_END.bits()
            | Self::DRAG_DROP.bits();
        /// All receiver notices.
        const RECEIVER = Self::RECEIVE_DRAG_ENTER.bits()
            | Self::RECEIVE_DRAG_OVER.bits()
            | Self::RECEIVE_DRAG_EXIT.bits()
            | Self::RECEIVE_DRAG_DROP.bits();
        /// All monitor notices.
        const MONITOR = Self::MONITOR_DRAG_ENTER.bits()
            | Self::MONITOR_DRAG_OVER.bits()
            | Self::MONITOR_DRAG_EXIT.bits()
            | Self::MONITOR_DRAG_DROP.bits()
            | Self::MONITOR_DRAG_END.bits();
    }
}

/// A region's callback/payload protocol.
///
/// Capability booleans are tri-state: an explicit `Some(..)` always wins,
/// and `None` means "infer from the rest of the protocol" — see
/// [`Protocol::flags`]. Because flags are derived on demand, inference is
/// naturally recomputed whenever the protocol is replaced, not just at
/// registration.
#[derive(Clone, Debug)]
pub struct Protocol<P> {
    /// Explicit draggable override; inferred when `None`.
    pub draggable: Option<bool>,
    /// Explicit receptive override; inferred when `None`.
    pub receptive: Option<bool>,
    /// Explicit monitoring override; defaults to `false` when `None`.
    pub monitoring: Option<bool>,
    /// Generic payload, used as the fallback for both directions.
    pub payload: Option<P>,
    /// Payload delivered to receivers about this region when it is dragged.
    pub drag_payload: Option<P>,
    /// Payload delivered to dragged regions about this region when it receives.
    pub receiver_payload: Option<P>,
    /// Declared notice subscriptions.
    pub subscriptions: NoticeSet,
}

impl<P> Default for Protocol<P> {
    fn default() -> Self {
        Self {
            draggable: None,
            receptive: None,
            monitoring: None,
            payload: None,
            drag_payload: None,
            receiver_payload: None,
            subscriptions: NoticeSet::empty(),
        }
    }
}

impl<P> Protocol<P> {
    /// Effective capability flags.
    ///
    /// `draggable` defaults true when any dragged-region subscription or
    /// drag-side payload is present; `receptive` defaults true when any
    /// receiver subscription or receive-side payload is present. The generic
    /// `payload` counts toward both, mirroring its delivery fallback role.
    /// `monitoring` is never inferred.
    pub fn flags(&self) -> RegionFlags {
        let mut flags = RegionFlags::empty();
        let draggable = self.draggable.unwrap_or_else(|| {
            self.subscriptions.intersects(NoticeSet::DRAGGED)
                || self.drag_payload.is_some()
                || self.payload.is_some()
        });
        let receptive = self.receptive.unwrap_or_else(|| {
            self.subscriptions.intersects(NoticeSet::RECEIVER)
                || self.receiver_payload.is_some()
                || self.payload.is_some()
        });
        if draggable {
            flags |= RegionFlags::DRAGGABLE;
        }
        if receptive {
            flags |= RegionFlags::RECEPTIVE;
        }
        if self.monitoring.unwrap_or(false) {
            flags |= RegionFlags::MONITORING;
        }
        flags
    }

    /// Whether this region declared a handler for `kind`.
    pub fn wants(&self, kind: NoticeKind) -> bool {
        self.subscriptions.contains(kind.flag())
    }

    /// Payload describing this region in its dragged role, with the generic
    /// `payload` as fallback.
    pub fn effective_drag_payload(&self) -> Option<&P> {
        self.drag_payload.as_ref().or(self.payload.as_ref())
    }

    /// Payload describing this region in its receiver role, with the generic
    /// `payload` as fallback.
    pub fn effective_receiver_payload(&self) -> Option<&P> {
        self.receiver_payload.as_ref().or(self.payload.as_ref())
    }
}
