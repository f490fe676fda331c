// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture input and notice output types.

use kurbo::{Point, Vec2};

use dragline_registry::{NoticeKind, RegionId};

/// Recognizer-level lifecycle of a gesture, as delivered per region.
///
/// `Cancelled` and `Failed` are ordinary transitions, not errors; both end
/// an active drag without a drop.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GestureState {
    /// The recognizer has observed a candidate gesture (e.g. a long press
    /// started) but tracking has not begun.
    Began,
    /// The gesture is actively tracking; the first `Active` on a draggable
    /// region starts the drag.
    Active,
    /// The gesture completed normally; attempts a drop.
    Ended,
    /// The recognizer cancelled the gesture.
    Cancelled,
    /// The recognizer failed to complete the gesture.
    Failed,
}

/// One pointer sample, carrying the same touch in three coordinate frames.
///
/// `translation` is the accumulated offset from where the gesture began,
/// which is how recognizers typically report movement; the drag's screen
/// anchor is derived once at start as `screen - translation` so later
/// samples need only a fresh `translation`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSample {
    /// Touch position in the region's own coordinate space.
    pub local: Point,
    /// Touch position in the region's immediate container's space.
    pub parent: Point,
    /// Touch position in the shared coordinate space.
    pub screen: Point,
    /// Accumulated movement since the gesture began.
    pub translation: Vec2,
}

/// The other half of a dragged/receiver pair, as seen from a notice's
/// addressee.
///
/// The payload is the counterpart's role-specific declared value: a notice
/// delivered to a receiver carries the dragged region's drag payload, and a
/// notice delivered to the dragged region carries the receiver's receiver
/// payload, each falling back to the counterpart's generic payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Counterpart<P> {
    /// The counterpart region.
    pub region: RegionId,
    /// The counterpart's parent, if any.
    pub parent: Option<RegionId>,
    /// The counterpart's effective payload for this direction.
    pub payload: Option<P>,
}

/// Where the drag point sits within a monitor's resolved bounds.
///
/// Carried on monitor notices for collaborators that react to proximity,
/// such as an auto-scroll driver watching the edge ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonitorPoint {
    /// Offset of the drag point from the monitor's absolute origin.
    pub position: Vec2,
    /// `position` as a per-axis fraction of the monitor's size. Within
    /// `[0, 1]` while the point is inside; exit notices may stray outside.
    pub ratio: Vec2,
}

/// One protocol callback invocation, addressed to a single region.
///
/// The gesture state machine emits notices in the mandated order as a
/// sequence; [`dispatch::run`](crate::dispatch::run) walks the sequence and
/// invokes the application's handlers. A notice is only emitted if its
/// addressee declared the corresponding [`NoticeKind`] subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice<P> {
    /// The region this notice is addressed to.
    pub region: RegionId,
    /// Which protocol callback this represents.
    pub kind: NoticeKind,
    /// Current drag position in the shared coordinate space.
    pub screen: Point,
    /// The paired region for dragged/receiver notices; for monitor notices,
    /// the dragged region.
    pub counterpart: Option<Counterpart<P>>,
    /// Monitor-relative position, present on monitor notices only.
    pub monitor: Option<MonitorPoint>,
}

/// Global drag/receive snapshot for the rendering layer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TrackingStatus {
    /// A drag is in progress.
    pub dragging: bool,
    /// The in-progress drag currently has a receiver.
    pub receiving: bool,
}
