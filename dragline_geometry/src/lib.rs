// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragline Geometry: rectangle clipping and relative-position math.
//!
//! Pure functions shared by the Dragline registry and tracker crates. All
//! rectangles are axis-aligned and expressed with [`kurbo::Rect`]; points and
//! offsets use [`kurbo::Point`] and [`kurbo::Vec2`].
//!
//! Two semantic choices differ from kurbo's own helpers and are load-bearing
//! for hit testing:
//!
//! - [`point_inside`] is inclusive on all four edges, matching the
//!   edge-inclusive containment used for drop-target resolution. Kurbo's
//!   `Rect::contains` is half-open and would drop hits exactly on the
//!   bottom/right edges.
//! - [`clip`] treats rectangles that merely touch along an edge as disjoint
//!   and returns `None`; a nested region scrolled exactly to the lip of its
//!   viewport is not an interactive target.
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Rect, Vec2};

/// Intersect two axis-aligned rectangles.
///
/// Returns `None` when the overlap is empty on either axis. Touching edges
/// count as disjoint: the overlap must have strictly positive width and
/// height.
///
/// ```
/// use kurbo::Rect;
/// use dragline_geometry::clip;
///
/// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
/// let b = Rect::new(5.0, 5.0, 20.0, 20.0);
/// assert_eq!(clip(a, b), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
///
/// // Shared edge only: disjoint.
/// let c = Rect::new(10.0, 0.0, 20.0, 10.0);
/// assert_eq!(clip(a, c), None);
/// ```
pub fn clip(rect: Rect, container: Rect) -> Option<Rect> {
    let out = rect.intersect(container);
    if out.width() > 0.0 && out.height() > 0.0 {
        Some(out)
    } else {
        None
    }
}

/// Whether `point` lies within `rect`, inclusive on all four edges.
pub fn point_inside(point: Point, rect: Rect) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// A point expressed relative to a rectangle.
///
/// Produced by [`relative_position`]. `position` is the offset from the
/// rectangle's origin; `ratio` is that offset divided by the rectangle's
/// size per axis, so a point inside the rectangle yields components in
/// `[0, 1]` (edge rounding aside).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RelativePosition {
    /// Offset from the rectangle's origin.
    pub position: Vec2,
    /// Per-axis `position / size`. Zero on a degenerate (zero-size) axis.
    pub ratio: Vec2,
}

/// Express `point` relative to `rect`'s origin and size.
///
/// Callers are expected to have tested `point` with [`point_inside`] first
/// when a `[0, 1]` ratio matters; the function itself does not clamp. A
/// zero-size axis yields a ratio of `0.0` rather than a non-finite value,
/// since regions can be degenerate between layout passes.
pub fn relative_position(point: Point, rect: Rect) -> RelativePosition {
    let position = point - rect.origin();
    let ratio = Vec2::new(
        if rect.width() > 0.0 {
            position.x / rect.width()
        } else {
            0.0
        },
        if rect.height() > 0.0 {
            position.y / rect.height()
        } else {
            0.0
        },
    );
    RelativePosition { position, ratio }
}
