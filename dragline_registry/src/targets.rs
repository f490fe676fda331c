// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-target resolution: which regions sit under a point.

use alloc::vec::Vec;
use kurbo::Point;

use dragline_geometry::point_inside;

use crate::registry::Registry;
use crate::types::{RegionFlags, RegionId};

/// The regions found under a point by [`Registry::find_targets`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Targets {
    /// Monitoring regions whose resolved bounds contain the point, in
    /// registration order.
    pub monitors: Vec<RegionId>,
    /// The receptive region under the point, if any. When several overlap,
    /// the last-registered one.
    pub receiver: Option<RegionId>,
}

impl Targets {
    /// Whether the point hit neither a receiver nor any monitor.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_none() && self.monitors.is_empty()
    }
}

impl<P> Registry<P> {
    /// Find the receiver and monitors under `point` (shared coordinates).
    ///
    /// Scans live regions in registration order, resolving each candidate's
    /// absolute bounds on the spot so current scroll offsets are honored.
    /// Containment is edge-inclusive. `exclude` removes the actively dragged
    /// region from candidacy so a region never receives its own drag.
    ///
    /// Receiver precedence is purely registration order: a later-registered
    /// receptive region shadows an earlier one wherever they overlap,
    /// regardless of nesting depth or area. Monitors do not compete; every
    /// monitoring region containing the point is collected.
    pub fn find_targets(&self, point: Point, exclude: Option<RegionId>) -> Targets {
        let mut targets = Targets::default();
        for id in self.iter() {
            if Some(id) == exclude {
                continue;
            }
            let Some(flags) = self.flags(id) else {
                continue;
            };
            if !flags.intersects(RegionFlags::RECEPTIVE | RegionFlags::MONITORING) {
                continue;
            }
            let Some(bounds) = self.absolute_bounds(id) else {
                continue;
            };
            if !point_inside(point, bounds) {
                continue;
            }
            if flags.contains(RegionFlags::MONITORING) {
                targets.monitors.push(id);
            }
            if flags.contains(RegionFlags::RECEPTIVE) {
                targets.receiver = Some(id);
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Protocol;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;
    use kurbo::{Rect, Vec2};

    fn receiver(registry: &mut Registry<u32>, rect: Rect) -> RegionId {
        let id = registry.register(None, None);
        registry.report_measurements(id, rect);
        registry.update_protocol(
            id,
            Protocol {
                receptive: Some(true),
                ..Default::default()
            },
        );
        id
    }

    fn monitor(registry: &mut Registry<u32>, rect: Rect) -> RegionId {
        let id = registry.register(None, None);
        registry.report_measurements(id, rect);
        registry.update_protocol(
            id,
            Protocol {
                monitoring: Some(true),
                ..Default::default()
            },
        );
        id
    }

    #[test]
    fn miss_produces_empty_targets() {
        let mut registry: Registry<u32> = Registry::new();
        receiver(&mut registry, Rect::new(0.0, 0.0, 10.0, 10.0));
        let targets = registry.find_targets(Point::new(50.0, 50.0), None);
        assert!(targets.is_empty());
    }

    #[test]
    fn single_receiver_hit() {
        let mut registry: Registry<u32> = Registry::new();
        let a = receiver(&mut registry, Rect::new(0.0, 0.0, 100.0, 100.0));
        let targets = registry.find_targets(Point::new(50.0, 50.0), None);
        assert_eq!(targets.receiver, Some(a));
        assert!(targets.monitors.is_empty());
    }

    #[test]
    fn hit_on_edge_counts() {
        let mut registry: Registry<u32> = Registry::new();
        let a = receiver(&mut registry, Rect::new(0.0, 0.0, 100.0, 100.0));
        let targets = registry.find_targets(Point::new(100.0, 100.0), None);
        assert_eq!(targets.receiver, Some(a));
    }

    #[test]
    fn last_registered_receiver_wins_overlap() {
        let mut registry: Registry<u32> = Registry::new();
        let _under = receiver(&mut registry, Rect::new(0.0, 0.0, 100.0, 100.0));
        let over = receiver(&mut registry, Rect::new(50.0, 50.0, 150.0, 150.0));
        let targets = registry.find_targets(Point::new(75.0, 75.0), None);
        assert_eq!(targets.receiver, Some(over));
    }

    #[test]
    fn registration_order_beats_nesting_and_size() {
        let mut registry: Registry<u32> = Registry::new();
        // Small region registered first, huge one second. The huge one wins
        // even though the small one might look "on top" visually.
        let _small = receiver(&mut registry, Rect::new(40.0, 40.0, 60.0, 60.0));
        let huge = receiver(&mut registry, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let targets = registry.find_targets(Point::new(50.0, 50.0), None);
        assert_eq!(targets.receiver, Some(huge));
    }

    #[test]
    fn all_containing_monitors_collected_in_order() {
        let mut registry: Registry<u32> = Registry::new();
        let m1 = monitor(&mut registry, Rect::new(0.0, 0.0, 100.0, 100.0));
        let _miss = monitor(&mut registry, Rect::new(200.0, 200.0, 300.0, 300.0));
        let m2 = monitor(&mut registry, Rect::new(25.0, 25.0, 75.0, 75.0));
        let targets = registry.find_targets(Point::new(50.0, 50.0), None);
        assert_eq!(targets.monitors, vec![m1, m2]);
        assert_eq!(targets.receiver, None);
    }

    #[test]
    fn region_can_be_both_receiver_and_monitor() {
        let mut registry: Registry<u32> = Registry::new();
        let id = registry.register(None, None);
        registry.report_measurements(id, Rect::new(0.0, 0.0, 100.0, 100.0));
        registry.update_protocol(
            id,
            Protocol {
                receptive: Some(true),
                monitoring: Some(true),
                ..Default::default()
            },
        );
        let targets = registry.find_targets(Point::new(10.0, 10.0), None);
        assert_eq!(targets.receiver, Some(id));
        assert_eq!(targets.monitors, vec![id]);
    }

    #[test]
    fn excluded_region_is_skipped() {
        let mut registry: Registry<u32> = Registry::new();
        let under = receiver(&mut registry, Rect::new(0.0, 0.0, 100.0, 100.0));
        let dragged = receiver(&mut registry, Rect::new(0.0, 0.0, 100.0, 100.0));
        let targets = registry.find_targets(Point::new(50.0, 50.0), Some(dragged));
        assert_eq!(targets.receiver, Some(under));
    }

    #[test]
    fn unmeasured_and_non_capable_regions_are_skipped() {
        let mut registry: Registry<u32> = Registry::new();
        // Receptive but never measured.
        let unmeasured = registry.register(None, None);
        registry.update_protocol(
            unmeasured,
            Protocol {
                receptive: Some(true),
                ..Default::default()
            },
        );
        // Measured but draggable-only.
        let passive = registry.register(None, None);
        registry.report_measurements(passive, Rect::new(0.0, 0.0, 100.0, 100.0));
        registry.update_protocol(
            passive,
            Protocol {
                draggable: Some(true),
                ..Default::default()
            },
        );
        let targets = registry.find_targets(Point::new(50.0, 50.0), None);
        assert!(targets.is_empty());
    }

    #[test]
    fn scrolled_out_receiver_is_not_a_target() {
        let mut registry: Registry<u32> = Registry::new();
        let scroll = Rc::new(Cell::new(Vec2::ZERO));
        let container = registry.register(None, Some(scroll.clone()));
        registry.report_measurements(container, Rect::new(0.0, 0.0, 100.0, 100.0));
        let child = registry.register(Some(container), None);
        registry.report_measurements(child, Rect::new(10.0, 10.0, 50.0, 50.0));
        registry.update_protocol(
            child,
            Protocol {
                receptive: Some(true),
                ..Default::default()
            },
        );

        assert_eq!(
            registry.find_targets(Point::new(20.0, 20.0), None).receiver,
            Some(child)
        );
        scroll.set(Vec2::new(0.0, 200.0));
        assert!(registry.find_targets(Point::new(20.0, 20.0), None).is_empty());
    }
}
