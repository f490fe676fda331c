// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry implementation: storage, lifecycle, and absolute-position
//! resolution.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use dragline_geometry::clip;

use crate::types::{Protocol, RegionFlags, RegionId, ScrollSource};

/// A registered region's record.
///
/// `measurements` are always in the region's own parent's coordinate space
/// (or the shared space for roots) and are never pre-resolved: ancestors may
/// scroll or re-layout between reads, so absolute rects are derived on
/// demand by [`Registry::absolute_bounds`].
#[derive(Clone, Debug)]
pub struct Region<P> {
    /// Nearest registered ancestor, or `None` when anchored directly to the
    /// shared coordinate space.
    pub parent: Option<RegionId>,
    /// Live scroll offset, present only for scrollable containers.
    pub scroll_source: Option<ScrollSource>,
    /// Capability and callback protocol.
    pub protocol: Protocol<P>,
    /// Own-parent-space rect; `None` until the first layout report.
    pub measurements: Option<Rect>,
}

#[derive(Clone, Debug)]
struct Slot<P> {
    generation: u32,
    region: Region<P>,
}

/// Registry of drag-interactive regions.
///
/// Stores one [`Region`] per registered id in generational slots (stale ids
/// are detected, never aliased) and maintains the registration order, which
/// is the sole precedence substrate for target resolution: when receptive
/// regions overlap, the last-registered one wins.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use dragline_registry::Registry;
///
/// let mut registry: Registry<()> = Registry::new();
/// let root = registry.register(None, None);
/// registry.report_measurements(root, Rect::new(0.0, 0.0, 100.0, 100.0));
///
/// assert_eq!(registry.absolute_bounds(root), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
/// ```
#[derive(Clone)]
pub struct Registry<P> {
    /// slots
    slots: Vec<Option<Slot<P>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// live ids in registration order
    order: Vec<RegionId>,
}

impl<P> core::fmt::Debug for Registry<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.order.len();
        f.debug_struct("Registry")
            .field("slots_total", &total)
            .field("regions_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<P> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Registry<P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Register a new region and return its identifier.
    ///
    /// The region starts unmeasured and with an empty [`Protocol`], so it is
    /// not interactable until [`Registry::report_measurements`] and
    /// [`Registry::update_protocol`] have been called. `parent` is stored as
    /// given; a stale parent simply leaves the region unresolvable, the same
    /// as an unmeasured one.
    pub fn register(
        &mut self,
        parent: Option<RegionId>,
        scroll_source: Option<ScrollSource>,
    ) -> RegionId {
        let region = Region {
            parent,
            scroll_source,
            protocol: Protocol::default(),
            measurements: None,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot { generation, region });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "RegionId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot { generation, region }));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "RegionId uses 32-bit indices by design."
            )]
            ((self.slots.len() - 1) as u32, generation)
        };
        let id = RegionId::new(idx, generation);
        self.order.push(id);
        id
    }

    /// Remove a region. Stale ids are a no-op.
    ///
    /// Children of a removed region are not cascaded: they stay registered
    /// but become unresolvable (and therefore non-interactable) until they
    /// are re-parented or unregistered themselves.
    pub fn unregister(&mut self, id: RegionId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.slots[id.idx()] = None;
        self.free_list.push(id.idx());
        self.order.retain(|r| *r != id);
        true
    }

    /// Replace a region's protocol.
    ///
    /// Capability flags are derived from the protocol on every query, so
    /// inference is recomputed from the new protocol immediately.
    pub fn update_protocol(&mut self, id: RegionId, protocol: Protocol<P>) {
        if let Some(slot) = self.slot_opt_mut(id) {
            slot.region.protocol = protocol;
        }
    }

    /// Record a region's own-parent-space measurements.
    ///
    /// Idempotent for identical reports; stale ids are ignored.
    pub fn report_measurements(&mut self, id: RegionId, measurements: Rect) {
        if let Some(slot) = self.slot_opt_mut(id)
            && slot.region.measurements != Some(measurements)
        {
            slot.region.measurements = Some(measurements);
        }
    }

    /// Returns true if `id` refers to a live region.
    pub fn is_alive(&self, id: RegionId) -> bool {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .map(|s| s.generation == id.1)
            .unwrap_or(false)
    }

    /// Access a live region's record, or `None` for stale ids.
    pub fn region(&self, id: RegionId) -> Option<&Region<P>> {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .filter(|s| s.generation == id.1)
            .map(|s| &s.region)
    }

    /// Returns the parent of a live region, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: RegionId) -> Option<RegionId> {
        self.region(id).and_then(|r| r.parent)
    }

    /// Effective capability flags of a live region.
    pub fn flags(&self, id: RegionId) -> Option<RegionFlags> {
        self.region(id).map(|r| r.protocol.flags())
    }

    /// Own-parent-space measurements of a live region, if reported.
    pub fn measurements(&self, id: RegionId) -> Option<Rect> {
        self.region(id).and_then(|r| r.measurements)
    }

    /// Current scroll offset of a region, `Vec2::ZERO` when not scrollable
    /// (or stale).
    pub fn scroll_offset(&self, id: RegionId) -> Vec2 {
        self.region(id)
            .and_then(|r| r.scroll_source.as_ref())
            .map(|s| s.get())
            .unwrap_or(Vec2::ZERO)
    }

    /// Iterate live region ids in registration order.
    pub fn iter(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.order.iter().copied()
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry has no live regions.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolve a region's rect in the shared coordinate space.
    ///
    /// Walks the parent chain, composing each ancestor's origin and scroll
    /// offset and clipping to each ancestor's absolute rect (a nested region
    /// scrolled out of its viewport is not hit-testable). Returns `None`
    /// while any link of the chain is unmeasured, stale, or fully clipped
    /// away.
    ///
    /// Deliberately uncached: ancestors scroll and re-layout between
    /// queries, and a stale absolute rect produces wrong drop targets.
    pub fn absolute_bounds(&self, id: RegionId) -> Option<Rect> {
        self.resolve(id).map(|(_, clipped)| clipped)
    }

    /// Resolve both the unclipped origin and the clipped rect of a region.
    ///
    /// Children are positioned from the parent's unclipped origin (a child
    /// keeps its offset within the parent's content even when the parent's
    /// visible rect is truncated) but clipped against the parent's clipped
    /// rect, which composes the whole ancestor chain of viewports.
    fn resolve(&self, id: RegionId) -> Option<(Point, Rect)> {
        let region = self.region(id)?;
        let own = region.measurements?;
        let Some(parent) = region.parent else {
            return Some((own.origin(), own));
        };
        let (parent_origin, parent_clipped) = self.resolve(parent)?;
        let scroll = self.scroll_offset(parent);
        let origin = Point::new(
            parent_origin.x + own.x0 - scroll.x,
            parent_origin.y + own.y0 - scroll.y,
        );
        let clipped = clip(Rect::from_origin_size(origin, own.size()), parent_clipped)?;
        Some((origin, clipped))
    }

    fn slot_opt_mut(&mut self, id: RegionId) -> Option<&mut Slot<P>> {
        let slot = self.slots.get_mut(id.idx())?.as_mut()?;
        if slot.generation != id.1 {
            return None;
        }
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NoticeSet;
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn measured<P>(registry: &mut Registry<P>, parent: Option<RegionId>, rect: Rect) -> RegionId {
        let id = registry.register(parent, None);
        registry.report_measurements(id, rect);
        id
    }

    #[test]
    fn liveness_register_unregister_reuse() {
        let mut registry: Registry<()> = Registry::new();
        let a = registry.register(None, None);
        assert!(registry.is_alive(a));

        registry.unregister(a);
        assert!(!registry.is_alive(a));
        assert!(registry.region(a).is_none());

        // Reuse may pick the same slot; the generation must bump.
        let b = registry.register(None, None);
        assert!(registry.is_alive(b));
        assert!(!registry.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn iteration_preserves_registration_order_across_removal() {
        let mut registry: Registry<()> = Registry::new();
        let a = registry.register(None, None);
        let b = registry.register(None, None);
        let c = registry.register(None, None);
        registry.unregister(b);
        let d = registry.register(None, None);

        let order: Vec<RegionId> = registry.iter().collect();
        // d reuses b's slot but still registers last.
        assert_eq!(order, Vec::from([a, c, d]));
    }

    #[test]
    fn unmeasured_region_is_unresolvable() {
        let mut registry: Registry<()> = Registry::new();
        let a = registry.register(None, None);
        assert_eq!(registry.absolute_bounds(a), None);
        registry.report_measurements(a, Rect::new(1.0, 2.0, 11.0, 22.0));
        assert_eq!(
            registry.absolute_bounds(a),
            Some(Rect::new(1.0, 2.0, 11.0, 22.0))
        );
    }

    #[test]
    fn unmeasured_ancestor_propagates_none() {
        let mut registry: Registry<()> = Registry::new();
        let parent = registry.register(None, None);
        let child = registry.register(Some(parent), None);
        registry.report_measurements(child, Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(registry.absolute_bounds(child), None);
    }

    #[test]
    fn child_translates_by_parent_origin() {
        let mut registry: Registry<()> = Registry::new();
        let parent = measured(&mut registry, None, Rect::new(100.0, 50.0, 300.0, 250.0));
        let child = measured(&mut registry, Some(parent), Rect::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(
            registry.absolute_bounds(child),
            Some(Rect::new(110.0, 70.0, 140.0, 110.0))
        );
    }

    #[test]
    fn scroll_offset_shifts_children_live() {
        let mut registry: Registry<()> = Registry::new();
        let scroll = Rc::new(Cell::new(Vec2::ZERO));
        let container = registry.register(None, Some(scroll.clone()));
        registry.report_measurements(container, Rect::new(0.0, 0.0, 200.0, 200.0));
        let child = measured(
            &mut registry,
            Some(container),
            Rect::new(10.0, 100.0, 60.0, 150.0),
        );

        assert_eq!(
            registry.absolute_bounds(child),
            Some(Rect::new(10.0, 100.0, 60.0, 150.0))
        );

        // No re-report needed: the next query observes the new offset.
        scroll.set(Vec2::new(0.0, 40.0));
        assert_eq!(
            registry.absolute_bounds(child),
            Some(Rect::new(10.0, 60.0, 60.0, 110.0))
        );
    }

    #[test]
    fn child_is_clipped_to_parent_viewport() {
        let mut registry: Registry<()> = Registry::new();
        let scroll = Rc::new(Cell::new(Vec2::new(0.0, 80.0)));
        let container = registry.register(None, Some(scroll));
        registry.report_measurements(container, Rect::new(0.0, 0.0, 100.0, 100.0));
        // At offset 80, only y ∈ [80, 130) of content is visible; this child
        // spans content y ∈ [60, 120] so its visible part is [60-80, 120-80]
        // clamped to the viewport top.
        let child = measured(
            &mut registry,
            Some(container),
            Rect::new(10.0, 60.0, 50.0, 120.0),
        );
        assert_eq!(
            registry.absolute_bounds(child),
            Some(Rect::new(10.0, 0.0, 50.0, 40.0))
        );
    }

    #[test]
    fn fully_scrolled_out_child_resolves_to_none() {
        let mut registry: Registry<()> = Registry::new();
        let scroll = Rc::new(Cell::new(Vec2::new(0.0, 500.0)));
        let container = registry.register(None, Some(scroll));
        registry.report_measurements(container, Rect::new(0.0, 0.0, 100.0, 100.0));
        let child = measured(
            &mut registry,
            Some(container),
            Rect::new(10.0, 10.0, 50.0, 50.0),
        );
        assert_eq!(registry.absolute_bounds(child), None);
    }

    #[test]
    fn three_level_nesting_with_scroll() {
        // A ⊃ B ⊃ C, A scrollable at {0, 50}, B at {10, 10, 100×100},
        // C at {20, 20, 30×30}. C's unclipped absolute rect is
        // {30, -20, 30×30}; clipping to B (itself clipped to A) truncates
        // the negative-y overhang.
        let mut registry: Registry<()> = Registry::new();
        let scroll = Rc::new(Cell::new(Vec2::new(0.0, 50.0)));
        let a = registry.register(None, Some(scroll));
        registry.report_measurements(a, Rect::new(0.0, 0.0, 200.0, 200.0));
        let b = measured(&mut registry, Some(a), Rect::new(10.0, 10.0, 110.0, 110.0));
        let c = measured(&mut registry, Some(b), Rect::new(20.0, 20.0, 50.0, 50.0));

        // B: origin {10, 10-50} clipped to A's bounds.
        assert_eq!(
            registry.absolute_bounds(b),
            Some(Rect::new(10.0, 0.0, 110.0, 60.0))
        );
        // C: origin {10+20, -40+20} = {30, -20}, clipped to B's visible rect.
        assert_eq!(
            registry.absolute_bounds(c),
            Some(Rect::new(30.0, 0.0, 60.0, 10.0))
        );
    }

    #[test]
    fn leaf_equals_summed_origins_minus_scrolls_when_unclipped() {
        let mut registry: Registry<()> = Registry::new();
        let s1 = Rc::new(Cell::new(Vec2::new(5.0, 10.0)));
        let s2 = Rc::new(Cell::new(Vec2::new(1.0, 2.0)));
        let a = registry.register(None, Some(s1));
        registry.report_measurements(a, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let b = registry.register(Some(a), Some(s2));
        registry.report_measurements(b, Rect::new(100.0, 100.0, 900.0, 900.0));
        let c = measured(&mut registry, Some(b), Rect::new(50.0, 60.0, 70.0, 80.0));

        // 0 + 100 - 5 + 50 - 1 = 144; 0 + 100 - 10 + 60 - 2 = 148.
        assert_eq!(
            registry.absolute_bounds(c),
            Some(Rect::new(144.0, 148.0, 164.0, 168.0))
        );
    }

    #[test]
    fn report_measurements_is_idempotent() {
        let mut registry: Registry<()> = Registry::new();
        let a = registry.register(None, None);
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        registry.report_measurements(a, r);
        registry.report_measurements(a, r);
        assert_eq!(registry.measurements(a), Some(r));
    }

    #[test]
    fn update_protocol_recomputes_flags() {
        let mut registry: Registry<u32> = Registry::new();
        let a = registry.register(None, None);
        assert_eq!(registry.flags(a), Some(RegionFlags::empty()));

        registry.update_protocol(
            a,
            Protocol {
                subscriptions: NoticeSet::DRAGGED,
                ..Default::default()
            },
        );
        assert_eq!(registry.flags(a), Some(RegionFlags::DRAGGABLE));

        // Replacing the protocol re-infers from scratch.
        registry.update_protocol(
            a,
            Protocol {
                receiver_payload: Some(9),
                ..Default::default()
            },
        );
        assert_eq!(registry.flags(a), Some(RegionFlags::RECEPTIVE));
    }

    #[test]
    fn stale_id_mutations_are_ignored() {
        let mut registry: Registry<()> = Registry::new();
        let a = registry.register(None, None);
        registry.unregister(a);
        registry.report_measurements(a, Rect::new(0.0, 0.0, 1.0, 1.0));
        registry.update_protocol(a, Protocol::default());
        assert!(registry.measurements(a).is_none());
        assert!(!registry.unregister(a));
    }
}
