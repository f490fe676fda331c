// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-region activity state, written by the gesture state machine and read
//! by the rendering layer.

use hashbrown::HashMap;
use kurbo::Vec2;

use dragline_registry::RegionId;

/// A region's drag-side status.
///
/// `Released` is the post-drag settle window: the drag has ended but the
/// rendering layer may still be animating the region home. The collaborator
/// calls [`DragController::settle`](crate::DragController::settle) when that
/// animation completes, returning the region to `Inactive`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DragStatus {
    /// Not being dragged.
    #[default]
    Inactive,
    /// Currently being dragged.
    Dragging,
    /// Drag ended; awaiting settle.
    Released,
}

/// A region's receive-side status.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ReceiveStatus {
    /// No drag over this region.
    #[default]
    Inactive,
    /// The active drag is currently over this region.
    Receiving,
}

/// Observable activity of one region.
///
/// Output-only: the core writes it and never reads it back for its own
/// decisions. Offsets are plain numbers for the rendering collaborator to
/// animate however it chooses.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ActivityRecord {
    /// Drag-side status.
    pub drag_status: DragStatus,
    /// Receive-side status.
    pub receive_status: ReceiveStatus,
    /// Accumulated drag translation, for visual follow of the dragged region.
    pub drag_offset: Vec2,
    /// Drag point relative to this region's bounds while it is receiving.
    pub receive_offset: Vec2,
    /// `receive_offset` as a per-axis fraction of this region's size.
    pub receive_ratio: Vec2,
}

/// Store of [`ActivityRecord`]s, one per registered region.
#[derive(Clone, Debug, Default)]
pub struct ActivityStore {
    records: HashMap<RegionId, ActivityRecord>,
}

impl ActivityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a default record for a newly registered region.
    pub(crate) fn insert_default(&mut self, id: RegionId) {
        self.records.insert(id, ActivityRecord::default());
    }

    /// Drop the record of an unregistered region.
    pub(crate) fn remove(&mut self, id: RegionId) {
        self.records.remove(&id);
    }

    /// A region's activity, if it is registered.
    pub fn get(&self, id: RegionId) -> Option<&ActivityRecord> {
        self.records.get(&id)
    }

    /// Mutable access for the state machine. Missing records (stale ids) are
    /// a no-op via `None`.
    pub(crate) fn get_mut(&mut self, id: RegionId) -> Option<&mut ActivityRecord> {
        self.records.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_id() -> RegionId {
        // Any live-looking id works for the store; it does not validate
        // against a registry.
        let mut registry: dragline_registry::Registry<()> = dragline_registry::Registry::new();
        registry.register(None, None)
    }

    #[test]
    fn defaults_are_fully_inactive() {
        let record = ActivityRecord::default();
        assert_eq!(record.drag_status, DragStatus::Inactive);
        assert_eq!(record.receive_status, ReceiveStatus::Inactive);
        assert_eq!(record.drag_offset, Vec2::ZERO);
        assert_eq!(record.receive_offset, Vec2::ZERO);
        assert_eq!(record.receive_ratio, Vec2::ZERO);
    }

    #[test]
    fn insert_get_remove() {
        let id = some_id();
        let mut store = ActivityStore::new();
        assert!(store.get(id).is_none());

        store.insert_default(id);
        assert_eq!(store.get(id), Some(&ActivityRecord::default()));

        if let Some(record) = store.get_mut(id) {
            record.drag_status = DragStatus::Dragging;
        }
        assert_eq!(store.get(id).map(|r| r.drag_status), Some(DragStatus::Dragging));

        store.remove(id);
        assert!(store.get(id).is_none());
    }
}
