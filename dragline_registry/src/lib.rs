// Copyright 2025 the Dragline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragline Registry: drag-interactive regions with on-demand absolute
//! positioning and drop-target lookup.
//!
//! The registry is the geometric half of Dragline. It knows every region that
//! participates in drag and drop (draggable sources, receptive targets, and
//! passive monitors), how regions nest, and how scrollable ancestors displace
//! their descendants. The gesture half lives in `dragline_tracker`, which
//! drives a [`Registry`] from pointer input.
//!
//! - Regions register with an optional parent and an optional live scroll
//!   source, then report their own-parent-space measurements as layout runs.
//! - Capabilities come from a [`Protocol`]: explicit flags when given,
//!   otherwise inferred from declared [`NoticeSet`] subscriptions and
//!   payloads.
//! - Absolute bounds are resolved on demand, never cached:
//!   [`Registry::absolute_bounds`] walks the parent chain, subtracting each
//!   ancestor's current scroll offset and clipping to its viewport, so a
//!   scroll between two queries is always reflected in the second.
//! - [`Registry::find_targets`] scans regions in registration order; the
//!   last-registered receptive region under the point is the receiver, and
//!   every monitoring region under the point is collected.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use dragline_registry::{Protocol, Registry};
//!
//! let mut registry: Registry<&'static str> = Registry::new();
//!
//! let bin = registry.register(None, None);
//! registry.report_measurements(bin, Rect::new(0.0, 0.0, 100.0, 100.0));
//! registry.update_protocol(
//!     bin,
//!     Protocol {
//!         receptive: Some(true),
//!         ..Default::default()
//!     },
//! );
//!
//! let targets = registry.find_targets(Point::new(40.0, 40.0), None);
//! assert_eq!(targets.receiver, Some(bin));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod registry;
mod targets;
mod types;

pub use registry::{Region, Registry};
pub use targets::Targets;
pub use types::{NoticeKind, NoticeSet, Protocol, RegionFlags, RegionId, ScrollSource};
