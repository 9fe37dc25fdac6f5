//! Facility graph model
//!
//! This module manages zones and their relationships: the zone model with
//! clamped occupancy and derived congestion state, the registry that owns
//! the whole graph, and declarative layouts for building facilities.
//!
//! # Overview
//!
//! - **Zone**: a capacity-bounded node with derived congestion state
//! - **ZoneStatus**: the externally visible snapshot of a zone
//! - **ZoneRegistry**: insertion-ordered owner of every zone and the exit set
//! - **LayoutSpec**: declarative zones/connections/exits, JSON-loadable
//!
//! # Usage Example
//!
//! ```rust
//! use facility_crowd_control::facility::*;
//! use facility_crowd_control::types::ZoneId;
//!
//! let mut registry = ZoneRegistry::new();
//! registry.add_zone(Zone::new("A", "Hall A", 100, 0.0, 0.0));
//! registry.add_zone(Zone::new("B", "Hall B", 200, 1.0, 0.0));
//! registry.connect_zones(&ZoneId::new("A"), &ZoneId::new("B"));
//! registry.mark_exit(&ZoneId::new("B"));
//!
//! assert!(registry.validate().is_ok());
//! ```

pub mod layout;
pub mod registry;
pub mod status;
pub mod zone;

// Re-export all public types for convenience
pub use layout::{LayoutSpec, ZoneSpec};
pub use registry::ZoneRegistry;
pub use status::ZoneStatus;
pub use zone::{Position, Zone};
