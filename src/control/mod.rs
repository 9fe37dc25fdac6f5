//! Facility control operations
//!
//! The controller layer: a mutex-guarded owner of one facility's state,
//! the aggregate overview, and the plain-data plans and reports its
//! operations return.
//!
//! # Overview
//!
//! - **CrowdController**: mutation and query operations over the registry
//! - **SystemOverview**: facility-wide aggregate snapshot
//! - **EvacuationPlan** / **RedistributionReport**: operation results
//! - **CrowdError** / **CrowdResult**: the operation error taxonomy
//!
//! # Usage Example
//!
//! ```rust
//! use facility_crowd_control::control::CrowdController;
//! use facility_crowd_control::facility::LayoutSpec;
//! use facility_crowd_control::types::{FacilityConfig, ZoneId};
//!
//! let controller =
//!     CrowdController::from_layout(FacilityConfig::default(), &LayoutSpec::stadium_demo())
//!         .unwrap();
//!
//! controller.move_crowd(&ZoneId::new("SEC1"), 180).unwrap();
//! let route = controller.optimal_evacuation_route(&ZoneId::new("SEC1"), 150).unwrap();
//! assert!(route.path.len() > 1);
//! ```

pub mod controller;
pub mod error;
pub mod overview;
pub mod plan;

// Re-export all public types for convenience
pub use controller::CrowdController;
pub use error::{CrowdError, CrowdResult};
pub use overview::SystemOverview;
pub use plan::{AlternativeRoute, EvacuationPlan, EvacuationPlanEntry, RedistributionReport};
