//! Graph traversal and routing algorithms
//!
//! Stateless breadth-first algorithms over the facility graph, plus route
//! evaluation and multi-criteria evacuation ranking. Everything here is a
//! pure function over a [`ZoneRegistry`](crate::facility::ZoneRegistry):
//! no state survives a call, and the absence of a path is an ordinary
//! empty result rather than an error.
//!
//! # Usage Example
//!
//! ```rust
//! use facility_crowd_control::facility::{LayoutSpec, ZoneRegistry};
//! use facility_crowd_control::routing::{find_evacuation_routes, shortest_path};
//! use facility_crowd_control::types::ZoneId;
//!
//! let registry = LayoutSpec::stadium_demo().build(80.0).unwrap();
//!
//! let path = shortest_path(&registry, &ZoneId::new("SEC1"), &ZoneId::new("EMR1"));
//! assert!(path.is_some());
//!
//! let routes = find_evacuation_routes(&registry, &ZoneId::new("SEC1"), 150);
//! assert!(!routes.is_empty());
//! ```

pub mod evacuation;
pub mod route;
pub mod traversal;

// Re-export all public types for convenience
pub use evacuation::{critical_zones_within, find_evacuation_routes, DISTANCE_TIEBREAK_WEIGHT};
pub use route::{congestion_score, route_capacity, Route};
pub use traversal::{alternative_route, connected_zones, shortest_path, zones_within_distance};
