//! Facility Crowd Control
//!
//! A zone-based crowd management system that models a facility (stadium,
//! venue, building) as a graph of capacity-bounded zones and computes
//! congestion-aware routing decisions over it.
//!
//! # Overview
//!
//! The library answers, continuously and under changing occupancy, "what is
//! the best path out of zone X for N people right now, given current
//! congestion?" — via shortest paths, evacuation route ranking under
//! crowd-size constraints, critical-zone detection, and dynamic crowd
//! redistribution.
//!
//! ## Key Features
//!
//! - **Zone Graph Model**: capacity-bounded zones with clamped occupancy and
//!   always-fresh derived congestion state
//! - **BFS Routing**: shortest paths, bounded-radius enumeration,
//!   connectivity, and avoidance-constrained alternate routes
//! - **Evacuation Ranking**: multi-criteria route selection (accommodation
//!   first, then congestion with distance as a minor tiebreaker)
//! - **Crowd Redistribution**: atomic movement of crowds to nearby zones
//!   with spare capacity
//! - **Live Monitoring**: a recurring background loop emitting overviews
//!   and detecting critical congestion
//! - **Flow Simulation**: bounded random occupancy perturbation for
//!   exercising the system
//!
//! ## Quick Start
//!
//! ```rust
//! use facility_crowd_control::*;
//!
//! // Build the demo stadium facility
//! let controller =
//!     CrowdController::from_layout(FacilityConfig::default(), &LayoutSpec::stadium_demo())?;
//!
//! // Crowds arrive
//! controller.move_crowd(&ZoneId::new("SEC1"), 180)?;
//!
//! // Where should 150 people go?
//! let route = controller.optimal_evacuation_route(&ZoneId::new("SEC1"), 150)?;
//! println!("Evacuate via {} hops to {}", route.distance, route.exit_zone);
//! # Ok::<(), facility_crowd_control::CrowdError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, enums, and configuration
//! - [`facility`]: the zone model, registry, and declarative layouts
//! - [`routing`]: BFS traversal, route metrics, and evacuation ranking
//! - [`control`]: the facility controller, overview, plans, and errors
//! - [`simulation`]: monitoring and crowd flow loops, logging setup
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Facility   │    │   Routing   │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Zones       │◄───┤ Traversal   │
//! │ Enums       │    │ Registry    │    │ Routes      │
//! │ Config      │    │ Layouts     │    │ Evacuation  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//!        │          ┌─────────────┐    ┌─────────────┐
//!        └──────────┤   Control   │◄───┤ Simulation  │
//!                   │             │    │             │
//!                   │ Controller  │    │ Monitoring  │
//!                   │ Overview    │    │ Crowd Flow  │
//!                   │ Plans       │    │ Logging     │
//!                   └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod control;
pub mod facility;
pub mod routing;
pub mod simulation;
pub mod types;

// Re-export all public types for convenience

// Core types and identifiers
pub use types::{
    AlertId,
    CliArgs,
    CongestionBand,
    // Configuration
    ConfigError,
    ConfigValidationError,
    EvacuationPriority,
    FacilityConfig,
    OutputFormat,
    PlanId,
    // Identifiers
    ZoneId,
};

// Facility types and functionality
pub use facility::{LayoutSpec, Position, Zone, ZoneRegistry, ZoneSpec, ZoneStatus};

// Routing types and functionality
pub use routing::{
    alternative_route, connected_zones, find_evacuation_routes, shortest_path,
    zones_within_distance, Route,
};

// Control types and functionality
pub use control::{
    AlternativeRoute, CrowdController, CrowdError, CrowdResult, EvacuationPlan,
    EvacuationPlanEntry, RedistributionReport, SystemOverview,
};

// Simulation types and functionality
pub use simulation::{CrowdFlowSimulator, LoggingConfig, MonitoringLoop};
