//! Core types and identifiers for the crowd control system
//!
//! This module contains fundamental types, identifiers, and configuration
//! structures used throughout the system.
//!
//! # Overview
//!
//! The types module provides the foundational data types:
//!
//! - **Identifiers**: opaque zone keys and UUID-based plan/alert identifiers
//! - **Enums**: type-safe evacuation priorities, congestion bands, output formats
//! - **Configuration**: facility configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use facility_crowd_control::types::*;
//!
//! // Zone ids are opaque keys supplied by the layout
//! let zone_id = ZoneId::new("SEC1");
//!
//! // Plans and alerts get generated identifiers
//! let plan_id = PlanId::new();
//!
//! // Configure the system
//! let config = FacilityConfig {
//!     critical_threshold: 75.0,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
