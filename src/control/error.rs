//! Error types and handling
//!
//! This module contains the error types for controller operations. Every
//! failure here is a local, recoverable condition reported to the immediate
//! caller; nothing in the core is fatal to the process.

use crate::types::ZoneId;
use thiserror::Error;

/// Errors that can occur during crowd control operations
#[derive(Debug, Error)]
pub enum CrowdError {
    /// An operation referenced a zone id that is not registered
    #[error("Zone not found: {0}")]
    ZoneNotFound(ZoneId),

    /// A redistribution asked for more people than the source zone holds
    #[error("Insufficient occupancy in zone {zone}: requested {requested}, available {available}")]
    InsufficientOccupancy {
        /// The source zone
        zone: ZoneId,
        /// People requested to move
        requested: u32,
        /// People actually present
        available: u32,
    },

    /// No exit is reachable from the given zone
    #[error("No evacuation route from zone {0} to any exit")]
    NoEvacuationRoute(ZoneId),

    /// No nearby zone can take the crowd being redistributed
    #[error("No redistribution target within {radius} hops of zone {zone}")]
    NoRedistributionTarget {
        /// The source zone
        zone: ZoneId,
        /// The hop radius that was searched
        radius: usize,
    },

    /// Facility layout construction failed
    #[error("Layout error: {0}")]
    LayoutError(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<anyhow::Error> for CrowdError {
    fn from(error: anyhow::Error) -> Self {
        CrowdError::LayoutError(error.to_string())
    }
}

impl CrowdError {
    /// Create a zone-not-found error
    pub fn zone_not_found(zone: impl Into<ZoneId>) -> Self {
        Self::ZoneNotFound(zone.into())
    }

    /// Create a layout error
    pub fn layout_error(msg: impl Into<String>) -> Self {
        Self::LayoutError(msg.into())
    }

    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Check if this is a recoverable error
    ///
    /// Only configuration and layout failures are terminal for a run;
    /// everything the routing layer reports is an ordinary operational
    /// outcome the caller can act on.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CrowdError::ZoneNotFound(_) => true,
            CrowdError::InsufficientOccupancy { .. } => true,
            CrowdError::NoEvacuationRoute(_) => true,
            CrowdError::NoRedistributionTarget { .. } => true,
            CrowdError::LayoutError(_) => false,
            CrowdError::ConfigurationError(_) => false,
            CrowdError::IoError(_) => true,
            CrowdError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            CrowdError::ZoneNotFound(_) => "Lookup",
            CrowdError::InsufficientOccupancy { .. } => "Occupancy",
            CrowdError::NoEvacuationRoute(_) => "Routing",
            CrowdError::NoRedistributionTarget { .. } => "Routing",
            CrowdError::LayoutError(_) => "Layout",
            CrowdError::ConfigurationError(_) => "Configuration",
            CrowdError::IoError(_) => "IO",
            CrowdError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for crowd control operations
pub type CrowdResult<T> = Result<T, CrowdError>;
