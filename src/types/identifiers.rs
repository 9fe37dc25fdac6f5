//! Identifier types for the crowd control system
//!
//! Zone identifiers are opaque string keys supplied by the facility layout
//! (e.g. "SEC1", "ENT1"). Plan and alert identifiers are UUID-based and
//! generated internally.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a zone within a facility
///
/// Zone ids are chosen by whoever builds the facility layout and are treated
/// as opaque keys throughout the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Create a zone id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ZoneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier for an evacuation plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanId(pub Uuid);

impl PlanId {
    /// Create a new random plan ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PLAN_{}", self.0.simple())
    }
}

impl Serialize for PlanId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("PLAN_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for PlanId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(uuid_str) = s.strip_prefix("PLAN_") {
            let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
            Ok(PlanId(uuid))
        } else {
            // Fallback: try to parse as raw UUID for backward compatibility
            let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
            Ok(PlanId(uuid))
        }
    }
}

/// Unique identifier for a critical-congestion alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertId(pub Uuid);

impl AlertId {
    /// Create a new random alert ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALERT_{}", self.0.simple())
    }
}

impl Serialize for AlertId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("ALERT_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for AlertId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(uuid_str) = s.strip_prefix("ALERT_") {
            let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
            Ok(AlertId(uuid))
        } else {
            // Fallback: try to parse as raw UUID for backward compatibility
            let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
            Ok(AlertId(uuid))
        }
    }
}
