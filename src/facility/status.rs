//! Zone status snapshots
//!
//! The status snapshot is the sole externally visible view of a zone's
//! state; it is plain serializable data, ready for whatever wire format an
//! outer request layer chooses.

use crate::types::{CongestionBand, ZoneId};
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a zone's state, including derived fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStatus {
    /// Zone identifier
    pub id: ZoneId,
    /// Human-readable zone name
    pub name: String,
    /// Headcount at snapshot time
    pub current_crowd: u32,
    /// Maximum concurrent occupancy
    pub capacity: u32,
    /// Congestion level on a 0-100 scale
    pub congestion_level: f64,
    /// Whether congestion was strictly above the critical threshold
    pub is_critical: bool,
    /// Whether the zone is a valid evacuation endpoint
    pub is_exit: bool,
    /// Occupancy-to-capacity ratio on a 0-100 scale
    pub utilization_rate: f64,
}

impl ZoneStatus {
    /// Classify the congestion level into a coarse display band
    pub fn congestion_band(&self, critical_threshold: f64) -> CongestionBand {
        CongestionBand::classify(self.congestion_level, critical_threshold)
    }
}
