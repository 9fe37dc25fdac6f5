//! Evacuation plans and operation reports
//!
//! Plain-data results of controller operations: the emergency evacuation
//! plan, redistribution reports, and alternative-route listings. All of it
//! serializes directly for whatever request layer sits in front.

use crate::facility::ZoneStatus;
use crate::types::{EvacuationPriority, PlanId, ZoneId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One zone's entry in an emergency evacuation plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationPlanEntry {
    /// The zone being evacuated
    pub zone_id: ZoneId,
    /// Human-readable zone name
    pub zone_name: String,
    /// Headcount in the zone at planning time
    pub crowd: u32,
    /// Evacuation route as zone names, source to exit
    pub route: Vec<String>,
    /// Estimated evacuation time in minutes (hops x minutes-per-hop)
    pub estimated_minutes: u32,
    /// Planning priority: high for zones critical at planning time
    pub priority: EvacuationPriority,
}

/// A complete emergency evacuation plan
///
/// Entries are ordered most-congested first; that ordering is a planning
/// priority, not an execution guarantee. Zones with no reachable exit are
/// omitted. Drawing up a plan moves nobody.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvacuationPlan {
    /// Unique identifier for this plan
    pub id: PlanId,
    /// When the plan was drawn up
    pub created_at: DateTime<Utc>,
    /// Per-zone evacuation entries, most congested first
    pub entries: Vec<EvacuationPlanEntry>,
}

impl EvacuationPlan {
    /// Create a plan from already-ordered entries
    pub fn new(entries: Vec<EvacuationPlanEntry>) -> Self {
        Self { id: PlanId::new(), created_at: Utc::now(), entries }
    }

    /// Number of people covered by the plan
    pub fn total_crowd(&self) -> u64 {
        self.entries.iter().map(|e| e.crowd as u64).sum()
    }

    /// Number of high-priority entries
    pub fn high_priority_count(&self) -> usize {
        self.entries.iter().filter(|e| e.priority == EvacuationPriority::High).count()
    }

    /// Write the plan to a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }
}

/// Result of a successful crowd redistribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedistributionReport {
    /// Human-readable summary of what moved where
    pub message: String,
    /// People moved
    pub crowd_size: u32,
    /// The path from source to target, as zone names
    pub path: Vec<String>,
    /// Source zone status after the move
    pub source_zone: ZoneStatus,
    /// Target zone status after the move
    pub target_zone: ZoneStatus,
}

/// An alternative route around the currently critical zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRoute {
    /// The route as zone ids, source to exit
    pub path: Vec<ZoneId>,
    /// Name of the exit zone the route reaches
    pub exit_zone: String,
    /// Mean congestion level over the route
    pub congestion_score: f64,
}
