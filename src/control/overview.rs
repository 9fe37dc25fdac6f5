//! Facility-wide aggregate snapshot
//!
//! The system overview is what the monitoring loop emits every tick and
//! what dashboards poll: totals, utilization, critical count, and a status
//! snapshot of every zone in registry order.

use crate::facility::{ZoneRegistry, ZoneStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time aggregate view of the whole facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemOverview {
    /// Number of registered zones
    pub total_zones: usize,
    /// Sum of all zone capacities
    pub total_capacity: u64,
    /// Sum of all zone headcounts
    pub total_crowd: u64,
    /// Facility-wide occupancy-to-capacity ratio on a 0-100 scale
    pub overall_utilization: f64,
    /// Number of zones currently critical
    pub critical_zones: usize,
    /// Mean congestion level across all zones
    pub average_congestion: f64,
    /// Number of zones marked as evacuation exits
    pub exit_zones: usize,
    /// Whether an emergency evacuation has been initiated
    pub emergency_active: bool,
    /// Status snapshot of every zone, in registry insertion order
    pub zones_status: Vec<ZoneStatus>,
    /// When this overview was generated
    pub generated_at: DateTime<Utc>,
}

impl SystemOverview {
    /// Capture an overview of the registry's current state
    ///
    /// A facility with no zones (or no capacity) reports zero utilization
    /// and zero average congestion rather than dividing by zero.
    pub fn capture(registry: &ZoneRegistry, emergency_active: bool) -> Self {
        let total_capacity = registry.total_capacity();
        let total_crowd = registry.total_occupancy();
        let zone_count = registry.zone_count();

        let overall_utilization = if total_capacity == 0 {
            0.0
        } else {
            (total_crowd as f64 / total_capacity as f64) * 100.0
        };

        let average_congestion = if zone_count == 0 {
            0.0
        } else {
            registry.zones().iter().map(|z| z.congestion_level()).sum::<f64>()
                / zone_count as f64
        };

        Self {
            total_zones: zone_count,
            total_capacity,
            total_crowd,
            overall_utilization,
            critical_zones: registry.zones().iter().filter(|z| z.is_critical()).count(),
            average_congestion,
            exit_zones: registry.exit_zones().len(),
            emergency_active,
            zones_status: registry.zones().iter().map(|z| z.status()).collect(),
            generated_at: Utc::now(),
        }
    }
}
