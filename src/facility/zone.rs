//! Zone model and occupancy accounting
//!
//! This module contains the Zone struct: a capacity-bounded node in the
//! facility graph with clamped occupancy tracking and synchronously derived
//! congestion state.

use crate::facility::status::ZoneStatus;
use crate::types::{config::defaults, ZoneId};
use serde::{Deserialize, Serialize};

/// 2D position of a zone, used for distance heuristics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// A capacity-bounded node in the facility graph
///
/// Occupancy is clamped to `[0, capacity]` on every mutation, and the derived
/// congestion level and critical flag are recomputed synchronously — a zone's
/// derived state is never stale.
///
/// Adjacency is stored as zone ids indexing into the owning
/// [`ZoneRegistry`](crate::facility::ZoneRegistry) rather than direct
/// references, so the registry stays the single owner of every zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Unique identifier for the zone
    pub id: ZoneId,
    /// Human-readable name of the zone
    pub name: String,
    /// Maximum concurrent occupancy
    pub capacity: u32,
    /// Current headcount, always within `[0, capacity]`
    current_crowd: u32,
    /// 2D position within the facility
    pub position: Position,
    /// Ids of adjacent zones (undirected edges, no duplicates)
    adjacent_zones: Vec<ZoneId>,
    /// Whether this zone is a valid evacuation endpoint
    pub is_exit: bool,
    /// Derived congestion level on a 0-100 scale
    congestion_level: f64,
    /// Derived critical flag (congestion strictly above the threshold)
    is_critical: bool,
    /// Congestion level above which this zone counts as critical
    critical_threshold: f64,
}

impl Zone {
    /// Create a new empty zone with the default critical threshold
    pub fn new(id: impl Into<ZoneId>, name: impl Into<String>, capacity: u32, x: f64, y: f64) -> Self {
        Self::with_threshold(id, name, capacity, x, y, defaults::CRITICAL_CONGESTION_THRESHOLD)
    }

    /// Create a new empty zone with an explicit critical threshold
    pub fn with_threshold(
        id: impl Into<ZoneId>,
        name: impl Into<String>,
        capacity: u32,
        x: f64,
        y: f64,
        critical_threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
            current_crowd: 0,
            position: Position { x, y },
            adjacent_zones: Vec::new(),
            is_exit: false,
            congestion_level: 0.0,
            is_critical: false,
            critical_threshold,
        }
    }

    /// Current headcount
    pub fn current_crowd(&self) -> u32 {
        self.current_crowd
    }

    /// Derived congestion level on a 0-100 scale
    pub fn congestion_level(&self) -> f64 {
        self.congestion_level
    }

    /// Whether congestion is strictly above the critical threshold
    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// Spare capacity still available in this zone
    pub fn available_capacity(&self) -> u32 {
        self.capacity - self.current_crowd
    }

    /// Ids of adjacent zones in insertion order
    ///
    /// Insertion order is part of the observable routing contract: BFS
    /// expands neighbors in this order, which breaks ties between
    /// equal-length paths.
    pub fn adjacent_zones(&self) -> &[ZoneId] {
        &self.adjacent_zones
    }

    /// Add an adjacent zone; inserting an already-present id is a no-op
    pub fn add_adjacent(&mut self, zone_id: ZoneId) {
        if !self.adjacent_zones.contains(&zone_id) {
            self.adjacent_zones.push(zone_id);
        }
    }

    /// Check whether the zone can take `additional` more people
    pub fn can_accommodate(&self, additional: u32) -> bool {
        self.current_crowd as u64 + additional as u64 <= self.capacity as u64
    }

    /// Add people to the zone, clamped at capacity
    pub fn add_crowd(&mut self, count: u32) {
        self.current_crowd = self.current_crowd.saturating_add(count).min(self.capacity);
        self.update_congestion_level();
    }

    /// Remove people from the zone, floored at zero
    pub fn remove_crowd(&mut self, count: u32) {
        self.current_crowd = self.current_crowd.saturating_sub(count);
        self.update_congestion_level();
    }

    /// Apply a signed occupancy delta
    ///
    /// Positive deltas add, negative deltas remove, both with the usual
    /// clamping. This is the entry point for the crowd flow simulator's
    /// random perturbations.
    pub fn apply_delta(&mut self, delta: i64) {
        let magnitude = delta.unsigned_abs().min(u32::MAX as u64) as u32;
        if delta >= 0 {
            self.add_crowd(magnitude);
        } else {
            self.remove_crowd(magnitude);
        }
    }

    /// Euclidean distance to another zone's position
    pub fn distance_to(&self, other: &Zone) -> f64 {
        let dx = self.position.x - other.position.x;
        let dy = self.position.y - other.position.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Snapshot the zone's full state, including derived fields
    ///
    /// This is the only window other components get into a zone's state.
    pub fn status(&self) -> ZoneStatus {
        ZoneStatus {
            id: self.id.clone(),
            name: self.name.clone(),
            current_crowd: self.current_crowd,
            capacity: self.capacity,
            congestion_level: self.congestion_level,
            is_critical: self.is_critical,
            is_exit: self.is_exit,
            utilization_rate: self.utilization_rate(),
        }
    }

    /// Occupancy-to-capacity ratio on a 0-100 scale (0 for zero capacity)
    fn utilization_rate(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            (self.current_crowd as f64 / self.capacity as f64) * 100.0
        }
    }

    /// Recompute congestion level and the critical flag
    ///
    /// Zero-capacity zones report 0 congestion: their occupancy can never
    /// leave zero, so they are never congested.
    fn update_congestion_level(&mut self) {
        self.congestion_level = if self.capacity == 0 {
            0.0
        } else {
            ((self.current_crowd as f64 / self.capacity as f64) * 100.0).min(100.0)
        };
        self.is_critical = self.congestion_level > self.critical_threshold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_creation() {
        let zone = Zone::new("Z1", "Test Zone", 100, 2.0, 3.0);

        assert_eq!(zone.id, ZoneId::new("Z1"));
        assert_eq!(zone.name, "Test Zone");
        assert_eq!(zone.capacity, 100);
        assert_eq!(zone.current_crowd(), 0);
        assert_eq!(zone.congestion_level(), 0.0);
        assert!(!zone.is_critical());
        assert!(!zone.is_exit);
        assert!(zone.adjacent_zones().is_empty());
        assert_eq!(zone.position.x, 2.0);
        assert_eq!(zone.position.y, 3.0);
    }

    #[test]
    fn test_add_crowd_updates_congestion() {
        let mut zone = Zone::new("Z1", "Test Zone", 100, 0.0, 0.0);

        zone.add_crowd(50);
        assert_eq!(zone.current_crowd(), 50);
        assert_eq!(zone.congestion_level(), 50.0);
        assert!(!zone.is_critical());

        zone.add_crowd(35);
        assert_eq!(zone.current_crowd(), 85);
        assert_eq!(zone.congestion_level(), 85.0);
        assert!(zone.is_critical());
    }

    #[test]
    fn test_add_crowd_clamps_at_capacity() {
        let mut zone = Zone::new("Z1", "Test Zone", 100, 0.0, 0.0);

        zone.add_crowd(250);
        assert_eq!(zone.current_crowd(), 100);
        assert_eq!(zone.congestion_level(), 100.0);
        assert!(zone.is_critical());
    }

    #[test]
    fn test_remove_crowd_floors_at_zero() {
        let mut zone = Zone::new("Z1", "Test Zone", 100, 0.0, 0.0);

        zone.add_crowd(30);
        zone.remove_crowd(80);
        assert_eq!(zone.current_crowd(), 0);
        assert_eq!(zone.congestion_level(), 0.0);
        assert!(!zone.is_critical());
    }

    #[test]
    fn test_critical_threshold_is_strict() {
        let mut zone = Zone::new("Z1", "Test Zone", 100, 0.0, 0.0);

        // Exactly 80% is not critical
        zone.add_crowd(80);
        assert_eq!(zone.congestion_level(), 80.0);
        assert!(!zone.is_critical());

        // One more person crosses the threshold
        zone.add_crowd(1);
        assert!(zone.is_critical());
    }

    #[test]
    fn test_custom_critical_threshold() {
        let mut zone = Zone::with_threshold("Z1", "Test Zone", 100, 0.0, 0.0, 60.0);

        zone.add_crowd(60);
        assert!(!zone.is_critical());

        zone.add_crowd(1);
        assert!(zone.is_critical());
    }

    #[test]
    fn test_invariants_hold_under_mixed_sequences() {
        let mut zone = Zone::new("Z1", "Test Zone", 75, 0.0, 0.0);

        let operations: [i64; 10] = [40, -10, 100, -200, 33, 0, -1, 75, -75, 20];
        for delta in operations {
            zone.apply_delta(delta);

            assert!(zone.current_crowd() <= zone.capacity);
            let expected =
                ((zone.current_crowd() as f64 / zone.capacity as f64) * 100.0).min(100.0);
            assert_eq!(zone.congestion_level(), expected);
            assert_eq!(zone.is_critical(), zone.congestion_level() > 80.0);
        }
    }

    #[test]
    fn test_can_accommodate() {
        let mut zone = Zone::new("Z1", "Test Zone", 100, 0.0, 0.0);
        zone.add_crowd(80);

        assert!(zone.can_accommodate(20));
        assert!(!zone.can_accommodate(21));
        assert!(zone.can_accommodate(0));
        assert_eq!(zone.available_capacity(), 20);
    }

    #[test]
    fn test_adjacency_insertion_is_idempotent() {
        let mut zone = Zone::new("Z1", "Test Zone", 100, 0.0, 0.0);

        zone.add_adjacent(ZoneId::new("Z2"));
        zone.add_adjacent(ZoneId::new("Z3"));
        zone.add_adjacent(ZoneId::new("Z2")); // Duplicate should be ignored

        assert_eq!(zone.adjacent_zones().len(), 2);
        assert_eq!(zone.adjacent_zones()[0], ZoneId::new("Z2"));
        assert_eq!(zone.adjacent_zones()[1], ZoneId::new("Z3"));
    }

    #[test]
    fn test_distance_to() {
        let zone_a = Zone::new("A", "Zone A", 100, 0.0, 0.0);
        let zone_b = Zone::new("B", "Zone B", 100, 3.0, 4.0);

        assert_eq!(zone_a.distance_to(&zone_b), 5.0);
        assert_eq!(zone_b.distance_to(&zone_a), 5.0);
        assert_eq!(zone_a.distance_to(&zone_a), 0.0);
    }

    #[test]
    fn test_zero_capacity_zone() {
        let mut zone = Zone::new("Z1", "Closed Area", 0, 0.0, 0.0);

        zone.add_crowd(10);
        assert_eq!(zone.current_crowd(), 0);
        assert_eq!(zone.congestion_level(), 0.0);
        assert!(!zone.is_critical());
        assert!(zone.can_accommodate(0));
        assert!(!zone.can_accommodate(1));
    }

    #[test]
    fn test_status_snapshot() {
        let mut zone = Zone::new("Z1", "Test Zone", 200, 0.0, 0.0);
        zone.add_crowd(50);

        let status = zone.status();
        assert_eq!(status.id, ZoneId::new("Z1"));
        assert_eq!(status.name, "Test Zone");
        assert_eq!(status.current_crowd, 50);
        assert_eq!(status.capacity, 200);
        assert_eq!(status.congestion_level, 25.0);
        assert_eq!(status.utilization_rate, 25.0);
        assert!(!status.is_critical);
        assert!(!status.is_exit);
    }
}
