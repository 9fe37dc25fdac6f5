//! Zone registry and facility graph ownership
//!
//! This module contains the ZoneRegistry struct: the single owner of every
//! zone in a facility, with insertion-ordered storage, id-based lookup, and
//! the exit-zone set.

use crate::facility::zone::Zone;
use crate::types::ZoneId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A collection of zones with lookup capabilities
///
/// Zones are stored in insertion order (overview output is deterministic)
/// with a quick id-to-index map alongside. Adjacency lists hold zone ids
/// that index back into this registry, so the registry is the arena that
/// owns the whole graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRegistry {
    /// All zones in insertion order
    zones: Vec<Zone>,
    /// Quick lookup map from zone ID to index
    zone_index: HashMap<ZoneId, usize>,
    /// Ids of zones marked as evacuation exits, deduplicated
    exit_zones: Vec<ZoneId>,
}

impl ZoneRegistry {
    /// Create a new empty zone registry
    pub fn new() -> Self {
        Self { zones: Vec::new(), zone_index: HashMap::new(), exit_zones: Vec::new() }
    }

    /// Add a zone to the registry
    ///
    /// A duplicate id overwrites the existing zone in place (last write
    /// wins); the zone keeps its original position in the insertion order.
    pub fn add_zone(&mut self, zone: Zone) {
        match self.zone_index.get(&zone.id) {
            Some(&idx) => {
                self.zones[idx] = zone;
            }
            None => {
                let idx = self.zones.len();
                self.zone_index.insert(zone.id.clone(), idx);
                self.zones.push(zone);
            }
        }
    }

    /// Get a zone by ID
    pub fn get(&self, zone_id: &ZoneId) -> Option<&Zone> {
        self.zone_index.get(zone_id).and_then(|&idx| self.zones.get(idx))
    }

    /// Get a mutable zone by ID
    pub fn get_mut(&mut self, zone_id: &ZoneId) -> Option<&mut Zone> {
        match self.zone_index.get(zone_id) {
            Some(&idx) => self.zones.get_mut(idx),
            None => None,
        }
    }

    /// Check whether a zone id is registered
    pub fn contains(&self, zone_id: &ZoneId) -> bool {
        self.zone_index.contains_key(zone_id)
    }

    /// Connect two zones with an undirected edge
    ///
    /// Returns false without touching either zone if one of the ids is
    /// unknown; repeated connections are no-ops.
    pub fn connect_zones(&mut self, a: &ZoneId, b: &ZoneId) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }

        if let Some(zone_a) = self.get_mut(a) {
            zone_a.add_adjacent(b.clone());
        }
        if let Some(zone_b) = self.get_mut(b) {
            zone_b.add_adjacent(a.clone());
        }
        true
    }

    /// Mark a zone as an evacuation exit
    ///
    /// Returns false if the id is unknown. Re-marking an exit zone is
    /// harmless; the exit set is deduplicated by id.
    pub fn mark_exit(&mut self, zone_id: &ZoneId) -> bool {
        match self.get_mut(zone_id) {
            Some(zone) => {
                zone.is_exit = true;
                if !self.exit_zones.contains(zone_id) {
                    self.exit_zones.push(zone_id.clone());
                }
                true
            }
            None => false,
        }
    }

    /// All zones in insertion order
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Ids of the exit zones in marking order
    pub fn exit_zones(&self) -> &[ZoneId] {
        &self.exit_zones
    }

    /// Total number of zones
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Sum of all zone capacities
    pub fn total_capacity(&self) -> u64 {
        self.zones.iter().map(|z| z.capacity as u64).sum()
    }

    /// Sum of all zone headcounts
    pub fn total_occupancy(&self) -> u64 {
        self.zones.iter().map(|z| z.current_crowd() as u64).sum()
    }

    /// Ids of all currently critical zones, in registry order
    pub fn critical_zone_ids(&self) -> Vec<ZoneId> {
        self.zones.iter().filter(|z| z.is_critical()).map(|z| z.id.clone()).collect()
    }

    /// Validate the registry's internal consistency
    ///
    /// Every adjacency reference must point at a registered zone and every
    /// exit id must resolve to a zone flagged as an exit.
    pub fn validate(&self) -> Result<(), String> {
        for zone in &self.zones {
            for adjacent in zone.adjacent_zones() {
                if !self.contains(adjacent) {
                    return Err(format!(
                        "Zone {} references unknown adjacent zone {}",
                        zone.id, adjacent
                    ));
                }
            }
        }

        for exit_id in &self.exit_zones {
            match self.get(exit_id) {
                Some(zone) if zone.is_exit => {}
                Some(_) => {
                    return Err(format!("Exit zone {} is not flagged as an exit", exit_id));
                }
                None => {
                    return Err(format!("Exit set references unknown zone {}", exit_id));
                }
            }
        }

        Ok(())
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
