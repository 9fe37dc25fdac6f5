//! Declarative facility layouts
//!
//! A layout is the startup-time description of a facility: the zones, the
//! undirected connections between them, and which zones are exits. Layouts
//! are plain serde data so they can be loaded from a JSON file by whatever
//! configuration loader sits in front of the system. A built-in stadium
//! layout is provided for demos and tests.

use crate::facility::registry::ZoneRegistry;
use crate::facility::zone::Zone;
use crate::types::ZoneId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Declarative description of a single zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// Unique zone identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Maximum concurrent occupancy
    pub capacity: u32,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// Declarative description of a whole facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Zones in registration order
    pub zones: Vec<ZoneSpec>,
    /// Undirected connections between zone ids
    pub connections: Vec<(String, String)>,
    /// Zone ids marked as evacuation exits
    pub exits: Vec<String>,
}

impl LayoutSpec {
    /// Load a layout from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read layout file {}: {}", path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse layout file {}: {}", path.display(), e))
    }

    /// Save the layout to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize layout: {}", e))?;
        fs::write(path.as_ref(), content)
            .map_err(|e| format!("Failed to write layout file: {}", e))
    }

    /// Build a zone registry from this layout
    ///
    /// Fails on a connection or exit naming an unknown zone id; a valid
    /// layout always produces a registry that passes
    /// [`ZoneRegistry::validate`].
    pub fn build(&self, critical_threshold: f64) -> Result<ZoneRegistry, String> {
        let mut registry = ZoneRegistry::new();

        for spec in &self.zones {
            registry.add_zone(Zone::with_threshold(
                spec.id.as_str(),
                spec.name.clone(),
                spec.capacity,
                spec.x,
                spec.y,
                critical_threshold,
            ));
        }

        for (a, b) in &self.connections {
            let (a, b) = (ZoneId::new(a.clone()), ZoneId::new(b.clone()));
            if !registry.connect_zones(&a, &b) {
                return Err(format!("Connection references unknown zone: {} - {}", a, b));
            }
        }

        for exit in &self.exits {
            let exit = ZoneId::new(exit.clone());
            if !registry.mark_exit(&exit) {
                return Err(format!("Exit references unknown zone: {}", exit));
            }
        }

        Ok(registry)
    }

    /// The built-in stadium demo layout
    ///
    /// Ten zones: an entrance, a concourse, four seating sections, a food
    /// court, restrooms, and two emergency exits. The entrance and both
    /// emergency exits are evacuation endpoints.
    pub fn stadium_demo() -> Self {
        let zone = |id: &str, name: &str, capacity: u32, x: f64, y: f64| ZoneSpec {
            id: id.to_string(),
            name: name.to_string(),
            capacity,
            x,
            y,
        };
        let edge = |a: &str, b: &str| (a.to_string(), b.to_string());

        Self {
            zones: vec![
                zone("ENT1", "Main Entrance", 200, 0.0, 0.0),
                zone("CON1", "Main Concourse", 500, 1.0, 0.0),
                zone("SEC1", "Section A", 300, 2.0, 1.0),
                zone("SEC2", "Section B", 300, 2.0, -1.0),
                zone("SEC3", "Section C", 250, 3.0, 1.0),
                zone("SEC4", "Section D", 250, 3.0, -1.0),
                zone("FOOD", "Food Court", 150, 1.0, 1.0),
                zone("REST", "Restrooms", 100, 1.0, -1.0),
                zone("EMR1", "Emergency Exit 1", 100, 4.0, 1.0),
                zone("EMR2", "Emergency Exit 2", 100, 4.0, -1.0),
            ],
            connections: vec![
                edge("ENT1", "CON1"),
                edge("CON1", "SEC1"),
                edge("CON1", "SEC2"),
                edge("CON1", "FOOD"),
                edge("CON1", "REST"),
                edge("SEC1", "SEC3"),
                edge("SEC2", "SEC4"),
                edge("SEC3", "EMR1"),
                edge("SEC4", "EMR2"),
                edge("FOOD", "SEC1"),
                edge("REST", "SEC2"),
            ],
            exits: vec!["ENT1".to_string(), "EMR1".to_string(), "EMR2".to_string()],
        }
    }
}
