//! Routes and their derived metrics
//!
//! A route is a transient result: an ordered path of adjacent zones plus the
//! metrics that make routes comparable — bottleneck capacity, mean
//! congestion, hop distance, and whether the route fits a requested crowd.

use crate::facility::ZoneRegistry;
use crate::types::ZoneId;
use serde::{Deserialize, Serialize};

/// An evaluated path from a source zone to an exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Ordered zone sequence from source to exit, inclusive
    pub path: Vec<ZoneId>,
    /// The exit zone this route terminates at
    pub exit_zone: ZoneId,
    /// Bottleneck headcount the route can still absorb (min spare capacity)
    pub capacity: u32,
    /// Mean congestion level over the path's zones
    pub congestion_score: f64,
    /// Edge count of the path
    pub distance: usize,
    /// Whether the bottleneck capacity covers the requested crowd size
    pub can_accommodate: bool,
}

impl Route {
    /// Evaluate a path's metrics against a requested crowd size
    pub fn evaluate(
        registry: &ZoneRegistry,
        path: Vec<ZoneId>,
        exit_zone: ZoneId,
        crowd_size: u32,
    ) -> Self {
        let capacity = route_capacity(registry, &path);
        let congestion_score = congestion_score(registry, &path);
        let distance = path.len().saturating_sub(1);

        Self {
            path,
            exit_zone,
            capacity,
            congestion_score,
            distance,
            can_accommodate: capacity >= crowd_size,
        }
    }

    /// Resolve the path to human-readable zone names
    pub fn zone_names(&self, registry: &ZoneRegistry) -> Vec<String> {
        self.path
            .iter()
            .filter_map(|id| registry.get(id).map(|zone| zone.name.clone()))
            .collect()
    }
}

/// Minimum spare capacity along a path (the bottleneck headcount)
///
/// An empty path has no capacity at all.
pub fn route_capacity(registry: &ZoneRegistry, path: &[ZoneId]) -> u32 {
    path.iter()
        .filter_map(|id| registry.get(id).map(|zone| zone.available_capacity()))
        .min()
        .unwrap_or(0)
}

/// Mean congestion level over a path's zones
///
/// An empty path scores 100: there is nothing to route through.
pub fn congestion_score(registry: &ZoneRegistry, path: &[ZoneId]) -> f64 {
    let levels: Vec<f64> = path
        .iter()
        .filter_map(|id| registry.get(id).map(|zone| zone.congestion_level()))
        .collect();

    if levels.is_empty() {
        return 100.0;
    }

    levels.iter().sum::<f64>() / levels.len() as f64
}
