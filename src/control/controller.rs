//! Facility controller
//!
//! The controller owns the authoritative zone registry and exit set for one
//! facility instance and exposes every mutation and aggregate query over it.
//! All state lives behind a single mutex: synchronous callers and the
//! background loops serialize through the same boundary, so per-zone
//! mutations and the redistribution remove-then-add pair are atomic to every
//! reader.

use crate::control::error::{CrowdError, CrowdResult};
use crate::control::overview::SystemOverview;
use crate::control::plan::{
    AlternativeRoute, EvacuationPlan, EvacuationPlanEntry, RedistributionReport,
};
use crate::facility::{LayoutSpec, Zone, ZoneRegistry, ZoneStatus};
use crate::routing::{
    alternative_route, congestion_score, find_evacuation_routes, shortest_path,
    zones_within_distance, Route,
};
use crate::types::{AlertId, EvacuationPriority, FacilityConfig, ZoneId};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Mutable facility state guarded by the controller's mutex
#[derive(Debug)]
struct FacilityState {
    registry: ZoneRegistry,
    emergency_active: bool,
}

/// Owner of one facility's zone registry and routing operations
///
/// Share a controller between callers and background loops by wrapping it in
/// an [`Arc`](std::sync::Arc); every operation takes `&self`.
#[derive(Debug)]
pub struct CrowdController {
    config: FacilityConfig,
    state: Mutex<FacilityState>,
}

impl CrowdController {
    /// Create a controller with an empty facility
    pub fn new(config: FacilityConfig) -> Self {
        Self {
            config,
            state: Mutex::new(FacilityState {
                registry: ZoneRegistry::new(),
                emergency_active: false,
            }),
        }
    }

    /// Create a controller over an already-built registry
    pub fn from_registry(config: FacilityConfig, registry: ZoneRegistry) -> Self {
        Self {
            config,
            state: Mutex::new(FacilityState { registry, emergency_active: false }),
        }
    }

    /// Build a controller from a declarative layout
    #[instrument(skip(config, layout), fields(zones = layout.zones.len()))]
    pub fn from_layout(config: FacilityConfig, layout: &LayoutSpec) -> CrowdResult<Self> {
        let registry =
            layout.build(config.critical_threshold).map_err(CrowdError::layout_error)?;
        info!(
            zones = registry.zone_count(),
            exits = registry.exit_zones().len(),
            "Facility built from layout"
        );
        Ok(Self::from_registry(config, registry))
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    /// Lock the facility state, recovering from poisoning
    ///
    /// A panic while holding the lock must not take the whole facility down
    /// with it; the state is clamped-invariant by construction.
    fn lock_state(&self) -> MutexGuard<'_, FacilityState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ---- Topology building ----

    /// Register a new zone
    ///
    /// A duplicate id overwrites the existing zone (last write wins).
    pub fn add_zone(
        &self,
        id: impl Into<ZoneId>,
        name: impl Into<String>,
        capacity: u32,
        x: f64,
        y: f64,
    ) -> ZoneStatus {
        let zone = Zone::with_threshold(id, name, capacity, x, y, self.config.critical_threshold);
        let status = zone.status();
        self.lock_state().registry.add_zone(zone);
        status
    }

    /// Connect two zones bidirectionally
    ///
    /// Fails without partial mutation if either id is unknown.
    pub fn connect(&self, a: &ZoneId, b: &ZoneId) -> CrowdResult<()> {
        let mut state = self.lock_state();
        if !state.registry.contains(a) {
            return Err(CrowdError::ZoneNotFound(a.clone()));
        }
        if !state.registry.contains(b) {
            return Err(CrowdError::ZoneNotFound(b.clone()));
        }
        state.registry.connect_zones(a, b);
        Ok(())
    }

    /// Mark a zone as an evacuation exit
    ///
    /// Re-marking an exit is harmless; the exit set stays deduplicated.
    pub fn mark_exit(&self, zone_id: &ZoneId) -> CrowdResult<()> {
        let mut state = self.lock_state();
        if state.registry.mark_exit(zone_id) {
            Ok(())
        } else {
            Err(CrowdError::ZoneNotFound(zone_id.clone()))
        }
    }

    // ---- State mutation ----

    /// Move a crowd into a zone and run critical-situation detection
    ///
    /// Returns the zone's status after the (clamped) mutation.
    #[instrument(skip(self))]
    pub fn move_crowd(&self, zone_id: &ZoneId, crowd_size: u32) -> CrowdResult<ZoneStatus> {
        let mut state = self.lock_state();

        let status = match state.registry.get_mut(zone_id) {
            Some(zone) => {
                zone.add_crowd(crowd_size);
                zone.status()
            }
            None => return Err(CrowdError::ZoneNotFound(zone_id.clone())),
        };

        detect_and_handle_critical(&state.registry);
        Ok(status)
    }

    /// Apply a signed occupancy delta without critical-situation handling
    ///
    /// This is the crowd flow simulator's entry point; monitoring picks up
    /// any resulting criticality on its next tick.
    pub fn perturb_zone(&self, zone_id: &ZoneId, delta: i64) -> CrowdResult<ZoneStatus> {
        let mut state = self.lock_state();
        match state.registry.get_mut(zone_id) {
            Some(zone) => {
                zone.apply_delta(delta);
                Ok(zone.status())
            }
            None => Err(CrowdError::ZoneNotFound(zone_id.clone())),
        }
    }

    /// Redistribute a crowd from a zone to the best nearby zone
    ///
    /// Candidates are zones within the configured hop radius (excluding the
    /// source) that can take the whole crowd, ranked ascending by
    /// `congestion_level + hop_distance`; ties resolve in BFS discovery
    /// order. The remove-then-add pair executes under the controller lock,
    /// so no reader ever sees the crowd counted in both zones or neither.
    #[instrument(skip(self))]
    pub fn redistribute_crowd(
        &self,
        from: &ZoneId,
        crowd_size: u32,
    ) -> CrowdResult<RedistributionReport> {
        let mut state = self.lock_state();
        let radius = self.config.redistribution_radius;

        let source = state
            .registry
            .get(from)
            .ok_or_else(|| CrowdError::ZoneNotFound(from.clone()))?;
        let available = source.current_crowd();
        let source_name = source.name.clone();

        if available < crowd_size {
            return Err(CrowdError::InsufficientOccupancy {
                zone: from.clone(),
                requested: crowd_size,
                available,
            });
        }

        // Find nearby zones with room for the whole crowd
        let mut candidates: Vec<(ZoneId, usize)> =
            zones_within_distance(&state.registry, from, radius)
                .into_iter()
                .filter(|(id, _)| id != from)
                .filter(|(id, _)| {
                    state
                        .registry
                        .get(id)
                        .map(|zone| zone.can_accommodate(crowd_size))
                        .unwrap_or(false)
                })
                .collect();

        candidates.sort_by(|(a_id, a_dist), (b_id, b_dist)| {
            let score_a = candidate_score(&state.registry, a_id, *a_dist);
            let score_b = candidate_score(&state.registry, b_id, *b_dist);
            score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal)
        });

        let (target_id, _) = candidates
            .first()
            .cloned()
            .ok_or(CrowdError::NoRedistributionTarget { zone: from.clone(), radius })?;

        let path = shortest_path(&state.registry, from, &target_id).unwrap_or_default();
        let path_names: Vec<String> = path
            .iter()
            .filter_map(|id| state.registry.get(id).map(|z| z.name.clone()))
            .collect();

        // Execute the redistribution as one critical section
        if let Some(zone) = state.registry.get_mut(from) {
            zone.remove_crowd(crowd_size);
        }
        if let Some(zone) = state.registry.get_mut(&target_id) {
            zone.add_crowd(crowd_size);
        }

        let source_status = state
            .registry
            .get(from)
            .map(|z| z.status())
            .ok_or_else(|| CrowdError::ZoneNotFound(from.clone()))?;
        let target_status = state
            .registry
            .get(&target_id)
            .map(|z| z.status())
            .ok_or_else(|| CrowdError::ZoneNotFound(target_id.clone()))?;

        let message = format!(
            "Redistributed {} people from {} to {}",
            crowd_size, source_name, target_status.name
        );
        info!(
            source = %from,
            target = %target_id,
            crowd_size,
            "Crowd redistributed"
        );

        Ok(RedistributionReport {
            message,
            crowd_size,
            path: path_names,
            source_zone: source_status,
            target_zone: target_status,
        })
    }

    // ---- Routing queries ----

    /// Best evacuation route for a crowd leaving a zone
    ///
    /// Returns the top-ranked route over all registered exits, or an error
    /// when the zone is unknown or no exit is reachable.
    #[instrument(skip(self))]
    pub fn optimal_evacuation_route(
        &self,
        from: &ZoneId,
        crowd_size: u32,
    ) -> CrowdResult<Route> {
        let state = self.lock_state();

        if !state.registry.contains(from) {
            return Err(CrowdError::ZoneNotFound(from.clone()));
        }

        find_evacuation_routes(&state.registry, from, crowd_size)
            .into_iter()
            .next()
            .ok_or_else(|| CrowdError::NoEvacuationRoute(from.clone()))
    }

    /// Alternative routes from a zone to each exit, avoiding the other
    /// currently critical zones
    ///
    /// Routes are sorted by congestion score ascending; exits unreachable
    /// without crossing a critical zone are omitted.
    pub fn alternative_routes(&self, zone_id: &ZoneId) -> CrowdResult<Vec<AlternativeRoute>> {
        let state = self.lock_state();

        if !state.registry.contains(zone_id) {
            return Err(CrowdError::ZoneNotFound(zone_id.clone()));
        }

        Ok(alternative_routes_for(&state.registry, zone_id))
    }

    // ---- Aggregate queries ----

    /// Status snapshot of a single zone
    pub fn zone_status(&self, zone_id: &ZoneId) -> CrowdResult<ZoneStatus> {
        self.lock_state()
            .registry
            .get(zone_id)
            .map(|zone| zone.status())
            .ok_or_else(|| CrowdError::ZoneNotFound(zone_id.clone()))
    }

    /// Status snapshots of every zone, in registry order
    pub fn all_zone_statuses(&self) -> Vec<ZoneStatus> {
        self.lock_state().registry.zones().iter().map(|z| z.status()).collect()
    }

    /// Zones currently above the critical congestion threshold
    ///
    /// Pure query; no alerting side effects.
    pub fn critical_zones(&self) -> Vec<ZoneStatus> {
        self.lock_state()
            .registry
            .zones()
            .iter()
            .filter(|z| z.is_critical())
            .map(|z| z.status())
            .collect()
    }

    /// Scan for critical zones and run critical-situation handling
    ///
    /// This is the detection pass the monitoring loop runs each tick and
    /// `move_crowd` triggers after every mutation: alerts are emitted and
    /// alternative routes computed for each critical zone.
    pub fn check_critical_situations(&self) -> Vec<ZoneStatus> {
        let state = self.lock_state();
        detect_and_handle_critical(&state.registry)
    }

    /// Aggregate snapshot of the whole facility
    pub fn system_overview(&self) -> SystemOverview {
        let state = self.lock_state();
        SystemOverview::capture(&state.registry, state.emergency_active)
    }

    /// Whether an emergency evacuation has been initiated
    pub fn is_emergency_active(&self) -> bool {
        self.lock_state().emergency_active
    }

    // ---- Emergency planning ----

    /// Draw up an emergency evacuation plan for every occupied zone
    ///
    /// Zones are planned most-congested first; each entry carries the
    /// best-ranked route, an estimated time, and a priority tag. Zones with
    /// no reachable exit are omitted. Planning moves nobody, but it does
    /// flag the facility as being in an emergency.
    #[instrument(skip(self))]
    pub fn initiate_emergency_evacuation(&self) -> EvacuationPlan {
        let mut state = self.lock_state();
        state.emergency_active = true;
        warn!("Emergency evacuation initiated");

        let mut occupied: Vec<(ZoneId, String, u32, bool)> = state
            .registry
            .zones()
            .iter()
            .filter(|z| z.current_crowd() > 0)
            .map(|z| (z.id.clone(), z.name.clone(), z.current_crowd(), z.is_critical()))
            .collect();

        // Most congested zones are planned first
        occupied.sort_by(|a, b| {
            let level_a =
                state.registry.get(&a.0).map(|z| z.congestion_level()).unwrap_or(0.0);
            let level_b =
                state.registry.get(&b.0).map(|z| z.congestion_level()).unwrap_or(0.0);
            level_b.partial_cmp(&level_a).unwrap_or(Ordering::Equal)
        });

        let mut entries = Vec::new();
        for (zone_id, zone_name, crowd, was_critical) in occupied {
            let routes = find_evacuation_routes(&state.registry, &zone_id, crowd);
            let Some(best) = routes.into_iter().next() else {
                debug!(zone = %zone_id, "No reachable exit; omitted from evacuation plan");
                continue;
            };

            entries.push(EvacuationPlanEntry {
                zone_id,
                zone_name,
                crowd,
                route: best.zone_names(&state.registry),
                estimated_minutes: best.distance as u32 * self.config.minutes_per_hop,
                priority: if was_critical {
                    EvacuationPriority::High
                } else {
                    EvacuationPriority::Normal
                },
            });
        }

        let plan = EvacuationPlan::new(entries);
        info!(
            plan_id = %plan.id,
            zones = plan.entries.len(),
            people = plan.total_crowd(),
            "Evacuation plan assembled"
        );
        plan
    }
}

/// Redistribution candidate score: congestion level plus hop distance
fn candidate_score(registry: &ZoneRegistry, zone_id: &ZoneId, distance: usize) -> f64 {
    registry.get(zone_id).map(|z| z.congestion_level()).unwrap_or(0.0) + distance as f64
}

/// Scan for critical zones and, if any exist, handle the situation
///
/// Handling is alerting plus alternative-route computation; it mutates
/// nothing.
fn detect_and_handle_critical(registry: &ZoneRegistry) -> Vec<ZoneStatus> {
    let critical: Vec<ZoneStatus> =
        registry.zones().iter().filter(|z| z.is_critical()).map(|z| z.status()).collect();

    if !critical.is_empty() {
        handle_critical_situation(registry, &critical);
    }

    critical
}

/// Emit alerts and alternative routes for each critical zone
fn handle_critical_situation(registry: &ZoneRegistry, critical: &[ZoneStatus]) {
    warn!(count = critical.len(), "Critical congestion detected");

    for status in critical {
        let alert = AlertId::new();
        warn!(
            alert = %alert,
            zone = %status.id,
            name = %status.name,
            congestion = status.congestion_level,
            "Zone critically congested"
        );

        let alternatives = alternative_routes_for(registry, &status.id);
        if !alternatives.is_empty() {
            debug!(
                zone = %status.id,
                routes = alternatives.len(),
                "Alternative routes available"
            );
        }
    }
}

/// Alternative routes from a zone to each exit, avoiding every *other*
/// critical zone
fn alternative_routes_for(registry: &ZoneRegistry, zone_id: &ZoneId) -> Vec<AlternativeRoute> {
    let avoid: HashSet<ZoneId> =
        registry.critical_zone_ids().into_iter().filter(|id| id != zone_id).collect();

    let mut routes: Vec<AlternativeRoute> = registry
        .exit_zones()
        .iter()
        .filter_map(|exit| {
            alternative_route(registry, zone_id, exit, &avoid).map(|path| {
                let score = congestion_score(registry, &path);
                AlternativeRoute {
                    path,
                    exit_zone: registry
                        .get(exit)
                        .map(|z| z.name.clone())
                        .unwrap_or_else(|| exit.to_string()),
                    congestion_score: score,
                }
            })
        })
        .collect();

    routes.sort_by(|a, b| {
        a.congestion_score.partial_cmp(&b.congestion_score).unwrap_or(Ordering::Equal)
    });
    routes
}
