//! Evacuation route ranking and congestion scanning
//!
//! Ranks candidate routes to the facility's exits under a crowd-size
//! constraint, and scans for congested zones within a hop radius.

use crate::facility::ZoneRegistry;
use crate::routing::route::Route;
use crate::routing::traversal::{shortest_path, zones_within_distance};
use crate::types::ZoneId;
use std::cmp::Ordering;

/// Weight applied to hop distance in the composite route score
///
/// Keeps distance a minor tiebreaker: congestion dominates unless two routes
/// are similarly congested.
pub const DISTANCE_TIEBREAK_WEIGHT: f64 = 0.1;

/// Rank evacuation routes from a zone to every reachable exit
///
/// For each exit the shortest path is evaluated against `crowd_size`.
/// Routes that fit the crowd always rank above routes that do not,
/// regardless of score; within each group the composite
/// `congestion_score + distance * 0.1` sorts ascending. Unreachable exits
/// are omitted entirely.
pub fn find_evacuation_routes(
    registry: &ZoneRegistry,
    start: &ZoneId,
    crowd_size: u32,
) -> Vec<Route> {
    if !registry.contains(start) || registry.exit_zones().is_empty() {
        return Vec::new();
    }

    let mut routes: Vec<Route> = registry
        .exit_zones()
        .to_vec()
        .into_iter()
        .filter_map(|exit| {
            shortest_path(registry, start, &exit)
                .map(|path| Route::evaluate(registry, path, exit, crowd_size))
        })
        .collect();

    routes.sort_by(compare_routes);
    routes
}

/// Comparator implementing accommodation-first, then composite score
fn compare_routes(a: &Route, b: &Route) -> Ordering {
    // Routes that fit the crowd always sort first
    b.can_accommodate.cmp(&a.can_accommodate).then_with(|| {
        let score_a = a.congestion_score + a.distance as f64 * DISTANCE_TIEBREAK_WEIGHT;
        let score_b = b.congestion_score + b.distance as f64 * DISTANCE_TIEBREAK_WEIGHT;
        score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal)
    })
}

/// Find congested zones within a hop radius of a starting zone
///
/// Returns `(zone id, hop distance)` pairs for every zone whose congestion
/// level is at or above `threshold`, sorted by congestion level descending.
pub fn critical_zones_within(
    registry: &ZoneRegistry,
    start: &ZoneId,
    radius: usize,
    threshold: f64,
) -> Vec<(ZoneId, usize)> {
    let mut hits: Vec<(ZoneId, usize)> = zones_within_distance(registry, start, radius)
        .into_iter()
        .filter(|(id, _)| {
            registry.get(id).map(|zone| zone.congestion_level() >= threshold).unwrap_or(false)
        })
        .collect();

    hits.sort_by(|(a, _), (b, _)| {
        let level_a = registry.get(a).map(|z| z.congestion_level()).unwrap_or(0.0);
        let level_b = registry.get(b).map(|z| z.congestion_level()).unwrap_or(0.0);
        level_b.partial_cmp(&level_a).unwrap_or(Ordering::Equal)
    });

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::Zone;

    /// Hub H connected to two exits: X1 via congested M1, X2 via clear M2
    fn two_exit_registry() -> ZoneRegistry {
        let mut registry = ZoneRegistry::new();
        for (id, capacity) in
            [("H", 100u32), ("M1", 100), ("M2", 100), ("X1", 100), ("X2", 100)]
        {
            registry.add_zone(Zone::new(id, format!("Zone {}", id), capacity, 0.0, 0.0));
        }
        registry.connect_zones(&ZoneId::new("H"), &ZoneId::new("M1"));
        registry.connect_zones(&ZoneId::new("H"), &ZoneId::new("M2"));
        registry.connect_zones(&ZoneId::new("M1"), &ZoneId::new("X1"));
        registry.connect_zones(&ZoneId::new("M2"), &ZoneId::new("X2"));
        registry.mark_exit(&ZoneId::new("X1"));
        registry.mark_exit(&ZoneId::new("X2"));
        registry
    }

    #[test]
    fn test_less_congested_route_wins() {
        let mut registry = two_exit_registry();
        registry.get_mut(&ZoneId::new("M1")).unwrap().add_crowd(90);

        let routes = find_evacuation_routes(&registry, &ZoneId::new("H"), 5);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].exit_zone, ZoneId::new("X2"));
        assert_eq!(routes[1].exit_zone, ZoneId::new("X1"));
    }

    #[test]
    fn test_accommodating_route_always_ranks_first() {
        let mut registry = two_exit_registry();

        // The clear route through M2 cannot take the crowd (only 10 spare),
        // the congested route through M1 can.
        registry.get_mut(&ZoneId::new("M2")).unwrap().add_crowd(90);
        registry.get_mut(&ZoneId::new("M1")).unwrap().add_crowd(40);

        let routes = find_evacuation_routes(&registry, &ZoneId::new("H"), 50);
        assert_eq!(routes.len(), 2);

        // M1's route fits 60 >= 50 even though its congestion is higher than
        // zero-congestion H alone would suggest; M2's route fits only 10.
        assert!(routes[0].can_accommodate);
        assert_eq!(routes[0].exit_zone, ZoneId::new("X1"));
        assert!(!routes[1].can_accommodate);
    }

    #[test]
    fn test_distance_breaks_congestion_ties() {
        let mut registry = two_exit_registry();

        // A third exit adjacent to the hub, everything uncongested
        registry.add_zone(Zone::new("X3", "Zone X3", 100, 0.0, 0.0));
        registry.connect_zones(&ZoneId::new("H"), &ZoneId::new("X3"));
        registry.mark_exit(&ZoneId::new("X3"));

        let routes = find_evacuation_routes(&registry, &ZoneId::new("H"), 5);
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].exit_zone, ZoneId::new("X3"));
        assert_eq!(routes[0].distance, 1);
    }

    #[test]
    fn test_unreachable_exits_are_omitted() {
        let mut registry = two_exit_registry();
        registry.add_zone(Zone::new("X9", "Unreachable Exit", 100, 9.0, 9.0));
        registry.mark_exit(&ZoneId::new("X9"));

        let routes = find_evacuation_routes(&registry, &ZoneId::new("H"), 5);
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.exit_zone != ZoneId::new("X9")));
    }

    #[test]
    fn test_no_exits_means_no_routes() {
        let mut registry = ZoneRegistry::new();
        registry.add_zone(Zone::new("A", "Zone A", 100, 0.0, 0.0));

        assert!(find_evacuation_routes(&registry, &ZoneId::new("A"), 5).is_empty());
    }

    #[test]
    fn test_unknown_start_means_no_routes() {
        let registry = two_exit_registry();
        assert!(find_evacuation_routes(&registry, &ZoneId::new("X"), 5).is_empty());
    }

    #[test]
    fn test_critical_zones_within_radius() {
        let mut registry = two_exit_registry();
        registry.get_mut(&ZoneId::new("M1")).unwrap().add_crowd(85);
        registry.get_mut(&ZoneId::new("X1")).unwrap().add_crowd(95);

        let hits = critical_zones_within(&registry, &ZoneId::new("H"), 2, 80.0);

        // Sorted by congestion descending: X1 (95) before M1 (85)
        assert_eq!(
            hits,
            vec![(ZoneId::new("X1"), 2), (ZoneId::new("M1"), 1)]
        );
    }

    #[test]
    fn test_critical_zones_threshold_is_inclusive() {
        let mut registry = two_exit_registry();
        registry.get_mut(&ZoneId::new("M1")).unwrap().add_crowd(80);

        let hits = critical_zones_within(&registry, &ZoneId::new("H"), 2, 80.0);
        assert_eq!(hits, vec![(ZoneId::new("M1"), 1)]);
    }

    #[test]
    fn test_critical_zones_respects_radius() {
        let mut registry = two_exit_registry();
        registry.get_mut(&ZoneId::new("X1")).unwrap().add_crowd(95);

        // X1 is two hops out; a radius of 1 must not see it
        assert!(critical_zones_within(&registry, &ZoneId::new("H"), 1, 80.0).is_empty());
    }
}
