//! Breadth-first traversal over the zone graph
//!
//! Pure functions over a [`ZoneRegistry`]: shortest paths, bounded-radius
//! enumeration, connectivity, and avoidance-constrained search. No state is
//! retained between calls; visited sets are scoped to a single search.
//!
//! All searches treat the absence of a path — and unknown endpoint ids — as
//! an ordinary empty result, never an error. Neighbors are expanded in
//! adjacency insertion order, which makes that order part of the observable
//! contract: among equal-length paths, the first one reached wins.

use crate::facility::ZoneRegistry;
use crate::types::ZoneId;
use std::collections::{HashMap, HashSet, VecDeque};

/// Find the shortest path between two zones by edge count
///
/// Returns the full path including both endpoints, `Some(vec![start])` when
/// the endpoints coincide, and `None` when either id is unknown or no path
/// exists.
pub fn shortest_path(
    registry: &ZoneRegistry,
    start: &ZoneId,
    end: &ZoneId,
) -> Option<Vec<ZoneId>> {
    if !registry.contains(start) || !registry.contains(end) {
        return None;
    }

    if start == end {
        return Some(vec![start.clone()]);
    }

    let mut queue = VecDeque::from([start.clone()]);
    let mut visited = HashSet::from([start.clone()]);
    let mut parents: HashMap<ZoneId, ZoneId> = HashMap::new();

    while let Some(current) = queue.pop_front() {
        let zone = registry.get(&current)?;

        for adjacent in zone.adjacent_zones() {
            if visited.contains(adjacent) {
                continue;
            }

            parents.insert(adjacent.clone(), current.clone());

            // Found the target zone
            if adjacent == end {
                return Some(reconstruct_path(&parents, start, end));
            }

            visited.insert(adjacent.clone());
            queue.push_back(adjacent.clone());
        }
    }

    None // No path found
}

/// Enumerate every zone reachable within `max_distance` hops
///
/// The start zone is included at distance 0 and zones exactly at
/// `max_distance` are recorded, but frontiers beyond it are not expanded.
/// Results come back in BFS discovery order (non-decreasing distance).
pub fn zones_within_distance(
    registry: &ZoneRegistry,
    start: &ZoneId,
    max_distance: usize,
) -> Vec<(ZoneId, usize)> {
    if !registry.contains(start) {
        return Vec::new();
    }

    let mut queue = VecDeque::from([(start.clone(), 0usize)]);
    let mut visited = HashSet::from([start.clone()]);
    let mut result = Vec::new();

    while let Some((current, distance)) = queue.pop_front() {
        result.push((current.clone(), distance));

        // Don't traverse beyond max distance
        if distance >= max_distance {
            continue;
        }

        if let Some(zone) = registry.get(&current) {
            for adjacent in zone.adjacent_zones() {
                if visited.insert(adjacent.clone()) {
                    queue.push_back((adjacent.clone(), distance + 1));
                }
            }
        }
    }

    result
}

/// Enumerate every zone reachable from `start`, in discovery order
pub fn connected_zones(registry: &ZoneRegistry, start: &ZoneId) -> Vec<ZoneId> {
    if !registry.contains(start) {
        return Vec::new();
    }

    let mut queue = VecDeque::from([start.clone()]);
    let mut visited = HashSet::from([start.clone()]);
    let mut connected = Vec::new();

    while let Some(current) = queue.pop_front() {
        connected.push(current.clone());

        if let Some(zone) = registry.get(&current) {
            for adjacent in zone.adjacent_zones() {
                if visited.insert(adjacent.clone()) {
                    queue.push_back(adjacent.clone());
                }
            }
        }
    }

    connected
}

/// Find a shortest path that stays clear of the avoid set
///
/// Avoided zones are never expanded, not even as intermediate hops. A start
/// or end zone inside the avoid set yields `None`: an avoided zone may not
/// appear anywhere in a returned path, endpoints included.
pub fn alternative_route(
    registry: &ZoneRegistry,
    start: &ZoneId,
    end: &ZoneId,
    avoid: &HashSet<ZoneId>,
) -> Option<Vec<ZoneId>> {
    if !registry.contains(start) || !registry.contains(end) {
        return None;
    }

    if avoid.contains(start) || avoid.contains(end) {
        return None;
    }

    if start == end {
        return Some(vec![start.clone()]);
    }

    let mut queue = VecDeque::from([start.clone()]);
    let mut visited = HashSet::from([start.clone()]);
    let mut parents: HashMap<ZoneId, ZoneId> = HashMap::new();

    while let Some(current) = queue.pop_front() {
        let zone = registry.get(&current)?;

        for adjacent in zone.adjacent_zones() {
            // Skip zones we want to avoid
            if avoid.contains(adjacent) {
                continue;
            }

            if visited.contains(adjacent) {
                continue;
            }

            parents.insert(adjacent.clone(), current.clone());

            if adjacent == end {
                return Some(reconstruct_path(&parents, start, end));
            }

            visited.insert(adjacent.clone());
            queue.push_back(adjacent.clone());
        }
    }

    None
}

/// Walk the parent map back from `end` to `start`
fn reconstruct_path(
    parents: &HashMap<ZoneId, ZoneId>,
    start: &ZoneId,
    end: &ZoneId,
) -> Vec<ZoneId> {
    let mut path = vec![end.clone()];
    let mut current = end;

    while current != start {
        match parents.get(current) {
            Some(parent) => {
                path.push(parent.clone());
                current = parent;
            }
            None => break,
        }
    }

    path.reverse();
    path
}
