//! Integration tests for crowd redistribution
//!
//! Redistribution moves a crowd from a zone to the best nearby zone with
//! spare capacity; total occupancy is conserved and failures are
//! structured, recoverable results.

use facility_crowd_control::*;

fn id(s: &str) -> ZoneId {
    ZoneId::new(s)
}

/// A(cap 100) - B(cap 200) - C(cap 150), C is the exit
fn abc_controller() -> CrowdController {
    let controller = CrowdController::new(FacilityConfig::default());
    controller.add_zone("A", "Zone A", 100, 0.0, 0.0);
    controller.add_zone("B", "Zone B", 200, 1.0, 0.0);
    controller.add_zone("C", "Zone C", 150, 2.0, 0.0);
    controller.connect(&id("A"), &id("B")).unwrap();
    controller.connect(&id("B"), &id("C")).unwrap();
    controller.mark_exit(&id("C")).unwrap();
    controller
}

#[test]
fn test_canonical_redistribution_scenario() {
    let controller = abc_controller();
    controller.move_crowd(&id("B"), 160).unwrap();

    let report = controller.redistribute_crowd(&id("B"), 30).unwrap();

    // B lost exactly 30
    let b_status = controller.zone_status(&id("B")).unwrap();
    assert_eq!(b_status.current_crowd, 130);
    assert_eq!(report.source_zone.current_crowd, 130);
    assert_eq!(report.crowd_size, 30);

    // The 30 went to a zone within 3 hops with spare room (A or C)
    let target = &report.target_zone;
    assert!(target.id == id("A") || target.id == id("C"));
    assert_eq!(target.current_crowd, 30);
}

#[test]
fn test_redistribution_conserves_total_occupancy() {
    let controller = abc_controller();
    controller.move_crowd(&id("A"), 70).unwrap();
    controller.move_crowd(&id("B"), 160).unwrap();
    controller.move_crowd(&id("C"), 20).unwrap();

    let before = controller.system_overview().total_crowd;
    controller.redistribute_crowd(&id("B"), 40).unwrap();
    let after = controller.system_overview().total_crowd;

    assert_eq!(before, after);
}

#[test]
fn test_redistribution_prefers_least_congested_nearby_zone() {
    let controller = abc_controller();
    controller.move_crowd(&id("A"), 90).unwrap(); // 90% congested
    controller.move_crowd(&id("B"), 160).unwrap(); // source
    // C is empty: score 0 + 1 hop beats A's 90 + 1 hop

    let report = controller.redistribute_crowd(&id("B"), 30).unwrap();
    assert_eq!(report.target_zone.id, id("C"));
    assert_eq!(report.path, vec!["Zone B", "Zone C"]);
}

#[test]
fn test_redistribution_unknown_source_fails() {
    let controller = abc_controller();
    assert!(matches!(
        controller.redistribute_crowd(&id("GHOST"), 10),
        Err(CrowdError::ZoneNotFound(_))
    ));
}

#[test]
fn test_redistribution_insufficient_occupancy_fails() {
    let controller = abc_controller();
    controller.move_crowd(&id("B"), 20).unwrap();

    let result = controller.redistribute_crowd(&id("B"), 30);
    match result {
        Err(CrowdError::InsufficientOccupancy { zone, requested, available }) => {
            assert_eq!(zone, id("B"));
            assert_eq!(requested, 30);
            assert_eq!(available, 20);
        }
        other => panic!("expected InsufficientOccupancy, got {:?}", other),
    }

    // Nothing moved
    assert_eq!(controller.zone_status(&id("B")).unwrap().current_crowd, 20);
}

#[test]
fn test_redistribution_with_no_candidate_fails() {
    // Source full, neighbor too small for the crowd
    let controller = CrowdController::new(FacilityConfig::default());
    controller.add_zone("SRC", "Source", 100, 0.0, 0.0);
    controller.add_zone("TINY", "Tiny Neighbor", 10, 1.0, 0.0);
    controller.connect(&id("SRC"), &id("TINY")).unwrap();

    controller.move_crowd(&id("SRC"), 80).unwrap();

    let result = controller.redistribute_crowd(&id("SRC"), 50);
    match result {
        Err(CrowdError::NoRedistributionTarget { zone, radius }) => {
            assert_eq!(zone, id("SRC"));
            assert_eq!(radius, 3);
        }
        other => panic!("expected NoRedistributionTarget, got {:?}", other),
    }

    // Failure left both zones untouched
    assert_eq!(controller.zone_status(&id("SRC")).unwrap().current_crowd, 80);
    assert_eq!(controller.zone_status(&id("TINY")).unwrap().current_crowd, 0);
}

#[test]
fn test_redistribution_ignores_zones_beyond_radius() {
    // Line of five zones; with radius 3 the far end is out of reach
    let config = FacilityConfig { redistribution_radius: 3, ..Default::default() };
    let controller = CrowdController::new(config);
    for (i, zone_id) in ["Z0", "Z1", "Z2", "Z3", "Z4"].iter().enumerate() {
        controller.add_zone(*zone_id, format!("Zone {}", i), 100, i as f64, 0.0);
    }
    for pair in [("Z0", "Z1"), ("Z1", "Z2"), ("Z2", "Z3"), ("Z3", "Z4")] {
        controller.connect(&id(pair.0), &id(pair.1)).unwrap();
    }

    // Fill everything near the source so only Z4 (4 hops away) has room
    controller.move_crowd(&id("Z0"), 80).unwrap();
    for zone_id in ["Z1", "Z2", "Z3"] {
        controller.move_crowd(&id(zone_id), 100).unwrap();
    }

    assert!(matches!(
        controller.redistribute_crowd(&id("Z0"), 50),
        Err(CrowdError::NoRedistributionTarget { .. })
    ));

    // A wider radius reaches Z4
    let wide = FacilityConfig { redistribution_radius: 4, ..Default::default() };
    let controller = CrowdController::new(wide);
    for (i, zone_id) in ["Z0", "Z1", "Z2", "Z3", "Z4"].iter().enumerate() {
        controller.add_zone(*zone_id, format!("Zone {}", i), 100, i as f64, 0.0);
    }
    for pair in [("Z0", "Z1"), ("Z1", "Z2"), ("Z2", "Z3"), ("Z3", "Z4")] {
        controller.connect(&id(pair.0), &id(pair.1)).unwrap();
    }
    controller.move_crowd(&id("Z0"), 80).unwrap();
    for zone_id in ["Z1", "Z2", "Z3"] {
        controller.move_crowd(&id(zone_id), 100).unwrap();
    }

    let report = controller.redistribute_crowd(&id("Z0"), 50).unwrap();
    assert_eq!(report.target_zone.id, id("Z4"));
}

#[test]
fn test_redistribution_report_is_serializable() {
    let controller = abc_controller();
    controller.move_crowd(&id("B"), 160).unwrap();

    let report = controller.redistribute_crowd(&id("B"), 30).unwrap();
    let json = serde_json::to_string(&report).unwrap();

    let back: RedistributionReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.crowd_size, 30);
    assert_eq!(back.message, report.message);
}
