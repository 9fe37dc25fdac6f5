//! Integration tests for evacuation route ranking and emergency planning
//!
//! Includes the canonical three-zone scenario: A(100) - B(200) - C(150)
//! with C marked as the exit.

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
fn test_canonical_evacuation_scenario() {
    let controller = abc_controller();
    controller.move_crowd(&id("A"), 80).unwrap();

    let route = controller.optimal_evacuation_route(&id("A"), 50).unwrap();

    assert_eq!(route.path, vec![id("A"), id("B"), id("C")]);
    assert_eq!(route.distance, 2);
    // Bottleneck: min(100-80, 200-0, 150-0) = 20
    assert_eq!(route.capacity, 20);
    assert!(!route.can_accommodate); // 20 < 50
    assert_eq!(route.exit_zone, id("C"));
}

#[test]
fn test_route_from_exit_zone_itself() {
    let controller = abc_controller();
    let route = controller.optimal_evacuation_route(&id("C"), 10).unwrap();

    assert_eq!(route.path, vec![id("C")]);
    assert_eq!(route.distance, 0);
    assert!(route.can_accommodate);
}

#[test]
fn test_accommodating_route_outranks_lower_scores() {
    // Two exits: a short congested corridor that fits the crowd, and a
    // clear corridor that cannot take it
    let controller = CrowdController::new(FacilityConfig::default());
    controller.add_zone("S", "Start", 500, 0.0, 0.0);
    controller.add_zone("BIG", "Big Corridor", 400, 1.0, 1.0);
    controller.add_zone("SMALL", "Small Corridor", 60, 1.0, -1.0);
    controller.add_zone("X1", "Exit One", 400, 2.0, 1.0);
    controller.add_zone("X2", "Exit Two", 400, 2.0, -1.0);
    for (a, b) in [("S", "BIG"), ("BIG", "X1"), ("S", "SMALL"), ("SMALL", "X2")] {
        controller.connect(&id(a), &id(b)).unwrap();
    }
    controller.mark_exit(&id("X1")).unwrap();
    controller.mark_exit(&id("X2")).unwrap();

    // Congest the big corridor without making it the bottleneck
    controller.move_crowd(&id("BIG"), 200).unwrap();

    let route = controller.optimal_evacuation_route(&id("S"), 100).unwrap();

    // The congested-but-roomy route wins because it accommodates; the
    // clear route's 60-person corridor cannot
    assert_eq!(route.exit_zone, id("X1"));
    assert!(route.can_accommodate);
    assert!(route.congestion_score > 0.0);
}

#[test]
fn test_unknown_zone_and_unreachable_exit() {
    let controller = abc_controller();

    assert!(matches!(
        controller.optimal_evacuation_route(&id("GHOST"), 10),
        Err(CrowdError::ZoneNotFound(_))
    ));

    // An isolated zone has no route to any exit
    controller.add_zone("LONE", "Isolated", 100, 9.0, 9.0);
    assert!(matches!(
        controller.optimal_evacuation_route(&id("LONE"), 10),
        Err(CrowdError::NoEvacuationRoute(_))
    ));
}

#[test]
fn test_emergency_plan_orders_by_congestion() {
    let controller = abc_controller();
    controller.move_crowd(&id("A"), 90).unwrap(); // 90% - critical
    controller.move_crowd(&id("B"), 100).unwrap(); // 50%
    controller.move_crowd(&id("C"), 15).unwrap(); // 10%

    let plan = controller.initiate_emergency_evacuation();

    assert_eq!(plan.entries.len(), 3);
    let order: Vec<&str> = plan.entries.iter().map(|e| e.zone_id.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C"]);

    // A was critical at planning time
    assert_eq!(plan.entries[0].priority, EvacuationPriority::High);
    assert_eq!(plan.entries[1].priority, EvacuationPriority::Normal);
    assert_eq!(plan.high_priority_count(), 1);
}

#[test]
fn test_emergency_plan_time_estimates() {
    let controller = abc_controller();
    controller.move_crowd(&id("A"), 40).unwrap();

    let plan = controller.initiate_emergency_evacuation();
    assert_eq!(plan.entries.len(), 1);

    // A -> B -> C is two hops at the default 2 minutes per hop
    let entry = &plan.entries[0];
    assert_eq!(entry.route, vec!["Zone A", "Zone B", "Zone C"]);
    assert_eq!(entry.estimated_minutes, 4);
    assert_eq!(entry.crowd, 40);
}

#[test]
fn test_emergency_plan_respects_custom_minutes_per_hop() {
    let config = FacilityConfig { minutes_per_hop: 5, ..Default::default() };
    let controller = CrowdController::new(config);
    controller.add_zone("A", "Zone A", 100, 0.0, 0.0);
    controller.add_zone("B", "Zone B", 100, 1.0, 0.0);
    controller.connect(&id("A"), &id("B")).unwrap();
    controller.mark_exit(&id("B")).unwrap();
    controller.move_crowd(&id("A"), 10).unwrap();

    let plan = controller.initiate_emergency_evacuation();
    assert_eq!(plan.entries[0].estimated_minutes, 5);
}

#[test]
fn test_emergency_plan_omits_unreachable_and_empty_zones() {
    let controller = abc_controller();
    controller.add_zone("LONE", "Isolated", 100, 9.0, 9.0);

    controller.move_crowd(&id("A"), 30).unwrap();
    controller.move_crowd(&id("LONE"), 50).unwrap();
    // B and C stay empty

    let plan = controller.initiate_emergency_evacuation();

    // Only A makes the plan: LONE has no exit, B and C hold nobody
    assert_eq!(plan.entries.len(), 1);
    assert_eq!(plan.entries[0].zone_id, id("A"));
    assert_eq!(plan.total_crowd(), 30);
}

#[test]
fn test_planning_moves_nobody() {
    let controller = abc_controller();
    controller.move_crowd(&id("A"), 60).unwrap();
    controller.move_crowd(&id("B"), 120).unwrap();

    let before = controller.system_overview().total_crowd;
    let _plan = controller.initiate_emergency_evacuation();
    let after = controller.system_overview().total_crowd;

    assert_eq!(before, after);
}

#[test]
fn test_plan_export_to_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("evacuation-plan.json");

    let controller = abc_controller();
    controller.move_crowd(&id("A"), 90).unwrap();

    let plan = controller.initiate_emergency_evacuation();
    plan.write_json(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let loaded: EvacuationPlan = serde_json::from_str(&content).unwrap();
    assert_eq!(loaded.id, plan.id);
    assert_eq!(loaded.entries.len(), plan.entries.len());
    assert_eq!(loaded.entries[0].priority, EvacuationPriority::High);
}
