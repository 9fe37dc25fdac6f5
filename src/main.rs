// Facility Crowd Control - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/facility-crowd-control --demo
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/facility-crowd-control --layout venue.json --monitoring-interval-ms 2000 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use facility_crowd_control::control::CrowdController;
use facility_crowd_control::facility::LayoutSpec;
use facility_crowd_control::simulation::{CrowdFlowSimulator, LoggingConfig, MonitoringLoop};
use facility_crowd_control::types::config::CliArgs;
use facility_crowd_control::types::{FacilityConfig, OutputFormat, ZoneId};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = FacilityConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Facility Crowd Control");

    // Load configuration from CLI arguments and optional config file
    let config = match FacilityConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - nothing will be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run(&args, config) {
        error!("Run failed: {:#}", e);
        process::exit(1);
    }

    info!("Facility Crowd Control completed successfully");
}

/// Build the facility and run either the demo scenario or a status report
fn run(args: &CliArgs, config: FacilityConfig) -> anyhow::Result<()> {
    let layout = match &args.layout {
        Some(path) => LayoutSpec::from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to load layout from {}", path))?,
        None => LayoutSpec::stadium_demo(),
    };

    let controller = Arc::new(
        CrowdController::from_layout(config.clone(), &layout)
            .context("Failed to build facility from layout")?,
    );

    eprintln!(
        "Facility ready: {} zones, {} exits\n",
        controller.system_overview().total_zones,
        controller.system_overview().exit_zones
    );

    if args.demo {
        run_demo(args, &config, &controller)
    } else {
        let format: OutputFormat = args
            .output_format
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(anyhow::Error::msg)?
            .unwrap_or_default();

        match format {
            OutputFormat::Json => {
                let overview = controller.system_overview();
                println!("{}", serde_json::to_string_pretty(&overview)?);
            }
            OutputFormat::Text => print_overview(&controller),
        }
        eprintln!("\nRun with --demo for the full crowd management scenario.");
        Ok(())
    }
}

/// The demo scenario: crowd arrival, routing, overcrowding, redistribution,
/// emergency planning, then live monitoring with simulated crowd flow
fn run_demo(
    args: &CliArgs,
    config: &FacilityConfig,
    controller: &Arc<CrowdController>,
) -> anyhow::Result<()> {
    // Initial crowd arrival
    eprintln!("Simulating initial crowd arrival...");
    for (zone, crowd) in
        [("ENT1", 150u32), ("CON1", 200), ("SEC1", 180), ("SEC2", 160), ("FOOD", 80)]
    {
        if let Err(e) = controller.move_crowd(&ZoneId::new(zone), crowd) {
            eprintln!("  Skipping arrival into {}: {}", zone, e);
        }
    }

    eprintln!("\nInitial system status:");
    print_overview(controller);

    // Routing: best way out of Section A for 150 people
    eprintln!("\nBest evacuation route from SEC1 for 150 people:");
    match controller.optimal_evacuation_route(&ZoneId::new("SEC1"), 150) {
        Ok(route) => {
            let path: Vec<&str> = route.path.iter().map(|z| z.as_str()).collect();
            eprintln!("  Path: {}", path.join(" -> "));
            eprintln!("  Distance: {} zones", route.distance);
            eprintln!("  Congestion score: {:.1}", route.congestion_score);
            eprintln!("  Spare capacity along route: {}", route.capacity);
            eprintln!("  Fits the crowd: {}", if route.can_accommodate { "yes" } else { "no" });
        }
        Err(e) => eprintln!("  No route: {}", e),
    }

    // Overcrowd two sections and redistribute
    eprintln!("\nCreating overcrowding scenario...");
    let _ = controller.move_crowd(&ZoneId::new("SEC1"), 100);
    let _ = controller.move_crowd(&ZoneId::new("SEC2"), 120);

    eprintln!("Redistributing 50 people out of SEC1...");
    match controller.redistribute_crowd(&ZoneId::new("SEC1"), 50) {
        Ok(report) => {
            eprintln!("  {}", report.message);
            eprintln!("  Path: {}", report.path.join(" -> "));
            eprintln!(
                "  Source congestion now {:.1}%, target congestion now {:.1}%",
                report.source_zone.congestion_level, report.target_zone.congestion_level
            );
        }
        Err(e) => eprintln!("  Redistribution failed: {}", e),
    }

    // Emergency evacuation planning
    eprintln!("\nDrawing up emergency evacuation plan...");
    let plan = controller.initiate_emergency_evacuation();
    eprintln!(
        "Plan {} covers {} people across {} zones ({} high priority):",
        plan.id,
        plan.total_crowd(),
        plan.entries.len(),
        plan.high_priority_count()
    );
    for (i, entry) in plan.entries.iter().enumerate() {
        eprintln!(
            "  {}. {} ({} people) - priority {} - ~{} min via {}",
            i + 1,
            entry.zone_name,
            entry.crowd,
            entry.priority,
            entry.estimated_minutes,
            entry.route.join(" -> ")
        );
    }

    if let Some(path) = &args.plan_output {
        plan.write_json(path)
            .with_context(|| format!("Failed to write evacuation plan to {}", path))?;
        eprintln!("Evacuation plan written to {}", path);
    }

    // Live monitoring with simulated crowd flow
    eprintln!("\nStarting monitoring and crowd flow simulation...");
    let mut monitor = MonitoringLoop::start(
        Arc::clone(controller),
        Duration::from_millis(config.monitoring_interval_ms),
    );
    let mut flow = CrowdFlowSimulator::start(
        Arc::clone(controller),
        Duration::from_millis(config.simulation_interval_ms),
        Duration::from_millis(config.simulation_duration_ms),
        config.max_flow_delta,
        config.seed,
    );

    flow.wait();
    monitor.stop();

    eprintln!("\nFinal system status:");
    print_overview(controller);

    eprintln!("\nDemo completed.");
    Ok(())
}

/// Print the current system overview with per-zone congestion bands
fn print_overview(controller: &Arc<CrowdController>) {
    let overview = controller.system_overview();

    eprintln!("  Total zones: {}", overview.total_zones);
    eprintln!("  Crowd: {}/{}", overview.total_crowd, overview.total_capacity);
    eprintln!("  Overall utilization: {:.1}%", overview.overall_utilization);
    eprintln!("  Average congestion: {:.1}%", overview.average_congestion);
    eprintln!("  Critical zones: {}", overview.critical_zones);
    eprintln!("  Exits: {}", overview.exit_zones);
    if overview.emergency_active {
        eprintln!("  EMERGENCY ACTIVE");
    }

    let threshold = controller.config().critical_threshold;
    for status in &overview.zones_status {
        eprintln!(
            "  [{}] {}: {}/{} ({:.1}%)",
            status.congestion_band(threshold),
            status.name,
            status.current_crowd,
            status.capacity,
            status.congestion_level
        );
    }
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &FacilityConfig) {
    eprintln!("Facility Crowd Control");
    eprintln!("======================");
    eprintln!("Zone-based crowd management with congestion-aware routing");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &FacilityConfig) {
    eprintln!("Configuration:");
    eprintln!("  Critical Threshold: {:.0}%", config.critical_threshold);
    eprintln!("  Redistribution Radius: {} hops", config.redistribution_radius);
    eprintln!("  Minutes per Hop: {}", config.minutes_per_hop);
    eprintln!("  Monitoring Interval: {} ms", config.monitoring_interval_ms);
    eprintln!("  Simulation Interval: {} ms", config.simulation_interval_ms);
    eprintln!("  Simulation Duration: {} ms", config.simulation_duration_ms);
    eprintln!("  Max Flow Delta: +/-{}", config.max_flow_delta);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
