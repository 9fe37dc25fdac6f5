//! Background loops and runtime support
//!
//! This module contains the recurring background tasks that keep routing
//! decisions fresh, plus logging configuration.
//!
//! # Overview
//!
//! - **MonitoringLoop**: periodically emits the system overview and runs
//!   critical-situation detection
//! - **CrowdFlowSimulator**: injects bounded random occupancy changes for a
//!   configured duration
//! - **LoggingConfig**: tracing subscriber configuration
//!
//! The two loops are independent and may run concurrently against the same
//! controller; they serialize with synchronous callers through the
//! controller's own mutex. Stopping either loop is immediate-effect and
//! idempotent.
//!
//! # Usage Example
//!
//! ```rust
//! use facility_crowd_control::control::CrowdController;
//! use facility_crowd_control::facility::LayoutSpec;
//! use facility_crowd_control::simulation::MonitoringLoop;
//! use facility_crowd_control::types::FacilityConfig;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let controller = Arc::new(
//!     CrowdController::from_layout(FacilityConfig::default(), &LayoutSpec::stadium_demo())
//!         .unwrap(),
//! );
//!
//! let mut monitor = MonitoringLoop::start(Arc::clone(&controller), Duration::from_millis(50));
//! // ... the facility keeps serving callers while monitoring runs ...
//! monitor.stop();
//! ```

pub mod flow;
pub mod logging;
pub mod monitor;

// Re-export all public types for convenience
pub use flow::CrowdFlowSimulator;
pub use logging::LoggingConfig;
pub use monitor::{MonitoringLoop, OverviewObserver};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Sleep slice granularity for stop-flag polling
const SLEEP_SLICE: Duration = Duration::from_millis(25);

/// Sleep for `interval`, waking early if the stop flag is raised
pub(crate) fn interruptible_sleep(interval: Duration, stop: &Arc<AtomicBool>) {
    let started = Instant::now();
    while started.elapsed() < interval {
        if stop.load(Ordering::SeqCst) {
            return;
        }
        let remaining = interval.saturating_sub(started.elapsed());
        std::thread::sleep(remaining.min(SLEEP_SLICE));
    }
}
