//! Recurring system monitoring
//!
//! A background loop that periodically captures the system overview, emits
//! it to an observer, and runs critical-situation detection. Stopping is
//! immediate (the worker thread is joined before `stop` returns) and
//! idempotent.

use crate::control::{CrowdController, SystemOverview};
use crate::simulation::interruptible_sleep;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{info, warn};

/// Callback receiving each tick's overview snapshot
pub type OverviewObserver = Box<dyn Fn(&SystemOverview) + Send + 'static>;

/// Handle to a running monitoring loop
///
/// Dropping the handle stops the loop.
#[derive(Debug)]
pub struct MonitoringLoop {
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MonitoringLoop {
    /// Start monitoring with the default tracing observer
    pub fn start(controller: Arc<CrowdController>, interval: Duration) -> Self {
        Self::start_with_observer(controller, interval, Box::new(log_overview))
    }

    /// Start monitoring with a custom overview observer
    pub fn start_with_observer(
        controller: Arc<CrowdController>,
        interval: Duration,
        observer: OverviewObserver,
    ) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop_flag);

        let handle = std::thread::spawn(move || {
            info!(interval_ms = interval.as_millis() as u64, "Monitoring started");

            loop {
                interruptible_sleep(interval, &worker_stop);
                if worker_stop.load(Ordering::SeqCst) {
                    break;
                }

                // A failed tick must never kill the loop
                let tick = catch_unwind(AssertUnwindSafe(|| {
                    let overview = controller.system_overview();
                    observer(&overview);
                    controller.check_critical_situations();
                }));
                if tick.is_err() {
                    warn!("Monitoring tick failed; continuing on next interval");
                }
            }

            info!("Monitoring stopped");
        });

        Self { stop_flag, handle: Some(handle) }
    }

    /// Whether the loop is still running
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the loop
    ///
    /// Blocks until the worker has exited, so no tick fires after this
    /// returns. Stopping an already-stopped loop is a no-op.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Monitoring worker terminated abnormally");
            }
        }
    }
}

impl Drop for MonitoringLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Default observer: emit the overview through tracing
fn log_overview(overview: &SystemOverview) {
    info!(
        total_crowd = overview.total_crowd,
        total_capacity = overview.total_capacity,
        utilization = format!("{:.1}", overview.overall_utilization),
        critical_zones = overview.critical_zones,
        average_congestion = format!("{:.1}", overview.average_congestion),
        "System monitoring update"
    );
}
