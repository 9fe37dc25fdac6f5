//! Dynamic crowd flow simulation
//!
//! A background loop that perturbs a randomly chosen zone's occupancy by a
//! bounded random delta each tick, for a configured total duration, then
//! stops itself. Useful for exercising monitoring and routing under
//! changing occupancy without a real crowd.

use crate::control::CrowdController;
use crate::simulation::interruptible_sleep;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Handle to a running crowd flow simulation
///
/// The simulation stops itself once its configured duration elapses;
/// dropping the handle or calling [`stop`](CrowdFlowSimulator::stop) ends
/// it early.
#[derive(Debug)]
pub struct CrowdFlowSimulator {
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CrowdFlowSimulator {
    /// Start a crowd flow simulation against a shared controller
    ///
    /// Each tick applies a uniform random delta in
    /// `[-max_delta, +max_delta]` to a random zone. With `seed` set the
    /// perturbation sequence is deterministic.
    pub fn start(
        controller: Arc<CrowdController>,
        interval: Duration,
        duration: Duration,
        max_delta: i64,
        seed: Option<u64>,
    ) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop_flag);

        let handle = std::thread::spawn(move || {
            info!(
                duration_ms = duration.as_millis() as u64,
                interval_ms = interval.as_millis() as u64,
                "Crowd flow simulation started"
            );

            let mut rng: StdRng = match seed {
                Some(seed) => SeedableRng::seed_from_u64(seed),
                None => SeedableRng::from_entropy(),
            };

            // Zones are never removed, so the id snapshot stays valid
            let zone_ids: Vec<_> =
                controller.all_zone_statuses().into_iter().map(|s| s.id).collect();
            if zone_ids.is_empty() {
                warn!("Crowd flow simulation has no zones to perturb");
                return;
            }

            let started = Instant::now();
            while started.elapsed() < duration {
                interruptible_sleep(interval, &worker_stop);
                if worker_stop.load(Ordering::SeqCst) {
                    break;
                }

                let zone_id = &zone_ids[rng.gen_range(0..zone_ids.len())];
                let delta = rng.gen_range(-max_delta..=max_delta);

                match controller.perturb_zone(zone_id, delta) {
                    Ok(status) => {
                        debug!(
                            zone = %zone_id,
                            delta,
                            crowd = status.current_crowd,
                            "Crowd flow tick"
                        );
                    }
                    Err(e) => {
                        // A failed tick is logged and the loop continues
                        warn!(zone = %zone_id, error = %e, "Crowd flow tick failed");
                    }
                }
            }

            info!("Crowd flow simulation completed");
        });

        Self { stop_flag, handle: Some(handle) }
    }

    /// Whether the simulation thread is still attached
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the simulation early
    ///
    /// Blocks until the worker has exited; stopping an already-stopped
    /// simulation is a no-op.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Crowd flow worker terminated abnormally");
            }
        }
    }

    /// Block until the simulation's configured duration has elapsed
    pub fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Crowd flow worker terminated abnormally");
            }
        }
    }
}

impl Drop for CrowdFlowSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}
