use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, RwLock};

use crate::config::DEBUG_FLAGS;
use crate::data::bundle::DataBundle;
use crate::models::results::IndicatorOutputs;
use crate::models::{IndicatorModel, JobParams};

use super::messages::{JobRequest, JobResult};
use super::state::RunState;
use super::worker;

/// Drives the background worker and owns the latest results.
///
/// The engine holds its own handle to the shared indicator model so a
/// finished run can be written back where every tile reads it.
pub struct AnalysisEngine {
    /// Shared immutable data.
    pub bundle: Arc<DataBundle>,

    /// The shared configuration and output slot the tiles also hold.
    indicator: Arc<RwLock<IndicatorModel>>,

    /// Current run bookkeeping.
    pub run: RunState,

    /// Worker communication.
    job_tx: Sender<JobRequest>,
    result_rx: Receiver<JobResult>,
}

impl AnalysisEngine {
    /// Spawn the worker and wire the channels.
    pub fn new(bundle: Arc<DataBundle>, indicator: Arc<RwLock<IndicatorModel>>) -> Self {
        let (job_tx, job_rx) = channel::<JobRequest>();
        let (result_tx, result_rx) = channel::<JobResult>();

        worker::spawn_worker_thread(job_rx, result_tx);

        Self {
            bundle,
            indicator,
            run: RunState::new(),
            job_tx,
            result_rx,
        }
    }

    /// THE GAME LOOP.
    /// Returns true while a job is in flight, which tells the UI to keep
    /// requesting repaints.
    pub fn update(&mut self) -> bool {
        while let Ok(result) = self.result_rx.try_recv() {
            self.handle_job_result(result);
        }
        self.run.is_computing
    }

    /// Launch a run with a parameter snapshot. Ignored while busy.
    pub fn request_run(&mut self, params: JobParams) {
        if self.run.is_computing {
            log::warn!("run requested while the worker is busy, ignoring");
            return;
        }
        if DEBUG_FLAGS.print_engine_events {
            log::info!(
                "dispatching run for '{}' ({} sensors)",
                params.aoi_name,
                params.sensors.len()
            );
        }

        self.run.is_computing = true;
        self.run.last_error = None;

        let req = JobRequest {
            params,
            bundle: self.bundle.clone(),
        };
        // A dead worker only happens during shutdown
        let _ = self.job_tx.send(req);
    }

    /// Front buffer accessor for the UI.
    pub fn outputs(&self) -> Option<Arc<IndicatorOutputs>> {
        self.run.outputs.clone()
    }

    pub fn is_computing(&self) -> bool {
        self.run.is_computing
    }

    pub fn last_error(&self) -> Option<&str> {
        self.run.last_error.as_deref()
    }

    pub fn status_msg(&self) -> Option<String> {
        if self.run.is_computing {
            Some("Computing indicators".to_string())
        } else {
            self.run.outputs.as_ref().map(|o| {
                format!(
                    "Last run: {} ms, {}s ago",
                    o.duration_ms,
                    self.run.last_update_time.elapsed().as_secs()
                )
            })
        }
    }

    fn handle_job_result(&mut self, result: JobResult) {
        match result.result {
            Ok(outputs) => {
                if DEBUG_FLAGS.print_engine_events {
                    log::info!("run finished in {} ms", result.duration_ms);
                }
                // Swap the front buffer and publish on the shared model
                self.run.update_buffer(outputs.clone());
                if let Ok(mut indicator) = self.indicator.write() {
                    indicator.outputs = Some(outputs);
                }
            }
            Err(e) => {
                log::error!("worker failed: {}", e);
                self.run.last_error = Some(e);
                self.run.is_computing = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::{demo_aoi, demo_bundle};
    use std::time::{Duration, Instant};

    fn engine_with_model() -> (AnalysisEngine, Arc<RwLock<IndicatorModel>>) {
        let indicator = Arc::new(RwLock::new(IndicatorModel::default()));
        let engine = AnalysisEngine::new(Arc::new(demo_bundle()), indicator.clone());
        (engine, indicator)
    }

    #[test]
    fn run_publishes_to_the_shared_model() {
        let (mut engine, indicator) = engine_with_model();
        let params = indicator.read().unwrap().job_params(demo_aoi(), "demo");
        engine.request_run(params);
        assert!(engine.is_computing());

        let deadline = Instant::now() + Duration::from_secs(60);
        while engine.update() {
            assert!(Instant::now() < deadline, "worker never finished");
            std::thread::sleep(Duration::from_millis(20));
        }

        let outputs = engine.outputs().expect("front buffer filled");
        let shared = indicator.read().unwrap().outputs.clone().unwrap();
        assert!(Arc::ptr_eq(&outputs, &shared));
        assert!(engine.last_error().is_none());

        // The status line reports the finished run and its age
        let status = engine.status_msg().unwrap();
        assert!(status.contains("Last run"));
        assert!(status.contains("ago"));
    }

    #[test]
    fn duplicate_requests_are_ignored_while_busy() {
        let (mut engine, indicator) = engine_with_model();
        let params = indicator.read().unwrap().job_params(demo_aoi(), "demo");
        engine.request_run(params.clone());
        engine.request_run(params);

        let deadline = Instant::now() + Duration::from_secs(60);
        while engine.update() {
            assert!(Instant::now() < deadline, "worker never finished");
            std::thread::sleep(Duration::from_millis(20));
        }

        // Only one result ever arrives
        assert!(engine.outputs().is_some());
        assert!(!engine.update());
    }

    #[test]
    fn failed_run_surfaces_the_error() {
        let (mut engine, indicator) = engine_with_model();
        let mut params = indicator.read().unwrap().job_params(demo_aoi(), "demo");
        params.aoi.points[0].lon = 170.0;
        engine.request_run(params);

        let deadline = Instant::now() + Duration::from_secs(60);
        while engine.update() {
            assert!(Instant::now() < deadline, "worker never finished");
            std::thread::sleep(Duration::from_millis(20));
        }

        assert!(engine.outputs().is_none());
        assert!(engine.last_error().unwrap().contains("does not intersect"));
    }
}
