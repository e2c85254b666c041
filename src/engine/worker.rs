use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Instant;

use crate::analysis::run_indicator;
use crate::config::DEBUG_FLAGS;

use super::messages::{JobRequest, JobResult};

/// One worker thread, one job at a time. Exits when the engine drops the
/// job sender.
pub fn spawn_worker_thread(rx: Receiver<JobRequest>, tx: Sender<JobResult>) {
    thread::spawn(move || {
        while let Ok(req) = rx.recv() {
            let start = Instant::now();

            let result = run_indicator(&req.params, &req.bundle);
            let elapsed = start.elapsed().as_millis();

            let job_result = JobResult {
                duration_ms: elapsed,
                result: result
                    .map(Arc::new)
                    .map_err(|e| format!("{:#}", e)),
            };

            // A dead receiver means the app is shutting down
            if tx.send(job_result).is_err() {
                break;
            }
        }
        if DEBUG_FLAGS.print_shutdown {
            log::info!("worker thread exiting, job channel closed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::{demo_aoi, demo_bundle};
    use crate::models::IndicatorModel;
    use std::sync::mpsc::channel;

    #[test]
    fn worker_round_trip() {
        let (job_tx, job_rx) = channel();
        let (result_tx, result_rx) = channel();
        spawn_worker_thread(job_rx, result_tx);

        let bundle = Arc::new(demo_bundle());
        job_tx
            .send(JobRequest {
                params: IndicatorModel::default().job_params(demo_aoi(), "demo"),
                bundle,
            })
            .unwrap();

        let result = result_rx
            .recv_timeout(std::time::Duration::from_secs(60))
            .unwrap();
        assert!(result.result.is_ok());
    }

    #[test]
    fn worker_reports_failures_as_strings() {
        let (job_tx, job_rx) = channel();
        let (result_tx, result_rx) = channel();
        spawn_worker_thread(job_rx, result_tx);

        let bundle = Arc::new(demo_bundle());
        let mut params = IndicatorModel::default().job_params(demo_aoi(), "demo");
        params.aoi.points[0].lat = -60.0; // far outside the grid
        job_tx.send(JobRequest { params, bundle }).unwrap();

        let result = result_rx
            .recv_timeout(std::time::Duration::from_secs(60))
            .unwrap();
        let err = result.result.err().unwrap();
        assert!(err.contains("does not intersect"));
    }
}
